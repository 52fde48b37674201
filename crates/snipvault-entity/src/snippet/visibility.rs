//! Snippet visibility.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who may read a snippet and its version history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "snippet_visibility", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Readable by everyone, including anonymous visitors.
    #[default]
    Public,
    /// Readable by the owner only.
    Private,
}

impl Visibility {
    /// Check if this is public visibility.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }

    /// Return the visibility as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = snipvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(snipvault_core::AppError::validation(format!(
                "Invalid visibility: '{s}'. Expected one of: public, private"
            ))),
        }
    }
}
