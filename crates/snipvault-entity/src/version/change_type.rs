//! Why a version was recorded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of the mutation that produced a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "version_change_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// The snippet was created. Always version 1.
    Create,
    /// The snippet's code was edited.
    Update,
    /// An older version was restored.
    Restore,
}

impl ChangeType {
    /// All change types, in lifecycle order.
    pub const ALL: [ChangeType; 3] = [Self::Create, Self::Update, Self::Restore];

    /// Return the change type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = snipvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "restore" => Ok(Self::Restore),
            _ => Err(snipvault_core::AppError::validation(format!(
                "Invalid change type: '{s}'. Expected one of: create, update, restore"
            ))),
        }
    }
}
