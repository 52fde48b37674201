//! Serde helper for patch fields that distinguish "absent" from "null".

use serde::{Deserialize, Deserializer};

/// Deserializes a present field into `Some(value)`, including `Some(None)` for `null`.
///
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
