//! Serde helpers for admin API payloads.

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as the type's default value.
///
/// Combined with a container-level `#[serde(default)]`, a field may then be
/// missing, `null`, or present.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
