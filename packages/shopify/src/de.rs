//! Shared deserialization helpers.

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default value.
///
/// The platform sends `null` for fields it has no value for. Combine with
/// `#[serde(default)]` so that missing keys default as well.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
