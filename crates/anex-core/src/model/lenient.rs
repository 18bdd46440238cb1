//! Shape-tolerant deserializers for stored records
//!
//! Tracking state is plain data written by other tools as well as by `init`,
//! so a field holding the wrong JSON type decodes to its default instead of
//! failing the whole record.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a field, falling back to `T::default()` on any type mismatch
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode an optional text field from any scalar
///
/// Strings pass through, numbers and booleans use their JSON text, null is
/// absent and objects/arrays keep their compact JSON form.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}

/// Decode an optional list of text items from any shape
///
/// An array yields one item per element; any other non-null value becomes a
/// single item.
pub fn text_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::Array(items) => Some(items.iter().filter_map(value_text).collect()),
        other => value_text(&other).map(|item| vec![item]),
    })
}

pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
