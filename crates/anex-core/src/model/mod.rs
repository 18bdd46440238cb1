pub mod catalog;
pub mod lenient;
pub mod settings;
pub mod tracking;

pub use catalog::{Module, StyleProfile};
pub use settings::{Settings, StorageMode, SETTINGS_KEY};
pub use tracking::{Mystery, Narrative, SecretList, TimelineEntry, TrackingState, TRACKING_KEY};

/// Key-value map backing both storage scopes
///
/// Insertion order is preserved so reports list keys in the order they were
/// written.
pub type DataMap = serde_json::Map<String, serde_json::Value>;
