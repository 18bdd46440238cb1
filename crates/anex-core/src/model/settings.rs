use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use anex_core_types::schema::EVENT_FALLBACK;

use crate::errors::{AnexError, Result};
use crate::model::{DataMap, StyleProfile};

/// Key of the settings record inside the process-wide extension settings
pub const SETTINGS_KEY: &str = "anex_debug";

/// Where the tracking state lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Session-scoped chat metadata, falling back to global when unavailable
    #[default]
    Chat,
    /// Process-wide extension settings
    Global,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageMode::Chat => "chat",
            StorageMode::Global => "global",
        }
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageMode {
    type Err = AnexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "chat" => Ok(StorageMode::Chat),
            "global" => Ok(StorageMode::Global),
            other => Err(AnexError::Serialization {
                message: format!("unknown storage mode '{}', expected chat or global", other),
            }),
        }
    }
}

/// Extension settings persisted in the process-wide store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub enabled: bool,
    pub current_style: StyleProfile,
    pub debug_level: u8,
    pub auto_update: bool,
    pub storage_mode: StorageMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            current_style: StyleProfile::RinaKent,
            debug_level: 2,
            auto_update: false,
            storage_mode: StorageMode::Chat,
        }
    }
}

impl Settings {
    /// Read the settings record from `map`, creating or completing it
    ///
    /// A missing record is created from the defaults. An existing record
    /// keeps every key it has; only absent keys are filled in. A field
    /// holding an unusable value decodes to its default with a warning. The
    /// completed record is written back to `map` but not saved.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the stored record is not an object; `map`
    /// is left untouched.
    pub fn load_or_init(map: &mut DataMap) -> Result<Settings> {
        let Value::Object(defaults) = serde_json::to_value(Settings::default())? else {
            return Err(AnexError::Internal {
                message: "default settings did not serialize to an object".to_string(),
            });
        };

        let mut record = match map.get(SETTINGS_KEY) {
            None => DataMap::new(),
            Some(Value::Object(stored)) => stored.clone(),
            Some(_) => {
                return Err(AnexError::Serialization {
                    message: format!("{} is not an object", SETTINGS_KEY),
                })
            }
        };
        for (key, value) in defaults {
            record.entry(key).or_insert(value);
        }

        let settings = Settings::from_record(&record);
        map.insert(SETTINGS_KEY.to_string(), Value::Object(record));
        Ok(settings)
    }

    fn from_record(record: &DataMap) -> Settings {
        let defaults = Settings::default();
        Settings {
            enabled: field_or(record, "enabled", defaults.enabled),
            current_style: field_or(record, "currentStyle", defaults.current_style),
            debug_level: field_or(record, "debugLevel", defaults.debug_level),
            auto_update: field_or(record, "autoUpdate", defaults.auto_update),
            storage_mode: field_or(record, "storageMode", defaults.storage_mode),
        }
    }

    /// Write this record into `map` under `SETTINGS_KEY`
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn store(&self, map: &mut DataMap) -> Result<()> {
        map.insert(SETTINGS_KEY.to_string(), serde_json::to_value(self)?);
        Ok(())
    }
}

fn field_or<T: DeserializeOwned>(record: &DataMap, key: &str, default: T) -> T {
    let Some(value) = record.get(key) else {
        return default;
    };
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(
                component = module_path!(),
                op = "load_settings",
                event = EVENT_FALLBACK,
                field = key,
                reason = %err,
                "unusable settings value, using default"
            );
            default
        }
    }
}
