//! Tracking state: module maps and narrative structures
//!
//! Every field is optional on decode. Stored records may come from older
//! versions or be edited by hand, so missing and mistyped fields are modeled
//! as empty rather than rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::lenient;
use crate::model::{DataMap, Module, StyleProfile};

/// Key of the tracking state inside whichever store is active
pub const TRACKING_KEY: &str = "anex";

/// Full tracked state for one session (or for the process in global mode)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackingState {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub style: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub initialized: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub emotions: DataMap,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub resources: DataMap,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub goals: DataMap,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub beliefs: DataMap,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub trauma: DataMap,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub relationships: DataMap,
    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub narrative: Option<Narrative>,
}

impl TrackingState {
    /// Fresh state for `style`: empty modules and an empty narrative
    pub fn new(style: StyleProfile, initialized: impl Into<String>) -> Self {
        Self {
            style: style.id().to_string(),
            initialized: initialized.into(),
            narrative: Some(Narrative::default()),
            ..Self::default()
        }
    }

    /// Decode a stored value
    ///
    /// Falsy values (null, false, 0, empty string) mean "no state". An
    /// object decodes field by field. Any other truthy value counts as a
    /// state with every field missing.
    pub fn from_stored(value: &Value) -> Option<TrackingState> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Object(_) => Some(serde_json::from_value(value.clone()).unwrap_or_default()),
            _ => Some(TrackingState::default()),
        }
    }

    pub fn module(&self, module: Module) -> &DataMap {
        match module {
            Module::Emotions => &self.emotions,
            Module::Resources => &self.resources,
            Module::Goals => &self.goals,
            Module::Beliefs => &self.beliefs,
            Module::Trauma => &self.trauma,
            Module::Relationships => &self.relationships,
        }
    }

    pub fn module_mut(&mut self, module: Module) -> &mut DataMap {
        match module {
            Module::Emotions => &mut self.emotions,
            Module::Resources => &mut self.resources,
            Module::Goals => &mut self.goals,
            Module::Beliefs => &mut self.beliefs,
            Module::Trauma => &mut self.trauma,
            Module::Relationships => &mut self.relationships,
        }
    }

    /// Number of stored keys across all six modules
    pub fn data_points(&self) -> usize {
        Module::ALL.iter().map(|m| self.module(*m).len()).sum()
    }
}

/// Narrative tracking: ordered events, open mysteries, per-character secrets
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Narrative {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub mysteries: Vec<Mystery>,
    /// Character name to that character's secrets
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub secrets: DataMap,
}

impl Narrative {
    /// Secrets grouped by character, in insertion order
    pub fn secrets_by_character(&self) -> impl Iterator<Item = (&str, SecretList)> {
        self.secrets
            .iter()
            .map(|(name, value)| (name.as_str(), SecretList::from(value)))
    }
}

/// One timeline event: a structured record or a bare label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimelineEntry {
    Event {
        #[serde(
            default,
            deserialize_with = "lenient::text",
            skip_serializing_if = "Option::is_none"
        )]
        timestamp: Option<String>,
        #[serde(
            default,
            deserialize_with = "lenient::text",
            skip_serializing_if = "Option::is_none"
        )]
        description: Option<String>,
    },
    Label(String),
    Other(Value),
}

impl TimelineEntry {
    pub fn event(timestamp: impl Into<String>, description: impl Into<String>) -> Self {
        TimelineEntry::Event {
            timestamp: Some(timestamp.into()),
            description: Some(description.into()),
        }
    }
}

/// One open mystery: a structured record or a bare title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Mystery {
    Record {
        #[serde(
            default,
            deserialize_with = "lenient::text",
            skip_serializing_if = "Option::is_none"
        )]
        title: Option<String>,
        #[serde(
            default,
            deserialize_with = "lenient::text_list",
            skip_serializing_if = "Option::is_none"
        )]
        clues: Option<Vec<String>>,
    },
    Label(String),
    Other(Value),
}

/// Decoded secrets for one character
#[derive(Debug, Clone, PartialEq)]
pub enum SecretList {
    Items(Vec<String>),
    /// Stored value was not a sequence; shown as one entry
    Single(String),
    Empty,
}

impl From<&Value> for SecretList {
    fn from(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                SecretList::Items(items.iter().filter_map(lenient::value_text).collect())
            }
            Value::Null => SecretList::Empty,
            other => lenient::value_text(other)
                .map(SecretList::Single)
                .unwrap_or(SecretList::Empty),
        }
    }
}

impl SecretList {
    pub fn items(&self) -> Vec<&str> {
        match self {
            SecretList::Items(items) => items.iter().map(String::as_str).collect(),
            SecretList::Single(item) => vec![item.as_str()],
            SecretList::Empty => Vec::new(),
        }
    }
}
