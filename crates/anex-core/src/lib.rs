//! ANEX Core - psychological and narrative state inspector
//!
//! Tracks emotions, resources, goals, beliefs, trauma, relationships and
//! narrative elements for a conversational session, and answers the
//! `/anex` command family with plain-text reports:
//! - Storage facade over a host-supplied key-value store (session or global)
//! - Command parsing and dispatch with rendered, never-raised errors
//! - Pure report formatters
//! - Extension lifecycle with settings defaulting
//!
//! The host is abstracted behind [`HostContext`]; [`InMemoryHost`] serves
//! tests and embedding.

pub mod commands;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod extension;
pub mod host;
pub mod logging_facility;
pub mod model;
pub mod render;
pub mod storage;

// Used by the logging macros
pub use anex_core_types;

// Re-export commonly used types
pub use commands::Command;
pub use errors::{AnexError, ExError, ExErrorKind, HostError, Result};
pub use events::HostEvent;
pub use extension::AnexContext;
pub use host::{HostContext, InMemoryHost};
pub use model::{DataMap, Module, Settings, StorageMode, StyleProfile, TrackingState};
pub use storage::{commit_store, get_store, StoreHandle, StoreScope};
