//! ANEX Store - SQLite-backed host collaborator
//!
//! Provides:
//! - SQLite schema with an embedded, checksummed migrations framework
//! - `SqliteHost`, a `HostContext` persisting extension settings and
//!   per-session chat metadata, with a debounced settings save

pub mod db;
pub mod errors;
pub mod host;
pub mod migrations;

// Re-export key types
pub use errors::Result;
pub use host::SqliteHost;
