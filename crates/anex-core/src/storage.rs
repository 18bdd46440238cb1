//! Storage facade
//!
//! Resolves the logical "current data store" to one of the host's two
//! backends. In `chat` mode the session-scoped metadata map is preferred and
//! the process-wide settings map is the fallback; in `global` mode the
//! process-wide map is used directly.
//!
//! `get_store` and `commit_store` share `resolve_scope`, so data read through
//! the session scope is always committed through the session scope.

use serde_json::Value;
use tracing::warn;

use anex_core_types::schema::{EVENT_FALLBACK, EVENT_SAVE_FAILED};

use crate::errors::{HostError, Result};
use crate::host::HostContext;
use crate::model::{DataMap, Settings, StorageMode, TrackingState, TRACKING_KEY};

/// Which backend a handle reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    /// Session-scoped chat metadata
    Session,
    /// Process-wide extension settings
    Global,
}

impl StoreScope {
    /// Host-side name of the backing map
    pub fn backend_name(&self) -> &'static str {
        match self {
            StoreScope::Session => "chatMetadata",
            StoreScope::Global => "extensionSettings",
        }
    }
}

/// Pick the backend for `mode`, probing the session store in chat mode
///
/// Logs a warning and returns `Global` when the session store is missing.
pub fn resolve_scope(host: &mut dyn HostContext, mode: StorageMode) -> StoreScope {
    if mode == StorageMode::Global {
        return StoreScope::Global;
    }

    match host.chat_metadata() {
        Ok(_) => StoreScope::Session,
        Err(err) => {
            warn!(
                component = module_path!(),
                op = "get_store",
                event = EVENT_FALLBACK,
                storage_mode = %mode,
                reason = %err,
                "chat metadata unavailable, falling back to global storage"
            );
            StoreScope::Global
        }
    }
}

/// Obtain a handle to the current data store
///
/// Never fails and never mutates: the worst case is a handle on the
/// process-wide store.
pub fn get_store(host: &mut dyn HostContext, mode: StorageMode) -> StoreHandle<'_> {
    let scope = resolve_scope(host, mode);
    StoreHandle { host, scope }
}

/// Persist the current data store, best-effort
///
/// Uses the same selection as `get_store`. In chat mode a missing session
/// save function falls back to the debounced global save. Save failures are
/// logged and dropped; nothing is retried.
///
/// Returns the scope whose save was requested.
pub fn commit_store(host: &mut dyn HostContext, mode: StorageMode) -> StoreScope {
    if resolve_scope(host, mode) == StoreScope::Session {
        match host.save_metadata() {
            Ok(()) => return StoreScope::Session,
            Err(HostError::Persistence { message }) => {
                warn!(
                    component = module_path!(),
                    op = "commit_store",
                    event = EVENT_SAVE_FAILED,
                    scope = StoreScope::Session.backend_name(),
                    reason = %message,
                    "chat metadata save failed"
                );
                return StoreScope::Session;
            }
            Err(err) => {
                warn!(
                    component = module_path!(),
                    op = "commit_store",
                    event = EVENT_FALLBACK,
                    storage_mode = %mode,
                    reason = %err,
                    "chat metadata save unavailable, falling back to global storage"
                );
            }
        }
    }

    if let Err(err) = host.save_settings_debounced() {
        warn!(
            component = module_path!(),
            op = "commit_store",
            event = EVENT_SAVE_FAILED,
            scope = StoreScope::Global.backend_name(),
            reason = %err,
            "extension settings save failed"
        );
    }
    StoreScope::Global
}

/// Write `settings` into the process-wide store and request a save
///
/// # Errors
///
/// Returns `Serialization` if the record cannot be encoded. A rejected save
/// request is logged, not returned.
pub fn commit_settings(host: &mut dyn HostContext, settings: &Settings) -> Result<()> {
    settings.store(host.extension_settings())?;
    if let Err(err) = host.save_settings_debounced() {
        warn!(
            component = module_path!(),
            op = "commit_settings",
            event = EVENT_SAVE_FAILED,
            scope = StoreScope::Global.backend_name(),
            reason = %err,
            "extension settings save failed"
        );
    }
    Ok(())
}

/// Handle on the resolved backend
pub struct StoreHandle<'a> {
    host: &'a mut dyn HostContext,
    scope: StoreScope,
}

impl StoreHandle<'_> {
    pub fn scope(&self) -> StoreScope {
        self.scope
    }

    fn with_map<R>(&mut self, f: impl FnOnce(&mut DataMap) -> R) -> R {
        if self.scope == StoreScope::Session {
            match self.host.chat_metadata() {
                Ok(map) => return f(map),
                // The chat went away between resolution and access.
                Err(err) => {
                    warn!(
                        component = module_path!(),
                        op = "get_store",
                        event = EVENT_FALLBACK,
                        reason = %err,
                        "chat metadata vanished, using global storage"
                    );
                    self.scope = StoreScope::Global;
                }
            }
        }
        f(self.host.extension_settings())
    }

    pub fn get(&mut self, key: &str) -> Option<Value> {
        self.with_map(|map| map.get(key).cloned())
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.with_map(|map| {
            map.insert(key.to_string(), value);
        });
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.with_map(|map| map.remove(key))
    }

    /// Decoded tracking state, or `None` before `init`
    pub fn tracking(&mut self) -> Option<TrackingState> {
        self.get(TRACKING_KEY)
            .and_then(|value| TrackingState::from_stored(&value))
    }

    /// Replace the tracking state wholesale
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the state cannot be encoded.
    pub fn put_tracking(&mut self, state: &TrackingState) -> Result<()> {
        let value = serde_json::to_value(state)?;
        self.insert(TRACKING_KEY, value);
        Ok(())
    }

    /// Delete the tracking state; returns whether one was present
    pub fn remove_tracking(&mut self) -> bool {
        self.remove(TRACKING_KEY).is_some()
    }
}
