//! Extension lifecycle
//!
//! `AnexContext` owns the host collaborator and the loaded settings. It is
//! created once per host by [`AnexContext::init`] and passed by `&mut` to
//! every command, so dispatches never overlap.
//!
//! If startup fails (the stored settings record is not an object) the context
//! is inert: every command answers with a "not initialized" message and no
//! storage is touched.

use std::time::Instant;

use crate::commands::Command;
use crate::errors::{AnexError, Result};
use crate::events::{self, HostEvent};
use crate::host::HostContext;
use crate::model::{Settings, StorageMode};
use crate::render::messages;
use crate::storage::commit_settings;
use crate::{dispatch, log_op_end, log_op_error, log_op_start};

#[derive(Debug, Clone)]
enum Lifecycle {
    Ready(Settings),
    Inert { reason: String },
}

/// Running extension bound to one host
pub struct AnexContext<H: HostContext> {
    host: H,
    lifecycle: Lifecycle,
}

impl<H: HostContext> AnexContext<H> {
    /// Start the extension on `host`
    ///
    /// Loads the settings record from the process-wide store, filling in any
    /// missing keys from the defaults. The completed record is left in the
    /// store but not saved.
    pub fn init(mut host: H) -> Self {
        let start = Instant::now();
        log_op_start!("init_extension");

        let lifecycle = match Settings::load_or_init(host.extension_settings()) {
            Ok(settings) => {
                log_op_end!(
                    "init_extension",
                    duration_ms = start.elapsed().as_millis() as u64,
                    current_style = settings.current_style.id(),
                    storage_mode = settings.storage_mode.as_str()
                );
                Lifecycle::Ready(settings)
            }
            Err(err) => {
                let reason = err.to_string();
                log_op_error!(
                    "init_extension",
                    err,
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Lifecycle::Inert { reason }
            }
        };

        Self { host, lifecycle }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Ready(_))
    }

    /// Loaded settings, or `None` when inert
    pub fn settings(&self) -> Option<&Settings> {
        match &self.lifecycle {
            Lifecycle::Ready(settings) => Some(settings),
            Lifecycle::Inert { .. } => None,
        }
    }

    /// Switch the storage mode and persist the settings
    ///
    /// # Errors
    ///
    /// `ExtensionInert` if startup failed; `Serialization` if the settings
    /// record cannot be encoded.
    pub fn set_storage_mode(&mut self, mode: StorageMode) -> Result<()> {
        match &mut self.lifecycle {
            Lifecycle::Ready(settings) => {
                if settings.storage_mode == mode {
                    return Ok(());
                }
                settings.storage_mode = mode;
                commit_settings(&mut self.host, settings)
            }
            Lifecycle::Inert { reason } => Err(AnexError::ExtensionInert {
                reason: reason.clone(),
            }),
        }
    }

    /// Run `/anex <verb> [arg]` and return the text for the user
    pub fn dispatch(&mut self, verb: &str, arg: Option<&str>) -> String {
        let command = Command::parse(verb, arg);
        match &mut self.lifecycle {
            Lifecycle::Ready(settings) => dispatch::dispatch(&mut self.host, settings, &command),
            Lifecycle::Inert { reason } => {
                let err = AnexError::ExtensionInert {
                    reason: reason.clone(),
                };
                let text = messages::render_error(&err);
                log_op_error!("dispatch", err, duration_ms = 0u64, verb = command.verb());
                text
            }
        }
    }

    /// Forward a host event; never fails
    pub fn handle_event(&mut self, event: &HostEvent) {
        if self.is_ready() {
            events::handle(event);
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryHost;
    use crate::model::SETTINGS_KEY;
    use serde_json::json;

    #[test]
    fn test_init_fills_missing_settings_without_saving() {
        let mut host = InMemoryHost::new();
        host.settings
            .insert(SETTINGS_KEY.to_string(), json!({ "storageMode": "global" }));

        let ctx = AnexContext::init(host);
        assert!(ctx.is_ready());
        assert_eq!(ctx.settings().unwrap().storage_mode, StorageMode::Global);
        assert_eq!(ctx.host().settings[SETTINGS_KEY]["debugLevel"], json!(2));
        assert_eq!(ctx.host().settings_saves, 0);
    }

    #[test]
    fn test_corrupt_settings_leave_extension_inert() {
        let mut host = InMemoryHost::new();
        host.settings
            .insert(SETTINGS_KEY.to_string(), json!("not a record"));

        let mut ctx = AnexContext::init(host);
        assert!(!ctx.is_ready());
        for verb in ["test", "init", "debug", "reset", "help", "dance"] {
            let text = ctx.dispatch(verb, Some("rina-kent"));
            assert!(text.contains("Extension not initialized"), "verb {}", verb);
        }
        assert!(ctx.host().chat.as_ref().unwrap().is_empty());
        assert!(ctx.set_storage_mode(StorageMode::Global).is_err());
    }

    #[test]
    fn test_unusable_setting_values_keep_extension_ready() {
        for record in [
            json!({ "debugLevel": 2.5 }),
            json!({ "debugLevel": 300 }),
            json!({ "currentStyle": "old-style" }),
            json!({ "enabled": "yes" }),
        ] {
            let mut host = InMemoryHost::new();
            host.settings.insert(SETTINGS_KEY.to_string(), record.clone());

            let mut ctx = AnexContext::init(host);
            assert!(ctx.is_ready(), "record {}", record);

            let text = ctx.dispatch("init", Some("tarryn-fisher"));
            assert!(text.contains("Tarryn Fisher"), "record {}", record);
            let text = ctx.dispatch("reset", None);
            assert!(!text.contains("not initialized"), "record {}", record);
        }
    }

    #[test]
    fn test_commit_replaces_unusable_setting_values() {
        let mut host = InMemoryHost::new();
        host.settings
            .insert(SETTINGS_KEY.to_string(), json!({ "debugLevel": 2.5 }));

        let mut ctx = AnexContext::init(host);
        assert_eq!(ctx.host().settings[SETTINGS_KEY]["debugLevel"], json!(2.5));

        ctx.dispatch("init", Some("rina-kent"));
        assert_eq!(ctx.host().settings[SETTINGS_KEY]["debugLevel"], json!(2));
    }

    #[test]
    fn test_set_storage_mode_persists() {
        let mut ctx = AnexContext::init(InMemoryHost::new());
        ctx.set_storage_mode(StorageMode::Global).unwrap();

        assert_eq!(
            ctx.host().settings[SETTINGS_KEY]["storageMode"],
            json!("global")
        );
        assert_eq!(ctx.host().settings_saves, 1);

        ctx.set_storage_mode(StorageMode::Global).unwrap();
        assert_eq!(ctx.host().settings_saves, 1);
    }

    #[test]
    fn test_events_never_mutate() {
        let mut ctx = AnexContext::init(InMemoryHost::new());
        let before = ctx.host().clone();

        ctx.handle_event(&HostEvent::MessageReceived { message_id: None });
        ctx.handle_event(&HostEvent::ChatChanged {
            chat_id: Some("c-2".to_string()),
        });

        assert_eq!(ctx.host().chat, before.chat);
        assert_eq!(ctx.host().settings, before.settings);
    }
}
