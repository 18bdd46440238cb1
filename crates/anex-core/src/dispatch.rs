//! Command dispatcher
//!
//! Routes a parsed [`Command`] to its handler. Handlers return
//! `Result<String, AnexError>`; `dispatch` renders errors into text, so
//! the host always receives a string and never a fault.
//!
//! ## Logging
//!
//! Each dispatch is bracketed by `log_op_start!` and either `log_op_end!`
//! or `log_op_error!`, tagged with the verb and a fresh request id.

use std::time::Instant;

use chrono::{SecondsFormat, Utc};

use anex_core_types::RequestId;

use crate::commands::Command;
use crate::errors::{AnexError, Result};
use crate::host::HostContext;
use crate::model::{Module, Settings, StyleProfile, TrackingState};
use crate::render::messages::{self, SelfCheck};
use crate::render;
use crate::storage::{commit_settings, commit_store, get_store, resolve_scope};
use crate::{log_op_end, log_op_error, log_op_start};

/// Run one command against `host`, returning the text to show the user
pub fn dispatch(host: &mut dyn HostContext, settings: &mut Settings, command: &Command) -> String {
    let request_id = RequestId::new();
    let start = Instant::now();
    log_op_start!(
        "dispatch",
        verb = command.verb(),
        request_id = %request_id
    );

    match execute(host, settings, command) {
        Ok(text) => {
            log_op_end!(
                "dispatch",
                duration_ms = start.elapsed().as_millis() as u64,
                verb = command.verb(),
                request_id = %request_id
            );
            text
        }
        Err(err) => {
            let text = messages::render_error(&err);
            log_op_error!(
                "dispatch",
                err,
                duration_ms = start.elapsed().as_millis() as u64,
                verb = command.verb(),
                request_id = %request_id
            );
            text
        }
    }
}

/// Route without rendering errors
///
/// # Errors
///
/// Returns the domain error the handler produced; see `AnexError`.
pub fn execute(
    host: &mut dyn HostContext,
    settings: &mut Settings,
    command: &Command,
) -> Result<String> {
    match command {
        Command::Test => handle_test(host, settings),
        Command::Init { style } => handle_init(host, settings, style.as_deref()),
        Command::Update { module } => handle_update(module.as_deref()),
        Command::Debug { target } => handle_debug(host, settings, target.as_deref()),
        Command::Summon { kind } => handle_summon(host, settings, kind.as_deref()),
        Command::Reset => handle_reset(host, settings),
        Command::Help => Ok(messages::help_text()),
        Command::Unknown { verb } => Err(AnexError::UnknownVerb { verb: verb.clone() }),
    }
}

fn handle_test(host: &mut dyn HostContext, settings: &Settings) -> Result<String> {
    let scope = resolve_scope(host, settings.storage_mode);
    Ok(messages::test_report(&SelfCheck {
        current_style: settings.current_style,
        storage_mode: settings.storage_mode,
        scope,
        character_active: host.character_id().is_some(),
    }))
}

fn handle_init(
    host: &mut dyn HostContext,
    settings: &mut Settings,
    style: Option<&str>,
) -> Result<String> {
    let style = style.ok_or_else(|| AnexError::MissingArgument {
        verb: "init".to_string(),
    })?;
    let profile = StyleProfile::from_id(style).ok_or_else(|| AnexError::UnknownStyle {
        style: style.to_string(),
    })?;

    settings.current_style = profile;
    commit_settings(host, settings)?;

    let state = TrackingState::new(
        profile,
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    );
    get_store(host, settings.storage_mode).put_tracking(&state)?;
    commit_store(host, settings.storage_mode);

    Ok(messages::initialized(profile))
}

fn handle_update(module: Option<&str>) -> Result<String> {
    let name = module.ok_or_else(|| AnexError::MissingArgument {
        verb: "update".to_string(),
    })?;
    let module = Module::from_name(name).ok_or_else(|| AnexError::UnknownModule {
        module: name.to_string(),
    })?;
    Ok(messages::update_stub(module))
}

fn handle_debug(
    host: &mut dyn HostContext,
    settings: &Settings,
    target: Option<&str>,
) -> Result<String> {
    let state = get_store(host, settings.storage_mode)
        .tracking()
        .ok_or(AnexError::NotInitialized)?;

    match target {
        None | Some("all") | Some("state") => Ok(render::render_full_state(&state)),
        Some(name) => {
            let module = Module::from_name(name).ok_or_else(|| AnexError::UnknownModule {
                module: name.to_string(),
            })?;
            Ok(render::render_module(module, &state))
        }
    }
}

fn handle_summon(
    host: &mut dyn HostContext,
    settings: &Settings,
    kind: Option<&str>,
) -> Result<String> {
    let state = get_store(host, settings.storage_mode)
        .tracking()
        .ok_or(AnexError::NoNarrative)?;
    let narrative = state.narrative.as_ref().ok_or(AnexError::NoNarrative)?;

    match kind {
        Some("timeline") => Ok(render::render_timeline(&narrative.timeline)),
        Some("mysteries") => Ok(render::render_mysteries(&narrative.mysteries)),
        Some("secrets") => Ok(render::render_secrets(narrative)),
        Some("summary") => Ok(render::render_summary(&state)),
        Some(other) => Err(AnexError::UnknownSummonType {
            kind: other.to_string(),
        }),
        None => Err(AnexError::MissingArgument {
            verb: "summon".to_string(),
        }),
    }
}

fn handle_reset(host: &mut dyn HostContext, settings: &Settings) -> Result<String> {
    get_store(host, settings.storage_mode).remove_tracking();
    commit_store(host, settings.storage_mode);
    Ok(messages::reset_done())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryHost;
    use crate::model::{StorageMode, TRACKING_KEY};
    use serde_json::json;

    fn run(host: &mut InMemoryHost, settings: &mut Settings, verb: &str, arg: Option<&str>) -> String {
        dispatch(host, settings, &Command::parse(verb, arg))
    }

    #[test]
    fn test_init_creates_empty_state_and_persists_style() {
        let mut host = InMemoryHost::new();
        let mut settings = Settings::default();

        let text = run(&mut host, &mut settings, "init", Some("tarryn-fisher"));
        assert!(text.contains("Initialized with Tarryn Fisher style profile!"));
        assert_eq!(settings.current_style, StyleProfile::TarrynFisher);
        assert_eq!(
            host.settings["anex_debug"]["currentStyle"],
            json!("tarryn-fisher")
        );

        let stored = &host.chat.as_ref().unwrap()[TRACKING_KEY];
        assert_eq!(stored["style"], json!("tarryn-fisher"));
        assert_eq!(stored["emotions"], json!({}));
        assert_eq!(host.metadata_saves, 1);
    }

    #[test]
    fn test_init_overwrites_existing_state() {
        let mut host = InMemoryHost::new();
        let mut settings = Settings::default();
        run(&mut host, &mut settings, "init", Some("rina-kent"));
        host.chat.as_mut().unwrap()[TRACKING_KEY]["emotions"] = json!({ "anger": 0.4 });

        run(&mut host, &mut settings, "init", Some("penelope-douglas"));
        let stored = &host.chat.as_ref().unwrap()[TRACKING_KEY];
        assert_eq!(stored["emotions"], json!({}));
        assert_eq!(stored["style"], json!("penelope-douglas"));
    }

    #[test]
    fn test_debug_before_init() {
        let mut host = InMemoryHost::new();
        let mut settings = Settings::default();
        for arg in [None, Some("all"), Some("state"), Some("emotions"), Some("nonsense")] {
            let text = run(&mut host, &mut settings, "debug", arg);
            assert!(text.contains("No data stored yet"), "arg {:?}", arg);
        }
    }

    #[test]
    fn test_summon_unknown_type_shows_usage() {
        let mut host = InMemoryHost::new();
        let mut settings = Settings::default();
        run(&mut host, &mut settings, "init", Some("rina-kent"));

        let text = run(&mut host, &mut settings, "summon", Some("prophecy"));
        assert!(text.contains("Summon types: timeline, mysteries, secrets, summary"));
        let text = run(&mut host, &mut settings, "summon", None);
        assert!(text.contains("Usage: /anex summon <type>"));
    }

    #[test]
    fn test_global_mode_writes_process_store() {
        let mut host = InMemoryHost::new();
        let mut settings = Settings {
            storage_mode: StorageMode::Global,
            ..Settings::default()
        };

        run(&mut host, &mut settings, "init", Some("rina-kent"));
        assert!(host.settings.contains_key(TRACKING_KEY));
        assert!(host.chat.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_execute_surfaces_typed_errors() {
        let mut host = InMemoryHost::new();
        let mut settings = Settings::default();

        let err = execute(&mut host, &mut settings, &Command::parse("update", Some("mood")))
            .unwrap_err();
        assert_eq!(
            err,
            AnexError::UnknownModule {
                module: "mood".to_string()
            }
        );
    }
}
