//! Single-invocation driver
//!
//! Opens the host, starts the extension, applies a storage-mode override,
//! dispatches the command and flushes pending settings.

use anex_core::logging_facility::{init, Profile};
use anex_core::AnexContext;
use anex_store::SqliteHost;

use crate::Cli;

/// Execute one command
///
/// Command-level problems (unknown verbs, bad arguments, missing state) are
/// part of the printed report. Only host database failures are returned.
pub fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let mut host = SqliteHost::open(&cli.db, cli.session)?;
    if let Some(character) = cli.character {
        host = host.with_character(character);
    }

    let mut ctx = AnexContext::init(host);
    if let Some(mode) = cli.storage_mode {
        if let Err(e) = ctx.set_storage_mode(mode) {
            eprintln!("Warning: storage mode not applied: {}", e);
        }
    }

    let report = ctx.dispatch(&cli.verb, cli.arg.as_deref());
    println!("{}", report);

    ctx.into_host().flush()?;
    Ok(())
}
