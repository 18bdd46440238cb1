//! ANEX CLI
//!
//! Runs one `/anex` command against a SQLite-backed host and prints the
//! report to stdout.

use clap::Parser;

mod run;

#[derive(Debug, Parser)]
#[command(name = "anex")]
#[command(about = "ANEX - psychological and narrative state inspector", long_about = None)]
pub struct Cli {
    /// Host database path
    #[arg(long, env = "ANEX_DB", default_value = ".anex/anex.db")]
    pub db: std::path::PathBuf,

    /// Active chat session; without one, chat mode falls back to global storage
    #[arg(long, env = "ANEX_SESSION")]
    pub session: Option<String>,

    /// Active character id
    #[arg(long, env = "ANEX_CHARACTER")]
    pub character: Option<String>,

    /// Override and persist the storage mode (chat or global)
    #[arg(long, env = "ANEX_STORAGE_MODE")]
    pub storage_mode: Option<anex_core::StorageMode>,

    /// Emit JSON logs on stderr
    #[arg(long)]
    pub log_json: bool,

    /// Subcommand: test, init, update, debug, summon, reset, help
    pub verb: String,

    /// Argument for the subcommand
    pub arg: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
