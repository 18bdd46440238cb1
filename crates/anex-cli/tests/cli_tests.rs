//! CLI integration tests
//!
//! Each test runs the built binary against a scratch database.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn anex(db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_anex"))
        .arg("--db")
        .arg(db)
        .args(args)
        .env_remove("ANEX_SESSION")
        .env_remove("ANEX_CHARACTER")
        .env_remove("ANEX_STORAGE_MODE")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_prints_usage() {
    let dir = TempDir::new().unwrap();
    let output = anex(&dir.path().join("anex.db"), &["help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("🔍 ANEX: ANEX Debug & Command System"));
    assert!(text.contains("/anex summon <type>"));
}

#[test]
fn test_unknown_verb_still_succeeds() {
    let dir = TempDir::new().unwrap();
    let output = anex(&dir.path().join("anex.db"), &["dance"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Unknown subcommand: dance. Use /anex help for usage."));
}

#[test]
fn test_init_then_debug_in_session() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("anex.db");

    let init = anex(&db, &["--session", "chat-1", "init", "rina-kent"]);
    assert!(init.status.success());
    assert!(stdout(&init).contains("Initialized with Rina Kent style profile!"));

    let debug = anex(&db, &["--session", "chat-1", "debug", "emotions"]);
    assert!(stdout(&debug).contains("EMOTIONS Module"));
    assert!(stdout(&debug).contains("(No data stored for this module)"));

    let other = anex(&db, &["--session", "chat-2", "debug"]);
    assert!(stdout(&other).contains("No data stored yet"));
}

#[test]
fn test_self_check_reflects_flags() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("anex.db");

    let output = anex(
        &db,
        &["--session", "chat-1", "--character", "ch-1", "TEST"],
    );
    let text = stdout(&output);
    assert!(text.contains("   Storage type: chatMetadata"));
    assert!(text.contains("   Character active: YES"));

    let output = anex(&db, &["test"]);
    let text = stdout(&output);
    assert!(text.contains("   Storage type: extensionSettings"));
    assert!(text.contains("   Character active: NO"));
}

#[test]
fn test_storage_mode_override_persists() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("anex.db");

    anex(&db, &["--session", "chat-1", "--storage-mode", "global", "init", "tarryn-fisher"]);

    // Mode was persisted, and global state is visible from another session
    let output = anex(&db, &["--session", "chat-2", "test"]);
    assert!(stdout(&output).contains("✅ Storage mode: global"));
    let output = anex(&db, &["--session", "chat-2", "summon", "summary"]);
    assert!(stdout(&output).contains("📊 Style: Tarryn Fisher"));

    let conn = rusqlite::Connection::open(&db).unwrap();
    let stored: String = conn
        .query_row(
            "SELECT value_json FROM extension_settings WHERE key = 'anex_debug'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(stored.contains("\"storageMode\":\"global\""));
}

#[test]
fn test_invalid_storage_mode_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    let output = anex(&dir.path().join("anex.db"), &["--storage-mode", "cloud", "help"]);

    assert!(!output.status.success());
}

#[test]
fn test_unopenable_database_is_an_error() {
    let dir = TempDir::new().unwrap();
    // A directory where the database file should be
    let db = dir.path().join("taken");
    std::fs::create_dir_all(&db).unwrap();

    let output = anex(&db, &["help"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}
