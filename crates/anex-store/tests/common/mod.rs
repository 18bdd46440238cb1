use anex_core::AnexContext;
use anex_store::SqliteHost;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding one database file
#[allow(dead_code)]
pub fn scratch_db() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("anex.db");
    (dir, path)
}

/// Open a context over the database at `path`
#[allow(dead_code)]
pub fn open_context(path: &Path, session: Option<&str>) -> AnexContext<SqliteHost> {
    let host = SqliteHost::open(path, session.map(str::to_string)).expect("open host");
    AnexContext::init(host)
}
