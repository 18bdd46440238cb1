//! SQLite-backed host collaborator
//!
//! Both backends are loaded into memory when the host is opened. Chat
//! metadata is written through on `save_metadata`; extension settings are
//! only marked dirty by `save_settings_debounced` and written on `flush`
//! (or, best-effort, on drop), so any number of save requests in one run
//! costs one write.

use anex_core::errors::HostError;
use anex_core::{DataMap, HostContext};
use anex_core_types::schema::EVENT_SAVE_FAILED;
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

use crate::db;
use crate::errors::{corrupt_record, from_rusqlite, to_host_error, Result};
use crate::migrations::apply_migrations;

pub struct SqliteHost {
    conn: Connection,
    session_id: Option<String>,
    character_id: Option<String>,
    settings: DataMap,
    chat: Option<DataMap>,
    settings_dirty: bool,
}

impl SqliteHost {
    /// Open (creating if needed) the database at `path`
    ///
    /// With a `session_id`, that session's metadata becomes the active chat;
    /// without one there is no active chat.
    ///
    /// # Errors
    ///
    /// Fails if the database cannot be opened or migrated, or if a stored
    /// document is not valid JSON.
    pub fn open<P: AsRef<Path>>(path: P, session_id: Option<String>) -> Result<Self> {
        Self::from_connection(db::open(path)?, session_id)
    }

    /// Open a throwaway in-memory database
    ///
    /// # Errors
    ///
    /// Fails if migrations cannot be applied.
    pub fn open_in_memory(session_id: Option<String>) -> Result<Self> {
        Self::from_connection(db::open_in_memory()?, session_id)
    }

    fn from_connection(mut conn: Connection, session_id: Option<String>) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;

        let settings = load_settings(&conn)?;
        let chat = match &session_id {
            Some(id) => Some(load_chat(&conn, id)?.unwrap_or_default()),
            None => None,
        };

        debug!(
            component = module_path!(),
            op = "open_host",
            session_id = session_id.as_deref().unwrap_or(""),
            settings_keys = settings.len(),
            "sqlite host opened"
        );

        Ok(Self {
            conn,
            session_id,
            character_id: None,
            settings,
            chat,
            settings_dirty: false,
        })
    }

    pub fn with_character(mut self, id: impl Into<String>) -> Self {
        self.character_id = Some(id.into());
        self
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Whether a settings save has been requested but not yet written
    pub fn has_pending_settings(&self) -> bool {
        self.settings_dirty
    }

    /// Write pending extension settings
    ///
    /// The table is replaced wholesale so keys removed from the map are
    /// removed from disk.
    ///
    /// # Errors
    ///
    /// Fails if the transaction cannot be committed; the settings stay
    /// pending.
    pub fn flush(&mut self) -> Result<()> {
        if !self.settings_dirty {
            return Ok(());
        }

        let now = timestamp();
        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        tx.execute("DELETE FROM extension_settings", [])
            .map_err(from_rusqlite)?;
        for (key, value) in &self.settings {
            tx.execute(
                "INSERT INTO extension_settings (key, value_json, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value.to_string(), now],
            )
            .map_err(from_rusqlite)?;
        }
        tx.commit().map_err(from_rusqlite)?;

        self.settings_dirty = false;
        debug!(
            component = module_path!(),
            op = "flush_settings",
            keys = self.settings.len(),
            "extension settings written"
        );
        Ok(())
    }

    fn write_chat(&self) -> Result<()> {
        let (Some(id), Some(chat)) = (&self.session_id, &self.chat) else {
            return Ok(());
        };
        self.conn
            .execute(
                "INSERT INTO chat_metadata (session_id, metadata_json, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(session_id) DO UPDATE SET
                    metadata_json = excluded.metadata_json,
                    updated_at = excluded.updated_at",
                rusqlite::params![id, Value::Object(chat.clone()).to_string(), timestamp()],
            )
            .map_err(from_rusqlite)?;
        Ok(())
    }
}

impl HostContext for SqliteHost {
    fn extension_settings(&mut self) -> &mut DataMap {
        &mut self.settings
    }

    fn chat_metadata(&mut self) -> std::result::Result<&mut DataMap, HostError> {
        self.chat
            .as_mut()
            .ok_or_else(|| HostError::SessionUnavailable {
                reason: "no session selected".to_string(),
            })
    }

    fn save_settings_debounced(&mut self) -> std::result::Result<(), HostError> {
        self.settings_dirty = true;
        Ok(())
    }

    fn save_metadata(&mut self) -> std::result::Result<(), HostError> {
        if self.chat.is_none() {
            return Err(HostError::SaveUnavailable {
                reason: "no session selected".to_string(),
            });
        }
        self.write_chat().map_err(to_host_error)
    }

    fn character_id(&self) -> Option<String> {
        self.character_id.clone()
    }
}

impl Drop for SqliteHost {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            warn!(
                component = module_path!(),
                op = "flush_settings",
                event = EVENT_SAVE_FAILED,
                err_code = err.code(),
                reason = %err,
                "pending extension settings lost"
            );
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn load_settings(conn: &Connection) -> Result<DataMap> {
    let mut stmt = conn
        .prepare("SELECT key, value_json FROM extension_settings ORDER BY rowid")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    let mut settings = DataMap::new();
    for (key, json) in rows {
        let value = serde_json::from_str(&json)
            .map_err(|e| corrupt_record("extension_settings", &key, e))?;
        settings.insert(key, value);
    }
    Ok(settings)
}

fn load_chat(conn: &Connection, session_id: &str) -> Result<Option<DataMap>> {
    let json: Option<String> = conn
        .query_row(
            "SELECT metadata_json FROM chat_metadata WHERE session_id = ?1",
            [session_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    json.map(|json| {
        serde_json::from_str::<DataMap>(&json)
            .map_err(|e| corrupt_record("chat_metadata", session_id, e))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_without_session_has_no_chat() {
        let mut host = SqliteHost::open_in_memory(None).unwrap();
        assert!(matches!(
            host.chat_metadata(),
            Err(HostError::SessionUnavailable { .. })
        ));
        assert!(matches!(
            host.save_metadata(),
            Err(HostError::SaveUnavailable { .. })
        ));
    }

    #[test]
    fn test_settings_save_is_deferred() {
        let mut host = SqliteHost::open_in_memory(None).unwrap();
        host.extension_settings()
            .insert("probe".to_string(), json!(1));

        host.save_settings_debounced().unwrap();
        host.save_settings_debounced().unwrap();
        assert!(host.has_pending_settings());

        let rows: i64 = host
            .conn
            .query_row("SELECT COUNT(*) FROM extension_settings", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 0);

        host.flush().unwrap();
        assert!(!host.has_pending_settings());
        let stored: String = host
            .conn
            .query_row(
                "SELECT value_json FROM extension_settings WHERE key = 'probe'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(stored, "1");
    }

    #[test]
    fn test_metadata_written_through() {
        let mut host = SqliteHost::open_in_memory(Some("s-1".to_string())).unwrap();
        host.chat_metadata()
            .unwrap()
            .insert("anex".to_string(), json!({ "style": "rina-kent" }));
        host.save_metadata().unwrap();

        let stored = load_chat(&host.conn, "s-1").unwrap().unwrap();
        assert_eq!(stored["anex"]["style"], json!("rina-kent"));
    }
}
