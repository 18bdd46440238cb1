//! Host collaborator seam
//!
//! The host application owns persistence and the notion of a "current chat".
//! ANEX only sees it through `HostContext`: a process-wide settings map that
//! is always present, an optional session-scoped metadata map, and the two
//! save functions that go with them.

use crate::errors::HostError;
use crate::model::DataMap;

/// Collaborator interface consumed by the storage facade
pub trait HostContext {
    /// Process-wide extension settings. Always available.
    fn extension_settings(&mut self) -> &mut DataMap;

    /// Session-scoped metadata for the active chat
    ///
    /// # Errors
    ///
    /// `SessionUnavailable` when no chat is active or the host cannot
    /// provide its metadata.
    fn chat_metadata(&mut self) -> Result<&mut DataMap, HostError>;

    /// Request a save of the extension settings
    ///
    /// Hosts may coalesce repeated requests into one write.
    ///
    /// # Errors
    ///
    /// `Persistence` if the host rejected the request outright.
    fn save_settings_debounced(&mut self) -> Result<(), HostError>;

    /// Save the active chat's metadata
    ///
    /// # Errors
    ///
    /// `SaveUnavailable` when the host has no session-save function,
    /// `Persistence` when the write failed.
    fn save_metadata(&mut self) -> Result<(), HostError>;

    /// Identifier of the active character, if any
    fn character_id(&self) -> Option<String>;
}

/// In-memory host for tests and embedding
///
/// Each collaborator capability can be switched off to exercise the
/// facade's fallback paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    pub settings: DataMap,
    /// `None` simulates "no active chat"
    pub chat: Option<DataMap>,
    pub character: Option<String>,
    /// When false, `save_metadata` reports `SaveUnavailable`
    pub session_save_available: bool,
    /// When true, every save reports `Persistence`
    pub fail_saves: bool,
    pub settings_saves: usize,
    pub metadata_saves: usize,
}

impl InMemoryHost {
    /// Host with an active chat and both save functions available
    pub fn new() -> Self {
        Self {
            chat: Some(DataMap::new()),
            session_save_available: true,
            ..Self::default()
        }
    }

    /// Host with no active chat and no session-save function
    pub fn without_session() -> Self {
        Self::default()
    }

    pub fn with_character(mut self, id: impl Into<String>) -> Self {
        self.character = Some(id.into());
        self
    }
}

impl HostContext for InMemoryHost {
    fn extension_settings(&mut self) -> &mut DataMap {
        &mut self.settings
    }

    fn chat_metadata(&mut self) -> Result<&mut DataMap, HostError> {
        self.chat.as_mut().ok_or_else(|| HostError::SessionUnavailable {
            reason: "no active chat".to_string(),
        })
    }

    fn save_settings_debounced(&mut self) -> Result<(), HostError> {
        if self.fail_saves {
            return Err(HostError::Persistence {
                message: "simulated settings save failure".to_string(),
            });
        }
        self.settings_saves += 1;
        Ok(())
    }

    fn save_metadata(&mut self) -> Result<(), HostError> {
        if !self.session_save_available || self.chat.is_none() {
            return Err(HostError::SaveUnavailable {
                reason: "host exposes no session save".to_string(),
            });
        }
        if self.fail_saves {
            return Err(HostError::Persistence {
                message: "simulated metadata save failure".to_string(),
            });
        }
        self.metadata_saves += 1;
        Ok(())
    }

    fn character_id(&self) -> Option<String> {
        self.character.clone()
    }
}
