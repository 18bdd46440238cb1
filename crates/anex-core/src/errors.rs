use thiserror::Error;

/// Result type alias using AnexError
pub type Result<T> = std::result::Result<T, AnexError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in log events and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    MissingArgument,
    NotFound,

    // State
    NotInitialized,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    HostUnavailable,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingArgument => "ERR_MISSING_ARGUMENT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NotInitialized => "ERR_NOT_INITIALIZED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::HostUnavailable => "ERR_HOST_UNAVAILABLE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, offending entity) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (verb, style id, module name, session id)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Failures reported by the host collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// No session-scoped metadata map is available (no active chat)
    #[error("session metadata unavailable: {reason}")]
    SessionUnavailable { reason: String },

    /// The host exposes no session-save function
    #[error("session save unavailable: {reason}")]
    SaveUnavailable { reason: String },

    /// The host accepted the save but persisting it failed
    #[error("persistence failed: {message}")]
    Persistence { message: String },
}

/// Domain error taxonomy for ANEX commands
///
/// None of these ever reach the host as a fault: the dispatcher renders each
/// one into the text the user sees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnexError {
    /// First token did not name a known subcommand
    #[error("Unknown subcommand: {verb}")]
    UnknownVerb { verb: String },

    /// Style identifier outside the closed profile set
    #[error("Unknown style: {style}")]
    UnknownStyle { style: String },

    /// Module name outside the closed module set
    #[error("Unknown module: {module}")]
    UnknownModule { module: String },

    /// Summon type outside timeline/mysteries/secrets/summary
    #[error("Unknown summon type: {kind}")]
    UnknownSummonType { kind: String },

    /// A required argument was omitted
    #[error("Missing argument for {verb}")]
    MissingArgument { verb: String },

    /// No tracking state has been created yet
    #[error("Tracking state not initialized")]
    NotInitialized,

    /// Tracking state exists but has no narrative record
    #[error("No narrative data stored")]
    NoNarrative,

    /// The extension failed to start and is inert
    #[error("Extension unavailable: {reason}")]
    ExtensionInert { reason: String },

    /// Host collaborator failure
    #[error("Host unavailable: {0}")]
    Host(#[from] HostError),

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<serde_json::Error> for AnexError {
    fn from(err: serde_json::Error) -> Self {
        AnexError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from AnexError to ExError
impl From<AnexError> for ExError {
    fn from(err: AnexError) -> Self {
        match err {
            AnexError::UnknownVerb { verb } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("dispatch")
                .with_entity_id(verb)
                .with_message("Unknown subcommand"),

            AnexError::UnknownStyle { style } => ExError::new(ExErrorKind::NotFound)
                .with_op("init")
                .with_entity_id(style)
                .with_message("Unknown style profile"),

            AnexError::UnknownModule { module } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(module)
                .with_message("Unknown module"),

            AnexError::UnknownSummonType { kind } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("summon")
                .with_entity_id(kind)
                .with_message("Unknown summon type"),

            AnexError::MissingArgument { verb } => ExError::new(ExErrorKind::MissingArgument)
                .with_op(verb)
                .with_message("Missing argument"),

            AnexError::NotInitialized => ExError::new(ExErrorKind::NotInitialized)
                .with_message("Tracking state not initialized"),

            AnexError::NoNarrative => ExError::new(ExErrorKind::NotInitialized)
                .with_op("summon")
                .with_message("No narrative data stored"),

            AnexError::ExtensionInert { reason } => {
                ExError::new(ExErrorKind::NotInitialized).with_message(reason)
            }

            AnexError::Host(host_err) => {
                let kind = match host_err {
                    HostError::Persistence { .. } => ExErrorKind::Persistence,
                    _ => ExErrorKind::HostUnavailable,
                };
                ExError::new(kind).with_message(host_err.to_string())
            }

            AnexError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            AnexError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<HostError> for ExError {
    fn from(err: HostError) -> Self {
        AnexError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_verb_maps_to_invalid_input() {
        let ex: ExError = AnexError::UnknownVerb {
            verb: "dance".to_string(),
        }
        .into();

        assert_eq!(ex.kind(), ExErrorKind::InvalidInput);
        assert_eq!(ex.code(), "ERR_INVALID_INPUT");
        assert_eq!(ex.entity_id(), Some("dance"));
        assert_eq!(ex.op(), Some("dispatch"));
    }

    #[test]
    fn test_host_persistence_distinct_from_unavailable() {
        let saved: ExError = HostError::Persistence {
            message: "disk full".to_string(),
        }
        .into();
        let missing: ExError = HostError::SessionUnavailable {
            reason: "no chat".to_string(),
        }
        .into();

        assert_eq!(saved.kind(), ExErrorKind::Persistence);
        assert_eq!(missing.kind(), ExErrorKind::HostUnavailable);
    }

    #[test]
    fn test_display_includes_code_op_and_entity() {
        let ex = ExError::new(ExErrorKind::NotFound)
            .with_op("init")
            .with_entity_id("jane-austen")
            .with_message("Unknown style profile");

        let text = ex.to_string();
        assert!(text.starts_with("[ERR_NOT_FOUND]"));
        assert!(text.contains("'init'"));
        assert!(text.contains("jane-austen"));
    }

    #[test]
    fn test_source_chain_exposed() {
        use std::error::Error;

        let inner = ExError::new(ExErrorKind::Io).with_message("read failed");
        let outer = ExError::new(ExErrorKind::Persistence).with_source(inner);

        assert!(outer.source().is_some());
        assert_eq!(
            outer.source_error().map(|e| e.kind()),
            Some(ExErrorKind::Io)
        );
    }

    #[test]
    fn test_serde_json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let anex: AnexError = err.into();
        assert!(matches!(anex, AnexError::Serialization { .. }));
    }
}
