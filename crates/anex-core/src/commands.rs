//! Command inventory
//!
//! A raw `(verb, arg)` pair from the host is parsed into a `Command` before
//! dispatch. Verbs are case-folded; arguments are kept verbatim and
//! validated by the handler that owns them.

/// One parsed `/anex` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Self-check report
    Test,

    /// Start tracking under a style profile
    Init { style: Option<String> },

    /// Request a module refresh (not yet wired to generation)
    Update { module: Option<String> },

    /// Show tracked module data; `all`, `state` or nothing means every module
    Debug { target: Option<String> },

    /// Show narrative tracking
    Summon { kind: Option<String> },

    /// Delete the tracking state
    Reset,

    Help,

    /// Anything else, as typed
    Unknown { verb: String },
}

impl Command {
    /// Parse a verb and its optional argument
    ///
    /// An empty or whitespace-only argument counts as absent.
    pub fn parse(verb: &str, arg: Option<&str>) -> Command {
        let arg = arg
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        match verb.trim().to_lowercase().as_str() {
            "test" => Command::Test,
            "init" => Command::Init { style: arg },
            "update" => Command::Update { module: arg },
            "debug" => Command::Debug { target: arg },
            "summon" => Command::Summon { kind: arg },
            "reset" => Command::Reset,
            "help" => Command::Help,
            _ => Command::Unknown {
                verb: verb.trim().to_string(),
            },
        }
    }

    /// Canonical verb, used as a log field
    pub fn verb(&self) -> &str {
        match self {
            Command::Test => "test",
            Command::Init { .. } => "init",
            Command::Update { .. } => "update",
            Command::Debug { .. } => "debug",
            Command::Summon { .. } => "summon",
            Command::Reset => "reset",
            Command::Help => "help",
            Command::Unknown { verb } => verb,
        }
    }
}
