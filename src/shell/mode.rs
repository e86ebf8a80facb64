//! Operating mode of the shell.

use serde::{Deserialize, Serialize};

/// How the shell treats input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Interactive console: prompts, notices and untagged messages are shown.
    #[default]
    Command,
    /// Free-running diagnostic stream: tagged log lines only, unmatched
    /// input is ignored silently.
    Debug,
}

impl Mode {
    /// Lowercase mode name.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Command => "command",
            Mode::Debug => "debug",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Mode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Mode::Command => defmt::write!(f, "Command"),
            Mode::Debug => defmt::write!(f, "Debug"),
        }
    }
}
