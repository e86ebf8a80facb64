//! Leveled debug messages on the console.
//!
//! A message passes when its level is not above the configured threshold.
//! What it looks like then depends on the [`Mode`]:
//!
//! | level     | Command mode        | Debug mode           |
//! |-----------|---------------------|----------------------|
//! | `None`    | `"\r\n  " + text`   | suppressed           |
//! | leveled   | suppressed          | `"\r\n[TAG] " + text`|
//!
//! The prefix reuses only the line break that opens the prompt, `"\r\n"`,
//! not the whole prompt: no `%> ` is printed in front of a message.
//!
//! Command mode keeps the console clean for the operator; Debug mode is a
//! stream of tagged diagnostics.
//!
//! # Examples
//!
//! ```rust
//! use libcdli::shell::log::{Level, Logger};
//! use libcdli::shell::Mode;
//!
//! let logger = Logger::new(Level::Info);
//! let mut out: Vec<u8> = Vec::new();
//! let mut sink = |bytes: &[u8]| out.extend_from_slice(bytes);
//!
//! logger.emit(&mut sink, Mode::Debug, Level::Warning, "battery low");
//! logger.emit(&mut sink, Mode::Debug, Level::Debug, "adc=1023");
//! drop(sink);
//!
//! assert_eq!(out, b"\r\n[WRN] battery low");
//! ```

use core::fmt::{self, Write};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::Error;
use super::mode::Mode;
use crate::platform::Transport;

/// Line break that starts every prompt and every message.
pub const NEW_LINE: &str = "\r\n";

/// Indent used for untagged messages in Command mode.
const COMMAND_INDENT: &str = "  ";

/// Message severity, most severe first.
///
/// [`Level::None`] is not a severity: it marks plain console output that is
/// always let through the threshold and carries no tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    /// Plain console output, no tag.
    None = 0,
    /// Something failed.
    Error = 1,
    /// Something looks wrong.
    Warning = 2,
    /// Normal operation.
    Info = 3,
    /// Everything, including chatty traces.
    #[default]
    Debug = 4,
}

impl Level {
    /// All levels in threshold order.
    pub const ALL: [Level; 5] = [
        Level::None,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
    ];

    /// Bracketed tag printed in Debug mode, empty for [`Level::None`].
    pub fn tag(&self) -> &'static str {
        match self {
            Level::None => "",
            Level::Error => "[ERR]",
            Level::Warning => "[WRN]",
            Level::Info => "[INF]",
            Level::Debug => "[DBG]",
        }
    }

    /// Lowercase level name, as accepted by the `debug` command.
    pub fn name(&self) -> &'static str {
        match self {
            Level::None => "none",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Level::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(Error::InvalidParameters)
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Parses a level name (`"info"`) or number (`"3"`).
    fn from_str(s: &str) -> Result<Self, Error> {
        if let Ok(value) = s.parse::<u8>() {
            return Level::try_from(value);
        }
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or(Error::InvalidParameters)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Level {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Level::None => defmt::write!(f, "None"),
            Level::Error => defmt::write!(f, "Error"),
            Level::Warning => defmt::write!(f, "Warning"),
            Level::Info => defmt::write!(f, "Info"),
            Level::Debug => defmt::write!(f, "Debug"),
        }
    }
}

/// Threshold-gated message formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Logger {
    threshold: Level,
}

impl Logger {
    /// Creates a logger passing messages up to `threshold`.
    pub const fn new(threshold: Level) -> Self {
        Self { threshold }
    }

    /// Current threshold.
    pub fn threshold(&self) -> Level {
        self.threshold
    }

    /// Changes the threshold.
    pub fn set_threshold(&mut self, threshold: Level) {
        self.threshold = threshold;
    }

    /// Returns the prefix a message at `level` gets in `mode`, or `None` if
    /// the message is suppressed.
    pub fn prefix(&self, mode: Mode, level: Level) -> Option<&'static str> {
        if level > self.threshold {
            return None;
        }
        match (mode, level) {
            (Mode::Command, Level::None) => Some(COMMAND_INDENT),
            (Mode::Debug, Level::None) | (Mode::Command, _) => None,
            (Mode::Debug, level) => Some(level.tag()),
        }
    }

    /// Emits `message` at `level`.
    pub fn emit(&self, out: &mut dyn Transport, mode: Mode, level: Level, message: &str) {
        self.emit_fmt(out, mode, level, format_args!("{}", message));
    }

    /// Emits a formatted message at `level`.
    pub fn emit_fmt(
        &self,
        out: &mut dyn Transport,
        mode: Mode,
        level: Level,
        args: fmt::Arguments<'_>,
    ) {
        let Some(prefix) = self.prefix(mode, level) else {
            return;
        };
        out.transmit_str(NEW_LINE);
        out.transmit_str(prefix);
        if level != Level::None {
            out.transmit_str(" ");
        }
        let _ = TransportWriter(out).write_fmt(args);
    }
}

/// [`fmt::Write`] adapter over a [`Transport`].
pub(crate) struct TransportWriter<'a>(pub(crate) &'a mut dyn Transport);

impl Write for TransportWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.transmit_str(s);
        Ok(())
    }
}
