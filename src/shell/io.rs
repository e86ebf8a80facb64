//! Console access handed to command handlers.

use core::fmt::{self, Write};

use super::error::Error;
use super::log::{Level, Logger, NEW_LINE, TransportWriter};
use super::mode::Mode;
use crate::platform::Transport;

/// Width of the name column in help lines.
pub const HELP_COLUMN: usize = 16;

/// Output window of a running command.
///
/// Everything a handler prints goes through here: plain lines, help lines
/// aligned with the built-in ones, and leveled messages that follow the
/// shell's debug threshold and mode.
///
/// `Io` also implements [`fmt::Write`], so `write!` sends raw text.
pub struct Io<'a> {
    out: &'a mut dyn Transport,
    logger: &'a Logger,
    mode: Mode,
}

impl<'a> Io<'a> {
    /// Wraps a transport together with the logger state it should honour.
    pub fn new(out: &'a mut dyn Transport, logger: &'a Logger, mode: Mode) -> Self {
        Self { out, logger, mode }
    }

    /// Mode the shell is in while the command runs.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Sends raw text.
    pub fn print(&mut self, text: &str) {
        self.out.transmit_str(text);
    }

    /// Starts a new indented output line holding `text`.
    pub fn line(&mut self, text: &str) {
        self.line_fmt(format_args!("{}", text));
    }

    /// Starts a new indented output line holding formatted text.
    pub fn line_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.out.transmit_str(NEW_LINE);
        self.out.transmit_str("  ");
        let _ = TransportWriter(&mut *self.out).write_fmt(args);
    }

    /// Prints `name` and `description` in the help table layout.
    pub fn help_line(&mut self, name: &str, description: &str) {
        self.line_fmt(format_args!(
            "{:<width$} {}",
            name,
            description,
            width = HELP_COLUMN
        ));
    }

    /// Emits a leveled message.
    pub fn log(&mut self, level: Level, message: &str) {
        self.logger.emit(&mut *self.out, self.mode, level, message);
    }

    /// Emits a leveled, formatted message.
    pub fn log_fmt(&mut self, level: Level, args: fmt::Arguments<'_>) {
        self.logger.emit_fmt(&mut *self.out, self.mode, level, args);
    }

    /// Prints the console notice for `error`. Silent in Debug mode.
    pub fn notice(&mut self, error: Error) {
        self.log(Level::None, error.message());
    }
}

impl Write for Io<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        Ok(())
    }
}

impl fmt::Debug for Io<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Io")
            .field("logger", self.logger)
            .field("mode", &self.mode)
            .finish()
    }
}
