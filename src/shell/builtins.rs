//! Commands every shell carries.
//!
//! | name      | action                                          |
//! |-----------|-------------------------------------------------|
//! | `help`    | list every command, or describe one (`help x`)  |
//! | `version` | print the firmware version                      |
//! | `status`  | print board information and shell state         |
//! | `debug`   | show or set the debug threshold                 |
//! | `save`    | persist the shell settings                      |
//! | `reboot`  | reset the device                                |

use super::error::Error;
use super::io::Io;
use super::log::Level;
use super::registry::{Args, Target};
use super::Shell;
use crate::platform::{Platform, Transport};

/// Identifies a built-in command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `help`
    Help,
    /// `version`
    Version,
    /// `status`
    Status,
    /// `debug`
    Debug,
    /// `save`
    Save,
    /// `reboot`
    Reboot,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Builtin {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.entry().name)
    }
}

/// Entry of the built-in command table.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinCommand {
    /// The command name.
    pub name: &'static str,
    /// A brief description shown by `help`.
    pub description: &'static str,
    /// Which built-in runs.
    pub builtin: Builtin,
}

/// Built-in command table, in [`Builtin`] declaration order.
pub static BUILTINS: [BuiltinCommand; 6] = [
    BuiltinCommand {
        name: "help",
        description: "Print this help",
        builtin: Builtin::Help,
    },
    BuiltinCommand {
        name: "version",
        description: "Print firmware version",
        builtin: Builtin::Version,
    },
    BuiltinCommand {
        name: "status",
        description: "Print board and shell status",
        builtin: Builtin::Status,
    },
    BuiltinCommand {
        name: "debug",
        description: "Show or set debug level [0-4|name]",
        builtin: Builtin::Debug,
    },
    BuiltinCommand {
        name: "save",
        description: "Save parameters",
        builtin: Builtin::Save,
    },
    BuiltinCommand {
        name: "reboot",
        description: "Reboot the device",
        builtin: Builtin::Reboot,
    },
];

impl Builtin {
    /// Table entry of this built-in.
    pub fn entry(self) -> &'static BuiltinCommand {
        &BUILTINS[self as usize]
    }
}

impl<T: Transport, P: Platform> Shell<'_, T, P> {
    pub(super) fn run_builtin(&mut self, builtin: Builtin, args: &Args) -> Result<(), Error> {
        if args.len() > 2 {
            return Err(Error::InvalidParameters);
        }
        match builtin {
            Builtin::Help => self.help(args),
            Builtin::Version => {
                let version = self.platform.version();
                Io::new(&mut self.transport, &self.logger, self.mode)
                    .line(version);
                Ok(())
            }
            Builtin::Status => {
                let level = self.logger.threshold();
                let mut io = Io::new(&mut self.transport, &self.logger, self.mode);
                io.line(self.platform.board_info());
                io.line_fmt(format_args!("mode: {}", self.mode.name()));
                io.line_fmt(format_args!("debug level: {} ({})", level, level as u8));
                Ok(())
            }
            Builtin::Debug => {
                if let Some(value) = args.get(1) {
                    let level = value.parse::<Level>()?;
                    self.logger.set_threshold(level);
                }
                let level = self.logger.threshold();
                Io::new(&mut self.transport, &self.logger, self.mode)
                    .line_fmt(format_args!("debug level: {} ({})", level, level as u8));
                Ok(())
            }
            Builtin::Save => {
                let blob = self.settings().encode()?;
                self.platform.persist(&blob)?;
                Io::new(&mut self.transport, &self.logger, self.mode)
                    .line("Parameters saved");
                Ok(())
            }
            Builtin::Reboot => {
                Io::new(&mut self.transport, &self.logger, self.mode)
                    .line("Reboot...");
                self.platform.reset();
                Ok(())
            }
        }
    }

    fn help(&mut self, args: &Args) -> Result<(), Error> {
        if let Some(name) = args.get(1) {
            let target = self.registry.lookup(name)?;
            self.help_entry(target);
            return Ok(());
        }

        let mut io = Io::new(&mut self.transport, &self.logger, self.mode);
        for entry in BUILTINS.iter() {
            io.help_line(entry.name, entry.description);
        }
        for command in self.registry.commands() {
            io.help_line(command.name, command.description);
        }
        for app in self.registry.apps_mut() {
            io.help_line(app.name, app.description);
            app.handler.help(&mut io);
        }
        Ok(())
    }

    fn help_entry(&mut self, target: Target) {
        let mut io = Io::new(&mut self.transport, &self.logger, self.mode);
        if let Some((name, description)) = self.registry.describe(target) {
            io.help_line(name, description);
        }
        if let Target::App(index) = target {
            if let Some(app) = self.registry.apps_mut().get_mut(index) {
                app.handler.help(&mut io);
            }
        }
    }
}
