//! Command registry: built-ins, external commands and apps.
//!
//! Three tables are searched in a fixed order: built-ins, then external
//! commands, then apps. The entered command may be the full registered name
//! or an abbreviation of it:
//!
//! 1. An exact match wins, searching the tables in order.
//! 2. Otherwise the entered text must be the prefix of exactly one name.
//!    More than one candidate is [`Error::AmbiguousCommand`].
//!
//! With `set` and `settime` registered, `set` runs `set`, `sett` runs
//! `settime`, and `se` is ambiguous.

use core::fmt;

use heapless::Vec;

use super::builtins::{BUILTINS, Builtin};
use super::error::Error;
use super::io::Io;
use super::tokenizer::{self, Tokens};

/// Maximum number of external commands.
pub const MAX_COMMANDS: usize = 16;

/// Maximum number of apps.
pub const MAX_APPS: usize = 8;

/// Parameters of a dispatched line.
///
/// `argv[0]` is the command name exactly as typed (possibly abbreviated),
/// the rest are the parameters. [`len`](Self::len) is `argc`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Args {
    tokens: Tokens,
}

impl Args {
    /// Tokenizes a line into arguments.
    pub fn parse(line: &str) -> Result<Self, Error> {
        tokenizer::tokenize(line.as_bytes()).map(Self::from)
    }

    /// Number of tokens, command name included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the line held no token.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`; 0 is the command name.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|token| token.as_str())
    }

    /// The command name as typed.
    pub fn name(&self) -> &str {
        self.get(0).unwrap_or("")
    }

    /// Parameters after the command name.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().skip(1).map(|token| token.as_str())
    }

    /// All tokens, command name first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|token| token.as_str())
    }
}

impl From<Tokens> for Args {
    fn from(tokens: Tokens) -> Self {
        Self { tokens }
    }
}

/// Something the shell can run.
///
/// External commands are plain [`CommandFn`]s. Apps are values that carry
/// their own state and get an extra [`help`](Handler::help) call whenever
/// `help` lists them.
///
/// # Examples
///
/// ```rust
/// use libcdli::shell::{Args, Error, Handler, Io};
///
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Handler for Counter {
///     fn invoke(&mut self, io: &mut Io<'_>, args: &Args) -> Result<(), Error> {
///         match args.get(1) {
///             Some("reset") => self.hits = 0,
///             Some(_) => return Err(Error::InvalidParameters),
///             None => self.hits += 1,
///         }
///         io.line_fmt(format_args!("hits: {}", self.hits));
///         Ok(())
///     }
///
///     fn help(&mut self, io: &mut Io<'_>) {
///         io.help_line("  reset", "Clear the counter");
///     }
/// }
/// ```
pub trait Handler {
    /// Runs the command. Failures are reported through the returned error,
    /// which the shell turns into a console notice.
    fn invoke(&mut self, io: &mut Io<'_>, args: &Args) -> Result<(), Error>;

    /// Prints extended help below the handler's help line.
    fn help(&mut self, io: &mut Io<'_>) {
        let _ = io;
    }
}

/// Function signature of external commands.
pub type CommandFn = fn(&mut Io<'_>, &Args) -> Result<(), Error>;

impl Handler for CommandFn {
    fn invoke(&mut self, io: &mut Io<'_>, args: &Args) -> Result<(), Error> {
        (*self)(io, args)
    }
}

/// An external command.
#[derive(Clone, Copy)]
pub struct Command {
    /// The command name as typed by the user.
    pub name: &'static str,
    /// A brief description shown by `help`.
    pub description: &'static str,
    /// The function that implements the command.
    pub handler: CommandFn,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A stateful command.
pub struct App<'a> {
    /// The command name as typed by the user.
    pub name: &'static str,
    /// A brief description shown by `help`.
    pub description: &'static str,
    /// The app itself.
    pub handler: &'a mut dyn Handler,
}

impl fmt::Debug for App<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// What a command name resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A built-in command.
    Builtin(Builtin),
    /// Index into the external command table.
    Command(usize),
    /// Index into the app table.
    App(usize),
}

/// Bounded tables of external commands and apps.
#[derive(Debug, Default)]
pub struct Registry<'a> {
    commands: Vec<Command, MAX_COMMANDS>,
    apps: Vec<App<'a>, MAX_APPS>,
}

impl<'a> Registry<'a> {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
            apps: Vec::new(),
        }
    }

    /// Adds an external command.
    ///
    /// # Returns
    ///
    /// * [`Error::InvalidParameters`] - Empty command name provided
    /// * [`Error::CapacityExceeded`] - [`MAX_COMMANDS`] already registered
    pub fn register_command(
        &mut self,
        name: &'static str,
        description: &'static str,
        handler: CommandFn,
    ) -> Result<(), Error> {
        check_name(name)?;
        self.commands
            .push(Command {
                name,
                description,
                handler,
            })
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Adds an app.
    ///
    /// # Returns
    ///
    /// * [`Error::InvalidParameters`] - Empty command name provided
    /// * [`Error::CapacityExceeded`] - [`MAX_APPS`] already registered
    pub fn register_app(
        &mut self,
        name: &'static str,
        description: &'static str,
        handler: &'a mut dyn Handler,
    ) -> Result<(), Error> {
        check_name(name)?;
        self.apps
            .push(App {
                name,
                description,
                handler,
            })
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Registered external commands, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Registered apps, in registration order.
    pub fn apps(&self) -> &[App<'a>] {
        &self.apps
    }

    /// Mutable access to the registered apps.
    pub fn apps_mut(&mut self) -> &mut [App<'a>] {
        &mut self.apps
    }

    /// Name and description of a resolved target.
    pub fn describe(&self, target: Target) -> Option<(&'static str, &'static str)> {
        match target {
            Target::Builtin(builtin) => {
                let entry = builtin.entry();
                Some((entry.name, entry.description))
            }
            Target::Command(index) => self
                .commands
                .get(index)
                .map(|command| (command.name, command.description)),
            Target::App(index) => self
                .apps
                .get(index)
                .map(|app| (app.name, app.description)),
        }
    }

    /// Resolves an entered command name.
    pub fn lookup(&self, name: &str) -> Result<Target, Error> {
        if name.is_empty() {
            return Err(Error::CommandNotFound);
        }

        if let Some((_, target)) = self.entries().find(|(entry, _)| *entry == name) {
            return Ok(target);
        }

        let mut candidates = self.entries().filter(|(entry, _)| entry.starts_with(name));
        match (candidates.next(), candidates.next()) {
            (Some((_, target)), None) => Ok(target),
            (Some(_), Some(_)) => Err(Error::AmbiguousCommand),
            (None, _) => Err(Error::CommandNotFound),
        }
    }

    fn entries(&self) -> impl Iterator<Item = (&'static str, Target)> {
        let builtins = BUILTINS
            .iter()
            .map(|entry| (entry.name, Target::Builtin(entry.builtin)));
        let commands = self
            .commands
            .iter()
            .enumerate()
            .map(|(index, command)| (command.name, Target::Command(index)));
        let apps = self
            .apps
            .iter()
            .enumerate()
            .map(|(index, app)| (app.name, Target::App(index)));
        builtins.chain(commands).chain(apps)
    }
}

fn check_name(name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::InvalidParameters);
    }
    Ok(())
}
