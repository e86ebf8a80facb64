//! Command & debug line interface for a serial console.
//!
//! This module provides a line-oriented command interpreter designed for
//! microcontrollers and `no_std` environments. Bytes arrive from a UART
//! receive callback, are assembled into lines, tokenized and dispatched to
//! built-in commands, registered commands or stateful apps.
//!
//! # Features
//!
//! - **Zero-allocation**: Fixed-capacity `heapless` containers everywhere
//! - **Interrupt-safe input**: Lock-free receive buffer filled from the RX callback
//! - **Quoted parameters**: `set name "two words"`
//! - **Abbreviations**: `stat` runs `status` when unambiguous
//! - **Two modes**: an interactive Command mode and a free-running Debug mode
//! - **Leveled logging**: messages gated by a threshold and by the mode
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   RX callback   │───▶│    RxBuffer     │───▶│  LineAssembler  │
//! │  (interrupt)    │    │  (spsc queue)   │    │  (poll context) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                                        │
//!                                                        ▼
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handler      │◀───│    Registry     │◀───│    Tokenizer    │
//! │   execution     │    │     lookup      │    │  + mode switch  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Modes
//!
//! In **Command** mode every line ends with a fresh prompt and unknown
//! commands get a notice. In **Debug** mode the console is a stream of
//! tagged log lines: no prompt, no notices. The line `---` (configurable)
//! switches from Command to Debug mode and `+++` switches back.
//!
//! # Usage Examples
//!
//! ```rust
//! use libcdli::platform::Platform;
//! use libcdli::shell::rx::RxBuffer;
//! use libcdli::shell::{Args, Config, Error, Io, Level, Shell};
//!
//! struct Board;
//!
//! impl Platform for Board {
//!     fn reset(&mut self) {}
//!     fn version(&self) -> &str { "v1.2.0" }
//!     fn board_info(&self) -> &str { "demo board" }
//! }
//!
//! fn hello(io: &mut Io<'_>, args: &Args) -> Result<(), Error> {
//!     match args.get(1) {
//!         Some(name) => io.line_fmt(format_args!("Hello, {}!", name)),
//!         None => io.line("Hello, World!"),
//!     }
//!     Ok(())
//! }
//!
//! let mut output: Vec<u8> = Vec::new();
//! let transport = |bytes: &[u8]| output.extend_from_slice(bytes);
//!
//! let mut shell = Shell::initialize(transport, Board, Config::new("Demo"));
//! shell.register_command("hello", "Say hello", hello).unwrap();
//!
//! let mut rx: RxBuffer = RxBuffer::new();
//! let (mut producer, mut consumer) = rx.split();
//! for &byte in b"hello \"big world\"\r\n" {
//!     producer.push(byte).unwrap();
//! }
//! shell.poll(&mut consumer);
//! shell.log(Level::None, "done");
//! drop(shell);
//!
//! let text = String::from_utf8(output).unwrap();
//! assert!(text.contains("Hello, big world!"));
//! ```

use core::fmt;

/// Built-in commands.
pub mod builtins;
/// Start-up configuration.
pub mod config;
/// Common error types for shell operations.
pub mod error;
/// Console access handed to command handlers.
pub mod io;
/// Line assembly from single received bytes.
pub mod line;
/// Leveled debug messages.
pub mod log;
/// Operating mode.
pub mod mode;
/// Command registry and handler abstraction.
pub mod registry;
/// Receive buffer between the RX callback and the shell.
pub mod rx;
/// Parameters that survive a reboot.
pub mod settings;
/// Line tokenizer.
pub mod tokenizer;


pub use config::Config;
pub use error::Error;
pub use io::Io;
pub use line::LineEvent;
pub use log::Level;
pub use mode::Mode;
pub use registry::{Args, CommandFn, Handler, Registry};
pub use settings::Settings;

use crate::platform::{Platform, Transport};
use line::LineAssembler;
use log::{Logger, NEW_LINE};
use registry::Target;
use rx::ByteSource;
use settings::SETTINGS_BLOB_LEN;

/// Length of the banner divider lines.
pub const DIVIDER_WIDTH: usize = 80;

/// The interpreter state.
///
/// A shell owns its transport, its platform services, the current line, the
/// registry and the mode. Several independent shells can coexist, one per
/// serial port.
///
/// Apps are borrowed for `'a`, the lifetime of the shell.
pub struct Shell<'a, T: Transport, P: Platform> {
    transport: T,
    platform: P,
    config: Config,
    line: LineAssembler,
    registry: Registry<'a>,
    logger: Logger,
    mode: Mode,
}

impl<'a, T: Transport, P: Platform> Shell<'a, T, P> {
    /// Creates a shell, prints the start-up banner and the first prompt.
    ///
    /// Settings previously stored with `save` are restored from the platform
    /// and take precedence over `config`.
    pub fn initialize(transport: T, platform: P, config: Config) -> Self {
        let mut shell = Self {
            transport,
            platform,
            config,
            line: LineAssembler::new(),
            registry: Registry::new(),
            logger: Logger::new(config.threshold),
            mode: config.initial_mode,
        };

        shell.restore_settings();
        shell.banner();
        if shell.mode == Mode::Command {
            shell.prompt();
        }
        shell
    }

    /// Register an external command.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Command registered successfully
    /// * [`Error::InvalidParameters`] - Empty command name provided
    /// * [`Error::CapacityExceeded`] - Maximum external commands exceeded
    pub fn register_command(
        &mut self,
        name: &'static str,
        description: &'static str,
        handler: CommandFn,
    ) -> Result<(), Error> {
        self.registry.register_command(name, description, handler)
    }

    /// Register a stateful app.
    ///
    /// The app is invoked with its own state on every matching line, and
    /// once more through [`Handler::help`] whenever `help` lists it.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - App registered successfully
    /// * [`Error::InvalidParameters`] - Empty app name provided
    /// * [`Error::CapacityExceeded`] - Maximum apps exceeded
    pub fn register_app(
        &mut self,
        name: &'static str,
        description: &'static str,
        app: &'a mut dyn Handler,
    ) -> Result<(), Error> {
        self.registry.register_app(name, description, app)
    }

    /// Drain the receive buffer and run every completed line.
    ///
    /// Never blocks. Returns the number of lines completed.
    pub fn poll<S: ByteSource + ?Sized>(&mut self, rx: &mut S) -> usize {
        let mut lines = 0;
        while let Some(byte) = rx.pull() {
            if self.feed(byte) == LineEvent::LineComplete {
                lines += 1;
            }
        }
        lines
    }

    /// Process input data byte by byte, bypassing any receive buffer.
    pub fn input(&mut self, data: &[u8]) -> usize {
        data.iter()
            .filter(|&&byte| self.feed(byte) == LineEvent::LineComplete)
            .count()
    }

    /// Process a single received byte.
    pub fn feed(&mut self, byte: u8) -> LineEvent {
        // The tail of an overlong line is dropped silently.
        let discarding = self.line.is_discarding();
        let event = self.line.feed(byte);
        if !discarding {
            self.echo(byte, event);
        }

        match event {
            LineEvent::LineComplete => {
                if let Some(line) = self.line.take_line() {
                    self.process_line(&line);
                }
            }
            LineEvent::LineOverflow => {
                self.notice(Error::BufferOverflow);
                if self.mode == Mode::Command {
                    self.prompt();
                }
            }
            LineEvent::Continue | LineEvent::BackspaceApplied => {}
        }

        event
    }

    /// Prints a help line aligned with the built-in help table.
    pub fn print_help_line(&mut self, name: &str, description: &str) {
        self.io().help_line(name, description);
    }

    /// Emits a leveled message.
    pub fn log(&mut self, level: Level, message: &str) {
        self.logger.emit(&mut self.transport, self.mode, level, message);
    }

    /// Emits a leveled, formatted message.
    ///
    /// ```rust,ignore
    /// shell.log_fmt(Level::Warning, format_args!("vbat {} mV", millivolts));
    /// ```
    pub fn log_fmt(&mut self, level: Level, args: fmt::Arguments<'_>) {
        self.logger.emit_fmt(&mut self.transport, self.mode, level, args);
    }

    /// Current operating mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current debug threshold.
    pub fn threshold(&self) -> Level {
        self.logger.threshold()
    }

    /// Changes the debug threshold.
    pub fn set_threshold(&mut self, threshold: Level) {
        self.logger.set_threshold(threshold);
    }

    /// Snapshot of the parameters `save` persists.
    pub fn settings(&self) -> Settings {
        Settings {
            threshold: self.logger.threshold(),
            mode: self.mode,
        }
    }

    /// The configuration the shell was started with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registered commands and apps.
    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// The output transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the output transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The platform services.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the platform services.
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    fn io(&mut self) -> Io<'_> {
        Io::new(&mut self.transport, &self.logger, self.mode)
    }

    fn process_line(&mut self, line: &[u8]) {
        if !line.is_empty() {
            if let Err(error) = self.dispatch(line) {
                self.notice(error);
            }
        }
        if self.mode == Mode::Command {
            self.prompt();
        }
    }

    fn dispatch(&mut self, line: &[u8]) -> Result<(), Error> {
        let tokens = match tokenizer::tokenize(line) {
            Ok(tokens) => tokens,
            Err(error) => return self.switch_mode_or(line, error),
        };
        let Some(name) = tokens.first() else {
            return Ok(());
        };

        match self.registry.lookup(name) {
            Ok(target) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("dispatch {=str}", name.as_str());
                self.invoke(target, &Args::from(tokens))
            }
            Err(error) => self.switch_mode_or(line, error),
        }
    }

    fn invoke(&mut self, target: Target, args: &Args) -> Result<(), Error> {
        match target {
            Target::Builtin(builtin) => self.run_builtin(builtin, args),
            Target::Command(index) => {
                let mut handler = self
                    .registry
                    .commands()
                    .get(index)
                    .map(|command| command.handler)
                    .ok_or(Error::CommandNotFound)?;
                let mut io = Io::new(&mut self.transport, &self.logger, self.mode);
                handler.invoke(&mut io, args)
            }
            Target::App(index) => {
                let app = self
                    .registry
                    .apps_mut()
                    .get_mut(index)
                    .ok_or(Error::CommandNotFound)?;
                let mut io = Io::new(&mut self.transport, &self.logger, self.mode);
                app.handler.invoke(&mut io, args)
            }
        }
    }

    /// Switches mode if `line` is the escape line for the current mode,
    /// otherwise hands `error` back.
    fn switch_mode_or(&mut self, line: &[u8], error: Error) -> Result<(), Error> {
        let next = match self.mode {
            Mode::Command if line == self.config.enter_debug.as_bytes() => Mode::Debug,
            Mode::Debug if line == self.config.enter_command.as_bytes() => Mode::Command,
            _ => return Err(error),
        };
        #[cfg(feature = "defmt")]
        defmt::trace!("mode {} -> {}", self.mode, next);
        self.mode = next;
        Ok(())
    }

    fn notice(&mut self, error: Error) {
        self.io().notice(error);
    }

    fn echo(&mut self, byte: u8, event: LineEvent) {
        if !self.config.echo || self.mode != Mode::Command {
            return;
        }
        match event {
            LineEvent::BackspaceApplied => self.transport.transmit(b"\x08 \x08"),
            LineEvent::Continue | LineEvent::LineComplete
                if matches!(byte, 0x20..0x7F | line::ASCII_CR | line::ASCII_LF) =>
            {
                self.transport.transmit(&[byte]);
            }
            _ => {}
        }
    }

    fn prompt(&mut self) {
        let mut buf = [0u8; 4];
        let prompt_char = self.config.prompt_char.encode_utf8(&mut buf);
        self.transport.transmit_str(NEW_LINE);
        self.transport.transmit_str(prompt_char);
        self.transport.transmit_str("> ");
    }

    fn banner(&mut self) {
        self.transport.transmit_str(NEW_LINE);
        self.divider();

        let name = self.config.project_name;
        let copyright = self.config.project_copyright;
        if !name.is_empty() || copyright.is_some() {
            if !name.is_empty() {
                self.transport.transmit_str(name);
                self.transport.transmit_str(NEW_LINE);
            }
            if let Some(copyright) = copyright {
                self.transport.transmit_str(copyright);
                self.transport.transmit_str(NEW_LINE);
            }
            self.divider();
        }

        let version = self.platform.version();
        if !version.is_empty() {
            self.transport.transmit_str(version);
            self.transport.transmit_str(NEW_LINE);
        }
        self.divider();
    }

    fn divider(&mut self) {
        let mut buf = [0u8; 4];
        let divider = self.config.divider_char.encode_utf8(&mut buf);
        for _ in 0..DIVIDER_WIDTH {
            self.transport.transmit_str(divider);
        }
        self.transport.transmit_str(NEW_LINE);
    }

    fn restore_settings(&mut self) {
        let mut buf = [0u8; SETTINGS_BLOB_LEN];
        let Some(len) = self.platform.restore(&mut buf) else {
            return;
        };
        match buf.get(..len).ok_or(Error::Settings).and_then(Settings::decode) {
            Ok(settings) => {
                self.logger.set_threshold(settings.threshold);
                self.mode = settings.mode;
            }
            Err(_error) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("stored settings ignored: {}", _error);
            }
        }
    }
}

impl<T: Transport, P: Platform> fmt::Debug for Shell<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("config", &self.config)
            .field("line", &self.line)
            .field("registry", &self.registry)
            .field("logger", &self.logger)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
