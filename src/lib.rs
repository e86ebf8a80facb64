//! # libcdli - Command & Debug Line Interface
//!
//! A serial console for embedded firmware. Bytes from a UART (or any other
//! character stream) are assembled into lines, tokenized and dispatched to
//! built-in commands, application commands and stateful apps. A leveled debug
//! logger shares the same console. This library is designed for embedded
//! systems and supports `no_std` environments.
//!
//! ## Features
//!
//! ### Command Interpreter
//! - Quote-aware tokenizer with bounded parameter lists
//! - Abbreviated command names (`stat` for `status`)
//! - Built-in `help`, `version`, `status`, `debug`, `save` and `reboot`
//! - External commands and stateful apps behind one [`Handler`](shell::Handler) trait
//!
//! ### Debug Console
//! - Leveled messages gated by a runtime threshold
//! - Command mode for operators, Debug mode for free-running diagnostics
//! - Escape lines (`---` / `+++`) to switch between the two
//!
//! ### Embedded Friendly
//! - No heap: every buffer is a fixed-capacity `heapless` container
//! - Lock-free receive buffer that can be filled from an interrupt
//! - Hardware access only through the [`platform`] traits
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! libcdli = "0.1.0"
//! ```
//!
//! ### Basic Example
//!
//! ```rust,no_run
//! use libcdli::platform::{Platform, Transport};
//! use libcdli::shell::rx::RxBuffer;
//! use libcdli::shell::{Args, Config, Error, Io, Level, Shell};
//! # struct Uart;
//! # impl Transport for Uart {
//! #     fn transmit(&mut self, _bytes: &[u8]) {}
//! # }
//! # struct Board;
//! # impl Platform for Board {
//! #     fn reset(&mut self) {}
//! #     fn version(&self) -> &str { "1.0.0" }
//! #     fn board_info(&self) -> &str { "demo" }
//! # }
//!
//! fn led(io: &mut Io<'_>, args: &Args) -> Result<(), Error> {
//!     match args.get(1) {
//!         Some("on") | Some("off") => {
//!             io.line("ok");
//!             Ok(())
//!         }
//!         _ => Err(Error::InvalidParameters),
//!     }
//! }
//!
//! let mut rx: RxBuffer = RxBuffer::new();
//! let (mut producer, mut consumer) = rx.split();
//!
//! let mut shell = Shell::initialize(Uart, Board, Config::new("Sensor Node"));
//! shell.register_command("led", "Switch the LED [on|off]", led).unwrap();
//!
//! loop {
//!     // The receive interrupt calls `producer.push(byte)`.
//! #   let _ = producer.push(b'\n');
//!     shell.poll(&mut consumer);
//!     shell.log(Level::Info, "tick");
//! }
//! ```
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Linux-based devices talking over a serial port
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Capabilities the shell borrows from the firmware: output transport and
/// device services.
pub mod platform;

/// The command interpreter.
///
/// Receive buffer, line assembly, tokenizer, command registry, mode state
/// machine and debug logger.
pub mod shell;
