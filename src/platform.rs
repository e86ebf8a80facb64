//! Capabilities the shell borrows from the surrounding firmware.
//!
//! The shell never touches hardware. Output goes through a [`Transport`],
//! and the few built-in commands that need the device (reset, version
//! reporting, parameter storage) call into a [`Platform`].
//!
//! # Examples
//!
//! ```rust
//! use libcdli::platform::{Platform, Transport};
//!
//! struct Uart;
//!
//! impl Transport for Uart {
//!     fn transmit(&mut self, bytes: &[u8]) {
//!         // Push the bytes into the UART TX FIFO.
//!         let _ = bytes;
//!     }
//! }
//!
//! struct Board;
//!
//! impl Platform for Board {
//!     fn reset(&mut self) {}
//!     fn version(&self) -> &str { "1.0.0" }
//!     fn board_info(&self) -> &str { "rev B" }
//! }
//! ```

use crate::shell::error::Error;

/// Byte sink for everything the shell prints.
pub trait Transport {
    /// Sends raw bytes to the serial line.
    fn transmit(&mut self, bytes: &[u8]);

    /// Sends a string to the serial line.
    fn transmit_str(&mut self, text: &str) {
        self.transmit(text.as_bytes());
    }
}

impl<F: FnMut(&[u8])> Transport for F {
    fn transmit(&mut self, bytes: &[u8]) {
        self(bytes)
    }
}

/// Device services used by the built-in commands.
///
/// This trait must be implemented by the target platform. Only [`reset`],
/// [`version`] and [`board_info`] are mandatory; parameter storage defaults
/// to "not implemented".
///
/// [`reset`]: Platform::reset
/// [`version`]: Platform::version
/// [`board_info`]: Platform::board_info
pub trait Platform {
    /// Resets the device. On hardware this does not return.
    fn reset(&mut self);

    /// Firmware version string, printed by the banner and `version`.
    fn version(&self) -> &str;

    /// Board description, printed by `status`.
    fn board_info(&self) -> &str;

    /// Writes the encoded settings blob to non-volatile storage.
    fn persist(&mut self, blob: &[u8]) -> Result<(), Error> {
        let _ = blob;
        Err(Error::NotImplemented)
    }

    /// Reads a previously persisted settings blob into `buf`.
    ///
    /// Returns the number of bytes read, or `None` if nothing was stored.
    fn restore(&mut self, buf: &mut [u8]) -> Option<usize> {
        let _ = buf;
        None
    }
}
