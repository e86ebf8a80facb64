//! Common error types for shell operations

use core::fmt;

/// A common error type for shell operations.
///
/// Registration errors are returned to the caller of the registration API.
/// Dispatch-time errors never leave the shell: they are turned into a console
/// notice (see [`Error::message`]) and the interpreter carries on.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A command received parameters it cannot use, or a line held too many tokens.
    InvalidParameters,
    /// A registration table is full.
    CapacityExceeded,
    /// No registered name matches the entered command.
    CommandNotFound,
    /// The entered command abbreviates more than one registered name.
    AmbiguousCommand,
    /// The command exists but has no implementation on this platform.
    NotImplemented,
    /// A receive buffer or the current line ran out of space.
    BufferOverflow,
    /// Persisted settings could not be encoded or decoded.
    Settings,
}

impl Error {
    /// Console notice printed when this error ends a dispatch.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidParameters => "Error: Wrong Params!",
            Self::CapacityExceeded => "Error: No space left!",
            Self::CommandNotFound => "Error: Command not found!",
            Self::AmbiguousCommand => "Error: Wrong Command!",
            Self::NotImplemented => "Error: Command not implemented!",
            Self::BufferOverflow => "Error: Line too long!",
            Self::Settings => "Error: Settings not valid!",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::InvalidParameters => defmt::write!(f, "InvalidParameters"),
            Error::CapacityExceeded => defmt::write!(f, "CapacityExceeded"),
            Error::CommandNotFound => defmt::write!(f, "CommandNotFound"),
            Error::AmbiguousCommand => defmt::write!(f, "AmbiguousCommand"),
            Error::NotImplemented => defmt::write!(f, "NotImplemented"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
            Error::Settings => defmt::write!(f, "Settings"),
        }
    }
}
