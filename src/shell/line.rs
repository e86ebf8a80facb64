//! Line assembly from single received bytes.
//!
//! Bytes are stored as they arrive. Backspace (0x08) and delete (0x7F) remove
//! the last stored byte. A line ends when the last two stored bytes are CR
//! followed by LF; the terminator is not part of the reported line.
//!
//! A line that fills [`LINE_CAPACITY`] without a terminator is dropped. The
//! assembler then ignores everything up to the next CR LF so the tail of the
//! long line is not mistaken for a new command.

use heapless::Vec;

/// Capacity of the current line, terminator included.
pub const LINE_CAPACITY: usize = 80;

/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII delete character (0x7F).
pub const ASCII_DEL: u8 = 0x7F;

/// Outcome of feeding one byte to the [`LineAssembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// The byte was stored, ignored or discarded; the line is still open.
    Continue,
    /// The last stored byte was removed.
    BackspaceApplied,
    /// A CR LF terminator arrived; the line is available through
    /// [`LineAssembler::line`] until the next call to `feed`.
    LineComplete,
    /// The line filled up without a terminator and was thrown away.
    LineOverflow,
}

#[cfg(feature = "defmt")]
impl defmt::Format for LineEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            LineEvent::Continue => defmt::write!(f, "Continue"),
            LineEvent::BackspaceApplied => defmt::write!(f, "BackspaceApplied"),
            LineEvent::LineComplete => defmt::write!(f, "LineComplete"),
            LineEvent::LineOverflow => defmt::write!(f, "LineOverflow"),
        }
    }
}

/// Current line plus cursor.
#[derive(Debug)]
pub struct LineAssembler {
    buffer: Vec<u8, LINE_CAPACITY>,
    complete: bool,
    discarding: bool,
    last: u8,
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAssembler {
    /// Creates an empty assembler.
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            complete: false,
            discarding: false,
            last: 0,
        }
    }

    /// Number of stored bytes, terminator included once it has arrived.
    pub fn cursor(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` while nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns `true` while the tail of an overlong line is being dropped.
    pub fn is_discarding(&self) -> bool {
        self.discarding
    }

    /// The completed line without its CR LF.
    ///
    /// Returns `None` unless the last [`feed`](Self::feed) reported
    /// [`LineEvent::LineComplete`].
    pub fn line(&self) -> Option<&[u8]> {
        if self.complete {
            Some(&self.buffer[..self.buffer.len() - 2])
        } else {
            None
        }
    }

    /// Takes the completed line without its CR LF and starts a new one.
    pub fn take_line(&mut self) -> Option<Vec<u8, LINE_CAPACITY>> {
        if !self.complete {
            return None;
        }
        self.complete = false;
        let mut line = core::mem::take(&mut self.buffer);
        line.truncate(line.len() - 2);
        Some(line)
    }

    /// Drops the current line and any pending discard.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.complete = false;
        self.discarding = false;
        self.last = 0;
    }

    /// Processes one received byte.
    pub fn feed(&mut self, byte: u8) -> LineEvent {
        if self.complete {
            self.buffer.clear();
            self.complete = false;
        }

        if self.discarding {
            let terminated = self.last == ASCII_CR && byte == ASCII_LF;
            self.last = byte;
            if terminated {
                self.discarding = false;
                self.last = 0;
            }
            return LineEvent::Continue;
        }

        if byte == ASCII_BACKSPACE || byte == ASCII_DEL {
            return match self.buffer.pop() {
                Some(_) => LineEvent::BackspaceApplied,
                None => LineEvent::Continue,
            };
        }

        // Capacity is checked below, so there is always room here.
        let _ = self.buffer.push(byte);

        if self.buffer.ends_with(&[ASCII_CR, ASCII_LF]) {
            self.complete = true;
            return LineEvent::LineComplete;
        }

        if self.buffer.is_full() {
            #[cfg(feature = "defmt")]
            defmt::warn!("line overflow, discarding until CR LF");
            self.buffer.clear();
            self.discarding = true;
            self.last = byte;
            return LineEvent::LineOverflow;
        }

        LineEvent::Continue
    }
}
