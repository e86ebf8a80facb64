#![allow(dead_code)]

use libcdli::platform::{Platform, Transport};
use libcdli::shell::{Config, Error, Shell};

pub const VERSION: &str = "v1.2.0";
pub const BOARD: &str = "test board rev B";
pub const PROMPT: &str = "\r\n%> ";

/// Transport that keeps everything the shell sends.
#[derive(Debug, Default)]
pub struct Capture {
    out: Vec<u8>,
}

impl Capture {
    /// Returns the output collected since the last call.
    pub fn take(&mut self) -> String {
        let out = std::mem::take(&mut self.out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl Transport for Capture {
    fn transmit(&mut self, bytes: &[u8]) {
        self.out.extend_from_slice(bytes);
    }
}

/// Board with optional non-volatile storage.
#[derive(Debug, Default)]
pub struct MockBoard {
    pub resets: usize,
    pub storage: Option<Vec<u8>>,
}

impl MockBoard {
    pub fn with_storage(blob: &[u8]) -> Self {
        Self {
            resets: 0,
            storage: Some(blob.to_vec()),
        }
    }
}

impl Platform for MockBoard {
    fn reset(&mut self) {
        self.resets += 1;
    }

    fn version(&self) -> &str {
        VERSION
    }

    fn board_info(&self) -> &str {
        BOARD
    }

    fn persist(&mut self, blob: &[u8]) -> Result<(), Error> {
        match self.storage.as_mut() {
            Some(storage) => {
                storage.clear();
                storage.extend_from_slice(blob);
                Ok(())
            }
            None => Err(Error::NotImplemented),
        }
    }

    fn restore(&mut self, buf: &mut [u8]) -> Option<usize> {
        let stored = self.storage.as_ref().filter(|stored| !stored.is_empty())?;
        let len = stored.len().min(buf.len());
        buf[..len].copy_from_slice(&stored[..len]);
        Some(len)
    }
}

pub type TestShell<'a> = Shell<'a, Capture, MockBoard>;

/// Starts a shell and drops the banner.
pub fn shell<'a>(config: Config, board: MockBoard) -> TestShell<'a> {
    let mut shell = Shell::initialize(Capture::default(), board, config);
    shell.transport_mut().take();
    shell
}

/// Sends `line` plus CR LF and returns what the shell printed.
pub fn send(shell: &mut TestShell<'_>, line: &str) -> String {
    shell.input(line.as_bytes());
    shell.input(b"\r\n");
    shell.transport_mut().take()
}

/// Expected help line, as printed in Command mode.
pub fn help_line(name: &str, description: &str) -> String {
    format!("\r\n  {:<16} {}", name, description)
}
