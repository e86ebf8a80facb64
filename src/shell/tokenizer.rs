//! Splits a completed line into the command name and its parameters.
//!
//! Rules:
//!
//! - Spaces separate tokens; runs of spaces count as one separator and
//!   leading spaces are skipped.
//! - A double quote opens a group in which spaces are kept. The closing quote
//!   ends the token, even when the group is empty (`""`).
//! - Quotes are delimiters and never part of a token. The command name may be
//!   quoted like any other token.
//! - A quote left open at the end of the line is closed there.
//!
//! ```text
//! cmd "a b" c        # 3 tokens: ["cmd", "a b", "c"]
//! cmd   a            # 2 tokens: ["cmd", "a"]
//! set "" x           # 3 tokens: ["set", "", "x"]
//! echo "open end     # 2 tokens: ["echo", "open end"]
//! ```
//!
//! Tokens longer than [`MAX_PARAM_LEN`] input bytes are truncated. A line with
//! more than [`MAX_PARAMS`] tokens is rejected with [`Error::InvalidParameters`].
//! Bytes are taken as Latin-1, so any 8-bit value survives tokenizing. A byte
//! above 0x7F takes two bytes of UTF-8, hence [`TOKEN_CAPACITY`].

use heapless::{String, Vec};

use super::error::Error;

/// Maximum number of tokens per line, command name included.
pub const MAX_PARAMS: usize = 8;

/// Maximum length of a single token in input bytes.
pub const MAX_PARAM_LEN: usize = 80;

/// Storage size of a token: every input byte may grow to two bytes of UTF-8.
pub const TOKEN_CAPACITY: usize = 2 * MAX_PARAM_LEN;

/// A single token.
pub type Token = String<TOKEN_CAPACITY>;

/// Tokens of one line, command name first.
pub type Tokens = Vec<Token, MAX_PARAMS>;

const QUOTE: u8 = b'"';
const SPACE: u8 = b' ';

#[derive(Clone, Copy, PartialEq, Eq)]
enum Previous {
    Boundary,
    Space,
    ClosingQuote,
    Other,
}

/// Tokenizes `line`, which must not contain the CR LF terminator.
pub fn tokenize(line: &[u8]) -> Result<Tokens, Error> {
    let mut tokens = Tokens::new();
    let mut current = Current::default();
    let mut inside_quotes = false;
    let mut opened = false;
    let mut previous = Previous::Boundary;

    for &byte in line {
        match byte {
            QUOTE if inside_quotes => {
                inside_quotes = false;
                opened = false;
                current.finish(&mut tokens)?;
                previous = Previous::ClosingQuote;
            }
            QUOTE => {
                inside_quotes = true;
                opened = true;
                previous = Previous::Other;
            }
            SPACE if inside_quotes => {
                current.append(byte);
                previous = Previous::Space;
            }
            SPACE => {
                if previous == Previous::Other {
                    current.finish(&mut tokens)?;
                }
                previous = Previous::Space;
            }
            _ => {
                current.append(byte);
                previous = Previous::Other;
            }
        }
    }

    if !current.is_empty() || opened {
        current.finish(&mut tokens)?;
    }

    Ok(tokens)
}

/// Token under construction, with its length counted in input bytes.
#[derive(Default)]
struct Current {
    token: Token,
    len: usize,
}

impl Current {
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn append(&mut self, byte: u8) {
        // Overlong tokens are cut at MAX_PARAM_LEN input bytes.
        if self.len < MAX_PARAM_LEN {
            let _ = self.token.push(char::from(byte));
            self.len += 1;
        }
    }

    fn finish(&mut self, tokens: &mut Tokens) -> Result<(), Error> {
        let token = core::mem::take(&mut self.token);
        self.len = 0;
        tokens.push(token).map_err(|_| Error::InvalidParameters)
    }
}
