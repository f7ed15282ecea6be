//! Errors that can occur using this crate.
//!
//! The crate's code is designed in a way that functions/methods _can_ trigger all the enum variants
//! specified in the returned [`Result`]

use displaydoc::Display;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Possible errors while reading a program image from disk.
///
/// Issues are malformed image files or errors during attempts to read them.
/// `Display` and `Debug` provide all necessary details.
#[rustfmt::skip]
#[derive(Display, PartialEq, Eq)]
pub enum LoadImageError {
    /// Image is missing the leading big-endian origin word
    ImageMissingOrigin,
    /// Images must be a whole number of 16-bit words, but is {0} bytes long
    ImageNotEvenSize(u64),
    /// Image payload of {words} words at origin {origin:#06X} runs past the end of memory
    ImageTooLong { origin: u16, words: usize },
    /// Cannot read image from file '{file}': {message}
    ImageNotReadable {
        file: String,
        message: String
    },
}
impl Debug for LoadImageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
impl Error for LoadImageError {}

/// Possible errors during program execution.
///
/// `Display` and `Debug` provide all necessary details.
#[rustfmt::skip]
#[derive(Display, PartialEq, Eq)]
pub enum ExecutionError {
    /// The reserved opcode {0:#06b} was found which is not specified. Most probably an invalid program.
    ReservedInstructionFound(u8),
    /// The privileged opcode {0:#06b} is not supported by this emulator
    UnsupportedInstructionFound(u8),
    /// Unknown trap routine found: {0:#06X}
    UnknownTrapRoutine(u16),
    /// Error during reading Stdin or writing program output to Stdout: {0}
    IOInputOutputError(String),
    /// Execution interrupted from the keyboard
    Interrupted,
}
impl Debug for ExecutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
impl Error for ExecutionError {}

impl From<std::io::Error> for ExecutionError {
    fn from(error: std::io::Error) -> Self {
        Self::IOInputOutputError(error.to_string())
    }
}
