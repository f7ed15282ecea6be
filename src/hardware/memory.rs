//! The LC-3 address space including the memory mapped keyboard device.

use crate::errors::{ExecutionError, LoadImageError};
use crate::hardware::keyboard::KeyboardInput;

/// Number of addressable 16-bit words.
const MEMORY_SIZE: usize = 1 << 16;

/// Addresses bound to device behavior instead of plain storage.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MemoryMappedIo {
    /// Keyboard status register; bit 15 signals a pending key.
    Kbsr = 0xFE00,
    /// Keyboard data register; holds the latest latched key byte.
    Kbdr = 0xFE02,
}

/// 65,536 words of word-addressed storage plus the keyboard device.
///
/// The keyboard is latched on demand: only a read of [`MemoryMappedIo::Kbsr`]
/// consults the input provider, which matches guest programs that spin on
/// the status register.
pub struct Memory<I> {
    /// Index equals memory address
    data: Vec<u16>,
    keyboard: I,
}

impl<I: KeyboardInput> Memory<I> {
    pub fn new(keyboard: I) -> Self {
        Self {
            data: vec![0x0u16; MEMORY_SIZE],
            keyboard,
        }
    }

    /// Reads one word.
    ///
    /// A read of KBSR first refreshes the keyboard latch: with a pending
    /// keystroke the KBSR cell becomes `0x8000` and the KBDR cell receives
    /// the byte, otherwise KBSR becomes `0x0000`. All other addresses are
    /// plain array accesses.
    ///
    /// # Errors
    /// - console I/O failed or the host interrupted while polling
    pub fn read(&mut self, address: u16) -> Result<u16, ExecutionError> {
        if address == MemoryMappedIo::Kbsr as u16 {
            if self.keyboard.poll()? {
                // poll latched the byte, so this read cannot block
                let byte = self.keyboard.read_byte()?;
                self.data[MemoryMappedIo::Kbsr as usize] = 1 << 15;
                self.data[MemoryMappedIo::Kbdr as usize] = u16::from(byte);
            } else {
                self.data[MemoryMappedIo::Kbsr as usize] = 0;
            }
        }
        Ok(self.data[usize::from(address)])
    }

    /// Writes one word. Stores to the device addresses are permitted but
    /// carry no device semantics.
    pub fn write(&mut self, address: u16, value: u16) {
        self.data[usize::from(address)] = value;
    }

    /// Copies an image payload to consecutive addresses starting at `origin`.
    ///
    /// # Errors
    /// - the payload would run past the last address
    pub fn load_image(&mut self, origin: u16, words: &[u16]) -> Result<(), LoadImageError> {
        let start = usize::from(origin);
        if start + words.len() > MEMORY_SIZE {
            return Err(LoadImageError::ImageTooLong {
                origin,
                words: words.len(),
            });
        }
        self.data[start..start + words.len()].copy_from_slice(words);
        Ok(())
    }
}
