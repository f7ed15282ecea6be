//! Keyboard input providers feeding the memory mapped keyboard device.

use crate::errors::ExecutionError;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, poll, read};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

/// Source of guest keyboard bytes.
///
/// `poll` latches the next pending byte, so a status probe followed by a
/// read cannot lose a keystroke.
pub trait KeyboardInput {
    /// Non-blocking probe for a pending keyboard byte.
    fn poll(&mut self) -> Result<bool, ExecutionError>;
    /// Blocking read of one keyboard byte. A byte latched by `poll` is
    /// returned first.
    fn read_byte(&mut self) -> Result<u8, ExecutionError>;
}

/// Keyboard input read from the host terminal via crossterm events.
pub struct TerminalInput {
    pending: Option<u8>,
}
impl TerminalInput {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Maps a terminal event to a guest keyboard byte.
    ///
    /// Raw mode swallows the interrupt signal, so Ctrl+C arrives here as a
    /// key event and is surfaced as [`ExecutionError::Interrupted`].
    fn key_event_byte(event: &Event) -> Result<Option<u8>, ExecutionError> {
        let Some(key) = event.as_key_event() else {
            return Ok(None);
        };
        if matches!(key.kind, KeyEventKind::Release) {
            return Ok(None);
        }
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Err(ExecutionError::Interrupted);
        }
        let byte = match key.code {
            KeyCode::Enter => Some(b'\n'),
            KeyCode::Backspace => Some(0x08),
            KeyCode::Tab => Some(b'\t'),
            KeyCode::Esc => Some(0x1B),
            KeyCode::Char(c) if c.is_ascii() => Some(c as u8),
            _ => None,
        };
        Ok(byte)
    }
}
impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}
impl KeyboardInput for TerminalInput {
    fn poll(&mut self) -> Result<bool, ExecutionError> {
        if self.pending.is_some() {
            return Ok(true);
        }
        // drain non-key events (resize etc.) that poll also reports
        while poll(Duration::from_secs(0))? {
            let event = read()?;
            if let Some(byte) = Self::key_event_byte(&event)? {
                self.pending = Some(byte);
                return Ok(true);
            }
        }
        Ok(false)
    }
    fn read_byte(&mut self) -> Result<u8, ExecutionError> {
        if let Some(byte) = self.pending.take() {
            return Ok(byte);
        }
        loop {
            let event = read()?;
            if let Some(byte) = Self::key_event_byte(&event)? {
                return Ok(byte);
            }
        }
    }
}

/// Keyboard input fed through a channel, for tests and embedding.
pub struct ChannelInput {
    receiver: Receiver<u8>,
    pending: Option<u8>,
}
impl ChannelInput {
    #[must_use]
    pub const fn new(receiver: Receiver<u8>) -> Self {
        Self {
            receiver,
            pending: None,
        }
    }
}
impl KeyboardInput for ChannelInput {
    fn poll(&mut self) -> Result<bool, ExecutionError> {
        if self.pending.is_none() {
            self.pending = match self.receiver.try_recv() {
                Ok(byte) => Some(byte),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    return Err(ExecutionError::IOInputOutputError(
                        "keyboard channel disconnected".into(),
                    ));
                }
            };
        }
        Ok(self.pending.is_some())
    }
    fn read_byte(&mut self) -> Result<u8, ExecutionError> {
        if let Some(byte) = self.pending.take() {
            return Ok(byte);
        }
        self.receiver.recv().map_err(|_| {
            ExecutionError::IOInputOutputError("keyboard channel disconnected".into())
        })
    }
}
