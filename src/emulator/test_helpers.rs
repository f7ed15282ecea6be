//! Test doubles: an emulator wired to an input channel and a capturing
//! output writer.

use crate::emulator::Emulator;
use crate::errors::ExecutionError;
use crate::hardware::keyboard::ChannelInput;
use crate::hardware::memory::Memory;
use crate::hardware::registers::Registers;
use std::io;
use std::io::Write;
use std::ops::ControlFlow;
use std::sync::mpsc;

pub struct StringWriter {
    vec: Vec<u8>,
}
impl Write for StringWriter {
    fn write(&mut self, data: &[u8]) -> Result<usize, io::Error> {
        self.vec.write(data)
    }
    fn flush(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}
impl StringWriter {
    pub fn new() -> Self {
        let vec = Vec::<u8>::with_capacity(120);
        Self { vec }
    }
    pub fn get_string(&self) -> String {
        String::from_utf8(self.vec.clone()).unwrap()
    }
}

/// An [`Emulator`] with its program preloaded, keyboard input typed through
/// a channel and console output captured in a [`StringWriter`].
pub struct FakeEmulator {
    inner: Emulator<ChannelInput, StringWriter>,
    keyboard: mpsc::Sender<u8>,
}
impl FakeEmulator {
    pub fn new(origin: u16, words: &[u16]) -> Self {
        let (keyboard, receiver) = mpsc::channel();
        let mut inner = Emulator::new(ChannelInput::new(receiver), StringWriter::new());
        inner.memory.load_image(origin, words).unwrap();
        Self { inner, keyboard }
    }
    /// Queues keyboard bytes the guest will see in order.
    pub fn type_str(&self, input: &str) {
        for byte in input.bytes() {
            self.keyboard.send(byte).unwrap();
        }
    }
    pub fn get_parts(&mut self) -> (&mut Registers, &mut Memory<ChannelInput>, &mut StringWriter) {
        (
            &mut self.inner.registers,
            &mut self.inner.memory,
            &mut self.inner.output,
        )
    }
    pub fn execute(&mut self) -> Result<(), ExecutionError> {
        self.inner.execute()
    }
    pub fn step(&mut self) -> Result<ControlFlow<()>, ExecutionError> {
        self.inner.step()
    }
    pub fn registers(&mut self) -> &mut Registers {
        &mut self.inner.registers
    }
    pub fn memory(&mut self) -> &mut Memory<ChannelInput> {
        &mut self.inner.memory
    }
    pub fn output(&self) -> String {
        self.inner.output.get_string()
    }
}
