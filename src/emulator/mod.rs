//! The fetch-decode-execute loop driving the machine.

pub mod instruction;
pub mod opcodes;
pub mod trap_routines;

#[cfg(test)]
pub mod test_helpers;

use crate::errors::{ExecutionError, LoadImageError};
use crate::hardware::keyboard::{KeyboardInput, TerminalInput};
use crate::hardware::memory::Memory;
use crate::hardware::registers::Registers;
use crate::image;
use crate::image::Image;
use instruction::{Instruction, OpCode};
use log::trace;
use std::io::{Stdout, Write, stdout};
use std::ops::ControlFlow;
use std::path::Path;

/// The public facing emulator used to run LC-3 programs.
///
/// Generic over the keyboard input source and the console output sink so
/// the same machine runs against the host terminal or against test doubles.
pub struct Emulator<I: KeyboardInput, W: Write> {
    pub(crate) memory: Memory<I>,
    pub(crate) registers: Registers,
    pub(crate) output: W,
}

impl<I: KeyboardInput, W: Write> Emulator<I, W> {
    pub fn new(keyboard: I, output: W) -> Self {
        Self {
            memory: Memory::new(keyboard),
            registers: Registers::new(),
            output,
        }
    }

    /// Places a decoded image at its origin address.
    ///
    /// # Errors
    /// - the payload runs past the end of memory
    pub fn load_image(&mut self, image: &Image) -> Result<(), LoadImageError> {
        self.memory.load_image(image.origin, &image.words)
    }

    /// Runs the fetch-decode-execute loop until the HALT trap fires.
    ///
    /// # Errors
    /// - the program reached a reserved or unsupported opcode or an unknown
    ///   trap routine
    /// - console I/O failed or the host interrupted
    pub fn execute(&mut self) -> Result<(), ExecutionError> {
        while self.step()?.is_continue() {}
        Ok(())
    }

    /// Fetches, decodes and executes a single instruction.
    ///
    /// The PC is incremented past the instruction before the handler runs,
    /// so PC-relative offsets are relative to the next instruction.
    ///
    /// # Errors
    /// - see [`Emulator::execute`]
    pub fn step(&mut self) -> Result<ControlFlow<()>, ExecutionError> {
        let fetch_address = self.registers.pc();
        let bits = self.memory.read(fetch_address)?;
        self.registers.inc_pc();
        let instruction = Instruction::from(bits);
        trace!("{fetch_address:#06X}: {instruction:?}");

        let Self {
            memory,
            registers,
            output,
        } = self;
        match instruction.opcode() {
            OpCode::Br => opcodes::br(instruction, registers),
            OpCode::Add => opcodes::add(instruction, registers),
            OpCode::Ld => opcodes::ld(instruction, registers, memory)?,
            OpCode::St => opcodes::st(instruction, registers, memory),
            OpCode::Jsr => opcodes::jsr(instruction, registers),
            OpCode::And => opcodes::and(instruction, registers),
            OpCode::Ldr => opcodes::ldr(instruction, registers, memory)?,
            OpCode::Str => opcodes::str(instruction, registers, memory),
            OpCode::Rti => {
                return Err(ExecutionError::UnsupportedInstructionFound(
                    OpCode::Rti as u8,
                ));
            }
            OpCode::Not => opcodes::not(instruction, registers),
            OpCode::Ldi => opcodes::ldi(instruction, registers, memory)?,
            OpCode::Sti => opcodes::sti(instruction, registers, memory)?,
            OpCode::Jmp => opcodes::jmp(instruction, registers),
            OpCode::Res => {
                return Err(ExecutionError::ReservedInstructionFound(OpCode::Res as u8));
            }
            OpCode::Lea => opcodes::lea(instruction, registers),
            OpCode::Trap => {
                return trap_routines::dispatch(instruction, registers, memory, output);
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// Builds a terminal-backed emulator with all given images loaded.
///
/// # Errors
/// - an image cannot be read, is malformed or does not fit into memory
pub fn from_image_files<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Emulator<TerminalInput, Stdout>, LoadImageError> {
    let mut emu = Emulator::new(TerminalInput::new(), stdout());
    for path in paths {
        let image = image::read_image(path.as_ref())?;
        emu.load_image(&image)?;
    }
    Ok(emu)
}
