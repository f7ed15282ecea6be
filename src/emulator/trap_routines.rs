//! This code does emulate the trap routines but does not implement them via
//! the opcodes of the LC-3 but directly.
//!
//! In the real system the code for these routines is at the target of the
//! [Trap Vector Tables](https://cs131.info/Assembly/Instructions/TRAPRoutines.html#trap-vector-table).
//!
//! The trap entry does not link PC into R7: these host-side routines never
//! return through `RET`.

use crate::emulator::instruction::Instruction;
use crate::errors::ExecutionError;
use crate::hardware::keyboard::KeyboardInput;
use crate::hardware::memory::{Memory, MemoryMappedIo};
use crate::hardware::registers::{Registers, from_binary};
use crate::terminal;
use crate::terminal::EchoOptions;
use std::io::Write;
use std::ops::ControlFlow;
use std::thread::sleep;
use std::time::Duration;

const TRAP_GETC: u16 = 0x20; // get character from keyboard, not echoed onto the terminal
const TRAP_OUT: u16 = 0x21; // output a character
const TRAP_PUTS: u16 = 0x22; // output a word string
const TRAP_IN: u16 = 0x23; // get character from keyboard, echoed onto the terminal
const TRAP_PUTSP: u16 = 0x24; // output a byte string
const TRAP_HALT: u16 = 0x25; // halt the program

/// Pause between two keyboard status probes while a trap blocks for input.
const KEY_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs the trap routine selected by the low byte of the instruction word.
///
/// # Errors
/// - the service number is not one of the six recognized routines
/// - console I/O failed or the host interrupted
pub fn dispatch<I: KeyboardInput>(
    i: Instruction,
    regs: &mut Registers,
    memory: &mut Memory<I>,
    stdout: &mut impl Write,
) -> Result<ControlFlow<()>, ExecutionError> {
    match i.trap_vector() {
        TRAP_GETC => get_c(regs, memory, stdout)?,
        TRAP_OUT => out(regs, stdout)?,
        TRAP_PUTS => put_s(regs, memory, stdout)?,
        TRAP_IN => in_trap(regs, memory, stdout)?,
        TRAP_PUTSP => put_sp(regs, memory, stdout)?,
        TRAP_HALT => return halt(stdout),
        unknown => return Err(ExecutionError::UnknownTrapRoutine(unknown)),
    }
    Ok(ControlFlow::Continue(()))
}

/// Blocks until the keyboard latch reports a byte, then stores it into R0.
///
/// The probe goes through the KBSR read so the device semantics stay in one
/// place; between two empty probes the loop sleeps briefly.
fn read_character_from_console<I: KeyboardInput>(
    regs: &mut Registers,
    memory: &mut Memory<I>,
    eo: EchoOptions,
    stdout: &mut impl Write,
) -> Result<(), ExecutionError> {
    loop {
        if memory.read(MemoryMappedIo::Kbsr as u16)? != 0 {
            let byte = memory.read(MemoryMappedIo::Kbdr as u16)? & 0xFF;
            regs.set(0, from_binary(byte));
            if eo == EchoOptions::EchoOn {
                terminal::write_bytes(stdout, &[byte as u8])?;
            }
            return Ok(());
        }
        sleep(KEY_POLL_INTERVAL);
    }
}

/// GETC: Read a single character from the keyboard. The character is not
/// echoed onto the console.
///
/// Its ASCII code is copied into R0. The high eight bits of R0 are cleared.
/// The condition register is left untouched.
pub fn get_c<I: KeyboardInput>(
    regs: &mut Registers,
    memory: &mut Memory<I>,
    stdout: &mut impl Write,
) -> Result<(), ExecutionError> {
    read_character_from_console(regs, memory, EchoOptions::EchoOff, stdout)
}

/// IN: Print a prompt on the screen and read a single character echoed back
/// from the keyboard.
///
/// Otherwise, like 0x20 GETC.
pub fn in_trap<I: KeyboardInput>(
    regs: &mut Registers,
    memory: &mut Memory<I>,
    stdout: &mut impl Write,
) -> Result<(), ExecutionError> {
    terminal::print(stdout, "Input: ")?;
    read_character_from_console(regs, memory, EchoOptions::EchoOn, stdout)
}

/// OUT: Write the character in R0\[7:0\] to the console display.
pub fn out(regs: &Registers, stdout: &mut impl Write) -> Result<(), ExecutionError> {
    let byte = (regs.get(0).as_binary() & 0xFF) as u8;
    terminal::write_bytes(stdout, &[byte])?;
    Ok(())
}

fn put_one_byte_per_word(word: u16, append_to: &mut Vec<u8>) {
    append_to.push((word & 0xFF) as u8);
}

fn put_two_bytes_per_word(word: u16, append_to: &mut Vec<u8>) {
    append_to.push((word & 0xFF) as u8);
    let high = (word >> 8) as u8;
    if high != 0 {
        append_to.push(high);
    }
}

fn put<I: KeyboardInput>(
    regs: &Registers,
    memory: &mut Memory<I>,
    stdout: &mut impl Write,
    handle_word: fn(u16, &mut Vec<u8>),
) -> Result<(), ExecutionError> {
    let mut address = regs.get(0).as_binary();
    let mut output = Vec::with_capacity(120);
    loop {
        let word = memory.read(address)?;
        if word == 0 {
            break;
        }
        handle_word(word, &mut output);
        address = address.wrapping_add(1);
    }
    terminal::write_bytes(stdout, &output)?;
    Ok(())
}

/// PUTS: print the null-delimited word string starting at the address in R0.
/// Each word holds one character in its low byte.
pub fn put_s<I: KeyboardInput>(
    regs: &Registers,
    memory: &mut Memory<I>,
    stdout: &mut impl Write,
) -> Result<(), ExecutionError> {
    put(regs, memory, stdout, put_one_byte_per_word)
}

/// PUTSP: Packed version of PUTS
///
/// The ASCII code contained in bits \[7:0\] of a memory location is written
/// to the console first. The second character of the last memory location
/// can be 0x00. Writing terminates with a 0x0000 word.
pub fn put_sp<I: KeyboardInput>(
    regs: &Registers,
    memory: &mut Memory<I>,
    stdout: &mut impl Write,
) -> Result<(), ExecutionError> {
    put(regs, memory, stdout, put_two_bytes_per_word)
}

/// HALT: announce the stop on stdout and break the fetch loop.
pub fn halt(stdout: &mut impl Write) -> Result<ControlFlow<()>, ExecutionError> {
    terminal::print(stdout, "HALT\n")?;
    Ok(ControlFlow::Break(()))
}
