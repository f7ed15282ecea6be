//! Implemented operations for the LC-3.
//!
//! Handlers receive the decoded [`Instruction`] plus the parts of the
//! machine they touch. All additions and address computations wrap modulo
//! 2^16; results are interpreted as two's complement when the condition
//! register is updated.

use crate::emulator::instruction::Instruction;
use crate::errors::ExecutionError;
use crate::hardware::keyboard::KeyboardInput;
use crate::hardware::memory::Memory;
use crate::hardware::registers::{Registers, from_binary};

/// ADD: Mathematical addition in 2 variants
/// - DR is set with result of SR1 + SR2
/// ```text
///  15__12__11_9__8_6___5___4_3__2_0_
/// | 0001 |  DR | SR1 | 0 | 00 | SR2 |
///  ---------------------------------
/// ```
/// - DR is set with result of SR1 + sign extended immediate
/// ```text
///  15__12__11_9__8_6___5___4___0_
/// | 0001 |  DR | SR1 | 1 |  IMM5 |
///  ------------------------------
/// ```
pub fn add(i: Instruction, r: &mut Registers) {
    let operand = if i.is_immediate() {
        i.get_immediate()
    } else {
        r.get(i.sr2_number()).as_binary()
    };
    let result = r.get(i.sr1_number()).as_binary().wrapping_add(operand);
    r.set(i.dr_number(), from_binary(result));
    r.update_conditional_register(i.dr_number());
}

/// AND: bit-wise AND in 2 variants
/// - DR is set with result of SR1 AND SR2
/// ```text
///  15__12__11_9__8_6___5___4_3__2_0_
/// | 0101 |  DR | SR1 | 0 | 00 | SR2 |
///  ---------------------------------
/// ```
/// - DR is set with result of SR1 AND sign extended immediate
/// ```text
///  15__12__11_9__8_6___5___4___0_
/// | 0101 |  DR | SR1 | 1 |  IMM5 |
///  ------------------------------
/// ```
pub fn and(i: Instruction, r: &mut Registers) {
    let operand = if i.is_immediate() {
        i.get_immediate()
    } else {
        r.get(i.sr2_number()).as_binary()
    };
    let result = r.get(i.sr1_number()).as_binary() & operand;
    r.set(i.dr_number(), from_binary(result));
    r.update_conditional_register(i.dr_number());
}

/// NOT: bit-wise complement of the value in SR
/// ```text
///  15__12__11_9__8_6___5___0_
/// | 1001 |  DR |  SR | 11111 |
///  --------------------------
/// ```
pub fn not(i: Instruction, r: &mut Registers) {
    r.set(
        i.dr_number(),
        from_binary(!r.get(i.sr1_number()).as_binary()),
    );
    r.update_conditional_register(i.dr_number());
}

/// BR: Conditional Branch
/// Adds the sign extended offset to PC when one of the set `nzp` bits
/// matches the current condition flag. A mask of 000 never branches, 111
/// always branches. The condition register is left untouched.
/// ```text
///  15__12__11_9___8_______0_
/// | 0000 |  nzp | PCoffset9 |
///  -------------------------
/// ```
pub fn br(i: Instruction, r: &mut Registers) {
    let nzp = i.get_bit_range(9, 11);
    if nzp & r.get_conditional_register() as u16 != 0 {
        r.set_pc(r.pc().wrapping_add(i.offset(9)));
    }
}

/// JMP: Unconditional jump to the address in the base register.
/// RET is the special case with BaseR = R7.
/// ```text
///  15__12__11_9__8___6___5______0_
/// | 1100 | 000 | BaseR | 000000  |
///  -------------------------------
/// ```
pub fn jmp(i: Instruction, r: &mut Registers) {
    r.set_pc(r.get(i.sr1_number()).as_binary());
}

/// JSR/JSRR: Jump to subroutine, linking the return address into R7.
/// - bit 11 set: PC-relative with sign extended 11-bit offset
/// ```text
///  15__12__11___10________0_
/// | 0100 |  1 | PCoffset11 |
///  -------------------------
/// ```
/// - bit 11 clear: target address from the base register
/// ```text
///  15__12__11_10_9__8___6___5_____0_
/// | 0100 |  0 00 | BaseR | 000000  |
///  ---------------------------------
/// ```
pub fn jsr(i: Instruction, r: &mut Registers) {
    r.set(7, from_binary(r.pc()));
    if i.get_bit(11) {
        r.set_pc(r.pc().wrapping_add(i.offset(11)));
    } else {
        r.set_pc(r.get(i.sr1_number()).as_binary());
    }
}

/// LD: Loads content of memory address of PC + sign extended offset into DR.
/// ```text
///  15__12__11_9___8_______0_
/// | 0010 |  DR  | PCoffset9 |
///  -------------------------
/// ```
pub fn ld(
    i: Instruction,
    r: &mut Registers,
    memory: &mut Memory<impl KeyboardInput>,
) -> Result<(), ExecutionError> {
    let value = memory.read(r.pc().wrapping_add(i.offset(9)))?;
    r.set(i.dr_number(), from_binary(value));
    r.update_conditional_register(i.dr_number());
    Ok(())
}

/// LDI: Load indirect.
/// Calculates memory address of PC + sign extended offset and reads another
/// address from there, the content of the memory at that indirectly loaded
/// address is put into DR.
/// ```text
///  15__12__11_9___8_______0_
/// | 1010 |  DR  | PCoffset9 |
///  -------------------------
/// ```
pub fn ldi(
    i: Instruction,
    r: &mut Registers,
    memory: &mut Memory<impl KeyboardInput>,
) -> Result<(), ExecutionError> {
    let value_address = memory.read(r.pc().wrapping_add(i.offset(9)))?;
    let value = memory.read(value_address)?;
    r.set(i.dr_number(), from_binary(value));
    r.update_conditional_register(i.dr_number());
    Ok(())
}

/// LDR: Load address from base register and add sign extended offset to load
/// the memory content from there into DR.
/// ```text
///  15__12__11_9__8___6____5____0_
/// | 0110 |  DR | BaseR | offset6 |
///  ------------------------------
/// ```
pub fn ldr(
    i: Instruction,
    r: &mut Registers,
    memory: &mut Memory<impl KeyboardInput>,
) -> Result<(), ExecutionError> {
    let base = r.get(i.sr1_number()).as_binary();
    let value = memory.read(base.wrapping_add(i.offset(6)))?;
    r.set(i.dr_number(), from_binary(value));
    r.update_conditional_register(i.dr_number());
    Ok(())
}

/// LEA: Load Effective Address loads PC + sign extended offset into DR.
/// ```text
///  15__12__11_9___8_______0_
/// | 1110 |  DR  | PCoffset9 |
///  -------------------------
/// ```
pub fn lea(i: Instruction, r: &mut Registers) {
    r.set(i.dr_number(), from_binary(r.pc().wrapping_add(i.offset(9))));
    r.update_conditional_register(i.dr_number());
}

/// ST: Store. The contents of the SR are written to memory address
/// PC + sign extended offset. The condition register is left untouched.
/// ```text
///  15__12__11_9___8_______0_
/// | 0011 |  SR  | PCoffset9 |
///  -------------------------
/// ```
pub fn st(i: Instruction, r: &Registers, memory: &mut Memory<impl KeyboardInput>) {
    memory.write(
        r.pc().wrapping_add(i.offset(9)),
        r.get(i.dr_number()).as_binary(),
    );
}

/// STI: Store Indirect. The contents of the SR are written to the address
/// which is loaded from memory address PC + sign extended offset.
/// ```text
///  15__12__11_9___8_______0_
/// | 1011 |  SR  | PCoffset9 |
///  -------------------------
/// ```
pub fn sti(
    i: Instruction,
    r: &Registers,
    memory: &mut Memory<impl KeyboardInput>,
) -> Result<(), ExecutionError> {
    let target = memory.read(r.pc().wrapping_add(i.offset(9)))?;
    memory.write(target, r.get(i.dr_number()).as_binary());
    Ok(())
}

/// STR: Store contents of SR to memory address of base register plus sign
/// extended offset.
/// ```text
///  15__12__11_9__8___6____5____0_
/// | 0111 |  SR | BaseR | offset6 |
///  ------------------------------
/// ```
pub fn str(i: Instruction, r: &Registers, memory: &mut Memory<impl KeyboardInput>) {
    let base = r.get(i.sr1_number()).as_binary();
    memory.write(base.wrapping_add(i.offset(6)), r.get(i.dr_number()).as_binary());
}
