use crate::numbers;
use std::fmt::{Debug, Formatter};

/// The sixteen LC-3 opcodes, selected by bits 15..12 of the instruction
/// word. Declaration order matches the nibble values, so a variant cast to
/// `u8` yields its encoding.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpCode {
    Br,
    Add,
    Ld,
    St,
    Jsr,
    And,
    Ldr,
    Str,
    Rti,
    Not,
    Ldi,
    Sti,
    Jmp,
    Res,
    Lea,
    Trap,
}

/// Wrapper for an LC-3 `u16` instruction word with accessors for the
/// operand fields the opcodes use.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Instruction(u16);

impl Instruction {
    /// Gives the value of only the specified bit range.
    ///
    /// # Parameters
    /// - `from`: starting index
    /// - `to`: end index (inclusive), must be greater or equal to `from`
    ///
    /// # Panics
    /// - asserts that to is greater or equal from and both are valid indexes
    #[must_use]
    pub fn get_bit_range(self, from: u8, to: u8) -> u16 {
        debug_assert!(
            to >= from,
            "wrong direction of from: {from:?} and to: {to:?}"
        );
        debug_assert!(
            (00..u16::BITS).contains(&u32::from(to)),
            "index: {to:?} to u16 is greater than maximum value {:?}",
            u16::BITS - 1
        );
        (self.0 >> from) & ((0b1 << (to - from + 1)) - 1)
    }
    /// Gives the value of only the specified bit range and converts that to u8.
    /// See [`Instruction::get_bit_range()`]
    /// # Panics
    /// - value does not fit into u8 with message from `expect`
    #[must_use]
    pub fn get_bit_range_u8(self, from: u8, to: u8, expect: &str) -> u8 {
        u8::try_from(self.get_bit_range(from, to)).expect(expect)
    }
    #[must_use]
    pub fn get_bit(self, index: u8) -> bool {
        self.get_bit_range(index, index) & 1 != 0
    }
    #[must_use]
    pub fn opcode(self) -> OpCode {
        match self.get_bit_range(12, 15) {
            0b0000 => OpCode::Br,
            0b0001 => OpCode::Add,
            0b0010 => OpCode::Ld,
            0b0011 => OpCode::St,
            0b0100 => OpCode::Jsr,
            0b0101 => OpCode::And,
            0b0110 => OpCode::Ldr,
            0b0111 => OpCode::Str,
            0b1000 => OpCode::Rti,
            0b1001 => OpCode::Not,
            0b1010 => OpCode::Ldi,
            0b1011 => OpCode::Sti,
            0b1100 => OpCode::Jmp,
            0b1101 => OpCode::Res,
            0b1110 => OpCode::Lea,
            0b1111 => OpCode::Trap,
            _ => unreachable!("opcode nibble is masked to four bits"),
        }
    }
    /// Destination register for loads and ALU results; source register for
    /// the store opcodes.
    #[must_use]
    pub fn dr_number(self) -> u8 {
        self.get_bit_range_u8(9, 11, "Error parsing dr")
    }
    /// First source register; doubles as the base register for LDR, STR,
    /// JMP and the register variant of JSR.
    #[must_use]
    pub fn sr1_number(self) -> u8 {
        self.get_bit_range_u8(6, 8, "Error parsing sr1")
    }
    #[must_use]
    pub fn sr2_number(self) -> u8 {
        self.get_bit_range_u8(0, 2, "Error parsing sr2")
    }
    #[must_use]
    pub fn is_immediate(self) -> bool {
        self.get_bit(5)
    }
    /// Sign extended imm5 operand of ADD and AND.
    #[must_use]
    pub fn get_immediate(self) -> u16 {
        numbers::sign_extend(self.get_bit_range(0, 4), 5)
    }
    /// Sign extended offset in the low `len` bits, ready for wrapping
    /// addition to the PC or a base register.
    #[must_use]
    pub fn offset(self, len: u8) -> u16 {
        numbers::sign_extend(self.get_bit_range(0, len - 1), len)
    }
    /// Service number of a TRAP instruction.
    #[must_use]
    pub fn trap_vector(self) -> u16 {
        self.get_bit_range(0, 7)
    }
}

impl Debug for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {:#018b}", self.opcode(), self.0)
    }
}

impl From<u16> for Instruction {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::*;

    #[gtest]
    pub fn test_instr_get_bit_range_valid() {
        let sut = Instruction::from(0b1010_101_001010101);
        expect_that!(sut.opcode(), eq(OpCode::Ldi));
        expect_that!(sut.dr_number(), eq(0b101));
        expect_that!(sut.offset(9), eq(0b0_0101_0101));

        // Add: DR: 3, SR1: 2, Immediate: false, SR2: 1
        let sut = Instruction::from(0b0001_011_010_0_00_001);
        expect_that!(sut.opcode(), eq(OpCode::Add));
        expect_that!(sut.dr_number(), eq(3));
        expect_that!(sut.sr1_number(), eq(2));
        expect_that!(sut.sr2_number(), eq(1));
        expect_that!(sut.is_immediate(), eq(false));

        // Add: DR: 7, SR1: 0, Immediate: true, imm5: 14
        let sut = Instruction::from(0b0001_111_000_1_01110);
        expect_that!(sut.opcode(), eq(OpCode::Add));
        expect_that!(sut.dr_number(), eq(7));
        expect_that!(sut.sr1_number(), eq(0));
        expect_that!(sut.is_immediate(), eq(true));
        expect_that!(sut.get_immediate(), eq(14));
    }
    #[gtest]
    pub fn test_instr_negative_offsets() {
        // LD - DR: 4, PCoffset9: -0x44
        let sut = Instruction::from(0b0010_100_1_1011_1100);
        expect_that!(sut.opcode(), eq(OpCode::Ld));
        expect_that!(sut.offset(9), eq(0xFFBC));
        expect_that!(0x3045u16.wrapping_add(sut.offset(9)), eq(0x3001));
    }
    #[gtest]
    pub fn test_instr_trap_vector() {
        let sut = Instruction::from(0xF025);
        expect_that!(sut.opcode(), eq(OpCode::Trap));
        expect_that!(sut.trap_vector(), eq(0x25));
    }
    #[gtest]
    pub fn test_opcode_nibble_values() {
        expect_that!(OpCode::Br as u8, eq(0b0000));
        expect_that!(OpCode::Rti as u8, eq(0b1000));
        expect_that!(OpCode::Res as u8, eq(0b1101));
        expect_that!(OpCode::Trap as u8, eq(0b1111));
    }
    #[gtest]
    #[should_panic(expected = "wrong direction of from: 2 and to: 1")]
    pub fn test_instr_get_bit_range_wrong_order() {
        let sut = Instruction::from(0b1010_101_101010101);
        let _ = sut.get_bit_range(2, 1);
    }
    #[gtest]
    #[should_panic(expected = "index: 16 to u16 is greater than maximum value 15")]
    pub fn test_instr_get_bit_range_index_too_large() {
        let sut = Instruction::from(0b1010_101_101010101);
        let _ = sut.get_bit_range(2, 16);
    }
}
