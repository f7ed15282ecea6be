//! The LC-3 register file: eight general purpose registers, the program
//! counter and the condition register.

use std::fmt::{Debug, Formatter};

/// Address the program counter points at before the first instruction.
pub const PC_START: u16 = 0x3000;

/// A single 16-bit register value with a binary (`u16`) and a two's
/// complement decimal (`i16`) view.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Register(u16);
impl Register {
    pub const fn as_binary(self) -> u16 {
        self.0
    }
    pub const fn as_decimal(self) -> i16 {
        self.0.cast_signed()
    }
}
impl Debug for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:#06X} {:#018b} {})",
            self.0,
            self.0,
            self.as_decimal()
        )
    }
}
impl From<u16> for Register {
    fn from(value: u16) -> Self {
        Self(value)
    }
}
impl From<Register> for u16 {
    fn from(value: Register) -> Self {
        value.0
    }
}

pub const fn from_binary(value: u16) -> Register {
    Register(value)
}
pub const fn from_decimal(value: i16) -> Register {
    Register(value.cast_unsigned())
}

pub struct Registers {
    general_purpose: [Register; 8],
    pc: Register,
    cond: ConditionFlag,
}
impl Registers {
    pub const fn new() -> Self {
        Self {
            general_purpose: [Register(0); 8],
            pc: Register(PC_START),
            cond: ConditionFlag::Zero,
        }
    }
    pub const fn pc(&self) -> u16 {
        self.pc.0
    }
    /// Advances the program counter past the fetched instruction.
    /// Arithmetic on the PC wraps modulo 2^16.
    pub fn inc_pc(&mut self) {
        self.pc = Register(self.pc.0.wrapping_add(1));
    }
    pub fn set_pc(&mut self, val: u16) {
        self.pc = Register(val);
    }
    pub fn get(&self, r: u8) -> Register {
        debug_assert!(r <= 7, "Invalid general purpose register get");
        self.general_purpose[usize::from(r)]
    }
    pub fn set(&mut self, r: u8, value: Register) {
        debug_assert!(r <= 7, "Invalid general purpose register set");
        self.general_purpose[usize::from(r)] = value;
    }
    pub const fn get_conditional_register(&self) -> ConditionFlag {
        self.cond
    }
    /// Derives the condition flag from the register that was written last.
    /// Exactly one of the three flags is set afterwards.
    pub fn update_conditional_register(&mut self, r: u8) {
        let val = self.get(r);
        self.cond = ConditionFlag::from(val);
    }
}
impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
impl Debug for Registers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, val) in self.general_purpose.iter().enumerate() {
            writeln!(f, "R{index}:   {val:?}")?;
        }
        writeln!(f)?;
        writeln!(f, "PC:   {:?}", self.pc)?;
        writeln!(f, "Cond: {:?}", self.cond)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionFlag {
    Pos = 1 << 0, // Positive
    Zero = 1 << 1,
    Neg = 1 << 2, // Negative
}
impl From<Register> for ConditionFlag {
    fn from(value: Register) -> Self {
        if value.0 == 0 {
            Self::Zero
        } else if value.0 >> 15 == 1 {
            // leftmost bit is 1 for negative numbers in two's complement
            Self::Neg
        } else {
            Self::Pos
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::*;

    #[gtest]
    pub fn test_initial_state() {
        let regs = Registers::new();
        expect_that!(regs.pc(), eq(PC_START));
        expect_that!(regs.get_conditional_register(), eq(ConditionFlag::Zero));
    }
    #[gtest]
    pub fn test_pc_wraps_around() {
        let mut regs = Registers::new();
        regs.set_pc(0xFFFF);
        regs.inc_pc();
        expect_that!(regs.pc(), eq(0));
    }
    #[gtest]
    pub fn test_update_conditional_register() {
        let mut regs = Registers::new();
        regs.set(3, from_decimal(17));
        regs.update_conditional_register(3);
        expect_that!(regs.get_conditional_register(), eq(ConditionFlag::Pos));

        regs.set(3, from_decimal(-17));
        regs.update_conditional_register(3);
        expect_that!(regs.get_conditional_register(), eq(ConditionFlag::Neg));

        regs.set(3, from_binary(0));
        regs.update_conditional_register(3);
        expect_that!(regs.get_conditional_register(), eq(ConditionFlag::Zero));
    }
    #[gtest]
    pub fn test_register_views() {
        let r = from_decimal(-128);
        expect_that!(r.as_binary(), eq(0b1111_1111_1000_0000));
        expect_that!(r.as_decimal(), eq(-128));
    }
}
