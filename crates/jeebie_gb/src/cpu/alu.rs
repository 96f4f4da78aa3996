use crate::bit;

use super::decode::{AluOp, ShiftOp};
use super::{Cpu, Flag};

impl Cpu {
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.alu_add(value, false),
            AluOp::Adc => self.alu_add(value, true),
            AluOp::Sub => self.alu_sub(value, false),
            AluOp::Sbc => self.alu_sub(value, true),
            AluOp::And => self.alu_and(value),
            AluOp::Xor => self.alu_xor(value),
            AluOp::Or => self.alu_or(value),
            AluOp::Cp => self.alu_cp(value),
        }
    }

    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true).
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = use_carry && self.get_flag(Flag::C);

        let (partial, carry1) = bit::checked_add(a, value);
        let (result, carry2) = bit::checked_add(partial, carry_in as u8);

        self.regs.a = result;
        self.set_flags(
            result == 0,
            false,
            bit::half_carry_add(a, value, carry_in),
            carry1 || carry2,
        );
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true).
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.sub_flags(value, use_carry && self.get_flag(Flag::C));
        self.regs.a = result;
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_flags(value, false);
    }

    fn sub_flags(&mut self, value: u8, borrow_in: bool) -> u8 {
        let a = self.regs.a;
        let (partial, borrow1) = bit::checked_sub(a, value);
        let (result, borrow2) = bit::checked_sub(partial, borrow_in as u8);

        self.set_flags(
            result == 0,
            true,
            bit::half_borrow_sub(a, value, borrow_in),
            borrow1 || borrow2,
        );
        result
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;
        self.set_flags(result == 0, false, true, false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;
        self.set_flags(result == 0, false, false, false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;
        self.set_flags(result == 0, false, false, false);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H, N and A to compute a correction value. Updates A, Z, H, C;
    /// leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flag::N) {
            // After an addition.
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            // After a subtraction.
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flag::C, adjust >= 0x60);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// 8-bit increment used by INC r and INC (HL). C is left unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let (result, _) = bit::checked_add(value, 1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, bit::half_carry_add(value, 1, false));
        result
    }

    /// 8-bit decrement used by DEC r and DEC (HL). C is left unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let (result, _) = bit::checked_sub(value, 1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, bit::half_borrow_sub(value, 1, false));
        result
    }

    /// `ADD HL,rr`: Z is unaffected, N cleared, H and C from bits 11 and 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, (hl as u32) + (value as u32) > 0xFFFF);

        self.regs.set_hl(result);
    }

    /// Signed 8-bit offset added to a 16-bit base (ADD SP,r8 and
    /// LD HL,SP+r8).
    ///
    /// Z and N are cleared; H and C come from the unsigned addition of the
    /// low byte.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        let (_, carry) = bit::checked_add(bit::low(base), imm8);
        self.set_flags(false, false, bit::half_carry_add(bit::low(base), imm8, false), carry);
        base.wrapping_add(offset)
    }

    /// Rotates and shifts shared by the CB table. Z follows the result.
    pub(super) fn alu_shift(&mut self, op: ShiftOp, value: u8) -> u8 {
        let carry_flag = self.get_flag(Flag::C);
        let (result, carry) = match op {
            ShiftOp::Rlc => (value.rotate_left(1), bit::is_set(7, value)),
            ShiftOp::Rrc => (value.rotate_right(1), bit::is_set(0, value)),
            ShiftOp::Rl => ((value << 1) | carry_flag as u8, bit::is_set(7, value)),
            ShiftOp::Rr => ((value >> 1) | ((carry_flag as u8) << 7), bit::is_set(0, value)),
            ShiftOp::Sla => (value << 1, bit::is_set(7, value)),
            ShiftOp::Sra => ((value >> 1) | (value & 0x80), bit::is_set(0, value)),
            ShiftOp::Swap => (value.rotate_left(4), false),
            ShiftOp::Srl => (value >> 1, bit::is_set(0, value)),
        };
        self.set_flags(result == 0, false, false, carry);
        result
    }
}
