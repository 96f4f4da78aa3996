use crate::bit;

use super::decode::{Condition, Operand8, Reg16, StackReg16};
use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Read an 8-bit register or (HL).
    #[inline]
    pub(super) fn read_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand8) -> u8 {
        match operand {
            Operand8::B => self.regs.b,
            Operand8::C => self.regs.c,
            Operand8::D => self.regs.d,
            Operand8::E => self.regs.e,
            Operand8::H => self.regs.h,
            Operand8::L => self.regs.l,
            Operand8::HlIndirect => bus.read8(self.regs.hl()),
            Operand8::A => self.regs.a,
        }
    }

    /// Write an 8-bit register or (HL).
    #[inline]
    pub(super) fn write_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand8, value: u8) {
        match operand {
            Operand8::B => self.regs.b = value,
            Operand8::C => self.regs.c = value,
            Operand8::D => self.regs.d = value,
            Operand8::E => self.regs.e = value,
            Operand8::H => self.regs.h = value,
            Operand8::L => self.regs.l = value,
            Operand8::HlIndirect => bus.write8(self.regs.hl(), value),
            Operand8::A => self.regs.a = value,
        }
    }

    pub(super) fn reg16(&self, rr: Reg16) -> u16 {
        match rr {
            Reg16::Bc => self.regs.bc(),
            Reg16::De => self.regs.de(),
            Reg16::Hl => self.regs.hl(),
            Reg16::Sp => self.regs.sp,
        }
    }

    pub(super) fn set_reg16(&mut self, rr: Reg16, value: u16) {
        match rr {
            Reg16::Bc => self.regs.set_bc(value),
            Reg16::De => self.regs.set_de(value),
            Reg16::Hl => self.regs.set_hl(value),
            Reg16::Sp => self.regs.sp = value,
        }
    }

    pub(super) fn stack_reg16(&self, rr: StackReg16) -> u16 {
        match rr {
            StackReg16::Bc => self.regs.bc(),
            StackReg16::De => self.regs.de(),
            StackReg16::Hl => self.regs.hl(),
            StackReg16::Af => self.regs.af(),
        }
    }

    pub(super) fn set_stack_reg16(&mut self, rr: StackReg16, value: u16) {
        match rr {
            StackReg16::Bc => self.regs.set_bc(value),
            StackReg16::De => self.regs.set_de(value),
            StackReg16::Hl => self.regs.set_hl(value),
            StackReg16::Af => self.regs.set_af(value),
        }
    }

    #[inline]
    pub(super) fn condition(&self, cc: Condition) -> bool {
        match cc {
            Condition::Nz => !self.get_flag(Flag::Z),
            Condition::Z => self.get_flag(Flag::Z),
            Condition::Nc => !self.get_flag(Flag::C),
            Condition::C => self.get_flag(Flag::C),
        }
    }

    /// Fetch the opcode byte at PC.
    ///
    /// After the HALT bug the first fetch does not advance PC, so the byte
    /// following HALT is read twice.
    #[inline]
    pub(super) fn fetch_opcode<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        if self.halt_bug {
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    /// Immediate byte at PC (`n`), without advancing.
    #[inline]
    pub fn peek_imm8<B: Bus>(&self, bus: &mut B) -> u8 {
        bus.read8(self.regs.pc)
    }

    /// Little-endian immediate word at PC (`nn`), without advancing.
    #[inline]
    pub fn peek_imm16<B: Bus>(&self, bus: &mut B) -> u16 {
        let low = bus.read8(self.regs.pc);
        let high = bus.read8(self.regs.pc.wrapping_add(1));
        bit::combine(low, high)
    }

    /// Signed immediate byte at PC, used by relative jumps.
    #[inline]
    pub fn peek_signed_imm8<B: Bus>(&self, bus: &mut B) -> i8 {
        self.peek_imm8(bus) as i8
    }

    #[inline]
    pub(super) fn read_imm8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let n = self.peek_imm8(bus);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        n
    }

    #[inline]
    pub(super) fn read_imm16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let nn = self.peek_imm16(bus);
        self.regs.pc = self.regs.pc.wrapping_add(2);
        nn
    }

    #[inline]
    pub(super) fn read_signed_imm8<B: Bus>(&mut self, bus: &mut B) -> i8 {
        let n = self.peek_signed_imm8(bus);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        n
    }

    /// Push a word: high byte first, SP pre-decremented for each byte, so
    /// memory[SP] = low and memory[SP+1] = high afterwards.
    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, bit::high(value));
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, bit::low(value));
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let low = bus.read8(self.regs.sp);
        let high = bus.read8(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        bit::combine(low, high)
    }

    /// Relative jump used by JR/JR cc. The offset is relative to the address
    /// following the operand.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let offset = self.read_signed_imm8(bus);
        if cond {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
            12
        } else {
            8
        }
    }

    pub(super) fn jp_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.read_imm16(bus);
        if cond {
            self.regs.pc = addr;
            16
        } else {
            12
        }
    }

    pub(super) fn call_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        let addr = self.read_imm16(bus);
        if cond {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
            24
        } else {
            12
        }
    }

    pub(super) fn ret_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) -> u32 {
        if cond {
            self.regs.pc = self.pop_u16(bus);
            20
        } else {
            8
        }
    }
}
