use crate::bit;
use crate::cpu::decode::{Indirect, Operand8, Reg16};
use crate::cpu::{Bus, Cpu};

/// Base of the I/O page addressed by LDH.
const IO_PAGE: u16 = 0xFF00;

impl Cpu {
    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, rr: Reg16) -> u32 {
        let value = self.read_imm16(bus);
        self.set_reg16(rr, value);
        12
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, r: Operand8) -> u32 {
        let value = self.read_imm8(bus);
        self.write_operand(bus, r, value);
        if r.is_memory() { 12 } else { 8 }
    }

    pub(super) fn exec_ld_r_r<B: Bus>(&mut self, bus: &mut B, dst: Operand8, src: Operand8) -> u32 {
        let value = self.read_operand(bus, src);
        self.write_operand(bus, dst, value);
        if dst.is_memory() || src.is_memory() { 8 } else { 4 }
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.read_imm16(bus);
        let sp = self.regs.sp;
        bus.write8(addr, bit::low(sp));
        bus.write8(addr.wrapping_add(1), bit::high(sp));
        20
    }

    /// Resolve the address of an indirect operand, applying the HL
    /// post-increment/decrement.
    fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::Bc => self.regs.bc(),
            Indirect::De => self.regs.de(),
            Indirect::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> u32 {
        let addr = self.indirect_addr(ind);
        bus.write8(addr, self.regs.a);
        8
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, ind: Indirect) -> u32 {
        let addr = self.indirect_addr(ind);
        self.regs.a = bus.read8(addr);
        8
    }

    pub(super) fn exec_ldh_a8_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = IO_PAGE | self.read_imm8(bus) as u16;
        bus.write8(addr, self.regs.a);
        12
    }

    pub(super) fn exec_ldh_a_a8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = IO_PAGE | self.read_imm8(bus) as u16;
        self.regs.a = bus.read8(addr);
        12
    }

    pub(super) fn exec_ldh_c_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        bus.write8(IO_PAGE | self.regs.c as u16, self.regs.a);
        8
    }

    pub(super) fn exec_ldh_a_c<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.a = bus.read8(IO_PAGE | self.regs.c as u16);
        8
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.read_imm16(bus);
        bus.write8(addr, self.regs.a);
        16
    }

    pub(super) fn exec_ld_a_a16<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.read_imm16(bus);
        self.regs.a = bus.read8(addr);
        16
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.read_imm8(bus);
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(result);
        12
    }
}
