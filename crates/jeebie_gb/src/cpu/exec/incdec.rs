use crate::cpu::decode::{Operand8, Reg16};
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, r: Operand8) -> u32 {
        let value = self.read_operand(bus, r);
        let result = self.alu_inc8(value);
        self.write_operand(bus, r, result);
        if r.is_memory() { 12 } else { 4 }
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, r: Operand8) -> u32 {
        let value = self.read_operand(bus, r);
        let result = self.alu_dec8(value);
        self.write_operand(bus, r, result);
        if r.is_memory() { 12 } else { 4 }
    }

    /// 16-bit INC/DEC leave every flag untouched.
    pub(super) fn exec_inc16(&mut self, rr: Reg16) -> u32 {
        let value = self.reg16(rr).wrapping_add(1);
        self.set_reg16(rr, value);
        8
    }

    pub(super) fn exec_dec16(&mut self, rr: Reg16) -> u32 {
        let value = self.reg16(rr).wrapping_sub(1);
        self.set_reg16(rr, value);
        8
    }
}
