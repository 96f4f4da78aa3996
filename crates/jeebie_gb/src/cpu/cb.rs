use crate::bit;

use super::decode::{CbInstruction, EXTENDED};
use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Handle CB-prefixed instructions (bit operations, shifts, and rotates).
    ///
    /// The 0xCB byte has already been consumed; the cost returned includes
    /// it.
    pub(super) fn step_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let cb = self.read_imm8(bus);
        self.last_opcode = 0xCB00 | cb as u16;

        let instr = EXTENDED[cb as usize];
        log::trace!("GB CPU cb: pc=0x{:04X} {}", self.regs.pc.wrapping_sub(2), instr);

        match instr {
            CbInstruction::Shift(op, target) => {
                let value = self.read_operand(bus, target);
                let result = self.alu_shift(op, value);
                self.write_operand(bus, target, result);
                if target.is_memory() { 16 } else { 8 }
            }
            CbInstruction::Bit(index, target) => {
                let value = self.read_operand(bus, target);
                self.set_flag(Flag::Z, !bit::is_set(index, value));
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
                // BIT (HL) only reads memory.
                if target.is_memory() { 12 } else { 8 }
            }
            CbInstruction::Res(index, target) => {
                let value = self.read_operand(bus, target);
                self.write_operand(bus, target, bit::clear(index, value));
                if target.is_memory() { 16 } else { 8 }
            }
            CbInstruction::Set(index, target) => {
                let value = self.read_operand(bus, target);
                self.write_operand(bus, target, bit::set(index, value));
                if target.is_memory() { 16 } else { 8 }
            }
        }
    }
}
