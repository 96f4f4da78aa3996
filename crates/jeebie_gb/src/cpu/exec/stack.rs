use crate::cpu::decode::StackReg16;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, rr: StackReg16) -> u32 {
        let value = self.stack_reg16(rr);
        self.push_u16(bus, value);
        16
    }

    /// POP AF drops the low nibble of F.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, rr: StackReg16) -> u32 {
        let value = self.pop_u16(bus);
        self.set_stack_reg16(rr, value);
        12
    }
}
