use crate::cpu::decode::{AluOp, Operand8, Reg16, ShiftOp};
use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    pub(super) fn exec_alu_operand<B: Bus>(&mut self, bus: &mut B, op: AluOp, src: Operand8) -> u32 {
        let value = self.read_operand(bus, src);
        self.alu(op, value);
        if src.is_memory() { 8 } else { 4 }
    }

    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, op: AluOp) -> u32 {
        let value = self.read_imm8(bus);
        self.alu(op, value);
        8
    }

    /// RLCA, RRCA, RLA and RRA. Unlike their CB counterparts these always
    /// clear Z.
    pub(super) fn exec_rotate_a(&mut self, op: ShiftOp) -> u32 {
        self.regs.a = self.alu_shift(op, self.regs.a);
        self.set_flag(Flag::Z, false);
        4
    }

    pub(super) fn exec_add_hl_rr(&mut self, rr: Reg16) -> u32 {
        let value = self.reg16(rr);
        self.alu_add16_hl(value);
        8
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.read_imm8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        16
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::H, true);
        self.set_flag(Flag::N, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.set_flag(Flag::C, true);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::C, !carry);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::N, false);
        4
    }
}
