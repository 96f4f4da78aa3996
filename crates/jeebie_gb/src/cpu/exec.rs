mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::decode::Instruction;
use super::{Bus, Cpu};

impl Cpu {
    /// Execute one decoded unprefixed instruction and return its cost in
    /// T-cycles. The opcode byte has already been consumed.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, instr: Instruction) -> u32 {
        use Instruction::*;

        match instr {
            Nop => 4,
            Stop => self.exec_stop(bus),
            Halt => self.exec_halt(bus),
            Di => self.exec_di(),
            Ei => self.exec_ei(),

            LdRrD16(rr) => self.exec_ld_rr_d16(bus, rr),
            LdIndirectA(ind) => self.exec_ld_indirect_a(bus, ind),
            LdAIndirect(ind) => self.exec_ld_a_indirect(bus, ind),
            LdA16Sp => self.exec_ld_a16_sp(bus),
            LdRD8(r) => self.exec_ld_r_d8(bus, r),
            Ld(dst, src) => self.exec_ld_r_r(bus, dst, src),
            LdhA8A => self.exec_ldh_a8_a(bus),
            LdhAA8 => self.exec_ldh_a_a8(bus),
            LdhCA => self.exec_ldh_c_a(bus),
            LdhAC => self.exec_ldh_a_c(bus),
            LdA16A => self.exec_ld_a16_a(bus),
            LdAA16 => self.exec_ld_a_a16(bus),
            LdSpHl => self.exec_ld_sp_hl(),
            LdHlSpR8 => self.exec_ld_hl_sp_r8(bus),

            Inc16(rr) => self.exec_inc16(rr),
            Dec16(rr) => self.exec_dec16(rr),
            Inc8(r) => self.exec_inc8(bus, r),
            Dec8(r) => self.exec_dec8(bus, r),

            RotateA(op) => self.exec_rotate_a(op),
            AddHl(rr) => self.exec_add_hl_rr(rr),
            AddSpR8 => self.exec_add_sp_r8(bus),
            Daa => self.exec_daa(),
            Cpl => self.exec_cpl(),
            Scf => self.exec_scf(),
            Ccf => self.exec_ccf(),
            Alu(op, r) => self.exec_alu_operand(bus, op, r),
            AluD8(op) => self.exec_alu_imm(bus, op),

            Jr => self.jr(bus, true),
            JrCc(cc) => self.jr(bus, self.condition(cc)),
            Jp => self.exec_jp_a16(bus),
            JpCc(cc) => self.jp_cond(bus, self.condition(cc)),
            JpHl => self.exec_jp_hl(),
            Call => self.exec_call_a16(bus),
            CallCc(cc) => self.call_cond(bus, self.condition(cc)),
            Ret => self.exec_ret(bus),
            RetCc(cc) => self.ret_cond(bus, self.condition(cc)),
            Reti => self.exec_reti(bus),
            Rst(vector) => self.exec_rst(bus, vector),
            Push(rr) => self.exec_push(bus, rr),
            Pop(rr) => self.exec_pop(bus, rr),

            Prefix => self.step_cb(bus),
        }
    }
}
