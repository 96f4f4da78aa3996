use super::*;
use crate::interrupt::{IE_ADDR, IF_ADDR};

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl TestBus {
    /// Place `program` at `origin`.
    fn load(&mut self, origin: u16, program: &[u8]) {
        let start = origin as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

/// CPU in the post-boot state with `program` at 0x0100.
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let cpu = Cpu::new();
    let mut bus = TestBus::default();
    bus.load(0x0100, program);
    (cpu, bus)
}

fn step(cpu: &mut Cpu, bus: &mut TestBus) -> u32 {
    cpu.step(bus).unwrap()
}

#[test]
fn boots_into_dmg_post_boot_state() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert!(!cpu.ime);
    assert_eq!(cpu.cycles(), 0);
}

#[test]
fn reset_restores_boot_state_and_unlocks() {
    let (mut cpu, mut bus) = setup(&[0x00, 0xD3]);
    step(&mut cpu, &mut bus);
    assert!(cpu.step(&mut bus).is_err());
    assert!(cpu.is_locked());

    cpu.reset();
    assert!(!cpu.is_locked());
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn register_pairs_compose_high_register_first() {
    let mut regs = Registers::default();

    regs.set_bc(0x1234);
    assert_eq!((regs.b, regs.c), (0x12, 0x34));
    assert_eq!(regs.bc(), 0x1234);

    regs.set_de(0xBEEF);
    assert_eq!((regs.d, regs.e), (0xBE, 0xEF));
    assert_eq!(regs.de(), 0xBEEF);

    regs.set_hl(0xC001);
    assert_eq!((regs.h, regs.l), (0xC0, 0x01));
    assert_eq!(regs.hl(), 0xC001);

    // The low nibble of F does not exist.
    regs.set_af(0x12FF);
    assert_eq!(regs.a, 0x12);
    assert_eq!(regs.f, 0xF0);
    assert_eq!(regs.af(), 0x12F0);
}

#[test]
fn read_only_accessors_mirror_state() {
    // LD A,0x42; EI; NOP; HALT
    let (mut cpu, mut bus) = setup(&[0x3E, 0x42, 0xFB, 0x00, 0x76]);
    for _ in 0..4 {
        step(&mut cpu, &mut bus);
    }

    let regs = cpu.regs();
    assert_eq!(regs.a(), 0x42);
    assert_eq!(regs.f() & 0x0F, 0);
    assert_eq!(regs.af(), cpu.regs.af());
    assert_eq!(regs.sp(), 0xFFFE);
    assert_eq!(regs.pc(), 0x0105);
    assert!(cpu.ime());
    assert!(cpu.is_halted());
}

#[test]
fn flag_accessors_touch_only_their_bit() {
    let mut cpu = Cpu::new();
    cpu.regs.f = 0x00;

    cpu.set_flag(Flag::C, true);
    assert_eq!(cpu.regs.f, 0x10);
    cpu.set_flag(Flag::Z, true);
    assert_eq!(cpu.regs.f, 0x90);
    assert!(cpu.get_flag(Flag::Z));
    assert!(!cpu.get_flag(Flag::N));

    cpu.set_flag(Flag::C, false);
    assert_eq!(cpu.regs.f, 0x80);
}

#[test]
fn nop_advances_pc() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cycles, 4);
    assert_eq!(cpu.last_opcode(), 0x00);
}

#[test]
fn vblank_dispatch_pushes_pc_and_jumps_to_vector() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();

    cpu.regs.pc = 0x1234;
    cpu.regs.sp = 0xFFFE;
    cpu.ime = true;

    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    let cycles = step(&mut cpu, &mut bus);

    assert_eq!(cycles, INTERRUPT_DISPATCH_CYCLES);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x00);
    // High byte pushed first, so it sits above the low byte.
    assert_eq!(bus.memory[0xFFFD], 0x12);
    assert_eq!(bus.memory[0xFFFC], 0x34);
    assert_eq!(cpu.cycles(), 20);
}

#[test]
fn only_one_interrupt_is_serviced_per_step() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    cpu.ime = true;

    bus.memory[IE_ADDR as usize] = 0x1F;
    bus.memory[IF_ADDR as usize] = 0x03;

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
    // LCD STAT stays requested until interrupts are enabled again.
    assert_eq!(bus.memory[IF_ADDR as usize], 0x02);

    // IME is now clear: the next step executes the handler's opcode.
    bus.memory[0x0040] = 0x00;
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0041);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x02);
}

#[test]
fn each_source_uses_its_own_vector() {
    for (index, vector) in [0x40u16, 0x48, 0x50, 0x58, 0x60].into_iter().enumerate() {
        let mut cpu = Cpu::new();
        let mut bus = TestBus::default();
        cpu.ime = true;
        bus.memory[IE_ADDR as usize] = 0x1F;
        bus.memory[IF_ADDR as usize] = 1 << index;

        step(&mut cpu, &mut bus);
        assert_eq!(cpu.regs.pc, vector, "interrupt bit {index}");
    }
}

#[test]
fn disabled_or_masked_interrupts_are_not_dispatched() {
    // IME clear.
    let (mut cpu, mut bus) = setup(&[0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0101);

    // Requested but not enabled in IE.
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x02;
    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x01);
}

#[test]
fn illegal_opcode_locks_the_cpu() {
    let (mut cpu, mut bus) = setup(&[0x00, 0xD3, 0x00]);
    step(&mut cpu, &mut bus);

    let err = cpu.step(&mut bus).unwrap_err();
    assert_eq!(
        err,
        StepError::IllegalOpcode {
            opcode: 0xD3,
            pc: 0x0101,
            cycles: 4,
        }
    );
    assert_eq!(cpu.regs.pc, 0x0101);
    assert!(cpu.is_locked());

    // The machine stays dead; the cycle counter does not move.
    assert_eq!(cpu.step(&mut bus).unwrap_err(), err);
    assert_eq!(cpu.cycles(), 4);
    assert_eq!(
        err.to_string(),
        "illegal opcode 0xD3 at 0x0101 after 4 cycles"
    );
}

#[test]
fn every_hole_is_reported() {
    for opcode in [0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD] {
        let (mut cpu, mut bus) = setup(&[opcode]);
        match cpu.step(&mut bus) {
            Err(StepError::IllegalOpcode { opcode: got, pc, .. }) => {
                assert_eq!(got, opcode);
                assert_eq!(pc, 0x0100);
            }
            other => panic!("0x{opcode:02X}: expected illegal opcode, got {other:?}"),
        }
    }
}

#[test]
fn ld_16bit_and_basic_ld_indirect_work() {
    // LD BC,0x1234; LD (BC),A; LD A,(BC)
    let (mut cpu, mut bus) = setup(&[0x01, 0x34, 0x12, 0x02, 0x0A]);
    cpu.regs.a = 0xAB;

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.bc(), 0x1234);
    assert_eq!(cpu.regs.pc, 0x0103);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0x1234], 0xAB);

    cpu.regs.a = 0x00;
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0xAB);
}

#[test]
fn ld_r_r_and_hl_inc_dec_forms_work() {
    let (mut cpu, mut bus) = setup(&[
        0x21, 0x00, 0xC0, // LD HL,0xC000
        0x06, 0x12, // LD B,0x12
        0x70, // LD (HL),B
        0x2A, // LD A,(HL+)
        0x32, // LD (HL-),A
        0x4F, // LD C,A
        0x36, 0x99, // LD (HL),0x99
    ]);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.b, 0x12);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xC000], 0x12);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.hl(), 0xC001);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xC001], 0x12);
    assert_eq!(cpu.regs.hl(), 0xC000);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.c, 0x12);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x99);
}

#[test]
fn ldh_and_absolute_loads() {
    let (mut cpu, mut bus) = setup(&[
        0xE0, 0x80, // LDH (0x80),A
        0xF0, 0x81, // LDH A,(0x81)
        0xE2, // LD (C),A
        0xEA, 0x00, 0xC1, // LD (0xC100),A
        0xFA, 0x02, 0xC1, // LD A,(0xC102)
        0x08, 0x10, 0xC2, // LD (0xC210),SP
    ]);
    cpu.regs.a = 0x42;
    cpu.regs.c = 0x90;
    bus.memory[0xFF81] = 0x24;
    bus.memory[0xC102] = 0x77;

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xFF80], 0x42);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.a, 0x24);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(bus.memory[0xFF90], 0x24);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC100], 0x24);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.a, 0x77);

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(bus.memory[0xC210], 0xFE);
    assert_eq!(bus.memory[0xC211], 0xFF);
}

#[test]
fn add_and_adc_flags() {
    // ADD A,B
    let (mut cpu, mut bus) = setup(&[0x80]);
    cpu.regs.a = 0x3A;
    cpu.regs.b = 0xC6;
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, 0xB0); // Z H C

    // ADC A,E with carry in.
    let (mut cpu, mut bus) = setup(&[0x8B]);
    cpu.regs.a = 0xE1;
    cpu.regs.e = 0x0F;
    cpu.regs.f = 0x10;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xF1);
    assert_eq!(cpu.regs.f, 0x20); // H

    // ADC where only the carry-in overflows.
    let (mut cpu, mut bus) = setup(&[0xCE, 0x00]);
    cpu.regs.a = 0xFF;
    cpu.regs.f = 0x10;
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, 0xB0);
}

#[test]
fn sub_sbc_and_cp_flags() {
    // SUB E
    let (mut cpu, mut bus) = setup(&[0x93]);
    cpu.regs.a = 0x3E;
    cpu.regs.e = 0x3E;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, 0xC0); // Z N

    // SBC A,H with borrow in.
    let (mut cpu, mut bus) = setup(&[0x9C]);
    cpu.regs.a = 0x3B;
    cpu.regs.h = 0x2A;
    cpu.regs.f = 0x10;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x10);
    assert_eq!(cpu.regs.f, 0x40); // N

    // SUB with borrow out of both nibbles.
    let (mut cpu, mut bus) = setup(&[0xD6, 0x01]);
    cpu.regs.a = 0x00;
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0xFF);
    assert_eq!(cpu.regs.f, 0x70); // N H C

    // CP B leaves A alone.
    let (mut cpu, mut bus) = setup(&[0xB8]);
    cpu.regs.a = 0x3C;
    cpu.regs.b = 0x2F;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x3C);
    assert_eq!(cpu.regs.f, 0x60); // N H
}

#[test]
fn logic_ops_set_fixed_flags() {
    // AND L
    let (mut cpu, mut bus) = setup(&[0xA5]);
    cpu.regs.a = 0x5A;
    cpu.regs.l = 0x3F;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x1A);
    assert_eq!(cpu.regs.f, 0x20);

    // XOR A
    let (mut cpu, mut bus) = setup(&[0xAF]);
    cpu.regs.a = 0xFF;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, 0x80);

    // OR (HL)
    let (mut cpu, mut bus) = setup(&[0xB6]);
    cpu.regs.a = 0x5A;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x0F;
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x5F);
    assert_eq!(cpu.regs.f, 0x00);
}

#[test]
fn daa_corrects_bcd_addition_and_subtraction() {
    // ADD A,B; DAA
    let (mut cpu, mut bus) = setup(&[0x80, 0x27]);
    cpu.regs.a = 0x45;
    cpu.regs.b = 0x38;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x7D);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.get_flag(Flag::C));

    // SUB B; DAA
    let (mut cpu, mut bus) = setup(&[0x90, 0x27]);
    cpu.regs.a = 0x83;
    cpu.regs.b = 0x38;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x4B);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x45);
    assert!(cpu.get_flag(Flag::N));
}

#[test]
fn cpl_scf_ccf() {
    let (mut cpu, mut bus) = setup(&[0x2F, 0x37, 0x3F]);
    cpu.regs.a = 0x35;
    cpu.regs.f = 0x80;

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0xCA);
    assert_eq!(cpu.regs.f, 0xE0); // Z preserved, N H set

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f, 0x90);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.f, 0x80);
}

#[test]
fn inc_dec_8bit_update_flags_and_preserve_c() {
    // INC A; DEC A; DEC (HL)
    let (mut cpu, mut bus) = setup(&[0x3C, 0x3D, 0x35]);
    cpu.regs.a = 0x0F;
    cpu.regs.f = 0x10;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x01;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0x10);
    assert_eq!(cpu.regs.f, 0x30); // H C

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0x0F);
    assert_eq!(cpu.regs.f, 0x70); // N H C

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(bus.memory[0xC000], 0x00);
    assert_eq!(cpu.regs.f, 0xD0); // Z N C
}

#[test]
fn inc_dec_16bit_and_add_hl_rr_behaviour() {
    // INC BC; DEC DE; ADD HL,BC; ADD HL,HL
    let (mut cpu, mut bus) = setup(&[0x03, 0x1B, 0x09, 0x29]);
    cpu.regs.set_bc(0x0604);
    cpu.regs.set_de(0x0000);
    cpu.regs.set_hl(0x8A23);
    cpu.regs.f = 0x80;

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.bc(), 0x0605);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.de(), 0xFFFF);
    assert_eq!(cpu.regs.f, 0x80);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.hl(), 0x9028);
    assert_eq!(cpu.regs.f, 0xA0); // Z kept, H

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.hl(), 0x2050);
    assert_eq!(cpu.regs.f, 0x90); // Z kept, C
}

#[test]
fn add_sp_r8_and_ld_hl_sp_plus_r8() {
    // ADD SP,+2; LD HL,SP-1; LD SP,HL
    let (mut cpu, mut bus) = setup(&[0xE8, 0x02, 0xF8, 0xFF, 0xF9]);
    cpu.regs.sp = 0xFFF8;

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.sp, 0xFFFA);
    assert_eq!(cpu.regs.f, 0x00);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.hl(), 0xFFF9);
    // 0xFA + 0xFF carries out of both the nibble and the byte.
    assert_eq!(cpu.regs.f, 0x30);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.sp, 0xFFF9);
}

#[test]
fn accumulator_rotates_always_clear_z() {
    // RLCA; RRA
    let (mut cpu, mut bus) = setup(&[0x07, 0x1F]);
    cpu.regs.a = 0x00;
    cpu.regs.f = 0x80;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, 0x00);

    cpu.regs.a = 0x01;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(cpu.regs.f, 0x10);
}

#[test]
fn relative_jump_costs_taken_and_not_taken() {
    // JR NZ,+5
    let (mut cpu, mut bus) = setup(&[0x20, 0x05]);
    cpu.regs.f = 0x80;
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x0102);

    let (mut cpu, mut bus) = setup(&[0x20, 0x05]);
    cpu.regs.f = 0x00;
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0107);

    // JR -2 loops onto itself.
    let (mut cpu, mut bus) = setup(&[0x18, 0xFE]);
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn absolute_jump_costs() {
    // JP C,0x0200 with C clear, then with C set.
    let (mut cpu, mut bus) = setup(&[0xDA, 0x00, 0x02]);
    cpu.regs.f = 0x00;
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0103);

    let (mut cpu, mut bus) = setup(&[0xDA, 0x00, 0x02]);
    cpu.regs.f = 0x10;
    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0200);

    // JP 0x0150; JP HL
    let (mut cpu, mut bus) = setup(&[0xC3, 0x50, 0x01]);
    bus.memory[0x0150] = 0xE9;
    cpu.regs.set_hl(0x4000);
    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x4000);
}

#[test]
fn call_and_ret_round_trip() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x02]);
    bus.memory[0x0200] = 0xC9; // RET

    assert_eq!(step(&mut cpu, &mut bus), 24);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFD], 0x01);
    assert_eq!(bus.memory[0xFFFC], 0x03);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn conditional_call_and_ret_costs() {
    // CALL NZ with Z set: skipped.
    let (mut cpu, mut bus) = setup(&[0xC4, 0x00, 0x02]);
    cpu.regs.f = 0x80;
    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);

    // RET Z taken, then RET NZ not taken.
    let (mut cpu, mut bus) = setup(&[0xC8]);
    cpu.regs.f = 0x80;
    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x34;
    bus.memory[0xFFFD] = 0x12;
    bus.memory[0x1234] = 0xC0;
    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x1234);
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.pc, 0x1235);
}

#[test]
fn rst_and_reti() {
    let (mut cpu, mut bus) = setup(&[0xFF]);
    bus.memory[0x0038] = 0xD9; // RETI

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0038);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.pc, 0x0101);
    // RETI does not wait an instruction.
    assert!(cpu.ime);
}

#[test]
fn push_pop_and_af_masking() {
    // PUSH BC; POP DE; POP AF
    let (mut cpu, mut bus) = setup(&[0xC5, 0xD1, 0xF1]);
    cpu.regs.set_bc(0x1234);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0x34);
    assert_eq!(bus.memory[0xFFFD], 0x12);

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.de(), 0x1234);

    cpu.regs.sp = 0xC000;
    bus.memory[0xC000] = 0xFF;
    bus.memory[0xC001] = 0x12;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f, 0xF0);
}

#[test]
fn ei_takes_effect_after_the_next_instruction() {
    // EI; NOP; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(!cpu.ime);

    // The instruction after EI still runs with interrupts off.
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert!(cpu.ime);

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
}

#[test]
fn di_cancels_a_pending_ei() {
    // EI; DI; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3, 0x00]);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert!(!cpu.ime);
}

#[test]
fn halt_waits_for_an_interrupt() {
    let (mut cpu, mut bus) = setup(&[0x76, 0x00]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x04;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.halted);
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0101);

    bus.memory[IF_ADDR as usize] = 0x04;
    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0050);
    assert_eq!(bus.memory[0xFFFC], 0x01);
    assert_eq!(bus.memory[0xFFFD], 0x01);
}

#[test]
fn halt_with_ime_clear_wakes_without_dispatch() {
    let (mut cpu, mut bus) = setup(&[0x76, 0x3C]);
    bus.memory[IE_ADDR as usize] = 0x01;

    step(&mut cpu, &mut bus);
    assert!(cpu.halted);

    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(cpu.regs.a, 0x02);
    assert_eq!(bus.memory[IF_ADDR as usize], 0x01);
}

#[test]
fn halt_bug_repeats_the_next_byte() {
    // HALT; INC A, with an interrupt already pending and IME clear.
    let (mut cpu, mut bus) = setup(&[0x76, 0x3C, 0x00]);
    cpu.regs.a = 0x00;
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;

    step(&mut cpu, &mut bus);
    assert!(!cpu.halted);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0101);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(cpu.regs.a, 0x02);
}

#[test]
fn dispatch_consumes_the_halt_bug() {
    // EI; HALT; NOP with VBlank already requested. HALT sees IME still clear.
    let (mut cpu, mut bus) = setup(&[0xFB, 0x76, 0x00]);
    bus.memory[IE_ADDR as usize] = 0x01;
    bus.memory[IF_ADDR as usize] = 0x01;
    // INC A; NOP at the VBlank vector.
    bus.load(0x0040, &[0x3C, 0x00]);

    step(&mut cpu, &mut bus);
    step(&mut cpu, &mut bus);
    assert!(!cpu.halted);
    cpu.regs.a = 0x00;

    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
    // Return address is the HALT itself.
    assert_eq!(bus.memory[0xFFFD], 0x01);
    assert_eq!(bus.memory[0xFFFC], 0x01);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0041);
    assert_eq!(cpu.regs.a, 0x01);
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.pc, 0x0042);
    assert_eq!(cpu.regs.a, 0x01);
}

#[test]
fn dispatch_cancels_a_pending_ei() {
    // EI while IME is already set, then an interrupt before the delay runs out.
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00]);
    cpu.ime = true;
    bus.memory[IE_ADDR as usize] = 0x01;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);

    // NOPs in the handler must not turn IME back on.
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(!cpu.ime);
    bus.memory[IF_ADDR as usize] = 0x01;
    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0042);
}

#[test]
fn stop_idles_until_joypad_line_goes_low() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x3C]);
    bus.memory[0xFF00] = 0xCF;

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0102);

    assert_eq!(step(&mut cpu, &mut bus), 4);
    assert!(cpu.is_stopped());

    bus.memory[0xFF00] = 0xCE;
    step(&mut cpu, &mut bus);
    assert!(!cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0102);

    let a = cpu.regs.a;
    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, a.wrapping_add(1));
}

#[test]
fn cb_rotates_and_shifts() {
    // RLC B; SWAP A; SRL (HL); SRA C
    let (mut cpu, mut bus) = setup(&[0xCB, 0x00, 0xCB, 0x37, 0xCB, 0x3E, 0xCB, 0x29]);
    cpu.regs.b = 0x85;
    cpu.regs.a = 0xF0;
    cpu.regs.c = 0x81;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x01;

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.b, 0x0B);
    assert_eq!(cpu.regs.f, 0x10);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.a, 0x0F);
    assert_eq!(cpu.regs.f, 0x00);
    assert_eq!(cpu.last_opcode(), 0xCB37);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x00);
    assert_eq!(cpu.regs.f, 0x90);

    step(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.c, 0xC0);
    assert_eq!(cpu.regs.f, 0x10);
}

#[test]
fn cb_bit_res_set() {
    // BIT 7,H; BIT 0,(HL); SET 3,(HL); RES 7,H
    let (mut cpu, mut bus) = setup(&[0xCB, 0x7C, 0xCB, 0x46, 0xCB, 0xDE, 0xCB, 0xBC]);
    cpu.regs.set_hl(0xC000);
    cpu.regs.f = 0x10;
    bus.memory[0xC000] = 0x00;

    // H = 0xC0, bit 7 set.
    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.f, 0x30); // H, C preserved

    assert_eq!(step(&mut cpu, &mut bus), 12);
    assert_eq!(cpu.regs.f, 0xB0);

    assert_eq!(step(&mut cpu, &mut bus), 16);
    assert_eq!(bus.memory[0xC000], 0x08);

    assert_eq!(step(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.regs.h, 0x40);
    // RES/SET leave flags alone.
    assert_eq!(cpu.regs.f, 0xB0);
}

#[test]
fn peek_and_read_immediates_agree() {
    let (mut cpu, mut bus) = setup(&[0x34, 0x12, 0xFE]);

    assert_eq!(cpu.peek_imm8(&mut bus), 0x34);
    assert_eq!(cpu.peek_imm16(&mut bus), 0x1234);
    assert_eq!(cpu.regs.pc, 0x0100);

    let word = cpu.read_imm16(&mut bus);
    assert_eq!(word, 0x1234);
    assert_eq!(cpu.regs.pc, 0x0102);

    assert_eq!(cpu.peek_signed_imm8(&mut bus), -2);
    assert_eq!(cpu.read_signed_imm8(&mut bus), -2);
    assert_eq!(cpu.regs.pc, 0x0103);

    cpu.regs.pc = 0x0100;
    assert_eq!(cpu.read_imm8(&mut bus), 0x34);
}

#[test]
fn cycles_accumulate_across_steps() {
    // NOP; LD B,d8; JP 0x0100
    let (mut cpu, mut bus) = setup(&[0x00, 0x06, 0x01, 0xC3, 0x00, 0x01]);

    let mut total = 0u64;
    for _ in 0..6 {
        total += step(&mut cpu, &mut bus) as u64;
    }
    assert_eq!(total, 2 * (4 + 8 + 16));
    assert_eq!(cpu.cycles(), total);
}
