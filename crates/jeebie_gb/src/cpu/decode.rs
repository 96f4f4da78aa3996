//! Opcode decode tables.
//!
//! Both tables are built at compile time from the usual `x/y/z/p/q` bit
//! fields of the opcode byte:
//!
//! ```text
//!   7 6 5 4 3 2 1 0
//!   x x y y y z z z
//!       p p q
//! ```
//!
//! `PRIMARY` has no entry for the eleven opcode holes (D3 DB DD E3 E4 EB EC
//! ED F4 FC FD); `EXTENDED` (after the 0xCB prefix) is fully populated.

use std::fmt;

/// 8-bit operand selected by a 3-bit register index.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Operand8 {
    B,
    C,
    D,
    E,
    H,
    L,
    /// The byte at the address held in HL.
    HlIndirect,
    A,
}

impl Operand8 {
    pub const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => Operand8::B,
            1 => Operand8::C,
            2 => Operand8::D,
            3 => Operand8::E,
            4 => Operand8::H,
            5 => Operand8::L,
            6 => Operand8::HlIndirect,
            _ => Operand8::A,
        }
    }

    #[inline]
    pub const fn is_memory(self) -> bool {
        matches!(self, Operand8::HlIndirect)
    }
}

/// 16-bit register pair used by loads and 16-bit arithmetic.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Reg16 {
    Bc,
    De,
    Hl,
    Sp,
}

impl Reg16 {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Reg16::Bc,
            1 => Reg16::De,
            2 => Reg16::Hl,
            _ => Reg16::Sp,
        }
    }
}

/// 16-bit register pair used by PUSH and POP.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StackReg16 {
    Bc,
    De,
    Hl,
    Af,
}

impl StackReg16 {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => StackReg16::Bc,
            1 => StackReg16::De,
            2 => StackReg16::Hl,
            _ => StackReg16::Af,
        }
    }
}

/// Memory operand of `LD (rr),A` and `LD A,(rr)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Indirect {
    Bc,
    De,
    /// (HL), then HL is incremented.
    HlInc,
    /// (HL), then HL is decremented.
    HlDec,
}

impl Indirect {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Indirect::Bc,
            1 => Indirect::De,
            2 => Indirect::HlInc,
            _ => Indirect::HlDec,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Condition {
    Nz,
    Z,
    Nc,
    C,
}

impl Condition {
    const fn from_index(index: u8) -> Self {
        match index & 0x03 {
            0 => Condition::Nz,
            1 => Condition::Z,
            2 => Condition::Nc,
            _ => Condition::C,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

/// Rotates and shifts of the CB table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    const fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            _ => ShiftOp::Srl,
        }
    }
}

/// An unprefixed instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Instruction {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    /// LD rr,d16
    LdRrD16(Reg16),
    /// LD (rr),A
    LdIndirectA(Indirect),
    /// LD A,(rr)
    LdAIndirect(Indirect),
    /// LD (a16),SP
    LdA16Sp,
    Inc16(Reg16),
    Dec16(Reg16),
    Inc8(Operand8),
    Dec8(Operand8),
    /// LD r,d8
    LdRD8(Operand8),
    /// RLCA, RRCA, RLA or RRA: a rotate of A that always clears Z.
    RotateA(ShiftOp),
    /// ADD HL,rr
    AddHl(Reg16),
    Jr,
    JrCc(Condition),
    Daa,
    Cpl,
    Scf,
    Ccf,
    /// LD dst,src
    Ld(Operand8, Operand8),
    /// ALU op on A with a register or (HL).
    Alu(AluOp, Operand8),
    /// ALU op on A with an immediate byte.
    AluD8(AluOp),
    RetCc(Condition),
    Ret,
    Reti,
    Pop(StackReg16),
    Push(StackReg16),
    JpCc(Condition),
    Jp,
    JpHl,
    CallCc(Condition),
    Call,
    /// RST to the given vector (0x00, 0x08, ... 0x38).
    Rst(u8),
    /// 0xCB: the next byte selects an entry of `EXTENDED`.
    Prefix,
    /// LDH (a8),A
    LdhA8A,
    /// LDH A,(a8)
    LdhAA8,
    /// LD (C),A
    LdhCA,
    /// LD A,(C)
    LdhAC,
    AddSpR8,
    /// LD HL,SP+r8
    LdHlSpR8,
    LdSpHl,
    /// LD (a16),A
    LdA16A,
    /// LD A,(a16)
    LdAA16,
}

/// A 0xCB-prefixed instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CbInstruction {
    Shift(ShiftOp, Operand8),
    Bit(u8, Operand8),
    Res(u8, Operand8),
    Set(u8, Operand8),
}

/// Decode an unprefixed opcode. Returns `None` for the opcode holes.
pub const fn decode(opcode: u8) -> Option<Instruction> {
    use Instruction::*;

    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    let instr = match (x, z) {
        (0, 0) => match y {
            0 => Nop,
            1 => LdA16Sp,
            2 => Stop,
            3 => Jr,
            _ => JrCc(Condition::from_index(y - 4)),
        },
        (0, 1) if q == 0 => LdRrD16(Reg16::from_index(p)),
        (0, 1) => AddHl(Reg16::from_index(p)),
        (0, 2) if q == 0 => LdIndirectA(Indirect::from_index(p)),
        (0, 2) => LdAIndirect(Indirect::from_index(p)),
        (0, 3) if q == 0 => Inc16(Reg16::from_index(p)),
        (0, 3) => Dec16(Reg16::from_index(p)),
        (0, 4) => Inc8(Operand8::from_index(y)),
        (0, 5) => Dec8(Operand8::from_index(y)),
        (0, 6) => LdRD8(Operand8::from_index(y)),
        (0, _) => match y {
            0..=3 => RotateA(ShiftOp::from_index(y)),
            4 => Daa,
            5 => Cpl,
            6 => Scf,
            _ => Ccf,
        },
        (1, 6) if y == 6 => Halt,
        (1, _) => Ld(Operand8::from_index(y), Operand8::from_index(z)),
        (2, _) => Alu(AluOp::from_index(y), Operand8::from_index(z)),
        (_, 0) => match y {
            0..=3 => RetCc(Condition::from_index(y)),
            4 => LdhA8A,
            5 => AddSpR8,
            6 => LdhAA8,
            _ => LdHlSpR8,
        },
        (_, 1) if q == 0 => Pop(StackReg16::from_index(p)),
        (_, 1) => match p {
            0 => Ret,
            1 => Reti,
            2 => JpHl,
            _ => LdSpHl,
        },
        (_, 2) => match y {
            0..=3 => JpCc(Condition::from_index(y)),
            4 => LdhCA,
            5 => LdA16A,
            6 => LdhAC,
            _ => LdAA16,
        },
        (_, 3) => match y {
            0 => Jp,
            1 => Prefix,
            6 => Di,
            7 => Ei,
            _ => return None,
        },
        (_, 4) => match y {
            0..=3 => CallCc(Condition::from_index(y)),
            _ => return None,
        },
        (_, 5) if q == 0 => Push(StackReg16::from_index(p)),
        (_, 5) => match p {
            0 => Call,
            _ => return None,
        },
        (_, 6) => AluD8(AluOp::from_index(y)),
        (_, _) => Rst(y * 8),
    };

    Some(instr)
}

/// Decode the byte following a 0xCB prefix. Every value is defined.
pub const fn decode_cb(opcode: u8) -> CbInstruction {
    let y = (opcode >> 3) & 0x07;
    let target = Operand8::from_index(opcode & 0x07);

    match opcode >> 6 {
        0 => CbInstruction::Shift(ShiftOp::from_index(y), target),
        1 => CbInstruction::Bit(y, target),
        2 => CbInstruction::Res(y, target),
        _ => CbInstruction::Set(y, target),
    }
}

const fn build_primary() -> [Option<Instruction>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode(i as u8);
        i += 1;
    }
    table
}

const fn build_extended() -> [CbInstruction; 256] {
    let mut table = [CbInstruction::Bit(0, Operand8::B); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_cb(i as u8);
        i += 1;
    }
    table
}

/// Unprefixed decode table indexed by opcode.
pub static PRIMARY: [Option<Instruction>; 256] = build_primary();

/// 0xCB-prefixed decode table indexed by the second byte.
pub static EXTENDED: [CbInstruction; 256] = build_extended();

impl fmt::Display for Operand8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operand8::B => "B",
            Operand8::C => "C",
            Operand8::D => "D",
            Operand8::E => "E",
            Operand8::H => "H",
            Operand8::L => "L",
            Operand8::HlIndirect => "(HL)",
            Operand8::A => "A",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Reg16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reg16::Bc => "BC",
            Reg16::De => "DE",
            Reg16::Hl => "HL",
            Reg16::Sp => "SP",
        })
    }
}

impl fmt::Display for StackReg16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StackReg16::Bc => "BC",
            StackReg16::De => "DE",
            StackReg16::Hl => "HL",
            StackReg16::Af => "AF",
        })
    }
}

impl fmt::Display for Indirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Indirect::Bc => "(BC)",
            Indirect::De => "(DE)",
            Indirect::HlInc => "(HL+)",
            Indirect::HlDec => "(HL-)",
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Condition::Nz => "NZ",
            Condition::Z => "Z",
            Condition::Nc => "NC",
            Condition::C => "C",
        })
    }
}

impl ShiftOp {
    fn mnemonic(self) -> &'static str {
        match self {
            ShiftOp::Rlc => "RLC",
            ShiftOp::Rrc => "RRC",
            ShiftOp::Rl => "RL",
            ShiftOp::Rr => "RR",
            ShiftOp::Sla => "SLA",
            ShiftOp::Sra => "SRA",
            ShiftOp::Swap => "SWAP",
            ShiftOp::Srl => "SRL",
        }
    }
}

impl AluOp {
    fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD A,",
            AluOp::Adc => "ADC A,",
            AluOp::Sub => "SUB ",
            AluOp::Sbc => "SBC A,",
            AluOp::And => "AND ",
            AluOp::Xor => "XOR ",
            AluOp::Or => "OR ",
            AluOp::Cp => "CP ",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Nop => f.write_str("NOP"),
            Stop => f.write_str("STOP"),
            Halt => f.write_str("HALT"),
            Di => f.write_str("DI"),
            Ei => f.write_str("EI"),
            LdRrD16(rr) => write!(f, "LD {rr},d16"),
            LdIndirectA(ind) => write!(f, "LD {ind},A"),
            LdAIndirect(ind) => write!(f, "LD A,{ind}"),
            LdA16Sp => f.write_str("LD (a16),SP"),
            Inc16(rr) => write!(f, "INC {rr}"),
            Dec16(rr) => write!(f, "DEC {rr}"),
            Inc8(r) => write!(f, "INC {r}"),
            Dec8(r) => write!(f, "DEC {r}"),
            LdRD8(r) => write!(f, "LD {r},d8"),
            RotateA(op) => write!(f, "{}A", op.mnemonic()),
            AddHl(rr) => write!(f, "ADD HL,{rr}"),
            Jr => f.write_str("JR r8"),
            JrCc(cc) => write!(f, "JR {cc},r8"),
            Daa => f.write_str("DAA"),
            Cpl => f.write_str("CPL"),
            Scf => f.write_str("SCF"),
            Ccf => f.write_str("CCF"),
            Ld(dst, src) => write!(f, "LD {dst},{src}"),
            Alu(op, r) => write!(f, "{}{r}", op.mnemonic()),
            AluD8(op) => write!(f, "{}d8", op.mnemonic()),
            RetCc(cc) => write!(f, "RET {cc}"),
            Ret => f.write_str("RET"),
            Reti => f.write_str("RETI"),
            Pop(rr) => write!(f, "POP {rr}"),
            Push(rr) => write!(f, "PUSH {rr}"),
            JpCc(cc) => write!(f, "JP {cc},a16"),
            Jp => f.write_str("JP a16"),
            JpHl => f.write_str("JP HL"),
            CallCc(cc) => write!(f, "CALL {cc},a16"),
            Call => f.write_str("CALL a16"),
            Rst(vector) => write!(f, "RST {vector:02X}H"),
            Prefix => f.write_str("PREFIX CB"),
            LdhA8A => f.write_str("LDH (a8),A"),
            LdhAA8 => f.write_str("LDH A,(a8)"),
            LdhCA => f.write_str("LD (C),A"),
            LdhAC => f.write_str("LD A,(C)"),
            AddSpR8 => f.write_str("ADD SP,r8"),
            LdHlSpR8 => f.write_str("LD HL,SP+r8"),
            LdSpHl => f.write_str("LD SP,HL"),
            LdA16A => f.write_str("LD (a16),A"),
            LdAA16 => f.write_str("LD A,(a16)"),
        }
    }
}

impl fmt::Display for CbInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CbInstruction::Shift(op, r) => write!(f, "{} {r}", op.mnemonic()),
            CbInstruction::Bit(b, r) => write!(f, "BIT {b},{r}"),
            CbInstruction::Res(b, r) => write!(f, "RES {b},{r}"),
            CbInstruction::Set(b, r) => write!(f, "SET {b},{r}"),
        }
    }
}
