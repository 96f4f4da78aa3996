mod alu;
mod bus;
mod cb;
pub mod decode;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

#[cfg(test)]
mod tests;

use std::fmt;

pub use self::bus::Bus;
pub use self::decode::{CbInstruction, Instruction};
pub use self::regs::{Flag, Registers};

/// Cost of an interrupt dispatch in T-cycles.
pub const INTERRUPT_DISPATCH_CYCLES: u32 = 20;

/// A fatal condition raised by [`Cpu::step`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StepError {
    /// The fetched byte has no entry in the primary decode table. On
    /// hardware the CPU hangs until power-off.
    IllegalOpcode {
        opcode: u8,
        /// Address the opcode was fetched from.
        pc: u16,
        /// Cumulative cycles executed before the fetch.
        cycles: u64,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::IllegalOpcode { opcode, pc, cycles } => write!(
                f,
                "illegal opcode 0x{opcode:02X} at 0x{pc:04X} after {cycles} cycles"
            ),
        }
    }
}

impl std::error::Error for StepError {}

/// Game Boy CPU core (SM83).
///
/// Owns the register file and control state. Memory is reached only
/// through the [`Bus`] passed to each [`Cpu::step`].
#[derive(Clone, Debug)]
pub struct Cpu {
    pub(crate) regs: Registers,
    pub(crate) ime: bool,
    pub(crate) halted: bool,
    /// STOP low-power state. While `stopped` is true the CPU ignores
    /// interrupts and resumes only when a joypad line reads low in P1.
    stopped: bool,
    halt_bug: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// Set once an illegal opcode has been fetched; replayed by `step`.
    locked: Option<StepError>,
    /// Cumulative T-cycles; never reset during a run.
    cycles: u64,
    /// Last decoded opcode, `0xCBxx` for prefixed ones.
    last_opcode: u16,
}

impl Cpu {
    /// Read-only view of the register file; only `step` mutates it.
    pub fn regs(&self) -> &Registers {
        &self.regs
    }

    pub fn ime(&self) -> bool {
        self.ime
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn last_opcode(&self) -> u16 {
        self.last_opcode
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }
}
