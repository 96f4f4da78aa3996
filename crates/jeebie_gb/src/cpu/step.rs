use super::decode::PRIMARY;
use super::{Bus, Cpu, StepError};

/// Joypad register; STOP is left when one of its input lines goes low.
const P1_ADDR: u16 = 0xFF00;

impl Cpu {
    /// Execute a single instruction (or interrupt entry) and return the
    /// number of T-cycles taken.
    ///
    /// An undefined opcode is fatal: the CPU latches the error and every
    /// later call returns it again without touching the bus.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, StepError> {
        if let Some(err) = &self.locked {
            return Err(err.clone());
        }

        let cycles = self.step_inner(bus)?;
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    fn step_inner<B: Bus>(&mut self, bus: &mut B) -> Result<u32, StepError> {
        // STOP idles until a button/d-pad line (P10-P13) reads low. Some
        // cycles are still reported so callers make forward progress.
        if self.stopped {
            if bus.read8(P1_ADDR) & 0x0F != 0x0F {
                self.stopped = false;
            }
            return Ok(4);
        }

        if let Some(cycles) = self.handle_interrupts(bus) {
            return Ok(cycles);
        }

        if self.halted {
            // With IME clear a pending interrupt still ends HALT, but is not
            // dispatched; execution resumes after the HALT opcode.
            if self.pending_interrupts(bus).is_empty() {
                return Ok(4);
            }
            self.halted = false;
        }

        let address = self.regs.pc;
        let opcode = self.fetch_opcode(bus);
        self.last_opcode = opcode as u16;

        let Some(instr) = PRIMARY[opcode as usize] else {
            self.regs.pc = address;
            let err = StepError::IllegalOpcode {
                opcode,
                pc: address,
                cycles: self.cycles,
            };
            log::error!("GB CPU locked: {err}");
            self.locked = Some(err.clone());
            return Err(err);
        };

        log::trace!("GB CPU exec: pc=0x{address:04X} op=0x{opcode:02X} {instr}");

        let cycles = self.execute(bus, instr);
        self.apply_ime_delay();
        Ok(cycles)
    }
}
