use crate::interrupt::{Interrupt, InterruptFlags, IE_ADDR, IF_ADDR};

use super::{Bus, Cpu, INTERRUPT_DISPATCH_CYCLES};

impl Cpu {
    /// Interrupts that are both enabled (IE) and requested (IF).
    pub(super) fn pending_interrupts<B: Bus>(&self, bus: &mut B) -> InterruptFlags {
        let ie = bus.read8(IE_ADDR);
        let iflags = bus.read8(IF_ADDR);
        InterruptFlags::from_bits_truncate(ie & iflags)
    }

    /// Service the highest-priority pending interrupt if IME is set.
    ///
    /// Returns `Some(cycles)` if an interrupt was taken, or `None` otherwise.
    /// At most one interrupt is serviced per call; any other pending source
    /// stays requested in IF.
    pub(super) fn handle_interrupts<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        if !self.ime {
            return None;
        }

        let interrupt = Interrupt::highest_priority(self.pending_interrupts(bus))?;

        let iflags = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, iflags & !interrupt.flag().bits());

        // A HALT bug armed by the previous HALT returns to the HALT itself.
        let pc = if self.halt_bug {
            self.halt_bug = false;
            self.regs.pc.wrapping_sub(1)
        } else {
            self.regs.pc
        };
        self.push_u16(bus, pc);
        self.regs.pc = interrupt.vector();
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        self.halted = false;

        log::debug!(
            "GB CPU interrupt: {:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            interrupt,
            self.regs.pc,
            pc,
            self.regs.sp,
        );

        Some(INTERRUPT_DISPATCH_CYCLES)
    }

    /// Apply delayed IME change requested by EI.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            // Second step after EI: actually enable IME.
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            // First step after EI: arm the delayed enable.
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
