use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        // STOP is a 2-byte instruction; the padding byte is fetched and
        // discarded so that PC matches hardware.
        let _padding = self.read_imm8(bus);

        // The CPU idles until a joypad line goes low (polled in `step`).
        self.stopped = true;
        self.halted = false;
        4
    }

    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if !self.ime && !self.pending_interrupts(bus).is_empty() {
            // HALT bug: with IME clear and an interrupt already pending the
            // CPU does not halt, and the next opcode fetch does not
            // increment PC.
            self.halt_bug = true;
            return 4;
        }

        self.halted = true;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        4
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        // Armed here; `apply_ime_delay` sets IME once the following
        // instruction has run.
        self.ime_enable_pending = true;
        4
    }
}
