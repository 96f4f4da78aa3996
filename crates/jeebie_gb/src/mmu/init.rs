use super::Mmu;

impl Mmu {
    /// Initialize I/O registers to the values the DMG boot ROM leaves
    /// behind when it jumps to 0x0100.
    ///
    /// Work RAM and high RAM are left zeroed so runs are reproducible.
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        // Joypad: no group selected.
        self.memory[0xFF00] = 0xCF;

        // Serial.
        self.memory[0xFF01] = 0x00;
        self.memory[0xFF02] = 0x7E;

        // Divider / timer.
        self.memory[0xFF04] = 0xAB;
        self.memory[0xFF05] = 0x00;
        self.memory[0xFF06] = 0x00;
        self.memory[0xFF07] = 0xF8;

        // IF: unused upper bits read as 1, VBlank already requested.
        self.memory[0xFF0F] = 0xE1;

        // Sound registers. Audio is not emulated, but software can observe
        // these values.
        self.memory[0xFF10] = 0x80;
        self.memory[0xFF11] = 0xBF;
        self.memory[0xFF12] = 0xF3;
        self.memory[0xFF13] = 0xFF;
        self.memory[0xFF14] = 0xBF;
        self.memory[0xFF16] = 0x3F;
        self.memory[0xFF17] = 0x00;
        self.memory[0xFF18] = 0xFF;
        self.memory[0xFF19] = 0xBF;
        self.memory[0xFF1A] = 0x7F;
        self.memory[0xFF1B] = 0xFF;
        self.memory[0xFF1C] = 0x9F;
        self.memory[0xFF1D] = 0xFF;
        self.memory[0xFF1E] = 0xBF;
        self.memory[0xFF20] = 0xFF;
        self.memory[0xFF21] = 0x00;
        self.memory[0xFF22] = 0x00;
        self.memory[0xFF23] = 0xBF;
        self.memory[0xFF24] = 0x77;
        self.memory[0xFF25] = 0xF3;
        self.memory[0xFF26] = 0xF1;

        // LCD registers.
        self.memory[0xFF40] = 0x91; // LCDC
        self.memory[0xFF41] = 0x85; // STAT
        self.memory[0xFF42] = 0x00; // SCY
        self.memory[0xFF43] = 0x00; // SCX
        self.memory[0xFF44] = 0x00; // LY
        self.memory[0xFF45] = 0x00; // LYC
        self.memory[0xFF46] = 0xFF; // DMA
        self.memory[0xFF47] = 0xFC; // BGP
        self.memory[0xFF4A] = 0x00; // WY
        self.memory[0xFF4B] = 0x00; // WX

        // IE.
        self.memory[0xFFFF] = 0x00;
    }
}
