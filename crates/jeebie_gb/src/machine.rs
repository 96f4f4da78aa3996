use crate::cartridge::{Cartridge, CartridgeError};
use crate::cpu::{Cpu, StepError};
use crate::mmu::Mmu;
use crate::video::{VideoPipeline, CYCLES_PER_FRAME};


/// High-level Game Boy machine.
///
/// Holds the CPU core and the bus for the length of one run. Frontends
/// drive it step by step or frame by frame.
pub struct GameBoy {
    cpu: Cpu,
    mmu: Mmu,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new(None)
    }
}

impl GameBoy {
    pub fn new(cartridge: Option<Cartridge>) -> Self {
        Self {
            cpu: Cpu::new(),
            mmu: Mmu::new(cartridge),
        }
    }

    /// Parse `rom` and build a machine around it.
    pub fn from_rom(rom: &[u8]) -> Result<Self, CartridgeError> {
        Ok(Self::new(Some(Cartridge::load(rom)?)))
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    pub fn mmu_mut(&mut self) -> &mut Mmu {
        &mut self.mmu
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.mmu.cartridge()
    }

    /// Power-cycle: CPU back to the post-boot state and a fresh bus with the
    /// same cartridge.
    pub fn reset(&mut self) {
        self.cpu.reset();
        let cartridge = self.mmu.cartridge().cloned();
        self.mmu = Mmu::new(cartridge);
    }

    /// Execute one CPU step without advancing any other component.
    pub fn step(&mut self) -> Result<u32, StepError> {
        self.cpu.step(&mut self.mmu)
    }

    /// One CPU step followed by the same amount of video time.
    pub fn tick<V: VideoPipeline>(&mut self, video: &mut V) -> Result<u32, StepError> {
        let cycles = self.cpu.step(&mut self.mmu)?;
        video.tick(&mut self.mmu, cycles);
        Ok(cycles)
    }

    /// Step the machine for one frame worth of time.
    ///
    /// Advances until at least one DMG frame (70224 T-cycles) has elapsed
    /// and returns the cycles actually consumed; the last instruction may
    /// overshoot.
    pub fn step_frame<V: VideoPipeline>(&mut self, video: &mut V) -> Result<u64, StepError> {
        let mut elapsed = 0u64;
        while elapsed < CYCLES_PER_FRAME as u64 {
            elapsed += self.tick(video)? as u64;
        }
        Ok(elapsed)
    }
}
