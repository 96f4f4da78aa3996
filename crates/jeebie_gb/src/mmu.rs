mod init;
mod region;

use crate::cartridge::{Cartridge, OPEN_BUS};
use crate::cpu::Bus;
use crate::interrupt::{Interrupt, IF_ADDR};

use self::region::ECHO_OFFSET;
pub use self::region::Region;

/// Total addressable memory (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// The memory bus.
///
/// Owns every byte the CPU can address. Cartridge regions are delegated to
/// the attached cartridge; everything else lives in a flat internal array
/// indexed by address. The interrupt registers are plain cells here and
/// only the CPU gives them meaning.
pub struct Mmu {
    memory: Box<[u8; MEMORY_SIZE]>,
    cartridge: Option<Cartridge>,
}

impl Default for Mmu {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Mmu {
    /// Build a bus. Without a cartridge the whole space stays addressable
    /// and cartridge regions read as `OPEN_BUS`.
    pub fn new(cartridge: Option<Cartridge>) -> Self {
        let mut mmu = Self {
            memory: Box::new([0; MEMORY_SIZE]),
            cartridge,
        };
        mmu.apply_dmg_initial_io_state();
        mmu
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    pub fn read(&self, addr: u16) -> u8 {
        match Region::of(addr) {
            Region::CartridgeRom => match &self.cartridge {
                Some(cart) if (addr as usize) < cart.len() => cart.read_byte(addr),
                _ => OPEN_BUS,
            },
            Region::CartridgeRam => self
                .cartridge
                .as_ref()
                .map_or(OPEN_BUS, |cart| cart.read_ram(addr)),
            Region::EchoRam => self.memory[(addr - ECHO_OFFSET) as usize],
            _ => self.memory[addr as usize],
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match Region::of(addr) {
            Region::CartridgeRom => {
                if let Some(cart) = &mut self.cartridge {
                    cart.write_byte(addr, value);
                }
            }
            Region::CartridgeRam => {
                if let Some(cart) = &mut self.cartridge {
                    cart.write_ram(addr, value);
                }
            }
            Region::EchoRam => self.memory[(addr - ECHO_OFFSET) as usize] = value,
            _ => self.memory[addr as usize] = value,
        }
    }

    /// Raise `interrupt` in IF. Used by peripherals such as the video
    /// pipeline.
    pub fn request_interrupt(&mut self, interrupt: Interrupt) {
        let flags = self.read(IF_ADDR);
        self.write(IF_ADDR, flags | interrupt.flag().bits());
    }
}

impl Bus for Mmu {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }
}
