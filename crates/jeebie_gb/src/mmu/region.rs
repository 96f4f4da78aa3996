/// Fixed partition of the 16-bit address space.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Region {
    /// 0x0000–0x7FFF, routed to the cartridge.
    CartridgeRom,
    /// 0x8000–0x9FFF.
    VideoRam,
    /// 0xA000–0xBFFF, routed to the cartridge.
    CartridgeRam,
    /// 0xC000–0xDFFF.
    WorkRam,
    /// 0xE000–0xFDFF, mirrors 0xC000–0xDDFF.
    EchoRam,
    /// 0xFE00–0xFE9F.
    Oam,
    /// 0xFEA0–0xFEFF.
    Unusable,
    /// 0xFF00–0xFF7F, including IF at 0xFF0F.
    Io,
    /// 0xFF80–0xFFFE.
    HighRam,
    /// 0xFFFF.
    InterruptEnable,
}

/// Distance between an echo RAM address and the work RAM cell it mirrors.
pub(super) const ECHO_OFFSET: u16 = 0x2000;

impl Region {
    pub const fn of(addr: u16) -> Self {
        match addr {
            0x0000..=0x7FFF => Region::CartridgeRom,
            0x8000..=0x9FFF => Region::VideoRam,
            0xA000..=0xBFFF => Region::CartridgeRam,
            0xC000..=0xDFFF => Region::WorkRam,
            0xE000..=0xFDFF => Region::EchoRam,
            0xFE00..=0xFE9F => Region::Oam,
            0xFEA0..=0xFEFF => Region::Unusable,
            0xFF00..=0xFF7F => Region::Io,
            0xFF80..=0xFFFE => Region::HighRam,
            0xFFFF => Region::InterruptEnable,
        }
    }

    /// Whether accesses in this region are delegated to the cartridge.
    pub const fn is_cartridge(self) -> bool {
        matches!(self, Region::CartridgeRom | Region::CartridgeRam)
    }
}
