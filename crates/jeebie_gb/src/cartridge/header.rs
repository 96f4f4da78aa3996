use crate::bit;

pub(crate) const ENTRY_POINT_ADDR: usize = 0x100;
pub(crate) const LOGO_ADDR: usize = 0x104;
pub(crate) const TITLE_ADDR: usize = 0x134;
pub(crate) const TITLE_LEN: usize = 11;
pub(crate) const MANUFACTURER_CODE_ADDR: usize = 0x13F;
pub(crate) const CGB_FLAG_ADDR: usize = 0x143;
pub(crate) const NEW_LICENSEE_CODE_ADDR: usize = 0x144;
pub(crate) const SGB_FLAG_ADDR: usize = 0x146;
pub(crate) const CARTRIDGE_TYPE_ADDR: usize = 0x147;
pub(crate) const ROM_SIZE_ADDR: usize = 0x148;
pub(crate) const RAM_SIZE_ADDR: usize = 0x149;
pub(crate) const DESTINATION_CODE_ADDR: usize = 0x14A;
pub(crate) const OLD_LICENSEE_CODE_ADDR: usize = 0x14B;
pub(crate) const VERSION_ADDR: usize = 0x14C;
pub(crate) const HEADER_CHECKSUM_ADDR: usize = 0x14D;
pub(crate) const GLOBAL_CHECKSUM_ADDR: usize = 0x14E;

/// First byte past the cartridge header. Images shorter than this cannot be
/// parsed.
pub const HEADER_END: usize = 0x150;

/// The bitmap the boot ROM compares against before handing over control.
pub const NINTENDO_LOGO: [u8; 48] = [
    0xCE, 0xED, 0x66, 0x66, 0xCC, 0x0D, 0x00, 0x0B, 0x03, 0x73, 0x00, 0x83, 0x00, 0x0C, 0x00, 0x0D,
    0x00, 0x08, 0x11, 0x1F, 0x88, 0x89, 0x00, 0x0E, 0xDC, 0xCC, 0x6E, 0xE6, 0xDD, 0xDD, 0xD9, 0x99,
    0xBB, 0xBB, 0x67, 0x63, 0x6E, 0x0E, 0xEC, 0xCC, 0xDD, 0xDC, 0x99, 0x9F, 0xBB, 0xB9, 0x33, 0x3E,
];

/// Memory controller named by the cartridge type byte (0x147).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mapper {
    None,
    Mbc1,
    Mbc2,
    Mmm01,
    Mbc3,
    Mbc5,
    Mbc6,
    Mbc7,
    PocketCamera,
    BandaiTama5,
    HuC3,
    HuC1,
    Unknown(u8),
}

/// Decoded form of the cartridge type byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CartridgeKind {
    pub mapper: Mapper,
    pub ram: bool,
    pub battery: bool,
    pub timer: bool,
    pub rumble: bool,
}

impl CartridgeKind {
    const fn new(mapper: Mapper, ram: bool, battery: bool) -> Self {
        Self {
            mapper,
            ram,
            battery,
            timer: false,
            rumble: false,
        }
    }

    pub const fn from_code(code: u8) -> Self {
        use Mapper::*;
        match code {
            0x00 => Self::new(None, false, false),
            0x01 => Self::new(Mbc1, false, false),
            0x02 => Self::new(Mbc1, true, false),
            0x03 => Self::new(Mbc1, true, true),
            0x05 => Self::new(Mbc2, false, false),
            0x06 => Self::new(Mbc2, false, true),
            0x08 => Self::new(None, true, false),
            0x09 => Self::new(None, true, true),
            0x0B => Self::new(Mmm01, false, false),
            0x0C => Self::new(Mmm01, true, false),
            0x0D => Self::new(Mmm01, true, true),
            0x0F => Self {
                timer: true,
                ..Self::new(Mbc3, false, true)
            },
            0x10 => Self {
                timer: true,
                ..Self::new(Mbc3, true, true)
            },
            0x11 => Self::new(Mbc3, false, false),
            0x12 => Self::new(Mbc3, true, false),
            0x13 => Self::new(Mbc3, true, true),
            0x19 => Self::new(Mbc5, false, false),
            0x1A => Self::new(Mbc5, true, false),
            0x1B => Self::new(Mbc5, true, true),
            0x1C => Self {
                rumble: true,
                ..Self::new(Mbc5, false, false)
            },
            0x1D => Self {
                rumble: true,
                ..Self::new(Mbc5, true, false)
            },
            0x1E => Self {
                rumble: true,
                ..Self::new(Mbc5, true, true)
            },
            0x20 => Self::new(Mbc6, false, false),
            0x22 => Self {
                rumble: true,
                ..Self::new(Mbc7, true, true)
            },
            0xFC => Self::new(PocketCamera, false, false),
            0xFD => Self::new(BandaiTama5, false, false),
            0xFE => Self::new(HuC3, false, false),
            0xFF => Self::new(HuC1, true, true),
            other => Self::new(Unknown(other), false, false),
        }
    }

    /// Whether running this cartridge correctly needs bank switching.
    pub fn needs_mapper(&self) -> bool {
        self.mapper != Mapper::None
    }
}

/// Metadata parsed from the fixed header region (0x100–0x14F).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
    pub entry_point: [u8; 4],
    pub logo: [u8; 48],
    pub title: String,
    pub manufacturer_code: [u8; 4],
    pub cgb_flag: u8,
    pub new_licensee_code: [u8; 2],
    pub sgb_flag: u8,
    pub cartridge_type: u8,
    pub rom_size: u8,
    pub ram_size: u8,
    pub destination_code: u8,
    pub old_licensee_code: u8,
    pub version: u8,
    /// Bytes 0x14D–0x14E composed big-endian. The hardware header checksum
    /// is the high byte.
    pub header_checksum: u16,
    /// Bytes 0x14E–0x14F composed big-endian.
    pub global_checksum: u16,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            entry_point: [0; 4],
            logo: [0; 48],
            title: String::new(),
            manufacturer_code: [0; 4],
            cgb_flag: 0,
            new_licensee_code: [0; 2],
            sgb_flag: 0,
            cartridge_type: 0,
            rom_size: 0,
            ram_size: 0,
            destination_code: 0,
            old_licensee_code: 0,
            version: 0,
            header_checksum: 0,
            global_checksum: 0,
        }
    }
}

impl Header {
    /// Parse the header from a ROM image that is at least `HEADER_END`
    /// bytes long. Callers check the length first.
    pub(super) fn parse(rom: &[u8]) -> Self {
        debug_assert!(rom.len() >= HEADER_END);

        let title_bytes = &rom[TITLE_ADDR..TITLE_ADDR + TITLE_LEN];
        let title_len = title_bytes
            .iter()
            .rposition(|&b| b != 0 && b != b' ')
            .map_or(0, |i| i + 1);
        let title = String::from_utf8_lossy(&title_bytes[..title_len]).into_owned();

        let mut entry_point = [0; 4];
        entry_point.copy_from_slice(&rom[ENTRY_POINT_ADDR..ENTRY_POINT_ADDR + 4]);
        let mut logo = [0; 48];
        logo.copy_from_slice(&rom[LOGO_ADDR..LOGO_ADDR + 48]);
        let mut manufacturer_code = [0; 4];
        manufacturer_code.copy_from_slice(&rom[MANUFACTURER_CODE_ADDR..MANUFACTURER_CODE_ADDR + 4]);

        Self {
            entry_point,
            logo,
            title,
            manufacturer_code,
            cgb_flag: rom[CGB_FLAG_ADDR],
            new_licensee_code: [rom[NEW_LICENSEE_CODE_ADDR], rom[NEW_LICENSEE_CODE_ADDR + 1]],
            sgb_flag: rom[SGB_FLAG_ADDR],
            cartridge_type: rom[CARTRIDGE_TYPE_ADDR],
            rom_size: rom[ROM_SIZE_ADDR],
            ram_size: rom[RAM_SIZE_ADDR],
            destination_code: rom[DESTINATION_CODE_ADDR],
            old_licensee_code: rom[OLD_LICENSEE_CODE_ADDR],
            version: rom[VERSION_ADDR],
            header_checksum: bit::combine(
                rom[HEADER_CHECKSUM_ADDR + 1],
                rom[HEADER_CHECKSUM_ADDR],
            ),
            global_checksum: bit::combine(
                rom[GLOBAL_CHECKSUM_ADDR + 1],
                rom[GLOBAL_CHECKSUM_ADDR],
            ),
        }
    }

    pub fn kind(&self) -> CartridgeKind {
        CartridgeKind::from_code(self.cartridge_type)
    }

    /// ROM size in bytes declared by code 0x148, or `None` for codes outside
    /// the documented 0x00–0x08 range.
    pub fn rom_size_bytes(&self) -> Option<usize> {
        match self.rom_size {
            code @ 0x00..=0x08 => Some((32 * 1024) << code),
            _ => None,
        }
    }

    /// External RAM size in bytes declared by code 0x149.
    pub fn ram_size_bytes(&self) -> Option<usize> {
        match self.ram_size {
            0x00 => Some(0),
            0x01 => Some(2 * 1024),
            0x02 => Some(8 * 1024),
            0x03 => Some(32 * 1024),
            0x04 => Some(128 * 1024),
            0x05 => Some(64 * 1024),
            _ => None,
        }
    }

    pub fn logo_matches(&self) -> bool {
        self.logo == NINTENDO_LOGO
    }

    /// The single header checksum byte at 0x14D as the boot ROM sees it.
    pub fn header_checksum_byte(&self) -> u8 {
        bit::high(self.header_checksum)
    }

    /// Whether the stored header checksum matches the one computed from `rom`.
    pub fn header_checksum_ok(&self, rom: &[u8]) -> bool {
        computed_header_checksum(rom) == Some(self.header_checksum_byte())
    }

    pub fn global_checksum_ok(&self, rom: &[u8]) -> bool {
        computed_global_checksum(rom) == Some(self.global_checksum)
    }
}

/// Header checksum over 0x134–0x14C, computed the way the boot ROM does.
pub fn computed_header_checksum(rom: &[u8]) -> Option<u8> {
    let bytes = rom.get(TITLE_ADDR..=VERSION_ADDR)?;
    Some(
        bytes
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_sub(b).wrapping_sub(1)),
    )
}

/// Sum of every ROM byte except the two global checksum bytes.
pub fn computed_global_checksum(rom: &[u8]) -> Option<u16> {
    if rom.len() < HEADER_END {
        return None;
    }
    let sum = rom
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != GLOBAL_CHECKSUM_ADDR && *i != GLOBAL_CHECKSUM_ADDR + 1)
        .fold(0u16, |acc, (_, &b)| acc.wrapping_add(b as u16));
    Some(sum)
}
