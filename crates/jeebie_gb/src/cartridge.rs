mod header;

use std::fmt;

pub use header::{
    computed_global_checksum, computed_header_checksum, CartridgeKind, Header, Mapper,
    HEADER_END, NINTENDO_LOGO,
};

/// Size of the fixed ROM window (0x0000–0x7FFF). Shorter images are padded
/// with zeros so the whole window is always backed.
pub const ROM_WINDOW_SIZE: usize = 0x8000;

/// Byte returned for cartridge reads that no storage backs.
pub const OPEN_BUS: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartridgeError {
    /// The image is too short to contain the header at 0x100–0x14F.
    MalformedHeader { len: usize },
}

impl fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartridgeError::MalformedHeader { len } => write!(
                f,
                "malformed cartridge: image is {len} bytes, header needs at least {HEADER_END}"
            ),
        }
    }
}

impl std::error::Error for CartridgeError {}

/// A single fixed cartridge image with no bank switching.
///
/// The header is parsed once on load and never changes. `write_byte` and
/// `write_ram` are where a memory bank controller would hook in; for the
/// ROM-only variant they drop the write.
#[derive(Clone, Debug)]
pub struct Cartridge {
    rom: Vec<u8>,
    header: Header,
}

impl Cartridge {
    pub fn load(bytes: &[u8]) -> Result<Self, CartridgeError> {
        if bytes.len() < HEADER_END {
            return Err(CartridgeError::MalformedHeader { len: bytes.len() });
        }

        let header = Header::parse(bytes);
        let mut rom = bytes.to_vec();
        if rom.len() < ROM_WINDOW_SIZE {
            rom.resize(ROM_WINDOW_SIZE, 0);
        }

        log::info!(
            "Loaded cartridge '{}' ({} bytes, type 0x{:02X}, version {})",
            header.title,
            bytes.len(),
            header.cartridge_type,
            header.version,
        );

        let kind = header.kind();
        if kind.needs_mapper() {
            log::warn!(
                "Cartridge type 0x{:02X} ({:?}) needs bank switching, which is not emulated; \
                 only the first {} bytes are addressable",
                header.cartridge_type,
                kind.mapper,
                ROM_WINDOW_SIZE,
            );
        }

        Ok(Self { rom, header })
    }

    /// Empty 64 KiB cartridge with a zeroed header, for diagnostics and tests.
    pub fn empty() -> Self {
        Self {
            rom: vec![0; 0x10000],
            header: Header::default(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub fn len(&self) -> usize {
        self.rom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rom.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rom
    }

    /// Raw indexed read. `addr` must be below `len()`; the bus checks this
    /// before delegating.
    #[inline]
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.rom[addr as usize]
    }

    /// Write into the ROM window. ROM-only cartridges ignore it.
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        log::trace!("Dropped cartridge ROM write 0x{value:02X} -> 0x{addr:04X}");
    }

    /// Read from the external RAM window (0xA000–0xBFFF).
    pub fn read_ram(&self, _addr: u16) -> u8 {
        OPEN_BUS
    }

    /// Write to the external RAM window. Nothing backs it without a mapper.
    pub fn write_ram(&mut self, addr: u16, value: u8) {
        log::trace!("Dropped cartridge RAM write 0x{value:02X} -> 0x{addr:04X}");
    }
}
