use bitflags::bitflags;

/// Interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;
/// Interrupt flag register (IF).
pub const IF_ADDR: u16 = 0xFF0F;

/// Address of the first interrupt handler. Handlers are spaced 8 bytes apart.
pub const VECTOR_BASE: u16 = 0x0040;

bitflags! {
    /// Bit layout shared by IE and IF. Bits 5–7 are unused.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// The five interrupt sources, in priority order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Interrupt {
    /// The PPU finished drawing a frame.
    VBlank = 0,
    /// One of the conditions selected in STAT became true.
    LcdStat = 1,
    /// TIMA overflowed.
    Timer = 2,
    /// A serial transfer completed.
    Serial = 3,
    /// A joypad line went from high to low.
    Joypad = 4,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn flag(self) -> InterruptFlags {
        InterruptFlags::from_bits_truncate(1 << self.index())
    }

    /// Handler address: 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub fn vector(self) -> u16 {
        VECTOR_BASE + self.index() as u16 * 8
    }

    /// Highest-priority source in `pending`, i.e. the lowest set bit.
    pub fn highest_priority(pending: InterruptFlags) -> Option<Interrupt> {
        Self::ALL.into_iter().find(|i| pending.contains(i.flag()))
    }
}
