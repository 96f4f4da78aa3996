use crate::bit;

use super::Cpu;

/// Registers for the Game Boy CPU (SM83).
///
/// Pairs are composed high register first (`B` is the high byte of `BC`).
/// The low nibble of `F` is always zero; every pair setter that touches `F`
/// masks it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Registers {
    pub(crate) a: u8,
    pub(crate) f: u8,
    pub(crate) b: u8,
    pub(crate) c: u8,
    pub(crate) d: u8,
    pub(crate) e: u8,
    pub(crate) h: u8,
    pub(crate) l: u8,
    pub(crate) sp: u16,
    pub(crate) pc: u16,
}

impl Registers {
    #[inline]
    pub fn a(&self) -> u8 {
        self.a
    }

    #[inline]
    pub fn f(&self) -> u8 {
        self.f
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.b
    }

    #[inline]
    pub fn c(&self) -> u8 {
        self.c
    }

    #[inline]
    pub fn d(&self) -> u8 {
        self.d
    }

    #[inline]
    pub fn e(&self) -> u8 {
        self.e
    }

    #[inline]
    pub fn h(&self) -> u8 {
        self.h
    }

    #[inline]
    pub fn l(&self) -> u8 {
        self.l
    }

    #[inline]
    pub fn sp(&self) -> u16 {
        self.sp
    }

    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    #[inline]
    pub fn af(&self) -> u16 {
        bit::combine(self.f & 0xF0, self.a)
    }

    #[inline]
    pub(crate) fn set_af(&mut self, value: u16) {
        self.a = bit::high(value);
        // Lower 4 bits of F are always zero.
        self.f = bit::low(value) & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        bit::combine(self.c, self.b)
    }

    #[inline]
    pub(crate) fn set_bc(&mut self, value: u16) {
        self.b = bit::high(value);
        self.c = bit::low(value);
    }

    #[inline]
    pub fn de(&self) -> u16 {
        bit::combine(self.e, self.d)
    }

    #[inline]
    pub(crate) fn set_de(&mut self, value: u16) {
        self.d = bit::high(value);
        self.e = bit::low(value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        bit::combine(self.l, self.h)
    }

    #[inline]
    pub(crate) fn set_hl(&mut self, value: u16) {
        self.h = bit::high(value);
        self.l = bit::low(value);
    }
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        bit::is_set(flag as u8, self.regs.f)
    }

    #[inline]
    pub(crate) fn set_flag(&mut self, flag: Flag, value: bool) {
        let index = flag as u8;
        self.regs.f = if value {
            bit::set(index, self.regs.f)
        } else {
            bit::clear(index, self.regs.f)
        };
    }

    /// Set all four flags at once.
    #[inline]
    pub(super) fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.regs.f = ((z as u8) << 7) | ((n as u8) << 6) | ((h as u8) << 5) | ((c as u8) << 4);
    }
}
