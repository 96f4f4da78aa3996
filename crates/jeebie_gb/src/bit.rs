//! Bit-level helpers shared by the CPU, the bus and the cartridge loader.
//!
//! Every arithmetic instruction's flag behaviour reduces to these, so they
//! are kept pure and total.

/// Combine two bytes into a 16-bit value. `high` ends up in bits 8–15.
#[inline]
pub const fn combine(low: u8, high: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}

#[inline]
pub const fn high(value: u16) -> u8 {
    (value >> 8) as u8
}

#[inline]
pub const fn low(value: u16) -> u8 {
    value as u8
}

/// Wrapping 8-bit addition that also reports whether the mathematical sum
/// exceeded 255.
#[inline]
pub const fn checked_add(a: u8, b: u8) -> (u8, bool) {
    let wide = a as u16 + b as u16;
    (wide as u8, wide & 0xFF00 != 0)
}

/// Wrapping 8-bit subtraction that also reports whether `a < b`.
#[inline]
pub const fn checked_sub(a: u8, b: u8) -> (u8, bool) {
    let wide = (a as u16).wrapping_sub(b as u16);
    (wide as u8, wide & 0xFF00 != 0)
}

/// Carry out of bit 3 for `a + b + carry`.
#[inline]
pub const fn half_carry_add(a: u8, b: u8, carry: bool) -> bool {
    (a & 0x0F) + (b & 0x0F) + carry as u8 > 0x0F
}

/// Borrow from bit 4 for `a - b - borrow`.
#[inline]
pub const fn half_borrow_sub(a: u8, b: u8, borrow: bool) -> bool {
    (a & 0x0F) < (b & 0x0F) + borrow as u8
}

/// Test bit `index` of `value`. Only the low three bits of `index` are used.
#[inline]
pub const fn is_set(index: u8, value: u8) -> bool {
    (value >> (index & 0x07)) & 1 == 1
}

/// Return `value` with bit `index` set. Only the low three bits of `index` are used.
#[inline]
pub const fn set(index: u8, value: u8) -> u8 {
    value | (1 << (index & 0x07))
}

/// Return `value` with bit `index` cleared. Only the low three bits of `index` are used.
#[inline]
pub const fn clear(index: u8, value: u8) -> u8 {
    value & !(1 << (index & 0x07))
}
