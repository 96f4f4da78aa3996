/// Abstraction over the Game Boy bus as seen by the CPU.
///
/// The CPU borrows the bus for the duration of a single step and never
/// keeps a copy of any memory state. `Mmu` is the production
/// implementation; tests use a flat 64 KiB array.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
}
