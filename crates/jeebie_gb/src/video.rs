use crate::interrupt::Interrupt;
use crate::mmu::Mmu;

/// LCD Y coordinate register.
pub const LY_ADDR: u16 = 0xFF44;

pub const CYCLES_PER_LINE: u32 = 456;
pub const LINES_PER_FRAME: u8 = 154;
/// First line of the vertical blanking period.
pub const VBLANK_LINE: u8 = 144;
pub const CYCLES_PER_FRAME: u32 = CYCLES_PER_LINE * LINES_PER_FRAME as u32;

/// Anything that consumes CPU time to produce frames.
///
/// The machine calls `tick` after every CPU step with the cycles that step
/// took. Implementations talk to the rest of the system only through the
/// bus, e.g. to publish LY or raise the VBlank interrupt.
pub trait VideoPipeline {
    fn tick(&mut self, mmu: &mut Mmu, cycles: u32);
}

/// Scanline timing without pixels.
///
/// Walks LY through the 154 lines of a frame and requests VBlank when line
/// 144 starts. Enough for software that waits on LY or VBlank.
#[derive(Clone, Debug, Default)]
pub struct HeadlessVideo {
    line_cycles: u32,
    ly: u8,
    frames: u64,
}

impl HeadlessVideo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ly(&self) -> u8 {
        self.ly
    }

    /// Number of VBlank periods entered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl VideoPipeline for HeadlessVideo {
    fn tick(&mut self, mmu: &mut Mmu, cycles: u32) {
        self.line_cycles += cycles;

        while self.line_cycles >= CYCLES_PER_LINE {
            self.line_cycles -= CYCLES_PER_LINE;
            self.ly = (self.ly + 1) % LINES_PER_FRAME;

            if self.ly == VBLANK_LINE {
                self.frames += 1;
                mmu.request_interrupt(Interrupt::VBlank);
                log::trace!("GB video: vblank frame={}", self.frames);
            }
        }

        mmu.write(LY_ADDR, self.ly);
    }
}
