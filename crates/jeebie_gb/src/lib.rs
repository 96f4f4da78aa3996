pub mod bit;
pub mod cartridge;
pub mod cpu;
pub mod interrupt;
pub mod machine;
pub mod mmu;
pub mod video;

pub use cartridge::{Cartridge, CartridgeError};
pub use cpu::{Cpu, StepError};
pub use machine::GameBoy;
pub use mmu::Mmu;
pub use video::{HeadlessVideo, VideoPipeline};
