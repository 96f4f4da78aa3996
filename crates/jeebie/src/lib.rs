use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jeebie_gb::cpu::{Flag, Registers};
use jeebie_gb::{Cartridge, GameBoy, HeadlessVideo};
use typed_builder::TypedBuilder;

/// Settings for one headless run.
#[derive(TypedBuilder, Clone, Debug)]
pub struct RunConfig {
    pub rom_path: PathBuf,
    /// Frames to run when no step budget is given.
    #[builder(default = 60)]
    pub frames: u64,
    /// Run exactly this many CPU steps instead of whole frames.
    #[builder(default)]
    pub steps: Option<u64>,
    #[builder(default = false)]
    pub dump_cpu: bool,
}

/// What a finished run leaves behind.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub title: String,
    /// VBlank periods entered.
    pub frames: u64,
    pub cycles: u64,
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
}

impl RunReport {
    fn capture(gb: &GameBoy, video: &HeadlessVideo) -> Self {
        let cpu = gb.cpu();
        Self {
            title: gb.cartridge().map(|c| c.title().to_string()).unwrap_or_default(),
            frames: video.frames(),
            cycles: cpu.cycles(),
            regs: *cpu.regs(),
            ime: cpu.ime(),
            halted: cpu.is_halted(),
        }
    }

    /// Register dump in the usual `AF BC DE HL SP PC` layout.
    pub fn cpu_dump(&self) -> String {
        let r = &self.regs;
        let flag = |set: bool, name: char| if set { name } else { '-' };
        let f = r.f();
        format!(
            "AF:{:04X} BC:{:04X} DE:{:04X} HL:{:04X} SP:{:04X} PC:{:04X} \
             F:[{}{}{}{}] IME:{} HALT:{} cycles:{}",
            r.af(),
            r.bc(),
            r.de(),
            r.hl(),
            r.sp(),
            r.pc(),
            flag(f & (1 << Flag::Z as u8) != 0, 'Z'),
            flag(f & (1 << Flag::N as u8) != 0, 'N'),
            flag(f & (1 << Flag::H as u8) != 0, 'H'),
            flag(f & (1 << Flag::C as u8) != 0, 'C'),
            self.ime as u8,
            self.halted as u8,
            self.cycles,
        )
    }
}

pub fn load_cartridge(path: &Path) -> Result<Cartridge> {
    let rom = std::fs::read(path)
        .with_context(|| format!("Failed to read ROM file '{}'", path.display()))?;
    let cartridge = Cartridge::load(&rom)
        .with_context(|| format!("Failed to load cartridge '{}'", path.display()))?;
    Ok(cartridge)
}

/// Run a ROM headless until the frame or step budget is spent.
///
/// An illegal opcode ends the run with an error carrying the PC and cycle
/// count at the point of failure.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let cartridge = load_cartridge(&config.rom_path)?;
    let mut gb = GameBoy::new(Some(cartridge));
    let mut video = HeadlessVideo::new();

    match config.steps {
        Some(steps) => {
            log::info!("Running {} steps", steps);
            for step in 0..steps {
                gb.tick(&mut video)
                    .with_context(|| format!("CPU stopped at step {step}"))?;
            }
        }
        None => {
            log::info!("Running {} frames", config.frames);
            for frame in 0..config.frames {
                gb.step_frame(&mut video)
                    .with_context(|| format!("CPU stopped during frame {frame}"))?;
            }
        }
    }

    let report = RunReport::capture(&gb, &video);
    log::debug!("Run finished: {}", report.cpu_dump());
    Ok(report)
}

/// Human-readable header summary with logo and checksum validation.
pub fn describe_cartridge(cartridge: &Cartridge) -> String {
    let header = cartridge.header();
    let rom = cartridge.as_bytes();
    let kind = header.kind();

    let size = |bytes: Option<usize>| match bytes {
        Some(b) => format!("{} KiB", b / 1024),
        None => "unknown".to_string(),
    };
    let verdict = |ok: bool| if ok { "ok" } else { "MISMATCH" };

    let features: String = [
        (kind.ram, "+RAM"),
        (kind.battery, "+BATTERY"),
        (kind.timer, "+TIMER"),
        (kind.rumble, "+RUMBLE"),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, name)| *name)
    .collect();
    let destination = if header.destination_code == 0 {
        "Japan"
    } else {
        "Overseas"
    };

    format!(
        "Title:           {title}\n\
         Type:            0x{cart_type:02X} ({mapper:?}{features})\n\
         ROM size:        {rom_size} (code 0x{rom_code:02X})\n\
         RAM size:        {ram_size} (code 0x{ram_code:02X})\n\
         CGB flag:        0x{cgb:02X}\n\
         SGB flag:        0x{sgb:02X}\n\
         Destination:     {destination}\n\
         Licensee:        0x{licensee:02X}\n\
         Version:         {version}\n\
         Logo:            {logo}\n\
         Header checksum: 0x{header_sum:02X} {header_ok}\n\
         Global checksum: 0x{global_sum:04X} {global_ok}\n",
        title = header.title,
        cart_type = header.cartridge_type,
        mapper = kind.mapper,
        rom_size = size(header.rom_size_bytes()),
        rom_code = header.rom_size,
        ram_size = size(header.ram_size_bytes()),
        ram_code = header.ram_size,
        cgb = header.cgb_flag,
        sgb = header.sgb_flag,
        licensee = header.old_licensee_code,
        version = header.version,
        logo = verdict(header.logo_matches()),
        header_sum = header.header_checksum_byte(),
        header_ok = verdict(header.header_checksum_ok(rom)),
        global_sum = header.global_checksum,
        global_ok = verdict(header.global_checksum_ok(rom)),
    )
}

pub fn info(path: &Path) -> Result<String> {
    let cartridge = load_cartridge(path)?;
    Ok(describe_cartridge(&cartridge))
}
