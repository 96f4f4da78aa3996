use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jeebie::RunConfig;

/// Headless Game Boy runner
#[derive(Parser, Debug)]
#[command(name = "jeebie")]
#[command(about = "Run and inspect Game Boy ROMs without a window", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cartridge header and validate logo and checksums
    Info {
        /// Path to the ROM image
        rom: PathBuf,
    },
    /// Run the ROM headless and dump the CPU state at the end
    Run {
        /// Path to the ROM image
        rom: PathBuf,

        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u64,

        /// Run this many CPU steps instead of whole frames
        #[arg(short, long)]
        steps: Option<u64>,

        /// Skip the final CPU state dump
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let result = match args.command {
        Command::Info { rom } => jeebie::info(&rom).map(|text| print!("{text}")),
        Command::Run {
            rom,
            frames,
            steps,
            quiet,
        } => {
            let config = RunConfig::builder()
                .rom_path(rom)
                .frames(frames)
                .steps(steps)
                .dump_cpu(!quiet)
                .build();
            jeebie::run(&config).map(|report| {
                println!("'{}': {} frames", report.title, report.frames);
                if config.dump_cpu {
                    println!("{}", report.cpu_dump());
                }
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
