use std::path::{Path, PathBuf};

use boytracer_core::core::machine::Machine;
use boytracer_machines::GameBoy;
use boytracer_machines::rom_loader::Cartridge;
use clap::Parser;

mod emulator;
mod input;
mod video;

/// Minimal SDL2 host for the handheld core: loads a ROM, runs it, and
/// persists battery-backed RAM to a sidecar `.sav` file next to the ROM.
#[derive(Parser)]
struct Args {
    /// Path to a ROM image.
    rom: PathBuf,

    /// Scale factor for the display window.
    #[arg(long, default_value_t = 3)]
    scale: u32,

    /// Log one disassembled line per retired instruction to stderr.
    #[arg(long)]
    trace: bool,
}

fn main() {
    let args = Args::parse();

    let cart = match Cartridge::from_file(&args.rom) {
        Ok(cart) => cart,
        Err(e) => {
            eprintln!("Failed to load ROM: {e}");
            std::process::exit(1);
        }
    };

    let mut gb = GameBoy::new(cart);
    gb.set_trace(args.trace);

    let sav_path = nvram_path_for(&args.rom);
    if let Ok(data) = std::fs::read(&sav_path) {
        gb.load_nvram(&data);
    }

    let key_map = input::default_key_map(gb.input_map());
    gb.reset();
    emulator::run(&mut gb, &key_map, args.scale);

    if let Some(data) = gb.save_nvram()
        && let Err(e) = std::fs::write(&sav_path, data)
    {
        eprintln!("Warning: failed to save NVRAM: {e}");
    }

    if let Some(err) = gb.last_error() {
        eprintln!("Emulation halted: {err}");
        std::process::exit(1);
    }
}

fn nvram_path_for(rom_path: &Path) -> PathBuf {
    rom_path.with_extension("sav")
}
