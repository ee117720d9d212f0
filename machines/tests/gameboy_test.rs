use std::sync::{Arc, Mutex};

use boytracer_core::core::machine::Machine;
use boytracer_core::core::{Bus, BusMaster};
use boytracer_core::device::ppu::INT_VBLANK_BIT;
use boytracer_core::device::timer::INT_TIMER_BIT;
use boytracer_machines::GameBoy;
use boytracer_machines::rom_loader::Cartridge;

const MASTER: BusMaster = BusMaster::Cpu(0);
const ADDR_SB: u16 = 0xFF01;
const ADDR_SC: u16 = 0xFF02;
const ADDR_TIMA: u16 = 0xFF05;
const ADDR_TAC: u16 = 0xFF07;
const ADDR_IF: u16 = 0xFF0F;

fn rom_only_cart(program: &[u8]) -> Cartridge {
    let mut data = vec![0u8; 0x8000];
    data[0x0147] = 0x00; // ROM only
    data[0x0148] = 0x00; // 32 KiB
    data[0x0149] = 0x00; // no RAM
    data[0x0100..0x0100 + program.len()].copy_from_slice(program);
    Cartridge::from_bytes(data).unwrap()
}

#[test]
fn serial_write_of_0x81_invokes_the_installed_sink_with_sb() {
    let program = [
        0x3E, 0x41, // LD A,0x41
        0xEA, 0x01, 0xFF, // LD (0xFF01),A   ; SB = 'A'
        0x3E, 0x81, // LD A,0x81
        0xEA, 0x02, 0xFF, // LD (0xFF02),A   ; SC = 0x81, starts transfer
        0x76, // HALT
    ];
    let mut gb = GameBoy::new(rom_only_cart(&program));

    let sent: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let sent_clone = Arc::clone(&sent);
    gb.set_serial_sink(move |byte| sent_clone.lock().unwrap().push(byte));

    gb.run_frame();

    assert_eq!(*sent.lock().unwrap(), vec![0x41]);
}

#[test]
fn timer_overflow_raises_the_timer_interrupt_flag() {
    let mut gb = GameBoy::new(rom_only_cart(&[])); // all-NOP program
    gb.write(MASTER, ADDR_TAC, 0x05); // enabled, fastest rate
    gb.write(MASTER, ADDR_TIMA, 0xFE);

    gb.run_frame(); // one frame is ~70224 T-cycles, far more than needed

    assert_ne!(gb.read(MASTER, ADDR_IF) & INT_TIMER_BIT, 0);
}

#[test]
fn one_frame_of_cycles_raises_the_vblank_interrupt() {
    let mut gb = GameBoy::new(rom_only_cart(&[])); // all-NOP program

    gb.run_frame();

    assert_ne!(gb.read(MASTER, ADDR_IF) & INT_VBLANK_BIT, 0);
}

#[test]
fn reset_restores_power_on_io_defaults_but_keeps_the_cartridge() {
    let mut gb = GameBoy::new(rom_only_cart(&[0x3C])); // INC A
    gb.write(MASTER, ADDR_TAC, 0xFF);
    gb.reset();

    assert_eq!(gb.read(MASTER, ADDR_TAC), 0xF8);
    assert_eq!(gb.cpu_pc(), 0x0100);
}

#[test]
fn writes_into_echo_ram_are_dropped_and_recorded_as_violations() {
    let mut gb = GameBoy::new(rom_only_cart(&[]));
    assert!(gb.last_bus_violation().is_none());

    gb.write(MASTER, 0xE000, 0x7A);
    assert_eq!(gb.read(MASTER, 0xC000), 0x00, "echo RAM writes must not reach WRAM");
    assert!(gb.last_bus_violation().is_some());
}
