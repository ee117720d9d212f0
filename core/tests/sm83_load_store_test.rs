mod common;

use boytracer_core::core::{Bus, BusMaster};
use boytracer_core::cpu::sm83::Sm83;
use common::TestBus;

const MASTER: BusMaster = BusMaster::Cpu(0);

fn run_at(cpu: &mut Sm83, bus: &mut TestBus, pc: u16) -> u8 {
    cpu.pc = pc;
    cpu.fetch_decode_execute(bus, MASTER)
}

#[test]
fn ld_r_d8_loads_the_immediate_into_a() {
    let mut bus = TestBus::new();
    bus.load(0x0100, &[0x3E, 0x42]); // LD A,0x42
    let mut cpu = Sm83::new();

    let cycles = run_at(&mut cpu, &mut bus, 0x0100);
    assert_eq!(cpu.a, 0x42);
    assert_eq!(cycles, 8);
    assert_eq!(cpu.pc, 0x0102);
}

#[test]
fn ld_hl_plus_and_minus_round_trip_through_memory() {
    let mut bus = TestBus::new();
    bus.load(0x0100, &[0x22, 0x2A]); // LD (HL+),A ; LD A,(HL+)
    let mut cpu = Sm83::new();
    cpu.a = 0x99;
    cpu.set_hl(0xC000);

    run_at(&mut cpu, &mut bus, 0x0100);
    assert_eq!(bus.memory[0xC000], 0x99);
    assert_eq!(cpu.get_hl(), 0xC001);

    cpu.a = 0x00;
    run_at(&mut cpu, &mut bus, cpu.pc);
    assert_eq!(cpu.a, 0x99);
    assert_eq!(cpu.get_hl(), 0xC002);
}

#[test]
fn ldh_writes_and_reads_through_the_ff00_page() {
    let mut bus = TestBus::new();
    bus.load(0x0100, &[0xE0, 0x80, 0xF0, 0x80]); // LDH (0x80),A ; LDH A,(0x80)
    let mut cpu = Sm83::new();
    cpu.a = 0x37;

    run_at(&mut cpu, &mut bus, 0x0100);
    assert_eq!(bus.memory[0xFF80], 0x37);

    cpu.a = 0x00;
    run_at(&mut cpu, &mut bus, cpu.pc);
    assert_eq!(cpu.a, 0x37);
}

#[test]
fn ld_a16_sp_stores_sp_little_endian() {
    let mut bus = TestBus::new();
    bus.load(0x0100, &[0x08, 0x00, 0xC0]); // LD (0xC000),SP
    let mut cpu = Sm83::new();
    cpu.sp = 0xBEEF;

    run_at(&mut cpu, &mut bus, 0x0100);
    assert_eq!(bus.memory[0xC000], 0xEF);
    assert_eq!(bus.memory[0xC001], 0xBE);
}

#[test]
fn ld_r_r_copies_between_registers() {
    let mut bus = TestBus::new();
    bus.load(0x0100, &[0x78]); // LD A,B
    let mut cpu = Sm83::new();
    cpu.b = 0x5A;
    cpu.a = 0x00;

    run_at(&mut cpu, &mut bus, 0x0100);
    assert_eq!(cpu.a, 0x5A);
}
