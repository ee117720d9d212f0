use crate::core::{Bus, BusMaster};
use crate::cpu::sm83::Sm83;

impl Sm83 {
    fn fetch_d8<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let val = bus.read(master, self.pc);
        self.pc = self.pc.wrapping_add(1);
        val
    }

    fn fetch_d16<B>(&mut self, bus: &mut B, master: BusMaster) -> u16
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let lo = self.fetch_d8(bus, master);
        let hi = self.fetch_d8(bus, master);
        u16::from_be_bytes([hi, lo])
    }

    /// LD r,r' / LD r,(HL) / LD (HL),r — opcode mask 01 ddd sss.
    /// (0x76, dst=(HL) src=(HL), is HALT and never reaches here.)
    pub(super) fn op_ld_r_r<B>(&mut self, dst: u8, src: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        match (dst, src) {
            (6, 6) => unreachable!("0x76 is HALT, handled before dispatch"),
            (6, s) => {
                bus.write(master, self.get_hl(), self.get_reg8(s));
                8
            }
            (d, 6) => {
                let val = bus.read(master, self.get_hl());
                self.set_reg8(d, val);
                8
            }
            (d, s) => {
                let val = self.get_reg8(s);
                self.set_reg8(d, val);
                4
            }
        }
    }

    /// LD r,d8 / LD (HL),d8 — opcode mask 00 rrr 110.
    pub(super) fn op_ld_r_d8<B>(&mut self, r: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let val = self.fetch_d8(bus, master);
        if r == 6 {
            bus.write(master, self.get_hl(), val);
            12
        } else {
            self.set_reg8(r, val);
            8
        }
    }

    /// LD BC/DE/HL/SP,d16 — opcode mask 00 rr0 001.
    pub(super) fn op_ld_rr_d16<B>(&mut self, opcode: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let val = self.fetch_d16(bus, master);
        match opcode {
            0x01 => self.set_bc(val),
            0x11 => self.set_de(val),
            0x21 => self.set_hl(val),
            0x31 => self.sp = val,
            _ => unreachable!(),
        }
        12
    }

    /// LD (a16),SP.
    pub(super) fn op_ld_a16_sp<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let addr = self.fetch_d16(bus, master);
        let [hi, lo] = self.sp.to_be_bytes();
        bus.write(master, addr, lo);
        bus.write(master, addr.wrapping_add(1), hi);
        20
    }

    pub(super) fn op_ld_a16_a<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let addr = self.fetch_d16(bus, master);
        bus.write(master, addr, self.a);
        16
    }

    pub(super) fn op_ld_a_a16<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let addr = self.fetch_d16(bus, master);
        self.a = bus.read(master, addr);
        16
    }

    /// LDH (0xFF00+d8),A.
    pub(super) fn op_ldh_a8_a<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let offset = self.fetch_d8(bus, master);
        bus.write(master, 0xFF00 | offset as u16, self.a);
        12
    }

    /// LDH A,(0xFF00+d8).
    pub(super) fn op_ldh_a_a8<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let offset = self.fetch_d8(bus, master);
        self.a = bus.read(master, 0xFF00 | offset as u16);
        12
    }
}
