use crate::core::{Bus, BusMaster};
use crate::cpu::sm83::{Flag, Sm83};

impl Sm83 {
    /// Evaluates NZ/Z/NC/C for the conditional JR/JP/CALL/RET forms.
    /// The condition field occupies bits 3-4 of the opcode.
    fn condition_met(&self, opcode: u8) -> bool {
        match (opcode >> 3) & 0x03 {
            0 => !self.get_flag(Flag::Z), // NZ
            1 => self.get_flag(Flag::Z),  // Z
            2 => !self.get_flag(Flag::C), // NC
            3 => self.get_flag(Flag::C),  // C
            _ => unreachable!(),
        }
    }

    fn fetch_d16<B>(&mut self, bus: &mut B, master: BusMaster) -> u16
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let lo = bus.read(master, self.pc);
        self.pc = self.pc.wrapping_add(1);
        let hi = bus.read(master, self.pc);
        self.pc = self.pc.wrapping_add(1);
        u16::from_be_bytes([hi, lo])
    }

    pub(super) fn op_jp<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        self.pc = self.fetch_d16(bus, master);
        16
    }

    pub(super) fn op_jp_cond<B>(&mut self, opcode: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let target = self.fetch_d16(bus, master);
        if self.condition_met(opcode) {
            self.pc = target;
            16
        } else {
            12
        }
    }

    pub(super) fn op_jr<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let offset = bus.read(master, self.pc) as i8;
        self.pc = self.pc.wrapping_add(1);
        self.pc = self.pc.wrapping_add_signed(offset as i16);
        12
    }

    pub(super) fn op_jr_cond<B>(&mut self, opcode: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let offset = bus.read(master, self.pc) as i8;
        self.pc = self.pc.wrapping_add(1);
        if self.condition_met(opcode) {
            self.pc = self.pc.wrapping_add_signed(offset as i16);
            12
        } else {
            8
        }
    }

    pub(super) fn op_call<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let target = self.fetch_d16(bus, master);
        self.push16(bus, master, self.pc);
        self.pc = target;
        24
    }

    pub(super) fn op_call_cond<B>(&mut self, opcode: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let target = self.fetch_d16(bus, master);
        if self.condition_met(opcode) {
            self.push16(bus, master, self.pc);
            self.pc = target;
            24
        } else {
            12
        }
    }

    pub(super) fn op_ret<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        self.pc = self.pop16(bus, master);
        16
    }

    pub(super) fn op_ret_cond<B>(&mut self, opcode: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        if self.condition_met(opcode) {
            self.pc = self.pop16(bus, master);
            20
        } else {
            8
        }
    }

    pub(super) fn op_reti<B>(&mut self, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        self.pc = self.pop16(bus, master);
        self.ime = true;
        16
    }

    /// RST n — n is the 3-bit field times 8, opcode mask 11 nnn 111.
    pub(super) fn op_rst<B>(&mut self, opcode: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let target = (opcode & 0x38) as u16;
        self.push16(bus, master, self.pc);
        self.pc = target;
        16
    }
}
