use crate::core::{Bus, BusMaster};
use crate::cpu::sm83::{Flag, Sm83};

impl Sm83 {
    fn read_operand<B>(&mut self, r: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        if r == 6 {
            bus.read(master, self.get_hl())
        } else {
            self.get_reg8(r)
        }
    }

    fn write_operand<B>(&mut self, r: u8, val: u8, bus: &mut B, master: BusMaster)
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        if r == 6 {
            bus.write(master, self.get_hl(), val);
        } else {
            self.set_reg8(r, val);
        }
    }

    fn rlc(&mut self, val: u8) -> u8 {
        let carry = val & 0x80 != 0;
        let result = val.rotate_left(1);
        self.set_shift_flags(result, carry);
        result
    }

    fn rrc(&mut self, val: u8) -> u8 {
        let carry = val & 0x01 != 0;
        let result = val.rotate_right(1);
        self.set_shift_flags(result, carry);
        result
    }

    fn rl(&mut self, val: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C) as u8;
        let carry_out = val & 0x80 != 0;
        let result = (val << 1) | carry_in;
        self.set_shift_flags(result, carry_out);
        result
    }

    fn rr(&mut self, val: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C) as u8;
        let carry_out = val & 0x01 != 0;
        let result = (val >> 1) | (carry_in << 7);
        self.set_shift_flags(result, carry_out);
        result
    }

    fn sla(&mut self, val: u8) -> u8 {
        let carry = val & 0x80 != 0;
        let result = val << 1;
        self.set_shift_flags(result, carry);
        result
    }

    /// SRA preserves bit 7 (arithmetic shift).
    fn sra(&mut self, val: u8) -> u8 {
        let carry = val & 0x01 != 0;
        let result = (val >> 1) | (val & 0x80);
        self.set_shift_flags(result, carry);
        result
    }

    fn srl(&mut self, val: u8) -> u8 {
        let carry = val & 0x01 != 0;
        let result = val >> 1;
        self.set_shift_flags(result, carry);
        result
    }

    fn swap(&mut self, val: u8) -> u8 {
        let result = (val << 4) | (val >> 4);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, false);
        result
    }

    fn set_shift_flags(&mut self, result: u8, carry: bool) {
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, carry);
    }

    /// CB-page dispatch. All 256 slots are defined; the only variability
    /// is whether the operand is a plain register (8 cycles... 4 for
    /// simple bit tests) or `(HL)` (extra bus round trip).
    pub(super) fn execute_cb<B>(&mut self, opcode: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let r = opcode & 0x07;
        let group = opcode >> 6;
        let indirect = r == 6;

        match group {
            0 => {
                // Rotate/shift/swap, selected by bits 3-5.
                let op = (opcode >> 3) & 0x07;
                let val = self.read_operand(r, bus, master);
                let result = match op {
                    0 => self.rlc(val),
                    1 => self.rrc(val),
                    2 => self.rl(val),
                    3 => self.rr(val),
                    4 => self.sla(val),
                    5 => self.sra(val),
                    6 => self.swap(val),
                    7 => self.srl(val),
                    _ => unreachable!(),
                };
                self.write_operand(r, result, bus, master);
                if indirect { 16 } else { 8 }
            }
            1 => {
                // BIT b,r / BIT b,(HL)
                let bit = (opcode >> 3) & 0x07;
                let val = self.read_operand(r, bus, master);
                self.set_flag(Flag::Z, val & (1 << bit) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
                if indirect { 12 } else { 8 }
            }
            2 => {
                // RES b,r / RES b,(HL)
                let bit = (opcode >> 3) & 0x07;
                let val = self.read_operand(r, bus, master);
                self.write_operand(r, val & !(1 << bit), bus, master);
                if indirect { 16 } else { 8 }
            }
            3 => {
                // SET b,r / SET b,(HL)
                let bit = (opcode >> 3) & 0x07;
                let val = self.read_operand(r, bus, master);
                self.write_operand(r, val | (1 << bit), bus, master);
                if indirect { 16 } else { 8 }
            }
            _ => unreachable!(),
        }
    }
}
