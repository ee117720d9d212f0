use crate::core::{Bus, BusMaster};
use crate::cpu::sm83::{Flag, Sm83};

impl Sm83 {
    // --- Flag-computing ALU primitives ---
    // H is carry out of bit 3 into bit 4 (or the equivalent borrow for
    // subtraction); C is carry out of bit 7 (or borrow).

    fn do_add(&mut self, val: u8, carry_in: bool) {
        let a = self.a;
        let c = if carry_in && self.get_flag(Flag::C) { 1u16 } else { 0 };
        let result16 = a as u16 + val as u16 + c;
        let result = result16 as u8;

        self.a = result;
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (a & 0x0F) + (val & 0x0F) + c as u8 > 0x0F);
        self.set_flag(Flag::C, result16 > 0xFF);
    }

    fn do_sub(&mut self, val: u8, carry_in: bool) -> u8 {
        let a = self.a;
        let c = if carry_in && self.get_flag(Flag::C) { 1u16 } else { 0 };
        let result16 = (a as u16).wrapping_sub(val as u16).wrapping_sub(c);
        let result = result16 as u8;

        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (a & 0x0F) < (val & 0x0F) + c as u8);
        self.set_flag(Flag::C, (a as u16) < val as u16 + c);
        result
    }

    fn do_and(&mut self, val: u8) {
        self.a &= val;
        self.set_flag(Flag::Z, self.a == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
        self.set_flag(Flag::C, false);
    }

    fn do_xor(&mut self, val: u8) {
        self.a ^= val;
        self.set_flag(Flag::Z, self.a == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, false);
    }

    fn do_or(&mut self, val: u8) {
        self.a |= val;
        self.set_flag(Flag::Z, self.a == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, false);
    }

    fn do_cp(&mut self, val: u8) {
        // CP sets flags like SUB but leaves A untouched.
        self.do_sub(val, false);
    }

    /// Dispatches ADD/ADC/SUB/SBC/AND/XOR/OR/CP, selected by the 3-bit
    /// `alu_op` field shared by both the `ALU A,r` and `ALU A,n` forms.
    fn perform_alu_op(&mut self, alu_op: u8, val: u8) {
        match alu_op {
            0 => self.do_add(val, false),
            1 => self.do_add(val, true),
            2 => {
                let r = self.do_sub(val, false);
                self.a = r;
            }
            3 => {
                let r = self.do_sub(val, true);
                self.a = r;
            }
            4 => self.do_and(val),
            5 => self.do_xor(val),
            6 => self.do_or(val),
            7 => self.do_cp(val),
            _ => unreachable!(),
        }
    }

    /// ALU A,r / ALU A,(HL) — opcode mask 10 aaa rrr.
    pub(super) fn op_alu_r<B>(&mut self, opcode: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let alu_op = (opcode >> 3) & 0x07;
        let r = opcode & 0x07;
        if r == 6 {
            let val = bus.read(master, self.get_hl());
            self.perform_alu_op(alu_op, val);
            8
        } else {
            let val = self.get_reg8(r);
            self.perform_alu_op(alu_op, val);
            4
        }
    }

    /// ALU A,d8 — opcode mask 11 aaa 110.
    pub(super) fn op_alu_n<B>(&mut self, opcode: u8, bus: &mut B, master: BusMaster) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        let alu_op = (opcode >> 3) & 0x07;
        let val = bus.read(master, self.pc);
        self.pc = self.pc.wrapping_add(1);
        self.perform_alu_op(alu_op, val);
        8
    }

    /// INC/DEC r or (HL) — opcode mask 00 rrr 10x.
    pub(super) fn op_inc_dec_r<B>(
        &mut self,
        r: u8,
        is_dec: bool,
        bus: &mut B,
        master: BusMaster,
    ) -> u8
    where
        B: Bus<Address = u16, Data = u8> + ?Sized,
    {
        if r == 6 {
            let addr = self.get_hl();
            let val = bus.read(master, addr);
            let result = if is_dec {
                self.calc_dec_flags(val)
            } else {
                self.calc_inc_flags(val)
            };
            bus.write(master, addr, result);
            12
        } else {
            let val = self.get_reg8(r);
            let result = if is_dec {
                self.calc_dec_flags(val)
            } else {
                self.calc_inc_flags(val)
            };
            self.set_reg8(r, result);
            4
        }
    }

    fn calc_inc_flags(&mut self, val: u8) -> u8 {
        let result = val.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (val & 0x0F) == 0x0F);
        result
    }

    fn calc_dec_flags(&mut self, val: u8) -> u8 {
        let result = val.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (val & 0x0F) == 0x00);
        result
    }

    // --- rotate-A: always clear Z regardless of result ---

    pub(super) fn op_rlca(&mut self) -> u8 {
        let carry = self.a & 0x80 != 0;
        self.a = self.a.rotate_left(1);
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, carry);
        4
    }

    pub(super) fn op_rrca(&mut self) -> u8 {
        let carry = self.a & 0x01 != 0;
        self.a = self.a.rotate_right(1);
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, carry);
        4
    }

    pub(super) fn op_rla(&mut self) -> u8 {
        let carry_in = self.get_flag(Flag::C) as u8;
        let carry_out = self.a & 0x80 != 0;
        self.a = (self.a << 1) | carry_in;
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, carry_out);
        4
    }

    pub(super) fn op_rra(&mut self) -> u8 {
        let carry_in = self.get_flag(Flag::C) as u8;
        let carry_out = self.a & 0x01 != 0;
        self.a = (self.a >> 1) | (carry_in << 7);
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, carry_out);
        4
    }

    /// Binary-coded-decimal adjust after an 8-bit add/subtract, using the
    /// standard truth table driven by N/H/C.
    pub(super) fn op_daa(&mut self) -> u8 {
        let mut correction: u8 = 0;
        let mut set_c = self.get_flag(Flag::C);
        let n = self.get_flag(Flag::N);
        let h = self.get_flag(Flag::H);

        if h || (!n && (self.a & 0x0F) > 0x09) {
            correction |= 0x06;
        }
        if set_c || (!n && self.a > 0x99) {
            correction |= 0x60;
            set_c = true;
        }

        self.a = if n {
            self.a.wrapping_sub(correction)
        } else {
            self.a.wrapping_add(correction)
        };

        self.set_flag(Flag::Z, self.a == 0);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, set_c);
        4
    }

    pub(super) fn op_cpl(&mut self) -> u8 {
        self.a = !self.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        4
    }

    pub(super) fn op_scf(&mut self) -> u8 {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        4
    }

    pub(super) fn op_ccf(&mut self) -> u8 {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        4
    }
}
