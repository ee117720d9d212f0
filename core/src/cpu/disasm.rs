//! Disassembler: turns opcode bytes into the same mnemonics documented in
//! the instruction groups, used for trace output and tooling. Shares the
//! opcode-length convention with the execution engine so the two can
//! never disagree about how many operand bytes an instruction consumes.

const REG8_NAMES: [&str; 8] = ["B", "C", "D", "E", "H", "L", "(HL)", "A"];
const RR_NAMES: [&str; 4] = ["BC", "DE", "HL", "SP"];
const COND_NAMES: [&str; 4] = ["NZ", "Z", "NC", "C"];

/// Number of bytes the instruction at `opcode` occupies, *including* the
/// opcode byte itself but *excluding* the 0xCB prefix byte (CB-prefixed
/// instructions are always exactly 2 bytes: 0xCB + the page byte).
pub fn instruction_length(opcode: u8) -> u8 {
    match opcode {
        0xCB => 2,
        // 3-byte: 16-bit immediate or absolute address operand.
        0x01 | 0x11 | 0x21 | 0x31 | 0x08 | 0xC2 | 0xC3 | 0xCA | 0xD2 | 0xDA | 0xC4 | 0xCC
        | 0xD4 | 0xDC | 0xCD | 0xEA | 0xFA => 3,
        // 2-byte: 8-bit immediate, signed displacement, or zero-page offset.
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E | 0x18 | 0x20 | 0x28 | 0x30
        | 0x38 | 0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE | 0xE0 | 0xF0 | 0xE8
        | 0xF8 | 0x10 => 2,
        _ => 1,
    }
}

fn reg8(index: u8) -> &'static str {
    REG8_NAMES[index as usize]
}

fn rr16(opcode: u8) -> &'static str {
    RR_NAMES[((opcode >> 4) & 0x03) as usize]
}

fn cond(opcode: u8) -> &'static str {
    COND_NAMES[((opcode >> 3) & 0x03) as usize]
}

fn alu_mnemonic(alu_op: u8) -> &'static str {
    ["ADD A,", "ADC A,", "SUB", "SBC A,", "AND", "XOR", "OR", "CP"][alu_op as usize]
}

/// Disassembles one base-page instruction. `operands` holds exactly
/// `instruction_length(opcode) - 1` bytes (little-endian for 16-bit
/// immediates), or for `0xCB` the single CB-page opcode byte.
pub fn disassemble(opcode: u8, operands: &[u8]) -> String {
    if opcode == 0xCB {
        return disassemble_cb(operands[0]);
    }

    let imm8 = || operands[0];
    let imm16 = || u16::from_le_bytes([operands[0], operands[1]]);
    let e8 = || operands[0] as i8;

    match opcode {
        0x00 => "NOP".into(),
        0x10 => "STOP".into(),
        0x76 => "HALT".into(),
        0xF3 => "DI".into(),
        0xFB => "EI".into(),
        0x07 => "RLCA".into(),
        0x0F => "RRCA".into(),
        0x17 => "RLA".into(),
        0x1F => "RRA".into(),
        0x27 => "DAA".into(),
        0x2F => "CPL".into(),
        0x37 => "SCF".into(),
        0x3F => "CCF".into(),
        0xC9 => "RET".into(),
        0xD9 => "RETI".into(),
        0xE9 => "JP HL".into(),
        0xF9 => "LD SP,HL".into(),
        0x01 | 0x11 | 0x21 | 0x31 => format!("LD {},${:04X}", rr16(opcode), imm16()),
        0x08 => format!("LD (${:04X}),SP", imm16()),
        0x09 | 0x19 | 0x29 | 0x39 => format!("ADD HL,{}", rr16(opcode)),
        0x03 | 0x13 | 0x23 | 0x33 => format!("INC {}", rr16(opcode)),
        0x0B | 0x1B | 0x2B | 0x3B => format!("DEC {}", rr16(opcode)),
        0x02 => "LD (BC),A".into(),
        0x12 => "LD (DE),A".into(),
        0x0A => "LD A,(BC)".into(),
        0x1A => "LD A,(DE)".into(),
        0x22 => "LD (HL+),A".into(),
        0x32 => "LD (HL-),A".into(),
        0x2A => "LD A,(HL+)".into(),
        0x3A => "LD A,(HL-)".into(),
        0xE0 => format!("LDH (${:02X}),A", imm8()),
        0xF0 => format!("LDH A,(${:02X})", imm8()),
        0xE2 => "LD (C),A".into(),
        0xF2 => "LD A,(C)".into(),
        0xEA => format!("LD (${:04X}),A", imm16()),
        0xFA => format!("LD A,(${:04X})", imm16()),
        0xE8 => format!("ADD SP,{}", e8()),
        0xF8 => format!("LD HL,SP{:+}", e8()),
        0x18 => format!("JR ${:02X}", imm8()),
        0x20 | 0x28 | 0x30 | 0x38 => format!("JR {},${:02X}", cond(opcode), imm8()),
        0xC3 => format!("JP ${:04X}", imm16()),
        0xC2 | 0xCA | 0xD2 | 0xDA => format!("JP {},${:04X}", cond(opcode), imm16()),
        0xCD => format!("CALL ${:04X}", imm16()),
        0xC4 | 0xCC | 0xD4 | 0xDC => format!("CALL {},${:04X}", cond(opcode), imm16()),
        0xC0 | 0xC8 | 0xD0 | 0xD8 => format!("RET {}", cond(opcode)),
        0xC1 | 0xD1 | 0xE1 | 0xF1 => format!("POP {}", push_pop_name(opcode)),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => format!("PUSH {}", push_pop_name(opcode)),
        op if (op & 0xC7) == 0xC7 => format!("RST ${:02X}", op & 0x38),
        op if (op & 0xC0) == 0x00 && (op & 0x07) == 0x04 => {
            format!("INC {}", reg8((op >> 3) & 0x07))
        }
        op if (op & 0xC0) == 0x00 && (op & 0x07) == 0x05 => {
            format!("DEC {}", reg8((op >> 3) & 0x07))
        }
        op if (op & 0xC0) == 0x00 && (op & 0x07) == 0x06 => {
            format!("LD {},${:02X}", reg8((op >> 3) & 0x07), imm8())
        }
        op if (op & 0xC0) == 0x40 => {
            format!("LD {},{}", reg8((op >> 3) & 0x07), reg8(op & 0x07))
        }
        op if (op & 0xC0) == 0x80 => {
            let mnemonic = alu_mnemonic((op >> 3) & 0x07);
            format!("{mnemonic} {}", reg8(op & 0x07))
        }
        op if (op & 0xC0) == 0xC0 && (op & 0x07) == 0x06 => {
            let mnemonic = alu_mnemonic((op >> 3) & 0x07);
            format!("{mnemonic} ${:02X}", imm8())
        }
        _ => format!("DB ${opcode:02X}"),
    }
}

fn push_pop_name(opcode: u8) -> &'static str {
    match opcode & 0x30 {
        0x00 => "BC",
        0x10 => "DE",
        0x20 => "HL",
        0x30 => "AF",
        _ => unreachable!(),
    }
}

fn disassemble_cb(opcode: u8) -> String {
    let r = reg8(opcode & 0x07);
    let bit = (opcode >> 3) & 0x07;
    match opcode >> 6 {
        0 => {
            let name = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"][((opcode >> 3) & 0x07) as usize];
            format!("{name} {r}")
        }
        1 => format!("BIT {bit},{r}"),
        2 => format!("RES {bit},{r}"),
        3 => format!("SET {bit},{r}"),
        _ => unreachable!(),
    }
}
