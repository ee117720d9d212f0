//! Error types shared across the CPU, bus and scheduler.

use std::fmt;

/// Kind of bus access that triggered a [`EmulatorError::BusViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusAccess {
    Read,
    Write,
}

impl fmt::Display for BusAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Errors raised by the core while loading a ROM or executing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmulatorError {
    /// ROM image failed to load or its header is unsupported.
    RomLoad { reason: String },

    /// Access to echo RAM or the unusable region (0xFEA0-0xFEFF).
    BusViolation { addr: u16, access: BusAccess },

    /// Opcode has no defined behaviour (0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB,
    /// 0xEC, 0xED, 0xF4, 0xFC, 0xFD, or any CB page slot all 256 of which
    /// are defined but whose underlying (HL) access faulted).
    InvalidOpcode { opcode: u8, pc: u16 },

    /// The implementation itself violated an invariant it is supposed to
    /// uphold (FIFO overrun, register encoding out of range, ...).
    InternalInvariant { msg: String },
}

impl fmt::Display for EmulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RomLoad { reason } => write!(f, "ROM load failed: {reason}"),
            Self::BusViolation { addr, access } => {
                write!(f, "bus violation: {access} at 0x{addr:04X}")
            }
            Self::InvalidOpcode { opcode, pc } => {
                write!(f, "invalid opcode 0x{opcode:02X} at PC=0x{pc:04X}")
            }
            Self::InternalInvariant { msg } => write!(f, "internal invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for EmulatorError {}
