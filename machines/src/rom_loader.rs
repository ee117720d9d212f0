//! Cartridge ROM loading and header parsing.
//!
//! Game Boy cartridges ship as a single flat binary (no archive, no
//! per-chip splitting); the only "loading" work is validating its size
//! and reading a handful of fixed-offset header fields.

use std::path::Path;

/// Errors that can occur when loading a cartridge image.
#[derive(Debug)]
pub enum RomLoadError {
    /// Underlying I/O error (file not found, permission denied, etc.)
    Io(std::io::Error),

    /// The image is smaller than the minimum cartridge size (32 KiB) or
    /// larger than the largest size this controller supports (2 MiB).
    SizeOutOfRange(usize),

    /// The image's length is not a power of two, which no real cartridge
    /// ROM size code describes.
    SizeNotPowerOfTwo(usize),

    /// Header byte 0x0147 names a cartridge type this crate does not
    /// implement (anything other than ROM-only or MBC1).
    UnsupportedCartridgeType(u8),
}

impl std::fmt::Display for RomLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::SizeOutOfRange(n) => {
                write!(f, "ROM size {n} bytes is outside the 32 KiB-2 MiB range")
            }
            Self::SizeNotPowerOfTwo(n) => write!(f, "ROM size {n} bytes is not a power of two"),
            Self::UnsupportedCartridgeType(code) => {
                write!(f, "unsupported cartridge type 0x{code:02X}")
            }
        }
    }
}

impl std::error::Error for RomLoadError {}

impl From<std::io::Error> for RomLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Cartridge hardware identified by header byte 0x0147. Only the two
/// forms this crate emulates are named; everything else is rejected at
/// load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartridgeType {
    RomOnly,
    Mbc1 { has_ram: bool, has_battery: bool },
}

impl CartridgeType {
    fn from_header_code(code: u8) -> Result<Self, RomLoadError> {
        match code {
            0x00 => Ok(Self::RomOnly),
            0x01 => Ok(Self::Mbc1 {
                has_ram: false,
                has_battery: false,
            }),
            0x02 => Ok(Self::Mbc1 {
                has_ram: true,
                has_battery: false,
            }),
            0x03 => Ok(Self::Mbc1 {
                has_ram: true,
                has_battery: true,
            }),
            other => Err(RomLoadError::UnsupportedCartridgeType(other)),
        }
    }
}

/// Parsed cartridge header fields relevant to emulation (as opposed to
/// the title/manufacturer bytes, which the frontend has no use for).
pub struct RomHeader {
    pub cartridge_type: CartridgeType,
    pub rom_bank_count: u16,
    pub ram_bank_count: u16,
}

const ADDR_CARTRIDGE_TYPE: usize = 0x0147;
const ADDR_ROM_SIZE: usize = 0x0148;
const ADDR_RAM_SIZE: usize = 0x0149;

fn rom_bank_count_for_code(code: u8) -> Result<u16, RomLoadError> {
    // 0x00-0x08: 32 KiB * 2^code, i.e. 2, 4, 8, ... 512 banks of 16 KiB.
    match code {
        0x00..=0x08 => Ok(2u16 << code),
        other => Err(RomLoadError::SizeOutOfRange(other as usize)),
    }
}

fn ram_bank_count_for_code(code: u8) -> u16 {
    match code {
        0x00 => 0,
        0x02 => 1,
        0x03 => 4,
        0x04 => 16,
        0x05 => 8,
        _ => 0,
    }
}

fn parse_header(data: &[u8]) -> Result<RomHeader, RomLoadError> {
    let cartridge_type = CartridgeType::from_header_code(data[ADDR_CARTRIDGE_TYPE])?;
    let rom_bank_count = rom_bank_count_for_code(data[ADDR_ROM_SIZE])?;
    let ram_bank_count = ram_bank_count_for_code(data[ADDR_RAM_SIZE]);
    Ok(RomHeader {
        cartridge_type,
        rom_bank_count,
        ram_bank_count,
    })
}

fn validate_size(data: &[u8]) -> Result<(), RomLoadError> {
    const MIN: usize = 0x8000; // 32 KiB
    const MAX: usize = 0x20_0000; // 2 MiB
    if data.len() < MIN || data.len() > MAX {
        return Err(RomLoadError::SizeOutOfRange(data.len()));
    }
    if !data.len().is_power_of_two() {
        return Err(RomLoadError::SizeNotPowerOfTwo(data.len()));
    }
    Ok(())
}

/// A loaded cartridge image plus its parsed header.
pub struct Cartridge {
    pub data: Vec<u8>,
    pub header: RomHeader,
}

impl Cartridge {
    /// Loads and validates a cartridge image from a flat binary file.
    pub fn from_file(path: &Path) -> Result<Self, RomLoadError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Loads and validates a cartridge image already in memory (used by
    /// tests and by frontends that fetch ROM bytes some other way).
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, RomLoadError> {
        validate_size(&data)?;
        let header = parse_header(&data)?;
        Ok(Self { data, header })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_rom_only() -> Vec<u8> {
        let mut data = vec![0u8; 0x8000];
        data[ADDR_CARTRIDGE_TYPE] = 0x00;
        data[ADDR_ROM_SIZE] = 0x00;
        data[ADDR_RAM_SIZE] = 0x00;
        data
    }

    #[test]
    fn loads_minimal_rom_only_cartridge() {
        let cart = Cartridge::from_bytes(minimal_rom_only()).unwrap();
        assert_eq!(cart.header.cartridge_type, CartridgeType::RomOnly);
        assert_eq!(cart.header.rom_bank_count, 2);
        assert_eq!(cart.header.ram_bank_count, 0);
    }

    #[test]
    fn parses_mbc1_with_battery_backed_ram() {
        let mut data = minimal_rom_only();
        data[ADDR_CARTRIDGE_TYPE] = 0x03;
        data[ADDR_ROM_SIZE] = 0x01; // 4 banks
        data[ADDR_RAM_SIZE] = 0x03; // 4 banks
        let cart = Cartridge::from_bytes(data).unwrap();
        assert_eq!(
            cart.header.cartridge_type,
            CartridgeType::Mbc1 {
                has_ram: true,
                has_battery: true
            }
        );
        assert_eq!(cart.header.rom_bank_count, 4);
        assert_eq!(cart.header.ram_bank_count, 4);
    }

    #[test]
    fn rejects_non_power_of_two_size() {
        let mut data = minimal_rom_only();
        data.extend_from_slice(&[0u8; 100]);
        assert!(matches!(
            Cartridge::from_bytes(data),
            Err(RomLoadError::SizeNotPowerOfTwo(_))
        ));
    }

    #[test]
    fn rejects_undersized_image() {
        let data = vec![0u8; 0x1000];
        assert!(matches!(
            Cartridge::from_bytes(data),
            Err(RomLoadError::SizeOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_unsupported_cartridge_type() {
        let mut data = minimal_rom_only();
        data[ADDR_CARTRIDGE_TYPE] = 0x05; // MBC2, unimplemented
        assert!(matches!(
            Cartridge::from_bytes(data),
            Err(RomLoadError::UnsupportedCartridgeType(0x05))
        ));
    }
}
