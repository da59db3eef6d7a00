use std::path::Path;

use crate::{Chip8Error, Result};

pub const MEMORY_SIZE: usize = 4096;
pub const START_ROM: usize = 0x200;
pub const ROM_SIZE: usize = MEMORY_SIZE - START_ROM;

/// Each glyph of the built-in font is 5 rows tall.
pub const GLYPH_SIZE: usize = 5;

pub const FONT_DATA: &[u8; 80] = &[
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Address of the font glyph for the hex digit `digit` (only the low nibble is used).
pub fn glyph_address(digit: u8) -> u16 {
    (digit & 0xF) as u16 * GLYPH_SIZE as u16
}

/// Reads a raw program image from disk, rejecting images that don't fit above 0x200.
pub fn read_rom(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();

    let bytes = std::fs::read(path).map_err(|source| Chip8Error::Load {
        path: path.to_path_buf(),
        source,
    })?;
    check_rom_size(&bytes)?;

    log::info!("Read {} byte program from {}", bytes.len(), path.display());

    Ok(bytes)
}

fn check_rom_size(bytes: &[u8]) -> Result<()> {
    if bytes.len() > ROM_SIZE {
        return Err(Chip8Error::ProgramTooLarge {
            size: bytes.len(),
            max: ROM_SIZE,
        });
    }

    Ok(())
}

/// 4 KiB of flat, byte addressable memory.
///
/// 0x000 - 0x1FF belongs to the interpreter (the font lives at 0x000 - 0x04F),
/// programs are loaded from 0x200 upwards. Every access is bounds checked and
/// an out of range address is reported as [`Chip8Error::AddressOutOfRange`].
#[derive(Debug)]
pub(crate) struct Memory(pub [u8; MEMORY_SIZE]);

impl Memory {
    pub fn new() -> Self {
        Memory([0; MEMORY_SIZE])
    }

    /// Resets memory to the font plus `bytes` at 0x200.
    ///
    /// Nothing is written when the image is too large.
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<()> {
        check_rom_size(bytes)?;

        self.0 = [0; MEMORY_SIZE];
        self.0[0..FONT_DATA.len()].copy_from_slice(FONT_DATA);
        self.0[START_ROM..START_ROM + bytes.len()].copy_from_slice(bytes);

        Ok(())
    }

    /// Big-endian instruction word at `address`.
    pub fn read_word(&self, address: usize) -> Result<u16> {
        let bytes = self.slice(address, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        self.0
            .get(address..address + len)
            .ok_or_else(|| Chip8Error::AddressOutOfRange {
                address: address + len.saturating_sub(1),
            })
    }

    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8]> {
        self.0
            .get_mut(address..address + len)
            .ok_or_else(|| Chip8Error::AddressOutOfRange {
                address: address + len.saturating_sub(1),
            })
    }
}
