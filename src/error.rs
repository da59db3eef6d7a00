use std::{io, path::PathBuf};

use thiserror::Error;

/// Faults raised while loading or executing a program.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("could not read program image {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("program image is {size} bytes, at most {max} bytes fit in memory")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("stack underflow: return with an empty call stack (pc {pc:#05X})")]
    StackUnderflow { pc: u16 },

    #[error("address out of range: {address:#06X}")]
    AddressOutOfRange { address: usize },
}

impl Chip8Error {
    /// Whether the program never made it into memory.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::ProgramTooLarge { .. })
    }
}
