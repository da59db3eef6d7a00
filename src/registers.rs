use crate::{memory::START_ROM, Chip8Error, Result};

pub const VF: usize = 0xF;

#[derive(Debug)]
pub(crate) struct Registers {
    /// Chip-8 has 16 general purpose 8-bit registers, usually referred to as Vx, where x is a hexadecimal digit (0 through F).
    /// VF doubles as the carry, borrow and collision flag.
    pub vx: [u8; 16],

    pub i: u16,
    /// The program counter (PC) is used to store the currently executing address.
    pub pc: u16,

    /// Return addresses of the active subroutine calls. The depth is only limited by host memory.
    pub stack: Vec<u16>,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            vx: [0; 16],
            i: 0,
            pc: START_ROM as u16,
            stack: Vec::new(),
        }
    }
}

impl Registers {
    /// Stores `value` in VF. Flag-producing instructions call this after writing
    /// their result so that the flag wins when Vx is VF.
    pub fn set_flag(&mut self, value: bool) {
        self.vx[VF] = value.into();
    }

    /// Saves the current PC and continues at `address`.
    pub fn push(&mut self, address: u16) {
        self.stack.push(self.pc);
        self.pc = address;
    }

    /// Restores PC from the most recent call.
    pub fn pop(&mut self) -> Result<()> {
        self.pc = self
            .stack
            .pop()
            .ok_or(Chip8Error::StackUnderflow { pc: self.pc })?;

        Ok(())
    }

    /// Advances PC past the next instruction.
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}
