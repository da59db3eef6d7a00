use std::fmt;

/// A decoded instruction word.
///
/// `x` and `y` name registers Vx and Vy, `byte` is the low byte of the word,
/// `addr` the low 12 bits and `n` the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn - SYS addr. Jump to a machine code routine, ignored by modern interpreters.
    Sys { addr: u16 },
    /// 00E0 - CLS
    Clear,
    /// 00EE - RET
    Return,
    /// 1nnn - JP addr
    Jump { addr: u16 },
    /// 2nnn - CALL addr
    Call { addr: u16 },
    /// 3xkk - SE Vx, byte
    SkipIfEqualImmediate { x: usize, byte: u8 },
    /// 4xkk - SNE Vx, byte
    SkipIfNotEqualImmediate { x: usize, byte: u8 },
    /// 5xy0 - SE Vx, Vy
    SkipIfEqualRegister { x: usize, y: usize },
    /// 6xkk - LD Vx, byte
    LoadImmediate { x: usize, byte: u8 },
    /// 7xkk - ADD Vx, byte
    AddImmediate { x: usize, byte: u8 },
    /// 8xy0 - LD Vx, Vy
    LoadRegister { x: usize, y: usize },
    /// 8xy1 - OR Vx, Vy
    Or { x: usize, y: usize },
    /// 8xy2 - AND Vx, Vy
    And { x: usize, y: usize },
    /// 8xy3 - XOR Vx, Vy
    Xor { x: usize, y: usize },
    /// 8xy4 - ADD Vx, Vy
    AddRegister { x: usize, y: usize },
    /// 8xy5 - SUB Vx, Vy
    Sub { x: usize, y: usize },
    /// 8xy6 - SHR Vx {, Vy}
    ShiftRight { x: usize, y: usize },
    /// 8xy7 - SUBN Vx, Vy
    SubNegated { x: usize, y: usize },
    /// 8xyE - SHL Vx {, Vy}
    ShiftLeft { x: usize, y: usize },
    /// 9xy0 - SNE Vx, Vy
    SkipIfNotEqualRegister { x: usize, y: usize },
    /// Annn - LD I, addr
    LoadIndex { addr: u16 },
    /// Bnnn - JP V0, addr
    JumpOffset { addr: u16 },
    /// Cxkk - RND Vx, byte
    Random { x: usize, byte: u8 },
    /// Dxyn - DRW Vx, Vy, nibble
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E - SKP Vx
    SkipIfKeyPressed { x: usize },
    /// ExA1 - SKNP Vx
    SkipIfKeyNotPressed { x: usize },
    /// Fx07 - LD Vx, DT
    LoadDelayTimer { x: usize },
    /// Fx0A - LD Vx, K
    WaitForKey { x: usize },
    /// Fx15 - LD DT, Vx
    SetDelayTimer { x: usize },
    /// Fx18 - LD ST, Vx
    SetSoundTimer { x: usize },
    /// Fx1E - ADD I, Vx
    AddIndex { x: usize },
    /// Fx29 - LD F, Vx
    LoadGlyph { x: usize },
    /// Fx33 - LD B, Vx
    StoreBcd { x: usize },
    /// Fx55 - LD [I], Vx
    StoreRegisters { x: usize },
    /// Fx65 - LD Vx, [I]
    LoadRegisters { x: usize },
    /// A word that doesn't name any instruction. Executes as a no-op.
    Unknown(u16),
}

impl Instruction {
    pub fn decode(word: u16) -> Self {
        let group = (word >> 12) as u8;
        let x = ((word >> 8) & 0xF) as usize;
        let y = ((word >> 4) & 0xF) as usize;
        let n = (word & 0xF) as u8;
        let byte = (word & 0xFF) as u8;
        let addr = word & 0x0FFF;

        use Instruction::*;

        match (group, n) {
            (0x0, _) => match word {
                0x00E0 => Clear,
                0x00EE => Return,
                _ => Sys { addr },
            },
            (0x1, _) => Jump { addr },
            (0x2, _) => Call { addr },
            (0x3, _) => SkipIfEqualImmediate { x, byte },
            (0x4, _) => SkipIfNotEqualImmediate { x, byte },
            (0x5, 0x0) => SkipIfEqualRegister { x, y },
            (0x6, _) => LoadImmediate { x, byte },
            (0x7, _) => AddImmediate { x, byte },
            (0x8, 0x0) => LoadRegister { x, y },
            (0x8, 0x1) => Or { x, y },
            (0x8, 0x2) => And { x, y },
            (0x8, 0x3) => Xor { x, y },
            (0x8, 0x4) => AddRegister { x, y },
            (0x8, 0x5) => Sub { x, y },
            (0x8, 0x6) => ShiftRight { x, y },
            (0x8, 0x7) => SubNegated { x, y },
            (0x8, 0xE) => ShiftLeft { x, y },
            (0x9, 0x0) => SkipIfNotEqualRegister { x, y },
            (0xA, _) => LoadIndex { addr },
            (0xB, _) => JumpOffset { addr },
            (0xC, _) => Random { x, byte },
            (0xD, _) => Draw { x, y, n },
            (0xE, _) => match byte {
                0x9E => SkipIfKeyPressed { x },
                0xA1 => SkipIfKeyNotPressed { x },
                _ => Unknown(word),
            },
            (0xF, _) => match byte {
                0x07 => LoadDelayTimer { x },
                0x0A => WaitForKey { x },
                0x15 => SetDelayTimer { x },
                0x18 => SetSoundTimer { x },
                0x1E => AddIndex { x },
                0x29 => LoadGlyph { x },
                0x33 => StoreBcd { x },
                0x55 => StoreRegisters { x },
                0x65 => LoadRegisters { x },
                _ => Unknown(word),
            },
            _ => Unknown(word),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Sys { addr } => write!(f, "SYS {:#05X}", addr),
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            SkipIfEqualImmediate { x, byte } => write!(f, "SE V{:X}, {:#04X}", x, byte),
            SkipIfNotEqualImmediate { x, byte } => write!(f, "SNE V{:X}, {:#04X}", x, byte),
            SkipIfEqualRegister { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImmediate { x, byte } => write!(f, "LD V{:X}, {:#04X}", x, byte),
            AddImmediate { x, byte } => write!(f, "ADD V{:X}, {:#04X}", x, byte),
            LoadRegister { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddRegister { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubNegated { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipIfNotEqualRegister { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { addr } => write!(f, "LD I, {:#05X}", addr),
            JumpOffset { addr } => write!(f, "JP V0, {:#05X}", addr),
            Random { x, byte } => write!(f, "RND V{:X}, {:#04X}", x, byte),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKeyPressed { x } => write!(f, "SKP V{:X}", x),
            SkipIfKeyNotPressed { x } => write!(f, "SKNP V{:X}", x),
            LoadDelayTimer { x } => write!(f, "LD V{:X}, DT", x),
            WaitForKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelayTimer { x } => write!(f, "LD DT, V{:X}", x),
            SetSoundTimer { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
            Unknown(word) => write!(f, "??? {:#06X}", word),
        }
    }
}
