use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::{Config, KeyWaitValue},
    display::Display,
    instruction::Instruction,
    keyboard::SCAN_CODES,
    memory::{glyph_address, Memory},
    presenter::Presenter,
    registers::Registers,
    shared::SharedState,
    Result,
};

/// Lifecycle of an [`Interpreter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Program is in memory, nothing executed yet.
    Loaded,
    Running,
    /// Stopped by request or by a fault. Further steps do nothing.
    Halted,
}

/// What the caller should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The framebuffer changed and should be presented.
    Draw,
    /// The stop signal was raised, execution must not continue.
    Stopped,
}

/// The fetch-decode-execute state machine.
#[derive(Debug)]
pub struct Interpreter {
    registers: Registers,
    memory: Memory,
    display: Display,
    shared: Arc<SharedState>,
    rng: ChaCha8Rng,
    config: Config,
    state: State,
}

impl Interpreter {
    pub fn with_rom(bytes: &[u8]) -> Result<Self> {
        Self::with_config(bytes, Config::default())
    }

    pub fn with_config(bytes: &[u8], config: Config) -> Result<Self> {
        Self::with_shared_state(bytes, config, Arc::new(SharedState::new()))
    }

    /// Loads `bytes` at 0x200 and resets every register, the screen, the timers and the keyboard.
    ///
    /// Fails without touching `shared` if the program doesn't fit into memory.
    pub fn with_shared_state(bytes: &[u8], config: Config, shared: Arc<SharedState>) -> Result<Self> {
        let mut memory = Memory::new();
        memory.load_rom(bytes)?;

        shared.reset();

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        log::info!("Loaded {} byte program", bytes.len());

        Ok(Interpreter {
            registers: Registers::default(),
            memory,
            display: Display::new(),
            shared,
            rng,
            config,
            state: State::Loaded,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle to the state shared with the timer and input activities.
    pub fn shared_state(&self) -> Arc<SharedState> {
        Arc::clone(&self.shared)
    }

    pub fn program_counter(&self) -> u16 {
        self.registers.pc
    }

    /// Executes a single instruction.
    ///
    /// A fault halts the interpreter and raises the stop signal before the error
    /// is returned.
    pub fn step(&mut self) -> Result<Flow> {
        if self.state == State::Halted {
            return Ok(Flow::Stopped);
        }
        self.state = State::Running;

        let flow = self.fetch().and_then(|instruction| self.execute(instruction));

        match flow {
            Ok(Flow::Stopped) => self.halt(),
            Err(ref err) => {
                log::error!("Interpreter halted: {}", err);
                self.halt();
            }
            _ => {}
        }

        flow
    }

    /// Runs until the stop signal is raised or a fault occurs, handing every
    /// changed frame to `presenter`. The presenter is also called whenever the
    /// sound timer starts or stops sounding.
    pub fn run<P: Presenter>(&mut self, presenter: &mut P) -> Result<()> {
        log::info!("Interpreter running");

        let cycle_time = self.config.cycle_time();
        let mut next_cycle = Instant::now();
        let mut sounding = self.shared.timers.is_sounding();

        while !self.shared.is_stopped() {
            let flow = self.step()?;
            let now_sounding = self.shared.timers.is_sounding();

            match flow {
                Flow::Stopped => break,
                Flow::Draw => presenter.present(&self.display, now_sounding),
                Flow::Continue if now_sounding != sounding => presenter.present(&self.display, now_sounding),
                Flow::Continue => {}
            }
            sounding = now_sounding;

            if let Some(cycle_time) = cycle_time {
                next_cycle += cycle_time;
                let now = Instant::now();
                if next_cycle > now {
                    thread::sleep(next_cycle - now);
                } else {
                    // Resume at the usual speed instead of racing to catch up.
                    next_cycle = now;
                }
            }
        }

        self.halt();
        log::info!("Interpreter stopped");

        Ok(())
    }

    fn halt(&mut self) {
        self.state = State::Halted;
        self.shared.stop();
    }

    fn fetch(&mut self) -> Result<Instruction> {
        let pc = self.registers.pc;
        let word = self.memory.read_word(pc as usize)?;
        self.registers.pc = pc.wrapping_add(2);

        let instruction = Instruction::decode(word);
        log::trace!("{:#05X}: {:04X}  {}", pc, word, instruction);

        Ok(instruction)
    }

    fn execute(&mut self, instruction: Instruction) -> Result<Flow> {
        use Instruction::*;

        match instruction {
            Sys { .. } => {}
            Clear => {
                self.handle_clear();
                return Ok(Flow::Draw);
            }
            Return => self.handle_ret()?,
            Jump { addr } => self.handle_jump(addr),
            Call { addr } => self.handle_call(addr),
            SkipIfEqualImmediate { x, byte } => self.handle_skip_if_equal_immediate(x, byte),
            SkipIfNotEqualImmediate { x, byte } => self.handle_skip_if_not_equal_immediate(x, byte),
            SkipIfEqualRegister { x, y } => self.handle_skip_if_equal_register(x, y),
            LoadImmediate { x, byte } => self.handle_load_register_immediate(x, byte),
            AddImmediate { x, byte } => self.handle_add_register_immediate(x, byte),
            LoadRegister { x, y } => self.handle_load_register_register(x, y),
            Or { x, y } => self.handle_or_register_register(x, y),
            And { x, y } => self.handle_and_register_register(x, y),
            Xor { x, y } => self.handle_xor_register_register(x, y),
            AddRegister { x, y } => self.handle_add_register_register(x, y),
            Sub { x, y } => self.handle_sub_register_register(x, y),
            ShiftRight { x, y } => self.handle_shift_right_register_one(x, y),
            SubNegated { x, y } => self.handle_sub_register_register_negated(x, y),
            ShiftLeft { x, y } => self.handle_shift_left_register_one(x, y),
            SkipIfNotEqualRegister { x, y } => self.handle_skip_if_not_equal_register(x, y),
            LoadIndex { addr } => self.handle_load_immediate(addr),
            JumpOffset { addr } => self.handle_jump_offset(addr),
            Random { x, byte } => self.handle_random(x, byte),
            Draw { x, y, n } => {
                self.handle_draw_sprite(x, y, n)?;
                return Ok(Flow::Draw);
            }
            SkipIfKeyPressed { x } => self.handle_skip_if_key_pressed(x),
            SkipIfKeyNotPressed { x } => self.handle_skip_if_key_not_pressed(x),
            LoadDelayTimer { x } => self.handle_load_delay_timer(x),
            WaitForKey { x } => return Ok(self.handle_wait_for_key(x)),
            SetDelayTimer { x } => self.handle_set_delay_timer(x),
            SetSoundTimer { x } => self.handle_set_sound_timer(x),
            AddIndex { x } => self.handle_add_index(x),
            LoadGlyph { x } => self.handle_load_glyph(x),
            StoreBcd { x } => self.handle_store_bcd(x)?,
            StoreRegisters { x } => self.handle_store_registers(x)?,
            LoadRegisters { x } => self.handle_load_registers(x)?,
            Unknown(word) => log::warn!("Unknown instruction: {:#06X}", word),
        }

        Ok(Flow::Continue)
    }

    /// 00E0 - CLS
    /// Clear the display.
    fn handle_clear(&mut self) {
        self.display.clear();
    }

    /// 00EE - RET
    /// Return from a subroutine.
    ///
    /// The interpreter sets the program counter to the address at the top of the stack.
    /// Returning with an empty stack is a fault.
    fn handle_ret(&mut self) -> Result<()> {
        self.registers.pop()
    }

    /// 1nnn - JP addr
    /// Jump to location nnn.
    fn handle_jump(&mut self, n: u16) {
        self.registers.pc = n;
    }

    /// 2nnn - CALL addr
    /// Call subroutine at nnn.
    ///
    /// The address of the instruction following the call goes on the stack, the PC is then set to nnn.
    fn handle_call(&mut self, n: u16) {
        self.registers.push(n);
    }

    /// 3xkk - SE Vx, byte
    /// Skip next instruction if Vx = kk.
    fn handle_skip_if_equal_immediate(&mut self, x: usize, k: u8) {
        if self.registers.vx[x] == k {
            self.registers.skip();
        }
    }

    /// 4xkk - SNE Vx, byte
    /// Skip next instruction if Vx != kk.
    fn handle_skip_if_not_equal_immediate(&mut self, x: usize, k: u8) {
        if self.registers.vx[x] != k {
            self.registers.skip();
        }
    }

    /// 5xy0 - SE Vx, Vy
    /// Skip next instruction if Vx = Vy.
    fn handle_skip_if_equal_register(&mut self, x: usize, y: usize) {
        if self.registers.vx[x] == self.registers.vx[y] {
            self.registers.skip();
        }
    }

    /// 6xkk - LD Vx, byte
    fn handle_load_register_immediate(&mut self, x: usize, k: u8) {
        self.registers.vx[x] = k;
    }

    /// 7xkk - ADD Vx, byte
    /// Set Vx = Vx + kk. The carry flag is not touched.
    fn handle_add_register_immediate(&mut self, x: usize, k: u8) {
        self.registers.vx[x] = self.registers.vx[x].wrapping_add(k);
    }

    /// 8xy0 - LD Vx, Vy
    fn handle_load_register_register(&mut self, x: usize, y: usize) {
        self.registers.vx[x] = self.registers.vx[y];
    }

    /// 8xy1 - OR Vx, Vy
    fn handle_or_register_register(&mut self, x: usize, y: usize) {
        self.registers.vx[x] |= self.registers.vx[y];
    }

    /// 8xy2 - AND Vx, Vy
    fn handle_and_register_register(&mut self, x: usize, y: usize) {
        self.registers.vx[x] &= self.registers.vx[y];
    }

    /// 8xy3 - XOR Vx, Vy
    fn handle_xor_register_register(&mut self, x: usize, y: usize) {
        self.registers.vx[x] ^= self.registers.vx[y];
    }

    /// 8xy4 - ADD Vx, Vy
    /// Set Vx = Vx + Vy, set VF = carry.
    ///
    /// The values of Vx and Vy are added together. If the result is greater than 8 bits
    /// (i.e., > 255,) VF is set to 1, otherwise 0. Only the lowest 8 bits of the result are kept, and stored in Vx.
    fn handle_add_register_register(&mut self, x: usize, y: usize) {
        let a = self.registers.vx[x];
        let b = self.registers.vx[y];

        let (result, overflow) = a.overflowing_add(b);
        self.registers.vx[x] = result;
        self.registers.set_flag(overflow);
    }

    /// 8xy5 - SUB Vx, Vy
    /// Set Vx = Vx - Vy, set VF = NOT borrow.
    ///
    /// VF is 0 if Vy > Vx, otherwise 1. Then Vy is subtracted from Vx, and the result stored in Vx.
    fn handle_sub_register_register(&mut self, x: usize, y: usize) {
        let a = self.registers.vx[x];
        let b = self.registers.vx[y];

        let (result, borrow) = a.overflowing_sub(b);
        self.registers.vx[x] = result;
        self.registers.set_flag(!borrow);
    }

    /// 8xy6 - SHR Vx {, Vy}
    /// Set Vx = Vx SHR 1.
    ///
    /// VF receives the least-significant bit of Vx before the shift. Vy is ignored.
    fn handle_shift_right_register_one(&mut self, x: usize, _y: usize) {
        let a = self.registers.vx[x];

        self.registers.vx[x] = a >> 1;
        self.registers.set_flag(a & 1 == 1);
    }

    /// 8xy7 - SUBN Vx, Vy
    /// Set Vx = Vy - Vx, set VF = NOT borrow.
    fn handle_sub_register_register_negated(&mut self, x: usize, y: usize) {
        let a = self.registers.vx[x];
        let b = self.registers.vx[y];

        let (result, borrow) = b.overflowing_sub(a);
        self.registers.vx[x] = result;
        self.registers.set_flag(!borrow);
    }

    /// 8xyE - SHL Vx {, Vy}
    /// Set Vx = Vx SHL 1.
    ///
    /// VF receives the most-significant bit of Vx before the shift. Vy is ignored.
    fn handle_shift_left_register_one(&mut self, x: usize, _y: usize) {
        let a = self.registers.vx[x];

        self.registers.vx[x] = a << 1;
        self.registers.set_flag(a & 0b1000_0000 != 0);
    }

    /// 9xy0 - SNE Vx, Vy
    /// Skip next instruction if Vx != Vy.
    fn handle_skip_if_not_equal_register(&mut self, x: usize, y: usize) {
        if self.registers.vx[x] != self.registers.vx[y] {
            self.registers.skip();
        }
    }

    /// Annn - LD I, addr
    /// Set I = nnn.
    fn handle_load_immediate(&mut self, n: u16) {
        self.registers.i = n;
    }

    /// Bnnn - JP V0, addr
    /// Jump to location nnn + V0.
    fn handle_jump_offset(&mut self, n: u16) {
        self.registers.pc = n + self.registers.vx[0] as u16;
    }

    /// Cxkk - RND Vx, byte
    /// Set Vx = random byte AND kk.
    fn handle_random(&mut self, x: usize, k: u8) {
        self.registers.vx[x] = self.rng.gen::<u8>() & k;
    }

    /// Dxyn - DRW Vx, Vy, nibble
    /// Display n-byte sprite starting at memory location I at (Vx, Vy), set VF = collision.
    ///
    /// The interpreter reads n bytes from memory, starting at the address stored in I. These bytes
    /// are then displayed as sprites on screen at coordinates (Vx, Vy). Sprites are XORed onto the
    /// existing screen. If this causes any pixels to be erased, VF is set to 1, otherwise it is set
    /// to 0. Off-screen pixels wrap around or fault depending on [`crate::config::SpriteEdge`].
    fn handle_draw_sprite(&mut self, x: usize, y: usize, n: u8) -> Result<()> {
        let col = self.registers.vx[x] as usize;
        let row = self.registers.vx[y] as usize;
        self.registers.set_flag(false);

        let sprite = self.memory.slice(self.registers.i as usize, n as usize)?;
        let collision = self
            .display
            .draw_sprite(col, row, sprite, self.config.sprite_edge)?;

        log::debug!("Drew {} row sprite at ({}, {}), collision: {}", n, col, row, collision);

        self.registers.set_flag(collision);

        Ok(())
    }

    /// Ex9E - SKP Vx
    /// Skip next instruction if key with the value of Vx is pressed.
    fn handle_skip_if_key_pressed(&mut self, x: usize) {
        if self.shared.keyboard.is_pressed(self.registers.vx[x]) {
            self.registers.skip();
        }
    }

    /// ExA1 - SKNP Vx
    /// Skip next instruction if key with the value of Vx is not pressed.
    fn handle_skip_if_key_not_pressed(&mut self, x: usize) {
        if !self.shared.keyboard.is_pressed(self.registers.vx[x]) {
            self.registers.skip();
        }
    }

    /// Fx07 - LD Vx, DT
    fn handle_load_delay_timer(&mut self, x: usize) {
        self.registers.vx[x] = self.shared.timers.delay();
    }

    /// Fx0A - LD Vx, K
    /// Wait for a key press, store the value of the key in Vx.
    ///
    /// The keyboard is polled every `key_poll_interval`. If the stop signal is raised while
    /// waiting, PC is rewound onto this instruction and [`Flow::Stopped`] is returned.
    fn handle_wait_for_key(&mut self, x: usize) -> Flow {
        log::debug!("Waiting for key into V{:X}", x);

        loop {
            let keyboard = &self.shared.keyboard;
            let value = match self.config.key_wait_value {
                KeyWaitValue::Index => keyboard.first_pressed(),
                KeyWaitValue::ScanCode => keyboard.last_pressed().map(|key| SCAN_CODES[key as usize]),
            };

            if let Some(value) = value {
                self.registers.vx[x] = value;
                return Flow::Continue;
            }

            if self.shared.is_stopped() {
                self.registers.pc = self.registers.pc.wrapping_sub(2);
                return Flow::Stopped;
            }

            thread::sleep(self.config.key_poll_interval.max(Duration::from_micros(100)));
        }
    }

    /// Fx15 - LD DT, Vx
    fn handle_set_delay_timer(&mut self, x: usize) {
        self.shared.timers.set_delay(self.registers.vx[x]);
    }

    /// Fx18 - LD ST, Vx
    fn handle_set_sound_timer(&mut self, x: usize) {
        self.shared.timers.set_sound(self.registers.vx[x]);
    }

    /// Fx1E - ADD I, Vx
    fn handle_add_index(&mut self, x: usize) {
        self.registers.i = self.registers.i.wrapping_add(self.registers.vx[x] as u16);
    }

    /// Fx29 - LD F, Vx
    /// Set I = location of sprite for digit Vx.
    fn handle_load_glyph(&mut self, x: usize) {
        self.registers.i = glyph_address(self.registers.vx[x]);
    }

    /// Fx33 - LD B, Vx
    /// Store BCD representation of Vx in memory locations I, I+1, and I+2.
    fn handle_store_bcd(&mut self, x: usize) -> Result<()> {
        let value = self.registers.vx[x];
        let digits = self.memory.slice_mut(self.registers.i as usize, 3)?;

        digits[0] = value / 100;
        digits[1] = (value / 10) % 10;
        digits[2] = value % 10;

        Ok(())
    }

    /// Fx55 - LD [I], Vx
    /// Store registers V0 through Vx in memory starting at location I.
    fn handle_store_registers(&mut self, x: usize) -> Result<()> {
        let target = self.memory.slice_mut(self.registers.i as usize, x + 1)?;
        target.copy_from_slice(&self.registers.vx[..=x]);

        self.advance_index(x);

        Ok(())
    }

    /// Fx65 - LD Vx, [I]
    /// Read registers V0 through Vx from memory starting at location I.
    fn handle_load_registers(&mut self, x: usize) -> Result<()> {
        let source = self.memory.slice(self.registers.i as usize, x + 1)?;
        self.registers.vx[..=x].copy_from_slice(source);

        self.advance_index(x);

        Ok(())
    }

    fn advance_index(&mut self, x: usize) {
        if self.config.increment_index_on_transfer {
            self.registers.i = self.registers.i.wrapping_add(x as u16 + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Flow, Interpreter, State};
    use crate::{
        config::{Config, KeyWaitValue, SpriteEdge},
        display::Display,
        memory::FONT_DATA,
        presenter::Presenter,
        shared::SharedState,
        Chip8Error,
    };
    use claim::{assert_err, assert_matches, assert_ok};
    use quickcheck_macros::quickcheck;
    use std::{sync::Arc, thread, time::Duration};
    use test_case::test_case;

    fn interpreter(rom: &[u8]) -> Interpreter {
        Interpreter::with_config(rom, Config::default().with_seed(Some(7))).unwrap()
    }

    #[test]
    fn test_starts_loaded() {
        let mut interpreter = interpreter(&[0x00, 0xE0]);
        assert_eq!(interpreter.state(), State::Loaded);
        assert_eq!(interpreter.program_counter(), 0x200);

        interpreter.step().unwrap();
        assert_eq!(interpreter.state(), State::Running);
    }

    #[test]
    fn test_oversized_program_never_loads() {
        let shared = Arc::new(SharedState::new());
        shared.timers.set_delay(3);

        let result = Interpreter::with_shared_state(&vec![0; 3585], Config::default(), Arc::clone(&shared));

        assert_matches!(result, Err(Chip8Error::ProgramTooLarge { .. }));
        assert_eq!(shared.timers.delay(), 3);
    }

    #[test]
    fn test_handle_clear() {
        let mut interpreter = interpreter(&[0x00, 0xE0]);
        interpreter.display.xor_pixel(3, 4, true);
        interpreter.display.xor_pixel(63, 31, true);

        assert_eq!(interpreter.step().unwrap(), Flow::Draw);

        assert!(interpreter.display.pixels().iter().all(|p| !p));
    }

    #[test]
    fn test_handle_sys_is_ignored() {
        let mut interpreter = interpreter(&[0x01, 0x23]);

        assert_eq!(interpreter.step().unwrap(), Flow::Continue);
        assert_eq!(interpreter.registers.pc, 0x202);
    }

    #[test]
    fn test_handle_jump() {
        let rom: &[u8] = &[0x17, 0x89];
        let mut interpreter = interpreter(rom);

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.pc, 0x789);
    }

    #[test]
    fn test_handle_push() {
        let rom: &[u8] = &[0x21, 0x23];
        let mut interpreter = interpreter(rom);

        interpreter.step().unwrap();
        assert_eq!(interpreter.registers.stack, vec![0x202]);
        assert_eq!(interpreter.registers.pc, 0x123);
    }

    #[test]
    fn test_handle_pop() {
        let rom: &[u8] = &[0x22, 0x06, 0x00, 0xE0, 0x00, 0xE0, 0x00, 0xEE];
        let mut interpreter = interpreter(rom);

        interpreter.step().unwrap();
        assert_eq!(interpreter.registers.stack.len(), 1);
        assert_eq!(interpreter.registers.pc, 0x206);

        interpreter.step().unwrap();
        assert!(interpreter.registers.stack.is_empty());
        assert_eq!(interpreter.registers.pc, 0x202);
    }

    #[quickcheck]
    fn test_call_then_return_restores_pc(target: u16, depth: u8) -> bool {
        let target = (0x300 + target % 0xC00) & 0xFFE;
        let mut interpreter = interpreter(&[]);
        for _ in 0..depth {
            interpreter.registers.stack.push(0x222);
        }
        // CALL target at 0x200, RET at target
        interpreter.memory.0[0x200] = 0x20 | (target >> 8) as u8;
        interpreter.memory.0[0x201] = target as u8;
        interpreter.memory.0[target as usize] = 0x00;
        interpreter.memory.0[target as usize + 1] = 0xEE;

        interpreter.step().unwrap();
        let entered = interpreter.registers.pc == target;
        interpreter.step().unwrap();

        entered && interpreter.registers.pc == 0x202 && interpreter.registers.stack.len() == depth as usize
    }

    #[test]
    fn test_return_with_empty_stack_halts() {
        let shared = Arc::new(SharedState::new());
        let mut interpreter = Interpreter::with_shared_state(&[0x00, 0xEE], Config::default(), Arc::clone(&shared)).unwrap();

        assert_matches!(interpreter.step(), Err(Chip8Error::StackUnderflow { .. }));
        assert_eq!(interpreter.state(), State::Halted);
        assert!(shared.is_stopped());
        assert_eq!(interpreter.step().unwrap(), Flow::Stopped);
    }

    #[test]
    fn test_fetch_past_end_of_memory_halts() {
        let mut interpreter = interpreter(&[0x1F, 0xFF]);

        interpreter.step().unwrap();
        assert_matches!(interpreter.step(), Err(Chip8Error::AddressOutOfRange { address: 0x1000 }));
        assert_eq!(interpreter.state(), State::Halted);
    }

    #[test_case(3 , 15, 15, 0x204; "SE: vx equals k")]
    #[test_case(7, 0x42, 0x23, 0x202 ; "SE: vx does not equal k")]
    fn test_handle_skip_if_equal_immediate(x: u8, vx: u8, k: u8, pc: u16) {
        let rom: &[u8] = &[0x30 | x, k];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[x as usize] = vx;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.pc, pc);
    }

    #[test_case(0xA , 0x18, 0x18, 0x202; "SNE: vx equals k")]
    #[test_case(0xB, 0x13, 0x55, 0x204 ; "SNE: vx does not equal k")]
    fn test_handle_skip_if_not_equal_immediate(x: u8, vx: u8, k: u8, pc: u16) {
        let rom: &[u8] = &[0x40 | x, k];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[x as usize] = vx;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.pc, pc);
    }

    #[test_case(0xA , 0x0, 0x18, 0x18, 0x204; "SE: vx equals vy")]
    #[test_case(0x7, 0x5, 1, 0x55, 0x202 ; "SE: vx does not equal vy")]
    fn test_handle_skip_if_equal_register(x: u8, y: u8, vx: u8, vy: u8, pc: u16) {
        let rom: &[u8] = &[0x50 | x, y << 4];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[x as usize] = vx;
        interpreter.registers.vx[y as usize] = vy;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.pc, pc);
    }

    #[test]
    fn test_handle_load_register_immediate() {
        let rom: &[u8] = &[0x61, 0x23];
        let mut interpreter = interpreter(rom);

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[1], 0x23);
    }

    #[test]
    fn test_handle_add_register_immediate() {
        let rom: &[u8] = &[0x73, 0x21, 0x73, 0x10, 0x73, 0xF0];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[0xF] = 0x5;

        interpreter.step().unwrap();
        interpreter.step().unwrap();
        assert_eq!(interpreter.registers.vx[3], 0x31);

        interpreter.step().unwrap();
        assert_eq!(interpreter.registers.vx[3], 0x21, "Wraparound wrong");
        assert_eq!(interpreter.registers.vx[0xF], 0x5, "Flag must not change");
    }

    #[test]
    fn test_handle_load_register_register() {
        let rom: &[u8] = &[0x8A, 0xC0];
        let mut interpreter = interpreter(rom);

        interpreter.registers.vx[0xC] = 0x23;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[0xA], 0x23);
    }

    #[test]
    fn test_handle_or_register_register() {
        let rom: &[u8] = &[0x8B, 0xD1];
        let mut interpreter = interpreter(rom);

        interpreter.registers.vx[0xB] = 0x23;
        interpreter.registers.vx[0xD] = 0x42;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[0xB], 0x63);
    }

    #[test]
    fn test_handle_and_register_register() {
        let rom: &[u8] = &[0x8E, 0x12];
        let mut interpreter = interpreter(rom);

        interpreter.registers.vx[0xE] = 0x23;
        interpreter.registers.vx[0x1] = 0x42;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[0xE], 0x2);
    }

    #[test]
    fn test_handle_xor_register_register() {
        let rom: &[u8] = &[0x89, 0x73];
        let mut interpreter = interpreter(rom);

        interpreter.registers.vx[0x9] = 0x15;
        interpreter.registers.vx[0x7] = 0x37;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[0x9], 0x22);
    }

    #[test_case(0xB , 0x3, 5, 3, 8, 0; "ADD: vx + vy - No overflow")]
    #[test_case(0x2, 0x9, 0xFA, 0x13, 0xD, 1 ; "ADD: vx + vy - Overflow")]
    #[test_case(0xF, 0x0, 0xAA, 0xBB, 1, 1 ; "ADD: vx + vy - Target VF + Overflow")]
    #[test_case(0xF, 0x7, 17, 58, 0, 0 ; "ADD: vx + vy - Target VF + No Overflow")]
    fn test_handle_add_register_register(x: u8, y: u8, vx: u8, vy: u8, result: u8, carry: u8) {
        let rom: &[u8] = &[0x80 | x, (y << 4) | 0x4];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[x as usize] = vx;
        interpreter.registers.vx[y as usize] = vy;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[x as usize], result, "Result wrong");
        assert_eq!(interpreter.registers.vx[0xF], carry, "Carry wrong");
    }

    #[test]
    fn test_add_register_register_all_operands() {
        let mut interpreter = interpreter(&[0x81, 0x24]);

        for a in 0..=255u8 {
            for b in 0..=255u8 {
                interpreter.registers.pc = 0x200;
                interpreter.registers.vx[1] = a;
                interpreter.registers.vx[2] = b;

                interpreter.step().unwrap();

                let sum = a as u16 + b as u16;
                assert_eq!(interpreter.registers.vx[1] as u16, sum % 256);
                assert_eq!(interpreter.registers.vx[0xF], (sum > 255) as u8);
            }
        }
    }

    #[quickcheck]
    fn test_sub_register_register_borrow(a: u8, b: u8) -> bool {
        let mut interpreter = interpreter(&[0x81, 0x25, 0x83, 0x47]);
        interpreter.registers.vx[1] = a;
        interpreter.registers.vx[2] = b;
        interpreter.registers.vx[3] = a;
        interpreter.registers.vx[4] = b;

        interpreter.step().unwrap();
        let forward = interpreter.registers.vx[1] == a.wrapping_sub(b)
            && interpreter.registers.vx[0xF] == (b <= a) as u8;

        interpreter.step().unwrap();
        let reverse = interpreter.registers.vx[3] == b.wrapping_sub(a)
            && interpreter.registers.vx[0xF] == (a <= b) as u8;

        forward && reverse
    }

    #[test_case(0xC , 0x2, 25, 12, 13, 1; "SUB: vx - vy - No Underflow")]
    #[test_case(0xD, 0x4, 0x13, 0x15, 0b11111110, 0 ; "SUB: vx - vy - Underflow")]
    #[test_case(0x3, 0x4, 0x15, 0x15, 0, 1 ; "SUB: vx - vy - Equal operands")]
    #[test_case(0xF, 0x0, 5, 7, 0, 0 ; "SUB: vx - vy - Target VF - Underflow")]
    #[test_case(0xF, 0xE, 7, 5, 1, 1 ; "SUB: vx - vy - Target VF - No Underflow")]
    fn test_handle_sub_register_register(x: u8, y: u8, vx: u8, vy: u8, result: u8, underflow: u8) {
        let rom: &[u8] = &[0x80 | x, (y << 4) | 0x5];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[x as usize] = vx;
        interpreter.registers.vx[y as usize] = vy;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[x as usize], result, "Result wrong");
        assert_eq!(interpreter.registers.vx[0xF], underflow, "Underflow wrong");
    }

    #[test_case(0x0 , 0x2, 8, 4, 0; "SHR: vx, {vy} - No Underflow")]
    #[test_case(0xE, 0xA, 0b10110011, 0b01011001, 1 ; "SHR: vx, {vy} - Underflow")]
    #[test_case(0xF, 0x2, 0b101, 1, 1 ; "SHR: vx, {vy} - Target VF - Underflow")]
    #[test_case(0xF, 0x3, 0b110, 0, 0 ; "SHR: vx, {vy} - Target VF - No Underflow")]
    fn test_handle_shift_right_register_one(x: u8, y: u8, vx: u8, result: u8, underflow: u8) {
        let rom: &[u8] = &[0x80 | x, (y << 4) | 0x6];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[x as usize] = vx;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[x as usize], result, "Result wrong");
        assert_eq!(interpreter.registers.vx[0xF], underflow, "Underflow wrong");
    }

    #[test_case(0xD, 0x4, 0x13, 0x15, 0x2, 1 ; "SUBN: vy - vx - No Underflow")]
    #[test_case(0xC , 0x2, 50, 25, 0b1110_0111, 0; "SUBN: vy - vx - Underflow")]
    #[test_case(0xF, 0xE, 7, 5, 0, 0 ; "SUBN: vy - vx - Target VF - Underflow")]
    #[test_case(0xF, 0x0, 5, 7, 1, 1 ; "SUBN: vy - vx - Target VF - No Underflow")]
    fn test_handle_sub_register_register_negated(x: u8, y: u8, vx: u8, vy: u8, result: u8, underflow: u8) {
        let rom: &[u8] = &[0x80 | x, (y << 4) | 0x7];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[x as usize] = vx;
        interpreter.registers.vx[y as usize] = vy;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[x as usize], result, "Result wrong");
        assert_eq!(interpreter.registers.vx[0xF], underflow, "Underflow wrong");
    }

    #[test_case(0x5 , 0x3, 8, 16, 0; "SHL: vx, {vy} - No Overflow")]
    #[test_case(0xA, 0xF, 0b1011_0011, 0b0110_0110, 1 ; "SHL: vx, {vy} - Overflow")]
    #[test_case(0xF, 0xA, 0xFE, 1, 1 ; "SHL: vx, {vy} - Target VF - Overflow")]
    #[test_case(0xF, 0x7, 0b110, 0, 0 ; "SHL: vx, {vy} - Target VF - No Overflow")]
    fn test_handle_shift_left_register_one(x: u8, y: u8, vx: u8, result: u8, overflow: u8) {
        let rom: &[u8] = &[0x80 | x, (y << 4) | 0xE];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[x as usize] = vx;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[x as usize], result, "Result wrong");
        assert_eq!(interpreter.registers.vx[0xF], overflow, "Overflow wrong");
    }

    #[test_case(0xA , 0x0, 0x18, 0x18, 0x202; "SNE: vx equals vy")]
    #[test_case(0x7, 0x5, 1, 0x55, 0x204 ; "SNE: vx does not equal vy")]
    fn test_handle_skip_if_not_equal_register(x: u8, y: u8, vx: u8, vy: u8, pc: u16) {
        let rom: &[u8] = &[0x90 | x, y << 4];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[x as usize] = vx;
        interpreter.registers.vx[y as usize] = vy;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.pc, pc);
    }

    #[test]
    fn test_handle_load_immediate() {
        let rom: &[u8] = &[0xA6, 0x78];
        let mut interpreter = interpreter(rom);

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.i, 0x678);
    }

    #[test]
    fn test_handle_jump_offset() {
        let rom: &[u8] = &[0xB3, 0x00];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[0] = 0x12;

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.pc, 0x312);
    }

    #[test]
    fn test_handle_random_respects_mask() {
        let rom: Vec<u8> = [0xC5, 0x0F].repeat(64);
        let mut interpreter = interpreter(&rom);

        for _ in 0..64 {
            interpreter.step().unwrap();
            assert_eq!(interpreter.registers.vx[5] & 0xF0, 0);
        }
    }

    #[test]
    fn test_handle_random_is_seeded() {
        let rom: Vec<u8> = [0xC5, 0xFF].repeat(8);
        let mut a = interpreter(&rom);
        let mut b = interpreter(&rom);

        for _ in 0..8 {
            a.step().unwrap();
            b.step().unwrap();
            assert_eq!(a.registers.vx[5], b.registers.vx[5]);
        }
    }

    #[test]
    fn test_draw_zero_rows_at_reset_index() {
        // DRW V0, V0, 0
        let mut interpreter = interpreter(&[0xD0, 0x00]);
        interpreter.registers.vx[0xF] = 1;

        assert_eq!(interpreter.step().unwrap(), Flow::Draw);

        assert_eq!(interpreter.registers.i, 0);
        assert_eq!(interpreter.registers.vx[0xF], 0);
        assert_eq!(interpreter.display, Display::new());
    }

    #[test]
    fn test_handle_draw_sprite() {
        // LD I, glyph 0 ; DRW V1, V2, 5
        let rom: &[u8] = &[0xA0, 0x00, 0xD1, 0x25];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[1] = 10;
        interpreter.registers.vx[2] = 4;
        interpreter.registers.vx[0xF] = 1;

        interpreter.step().unwrap();
        assert_eq!(interpreter.step().unwrap(), Flow::Draw);

        assert_eq!(interpreter.registers.vx[0xF], 0);
        // top row of the "0" glyph is 0xF0
        assert!((10..14).all(|x| interpreter.display.pixel(x, 4)));
        assert!(!interpreter.display.pixel(14, 4));
        assert!(interpreter.display.pixel(10, 5));
        assert!(!interpreter.display.pixel(11, 5));
    }

    #[test]
    fn test_draw_twice_undoes_first_draw_and_reports_collision() {
        let rom: &[u8] = &[0xA0, 0x0A, 0xD1, 0x25, 0xD1, 0x25];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[1] = 60;
        interpreter.registers.vx[2] = 30;
        interpreter.display.xor_pixel(0, 0, true);
        let before = interpreter.display.clone();

        for _ in 0..3 {
            interpreter.step().unwrap();
        }

        assert_eq!(interpreter.display, before);
        assert_eq!(interpreter.registers.vx[0xF], 1);
    }

    #[test]
    fn test_draw_strict_edge_halts() {
        let rom: &[u8] = &[0xA0, 0x00, 0xD1, 0x25];
        let config = Config::default().with_sprite_edge(SpriteEdge::Strict);
        let mut interpreter = Interpreter::with_config(rom, config).unwrap();
        interpreter.registers.vx[1] = 62;

        interpreter.step().unwrap();

        assert_matches!(interpreter.step(), Err(Chip8Error::AddressOutOfRange { .. }));
        assert_eq!(interpreter.state(), State::Halted);
        assert!(interpreter.display.pixels().iter().all(|p| !p));
    }

    #[test]
    fn test_draw_sprite_past_end_of_memory() {
        let rom: &[u8] = &[0xAF, 0xFE, 0xD0, 0x05];
        let mut interpreter = interpreter(rom);

        interpreter.step().unwrap();

        assert_err!(interpreter.step());
    }

    #[test_case(true, 0x204 ; "SKP: key pressed")]
    #[test_case(false, 0x202 ; "SKP: key not pressed")]
    fn test_handle_skip_if_key_pressed(pressed: bool, pc: u16) {
        let mut interpreter = interpreter(&[0xE4, 0x9E]);
        interpreter.registers.vx[4] = 0xB;
        interpreter.shared.keyboard.set_key_state(0xB, pressed);

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.pc, pc);
    }

    #[test_case(true, 0x202 ; "SKNP: key pressed")]
    #[test_case(false, 0x204 ; "SKNP: key not pressed")]
    fn test_handle_skip_if_key_not_pressed(pressed: bool, pc: u16) {
        let mut interpreter = interpreter(&[0xE4, 0xA1]);
        interpreter.registers.vx[4] = 0xB;
        interpreter.shared.keyboard.set_key_state(0xB, pressed);

        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.pc, pc);
    }

    #[test]
    fn test_handle_timers() {
        // LD V1, 0x2A ; LD DT, V1 ; LD ST, V1 ; LD V2, DT
        let rom: &[u8] = &[0x61, 0x2A, 0xF1, 0x15, 0xF1, 0x18, 0xF2, 0x07];
        let mut interpreter = interpreter(rom);

        interpreter.step().unwrap();
        interpreter.step().unwrap();
        interpreter.step().unwrap();
        interpreter.shared.timers.tick();
        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[2], 0x29);
        assert_eq!(interpreter.shared.timers.sound(), 0x29);
    }

    #[test_case(KeyWaitValue::Index, 0xC ; "logical index")]
    #[test_case(KeyWaitValue::ScanCode, b'4' ; "scan code")]
    fn test_handle_wait_for_key_with_key_down(value: KeyWaitValue, expected: u8) {
        let config = Config::default().with_key_wait_value(value);
        let mut interpreter = Interpreter::with_config(&[0xF3, 0x0A], config).unwrap();
        interpreter.shared.keyboard.press_key(0xC);

        assert_eq!(interpreter.step().unwrap(), Flow::Continue);

        assert_eq!(interpreter.registers.vx[3], expected);
        assert_eq!(interpreter.registers.pc, 0x202);
    }

    #[test_case(KeyWaitValue::Index, 0x2 ; "lowest index")]
    #[test_case(KeyWaitValue::ScanCode, b'e' ; "scan code of highest index")]
    fn test_handle_wait_for_key_with_several_keys_down(value: KeyWaitValue, expected: u8) {
        let config = Config::default().with_key_wait_value(value);
        let mut interpreter = Interpreter::with_config(&[0xF3, 0x0A], config).unwrap();
        interpreter.shared.keyboard.press_key(0x2);
        interpreter.shared.keyboard.press_key(0x6);

        assert_eq!(interpreter.step().unwrap(), Flow::Continue);

        assert_eq!(interpreter.registers.vx[3], expected);
    }

    #[test]
    fn test_handle_wait_for_key_blocks_until_press() {
        let config = Config::default().with_key_poll_interval(Duration::from_millis(1));
        let mut interpreter = Interpreter::with_config(&[0xF3, 0x0A], config).unwrap();
        let shared = interpreter.shared_state();

        let presser = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            shared.keyboard.press_key(0x7);
        });

        assert_eq!(interpreter.step().unwrap(), Flow::Continue);
        presser.join().unwrap();

        assert_eq!(interpreter.registers.vx[3], 0x7);
    }

    #[test]
    fn test_handle_wait_for_key_observes_stop() {
        let config = Config::default().with_key_poll_interval(Duration::from_millis(1));
        let mut interpreter = Interpreter::with_config(&[0xF3, 0x0A], config).unwrap();
        let shared = interpreter.shared_state();

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            shared.stop();
        });

        assert_eq!(interpreter.step().unwrap(), Flow::Stopped);
        stopper.join().unwrap();

        assert_eq!(interpreter.state(), State::Halted);
        assert_eq!(interpreter.registers.pc, 0x200);
    }

    #[test]
    fn test_handle_add_index() {
        let rom: &[u8] = &[0xA1, 0x00, 0xF5, 0x1E];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[5] = 0xFF;

        interpreter.step().unwrap();
        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.i, 0x1FF);
        assert_eq!(interpreter.registers.vx[0xF], 0);
    }

    #[test]
    fn test_handle_load_glyph() {
        let rom: &[u8] = &[0xF6, 0x29];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[6] = 0xA;

        interpreter.step().unwrap();

        let i = interpreter.registers.i as usize;
        assert_eq!(i, 50);
        assert_eq!(interpreter.memory.0[i..i + 5], FONT_DATA[50..55]);
        assert_eq!(interpreter.memory.0[i..i + 5], [0xF0, 0x90, 0xF0, 0x90, 0x90]);
    }

    #[test_case(156, [1, 5, 6] ; "BCD: 156")]
    #[test_case(0, [0, 0, 0] ; "BCD: 0")]
    #[test_case(255, [2, 5, 5] ; "BCD: 255")]
    #[test_case(7, [0, 0, 7] ; "BCD: 7")]
    fn test_handle_store_bcd(value: u8, digits: [u8; 3]) {
        let rom: &[u8] = &[0xA3, 0x00, 0xF2, 0x33];
        let mut interpreter = interpreter(rom);
        interpreter.registers.vx[2] = value;

        interpreter.step().unwrap();
        interpreter.step().unwrap();

        assert_eq!(interpreter.memory.0[0x300..0x303], digits);
        assert_eq!(interpreter.registers.i, 0x300);
    }

    #[test]
    fn test_handle_store_bcd_out_of_range() {
        let rom: &[u8] = &[0xAF, 0xFE, 0xF2, 0x33];
        let mut interpreter = interpreter(rom);

        interpreter.step().unwrap();

        assert_matches!(interpreter.step(), Err(Chip8Error::AddressOutOfRange { address: 0x1000 }));
    }

    #[test_case(false, 0x300 ; "I unchanged")]
    #[test_case(true, 0x304 ; "I advanced")]
    fn test_handle_store_registers(increment: bool, index: u16) {
        let rom: &[u8] = &[0xA3, 0x00, 0xF3, 0x55];
        let config = Config::default().with_increment_index(increment);
        let mut interpreter = Interpreter::with_config(rom, config).unwrap();
        interpreter.registers.vx[..5].copy_from_slice(&[1, 2, 3, 4, 5]);

        interpreter.step().unwrap();
        interpreter.step().unwrap();

        assert_eq!(interpreter.memory.0[0x300..0x305], [1, 2, 3, 4, 0]);
        assert_eq!(interpreter.registers.i, index);
    }

    #[test_case(false, 0x300 ; "I unchanged")]
    #[test_case(true, 0x303 ; "I advanced")]
    fn test_handle_load_registers(increment: bool, index: u16) {
        let rom: &[u8] = &[0xA3, 0x00, 0xF2, 0x65];
        let config = Config::default().with_increment_index(increment);
        let mut interpreter = Interpreter::with_config(rom, config).unwrap();
        interpreter.memory.0[0x300..0x304].copy_from_slice(&[9, 8, 7, 6]);
        interpreter.registers.vx[3] = 0x55;

        interpreter.step().unwrap();
        interpreter.step().unwrap();

        assert_eq!(interpreter.registers.vx[..4], [9, 8, 7, 0x55]);
        assert_eq!(interpreter.registers.i, index);
    }

    #[test_case(0x5121 ; "5xy1")]
    #[test_case(0x812F ; "8xyF")]
    #[test_case(0xE4FF ; "ExFF")]
    #[test_case(0xF2FF ; "FxFF")]
    fn test_unknown_instruction_is_noop(word: u16) {
        let rom = word.to_be_bytes();
        let mut interpreter = interpreter(&rom);
        interpreter.registers.vx[1] = 0x11;
        interpreter.registers.vx[2] = 0x22;

        assert_ok!(interpreter.step());

        assert_eq!(interpreter.registers.pc, 0x202);
        assert_eq!(interpreter.registers.vx[1], 0x11);
        assert_eq!(interpreter.registers.vx[2], 0x22);
        assert_eq!(interpreter.state(), State::Running);
    }

    struct StopAfterFrames {
        shared: Arc<SharedState>,
        frames: usize,
        limit: usize,
    }

    impl Presenter for StopAfterFrames {
        fn present(&mut self, _display: &Display, _sound_on: bool) {
            self.frames += 1;
            if self.frames == self.limit {
                self.shared.stop();
            }
        }
    }

    #[test]
    fn test_run_presents_frames_until_stopped() {
        // CLS ; DRW V0, V0, 5 ; JP 0x202
        let rom: &[u8] = &[0x00, 0xE0, 0xD0, 0x05, 0x12, 0x02];
        let config = Config::default().with_instructions_per_second(None);
        let mut interpreter = Interpreter::with_config(rom, config).unwrap();
        let mut presenter = StopAfterFrames {
            shared: interpreter.shared_state(),
            frames: 0,
            limit: 4,
        };

        interpreter.run(&mut presenter).unwrap();

        assert_eq!(presenter.frames, 4);
        assert_eq!(interpreter.state(), State::Halted);
    }

    struct SoundRecorder {
        shared: Arc<SharedState>,
        sounds: Vec<bool>,
    }

    impl Presenter for SoundRecorder {
        fn present(&mut self, _display: &Display, sound_on: bool) {
            self.sounds.push(sound_on);
            if sound_on {
                self.shared.timers.set_sound(0);
            } else {
                self.shared.stop();
            }
        }
    }

    #[test]
    fn test_run_presents_sound_changes_without_drawing() {
        // LD V1, 5 ; LD ST, V1 ; JP 0x204
        let rom: &[u8] = &[0x61, 0x05, 0xF1, 0x18, 0x12, 0x04];
        let config = Config::default().with_instructions_per_second(None);
        let mut interpreter = Interpreter::with_config(rom, config).unwrap();
        let mut presenter = SoundRecorder {
            shared: interpreter.shared_state(),
            sounds: Vec::new(),
        };

        interpreter.run(&mut presenter).unwrap();

        assert_eq!(presenter.sounds, vec![true, false]);
    }

    #[test]
    fn test_run_surfaces_faults() {
        let config = Config::default().with_instructions_per_second(None);
        let mut interpreter = Interpreter::with_config(&[0x00, 0xEE], config).unwrap();

        let result = interpreter.run(&mut crate::presenter::NullPresenter);

        assert_matches!(result, Err(Chip8Error::StackUnderflow { .. }));
        assert_eq!(interpreter.state(), State::Halted);
    }
}
