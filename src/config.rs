use std::time::Duration;

/// What `Fx0A` writes into Vx once a key is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyWaitValue {
    /// The logical key index 0x0 - 0xF, consistent with `Ex9E` and `ExA1`.
    /// With several keys down the lowest index wins.
    #[default]
    Index,
    /// The byte of the host key mapped to that index (`x`, `1`, `2`, ...).
    /// Some older ROMs were tuned against interpreters that behaved like this.
    /// With several keys down the highest index wins, as it did there.
    ScanCode,
}

/// How `Dxyn` treats pixels that fall off the 64x32 screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteEdge {
    /// Coordinates wrap modulo the screen dimension.
    #[default]
    Wrap,
    /// Any off-screen pixel is an `AddressOutOfRange` fault.
    Strict,
}

/// Runtime switches for the interpreter and the activities around it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Advance I by X + 1 after `Fx55` / `Fx65`.
    pub increment_index_on_transfer: bool,
    pub key_wait_value: KeyWaitValue,
    pub sprite_edge: SpriteEdge,
    /// Pace of the fetch-decode-execute loop. `None` runs as fast as possible.
    pub instructions_per_second: Option<u32>,
    /// Tick rate of the delay and sound timers.
    pub timer_hz: u32,
    /// How often a pending `Fx0A` looks at the keyboard again.
    pub key_poll_interval: Duration,
    /// Seed for `Cxkk`. Seeded from OS entropy when unset.
    pub seed: Option<u64>,
}

pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 700;
pub const DEFAULT_TIMER_HZ: u32 = 60;

impl Default for Config {
    fn default() -> Self {
        Self {
            increment_index_on_transfer: false,
            key_wait_value: KeyWaitValue::default(),
            sprite_edge: SpriteEdge::default(),
            instructions_per_second: Some(DEFAULT_INSTRUCTIONS_PER_SECOND),
            timer_hz: DEFAULT_TIMER_HZ,
            key_poll_interval: Duration::from_micros(1_000_000 / DEFAULT_TIMER_HZ as u64),
            seed: None,
        }
    }
}

impl Config {
    pub fn with_increment_index(mut self, enabled: bool) -> Self {
        self.increment_index_on_transfer = enabled;
        self
    }

    pub fn with_key_wait_value(mut self, value: KeyWaitValue) -> Self {
        self.key_wait_value = value;
        self
    }

    pub fn with_sprite_edge(mut self, edge: SpriteEdge) -> Self {
        self.sprite_edge = edge;
        self
    }

    pub fn with_instructions_per_second(mut self, ips: Option<u32>) -> Self {
        self.instructions_per_second = ips.filter(|ips| *ips > 0);
        self
    }

    pub fn with_timer_hz(mut self, hz: u32) -> Self {
        self.timer_hz = hz.max(1);
        self
    }

    pub fn with_key_poll_interval(mut self, interval: Duration) -> Self {
        self.key_poll_interval = interval;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Time between two timer ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.timer_hz.max(1) as f64)
    }

    /// Time budget for a single instruction, if pacing is enabled.
    pub fn cycle_time(&self) -> Option<Duration> {
        self.instructions_per_second
            .filter(|ips| *ips > 0)
            .map(|ips| Duration::from_secs_f64(1.0 / ips as f64))
    }
}
