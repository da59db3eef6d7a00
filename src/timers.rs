use std::{
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::shared::SharedState;

/// Delay and sound timers. Both count down towards zero once per tick.
#[derive(Debug, Default)]
pub struct Timers {
    delay: AtomicU8,
    sound: AtomicU8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(&self) -> u8 {
        self.delay.load(Ordering::Acquire)
    }

    pub fn sound(&self) -> u8 {
        self.sound.load(Ordering::Acquire)
    }

    pub fn set_delay(&self, value: u8) {
        self.delay.store(value, Ordering::Release);
    }

    pub fn set_sound(&self, value: u8) {
        self.sound.store(value, Ordering::Release);
    }

    /// Whether the buzzer should currently sound.
    pub fn is_sounding(&self) -> bool {
        self.sound() > 0
    }

    /// Decrements both timers by one, stopping at zero.
    pub fn tick(&self) {
        Self::count_down(&self.delay);
        Self::count_down(&self.sound);
    }

    pub fn reset(&self) {
        self.set_delay(0);
        self.set_sound(0);
    }

    fn count_down(timer: &AtomicU8) {
        // `fetch_update` retries if the interpreter stored a new value in between,
        // so a write is never lost to a stale decrement.
        let _ = timer.fetch_update(Ordering::AcqRel, Ordering::Acquire, |value| value.checked_sub(1));
    }
}

/// Spawns the timer activity: ticks `state.timers` every `interval` until the
/// stop signal is raised.
pub fn spawn_ticker(state: Arc<SharedState>, interval: Duration) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("chip8-timers".into())
        .spawn(move || {
            log::debug!("Timer thread started ({:?} per tick)", interval);

            let mut next_tick = Instant::now() + interval;
            while !state.is_stopped() {
                let now = Instant::now();
                if now < next_tick {
                    thread::sleep(next_tick - now);
                    continue;
                }

                state.timers.tick();

                // Don't try to catch up after a long stall, just resume the cadence.
                next_tick += interval;
                if next_tick < now {
                    next_tick = now + interval;
                }
            }

            log::debug!("Timer thread exited");
        })
}
