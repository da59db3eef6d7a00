use std::sync::atomic::{AtomicBool, Ordering};

use crate::{keyboard::Keyboard, timers::Timers};

/// State shared between the interpreter, the timer activity and the input
/// activity. Hand it around as an `Arc<SharedState>`.
#[derive(Debug, Default)]
pub struct SharedState {
    pub timers: Timers,
    pub keyboard: Keyboard,
    stop: AtomicBool,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests every activity to wind down.
    pub fn stop(&self) {
        if !self.stop.swap(true, Ordering::AcqRel) {
            log::info!("Stop requested");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Back to the power-on state: timers at zero, all keys released, not stopped.
    pub fn reset(&self) {
        self.timers.reset();
        self.keyboard.clear();
        self.stop.store(false, Ordering::Release);
    }
}
