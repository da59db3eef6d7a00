//! Wires the interpreter, the timer activity and the input activity together.
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{anyhow, Context};

use crate::{
    input::{InputEvent, InputSource},
    interpreter::Interpreter,
    presenter::Presenter,
    shared::SharedState,
    timers,
};

/// A loaded interpreter plus the activities that run next to it.
pub struct Machine {
    interpreter: Interpreter,
}

impl Machine {
    pub fn new(interpreter: Interpreter) -> Self {
        Self { interpreter }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn shared_state(&self) -> Arc<SharedState> {
        self.interpreter.shared_state()
    }

    /// Runs the program on the calling thread until the stop signal is raised,
    /// either by `input`, by the interpreter halting on a fault or by anyone
    /// else holding the shared state.
    ///
    /// Returns once the timer and input threads have exited.
    pub fn run<P, S>(&mut self, presenter: &mut P, input: S) -> anyhow::Result<()>
    where
        P: Presenter,
        S: InputSource + Send + 'static,
    {
        let shared = self.shared_state();
        let tick = self.interpreter.config().tick_interval();

        let timer = timers::spawn_ticker(Arc::clone(&shared), tick).context("failed to start timer thread")?;
        let input = match spawn_input(Arc::clone(&shared), input, tick) {
            Ok(handle) => handle,
            Err(err) => {
                shared.stop();
                join("timer", timer)?;
                return Err(err).context("failed to start input thread");
            }
        };

        let result = self.interpreter.run(presenter);
        shared.stop();

        let timer_result = join("timer", timer);
        let input_result = join("input", input).and_then(|r| r);

        result?;
        timer_result?;
        input_result
    }
}

fn spawn_input<S>(shared: Arc<SharedState>, mut source: S, timeout: Duration) -> std::io::Result<JoinHandle<anyhow::Result<()>>>
where
    S: InputSource + Send + 'static,
{
    thread::Builder::new().name("chip8-input".into()).spawn(move || {
        log::debug!("Input thread started");

        while !shared.is_stopped() {
            match source.poll(timeout) {
                Ok(Some(InputEvent::Key { key, pressed })) => shared.keyboard.set_key_state(key, pressed),
                Ok(Some(InputEvent::Terminate)) => {
                    log::info!("Terminate requested by input");
                    shared.stop();
                }
                Ok(None) => {}
                Err(err) => {
                    log::error!("Input source failed: {:#}", err);
                    shared.stop();
                    return Err(err);
                }
            }
        }

        log::debug!("Input thread exited");
        Ok(())
    })
}

fn join<T>(name: &str, handle: JoinHandle<T>) -> anyhow::Result<T> {
    handle.join().map_err(|_| {
        log::error!("The {} thread panicked", name);
        anyhow!("{} thread panicked", name)
    })
}
