use std::{
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::Duration,
};

/// Something that happened on the host's input device, already mapped to the
/// 16 logical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key { key: u8, pressed: bool },
    /// The user asked to quit.
    Terminate,
}

/// Source of input events for the input activity.
pub trait InputSource {
    /// Waits at most `timeout` for the next event. `Ok(None)` means nothing
    /// happened in time; errors end the input activity and stop the machine.
    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<InputEvent>>;
}

/// Input fed from another thread through a channel.
///
/// When every sender is gone the source reports [`InputEvent::Terminate`].
#[derive(Debug)]
pub struct ChannelInput {
    rx: Receiver<InputEvent>,
}

impl ChannelInput {
    pub fn new(rx: Receiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<InputEvent>> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Ok(Some(InputEvent::Terminate)),
        }
    }
}
