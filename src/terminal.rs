//! Terminal front end: renders the framebuffer with block characters and reads
//! the keyboard through crossterm.
use std::{
    collections::VecDeque,
    io::{self, Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::{
    display::Display,
    input::{InputEvent, InputSource},
    keyboard::{key_for_scan_code, KEY_COUNT},
    presenter::Presenter,
};

/// Most terminals only report presses, so a key counts as released once it
/// hasn't been seen for this long.
const KEY_HOLD: Duration = Duration::from_millis(150);

/// Raw mode and the alternate screen for as long as this lives.
pub struct TerminalSession;

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;

        Ok(TerminalSession)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            log::warn!("Could not restore the screen: {}", err);
        }
        if let Err(err) = terminal::disable_raw_mode() {
            log::warn!("Could not leave raw mode: {}", err);
        }
    }
}

/// Renders one line of text per framebuffer row, two columns per pixel.
pub fn render_frame(display: &Display) -> Vec<String> {
    display
        .pixels()
        .chunks(display.width())
        .map(|row| row.iter().map(|p| if *p { "██" } else { "  " }).collect())
        .collect()
}

pub struct TerminalPresenter {
    out: Stdout,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    fn draw(&mut self, display: &Display, sound_on: bool) -> io::Result<()> {
        for (y, line) in render_frame(display).into_iter().enumerate() {
            queue!(self.out, MoveTo(0, y as u16), Print(line))?;
        }

        let status = if sound_on { "BEEP" } else { "    " };
        queue!(
            self.out,
            MoveTo(0, display.height() as u16),
            Print(format!("{}  ESC to quit", status))
        )?;

        self.out.flush()
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, display: &Display, sound_on: bool) {
        if let Err(err) = self.draw(display, sound_on) {
            log::warn!("Rendering failed: {}", err);
        }
    }
}

/// Maps a terminal key event to a machine input event.
///
/// Esc and Ctrl-C terminate, the conventional `1234/qwer/asdf/zxcv` layout maps
/// to the 16 keys, everything else is ignored.
pub fn map_key_event(event: &KeyEvent) -> Option<InputEvent> {
    match event.code {
        KeyCode::Esc => Some(InputEvent::Terminate),
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Terminate),
        KeyCode::Char(c) if c.is_ascii() => key_for_scan_code(c as u8).map(|key| InputEvent::Key {
            key,
            pressed: event.kind != KeyEventKind::Release,
        }),
        _ => None,
    }
}

/// Keyboard input from the controlling terminal.
pub struct TerminalInput {
    pending: VecDeque<InputEvent>,
    last_seen: [Option<Instant>; KEY_COUNT],
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            last_seen: [None; KEY_COUNT],
        }
    }

    fn release_stale_keys(&mut self, now: Instant) {
        for (key, seen) in self.last_seen.iter_mut().enumerate() {
            if seen.map_or(false, |at| now.duration_since(at) >= KEY_HOLD) {
                *seen = None;
                self.pending.push_back(InputEvent::Key {
                    key: key as u8,
                    pressed: false,
                });
            }
        }
    }

    fn record(&mut self, event: InputEvent) {
        if let InputEvent::Key { key, pressed } = event {
            self.last_seen[key as usize] = pressed.then(Instant::now);
        }
        self.pending.push_back(event);
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> anyhow::Result<Option<InputEvent>> {
        if self.pending.is_empty() && event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if let Some(event) = map_key_event(&key_event) {
                    self.record(event);
                }
            }
        }

        self.release_stale_keys(Instant::now());

        Ok(self.pending.pop_front())
    }
}
