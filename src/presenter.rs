use crate::display::Display;

/// Consumer of the framebuffer, e.g. a window or a terminal.
///
/// Called on the interpreter thread after an instruction that changed the
/// screen. Implementations only get read access to the machine.
pub trait Presenter {
    fn present(&mut self, display: &Display, sound_on: bool);
}

/// Discards every frame. Useful for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _display: &Display, _sound_on: bool) {}
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, display: &Display, sound_on: bool) {
        (**self).present(display, sound_on)
    }
}
