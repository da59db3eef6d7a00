use crate::{config::SpriteEdge, Chip8Error, Result};

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// 64x32-pixel monochrome framebuffer, row-major, with the origin in the top left corner:
/// ( 0, 0)   (63, 0)
/// ( 0,31)   (63,31)
#[derive(Clone, PartialEq, Eq)]
pub struct Display([bool; DISPLAY_WIDTH * DISPLAY_HEIGHT]);

impl Display {
    pub fn new() -> Self {
        Display([false; DISPLAY_WIDTH * DISPLAY_HEIGHT])
    }

    pub fn clear(&mut self) {
        self.0.fill(false);
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.0[self.compute_idx(x % DISPLAY_WIDTH, y % DISPLAY_HEIGHT)]
    }

    /// Xors the pixel at position (`x`, `y`) and returns `true`
    /// if the pixel was cleared. Coordinates wrap like in [`Display::pixel`].
    pub fn xor_pixel(&mut self, x: usize, y: usize, value: bool) -> bool {
        let idx = self.compute_idx(x % DISPLAY_WIDTH, y % DISPLAY_HEIGHT);
        let last_value = self.0[idx];
        let new_value = last_value ^ value;
        self.0[idx] = new_value;

        last_value && !new_value
    }

    /// Draws `sprite` with its top left corner at (`x`, `y`), one byte per row,
    /// most significant bit leftmost. Returns `true` if any lit pixel was erased.
    ///
    /// With [`SpriteEdge::Strict`] the whole sprite is checked before anything is
    /// drawn, so a fault leaves the framebuffer untouched.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8], edge: SpriteEdge) -> Result<bool> {
        if edge == SpriteEdge::Strict {
            self.check_bounds(x, y, sprite)?;
        }

        let mut collision = false;

        for (offset, row) in sprite.iter().enumerate() {
            let py = (y + offset) % DISPLAY_HEIGHT;

            for bit in 0..8 {
                if row & (0x80u8 >> bit) == 0 {
                    continue;
                }

                let px = (x + bit) % DISPLAY_WIDTH;
                collision |= self.xor_pixel(px, py, true);
            }
        }

        Ok(collision)
    }

    fn check_bounds(&self, x: usize, y: usize, sprite: &[u8]) -> Result<()> {
        for (offset, row) in sprite.iter().enumerate() {
            for bit in 0..8 {
                if row & (0x80u8 >> bit) == 0 {
                    continue;
                }

                let (px, py) = (x + bit, y + offset);
                if px >= DISPLAY_WIDTH || py >= DISPLAY_HEIGHT {
                    return Err(Chip8Error::AddressOutOfRange {
                        address: py * DISPLAY_WIDTH + px,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn compute_idx(&self, x: usize, y: usize) -> usize {
        y * self.width() + x
    }

    pub fn pixels(&self) -> &[bool] {
        &self.0
    }

    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.0.chunks(DISPLAY_WIDTH) {
            let line: String = row.iter().map(|p| if *p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}
