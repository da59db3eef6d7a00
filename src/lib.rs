pub mod config;
pub mod display;
mod error;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod keyboard;
pub mod machine;
pub mod memory;
pub mod presenter;
mod registers;
pub mod shared;
pub mod terminal;
pub mod timers;

pub use error::Chip8Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;
