use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chip8::config::{Config, KeyWaitValue, SpriteEdge, DEFAULT_INSTRUCTIONS_PER_SECOND};
use chip8::interpreter::Interpreter;
use chip8::machine::Machine;
use chip8::memory::read_rom;
use chip8::terminal::{TerminalInput, TerminalPresenter, TerminalSession};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The path of the rom to load
    #[arg(short, long, value_name = "FILE")]
    rom_path: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND)]
    ips: u32,

    /// Run as fast as possible, ignoring --ips
    #[arg(long)]
    unthrottled: bool,

    /// Advance I past the transferred bytes after Fx55 / Fx65
    #[arg(long)]
    increment_index: bool,

    /// Store the host key byte instead of the key index on Fx0A
    #[arg(long)]
    scan_code_key_wait: bool,

    /// Fault on sprites that leave the screen instead of wrapping them
    #[arg(long)]
    strict_sprites: bool,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config::default()
            .with_instructions_per_second((!self.unthrottled).then_some(self.ips))
            .with_increment_index(self.increment_index)
            .with_key_wait_value(if self.scan_code_key_wait {
                KeyWaitValue::ScanCode
            } else {
                KeyWaitValue::Index
            })
            .with_sprite_edge(if self.strict_sprites {
                SpriteEdge::Strict
            } else {
                SpriteEdge::Wrap
            })
            .with_seed(self.seed)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let bytes = read_rom(&cli.rom_path).with_context(|| format!("failed to load {}", cli.rom_path.display()))?;
    let interpreter = Interpreter::with_config(&bytes, cli.config())?;
    let mut machine = Machine::new(interpreter);

    let session = TerminalSession::enter().context("failed to set up the terminal")?;
    let result = machine.run(&mut TerminalPresenter::new(), TerminalInput::new());
    drop(session);

    result
}
