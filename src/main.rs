//! Landlord -- a property board game engine speaking a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to adjust.

use std::io::{self, BufRead};

use tracing_subscriber::EnvFilter;

use landlord::engine::Engine;
use landlord::protocol::parser::{parse_command, Command};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> io::Result<()> {
    init_tracing();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Hello => engine.handle_hello(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame { names } => engine.handle_newgame(&names, &mut out)?,
            Command::Roll => engine.handle_roll(&mut out)?,
            Command::Buy { accept } => engine.handle_buy(accept, &mut out)?,
            Command::Upgrade { accept } => engine.handle_upgrade(accept, &mut out)?,
            Command::State => engine.handle_state(&mut out)?,
            Command::Tile { index } => engine.handle_tile(index, &mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}
