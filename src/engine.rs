//! Engine state management.
//!
//! Holds the current game, engine options, and the random source used for
//! dice and card draws. Each `handle_*` method answers one protocol command
//! by writing its response lines to `out`.

use std::collections::HashMap;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::board::GameState;
use crate::protocol::notation::{format_outcome, format_resolution};
use crate::protocol::snapshot::{encode_state, encode_tile};
use crate::resolve::{resolve_purchase, resolve_upgrade, roll_and_resolve, TurnOutcome};

/// Name of the option that reseeds the engine's random source.
pub const SEED_OPTION: &str = "Seed";

/// Reply sent for commands that need a game before `newgame`.
const NO_GAME: &str = "error no game in progress";

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Option<GameState>,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new engine with no game and an entropy-seeded RNG.
    pub fn new() -> Self {
        Engine {
            game: None,
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates an engine whose dice and card draws are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Engine {
            game: None,
            options: HashMap::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Sets an engine option. `Seed` reseeds the RNG; 0 means entropy.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name == SEED_OPTION {
            match value.as_deref().map(str::parse::<u64>) {
                Some(Ok(0)) => self.rng = SmallRng::from_entropy(),
                Some(Ok(seed)) => self.rng = SmallRng::seed_from_u64(seed),
                _ => warn!(value = ?value, "ignoring invalid Seed value"),
            }
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Handles the handshake: writes id, options, protocol_version, and hellook.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name landlord")?;
        writeln!(out, "id author landlord")?;
        writeln!(
            out,
            "option name {} type spin default 0 min 0 max {}",
            SEED_OPTION,
            u64::MAX
        )?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `newgame`: replaces any running game with a fresh one.
    pub fn handle_newgame<W: Write>(&mut self, names: &[String], out: &mut W) -> io::Result<()> {
        match GameState::new(names) {
            Ok(state) => {
                info!(players = names.len(), "new game");
                writeln!(out, "game {} players", state.players().len())?;
                self.game = Some(state);
            }
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }

    /// Handles `roll`: plays the current turn and writes its outcome line.
    pub fn handle_roll<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(state) = self.game.as_mut() else {
            writeln!(out, "{}", NO_GAME)?;
            return out.flush();
        };
        let outcome = roll_and_resolve(state, &mut self.rng);
        if let TurnOutcome::GameOver { winner } = &outcome {
            info!(winner = ?winner, "game over");
        }
        debug!(outcome = ?outcome, "turn played");
        writeln!(out, "{}", format_outcome(&outcome))?;
        out.flush()
    }

    /// Handles `buy yes|no`.
    pub fn handle_buy<W: Write>(&mut self, accept: bool, out: &mut W) -> io::Result<()> {
        let Some(state) = self.game.as_mut() else {
            writeln!(out, "{}", NO_GAME)?;
            return out.flush();
        };
        let resolution = resolve_purchase(state, accept);
        writeln!(out, "{}", format_resolution(&resolution))?;
        out.flush()
    }

    /// Handles `upgrade yes|no`.
    pub fn handle_upgrade<W: Write>(&mut self, accept: bool, out: &mut W) -> io::Result<()> {
        let Some(state) = self.game.as_mut() else {
            writeln!(out, "{}", NO_GAME)?;
            return out.flush();
        };
        let resolution = resolve_upgrade(state, accept);
        writeln!(out, "{}", format_resolution(&resolution))?;
        out.flush()
    }

    /// Handles `state`: writes a JSON snapshot of the whole game.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.game {
            Some(state) => writeln!(out, "state {}", encode_state(state)?)?,
            None => writeln!(out, "{}", NO_GAME)?,
        }
        out.flush()
    }

    /// Handles `tile <index>`: writes a JSON view of one tile.
    pub fn handle_tile<W: Write>(&self, index: usize, out: &mut W) -> io::Result<()> {
        match &self.game {
            Some(state) => writeln!(out, "tile {}", encode_tile(state, index)?)?,
            None => writeln!(out, "{}", NO_GAME)?,
        }
        out.flush()
    }
}
