//! Command parser.
//!
//! Parses incoming protocol lines from a presentation layer into structured
//! `Command` variants that the engine main loop can dispatch on.

use tracing::warn;

/// A parsed presentation-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game with the given players, in seat order.
    NewGame { names: Vec<String> },

    /// Play the current turn with a fresh die roll.
    Roll,

    /// Settle an open purchase offer.
    Buy { accept: bool },

    /// Settle an open upgrade offer.
    Upgrade { accept: bool },

    /// Request a JSON snapshot of the whole game.
    State,

    /// Request a JSON view of a single tile.
    Tile { index: usize },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "roll" => Some(Command::Roll),
        "state" => Some(Command::State),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(args),
        "newgame" => parse_newgame(args),
        "buy" => parse_decision("buy", args).map(|accept| Command::Buy { accept }),
        "upgrade" => parse_decision("upgrade", args).map(|accept| Command::Upgrade { accept }),
        "tile" => parse_tile(args),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }
    let rest = &args[1..];

    let (name_parts, value_parts) = match rest.iter().position(|&t| t == "value") {
        Some(vi) => (&rest[..vi], Some(&rest[vi + 1..])),
        None => (rest, None),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }

    let value = value_parts
        .filter(|parts| !parts.is_empty())
        .map(|parts| parts.join(" "));
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `newgame <name> <name> [<name> ...]`. Roster limits are checked by the engine.
fn parse_newgame(args: &[&str]) -> Option<Command> {
    if args.is_empty() {
        warn!("malformed newgame: expected 'newgame <name> <name> [...]'");
        return None;
    }
    Some(Command::NewGame {
        names: args.iter().map(|s| s.to_string()).collect(),
    })
}

/// Parses the `yes`/`no` argument of `buy` and `upgrade`.
fn parse_decision(command: &str, args: &[&str]) -> Option<bool> {
    match args.first().copied() {
        Some("yes") | Some("y") | Some("accept") => Some(true),
        Some("no") | Some("n") | Some("decline") => Some(false),
        Some(other) => {
            warn!(command, value = other, "invalid decision, expected yes or no");
            None
        }
        None => {
            warn!(command, "missing decision, expected yes or no");
            None
        }
    }
}

/// Parses `tile <index>`.
fn parse_tile(args: &[&str]) -> Option<Command> {
    match args.first().map(|s| s.parse::<usize>()) {
        Some(Ok(index)) => Some(Command::Tile { index }),
        Some(Err(_)) => {
            warn!(value = args[0], "invalid tile index");
            None
        }
        None => {
            warn!("malformed tile: expected 'tile <index>'");
            None
        }
    }
}
