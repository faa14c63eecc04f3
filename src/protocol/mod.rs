//! Presentation protocol.
//!
//! A line-oriented text protocol that lets a presentation layer drive the
//! engine: the command parser, the outcome notation written in reply to
//! turn commands, and JSON snapshots for redrawing.

pub mod notation;
pub mod parser;
pub mod snapshot;

pub use notation::{format_outcome, format_resolution};
pub use parser::{parse_command, Command};
pub use snapshot::{encode_state, encode_tile, GameView, PlayerView, TileView};
