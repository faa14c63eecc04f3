//! Board representation and game-state types.
//!
//! Contains the board topology, tiles, players, and the overall game state.

pub mod player;
pub mod state;
pub mod tile;
pub mod topology;

pub use player::{Player, PlayerId, TokenColor, JAIL_TURNS, STARTING_MONEY};
pub use state::{
    GameError, GameState, Movement, OfferKind, PendingOffer, MAX_PLAYERS, MIN_PLAYERS,
};
pub use tile::{generate_tiles, Tile, TileKind, MAX_LEVEL};
pub use topology::{
    position_to_coordinates, token_coordinates, BOARD_SIZE, GO_TO_JAIL_INDEX, JAIL_INDEX,
    START_INDEX,
};
