//! JSON state snapshots.
//!
//! Read-only views of the game that a presentation layer redraws from.
//! Each view carries board coordinates alongside the engine's integer
//! positions. Snapshots are never read back into a game.

use serde::Serialize;

use crate::board::topology::{position_to_coordinates, token_coordinates};
use crate::board::{GameState, PendingOffer, Player, PlayerId, Tile, TileKind, TokenColor};

/// View of a single player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView<'a> {
    pub id: PlayerId,
    pub name: &'a str,
    pub color: TokenColor,
    pub money: i64,
    pub position: usize,
    /// Token position on the board plane, offset by seat.
    pub coordinates: (f64, f64),
    pub bankrupt: bool,
    pub in_jail: bool,
    pub jail_turns_remaining: u8,
    pub owned: &'a [usize],
}

impl<'a> PlayerView<'a> {
    pub fn new(player: &'a Player) -> Self {
        PlayerView {
            id: player.id(),
            name: player.name(),
            color: player.color(),
            money: player.money(),
            position: player.position(),
            coordinates: token_coordinates(player.position(), player.id().index()),
            bankrupt: player.is_bankrupt(),
            in_jail: player.is_in_jail(),
            jail_turns_remaining: player.jail_turns_remaining(),
            owned: player.owned_properties(),
        }
    }
}

/// View of a single tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileView<'a> {
    pub index: usize,
    pub kind: TileKind,
    pub name: &'a str,
    pub price: i64,
    pub rent: i64,
    pub owner: Option<PlayerId>,
    pub level: u8,
    pub upgrade_cost: Option<i64>,
    pub coordinates: (f64, f64),
}

impl<'a> TileView<'a> {
    pub fn new(tile: &'a Tile) -> Self {
        TileView {
            index: tile.index(),
            kind: tile.kind(),
            name: tile.name(),
            price: tile.price(),
            rent: tile.rent(),
            owner: tile.owner(),
            level: tile.level(),
            upgrade_cost: tile.can_upgrade().then(|| tile.upgrade_cost()),
            coordinates: position_to_coordinates(tile.index()),
        }
    }
}

/// View of the whole game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameView<'a> {
    pub current_player: PlayerId,
    pub pending_offer: Option<&'a PendingOffer>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub players: Vec<PlayerView<'a>>,
    pub tiles: Vec<TileView<'a>>,
}

impl<'a> GameView<'a> {
    pub fn new(state: &'a GameState) -> Self {
        GameView {
            current_player: state.current_player_id(),
            pending_offer: state.pending_offer(),
            game_over: state.is_game_over(),
            winner: state.winner(),
            players: state.players().iter().map(PlayerView::new).collect(),
            tiles: state.tiles().iter().map(TileView::new).collect(),
        }
    }
}

/// Encodes the whole game as a single-line JSON object.
pub fn encode_state(state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&GameView::new(state))
}

/// Encodes the tile at `index` (wrapped onto the board) as a single-line JSON object.
pub fn encode_tile(state: &GameState, index: usize) -> Result<String, serde_json::Error> {
    serde_json::to_string(&TileView::new(state.tile_at(index)))
}
