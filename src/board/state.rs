//! Game state representation.
//!
//! Owns the player roster, the 40-tile board, the turn pointer, and the
//! purchase/upgrade offer that is waiting for the caller's decision.

use serde::Serialize;

use super::player::{Player, PlayerId};
use super::tile::{generate_tiles, Tile};
use super::topology::wrap_index;

/// Fewest players a game can be started with.
pub const MIN_PLAYERS: usize = 2;

/// Most players a game can be started with.
pub const MAX_PLAYERS: usize = 4;

/// Errors that can occur when setting up a game.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error("a game needs 2 to 4 players, got {0}")]
    PlayerCount(usize),
}

/// A completed die roll and the movement it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Movement {
    pub player: PlayerId,
    pub roll: u8,
    pub from: usize,
    pub to: usize,
}

/// The decision an open offer is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    Purchase,
    Upgrade,
}

impl OfferKind {
    pub const fn name(self) -> &'static str {
        match self {
            OfferKind::Purchase => "purchase",
            OfferKind::Upgrade => "upgrade",
        }
    }
}

/// A purchase or upgrade decision that suspends turn advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingOffer {
    pub kind: OfferKind,
    pub tile: usize,
    /// Price for a purchase, upgrade cost for an upgrade.
    pub amount: i64,
    pub movement: Movement,
}

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    players: Vec<Player>,
    tiles: Vec<Tile>,
    current: usize,
    pending: Option<PendingOffer>,
}

impl GameState {
    /// Seats one player per name, in order, on a freshly generated board.
    ///
    /// A blank name is replaced with `Player <seat + 1>`.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()) {
            return Err(GameError::PlayerCount(names.len()));
        }
        let players = names
            .iter()
            .enumerate()
            .map(|(seat, name)| match name.as_ref().trim() {
                "" => Player::new(PlayerId(seat), format!("Player {}", seat + 1)),
                name => Player::new(PlayerId(seat), name),
            })
            .collect();

        Ok(GameState {
            players,
            tiles: generate_tiles(),
            current: 0,
            pending: None,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns the player in `id`'s seat.
    ///
    /// Panics if `id` was not issued by this game.
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Returns the tile at `index`, wrapping every 40.
    pub fn tile_at(&self, index: usize) -> &Tile {
        &self.tiles[wrap_index(index)]
    }

    pub fn tile_at_mut(&mut self, index: usize) -> &mut Tile {
        &mut self.tiles[wrap_index(index)]
    }

    pub fn current_player_id(&self) -> PlayerId {
        PlayerId(self.current)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current]
    }

    /// Players who are not bankrupt, in seat order.
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| !p.is_bankrupt()).collect()
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| !p.is_bankrupt()).count()
    }

    /// Returns true once at most one player is still solvent.
    pub fn is_game_over(&self) -> bool {
        self.active_count() <= 1
    }

    /// The last solvent player, once the game is over.
    pub fn winner(&self) -> Option<PlayerId> {
        if !self.is_game_over() {
            return None;
        }
        self.players.iter().find(|p| !p.is_bankrupt()).map(|p| p.id())
    }

    pub fn pending_offer(&self) -> Option<&PendingOffer> {
        self.pending.as_ref()
    }

    pub(crate) fn set_pending_offer(&mut self, offer: PendingOffer) {
        self.pending = Some(offer);
    }

    pub(crate) fn take_pending_offer(&mut self) -> Option<PendingOffer> {
        self.pending.take()
    }

    /// Total money held by all players, bankrupt ones included.
    pub fn total_money(&self) -> i64 {
        self.players.iter().map(|p| p.money()).sum()
    }

    /// Passes the turn to the next solvent player in seat order.
    ///
    /// Gives up after one full cycle, so with a single solvent player the turn
    /// comes back to them and with none it stays put.
    pub fn next_player(&mut self) -> PlayerId {
        let n = self.players.len();
        let mut idx = self.current;
        for _ in 0..n {
            idx = (idx + 1) % n;
            if !self.players[idx].is_bankrupt() {
                self.current = idx;
                break;
            }
        }
        self.current_player_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tile::TileKind;
    use crate::board::topology::BOARD_SIZE;

    fn game(n: usize) -> GameState {
        let names = ["Ann", "Ben", "Cid", "Dee"];
        GameState::new(&names[..n]).unwrap()
    }

    #[test]
    fn new_game_seats_players_in_order() {
        let state = game(3);
        assert_eq!(state.players().len(), 3);
        assert_eq!(state.tiles().len(), BOARD_SIZE);
        for (i, p) in state.players().iter().enumerate() {
            assert_eq!(p.id(), PlayerId(i));
        }
        assert_eq!(state.current_player().name(), "Ann");
        assert!(state.pending_offer().is_none());
    }

    #[test]
    fn roster_size_is_validated() {
        assert_eq!(GameState::new(&["Solo"]).unwrap_err(), GameError::PlayerCount(1));
        assert_eq!(
            GameState::new(&["a", "b", "c", "d", "e"]).unwrap_err(),
            GameError::PlayerCount(5)
        );
    }

    #[test]
    fn blank_names_get_seat_defaults() {
        let state = GameState::new(&["", "Ben", "  "]).unwrap();
        let names: Vec<&str> = state.players().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Player 1", "Ben", "Player 3"]);
    }

    #[test]
    fn tile_at_wraps_every_forty() {
        let state = game(2);
        for i in 0..BOARD_SIZE {
            for k in 0..4 {
                assert_eq!(state.tile_at(i), state.tile_at(i + BOARD_SIZE * k));
            }
        }
        assert_eq!(state.tile_at(40).kind(), TileKind::Start);
        assert_eq!(state.tile_at(50).kind(), TileKind::Jail);
    }

    #[test]
    fn next_player_rotates_in_seat_order() {
        let mut state = game(3);
        assert_eq!(state.next_player(), PlayerId(1));
        assert_eq!(state.next_player(), PlayerId(2));
        assert_eq!(state.next_player(), PlayerId(0));
    }

    #[test]
    fn next_player_skips_bankrupt() {
        let mut state = game(4);
        state.player_mut(PlayerId(1)).set_bankrupt();
        state.player_mut(PlayerId(2)).set_bankrupt();
        assert_eq!(state.next_player(), PlayerId(3));
        assert_eq!(state.next_player(), PlayerId(0));
        assert_eq!(state.next_player(), PlayerId(3));
    }

    #[test]
    fn next_player_with_single_survivor_returns_to_them() {
        let mut state = game(3);
        state.player_mut(PlayerId(0)).set_bankrupt();
        state.player_mut(PlayerId(2)).set_bankrupt();
        for _ in 0..5 {
            assert_eq!(state.next_player(), PlayerId(1));
        }
        assert!(state.is_game_over());
        assert_eq!(state.winner(), Some(PlayerId(1)));
    }

    #[test]
    fn next_player_with_everyone_bankrupt_stays_put() {
        let mut state = game(2);
        state.player_mut(PlayerId(0)).set_bankrupt();
        state.player_mut(PlayerId(1)).set_bankrupt();
        assert_eq!(state.next_player(), PlayerId(0));
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn active_players_excludes_bankrupt() {
        let mut state = game(4);
        state.player_mut(PlayerId(2)).subtract_money(5000);
        let active: Vec<PlayerId> = state.active_players().iter().map(|p| p.id()).collect();
        assert_eq!(active, vec![PlayerId(0), PlayerId(1), PlayerId(3)]);
        assert!(!state.is_game_over());
        assert_eq!(state.winner(), None);
    }
}
