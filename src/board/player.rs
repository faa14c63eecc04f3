//! Player economy, position, and jail state.

use std::fmt;

use serde::Serialize;

use super::topology::{step_back, wrap_index, JAIL_INDEX};

/// Money every player starts the game with.
pub const STARTING_MONEY: i64 = 1500;

/// Number of turns a player sits out after being sent to jail.
pub const JAIL_TURNS: u8 = 3;

/// Seat index of a player, assigned at game start. Determines turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(pub usize);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token color, fixed by seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl TokenColor {
    /// Returns the token color for a seat.
    pub const fn for_seat(seat: usize) -> TokenColor {
        match seat % 4 {
            0 => TokenColor::Red,
            1 => TokenColor::Blue,
            2 => TokenColor::Green,
            _ => TokenColor::Yellow,
        }
    }
}

/// A player seated at the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    position: usize,
    money: i64,
    bankrupt: bool,
    in_jail: bool,
    jail_turns_remaining: u8,
    owned: Vec<usize>,
}

impl Player {
    /// Creates a player on START with the starting money.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Player {
            id,
            name: name.into(),
            position: 0,
            money: STARTING_MONEY,
            bankrupt: false,
            in_jail: false,
            jail_turns_remaining: 0,
            owned: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> TokenColor {
        TokenColor::for_seat(self.id.index())
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn is_bankrupt(&self) -> bool {
        self.bankrupt
    }

    pub fn is_in_jail(&self) -> bool {
        self.in_jail
    }

    pub fn jail_turns_remaining(&self) -> u8 {
        self.jail_turns_remaining
    }

    /// Indices of the tiles this player owns, in purchase order.
    pub fn owned_properties(&self) -> &[usize] {
        &self.owned
    }

    /// Walks the token `steps` tiles. Does nothing while the player is jailed.
    pub fn advance(&mut self, steps: u32) {
        if self.in_jail {
            return;
        }
        self.position = step_back(self.position, steps);
    }

    /// Teleports the token to `index` (wrapped onto the board).
    pub fn move_to(&mut self, index: usize) {
        self.position = wrap_index(index);
    }

    /// Sends the player to jail for [`JAIL_TURNS`] turns.
    pub fn go_to_jail(&mut self) {
        self.in_jail = true;
        self.jail_turns_remaining = JAIL_TURNS;
        self.move_to(JAIL_INDEX);
    }

    /// Serves one jailed turn. Returns true if the player is still jailed afterwards.
    pub fn jail_turn(&mut self) -> bool {
        if self.jail_turns_remaining > 0 {
            self.jail_turns_remaining -= 1;
            if self.jail_turns_remaining == 0 {
                self.in_jail = false;
            }
        }
        self.in_jail
    }

    pub fn add_money(&mut self, amount: i64) {
        self.money += amount;
    }

    /// Debits `amount`. Going below zero bankrupts the player.
    pub fn subtract_money(&mut self, amount: i64) {
        self.money -= amount;
        if self.money < 0 {
            self.set_bankrupt();
        }
    }

    /// Marks the player bankrupt and drops every owned tile. Never undone.
    pub fn set_bankrupt(&mut self) {
        self.bankrupt = true;
        self.owned.clear();
    }

    /// Records ownership of the tile at `index`.
    pub fn buy_property(&mut self, index: usize) {
        self.owned.push(index);
    }
}
