//! Board tiles and the fixed default layout.
//!
//! A tile carries immutable identity (index, kind, name, price, base rent)
//! plus mutable ownership and upgrade level for property tiles.

use serde::Serialize;

use super::player::PlayerId;
use super::topology::BOARD_SIZE;

/// Highest upgrade level a property can reach.
pub const MAX_LEVEL: u8 = 3;

/// Extra cost and rent contributed by each upgrade level.
pub const LEVEL_STEP: i64 = 50;

/// The kind of a board tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Start,
    Property,
    Chance,
    Tax,
    Jail,
    GoToJail,
    FreeParking,
    Strongbox,
}

impl TileKind {
    /// Returns the display label of the tile kind.
    pub const fn label(self) -> &'static str {
        match self {
            TileKind::Start => "Start",
            TileKind::Property => "Property",
            TileKind::Chance => "Chance",
            TileKind::Tax => "Tax",
            TileKind::Jail => "Jail",
            TileKind::GoToJail => "Go To Jail",
            TileKind::FreeParking => "Free Parking",
            TileKind::Strongbox => "Strongbox",
        }
    }

    /// Returns the kind of the tile at `index` in the default layout.
    pub const fn for_index(index: usize) -> TileKind {
        match index {
            0 => TileKind::Start,
            2 | 17 | 38 => TileKind::Chance,
            4 | 33 => TileKind::Tax,
            10 => TileKind::Jail,
            20 => TileKind::FreeParking,
            30 => TileKind::GoToJail,
            7 | 22 | 36 => TileKind::Strongbox,
            _ => TileKind::Property,
        }
    }
}

/// A single board square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    index: usize,
    kind: TileKind,
    name: String,
    price: i64,
    base_rent: i64,
    owner: Option<PlayerId>,
    level: u8,
}

impl Tile {
    /// Creates an unowned tile at level 0.
    pub fn new(index: usize, kind: TileKind, name: impl Into<String>, price: i64, base_rent: i64) -> Self {
        Tile {
            index,
            kind,
            name: name.into(),
            price,
            base_rent,
            owner: None,
            level: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn base_rent(&self) -> i64 {
        self.base_rent
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_property(&self) -> bool {
        self.kind == TileKind::Property
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// Returns true if `player` holds the deed to this tile.
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Assigns the deed to `player`. Returns false if the tile is already owned.
    ///
    /// The buyer's debit and owned-set update are the caller's job and must be
    /// done in the same step.
    pub fn buy(&mut self, player: PlayerId) -> bool {
        if self.is_owned() {
            return false;
        }
        self.owner = Some(player);
        true
    }

    /// Returns true if the tile is owned and below the maximum level.
    pub fn can_upgrade(&self) -> bool {
        self.is_owned() && self.level < MAX_LEVEL
    }

    /// Cost of raising the tile one level, evaluated at the current level.
    pub fn upgrade_cost(&self) -> i64 {
        self.price / 2 + self.level as i64 * LEVEL_STEP
    }

    /// Raises the level by one. Returns false (and does nothing) if not upgradeable.
    pub fn upgrade(&mut self) -> bool {
        if !self.can_upgrade() {
            return false;
        }
        self.level += 1;
        true
    }

    /// Rent at the current level. Computed for display only; never charged.
    pub fn rent(&self) -> i64 {
        self.base_rent + self.level as i64 * LEVEL_STEP
    }
}

/// Price of the property at `index` in the default layout.
pub const fn property_price(index: usize) -> i64 {
    100 + (index % 5) as i64 * 20
}

/// Builds the 40 tiles of the fixed default layout.
pub fn generate_tiles() -> Vec<Tile> {
    (0..BOARD_SIZE)
        .map(|i| match TileKind::for_index(i) {
            TileKind::Property => {
                let price = property_price(i);
                Tile::new(i, TileKind::Property, format!("Lot {}", i), price, price / 5)
            }
            kind => Tile::new(i, kind, kind.label(), 0, 0),
        })
        .collect()
}
