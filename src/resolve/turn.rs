//! Turn resolution.
//!
//! Drives one player's turn: win check, forfeits for bankrupt and jailed
//! players, the die roll, movement, and the effect of the landed tile.
//! Property landings suspend the turn behind a [`PendingOffer`] that the
//! caller settles with [`resolve_purchase`] or [`resolve_upgrade`]; every
//! other path ends by passing the turn to the next solvent player.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::board::{GameState, Movement, OfferKind, PendingOffer, PlayerId, TileKind};
use crate::chance::{apply_random_effect, ChanceCard};

/// Amount charged when landing on a tax tile.
pub const TAX_AMOUNT: i64 = 200;

/// Bonus paid for landing exactly on START. Passing START pays nothing.
pub const START_BONUS: i64 = 500;

/// Why a player's turn was skipped without a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForfeitReason {
    Bankrupt,
    /// The player served a jailed turn and has `turns_remaining` left.
    Jailed { turns_remaining: u8 },
}

/// The automatic effect of a non-property tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingEffect {
    Tax { amount: i64 },
    StartBonus { amount: i64 },
    SentToJail,
    Card(ChanceCard),
    /// Jail (just visiting) and free parking.
    Rest,
}

/// Result of asking the engine to play the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// At most one solvent player remains. Nothing was changed.
    GameOver { winner: Option<PlayerId> },
    /// The turn was skipped and passed on.
    Forfeited { player: PlayerId, reason: ForfeitReason },
    /// The player landed on a property with nothing to decide. Turn passed on.
    Moved(Movement),
    /// The player may buy the unowned property they landed on. Turn suspended.
    PurchaseOffer { movement: Movement, tile: usize, price: i64 },
    /// The player may upgrade their own property. Turn suspended.
    UpgradeOffer { movement: Movement, tile: usize, cost: i64 },
    /// A tile effect was applied automatically. Turn passed on.
    Resolved {
        movement: Movement,
        tile: usize,
        effect: LandingEffect,
        message: String,
    },
    /// The request was refused. Nothing was changed.
    Rejected(ActionError),
}

impl TurnOutcome {
    /// Returns true if the turn is waiting on a purchase or upgrade decision.
    pub fn is_offer(&self) -> bool {
        matches!(self, TurnOutcome::PurchaseOffer { .. } | TurnOutcome::UpgradeOffer { .. })
    }
}

/// A roll, purchase, or upgrade the engine refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("tile {0} is already owned")]
    AlreadyOwned(usize),

    #[error("tile {0} cannot be upgraded")]
    NotUpgradeable(usize),

    #[error("no {} offer is open", .0.name())]
    NoPendingOffer(OfferKind),

    #[error("die value {0} is not between 1 and 6")]
    InvalidRoll(u8),
}

/// How the caller's decision on an open offer was settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferResolution {
    Accepted {
        player: PlayerId,
        kind: OfferKind,
        tile: usize,
        amount: i64,
        /// Tile level after the action.
        level: u8,
    },
    Declined {
        player: PlayerId,
        kind: OfferKind,
        tile: usize,
    },
    Rejected(ActionError),
}

/// Rolls a six-sided die.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=6)
}

/// Plays the current turn with a fresh die roll.
pub fn roll_and_resolve<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> TurnOutcome {
    if let Some(outcome) = before_roll(state) {
        return outcome;
    }
    let roll = roll_die(rng);
    move_and_land(state, roll, rng)
}

/// Plays the current turn with a given die value.
///
/// Runs the same checks as [`roll_and_resolve`]; `rng` is only used for
/// card draws. A value outside 1-6 is rejected before anything else.
pub fn resolve_roll<R: Rng + ?Sized>(state: &mut GameState, roll: u8, rng: &mut R) -> TurnOutcome {
    if !(1..=6).contains(&roll) {
        warn!(roll, "die value out of range");
        return TurnOutcome::Rejected(ActionError::InvalidRoll(roll));
    }
    if let Some(outcome) = before_roll(state) {
        return outcome;
    }
    move_and_land(state, roll, rng)
}

/// Settles an open purchase offer and passes the turn on.
pub fn resolve_purchase(state: &mut GameState, accept: bool) -> OfferResolution {
    settle_offer(state, OfferKind::Purchase, accept)
}

/// Settles an open upgrade offer and passes the turn on.
pub fn resolve_upgrade(state: &mut GameState, accept: bool) -> OfferResolution {
    settle_offer(state, OfferKind::Upgrade, accept)
}

/// Handles everything that happens before a die is rolled.
///
/// Returns `None` (without touching the state) when the current player may roll.
fn before_roll(state: &mut GameState) -> Option<TurnOutcome> {
    if state.is_game_over() {
        return Some(TurnOutcome::GameOver {
            winner: state.winner(),
        });
    }

    if let Some(offer) = state.pending_offer() {
        return Some(offer_outcome(offer));
    }

    let player = state.current_player_id();
    if state.player(player).is_bankrupt() {
        state.next_player();
        return Some(TurnOutcome::Forfeited {
            player,
            reason: ForfeitReason::Bankrupt,
        });
    }

    if state.player(player).is_in_jail() {
        state.player_mut(player).jail_turn();
        let turns_remaining = state.player(player).jail_turns_remaining();
        debug!(player = player.index(), turns_remaining, "jailed turn served");
        state.next_player();
        return Some(TurnOutcome::Forfeited {
            player,
            reason: ForfeitReason::Jailed { turns_remaining },
        });
    }

    None
}

fn offer_outcome(offer: &PendingOffer) -> TurnOutcome {
    match offer.kind {
        OfferKind::Purchase => TurnOutcome::PurchaseOffer {
            movement: offer.movement,
            tile: offer.tile,
            price: offer.amount,
        },
        OfferKind::Upgrade => TurnOutcome::UpgradeOffer {
            movement: offer.movement,
            tile: offer.tile,
            cost: offer.amount,
        },
    }
}

fn move_and_land<R: Rng + ?Sized>(state: &mut GameState, roll: u8, rng: &mut R) -> TurnOutcome {
    let player = state.current_player_id();
    let from = state.player(player).position();
    state.player_mut(player).advance(roll as u32);
    let to = state.player(player).position();
    let movement = Movement {
        player,
        roll,
        from,
        to,
    };
    debug!(player = player.index(), roll, from, to, "moved");

    let kind = state.tile_at(to).kind();
    if kind == TileKind::Property {
        return land_on_property(state, movement);
    }

    let effect = match kind {
        TileKind::Tax => {
            state.player_mut(player).subtract_money(TAX_AMOUNT);
            LandingEffect::Tax { amount: TAX_AMOUNT }
        }
        TileKind::Start => {
            state.player_mut(player).add_money(START_BONUS);
            LandingEffect::StartBonus {
                amount: START_BONUS,
            }
        }
        TileKind::GoToJail => {
            state.player_mut(player).go_to_jail();
            LandingEffect::SentToJail
        }
        TileKind::Chance | TileKind::Strongbox => {
            LandingEffect::Card(apply_random_effect(player, state, rng))
        }
        TileKind::Jail | TileKind::FreeParking | TileKind::Property => LandingEffect::Rest,
    };

    let message = describe_landing(state, player, to, effect);
    if state.player(player).is_bankrupt() {
        info!(player = player.index(), money = state.player(player).money(), "player went bankrupt");
    }
    state.next_player();

    TurnOutcome::Resolved {
        movement,
        tile: to,
        effect,
        message,
    }
}

fn land_on_property(state: &mut GameState, movement: Movement) -> TurnOutcome {
    let tile = state.tile_at(movement.to);
    let offer = if !tile.is_owned() {
        Some((OfferKind::Purchase, tile.price()))
    } else if tile.is_owned_by(movement.player) && tile.can_upgrade() {
        Some((OfferKind::Upgrade, tile.upgrade_cost()))
    } else {
        // Rent is never charged to a visitor.
        None
    };

    match offer {
        Some((kind, amount)) => {
            let offer = PendingOffer {
                kind,
                tile: movement.to,
                amount,
                movement,
            };
            state.set_pending_offer(offer);
            offer_outcome(&offer)
        }
        None => {
            state.next_player();
            TurnOutcome::Moved(movement)
        }
    }
}

fn describe_landing(state: &GameState, player: PlayerId, tile: usize, effect: LandingEffect) -> String {
    let p = state.player(player);
    let mut message = format!("{} -> {}:", p.name(), state.tile_at(tile).name());
    match effect {
        LandingEffect::Tax { amount } => message.push_str(&format!(" paid {} in tax.", amount)),
        LandingEffect::StartBonus { amount } => {
            message.push_str(&format!(" collected {} for landing on START.", amount))
        }
        LandingEffect::SentToJail => message.push_str(" goes to jail."),
        LandingEffect::Card(card) => message.push_str(&format!(" drew \"{}\".", card.description())),
        LandingEffect::Rest => message.push_str(" rests."),
    }
    if p.is_bankrupt() {
        message.push_str(&format!(" {} went bankrupt!", p.name()));
    }
    message
}

fn settle_offer(state: &mut GameState, kind: OfferKind, accept: bool) -> OfferResolution {
    let offer = match state.pending_offer() {
        Some(offer) if offer.kind == kind => *offer,
        _ => return OfferResolution::Rejected(ActionError::NoPendingOffer(kind)),
    };
    state.take_pending_offer();

    let player = offer.movement.player;
    let resolution = if !accept {
        OfferResolution::Declined {
            player,
            kind,
            tile: offer.tile,
        }
    } else {
        let result = match kind {
            OfferKind::Purchase => buy(state, player, offer.tile),
            OfferKind::Upgrade => upgrade(state, player, offer.tile),
        };
        match result {
            Ok((amount, level)) => OfferResolution::Accepted {
                player,
                kind,
                tile: offer.tile,
                amount,
                level,
            },
            Err(e) => OfferResolution::Rejected(e),
        }
    };
    debug!(player = player.index(), tile = offer.tile, ?resolution, "offer settled");

    state.next_player();
    resolution
}

fn check_funds(state: &GameState, player: PlayerId, needed: i64) -> Result<(), ActionError> {
    let available = state.player(player).money();
    if available < needed {
        return Err(ActionError::InsufficientFunds { needed, available });
    }
    Ok(())
}

fn buy(state: &mut GameState, player: PlayerId, tile: usize) -> Result<(i64, u8), ActionError> {
    if state.tile_at(tile).is_owned() {
        return Err(ActionError::AlreadyOwned(tile));
    }
    let price = state.tile_at(tile).price();
    check_funds(state, player, price)?;

    state.player_mut(player).subtract_money(price);
    state.tile_at_mut(tile).buy(player);
    state.player_mut(player).buy_property(tile);
    Ok((price, state.tile_at(tile).level()))
}

fn upgrade(state: &mut GameState, player: PlayerId, tile: usize) -> Result<(i64, u8), ActionError> {
    let t = state.tile_at(tile);
    if !t.is_owned_by(player) || !t.can_upgrade() {
        return Err(ActionError::NotUpgradeable(tile));
    }
    let cost = t.upgrade_cost();
    check_funds(state, player, cost)?;

    state.player_mut(player).subtract_money(cost);
    state.tile_at_mut(tile).upgrade();
    Ok((cost, state.tile_at(tile).level()))
}
