//! Turn resolution.
//!
//! Plays out a single turn against the game state and settles the
//! purchase/upgrade decisions a turn can leave open.

pub mod turn;

pub use turn::{
    resolve_purchase, resolve_roll, resolve_upgrade, roll_and_resolve, roll_die, ActionError,
    ForfeitReason, LandingEffect, OfferResolution, TurnOutcome, START_BONUS, TAX_AMOUNT,
};
