//! Outcome notation.
//!
//! Compact single-line text encoding of turn outcomes and offer
//! resolutions, written by the engine in reply to `roll`, `buy`, and
//! `upgrade`. Player and tile fields are numeric indices so a presentation
//! layer can split on whitespace.

use crate::board::OfferKind;
use crate::resolve::{ForfeitReason, OfferResolution, TurnOutcome};

/// Formats a turn outcome as a single protocol line.
///
/// ```text
/// gameover 1
/// forfeit 0 jailed 2
/// moved 0 roll 3 from 26 to 23
/// offer buy 0 roll 3 tile 23 price 160
/// resolved 0 roll 2 tile 4 Ann -> Tax: paid 200 in tax.
/// rejected die value 9 is not between 1 and 6
/// ```
pub fn format_outcome(outcome: &TurnOutcome) -> String {
    match outcome {
        TurnOutcome::GameOver { winner } => match winner {
            Some(w) => format!("gameover {}", w),
            None => "gameover none".to_string(),
        },
        TurnOutcome::Forfeited { player, reason } => match reason {
            ForfeitReason::Bankrupt => format!("forfeit {} bankrupt", player),
            ForfeitReason::Jailed { turns_remaining } => {
                format!("forfeit {} jailed {}", player, turns_remaining)
            }
        },
        TurnOutcome::Moved(m) => {
            format!("moved {} roll {} from {} to {}", m.player, m.roll, m.from, m.to)
        }
        TurnOutcome::PurchaseOffer { movement, tile, price } => format!(
            "offer buy {} roll {} tile {} price {}",
            movement.player, movement.roll, tile, price
        ),
        TurnOutcome::UpgradeOffer { movement, tile, cost } => format!(
            "offer upgrade {} roll {} tile {} cost {}",
            movement.player, movement.roll, tile, cost
        ),
        TurnOutcome::Resolved {
            movement,
            tile,
            message,
            ..
        } => format!(
            "resolved {} roll {} tile {} {}",
            movement.player, movement.roll, tile, message
        ),
        TurnOutcome::Rejected(e) => format!("rejected {}", e),
    }
}

/// Formats the settlement of an offer as a single protocol line.
///
/// ```text
/// accepted 0 buy tile 23 amount 160 level 0
/// declined 1 upgrade tile 8
/// rejected insufficient funds: need 160, have 100
/// ```
pub fn format_resolution(resolution: &OfferResolution) -> String {
    match resolution {
        OfferResolution::Accepted {
            player,
            kind,
            tile,
            amount,
            level,
        } => format!(
            "accepted {} {} tile {} amount {} level {}",
            player,
            verb(*kind),
            tile,
            amount,
            level
        ),
        OfferResolution::Declined { player, kind, tile } => {
            format!("declined {} {} tile {}", player, verb(*kind), tile)
        }
        OfferResolution::Rejected(e) => format!("rejected {}", e),
    }
}

/// Protocol verb used to settle an offer kind.
const fn verb(kind: OfferKind) -> &'static str {
    match kind {
        OfferKind::Purchase => "buy",
        OfferKind::Upgrade => "upgrade",
    }
}
