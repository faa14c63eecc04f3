//! Chance and strongbox cards.
//!
//! Both tile kinds share one fixed catalog of eight effects. Each draw picks
//! uniformly from the whole catalog (with replacement) and applies the
//! effect immediately; no card can be declined.

use rand::Rng;
use tracing::debug;

use crate::board::{GameState, PlayerId, START_INDEX};

/// Amount each solvent opponent pays the drawer of [`ChanceCard::CollectFromAll`].
pub const COLLECT_FROM_EACH: i64 = 300;

/// One effect in the card catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanceCard {
    /// Pay 100 for house repairs.
    PayRepairs,
    /// Receive 200 as a gift.
    Gift,
    /// Go straight to jail.
    GoToJail,
    /// Teleport to START. Does not pay the START bonus.
    AdvanceToStart,
    /// Receive 50 for a lucky find.
    FindersFee,
    /// Pay a 150 fine.
    Fine,
    /// Teleport to tile 5. The tile is not resolved.
    AdvanceToTileFive,
    /// Every solvent opponent pays you 300.
    CollectFromAll,
}

/// The full catalog, in draw order.
pub const ALL_CARDS: [ChanceCard; 8] = [
    ChanceCard::PayRepairs,
    ChanceCard::Gift,
    ChanceCard::GoToJail,
    ChanceCard::AdvanceToStart,
    ChanceCard::FindersFee,
    ChanceCard::Fine,
    ChanceCard::AdvanceToTileFive,
    ChanceCard::CollectFromAll,
];

impl ChanceCard {
    /// Draws one card uniformly at random.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> ChanceCard {
        ALL_CARDS[rng.gen_range(0..ALL_CARDS.len())]
    }

    /// Player-facing card text.
    pub const fn description(self) -> &'static str {
        match self {
            ChanceCard::PayRepairs => "Pay 100 for house repairs",
            ChanceCard::Gift => "Receive a gift of 200",
            ChanceCard::GoToJail => "Go to jail!",
            ChanceCard::AdvanceToStart => "Advance to START",
            ChanceCard::FindersFee => "Receive 50 for a lucky find",
            ChanceCard::Fine => "Pay a fine of 150",
            ChanceCard::AdvanceToTileFive => "Go to tile 5",
            ChanceCard::CollectFromAll => "Collect 300 from every player",
        }
    }

    /// Applies the card's effect to `player`.
    pub fn apply(self, player: PlayerId, state: &mut GameState) {
        match self {
            ChanceCard::PayRepairs => state.player_mut(player).subtract_money(100),
            ChanceCard::Gift => state.player_mut(player).add_money(200),
            ChanceCard::GoToJail => state.player_mut(player).go_to_jail(),
            ChanceCard::AdvanceToStart => state.player_mut(player).move_to(START_INDEX),
            ChanceCard::FindersFee => state.player_mut(player).add_money(50),
            ChanceCard::Fine => state.player_mut(player).subtract_money(150),
            ChanceCard::AdvanceToTileFive => state.player_mut(player).move_to(5),
            ChanceCard::CollectFromAll => {
                let payers: Vec<PlayerId> = state
                    .players()
                    .iter()
                    .filter(|p| p.id() != player && !p.is_bankrupt())
                    .map(|p| p.id())
                    .collect();
                for payer in payers {
                    state.player_mut(payer).subtract_money(COLLECT_FROM_EACH);
                    state.player_mut(player).add_money(COLLECT_FROM_EACH);
                }
            }
        }
    }
}

/// Draws a card for `player`, applies it, and returns it.
pub fn apply_random_effect<R: Rng + ?Sized>(
    player: PlayerId,
    state: &mut GameState,
    rng: &mut R,
) -> ChanceCard {
    let card = ChanceCard::draw(rng);
    card.apply(player, state);
    debug!(player = player.index(), card = ?card, "card drawn");
    card
}
