//! Whole-game scenarios driven through the library surface.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use landlord::board::{generate_tiles, GameState, PlayerId, TileKind, BOARD_SIZE, JAIL_INDEX};
use landlord::chance::ChanceCard;
use landlord::resolve::{
    resolve_purchase, resolve_roll, roll_and_resolve, OfferResolution, TurnOutcome,
};

fn game(names: &[&str]) -> GameState {
    GameState::new(names).unwrap()
}

#[test]
fn board_wraps_every_forty() {
    let state = game(&["Ann", "Ben"]);
    for i in 0..BOARD_SIZE {
        for k in 1..4 {
            assert_eq!(state.tile_at(i), state.tile_at(i + BOARD_SIZE * k));
        }
    }
}

#[test]
fn generation_is_deterministic() {
    let a = generate_tiles();
    let b = generate_tiles();
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(
            (x.kind(), x.price(), x.base_rent()),
            (y.kind(), y.price(), y.base_rent())
        );
    }
    assert_eq!(a[0].kind(), TileKind::Start);
    assert_eq!(a[JAIL_INDEX].kind(), TileKind::Jail);
    assert_eq!(a[23].kind(), TileKind::Property);
    assert_eq!(a[23].price(), 160);
    assert_eq!(a[23].rent(), 32);
}

#[test]
fn buying_an_unowned_property() {
    let mut state = game(&["Ann", "Ben"]);
    let mut rng = SmallRng::seed_from_u64(1);
    state.current_player_mut().move_to(26);

    let outcome = resolve_roll(&mut state, 3, &mut rng);
    assert!(matches!(
        outcome,
        TurnOutcome::PurchaseOffer {
            tile: 23,
            price: 160,
            ..
        }
    ));
    assert_eq!(state.current_player_id(), PlayerId(0));

    let resolution = resolve_purchase(&mut state, true);
    assert!(matches!(resolution, OfferResolution::Accepted { amount: 160, .. }));
    assert_eq!(state.player(PlayerId(0)).money(), 1500 - 160);
    assert_eq!(state.tile_at(23).owner(), Some(PlayerId(0)));
    assert_eq!(state.player(PlayerId(0)).owned_properties(), &[23]);
    assert_eq!(state.current_player_id(), PlayerId(1));
    assert!(state.pending_offer().is_none());
}

#[test]
fn collect_from_all_with_a_bankrupt_opponent() {
    let mut state = game(&["Ann", "Ben", "Cid", "Dee"]);
    state.player_mut(PlayerId(3)).subtract_money(1501);
    assert!(state.player(PlayerId(3)).is_bankrupt());
    let before = state.total_money();

    ChanceCard::CollectFromAll.apply(PlayerId(1), &mut state);

    assert_eq!(state.player(PlayerId(1)).money(), 1500 + 600);
    assert_eq!(state.player(PlayerId(0)).money(), 1200);
    assert_eq!(state.player(PlayerId(2)).money(), 1200);
    assert_eq!(state.player(PlayerId(3)).money(), -1);
    assert_eq!(state.total_money(), before);
}

#[test]
fn last_jail_turn_frees_without_moving() {
    let mut state = game(&["Ann", "Ben"]);
    let p = state.player_mut(PlayerId(0));
    p.go_to_jail();
    assert!(p.jail_turn());
    assert!(p.jail_turn());
    assert_eq!(p.jail_turns_remaining(), 1);

    assert!(!p.jail_turn());
    assert!(!p.is_in_jail());
    assert_eq!(p.jail_turns_remaining(), 0);
    assert_eq!(p.position(), JAIL_INDEX);
}

#[test]
fn turn_order_skips_bankrupt_players() {
    let mut state = game(&["Ann", "Ben", "Cid"]);
    state.player_mut(PlayerId(1)).subtract_money(2000);
    for _ in 0..10 {
        let next = state.next_player();
        assert_ne!(next, PlayerId(1));
    }
}

#[test]
fn random_games_keep_invariants() {
    for seed in 0..8 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = game(&["Ann", "Ben", "Cid", "Dee"]);
        for _ in 0..1000 {
            let outcome = roll_and_resolve(&mut state, &mut rng);
            if outcome.is_offer() {
                let accept = rand::Rng::gen_bool(&mut rng, 0.7);
                match outcome {
                    TurnOutcome::PurchaseOffer { .. } => {
                        resolve_purchase(&mut state, accept);
                    }
                    _ => {
                        landlord::resolve::resolve_upgrade(&mut state, accept);
                    }
                }
            }
            for p in state.players() {
                assert!(p.position() < BOARD_SIZE);
                assert_eq!(p.is_bankrupt(), p.money() < 0);
                if p.is_bankrupt() {
                    assert!(p.owned_properties().is_empty());
                }
                for &t in p.owned_properties() {
                    assert_eq!(state.tile_at(t).owner(), Some(p.id()));
                }
            }
            if matches!(outcome, TurnOutcome::GameOver { .. }) {
                assert!(state.active_count() <= 1);
                break;
            }
        }
    }
}
