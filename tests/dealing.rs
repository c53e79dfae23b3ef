use domino_rs::game::{Game, MatchState};
use domino_rs::player::PlayerKind;
use domino_rs::pool::Pool;
use domino_rs::settings::Settings;
use proptest::prelude::*;

fn started(players: usize, humans: usize, min: u8, max: u8, seed: u64) -> Game {
    let settings = Settings::try_new(players, humans, min, max).expect("valid settings");
    let mut g = Game::with_seed(settings, seed);
    g.start_match();
    g
}

#[test]
fn double_six_four_players_deals_everything() {
    let g = started(4, 0, 0, 6, 1);
    assert_eq!(g.state(), MatchState::InProgress);
    assert_eq!(g.total_tiles(), 28);
    for p in g.players() {
        assert_eq!(p.tile_count(), 7);
    }
    assert!(g.is_pool_empty());
    assert!(g.board_tiles().is_empty());
}

#[test]
fn remainder_stays_in_pool() {
    let g = started(3, 0, 0, 6, 2);
    for p in g.players() {
        assert_eq!(p.tile_count(), 9);
    }
    assert_eq!(g.pool_len(), 1);
    assert_eq!(g.pool_tiles().len(), 1);
}

#[test]
fn opener_holds_the_highest_double() {
    for seed in 0..50 {
        let g = started(4, 0, 0, 6, seed);
        let opener = g.current_player_index();
        let best = g.players()[opener].biggest_double().expect("opener holds a double");
        let top = g.players().iter().filter_map(|p| p.biggest_double()).map(|d| d.left()).max();
        assert_eq!(top, Some(best.left()), "seed {seed}");
    }
}

#[test]
fn same_seed_same_deal() {
    let a = started(3, 1, 0, 6, 99);
    let b = started(3, 1, 0, 6, 99);
    assert_eq!(a.players(), b.players());
    assert_eq!(a.pool_tiles(), b.pool_tiles());
    assert_eq!(a.current_player_index(), b.current_player_index());
}

#[test]
fn humans_take_the_first_seats() {
    let g = started(4, 2, 0, 6, 3);
    let kinds: Vec<PlayerKind> = g.players().iter().map(|p| p.kind()).collect();
    assert_eq!(
        kinds,
        vec![PlayerKind::Human, PlayerKind::Human, PlayerKind::Automated, PlayerKind::Automated]
    );
    assert_eq!(g.player(0).map(|p| p.name()), Some("P1".to_string()));
}

#[test]
fn restart_deals_from_a_fresh_set() {
    let mut g = started(2, 0, 0, 6, 4);
    g.play_tile(0).expect("opening move");
    g.start_match();
    let held: usize = g.players().iter().map(|p| p.tile_count()).sum();
    assert_eq!(held + g.pool_len(), 28);
    assert!(g.board_tiles().is_empty());
    assert!(g.deals() >= 1);
}

proptest! {
    #[test]
    fn dealing_is_fair(
        players in 2usize..=4,
        min in 0u8..=3,
        span in 1u8..=8,
        seed in any::<u64>(),
    ) {
        let settings = Settings::try_new(players, 0, min, min + span);
        prop_assume!(settings.is_ok());
        let mut g = Game::with_seed(settings.expect("checked above"), seed);
        g.start_match();

        let total = Pool::set_size(min, min + span);
        let per = total / players;
        for p in g.players() {
            prop_assert_eq!(p.tile_count(), per);
        }
        prop_assert_eq!(g.pool_len(), total - per * players);
        prop_assert!(g.players().iter().any(|p| p.has_any_double()));
        prop_assert!(g.deals() >= 1);
    }
}
