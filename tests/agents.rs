use domino_rs::agents::{AgentTable, BotProfile, HumanAgent, Intent, PlayerAgent, RandomBot};
use domino_rs::engine::MatchEngine;
use domino_rs::game::Game;
use domino_rs::player::PlayerKind;
use domino_rs::settings::Settings;
use domino_rs::tiles::Side;

fn mk_game(players: usize, humans: usize, seed: u64) -> Game {
    let settings = Settings::try_new(players, humans, 0, 6).expect("valid settings");
    let mut g = Game::with_seed(settings, seed);
    g.start_match();
    g
}

#[test]
fn bots_finish_every_match() {
    for seed in 0..40 {
        let mut g = mk_game(4, 0, seed);
        let mut table =
            AgentTable::from_settings(g.settings(), &BotProfile::default().with_seed(seed));
        assert!(table.play_out(&mut g, 10_000).unwrap(), "seed {seed}");
        assert!(g.winner_index().is_some());
    }
}

#[test]
fn seeded_tables_replay_identically() {
    let run = |seed: u64| {
        let mut g = mk_game(3, 0, seed);
        let mut table =
            AgentTable::from_settings(g.settings(), &BotProfile::default().with_seed(seed));
        table.play_out(&mut g, 10_000).unwrap();
        (g.board_tiles(), g.winner_index(), g.last_action())
    };
    assert_eq!(run(21), run(21));
}

#[test]
fn play_out_waits_for_a_human() {
    for seed in 0..10 {
        let mut g = mk_game(2, 1, seed);
        let mut table =
            AgentTable::from_settings(g.settings(), &BotProfile::default().with_seed(seed));
        if table.play_out(&mut g, 10_000).unwrap() {
            continue;
        }
        assert_eq!(g.current_player_index(), 0, "stops on the human seat");
        assert!(!g.current_player_legal_tiles().is_empty());
        assert_eq!(table.agent_kind(0), Some(PlayerKind::Human));
        assert_eq!(table.agent_kind(1), Some(PlayerKind::Automated));
        return;
    }
    panic!("every match ended without asking the human");
}

#[test]
fn human_intents_drive_the_engine() {
    let mut g = mk_game(2, 2, 7);
    let mut table = AgentTable::from_settings(g.settings(), &BotProfile::default());
    let mut steps = 0;
    while !g.is_over() && steps < 10_000 {
        steps += 1;
        let seat = g.current_player_index();
        if g.pending_side_tile().is_some() {
            assert!(table.receive(seat, Intent::ChooseSide(Side::Left)));
        } else if !g.current_player_legal_tiles().is_empty() {
            assert!(table.receive(seat, Intent::PlayTile(0)));
        }
        // Draws and passes need no intent
        assert!(table.on_turn(&mut g).unwrap(), "human acts once fed");
    }
    assert!(g.is_over());
}

#[test]
fn human_agent_draws_when_blocked() {
    // Drive to a point where the current human holds nothing playable
    for seed in 0..200 {
        let mut g = mk_game(3, 3, seed);
        let mut human = HumanAgent::new();
        let mut found = false;
        for _ in 0..200 {
            if g.is_over() {
                break;
            }
            let seat = g.current_player_index();
            if g.current_player_legal_tiles().is_empty() && g.pending_side_tile().is_none() {
                let pool_before = g.pool_tiles().len();
                assert!(human.on_turn(&mut g, seat).unwrap());
                if g.pending_side_tile().is_some() {
                    // drawn tile fits both ends and waits for a side
                    assert!(pool_before > 0);
                    assert!(g.last_drawn_tile().is_some());
                } else {
                    let action = g.last_action().expect("turn recorded");
                    assert_eq!(action.drew(), pool_before > 0);
                }
                found = true;
                break;
            }
            if g.pending_side_tile().is_some() {
                human.receive(Intent::ChooseSide(Side::Right));
            } else {
                human.receive(Intent::PlayTile(0));
            }
            human.on_turn(&mut g, seat).unwrap();
        }
        if found {
            return;
        }
    }
    panic!("no blocked human turn found");
}

#[test]
fn bot_reports_automated_kind() {
    let bot = RandomBot::new(BotProfile::default());
    assert_eq!(bot.kind(), PlayerKind::Automated);
    assert_eq!(HumanAgent::new().kind(), PlayerKind::Human);
}

#[test]
fn engine_trait_object_reaches_game() {
    let mut g = mk_game(2, 0, 9);
    let engine: &mut dyn MatchEngine = &mut g;
    assert_eq!(engine.num_players(), 2);
    assert!(engine.board_tiles().is_empty());
    let seat = engine.current_player_index();
    let mut bot = RandomBot::new(BotProfile::default().with_seed(3));
    assert!(bot.on_turn(engine, seat).unwrap());
    assert_eq!(engine.board_tiles().len(), 1);
    assert!(engine.player(seat).is_some());
}
