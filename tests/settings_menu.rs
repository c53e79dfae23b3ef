use crossterm::event::KeyCode;
use domino_rs::game::Game;
use domino_rs::settings::{Settings, SettingsError};
use domino_rs::tiles::{AttachSide, Side};
use domino_rs::tui::app::{AppState, InputAction, Scene};
use domino_rs::tui::controller::handle_key;

fn table_app() -> AppState {
    let mut app = AppState::default();
    app.cfg_bot_delay_ms = 0;
    app.apply_menu();
    app
}

#[test]
fn settings_reject_bad_values() {
    assert_eq!(Settings::try_new(1, 0, 0, 6), Err(SettingsError::PlayersOutOfRange(1)));
    assert_eq!(Settings::try_new(5, 0, 0, 6), Err(SettingsError::PlayersOutOfRange(5)));
    assert_eq!(
        Settings::try_new(2, 3, 0, 6),
        Err(SettingsError::HumansExceedPlayers { humans: 3, players: 2 })
    );
    assert_eq!(Settings::try_new(2, 0, 4, 4), Err(SettingsError::DotsRange { min: 4, max: 4 }));
    assert_eq!(Settings::try_new(2, 0, 5, 3), Err(SettingsError::DotsRange { min: 5, max: 3 }));
    assert!(Settings::try_new(4, 4, 0, 6).is_ok(), "all seats may be human");
    assert!(Settings::try_new(2, 0, 0, 1).is_ok());
}

#[test]
fn failed_setter_leaves_settings_unchanged() {
    let mut s = Settings::default();
    let before = s.clone();
    assert!(s.set_max_dots(0).is_err());
    assert!(s.set_num_human_players(9).is_err());
    assert_eq!(s, before);
    s.set_players(2, 2).unwrap();
    assert_eq!(s.player_kinds().len(), 2);
}

#[test]
fn snapshot_restores_verbatim() {
    let mut s = Settings::default();
    let snap = s.snapshot();
    s.set_num_players(2).unwrap();
    s.set_hide_pool_tiles(false);
    assert_ne!(&s, snap.settings());
    assert_eq!(snap.restore(), Settings::default());
}

#[test]
fn menu_navigation_and_save() {
    let mut app = AppState::default();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);

    // Players is the first entry: 4 -> 3
    let _ = app.handle_input(InputAction::MenuDec);
    assert_eq!(app.game.settings().num_players(), 3);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
    assert_eq!(app.game.settings().num_players(), 3);
    assert_eq!(app.agents.len(), 3);
    assert!(!app.match_started);
}

#[test]
fn escape_discards_edits() {
    let mut app = table_app();
    let before = app.game.settings().clone();
    let _ = app.handle_input(InputAction::ToggleMenu);
    assert!(matches!(app.scene, Scene::Menu));
    let _ = app.handle_input(InputAction::MenuDec);
    let _ = app.handle_input(InputAction::MenuNext);
    let _ = app.handle_input(InputAction::MenuInc);
    assert_ne!(app.game.settings(), &before);
    let _ = app.handle_input(InputAction::MenuCancel);
    assert!(matches!(app.scene, Scene::Table));
    assert_eq!(app.game.settings(), &before);
}

#[test]
fn discard_keeps_a_running_match() {
    let mut app = table_app();
    let _ = app.handle_input(InputAction::StartMatch);
    let board = app.game.board_tiles();
    let dealt = app.game.players().to_vec();
    let _ = app.handle_input(InputAction::ToggleMenu);
    let _ = app.handle_input(InputAction::MenuDec);
    let _ = app.handle_input(InputAction::MenuCancel);
    assert!(app.match_started);
    assert_eq!(app.game.board_tiles(), board);
    assert_eq!(app.game.players(), dealt.as_slice());
}

#[test]
fn invalid_edit_is_reported_and_ignored() {
    let mut app = AppState::default();
    // Min pips is the third entry. At 5..=6 the set has 3 tiles, too few
    // for the default 4 players.
    let _ = app.handle_input(InputAction::MenuNext);
    let _ = app.handle_input(InputAction::MenuNext);
    for _ in 0..6 {
        let _ = app.handle_input(InputAction::MenuInc);
    }
    assert_eq!(app.game.settings().min_dots(), 4);
    assert!(app.menu_error().is_some());
    let _ = app.handle_input(InputAction::MenuDec);
    assert!(app.menu_error().is_none());
    assert_eq!(app.game.settings().min_dots(), 3);
}

#[test]
fn dropping_players_caps_humans() {
    let mut app = AppState::default();
    let mut s = app.game.settings().clone();
    s.set_players(4, 4).unwrap();
    app.game.set_settings(s).unwrap();
    let _ = app.handle_input(InputAction::MenuDec);
    let _ = app.handle_input(InputAction::MenuDec);
    assert_eq!(app.game.settings().num_players(), 2);
    assert_eq!(app.game.settings().num_human_players(), 2);
}

#[test]
fn keys_map_to_table_actions() {
    let mut app = table_app();
    assert!(!handle_key(&mut app, KeyCode::Char(' ')));
    assert!(app.match_started);
    assert!(app.moves().first().is_some_and(|m| m.starts_with("New match")));

    assert!(!handle_key(&mut app, KeyCode::Char('?')));
    assert!(app.help_open());
    assert!(!handle_key(&mut app, KeyCode::Esc));
    assert!(!app.help_open());

    assert!(!handle_key(&mut app, KeyCode::Char('h')));
    assert!(app.history_open());
    assert!(!handle_key(&mut app, KeyCode::Char('h')));

    assert!(!handle_key(&mut app, KeyCode::Char('m')));
    assert!(matches!(app.scene, Scene::Menu));
    assert!(handle_key(&mut app, KeyCode::Char('q')));
}

#[test]
fn digit_key_plays_for_the_human() {
    let mut app = AppState::default();
    let mut s = app.game.settings().clone();
    s.set_players(2, 2).unwrap();
    app.game.set_settings(s).unwrap();
    app.apply_menu();
    let _ = handle_key(&mut app, KeyCode::Char(' '));
    let seat = app.game.current_player_index();
    assert!(app.human_to_act());
    let _ = handle_key(&mut app, KeyCode::Char('1'));
    assert_eq!(app.game.board_tiles().len(), 1);
    assert_ne!(app.game.current_player_index(), seat);
    assert!(app.moves().last().is_some_and(|m| m.starts_with(&format!("P{}: Play", seat + 1))));
}

/// Two humans; the opener leads their highest double and the next player
/// holds a tile that fits both ends.
fn app_awaiting_side() -> AppState {
    for seed in 0..200 {
        let mut app = AppState::default();
        let mut s = app.game.settings().clone();
        s.set_players(2, 2).unwrap();
        app.game.set_settings(s.clone()).unwrap();
        app.apply_menu();
        app.game = Game::with_seed(s, seed);
        app.game.start_match();
        app.match_started = true;

        let opener = app.game.current_player_index();
        let hand = app.game.players()[opener].tiles().to_vec();
        let double = app.game.players()[opener].biggest_double().unwrap();
        let idx = hand.iter().position(|t| *t == double).unwrap();
        app.game.play_tile(idx).unwrap();
        app.game.advance_turn().unwrap();
        if app.game.current_player_legal_tiles().is_empty() {
            continue;
        }
        assert_eq!(app.game.play_tile(0), Ok(AttachSide::Both));
        return app;
    }
    panic!("no seed left a side choice pending");
}

#[test]
fn menu_stays_shut_while_a_side_is_pending() {
    let mut app = app_awaiting_side();
    let players = app.game.settings().num_players();
    assert!(!handle_key(&mut app, KeyCode::Char('m')));
    assert!(matches!(app.scene, Scene::Table));
    assert!(app.action_error().is_some());
    assert!(app.game.set_num_players(3).is_err());
    assert_eq!(app.game.settings().num_players(), players);

    app.game.choose_side(Side::Left).unwrap();
    assert!(!handle_key(&mut app, KeyCode::Char('m')));
    assert!(matches!(app.scene, Scene::Menu));
}
