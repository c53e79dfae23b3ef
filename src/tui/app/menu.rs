use crate::game::{ActionError, Game};
use crate::settings::{MAX_PLAYERS, MIN_PLAYERS};
use crate::tiles::Pips;

use super::{AppState, Scene};

/// Highest pip value offered by the menu.
const MENU_MAX_PIPS: Pips = 18;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    Humans,
    MinPips,
    MaxPips,
    OpponentTiles,
    PoolTiles,
    BotDelayMs,
}

const MENU_ITEMS: [MenuItem; 7] = [
    MenuItem::Players,
    MenuItem::Humans,
    MenuItem::MinPips,
    MenuItem::MaxPips,
    MenuItem::OpponentTiles,
    MenuItem::PoolTiles,
    MenuItem::BotDelayMs,
];

fn visibility(hidden: bool) -> &'static str {
    if hidden {
        "Hidden"
    } else {
        "Shown"
    }
}

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        let s = app.game.settings();
        match self {
            MenuItem::Players => format!("Players: {}", s.num_players()),
            MenuItem::Humans => format!("Human players: {}", s.num_human_players()),
            MenuItem::MinPips => format!("Min pips: {}", s.min_dots()),
            MenuItem::MaxPips => format!("Max pips: {} ({} tiles)", s.max_dots(), s.tile_count()),
            MenuItem::OpponentTiles => {
                format!("Opponent tiles: {}", visibility(s.hide_opponent_tiles()))
            }
            MenuItem::PoolTiles => format!("Pool tiles: {}", visibility(s.hide_pool_tiles())),
            MenuItem::BotDelayMs => format!("Bot Delay (ms): {}", app.cfg_bot_delay_ms),
        }
    }

    fn inc(self, app: &mut AppState) -> Result<(), ActionError> {
        let s = app.game.settings().clone();
        match self {
            MenuItem::Players => {
                if s.num_players() < MAX_PLAYERS {
                    app.game.set_num_players(s.num_players() + 1)?;
                }
            }
            MenuItem::Humans => {
                if s.num_human_players() < s.num_players() {
                    app.game.set_num_human_players(s.num_human_players() + 1)?;
                }
            }
            MenuItem::MinPips => app.game.set_min_dots(s.min_dots().saturating_add(1))?,
            MenuItem::MaxPips => {
                if s.max_dots() < MENU_MAX_PIPS {
                    app.game.set_max_dots(s.max_dots() + 1)?;
                }
            }
            MenuItem::OpponentTiles => app.game.set_hide_opponent_tiles(!s.hide_opponent_tiles())?,
            MenuItem::PoolTiles => app.game.set_hide_pool_tiles(!s.hide_pool_tiles())?,
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_add(100);
            }
        }
        Ok(())
    }

    fn dec(self, app: &mut AppState) -> Result<(), ActionError> {
        let mut s = app.game.settings().clone();
        match self {
            MenuItem::Players => {
                if s.num_players() > MIN_PLAYERS {
                    let players = s.num_players() - 1;
                    s.set_players(players, s.num_human_players().min(players))?;
                    app.game.set_settings(s)?;
                }
            }
            MenuItem::Humans => {
                if s.num_human_players() > 0 {
                    app.game.set_num_human_players(s.num_human_players() - 1)?;
                }
            }
            MenuItem::MinPips => {
                if s.min_dots() > 0 {
                    app.game.set_min_dots(s.min_dots() - 1)?;
                }
            }
            MenuItem::MaxPips => {
                if s.max_dots() > 0 {
                    app.game.set_max_dots(s.max_dots() - 1)?;
                }
            }
            MenuItem::OpponentTiles => app.game.set_hide_opponent_tiles(!s.hide_opponent_tiles())?,
            MenuItem::PoolTiles => app.game.set_hide_pool_tiles(!s.hide_pool_tiles())?,
            MenuItem::BotDelayMs => {
                app.cfg_bot_delay_ms = app.cfg_bot_delay_ms.saturating_sub(100);
            }
        }
        Ok(())
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        match self.scene {
            Scene::Menu => self.cancel_menu(),
            _ => self.open_menu(),
        }
    }

    /// The menu stays shut while a played tile waits for its side.
    fn menu_blocked(&mut self) -> bool {
        if self.game.pending_side_tile().is_some() {
            self.set_action_error("choose a side first (L/R)".to_string());
            return true;
        }
        false
    }

    // --- Menu operations ---

    /// Start an edit session: freeze the current settings so they can be
    /// restored on discard.
    pub fn open_menu(&mut self) {
        if self.menu_blocked() {
            return;
        }
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        self.menu_error = None;
        self.snapshot = Some(self.game.settings().snapshot());
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.scene = Scene::Menu;
    }

    /// Keep the edited settings and set up a fresh table for them.
    pub fn apply_menu(&mut self) {
        self.snapshot = None;
        self.menu_error = None;
        self.bot_delay_ms = self.cfg_bot_delay_ms;
        let settings = self.game.settings().clone();
        self.agents = Self::build_agents(&settings, self.bot_delay_ms);
        self.game = Game::new(settings);
        self.match_started = false;
        self.clear_moves();
        self.scene = Scene::Table;
    }

    /// Throw the edits away and put the frozen settings back.
    pub fn cancel_menu(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            if let Err(err) = self.game.set_settings(snapshot.restore()) {
                self.set_action_error(err.to_string());
            }
        }
        self.menu_error = None;
        self.cfg_bot_delay_ms = self.bot_delay_ms;
        self.scene = Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        self.menu_error = item.inc(self).err().map(|e| e.to_string());
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        self.menu_error = item.dec(self).err().map(|e| e.to_string());
    }
}
