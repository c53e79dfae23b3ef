use crate::agents::{AgentTable, BotProfile, Intent};
use crate::game::{Game, MatchState, Outcome};
use crate::player::PlayerKind;
use crate::settings::{Settings, SettingsSnapshot};
use crate::tiles::Side;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    StartMatch,
    /// Zero-based index into the current legal tiles.
    PlayTile(usize),
    CursorNext,
    CursorPrev,
    /// Play the legal tile under the cursor.
    PlaySelected,
    ChooseSide(Side),
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    // Core engine instance; its settings are edited in place by the menu
    pub game: Game,
    pub agents: AgentTable,
    pub menu_index: usize,
    pub cfg_bot_delay_ms: u64,
    pub bot_delay_ms: u64,
    pub match_started: bool,
    pub(crate) snapshot: Option<SettingsSnapshot>,
    pub(crate) menu_error: Option<String>,
    tile_cursor: usize,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    moves: Vec<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        let game = Game::new(Settings::default());
        let default_delay = 500;
        let agents = Self::build_agents(game.settings(), default_delay);
        // The app opens on the menu, so an edit session is already running.
        let snapshot = Some(game.settings().snapshot());
        Self {
            scene: Scene::Menu,
            game,
            agents,
            menu_index: 0,
            cfg_bot_delay_ms: default_delay,
            bot_delay_ms: default_delay,
            match_started: false,
            snapshot,
            menu_error: None,
            tile_cursor: 0,
            help_open: false,
            history_open: false,
            history_offset: 0,
            moves: Vec::new(),
            action_error: None,
            action_error_at: None,
        }
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    pub(crate) fn build_agents(settings: &Settings, bot_delay_ms: u64) -> AgentTable {
        let profile = BotProfile::default().with_delay_ms(bot_delay_ms);
        let mut agents = AgentTable::from_settings(settings, &profile);
        agents.set_min_action_delay_ms(150);
        agents
    }

    /// A human sits at the current seat and the match is live.
    pub fn human_to_act(&self) -> bool {
        self.scene == Scene::Table
            && self.match_started
            && !self.game.is_over()
            && self.agents.agent_kind(self.game.current_player_index()) == Some(PlayerKind::Human)
    }

    fn queue_intent(&mut self, intent: Intent) -> bool {
        if !self.human_to_act() {
            return false;
        }
        match intent {
            Intent::PlayTile(i) => {
                if self.game.pending_side_tile().is_some() {
                    self.set_action_error("choose a side first (L/R)".to_string());
                    return false;
                }
                let legal = self.game.current_player_legal_tiles().len();
                if i >= legal {
                    self.set_action_error(format!("no playable tile #{}", i + 1));
                    return false;
                }
            }
            Intent::ChooseSide(_) => {
                if self.game.pending_side_tile().is_none() {
                    return false;
                }
            }
        }
        self.clear_action_error();
        self.agents.receive(self.game.current_player_index(), intent)
    }

    /// Whether `seat`'s tiles may be drawn face up.
    pub fn shows_hand(&self, seat: usize) -> bool {
        if !self.game.settings().hide_opponent_tiles() || self.game.is_over() {
            return true;
        }
        seat == self.game.current_player_index()
            && self.agents.agent_kind(seat) == Some(PlayerKind::Human)
    }

    pub fn shows_pool(&self) -> bool {
        !self.game.settings().hide_pool_tiles() || self.game.is_over()
    }

    /// Cursor position within the current legal tiles, clamped to the list.
    pub fn tile_cursor(&self) -> usize {
        let legal = self.game.current_player_legal_tiles().len();
        self.tile_cursor.min(legal.saturating_sub(1))
    }

    fn move_cursor(&mut self, forward: bool) {
        let legal = self.game.current_player_legal_tiles().len();
        if legal == 0 {
            self.tile_cursor = 0;
            return;
        }
        let cur = self.tile_cursor();
        self.tile_cursor = if forward { (cur + 1) % legal } else { (cur + legal - 1) % legal };
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    /// Up to a page of the move log ending `history_offset` lines before the newest.
    pub fn moves_page(&self) -> &[String] {
        let end = self.moves.len().saturating_sub(self.history_offset);
        let start = end.saturating_sub(Self::HISTORY_PAGE_SIZE);
        &self.moves[start..end]
    }

    pub fn menu_error(&self) -> Option<&str> {
        self.menu_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    pub(crate) fn set_action_error(&mut self, msg: String) {
        self.action_error = Some(msg);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub(crate) fn clear_moves(&mut self) {
        self.moves.clear();
        self.history_offset = 0;
    }

    /// One-line description of how the match ended.
    pub fn outcome_line(&self) -> Option<String> {
        let winner = self.game.winner_index()? + 1;
        match self.game.state() {
            MatchState::Ended(Outcome::Win) => Some(format!("P{winner} wins: hand emptied")),
            MatchState::Ended(Outcome::Draw) => {
                Some(format!("Blocked: P{winner} wins with the lowest hand"))
            }
            _ => None,
        }
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset = self.moves.len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::StartMatch => {
                if self.scene == Scene::Table {
                    self.start_match();
                }
                false
            }
            InputAction::PlayTile(i) => self.queue_intent(Intent::PlayTile(i)),
            InputAction::CursorNext => {
                if self.human_to_act() {
                    self.move_cursor(true);
                }
                false
            }
            InputAction::CursorPrev => {
                if self.human_to_act() {
                    self.move_cursor(false);
                }
                false
            }
            InputAction::PlaySelected => {
                let i = self.tile_cursor();
                self.queue_intent(Intent::PlayTile(i))
            }
            InputAction::ChooseSide(side) => self.queue_intent(Intent::ChooseSide(side)),
        }
    }

    /// Deal a new match unless one is still being played.
    pub fn start_match(&mut self) {
        if self.match_started && !self.game.is_over() {
            return;
        }
        self.game.start_match();
        self.agents = Self::build_agents(self.game.settings(), self.bot_delay_ms);
        self.match_started = true;
        self.clear_moves();
        self.clear_action_error();
        self.moves.push(format!(
            "New match: {} players, {} tiles each, P{} opens",
            self.game.players().len(),
            self.game.player(0).map_or(0, |p| p.tile_count()),
            self.game.current_player_index() + 1
        ));
    }

    fn record_move(&mut self, seat: usize) {
        if self.game.pending_side_tile().is_some() {
            return;
        }
        let Some(action) = self.game.last_action() else {
            return;
        };
        let tile = match action.placed() {
            Some(_) => self.game.last_played_tile(),
            None => self.game.last_drawn_tile(),
        };
        let tile = tile.map(|t| format!(" {t}")).unwrap_or_default();
        self.moves.push(format!("P{}: {}{}", seat + 1, action.label(), tile));
        if let Some(line) = self.outcome_line() {
            self.moves.push(line);
        }
    }

    pub fn agents_on_turn(&mut self) {
        if self.scene != Scene::Table || !self.match_started {
            return;
        }
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
        if self.game.is_over() {
            return;
        }
        let seat = self.game.current_player_index();
        match self.agents.on_turn(&mut self.game) {
            Ok(true) => {
                self.clear_action_error();
                self.tile_cursor = 0;
                self.record_move(seat);
            }
            Ok(false) => {}
            Err(err) => self.set_action_error(err.to_string()),
        }
    }
}
