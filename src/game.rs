use crate::board::Board;
use crate::player::{HandError, Player};
use crate::pool::Pool;
use crate::settings::{Settings, SettingsError};
use crate::tiles::{AttachSide, Pips, Side, Tile};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
    Win,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatchState {
    NotStarted,
    InProgress,
    Ended(Outcome),
}

/// What the previous turn did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameAction {
    /// Nothing drawn or played.
    Pass,
    /// A tile was drawn but could not be played.
    DrawAndPass,
    DrawAndPlay(Side),
    Play(Side),
}

impl GameAction {
    pub fn label(self) -> &'static str {
        match self {
            GameAction::Pass => "Pass",
            GameAction::DrawAndPass => "Draw and pass",
            GameAction::DrawAndPlay(Side::Left) => "Draw and play left",
            GameAction::DrawAndPlay(Side::Right) => "Draw and play right",
            GameAction::Play(Side::Left) => "Play left",
            GameAction::Play(Side::Right) => "Play right",
        }
    }

    pub fn drew(self) -> bool {
        matches!(self, GameAction::DrawAndPass | GameAction::DrawAndPlay(_))
    }

    pub fn placed(self) -> Option<Side> {
        match self {
            GameAction::DrawAndPlay(side) | GameAction::Play(side) => Some(side),
            GameAction::Pass | GameAction::DrawAndPass => None,
        }
    }
}

/// Precondition violations: the caller asked for something the current
/// state does not allow. Rule violations are not errors; they surface as
/// [`AttachSide::None`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no match has been started")]
    NotStarted,
    #[error("the match is over")]
    MatchOver,
    #[error("a side must be chosen for the pending tile first")]
    SideChoicePending,
    #[error("there is no tile waiting for a side")]
    NoSideChoicePending,
    #[error("the current player has already acted this turn")]
    TurnAlreadyTaken,
    #[error("the current player has not acted yet")]
    TurnNotTaken,
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("the pool is empty")]
    PoolEmpty,
    #[error("the current player holds a playable tile")]
    HasPlayableTile,
    #[error("the pool still has tiles to draw")]
    MustDraw,
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl From<HandError> for ActionError {
    fn from(err: HandError) -> Self {
        match err {
            HandError::IndexOutOfRange { index, len } => ActionError::IndexOutOfRange { index, len },
        }
    }
}

/// A tile that matched both open ends and waits for the caller to pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingPlacement {
    pub(crate) tile: Tile,
    pub(crate) drawn: bool,
}

/// The match engine: owns the board, the pool and the players for one match
/// and runs the turn state machine.
///
/// Each turn the current player takes exactly one of [`Game::play_tile`],
/// [`Game::draw_tile`] or [`Game::pass`] (followed by [`Game::choose_side`]
/// when the outcome was [`AttachSide::Both`]), then [`Game::advance_turn`]
/// hands over to the next player.
///
/// ```
/// use domino_rs::game::{Game, MatchState};
/// use domino_rs::settings::Settings;
///
/// let mut game = Game::with_seed(Settings::try_new(2, 0, 0, 6).unwrap(), 7);
/// game.start_match();
/// assert_eq!(game.state(), MatchState::InProgress);
/// assert_eq!(game.player(0).unwrap().tile_count(), 14);
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    pub(crate) settings: Settings,

    pub(crate) board: Board,
    pub(crate) pool: Pool,
    pub(crate) players: Vec<Player>,
    pub(crate) current: usize,
    pub(crate) pass_count: usize,

    pub(crate) last_drawn: Option<Tile>,
    pub(crate) last_played: Option<Tile>,
    pub(crate) last_action: Option<GameAction>,
    pub(crate) pending: Option<PendingPlacement>,

    pub(crate) started: bool,
    pub(crate) turn_taken: bool,
    /// Deals needed before someone held a double in the last start.
    deals: u32,
    /// Full set size of the last deal; settings may change afterwards.
    dealt_tiles: usize,
    rng: ChaCha8Rng,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let seed: u64 = rand::rng().random();
        Self::with_seed(settings, seed)
    }

    /// Create an engine whose shuffles are fully determined by `seed`.
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            board: Board::new(),
            pool: Pool::new(),
            players: Vec::new(),
            current: 0,
            pass_count: 0,
            last_drawn: None,
            last_played: None,
            last_action: None,
            pending: None,
            started: false,
            turn_taken: false,
            deals: 0,
            dealt_tiles: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    // --- Settings ---

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings edits take effect at the next start and are refused while a
    /// tile waits for [`Game::choose_side`].
    fn ensure_settings_editable(&self) -> Result<(), ActionError> {
        if self.pending.is_some() {
            return Err(ActionError::SideChoicePending);
        }
        Ok(())
    }

    /// Replace the settings wholesale. Takes effect at the next start.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), ActionError> {
        self.ensure_settings_editable()?;
        self.settings = settings;
        Ok(())
    }

    pub fn set_num_players(&mut self, n: usize) -> Result<(), ActionError> {
        self.ensure_settings_editable()?;
        Ok(self.settings.set_num_players(n)?)
    }

    pub fn set_num_human_players(&mut self, n: usize) -> Result<(), ActionError> {
        self.ensure_settings_editable()?;
        Ok(self.settings.set_num_human_players(n)?)
    }

    pub fn set_min_dots(&mut self, v: Pips) -> Result<(), ActionError> {
        self.ensure_settings_editable()?;
        Ok(self.settings.set_min_dots(v)?)
    }

    pub fn set_max_dots(&mut self, v: Pips) -> Result<(), ActionError> {
        self.ensure_settings_editable()?;
        Ok(self.settings.set_max_dots(v)?)
    }

    pub fn set_hide_opponent_tiles(&mut self, hide: bool) -> Result<(), ActionError> {
        self.ensure_settings_editable()?;
        self.settings.set_hide_opponent_tiles(hide);
        Ok(())
    }

    pub fn set_hide_pool_tiles(&mut self, hide: bool) -> Result<(), ActionError> {
        self.ensure_settings_editable()?;
        self.settings.set_hide_pool_tiles(hide);
        Ok(())
    }

    // --- Lifecycle ---

    /// Discard any previous match, deal a new one and pick the starting
    /// player. Redeals until at least one player holds a double.
    ///
    /// This is a full reset: a tile still waiting for a side is dropped with
    /// the rest of the old match.
    pub fn start_match(&mut self) {
        self.reset_match_state();
        self.players = self
            .settings
            .player_kinds()
            .into_iter()
            .enumerate()
            .map(|(i, kind)| Player::new(i, kind))
            .collect();
        loop {
            self.deals += 1;
            self.deal_tiles();
            if self.players.iter().any(Player::has_any_double) {
                break;
            }
            debug!("deal #{} produced no double, redealing", self.deals);
        }
        self.current = self.pick_starting_player();
        self.started = true;
        info!(
            "match started: {} players, pips {}..={}, {} in pool, P{} opens",
            self.players.len(),
            self.settings.min_dots(),
            self.settings.max_dots(),
            self.pool.len(),
            self.current + 1
        );
    }

    fn reset_match_state(&mut self) {
        self.board = Board::new();
        self.pool = Pool::new();
        self.players.clear();
        self.current = 0;
        self.pass_count = 0;
        self.last_drawn = None;
        self.last_played = None;
        self.last_action = None;
        self.pending = None;
        self.started = false;
        self.turn_taken = false;
        self.deals = 0;
    }

    fn deal_tiles(&mut self) {
        self.pool = Pool::full_set(self.settings.min_dots(), self.settings.max_dots());
        self.dealt_tiles = self.pool.len();
        self.pool.shuffle_with(&mut self.rng);
        let per_player = self.pool.len() / self.players.len().max(1);
        for p in &mut self.players {
            p.clear();
            for tile in self.pool.draw_n(per_player) {
                p.add_tile(tile);
            }
        }
    }

    /// Holder of the highest double; the first such player on ties.
    fn pick_starting_player(&self) -> usize {
        let mut best: Option<(usize, Pips)> = None;
        for (i, p) in self.players.iter().enumerate() {
            if let Some(d) = p.biggest_double() {
                if best.map_or(true, |(_, pips)| d.left() > pips) {
                    best = Some((i, d.left()));
                }
            }
        }
        best.map(|(i, _)| i).unwrap_or(0)
    }

    /// Number of deals the last [`Game::start_match`] needed.
    pub fn deals(&self) -> u32 {
        self.deals
    }

    // --- Queries ---

    pub fn state(&self) -> MatchState {
        if !self.started {
            MatchState::NotStarted
        } else if self.has_winner() {
            MatchState::Ended(Outcome::Win)
        } else if self.has_draw() {
            MatchState::Ended(Outcome::Draw)
        } else {
            MatchState::InProgress
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state(), MatchState::Ended(_))
    }

    /// Some player has emptied their hand.
    pub fn has_winner(&self) -> bool {
        self.started && self.pending.is_none() && self.players.iter().any(|p| !p.has_any_tile())
    }

    /// Nobody can move: a full round of passes, an empty pool and tiles
    /// left in every hand.
    pub fn has_draw(&self) -> bool {
        self.started
            && self.pending.is_none()
            && !self.players.is_empty()
            && self.pass_count >= self.players.len()
            && self.pool.is_empty()
            && self.players.iter().all(Player::has_any_tile)
    }

    /// The player who emptied their hand, or on a draw the player with the
    /// lowest hand sum (first such player on ties).
    pub fn winner_index(&self) -> Option<usize> {
        if self.has_winner() {
            self.players.iter().position(|p| !p.has_any_tile())
        } else if self.has_draw() {
            self.players.iter().min_by_key(|p| p.hand_sum()).map(Player::index)
        } else {
            None
        }
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_tiles(&self) -> Vec<Tile> {
        self.board.tiles()
    }

    pub fn board_tiles_excluding_last(&self) -> Vec<Tile> {
        self.board.tiles_excluding_last_added()
    }

    pub fn pool_tiles(&self) -> Vec<Tile> {
        self.pool.tiles()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_pool_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Both open ends as one probe tile, `None` on an empty board.
    pub fn open_ends_tile(&self) -> Option<Tile> {
        self.board.ends_tile()
    }

    /// The last completed action; `None` while a side choice is pending.
    pub fn last_action(&self) -> Option<GameAction> {
        self.last_action
    }

    pub fn last_played_tile(&self) -> Option<Tile> {
        self.last_played
    }

    pub fn last_drawn_tile(&self) -> Option<Tile> {
        self.last_drawn
    }

    /// Tile waiting for [`Game::choose_side`].
    pub fn pending_side_tile(&self) -> Option<Tile> {
        self.pending.map(|p| p.tile)
    }

    pub fn pass_count(&self) -> usize {
        self.pass_count
    }

    pub fn turn_taken(&self) -> bool {
        self.turn_taken
    }

    /// Size of the full set dealt from at the last start. Before the first
    /// start, the size the current settings would deal.
    pub fn total_tiles(&self) -> usize {
        if self.started {
            self.dealt_tiles
        } else {
            Pool::set_size(self.settings.min_dots(), self.settings.max_dots())
        }
    }

    fn legal_positions(&self) -> Vec<usize> {
        let Some(player) = self.players.get(self.current) else {
            return Vec::new();
        };
        let ends = self.board.ends_tile();
        player
            .tiles()
            .iter()
            .enumerate()
            .filter(|(_, t)| ends.map_or(true, |e| e.can_attach(t).is_attachable()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Tiles the current player may play, in hand order. Every tile is legal
    /// on an empty board.
    pub fn current_player_legal_tiles(&self) -> Vec<Tile> {
        let Some(player) = self.players.get(self.current) else {
            return Vec::new();
        };
        self.legal_positions().into_iter().map(|i| player.tiles()[i]).collect()
    }

    pub fn can_current_player_play(&self) -> bool {
        !self.legal_positions().is_empty()
    }

    // --- Commands ---

    fn ensure_can_act(&self) -> Result<(), ActionError> {
        if !self.started {
            return Err(ActionError::NotStarted);
        }
        if self.pending.is_some() {
            return Err(ActionError::SideChoicePending);
        }
        if self.is_over() {
            return Err(ActionError::MatchOver);
        }
        if self.turn_taken {
            return Err(ActionError::TurnAlreadyTaken);
        }
        Ok(())
    }

    /// Play the tile at `legal_index` within
    /// [`Game::current_player_legal_tiles`].
    ///
    /// `Left`/`Right` mean the tile was placed there; `Both` means it waits
    /// for [`Game::choose_side`].
    pub fn play_tile(&mut self, legal_index: usize) -> Result<AttachSide, ActionError> {
        self.ensure_can_act()?;
        let legal = self.legal_positions();
        let &pos = legal
            .get(legal_index)
            .ok_or(ActionError::IndexOutOfRange { index: legal_index, len: legal.len() })?;
        let tile = self.players[self.current].take_tile(pos)?;
        self.turn_taken = true;
        Ok(self.resolve(tile, false))
    }

    /// Draw from the pool when no held tile is playable and try to play the
    /// drawn tile straight away. A drawn tile that cannot attach is kept in
    /// hand and the turn counts as a pass.
    pub fn draw_tile(&mut self) -> Result<AttachSide, ActionError> {
        self.ensure_can_act()?;
        if self.can_current_player_play() {
            return Err(ActionError::HasPlayableTile);
        }
        let tile = self.pool.draw().ok_or(ActionError::PoolEmpty)?;
        self.turn_taken = true;
        Ok(self.resolve(tile, true))
    }

    /// Pass when nothing is playable and nothing is left to draw.
    pub fn pass(&mut self) -> Result<(), ActionError> {
        self.ensure_can_act()?;
        if self.can_current_player_play() {
            return Err(ActionError::HasPlayableTile);
        }
        if !self.pool.is_empty() {
            return Err(ActionError::MustDraw);
        }
        self.turn_taken = true;
        self.record_pass(None);
        Ok(())
    }

    /// Settle a tile that matched both ends.
    pub fn choose_side(&mut self, side: Side) -> Result<(), ActionError> {
        if !self.started {
            return Err(ActionError::NotStarted);
        }
        if self.is_over() {
            return Err(ActionError::MatchOver);
        }
        let pending = self.pending.take().ok_or(ActionError::NoSideChoicePending)?;
        self.place(side, pending.tile, pending.drawn);
        Ok(())
    }

    /// Hand the turn to the next player.
    pub fn advance_turn(&mut self) -> Result<(), ActionError> {
        if !self.started {
            return Err(ActionError::NotStarted);
        }
        if self.pending.is_some() {
            return Err(ActionError::SideChoicePending);
        }
        if self.is_over() {
            return Err(ActionError::MatchOver);
        }
        if !self.turn_taken {
            return Err(ActionError::TurnNotTaken);
        }
        self.current = (self.current + 1) % self.players.len();
        self.turn_taken = false;
        Ok(())
    }

    fn resolve(&mut self, tile: Tile, drawn: bool) -> AttachSide {
        let attach = match self.board.ends_tile() {
            None => AttachSide::Left,
            Some(ends) => ends.can_attach(&tile),
        };
        match attach {
            AttachSide::None => {
                self.players[self.current].add_tile(tile);
                self.record_pass(drawn.then_some(tile));
            }
            AttachSide::Left => self.place(Side::Left, tile, drawn),
            AttachSide::Right => self.place(Side::Right, tile, drawn),
            AttachSide::Both => {
                debug!("P{} must choose a side for {tile}", self.current + 1);
                self.pending = Some(PendingPlacement { tile, drawn });
                self.last_action = None;
                self.last_played = None;
                self.last_drawn = drawn.then_some(tile);
            }
        }
        attach
    }

    fn place(&mut self, side: Side, tile: Tile, drawn: bool) {
        if !self.board.add_at(side, tile) {
            self.players[self.current].add_tile(tile);
            self.record_pass(drawn.then_some(tile));
            return;
        }
        self.pass_count = 0;
        self.last_played = self.board.last_added();
        self.last_drawn = drawn.then_some(tile);
        let action = if drawn { GameAction::DrawAndPlay(side) } else { GameAction::Play(side) };
        self.last_action = Some(action);
        debug!("P{}: {} {}", self.current + 1, action.label(), tile);
        self.log_if_over();
    }

    fn record_pass(&mut self, drawn: Option<Tile>) {
        self.pass_count += 1;
        self.last_played = None;
        self.last_drawn = drawn;
        let action = if drawn.is_some() { GameAction::DrawAndPass } else { GameAction::Pass };
        self.last_action = Some(action);
        debug!("P{}: {} (consecutive passes: {})", self.current + 1, action.label(), self.pass_count);
        self.log_if_over();
    }

    fn log_if_over(&self) {
        match (self.state(), self.winner_index()) {
            (MatchState::Ended(Outcome::Win), Some(w)) => info!("P{} wins by emptying their hand", w + 1),
            (MatchState::Ended(Outcome::Draw), Some(w)) => {
                info!("match blocked; P{} wins the draw on hand sum", w + 1)
            }
            _ => {}
        }
    }
}
