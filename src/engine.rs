// Match engine API boundary. This trait exposes the commands and queries a
// front-end or agent needs to drive a domino match without depending on the
// engine's internals. It is implemented for the core `Game` type.

use crate::game::{ActionError, GameAction, MatchState};
use crate::player::Player;
use crate::tiles::{AttachSide, Side, Tile};

pub trait MatchEngine {
    // Match lifecycle
    fn start_match(&mut self);

    // Turn commands
    fn play_tile(&mut self, legal_index: usize) -> Result<AttachSide, ActionError>;
    fn draw_tile(&mut self) -> Result<AttachSide, ActionError>;
    fn choose_side(&mut self, side: Side) -> Result<(), ActionError>;
    fn pass(&mut self) -> Result<(), ActionError>;
    fn advance_turn(&mut self) -> Result<(), ActionError>;

    // Queries
    fn state(&self) -> MatchState;
    fn has_winner(&self) -> bool;
    fn has_draw(&self) -> bool;
    fn winner_index(&self) -> Option<usize>;
    fn current_player_index(&self) -> usize;
    fn current_player_legal_tiles(&self) -> Vec<Tile>;
    fn board_tiles(&self) -> Vec<Tile>;
    fn board_tiles_excluding_last(&self) -> Vec<Tile>;
    fn pool_tiles(&self) -> Vec<Tile>;
    fn is_pool_empty(&self) -> bool;
    fn player(&self, index: usize) -> Option<&Player>;
    fn num_players(&self) -> usize;
    fn last_action(&self) -> Option<GameAction>;
    fn last_played_tile(&self) -> Option<Tile>;
    fn last_drawn_tile(&self) -> Option<Tile>;
    fn open_ends_tile(&self) -> Option<Tile>;
    fn pending_side_tile(&self) -> Option<Tile>;
    fn turn_taken(&self) -> bool;

    fn is_over(&self) -> bool {
        matches!(self.state(), MatchState::Ended(_))
    }
}

impl MatchEngine for crate::game::Game {
    fn start_match(&mut self) {
        self.start_match();
    }

    fn play_tile(&mut self, legal_index: usize) -> Result<AttachSide, ActionError> {
        self.play_tile(legal_index)
    }
    fn draw_tile(&mut self) -> Result<AttachSide, ActionError> {
        self.draw_tile()
    }
    fn choose_side(&mut self, side: Side) -> Result<(), ActionError> {
        self.choose_side(side)
    }
    fn pass(&mut self) -> Result<(), ActionError> {
        self.pass()
    }
    fn advance_turn(&mut self) -> Result<(), ActionError> {
        self.advance_turn()
    }

    fn state(&self) -> MatchState {
        self.state()
    }
    fn has_winner(&self) -> bool {
        self.has_winner()
    }
    fn has_draw(&self) -> bool {
        self.has_draw()
    }
    fn winner_index(&self) -> Option<usize> {
        self.winner_index()
    }
    fn current_player_index(&self) -> usize {
        self.current
    }
    fn current_player_legal_tiles(&self) -> Vec<Tile> {
        self.current_player_legal_tiles()
    }
    fn board_tiles(&self) -> Vec<Tile> {
        self.board_tiles()
    }
    fn board_tiles_excluding_last(&self) -> Vec<Tile> {
        self.board_tiles_excluding_last()
    }
    fn pool_tiles(&self) -> Vec<Tile> {
        self.pool_tiles()
    }
    fn is_pool_empty(&self) -> bool {
        self.is_pool_empty()
    }
    fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }
    fn num_players(&self) -> usize {
        self.players.len()
    }
    fn last_action(&self) -> Option<GameAction> {
        self.last_action
    }
    fn last_played_tile(&self) -> Option<Tile> {
        self.last_played
    }
    fn last_drawn_tile(&self) -> Option<Tile> {
        self.last_drawn
    }
    fn open_ends_tile(&self) -> Option<Tile> {
        self.open_ends_tile()
    }
    fn pending_side_tile(&self) -> Option<Tile> {
        self.pending_side_tile()
    }
    fn turn_taken(&self) -> bool {
        self.turn_taken
    }
}
