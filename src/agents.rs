//! Agents: who decides for each seat.
//!
//! The engine applies the same rules to every player; a seat's
//! [`PlayerKind`] only selects which agent supplies its decisions. Humans
//! feed [`Intent`]s through a front-end, automated seats pick uniformly at
//! random among legal moves. `AgentTable` drives whichever agent owns the
//! current seat so UIs stay thin.

use crate::engine::MatchEngine;
use crate::game::ActionError;
use crate::player::PlayerKind;
use crate::settings::Settings;
use crate::tiles::{AttachSide, Side};
use core::fmt;
use std::time::{Duration, Instant};

/// Seat-level decisions, typically produced by a UI for a human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Intent {
    /// Index into the current legal tiles.
    PlayTile(usize),
    ChooseSide(Side),
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called when `seat` may be the current actor. Returns whether the
    /// engine state changed.
    fn on_turn(&mut self, engine: &mut dyn MatchEngine, seat: usize) -> Result<bool, ActionError>;
    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }
    /// Optionally receive a seat intent; default is to ignore and return false.
    fn receive(&mut self, _intent: Intent) -> bool {
        false
    }
}

mod bots;

pub use bots::{BotProfile, RandomBot};

/// Draw, or pass when the pool is empty. Only valid when nothing in hand
/// is playable.
pub(crate) fn take_forced_turn(engine: &mut dyn MatchEngine) -> Result<AttachSide, ActionError> {
    if engine.is_pool_empty() {
        engine.pass()?;
        Ok(AttachSide::None)
    } else {
        engine.draw_tile()
    }
}

/// Advance once the turn is complete and the match goes on.
pub(crate) fn finish_turn(engine: &mut dyn MatchEngine) -> Result<(), ActionError> {
    if engine.is_over() || engine.pending_side_tile().is_some() {
        return Ok(());
    }
    engine.advance_turn()
}

/// Executes intents queued by a front-end. Draws and passes need no input
/// and are taken as soon as nothing in hand is playable.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending: Option<Intent>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }
    fn receive(&mut self, intent: Intent) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(intent);
        true
    }
    fn on_turn(&mut self, engine: &mut dyn MatchEngine, seat: usize) -> Result<bool, ActionError> {
        if engine.is_over() {
            self.pending = None;
            return Ok(false);
        }
        if engine.current_player_index() != seat {
            return Ok(false);
        }
        if engine.pending_side_tile().is_some() {
            return match self.pending.take() {
                Some(Intent::ChooseSide(side)) => {
                    engine.choose_side(side)?;
                    finish_turn(engine)?;
                    Ok(true)
                }
                _ => Ok(false),
            };
        }
        if engine.turn_taken() {
            finish_turn(engine)?;
            return Ok(true);
        }
        if engine.current_player_legal_tiles().is_empty() {
            self.pending = None;
            take_forced_turn(engine)?;
            finish_turn(engine)?;
            return Ok(true);
        }
        match self.pending.take() {
            Some(Intent::PlayTile(i)) => {
                engine.play_tile(i)?;
                finish_turn(engine)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Manages a set of optional agents, one per seat, and drives the agent at the
/// current seat when appropriate.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
    min_action_delay: Duration,
    next_action_at: Option<Instant>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(PlayerKind::Human) => 'H',
                Some(_) => 'B',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats, min_action_delay: Duration::from_millis(0), next_action_at: None }
    }

    /// Seat agents in the engine's player order: a [`HumanAgent`] per human,
    /// then a [`RandomBot`] per automated player. Bot seeds are offset by
    /// seat so seeded bots don't mirror each other.
    pub fn from_settings(settings: &Settings, profile: &BotProfile) -> Self {
        let mut table = Self::for_seats(settings.num_players());
        for (seat, kind) in settings.player_kinds().into_iter().enumerate() {
            let agent: Box<dyn PlayerAgent> = match kind {
                PlayerKind::Human => Box::new(HumanAgent::new()),
                _ => {
                    let mut p = profile.clone();
                    p.rng_seed = p.rng_seed.map(|s| s.wrapping_add(seat as u64));
                    Box::new(RandomBot::new(p))
                }
            };
            table.set_agent(seat, Some(agent));
        }
        table
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn PlayerAgent>>) {
        if seat >= self.seats.len() {
            self.seats.resize_with(seat + 1, || None);
        }
        self.seats[seat] = agent;
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: usize) -> Option<PlayerKind> {
        self.seats.get(seat).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    /// Send an intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: usize, intent: Intent) -> bool {
        if let Some(Some(agent)) = self.seats.get_mut(seat) {
            return agent.receive(intent);
        }
        false
    }

    /// Set a global minimum delay between any actions at the table.
    pub fn set_min_action_delay_ms(&mut self, delay_ms: u64) {
        self.min_action_delay = Duration::from_millis(delay_ms);
    }

    /// Drive the agent assigned to the current seat, if any.
    pub fn on_turn(&mut self, engine: &mut dyn MatchEngine) -> Result<bool, ActionError> {
        let seat = engine.current_player_index();
        let Some(Some(agent)) = self.seats.get_mut(seat) else {
            return Ok(false);
        };
        let now = Instant::now();
        if agent.kind() != PlayerKind::Human {
            if let Some(next) = self.next_action_at {
                if now < next {
                    return Ok(false);
                }
            }
        }
        let acted = agent.on_turn(engine, seat)?;
        if acted && self.min_action_delay > Duration::from_millis(0) {
            self.next_action_at = Some(now + self.min_action_delay);
        }
        Ok(acted)
    }

    /// Drive agents until the match ends, an agent waits for input, or
    /// `max_steps` agent calls have been made. Returns whether the match ended.
    pub fn play_out(
        &mut self,
        engine: &mut dyn MatchEngine,
        max_steps: usize,
    ) -> Result<bool, ActionError> {
        for _ in 0..max_steps {
            if engine.is_over() {
                break;
            }
            if !self.on_turn(engine)? {
                break;
            }
        }
        Ok(engine.is_over())
    }
}
