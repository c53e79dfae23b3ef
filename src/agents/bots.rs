use crate::engine::MatchEngine;
use crate::game::ActionError;
use crate::player::PlayerKind;
use crate::tiles::{AttachSide, Side};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::{Duration, Instant};

use super::{finish_turn, take_forced_turn, PlayerAgent};

/// Configuration for a bot's pacing and randomness.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct BotProfile {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Fixed think time before every move.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.min_delay_ms = delay_ms;
        self.max_delay_ms = delay_ms;
        self
    }
}

#[derive(Debug)]
struct BotState {
    /// Tile and side choices.
    rng: StdRng,
    /// Think delays only.
    pace_rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => entropy_rng(),
        };
        Self { rng, pace_rng: entropy_rng() }
    }

    fn pick_side(&mut self) -> Side {
        Side::ALL[self.rng.random_range(0..Side::ALL.len())]
    }
}

/// Automated player: picks uniformly among legal tiles and, when a tile
/// fits both ends, uniformly between the two sides.
#[derive(Debug)]
pub struct RandomBot {
    profile: BotProfile,
    state: BotState,
    next_action_at: Option<Instant>,
}

impl RandomBot {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state, next_action_at: None }
    }

    /// Waits out the think delay. Returns true once the bot may move.
    ///
    /// The delay is sampled once per move from the pacing RNG, so how often
    /// the bot is polled never touches the decision RNG.
    fn ready(&mut self) -> bool {
        match self.next_action_at {
            None => {
                let delay = choose_delay_ms(&self.profile, &mut self.state.pace_rng);
                if delay == 0 {
                    return true;
                }
                self.next_action_at = Some(Instant::now() + Duration::from_millis(delay));
                false
            }
            Some(next) if Instant::now() < next => false,
            Some(_) => {
                self.next_action_at = None;
                true
            }
        }
    }

    fn take_turn(&mut self, engine: &mut dyn MatchEngine) -> Result<(), ActionError> {
        if engine.pending_side_tile().is_none() && !engine.turn_taken() {
            let legal = engine.current_player_legal_tiles().len();
            let outcome = if legal > 0 {
                engine.play_tile(self.state.rng.random_range(0..legal))?
            } else {
                take_forced_turn(engine)?
            };
            if outcome != AttachSide::Both {
                return finish_turn(engine);
            }
        }
        if engine.pending_side_tile().is_some() {
            engine.choose_side(self.state.pick_side())?;
        }
        finish_turn(engine)
    }
}

impl PlayerAgent for RandomBot {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Automated
    }
    fn on_turn(&mut self, engine: &mut dyn MatchEngine, seat: usize) -> Result<bool, ActionError> {
        if engine.is_over() {
            return Ok(false);
        }
        if engine.current_player_index() != seat {
            return Ok(false);
        }
        if !self.ready() {
            return Ok(false);
        }
        self.take_turn(engine)?;
        Ok(true)
    }
}

fn entropy_rng() -> StdRng {
    let mut seed = [0u8; 32];
    rand::rng().fill_bytes(&mut seed);
    StdRng::from_seed(seed)
}

fn choose_delay_ms(profile: &BotProfile, rng: &mut StdRng) -> u64 {
    let min = profile.min_delay_ms;
    let max = profile.max_delay_ms.max(min);
    if max == min {
        min
    } else {
        rng.random_range(min..=max)
    }
}
