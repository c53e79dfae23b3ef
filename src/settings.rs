//! Match configuration.
//!
//! `Settings` can only hold validated values: every setter checks the new
//! value against the others and leaves the settings untouched on error, so
//! the engine can trust whatever it is handed.

use crate::player::PlayerKind;
use crate::pool::Pool;
use crate::tiles::Pips;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("number of players must be between 2 and 4, got {0}")]
    PlayersOutOfRange(usize),
    #[error("human players ({humans}) exceed the number of players ({players})")]
    HumansExceedPlayers { humans: usize, players: usize },
    #[error("max pips must be greater than min pips: min {min}, max {max}")]
    DotsRange { min: Pips, max: Pips },
    #[error("a {tiles}-tile set cannot give every one of {players} players a tile")]
    TooFewTiles { tiles: usize, players: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    num_players: usize,
    num_human_players: usize,
    min_dots: Pips,
    max_dots: Pips,
    hide_opponent_tiles: bool,
    hide_pool_tiles: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_players: 4,
            num_human_players: 1,
            min_dots: 0,
            max_dots: 6,
            hide_opponent_tiles: true,
            hide_pool_tiles: true,
        }
    }
}

impl Settings {
    /// Build settings for a match, checking every constraint.
    ///
    /// ```
    /// use domino_rs::settings::Settings;
    ///
    /// let s = Settings::try_new(2, 0, 0, 6).unwrap();
    /// assert_eq!(s.num_automated_players(), 2);
    /// assert!(Settings::try_new(5, 0, 0, 6).is_err());
    /// assert!(Settings::try_new(2, 0, 6, 6).is_err());
    /// ```
    pub fn try_new(
        num_players: usize,
        num_human_players: usize,
        min_dots: Pips,
        max_dots: Pips,
    ) -> Result<Self, SettingsError> {
        let s = Self { num_players, num_human_players, min_dots, max_dots, ..Self::default() };
        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(SettingsError::PlayersOutOfRange(self.num_players));
        }
        if self.num_human_players > self.num_players {
            return Err(SettingsError::HumansExceedPlayers {
                humans: self.num_human_players,
                players: self.num_players,
            });
        }
        if self.max_dots <= self.min_dots {
            return Err(SettingsError::DotsRange { min: self.min_dots, max: self.max_dots });
        }
        let tiles = self.tile_count();
        if tiles < self.num_players {
            return Err(SettingsError::TooFewTiles { tiles, players: self.num_players });
        }
        Ok(())
    }

    fn try_update(&mut self, f: impl FnOnce(&mut Self)) -> Result<(), SettingsError> {
        let mut next = self.clone();
        f(&mut next);
        next.validate()?;
        *self = next;
        Ok(())
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn set_num_players(&mut self, n: usize) -> Result<(), SettingsError> {
        self.try_update(|s| s.num_players = n)
    }

    pub fn num_human_players(&self) -> usize {
        self.num_human_players
    }

    pub fn set_num_human_players(&mut self, n: usize) -> Result<(), SettingsError> {
        self.try_update(|s| s.num_human_players = n)
    }

    /// Set both player counts at once, for edits that would be invalid
    /// halfway through (e.g. 4 players / 3 humans to 2 players / 2 humans).
    pub fn set_players(&mut self, players: usize, humans: usize) -> Result<(), SettingsError> {
        self.try_update(|s| {
            s.num_players = players;
            s.num_human_players = humans;
        })
    }

    pub fn num_automated_players(&self) -> usize {
        self.num_players - self.num_human_players
    }

    pub fn min_dots(&self) -> Pips {
        self.min_dots
    }

    pub fn set_min_dots(&mut self, v: Pips) -> Result<(), SettingsError> {
        self.try_update(|s| s.min_dots = v)
    }

    pub fn max_dots(&self) -> Pips {
        self.max_dots
    }

    pub fn set_max_dots(&mut self, v: Pips) -> Result<(), SettingsError> {
        self.try_update(|s| s.max_dots = v)
    }

    pub fn hide_opponent_tiles(&self) -> bool {
        self.hide_opponent_tiles
    }

    pub fn set_hide_opponent_tiles(&mut self, hide: bool) {
        self.hide_opponent_tiles = hide;
    }

    pub fn hide_pool_tiles(&self) -> bool {
        self.hide_pool_tiles
    }

    pub fn set_hide_pool_tiles(&mut self, hide: bool) {
        self.hide_pool_tiles = hide;
    }

    /// Size of the full tile set for the configured pip range.
    pub fn tile_count(&self) -> usize {
        Pool::set_size(self.min_dots, self.max_dots)
    }

    /// Seat kinds in turn order: humans first, then automated players.
    pub fn player_kinds(&self) -> Vec<PlayerKind> {
        let mut kinds = vec![PlayerKind::Human; self.num_human_players];
        kinds.resize(self.num_players, PlayerKind::Automated);
        kinds
    }

    /// Freeze the current values before an edit session.
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot(self.clone())
    }
}

/// Immutable copy of [`Settings`] taken before editing, restored verbatim
/// when the edit is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSnapshot(Settings);

impl SettingsSnapshot {
    pub fn settings(&self) -> &Settings {
        &self.0
    }

    pub fn restore(self) -> Settings {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert_eq!(s.validate(), Ok(()));
        assert_eq!(s.tile_count(), 28);
        assert_eq!(
            s.player_kinds(),
            vec![
                PlayerKind::Human,
                PlayerKind::Automated,
                PlayerKind::Automated,
                PlayerKind::Automated
            ]
        );
    }

    #[test]
    fn rejected_setter_leaves_values_unchanged() {
        let mut s = Settings::default();
        assert_eq!(s.set_num_players(1), Err(SettingsError::PlayersOutOfRange(1)));
        assert_eq!(s.set_num_players(5), Err(SettingsError::PlayersOutOfRange(5)));
        assert_eq!(
            s.set_num_human_players(5),
            Err(SettingsError::HumansExceedPlayers { humans: 5, players: 4 })
        );
        assert_eq!(s.set_max_dots(0), Err(SettingsError::DotsRange { min: 0, max: 0 }));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn all_human_table_is_allowed() {
        let mut s = Settings::default();
        assert!(s.set_num_human_players(4).is_ok());
        assert_eq!(s.num_automated_players(), 0);
        assert_eq!(
            s.set_num_players(3),
            Err(SettingsError::HumansExceedPlayers { humans: 4, players: 3 })
        );
        assert!(s.set_players(3, 3).is_ok());
    }

    #[test]
    fn tiny_sets_are_rejected_when_players_would_get_nothing() {
        let mut s = Settings::default();
        s.set_max_dots(1).unwrap_err();
        assert_eq!(s.max_dots(), 6);
        s.set_players(2, 0).unwrap();
        assert!(s.set_max_dots(1).is_ok());
        assert_eq!(s.tile_count(), 3);
    }

    #[test]
    fn snapshot_restores_verbatim() {
        let mut s = Settings::default();
        let snap = s.snapshot();
        s.set_players(2, 2).unwrap();
        s.set_hide_pool_tiles(false);
        assert_ne!(&s, snap.settings());
        let s = snap.restore();
        assert_eq!(s, Settings::default());
    }
}
