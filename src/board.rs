use crate::tiles::{Pips, Side, Tile};
use std::collections::VecDeque;

/// The line of play: placed tiles in order from the left open end to the
/// right open end.
///
/// Adjacent tiles always touch on matching values and tiles are never
/// removed during a match.
///
/// ```
/// use domino_rs::board::Board;
/// use domino_rs::tiles::Tile;
///
/// let mut board = Board::new();
/// assert!(board.add_at_right(Tile::new(6, 4)));
/// assert!(board.add_at_right(Tile::new(2, 4)));
/// assert_eq!(board.open_ends(), Some((6, 2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    tiles: VecDeque<Tile>,
    last_added: Option<Side>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Placed tiles, left to right.
    pub fn tiles(&self) -> Vec<Tile> {
        self.tiles.iter().copied().collect()
    }

    pub fn left_end_tile(&self) -> Option<Tile> {
        self.tiles.front().copied()
    }

    pub fn right_end_tile(&self) -> Option<Tile> {
        self.tiles.back().copied()
    }

    /// Outward values at the left and right extremities, `None` when empty.
    pub fn open_ends(&self) -> Option<(Pips, Pips)> {
        match (self.tiles.front(), self.tiles.back()) {
            (Some(l), Some(r)) => Some((l.left(), r.right())),
            _ => None,
        }
    }

    /// Both open ends folded into a single probe tile, as used for
    /// [`Tile::can_attach`].
    pub fn ends_tile(&self) -> Option<Tile> {
        self.open_ends().map(|(l, r)| Tile::new(l, r))
    }

    /// The most recently placed tile.
    pub fn last_added(&self) -> Option<Tile> {
        match self.last_added? {
            Side::Left => self.left_end_tile(),
            Side::Right => self.right_end_tile(),
        }
    }

    /// End the most recent placement went to.
    pub fn last_added_side(&self) -> Option<Side> {
        self.last_added
    }

    /// Placed tiles with the most recent placement left out.
    pub fn tiles_excluding_last_added(&self) -> Vec<Tile> {
        let skip = match self.last_added {
            Some(Side::Left) => Some(0),
            Some(Side::Right) => self.tiles.len().checked_sub(1),
            None => None,
        };
        self.tiles
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .map(|(_, t)| *t)
            .collect()
    }

    pub fn add_at_left(&mut self, tile: Tile) -> bool {
        self.add_at(Side::Left, tile)
    }

    pub fn add_at_right(&mut self, tile: Tile) -> bool {
        self.add_at(Side::Right, tile)
    }

    /// Place `tile` at `side`, rotating it at most once so that its touching
    /// value meets the open end. Returns `false` without mutating the board
    /// when neither orientation fits. An empty board accepts any tile.
    pub fn add_at(&mut self, side: Side, mut tile: Tile) -> bool {
        let Some((left_end, right_end)) = self.open_ends() else {
            self.tiles.push_back(tile);
            self.last_added = Some(side);
            return true;
        };
        let fits = |t: &Tile| match side {
            Side::Left => t.right() == left_end,
            Side::Right => t.left() == right_end,
        };
        if !fits(&tile) {
            tile.rotate();
            if !fits(&tile) {
                return false;
            }
        }
        match side {
            Side::Left => self.tiles.push_front(tile),
            Side::Right => self.tiles.push_back(tile),
        }
        self.last_added = Some(side);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_ends() {
        let b = Board::new();
        assert!(b.open_ends().is_none());
        assert!(b.ends_tile().is_none());
        assert!(b.last_added().is_none());
        assert!(b.tiles_excluding_last_added().is_empty());
    }

    #[test]
    fn first_tile_is_accepted_unrotated() {
        let mut b = Board::new();
        assert!(b.add_at_left(Tile::new(5, 1)));
        assert_eq!(b.tiles(), vec![Tile::new(5, 1)]);
        assert_eq!(b.open_ends(), Some((5, 1)));
        assert_eq!(b.last_added(), Some(Tile::new(5, 1)));
        assert!(b.tiles_excluding_last_added().is_empty());
    }

    #[test]
    fn left_placement_rotates_once_when_needed() {
        let mut b = Board::new();
        b.add_at_right(Tile::new(3, 6));
        assert!(b.add_at_left(Tile::new(3, 1)));
        assert_eq!(b.tiles(), vec![Tile::new(1, 3), Tile::new(3, 6)]);
        assert_eq!(b.open_ends(), Some((1, 6)));
        assert_eq!(b.last_added(), Some(Tile::new(1, 3)));
        assert_eq!(b.tiles_excluding_last_added(), vec![Tile::new(3, 6)]);
    }

    #[test]
    fn rejected_tile_leaves_board_untouched() {
        let mut b = Board::new();
        b.add_at_right(Tile::new(3, 6));
        let before = b.clone();
        assert!(!b.add_at_right(Tile::new(1, 2)));
        assert!(!b.add_at_left(Tile::new(6, 6)));
        assert_eq!(b, before);
    }
}
