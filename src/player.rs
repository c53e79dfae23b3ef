use crate::tiles::Tile;

/// Who supplies a player's decisions. Rules are identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PlayerKind {
    Human,
    Automated,
}

impl PlayerKind {
    pub const fn label(self) -> &'static str {
        match self {
            PlayerKind::Human => "Human",
            PlayerKind::Automated => "CPU",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("hand index {index} out of range (hand holds {len} tiles)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A seat at the table and the tiles it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    index: usize,
    kind: PlayerKind,
    tiles: Vec<Tile>,
}

impl Player {
    pub fn new(index: usize, kind: PlayerKind) -> Self {
        Self { index, kind, tiles: Vec::with_capacity(7) }
    }

    /// Turn-order index of this player.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    pub fn name(&self) -> String {
        format!("P{}", self.index + 1)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn has_any_tile(&self) -> bool {
        !self.tiles.is_empty()
    }

    pub fn add_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Remove and return the tile at `index`.
    pub fn take_tile(&mut self, index: usize) -> Result<Tile, HandError> {
        if index >= self.tiles.len() {
            return Err(HandError::IndexOutOfRange { index, len: self.tiles.len() });
        }
        Ok(self.tiles.remove(index))
    }

    pub(crate) fn clear(&mut self) {
        self.tiles.clear();
    }

    pub fn doubles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied().filter(|t| t.is_double())
    }

    pub fn has_any_double(&self) -> bool {
        self.doubles().next().is_some()
    }

    /// The double with the highest pip value, if any.
    pub fn biggest_double(&self) -> Option<Tile> {
        self.doubles().fold(None, |best: Option<Tile>, t| match best {
            Some(b) if b.left() >= t.left() => Some(b),
            _ => Some(t),
        })
    }

    /// Sum of every pip value in hand.
    pub fn hand_sum(&self) -> u32 {
        self.tiles.iter().map(|t| t.sum()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_tiles(tiles: &[Tile]) -> Player {
        let mut p = Player::new(0, PlayerKind::Human);
        for t in tiles {
            p.add_tile(*t);
        }
        p
    }

    #[test]
    fn take_tile_by_position() {
        let mut p = with_tiles(&[Tile::new(1, 2), Tile::new(3, 4)]);
        assert_eq!(p.take_tile(1), Ok(Tile::new(3, 4)));
        assert_eq!(p.tiles(), &[Tile::new(1, 2)]);
        assert_eq!(p.take_tile(1), Err(HandError::IndexOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn biggest_double_and_sum() {
        let p = with_tiles(&[Tile::new(2, 2), Tile::new(1, 6), Tile::new(5, 5), Tile::new(0, 0)]);
        assert!(p.has_any_double());
        assert_eq!(p.biggest_double(), Some(Tile::new(5, 5)));
        assert_eq!(p.hand_sum(), 4 + 7 + 10);
    }

    #[test]
    fn no_doubles() {
        let p = with_tiles(&[Tile::new(2, 3)]);
        assert!(!p.has_any_double());
        assert_eq!(p.biggest_double(), None);
        assert_eq!(Player::new(1, PlayerKind::Automated).hand_sum(), 0);
    }
}
