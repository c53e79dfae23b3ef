use crate::tiles::{Pips, Tile};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// The boneyard: undrawn tiles in draw order.
#[derive(Debug, Clone, Default)]
pub struct Pool {
    tiles: VecDeque<Tile>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// One tile per unordered pair in `min..=max`, doubles included, in
    /// generation order.
    ///
    /// ```
    /// use domino_rs::pool::Pool;
    ///
    /// let pool = Pool::full_set(0, 6);
    /// assert_eq!(pool.len(), 28);
    /// ```
    pub fn full_set(min: Pips, max: Pips) -> Self {
        let mut tiles = VecDeque::with_capacity(Self::set_size(min, max));
        for left in min..=max {
            for right in left..=max {
                tiles.push_back(Tile::new(left, right));
            }
        }
        Self { tiles }
    }

    /// Number of tiles [`Pool::full_set`] generates for the range.
    pub fn set_size(min: Pips, max: Pips) -> usize {
        if max < min {
            return 0;
        }
        let n = (max - min) as usize + 1;
        n * (n + 1) / 2
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Remaining tiles in draw order.
    pub fn tiles(&self) -> Vec<Tile> {
        self.tiles.iter().copied().collect()
    }

    pub fn add(&mut self, tile: Tile) {
        self.tiles.push_back(tile);
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.make_contiguous().shuffle(rng);
    }

    /// Take the next tile in draw order.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop_front()
    }

    /// Draw up to `n` tiles.
    pub fn draw_n(&mut self, n: usize) -> Vec<Tile> {
        (0..n).map_while(|_| self.draw()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn full_set_has_every_pair_once() {
        let p = Pool::full_set(0, 6);
        assert_eq!(p.len(), 28);
        let pairs: HashSet<(u8, u8)> = p.tiles().iter().map(|t| (t.left(), t.right())).collect();
        assert_eq!(pairs.len(), 28);
        assert!(p.tiles().iter().all(|t| t.left() <= t.right()));
        assert_eq!(p.tiles().iter().filter(|t| t.is_double()).count(), 7);
    }

    #[test]
    fn set_size_matches_generation() {
        for (min, max) in [(0, 1), (0, 6), (2, 9), (5, 5), (0, 12)] {
            assert_eq!(Pool::set_size(min, max), Pool::full_set(min, max).len());
        }
        assert_eq!(Pool::set_size(4, 3), 0);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut a = Pool::full_set(0, 6);
        let mut b = Pool::full_set(0, 6);
        a.shuffle_seeded(42);
        b.shuffle_seeded(42);
        assert_eq!(a.tiles(), b.tiles());
    }

    #[test]
    fn draw_takes_from_the_front_until_empty() {
        let mut p = Pool::full_set(0, 1);
        assert_eq!(p.draw(), Some(Tile::new(0, 0)));
        assert_eq!(p.draw_n(5), vec![Tile::new(0, 1), Tile::new(1, 1)]);
        assert!(p.is_empty());
        assert_eq!(p.draw(), None);
    }
}
