use std::fmt;
use std::str::FromStr;

/// Pip value on one end of a tile.
pub type Pips = u8;

/// Which board end(s) a tile can be attached to.
///
/// Ordered so that anything greater than `None` is attachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttachSide {
    None,
    Left,
    Right,
    Both,
}

impl AttachSide {
    pub const fn is_attachable(self) -> bool {
        !matches!(self, AttachSide::None)
    }

    /// The single side this outcome resolves to, if it is unambiguous.
    pub const fn side(self) -> Option<Side> {
        match self {
            AttachSide::Left => Some(Side::Left),
            AttachSide::Right => Some(Side::Right),
            AttachSide::None | AttachSide::Both => None,
        }
    }
}

/// A concrete board end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub const fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A domino tile: two pip values with a mutable orientation.
///
/// Equality is orientation-sensitive; use [`Tile::same_pair`] to compare the
/// unordered pair.
///
/// ```
/// use domino_rs::tiles::{AttachSide, Tile};
///
/// let ends = Tile::new(2, 5);
/// assert_eq!(ends.can_attach(&Tile::new(5, 3)), AttachSide::Right);
/// assert_eq!(ends.to_string(), "[2|5]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    left: Pips,
    right: Pips,
}

impl Tile {
    pub const fn new(left: Pips, right: Pips) -> Self {
        Self { left, right }
    }

    pub const fn left(self) -> Pips {
        self.left
    }

    pub const fn right(self) -> Pips {
        self.right
    }

    pub const fn is_double(self) -> bool {
        self.left == self.right
    }

    /// Sum of both ends.
    pub const fn sum(self) -> u32 {
        self.left as u32 + self.right as u32
    }

    pub const fn contains(self, pips: Pips) -> bool {
        self.left == pips || self.right == pips
    }

    /// Whether both tiles carry the same unordered pair of values.
    pub const fn same_pair(self, other: Tile) -> bool {
        (self.left == other.left && self.right == other.right)
            || (self.left == other.right && self.right == other.left)
    }

    /// Swap the two ends in place.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    pub const fn rotated(self) -> Self {
        Self { left: self.right, right: self.left }
    }

    /// Classify where `other` could attach when `self` stands for a pair of
    /// open ends: `Left` if `other` shares a value with this tile's left end,
    /// `Right` for the right end, `Both` when both hold.
    pub fn can_attach(&self, other: &Tile) -> AttachSide {
        let left = other.contains(self.left);
        let right = other.contains(self.right);
        match (left, right) {
            (true, true) => AttachSide::Both,
            (true, false) => AttachSide::Left,
            (false, true) => AttachSide::Right,
            (false, false) => AttachSide::None,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}|{}]", self.left, self.right)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TileParseError {
    #[error("invalid tile: '{0}'")]
    Invalid(String),
    #[error("invalid pip value '{0}'")]
    Pips(String),
}

impl FromStr for Tile {
    type Err = TileParseError;

    /// Accepts `a|b`, `a-b` or `a:b`, optionally wrapped in brackets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().trim_start_matches('[').trim_end_matches(']');
        let mut parts = t.split(['|', '-', ':']);
        let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TileParseError::Invalid(s.to_string()));
        };
        let parse = |v: &str| v.trim().parse::<Pips>().map_err(|_| TileParseError::Pips(v.to_string()));
        Ok(Tile::new(parse(a)?, parse(b)?))
    }
}

/// Parse multiple tiles separated by whitespace or commas.
///
/// ```
/// use domino_rs::tiles::{parse_tiles, Tile};
///
/// let tiles = parse_tiles("3|3, 3|5 [6|1]").unwrap();
/// assert_eq!(tiles, vec![Tile::new(3, 3), Tile::new(3, 5), Tile::new(6, 1)]);
/// ```
pub fn parse_tiles(input: &str) -> Result<Vec<Tile>, TileParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Tile::from_str)
        .collect()
}
