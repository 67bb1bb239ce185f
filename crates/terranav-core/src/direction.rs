//! The eight compass directions: [`Direction`] and [`DirectionMask`].

use std::fmt;

use crate::geom::Point;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight compass steps between neighbouring grid cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Every direction in fixed expansion order, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Grid step for this direction (`x` = column, `y` = row).
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Direction::North => Point::new(0, 1),
            Direction::NorthEast => Point::new(1, 1),
            Direction::East => Point::new(1, 0),
            Direction::SouthEast => Point::new(1, -1),
            Direction::South => Point::new(0, -1),
            Direction::SouthWest => Point::new(-1, -1),
            Direction::West => Point::new(-1, 0),
            Direction::NorthWest => Point::new(-1, 1),
        }
    }

    /// The direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// The direction whose step is exactly `delta`, if any.
    pub fn from_offset(delta: Point) -> Option<Direction> {
        Self::ALL.into_iter().find(|d| d.offset() == delta)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// DirectionMask
// ---------------------------------------------------------------------------

/// Bitmask of traversable neighbour directions.
///
/// Bit layout: N = 0x01, NE = 0x02, E = 0x04, SE = 0x08, S = 0x10,
/// SW = 0x20, W = 0x40, NW = 0x80.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionMask(pub u8);

impl DirectionMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0xFF);

    /// Whether the bit for `dir` is set.
    #[inline]
    pub const fn has(self, dir: Direction) -> bool {
        self.0 & (1 << dir as u8) != 0
    }

    /// Set the bit for `dir`.
    #[inline]
    pub fn insert(&mut self, dir: Direction) {
        self.0 |= 1 << dir as u8;
    }

    /// Whether no direction is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Iterate the set directions in expansion order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }
}
