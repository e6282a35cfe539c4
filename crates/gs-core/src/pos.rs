//! Lattice coordinates and movement directions.
//!
//! `Pos` is a signed cell coordinate so that displacements can be added
//! before the grid's topology clips or wraps the result.  Whether a `Pos` is
//! actually inside the lattice is the grid's business, not this type's.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

// ── Pos / Delta ───────────────────────────────────────────────────────────────

/// An integer cell coordinate `(x, y)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Raw (topology-unaware) displacement.
    #[inline]
    pub fn offset(self, delta: Delta) -> Pos {
        Pos::new(self.x + delta.dx, self.y + delta.dy)
    }
}

impl From<(i32, i32)> for Pos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Pos::new(x, y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A displacement between two cells.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub const ZERO: Delta = Delta { dx: 0, dy: 0 };

    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Scale both components by `n` (used for multi-cell strides).
    #[inline]
    pub fn times(self, n: i32) -> Delta {
        Delta::new(self.dx * n, self.dy * n)
    }

    /// Chebyshev length: number of Moore steps this displacement spans.
    #[inline]
    pub fn chebyshev(self) -> u32 {
        self.dx.unsigned_abs().max(self.dy.unsigned_abs())
    }
}

// ── Orientation ───────────────────────────────────────────────────────────────

/// The axis a signal controls or a vehicle travels along.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical   => "vertical",
        }
    }

    /// The perpendicular axis.
    #[inline]
    pub fn cross(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical   => Orientation::Horizontal,
        }
    }
}

impl FromStr for Orientation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            "vertical" | "v"   => Ok(Orientation::Vertical),
            other => Err(CoreError::UnknownOrientation(other.to_owned())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Heading ───────────────────────────────────────────────────────────────────

/// Direction of travel for lane-bound vehicles.
///
/// `North` is `+y`, matching the lattice convention where row 0 is the
/// bottom edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heading {
    #[default]
    East,
    West,
    North,
    South,
}

impl Heading {
    /// Unit displacement for one cell of travel.
    #[inline]
    pub fn delta(self) -> Delta {
        match self {
            Heading::East  => Delta::new(1, 0),
            Heading::West  => Delta::new(-1, 0),
            Heading::North => Delta::new(0, 1),
            Heading::South => Delta::new(0, -1),
        }
    }

    #[inline]
    pub fn orientation(self) -> Orientation {
        match self {
            Heading::East | Heading::West   => Orientation::Horizontal,
            Heading::North | Heading::South => Orientation::Vertical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::East  => "east",
            Heading::West  => "west",
            Heading::North => "north",
            Heading::South => "south",
        }
    }
}

impl FromStr for Heading {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "east" | "e" | "horizontal"  => Ok(Heading::East),
            "west" | "w"                 => Ok(Heading::West),
            "north" | "n" | "vertical"   => Ok(Heading::North),
            "south" | "s"                => Ok(Heading::South),
            other => Err(CoreError::UnknownHeading(other.to_owned())),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
