use serde::{Deserialize, Serialize};
use torri_core::{Coord, Coord2};

/// Quarter-turn view rotation applied to logical board coordinates.
///
/// The four values form a cyclic group of order 4: composing [`apply`]
/// four single turns in a row is the identity.
///
/// [`apply`]: Self::apply
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const fn index(self) -> u8 {
        match self {
            Self::R0 => 0,
            Self::R90 => 1,
            Self::R180 => 2,
            Self::R270 => 3,
        }
    }

    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::R0,
            1 => Self::R90,
            2 => Self::R180,
            _ => Self::R270,
        }
    }

    /// Advance one quarter turn.
    pub const fn turn(self) -> Self {
        match self {
            Self::R0 => Self::R90,
            Self::R90 => Self::R180,
            Self::R180 => Self::R270,
            Self::R270 => Self::R0,
        }
    }

    /// The rotation mapping display coordinates back to logical ones.
    pub const fn inverse(self) -> Self {
        match self {
            Self::R0 => Self::R0,
            Self::R90 => Self::R270,
            Self::R180 => Self::R180,
            Self::R270 => Self::R90,
        }
    }

    /// Map logical `(column, row)` coordinates to display coordinates on a
    /// square grid with edge length `grid`.
    ///
    /// Both coordinates must be below `grid`; the transform is a bijection
    /// on the square `[0, grid) x [0, grid)`.
    pub const fn apply(self, (x, y): Coord2, grid: Coord) -> Coord2 {
        match self {
            Self::R0 => (x, y),
            Self::R90 => (y, grid - x - 1),
            Self::R180 => (grid - x - 1, grid - y - 1),
            Self::R270 => (grid - y - 1, x),
        }
    }
}
