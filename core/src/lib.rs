#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use codec::*;
pub use error::*;
pub use tile::*;
pub use types::*;

mod codec;
mod error;
mod tile;
mod types;

/// Full board snapshot: one [`Tile`] per cell, stored row-major.
///
/// A board is replaced wholesale whenever a new state string is decoded;
/// nothing mutates cells behind the wire format's back except the explicit
/// [`set_tile`](Self::set_tile) setup path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    tiles: Array2<Tile>,
}

impl BoardState {
    /// Smallest playable board edge the wire format can express.
    pub const MIN_WIDTH: Coord = 3;
    /// Largest board edge the wire format can express.
    pub const MAX_WIDTH: Coord = 29;

    /// A board of the given dimensions with no buildings and no workers.
    pub fn empty(width: Coord, height: Coord) -> Result<Self> {
        check_dims(width, height)?;
        Ok(Self {
            tiles: Array2::default((usize::from(height), usize::from(width))),
        })
    }

    /// The standard 5x5 two-player opening.
    pub fn standard() -> Self {
        codec::decode(DEFAULT_OPENING).expect("default opening should decode")
    }

    /// Build a board from row-major cells, as produced by the codec.
    pub fn from_rows(width: Coord, height: Coord, cells: Vec<Tile>) -> Result<Self> {
        check_dims(width, height)?;
        let tiles = Array2::from_shape_vec((usize::from(height), usize::from(width)), cells)
            .map_err(|_| BoardError::Shape)?;
        Ok(Self { tiles })
    }

    pub fn width(&self) -> Coord {
        self.tiles.ncols() as Coord
    }

    pub fn height(&self) -> Coord {
        self.tiles.nrows() as Coord
    }

    /// Board dimensions as `(width, height)`.
    pub fn size(&self) -> Coord2 {
        (self.width(), self.height())
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    /// Rotation is only exact on square boards.
    pub fn is_square(&self) -> bool {
        self.width() == self.height()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(coords)
        } else {
            Err(BoardError::OutOfBounds)
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        self.tiles[coords.to_nd_index()]
    }

    /// Bounds-checked single-tile write, for setting up layouts without
    /// going through a state string.
    pub fn set_tile(&mut self, coords: Coord2, tile: Tile) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.tiles[coords.to_nd_index()] = tile;
        Ok(())
    }

    /// Row-major traversal of every cell with its `(column, row)` coords.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), &tile)| ((col as Coord, row as Coord), tile))
    }

    /// Coordinates of every worker fielded by `team`, in row-major order.
    pub fn workers(&self, team: Team) -> impl Iterator<Item = Coord2> + '_ {
        self.iter()
            .filter_map(move |(coords, tile)| (tile.worker() == Some(team)).then_some(coords))
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_dims(width: Coord, height: Coord) -> Result<()> {
    if (BoardState::MIN_WIDTH..=BoardState::MAX_WIDTH).contains(&width) && height >= 1 {
        Ok(())
    } else {
        Err(BoardError::Dimensions)
    }
}
