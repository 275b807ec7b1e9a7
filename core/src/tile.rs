use serde::{Deserialize, Serialize};

use crate::{BoardError, Result};

/// The two player sides that can own a worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    /// Wire code of the team field; vacant tiles carry 0.
    pub(crate) const fn code(team: Option<Self>) -> u8 {
        match team {
            None => 0,
            Some(Self::A) => 1,
            Some(Self::B) => 2,
        }
    }

    pub(crate) const fn from_code(code: u8) -> Result<Option<Self>> {
        match code {
            0 => Ok(None),
            1 => Ok(Some(Self::A)),
            2 => Ok(Some(Self::B)),
            _ => Err(BoardError::BadTeam(code)),
        }
    }
}

/// One board cell: building stack height plus the worker standing on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    height: u8,
    worker: Option<Team>,
}

impl Tile {
    /// A tower at this height is capped and renders a dome instead of
    /// another block.
    pub const MAX_HEIGHT: u8 = 4;

    pub const fn new(height: u8, worker: Option<Team>) -> Result<Self> {
        if height > Self::MAX_HEIGHT {
            return Err(BoardError::BadHeight(height));
        }
        Ok(Self { height, worker })
    }

    pub const fn height(self) -> u8 {
        self.height
    }

    pub const fn worker(self) -> Option<Team> {
        self.worker
    }

    pub const fn has_worker(self) -> bool {
        self.worker.is_some()
    }

    pub const fn is_capped(self) -> bool {
        self.height == Self::MAX_HEIGHT
    }

    /// Packed wire representation: `(team << 3) | height`.
    pub(crate) const fn code(self) -> u8 {
        (Team::code(self.worker) << 3) | self.height
    }

    pub(crate) const fn from_code(code: u8) -> Result<Self> {
        let height = code & 0x7;
        if height > Self::MAX_HEIGHT {
            return Err(BoardError::BadHeight(height));
        }
        match Team::from_code(code >> 3) {
            Ok(worker) => Ok(Self { height, worker }),
            Err(err) => Err(err),
        }
    }
}
