#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use highscore::*;
pub use random::*;
pub use slide::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod highscore;
mod random;
mod slide;
mod tile;
mod types;

/// Smallest and largest supported board dimension.
pub const MIN_SIZE: Coord = 2;
pub const MAX_SIZE: Coord = 16;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: Coord,
    pub winning_tile: Tile,
    /// Chance that a spawned tile is a 4 instead of a 2.
    pub four_probability: f64,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, winning_tile: Tile, four_probability: f64) -> Self {
        Self {
            size,
            winning_tile,
            four_probability,
        }
    }

    pub fn new(size: Coord, winning_tile: Tile, four_probability: f64) -> Self {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        let winning_tile = winning_tile
            .max(BONUS_TILE)
            .checked_next_power_of_two()
            .unwrap_or(1 << (Tile::BITS - 1));
        let four_probability = if four_probability.is_nan() {
            0.0
        } else {
            four_probability.clamp(0.0, 1.0)
        };
        Self::new_unchecked(size, winning_tile, four_probability)
    }

    /// Re-applies the bounds of [`GameConfig::new`], e.g. after deserializing.
    pub fn normalized(self) -> Self {
        Self::new(self.size, self.winning_tile, self.four_probability)
    }

    pub const fn total_cells(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(4, 2048, 0.1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    NoChange,
    Moved { gained: Score },
    Won,
    Lost,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Moved { .. } => true,
            Won => true,
            Lost => true,
        }
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
