use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::*;

/// Source of uniform floats in `[0, 1)` used for tile placement.
pub trait RandomSource {
    fn next_float(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_float(&mut self) -> f64 {
        (**self).next_float()
    }
}

/// Pseudo-random source seeded from a `u64`, reproducible across runs.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_float(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed sequence of rolls, starting over once exhausted.
///
/// Rolls outside `[0, 1)` are clamped into it. An empty script always rolls 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedRandom {
    rolls: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of rolls handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_float(&mut self) -> f64 {
        if self.rolls.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Places one fresh tile on a uniformly chosen empty cell.
///
/// The first roll picks the cell, the second picks 2 or 4. A full board is
/// left alone and consumes no rolls.
pub fn spawn_tile(
    board: &mut Board,
    rng: &mut impl RandomSource,
    four_probability: f64,
) -> Option<(Coord2, Tile)> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let pick = (rng.next_float() * empty.len() as f64) as usize;
    let coords = empty[pick.min(empty.len() - 1)];
    let value = spawn_value(rng.next_float(), four_probability);

    board.set(coords, value);
    log::debug!("Spawned {} at {:?}", value, coords);
    Some((coords, value))
}
