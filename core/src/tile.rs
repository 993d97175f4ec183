use crate::*;

/// Value every fresh tile starts from.
pub const BASE_TILE: Tile = 2;

/// Value of the rarer fresh tile.
pub const BONUS_TILE: Tile = 4;

/// Largest power of two a cell can hold. Two of these never merge.
pub const MAX_TILE: Tile = 1 << (Tile::BITS - 1);

/// Whether `value` may sit in a cell: empty, or a power of two of at least 2.
pub const fn is_valid_cell(value: Tile) -> bool {
    value == 0 || is_tile(value)
}

/// Whether `value` is an occupied tile.
pub const fn is_tile(value: Tile) -> bool {
    value >= BASE_TILE && value.is_power_of_two()
}

/// Whether two adjacent cells combine into one tile of double value.
pub const fn can_merge(left: Tile, right: Tile) -> bool {
    left == right && is_tile(left) && left < MAX_TILE
}

/// Picks the value of a freshly spawned tile from a uniform `roll` in `[0, 1)`.
pub fn spawn_value(roll: f64, four_probability: f64) -> Tile {
    if roll < 1.0 - four_probability {
        BASE_TILE
    } else {
        BONUS_TILE
    }
}
