//! Move resolution.
//!
//! Every direction is reduced to sliding rows toward index 0: the grid is
//! transposed and/or mirrored into that orientation, each row goes through
//! [`slide_row`], and the inverse transforms are applied in reverse order.

use alloc::vec::Vec;
use ndarray::{Array2, s};

use crate::*;

/// Slides one row toward index 0, merging each adjacent equal pair once.
///
/// Returns the new row, padded with zeros to the input length, and the score
/// gained from merges. A freshly merged tile never merges again in the same
/// pass, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]` rather than `[8, 0, 0, 0]`.
pub fn slide_row(row: &[Tile]) -> (Vec<Tile>, Score) {
    let mut tiles: Vec<Tile> = row.iter().copied().filter(|&value| value != 0).collect();
    let mut gained: Score = 0;

    for i in 1..tiles.len() {
        if can_merge(tiles[i - 1], tiles[i]) {
            tiles[i - 1] *= 2;
            tiles[i] = 0;
            gained += Score::from(tiles[i - 1]);
        }
    }

    tiles.retain(|&value| value != 0);
    tiles.resize(row.len(), 0);
    (tiles, gained)
}

pub fn transpose(cells: &Array2<Tile>) -> Array2<Tile> {
    cells.t().to_owned()
}

/// Mirrors every row left to right.
pub fn reverse_rows(cells: &Array2<Tile>) -> Array2<Tile> {
    cells.slice(s![.., ..;-1]).to_owned()
}

/// Applies [`slide_row`] to every row of `cells`.
pub fn slide_rows_left(cells: &Array2<Tile>) -> (Array2<Tile>, Score) {
    let dim = cells.dim();
    let mut flat = Vec::with_capacity(cells.len());
    let mut gained = 0;

    for row in cells.rows() {
        let (slid, row_gain) = slide_row(&row.to_vec());
        flat.extend(slid);
        gained += row_gain;
    }

    let slid = Array2::from_shape_vec(dim, flat).expect("slide_row should preserve row length");
    (slid, gained)
}

/// Result of sliding a board, before any tile is spawned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    pub board: Board,
    pub gained: Score,
    pub merges: usize,
}

impl Board {
    /// Computes the board a move in `direction` would produce.
    ///
    /// Pure: `self` is left untouched and no tile is spawned.
    pub fn slide(&self, direction: Direction) -> Slide {
        let mut cells = self.cells().clone();
        if direction.is_vertical() {
            cells = transpose(&cells);
        }
        if direction.is_reversed() {
            cells = reverse_rows(&cells);
        }

        let (mut cells, gained) = slide_rows_left(&cells);

        if direction.is_reversed() {
            cells = reverse_rows(&cells);
        }
        if direction.is_vertical() {
            cells = transpose(&cells);
        }

        let board = Board::from_cells_unchecked(cells);
        let merges = self.tile_count() - board.tile_count();
        Slide {
            board,
            gained,
            merges,
        }
    }

    /// Whether a move in `direction` would change any cell.
    pub fn can_slide(&self, direction: Direction) -> bool {
        self.slide(direction).board != *self
    }
}
