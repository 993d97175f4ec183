use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of tiles, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Tile>,
}

impl Board {
    pub fn empty(size: Coord) -> Self {
        let size = usize::from(size);
        Self {
            cells: Array2::zeros((size, size)),
        }
    }

    /// Builds a board from row slices, rejecting ragged or non-square input
    /// and cells that are neither empty nor a power of two.
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        if size == 0 || size > usize::from(Coord::MAX) {
            return Err(BoardDefect::RowCount {
                expected: size.clamp(1, usize::from(Coord::MAX)),
                found: size,
            }
            .into());
        }

        let mut flat = Vec::with_capacity(size * size);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != size {
                return Err(BoardDefect::RowLength {
                    row,
                    expected: size,
                    found: cells.len(),
                }
                .into());
            }
            flat.extend_from_slice(cells);
        }

        let cells = Array2::from_shape_vec((size, size), flat).map_err(|_| {
            GameError::from(BoardDefect::RowCount {
                expected: size,
                found: size,
            })
        })?;
        Self::from_cells(cells)
    }

    pub(crate) fn from_cells_unchecked(cells: Array2<Tile>) -> Self {
        Self { cells }
    }

    pub fn from_cells(cells: Array2<Tile>) -> Result<Self> {
        let board = Self { cells };
        let (rows, _) = board.cells.dim();
        board.validate(rows.try_into().unwrap_or(Coord::MAX))?;
        Ok(board)
    }

    /// Checks the board is `size`×`size` and that every cell holds a legal value.
    pub fn validate(&self, size: Coord) -> Result<()> {
        let expected = usize::from(size);
        let (rows, cols) = self.cells.dim();
        if rows != expected {
            return Err(BoardDefect::RowCount {
                expected,
                found: rows,
            }
            .into());
        }
        if cols != expected {
            return Err(BoardDefect::RowLength {
                row: 0,
                expected,
                found: cols,
            }
            .into());
        }

        match self.coords().find(|&coords| !is_valid_cell(self[coords])) {
            Some(coords) => Err(BoardDefect::BadTile {
                coords,
                value: self[coords],
            }
            .into()),
            None => Ok(()),
        }
    }

    pub fn size(&self) -> Coord {
        let (rows, _) = self.cells.dim();
        rows.try_into().unwrap_or(Coord::MAX)
    }

    pub fn cells(&self) -> &Array2<Tile> {
        &self.cells
    }

    pub fn into_cells(self) -> Array2<Tile> {
        self.cells
    }

    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    pub(crate) fn set(&mut self, coords: Coord2, value: Tile) {
        self.cells[coords.to_nd_index()] = value;
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size();
        (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
    }

    pub fn empty_cells(&self) -> Vec<Coord2> {
        self.coords().filter(|&coords| self[coords] == 0).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&value| value != 0)
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value != 0).count()
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn has_tile(&self, value: Tile) -> bool {
        self.cells.iter().any(|&cell| cell == value)
    }

    /// Whether the winning tile has been reached.
    pub fn has_winning_tile(&self, target: Tile) -> bool {
        self.has_tile(target)
    }

    /// Whether some tile could merge with its right or lower neighbour.
    pub fn has_adjacent_pair(&self) -> bool {
        let across = self
            .cells
            .rows()
            .into_iter()
            .any(|row| row.windows(2).into_iter().any(|pair| can_merge(pair[0], pair[1])));
        let down = self
            .cells
            .columns()
            .into_iter()
            .any(|col| col.windows(2).into_iter().any(|pair| can_merge(pair[0], pair[1])));
        across || down
    }

    /// Full with no merge available in any direction.
    pub fn is_stuck(&self) -> bool {
        self.is_full() && !self.has_adjacent_pair()
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = decimal_width(self.max_tile());
        for row in self.cells.rows() {
            for (col, &value) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                if value == 0 {
                    write!(f, "{:>width$}", ".")?;
                } else {
                    write!(f, "{value:>width$}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn decimal_width(mut value: Tile) -> usize {
    let mut width = 1;
    while value >= 10 {
        value /= 10;
        width += 1;
    }
    width
}
