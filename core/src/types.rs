use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board dimension and positions.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Cell value: 0 for an empty cell, otherwise a power of two.
pub type Tile = u32;

/// Score and high-score accumulator.
pub type Score = u64;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Slides along columns rather than rows.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// Slides toward the far edge, so rows are reversed around the slide.
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Right | Self::Down)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Parses the names drivers usually hand over: `left`, `ArrowLeft`, `h`, ...
    pub fn parse(name: &str) -> Option<Self> {
        use Direction::*;
        let name = name.trim();
        let name = name.strip_prefix("Arrow").unwrap_or(name);
        [
            (Left, "left", "h"),
            (Right, "right", "l"),
            (Up, "up", "k"),
            (Down, "down", "j"),
        ]
        .into_iter()
        .find(|(_, long, short)| name.eq_ignore_ascii_case(long) || name == *short)
        .map(|(direction, _, _)| direction)
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
