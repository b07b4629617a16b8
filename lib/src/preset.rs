//! Well-known small patterns.

use crate::{
    cells::Coord,
    grid::Grid,
    pattern::{Format, Pattern},
};
use educe::Educe;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Well-known small patterns.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Preset {
    /// The smallest spaceship, period 4.
    #[educe(Default)]
    Glider,
    /// Period 2 oscillator.
    Blinker,
    /// Period 2 oscillator.
    Toad,
    /// Period 2 oscillator.
    Beacon,
    /// Period 3 oscillator.
    Pulsar,
    /// The most common still life.
    Block,
}

const GLIDER: &[Coord] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
const BLINKER: &[Coord] = &[(0, 0), (0, 1), (0, 2)];
const TOAD: &[Coord] = &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)];
const BEACON: &[Coord] = &[(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (3, 3)];
const BLOCK: &[Coord] = &[(0, 0), (0, 1), (1, 0), (1, 1)];
const PULSAR: &[Coord] = &[
    (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
    (2, 0), (2, 5), (2, 7), (2, 12),
    (3, 0), (3, 5), (3, 7), (3, 12),
    (4, 0), (4, 5), (4, 7), (4, 12),
    (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
    (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
    (8, 0), (8, 5), (8, 7), (8, 12),
    (9, 0), (9, 5), (9, 7), (9, 12),
    (10, 0), (10, 5), (10, 7), (10, 12),
    (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
];

impl Preset {
    /// All presets.
    pub const ALL: [Preset; 6] = [
        Preset::Glider,
        Preset::Blinker,
        Preset::Toad,
        Preset::Beacon,
        Preset::Pulsar,
        Preset::Block,
    ];

    /// Coordinates of living cells, relative to the top-left corner.
    pub fn cells(self) -> &'static [Coord] {
        match self {
            Preset::Glider => GLIDER,
            Preset::Blinker => BLINKER,
            Preset::Toad => TOAD,
            Preset::Beacon => BEACON,
            Preset::Pulsar => PULSAR,
            Preset::Block => BLOCK,
        }
    }

    /// The preset as a [`Pattern`].
    pub fn pattern(self) -> Pattern {
        Pattern {
            name: Some(self.to_string()),
            comments: Vec::new(),
            cells: self.cells().to_vec(),
            format: Format::Coordinates,
        }
    }

    /// Puts the preset on a grid, with its top-left corner at the center.
    ///
    /// Cells that fall outside the grid are skipped.
    /// Returns the number of skipped cells.
    pub fn place(self, grid: &mut Grid) -> usize {
        let (row, col) = ((grid.height() / 2) as isize, (grid.width() / 2) as isize);
        grid.load_pattern(&self.pattern(), row, col)
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "glider" => Ok(Preset::Glider),
            "blinker" => Ok(Preset::Blinker),
            "toad" => Ok(Preset::Toad),
            "beacon" => Ok(Preset::Beacon),
            "pulsar" => Ok(Preset::Pulsar),
            "block" => Ok(Preset::Block),
            _ => Err(format!("unknown preset: {}", s)),
        }
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Preset::Glider => "glider",
            Preset::Blinker => "blinker",
            Preset::Toad => "toad",
            Preset::Beacon => "beacon",
            Preset::Pulsar => "pulsar",
            Preset::Block => "block",
        };
        write!(f, "{}", s)
    }
}
