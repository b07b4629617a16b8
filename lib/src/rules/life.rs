//! Totalistic Life-like rules.

use crate::{
    cells::{State, ALIVE, DEAD},
    error::Error,
    grid::Grid,
    rules::Rule,
};
use ca_rules::ParseLife;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Totalistic Life-like rules.
///
/// Whether a cell is alive in the next generation depends only on
/// its own state and the number of living cells among its eight neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LifeLike {
    /// `birth[n]`: whether a dead cell with `n` living neighbors is born.
    birth: [bool; 9],
    /// `survival[n]`: whether a living cell with `n` living neighbors survives.
    survival: [bool; 9],
}

impl LifeLike {
    /// Constructs a new rule from the neighbor counts for birth and survival.
    ///
    /// Counts above 8 never occur and are ignored.
    pub fn new(birth: &[u8], survival: &[u8]) -> Self {
        let mut rule = LifeLike {
            birth: [false; 9],
            survival: [false; 9],
        };
        for &n in birth.iter().filter(|&&n| n <= 8) {
            rule.birth[n as usize] = true;
        }
        for &n in survival.iter().filter(|&&n| n <= 8) {
            rule.survival[n as usize] = true;
        }
        rule
    }

    /// Conway's Game of Life, `B3/S23`.
    pub fn standard() -> Self {
        LifeLike::new(&[3], &[2, 3])
    }

    /// HighLife, `B36/S23`.
    pub fn high_life() -> Self {
        LifeLike::new(&[3, 6], &[2, 3])
    }

    /// Day & Night, `B3678/S34678`.
    pub fn day_and_night() -> Self {
        LifeLike::new(&[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    /// The state of a cell in the next generation.
    #[inline]
    pub fn next_state(&self, state: State, alive_neighbors: usize) -> State {
        let table = if state == ALIVE {
            &self.survival
        } else {
            &self.birth
        };
        match table.get(alive_neighbors) {
            Some(true) => ALIVE,
            _ => DEAD,
        }
    }
}

impl Rule for LifeLike {
    fn evolve(&self, grid: &Grid) -> Grid {
        let width = grid.width();
        let mut next = grid.next_generation();
        for (i, cell) in next.cells_mut().iter_mut().enumerate() {
            let (row, col) = ((i / width) as isize, (i % width) as isize);
            *cell = self.next_state(grid.get(row, col), grid.count_live_neighbors(row, col));
        }
        next
    }
}

impl ParseLife for LifeLike {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        Self::new(&b, &s)
    }
}

impl FromStr for LifeLike {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rule: LifeLike = ParseLife::parse_rule(input).map_err(Error::ParseRuleError)?;
        Ok(rule)
    }
}

/// Displays the rule string in `B/S` notation, e.g. `B3/S23`.
impl Display for LifeLike {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let digits = |table: &[bool; 9]| -> String {
            (0..=8)
                .filter(|&n| table[n])
                .map(|n| char::from(b'0' + n as u8))
                .collect()
        };
        write!(f, "B{}/S{}", digits(&self.birth), digits(&self.survival))
    }
}
