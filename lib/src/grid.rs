//! The grid.

use crate::{
    cells::{Coord, State, ALIVE, DEAD},
    error::Error,
    pattern::Pattern,
};
use log::{debug, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fmt::{self, Display, Formatter};

/// Largest allowed width or height.
pub const MAX_DIMENSION: isize = 1000;

/// Offsets of the eight cells in the Moore neighborhood.
const NBHD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A fixed-size rectangular grid of cells.
///
/// Cells outside the grid are always considered [`DEAD`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Cell states in row-major order.
    ///
    /// The length is always `width * height`.
    cells: Vec<State>,

    /// Number of rule applications that led to this grid.
    generation: usize,
}

impl Grid {
    /// Creates an empty grid with all cells [`DEAD`] at generation 0.
    ///
    /// Both dimensions must be in `1..=1000`.
    pub fn new(width: isize, height: isize) -> Result<Self, Error> {
        if width <= 0 || height <= 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::DimensionError { width, height });
        }
        debug!("Created grid: {}x{}", width, height);
        let (width, height) = (width as usize, height as usize);
        Ok(Grid {
            width,
            height,
            cells: vec![DEAD; width * height],
            generation: 0,
        })
    }

    /// An all-dead grid with the same dimensions, one generation later.
    ///
    /// This is the starting point for a rule building its output.
    pub fn next_generation(&self) -> Self {
        Grid {
            width: self.width,
            height: self.height,
            cells: vec![DEAD; self.cells.len()],
            generation: self.generation + 1,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// `width * height`.
    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// All cells in row-major order, for rules to fill in their output.
    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [State] {
        &mut self.cells
    }

    /// Index into `cells`, or `None` if the cell is outside the grid.
    #[inline]
    fn index(&self, (row, col): Coord) -> Option<usize> {
        if row >= 0 && col >= 0 && (row as usize) < self.height && (col as usize) < self.width {
            Some(row as usize * self.width + col as usize)
        } else {
            None
        }
    }

    /// Sets the state of a cell.
    pub fn set(&mut self, row: isize, col: isize, state: State) -> Result<(), Error> {
        let index = self.index((row, col)).ok_or(Error::OutOfBounds((row, col)))?;
        if !state.is_valid() {
            return Err(Error::InvalidValue(state));
        }
        self.cells[index] = state;
        Ok(())
    }

    /// Gets the state of a cell. Cells outside the grid are [`DEAD`].
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> State {
        self.index((row, col)).map_or(DEAD, |i| self.cells[i])
    }

    /// Number of living cells in the Moore neighborhood of a cell,
    /// not counting the cell itself.
    ///
    /// Neighbors whose coordinates overflow `isize` count as dead.
    pub fn count_live_neighbors(&self, row: isize, col: isize) -> usize {
        NBHD.iter()
            .filter(|&&(dr, dc)| {
                row.checked_add(dr)
                    .zip(col.checked_add(dc))
                    .map_or(false, |(r, c)| self.get(r, c) == ALIVE)
            })
            .count()
    }

    /// Number of living cells in the grid.
    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|&&state| state == ALIVE).count()
    }

    /// Kills all cells and resets the generation to 0.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|state| *state = DEAD);
        self.generation = 0;
    }

    /// An independent deep copy of the grid, at the same generation.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Whether two grids have the same dimensions and the same cells.
    ///
    /// Unlike `==`, the generation is ignored.
    pub fn same_cells(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }

    /// Coordinates of all living cells, in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &state)| state == ALIVE)
            .map(move |(i, _)| ((i / width) as isize, (i % width) as isize))
    }

    /// Renders the grid row by row.
    ///
    /// Each call returns a fresh iterator over the current rows.
    pub fn render<'a>(&'a self, alive: &'a str, dead: &'a str) -> impl Iterator<Item = String> + 'a {
        self.cells.chunks(self.width).map(move |row| {
            row.iter()
                .map(|&state| if state == ALIVE { alive } else { dead })
                .collect()
        })
    }

    /// Marks the cells of a pattern alive, shifted by the given offset.
    ///
    /// Cells that fall outside the grid are skipped.
    /// Returns the number of skipped cells.
    pub fn load_pattern(&mut self, pattern: &Pattern, offset_row: isize, offset_col: isize) -> usize {
        let mut skipped = 0;
        for &(row, col) in &pattern.cells {
            let coord = row.checked_add(offset_row).zip(col.checked_add(offset_col));
            match coord.and_then(|coord| self.index(coord)) {
                Some(i) => self.cells[i] = ALIVE,
                None => {
                    warn!(
                        "Cell ({}, {}) from pattern out of bounds at offset ({}, {})",
                        row, col, offset_row, offset_col
                    );
                    skipped += 1;
                }
            }
        }
        debug!(
            "Loaded {} cells at offset ({}, {})",
            pattern.cells.len() - skipped,
            offset_row,
            offset_col
        );
        skipped
    }

    /// Fills every cell at random, each alive with probability `density`.
    ///
    /// The same seed always gives the same grid. The generation is unchanged.
    pub fn randomize(&mut self, density: f64, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for state in self.cells.iter_mut() {
            *state = State::from(rng.gen::<f64>() < density);
        }
    }
}

/// Displays the grid in [Plaintext](https://conwaylife.com/wiki/Plaintext)
/// style: `O` for living cells, `.` for dead cells.
impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, row) in self.render("O", ".").enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}
