//! Cells in the cellular automaton.

use std::{
    fmt::{self, Display, Formatter},
    ops::Not,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Possible states of a cell.
///
/// Only [`DEAD`] and [`ALIVE`] are valid in a [`Grid`](crate::Grid).
/// The inner value is public so that callers can hand over raw values
/// read from elsewhere; writing any other value is rejected with
/// [`Error::InvalidValue`](crate::Error::InvalidValue).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State(pub u8);

/// The Dead state.
pub const DEAD: State = State(0);
/// The Alive state.
pub const ALIVE: State = State(1);

impl State {
    /// Whether the value is one of the two valid states.
    #[inline]
    pub fn is_valid(self) -> bool {
        self == DEAD || self == ALIVE
    }

    #[inline]
    pub fn is_alive(self) -> bool {
        self == ALIVE
    }
}

/// Flips the state.
impl Not for State {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        match self {
            ALIVE => DEAD,
            _ => ALIVE,
        }
    }
}

impl From<bool> for State {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive {
            ALIVE
        } else {
            DEAD
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The coordinates of a cell.
///
/// `(row, column)`, both 0-indexed. Signed, so that reads may
/// address cells outside the grid.
pub type Coord = (isize, isize);
