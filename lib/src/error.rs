//! All kinds of errors in this crate.

use crate::cells::{Coord, State};
use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Width and height should be in 1..=1000, got {width}x{height}.
    DimensionError { width: isize, height: isize },
    /// Cell {0:?} is out of bounds.
    OutOfBounds(Coord),
    /// Cell value must be 0 or 1, got {0}.
    InvalidValue(State),
    /// Requested {requested} generations, which exceeds the maximum {max}.
    OverflowError { requested: usize, max: usize },
    /// Rule '{name}' not found. Available: {known:?}.
    RuleNotFound { name: String, known: Vec<String> },
    /// Invalid rule string: {0:?}.
    ParseRuleError(#[from] ParseRuleError),
    /// Unable to parse pattern: {0}.
    PatternParseError(String),
    /// Unable to access pattern file {path}: {message}.
    FileHandlingError { path: String, message: String },
}
