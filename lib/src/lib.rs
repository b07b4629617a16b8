//! A Game of Life simulator on a fixed-size grid.
//!
//! A [`Grid`] is evolved by a [`Rule`](rules::Rule) looked up by name in a
//! [`RuleRegistry`]; a [`Simulator`] drives the evolution, detects
//! extinction, still lifes and oscillators, and reports [`Statistics`].
//! The [`pattern`] module reads and writes pattern files.

mod cells;
mod config;
mod error;
mod grid;
pub mod pattern;
mod preset;
mod registry;
pub mod rules;
mod simulator;

pub use cells::{Coord, State, ALIVE, DEAD};
pub use config::{Config, RandomFill};
pub use error::Error;
pub use grid::{Grid, MAX_DIMENSION};
pub use pattern::{Format, Pattern};
pub use preset::Preset;
pub use registry::{RuleRegistry, BUILTIN_RULES};
pub use simulator::{Simulator, Stability, Statistics, MAX_GENERATIONS, OSCILLATION_WINDOW};
