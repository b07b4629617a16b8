//! Running a grid under a rule.

use crate::{
    error::Error,
    grid::Grid,
    registry::RuleRegistry,
    rules::{LifeLike, Rule},
};
use log::{debug, info};
use std::{
    collections::VecDeque,
    fmt::{self, Debug, Display, Formatter},
    mem,
    sync::Arc,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The most generations a single [`Simulator::run`] may ask for,
/// and the default limit of [`Simulator::run_until_stable`].
pub const MAX_GENERATIONS: usize = 10000;

/// How many past generations [`Simulator::run_until_stable`] remembers
/// when looking for oscillators.
pub const OSCILLATION_WINDOW: usize = 100;

/// How a [`Simulator::run_until_stable`] call ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stability {
    /// No living cells are left.
    Extinction,
    /// The last generation is identical to the one before.
    StillLife,
    /// The last generation repeats an earlier one.
    ///
    /// The period is counted in checked generations,
    /// which are all generations when the check period is 1.
    Oscillator(usize),
    /// None of the above within the generation limit.
    MaxGenerationsReached,
}

impl Display for Stability {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Stability::Extinction => write!(f, "extinction"),
            Stability::StillLife => write!(f, "still_life"),
            Stability::Oscillator(period) => write!(f, "oscillator_period_{}", period),
            Stability::MaxGenerationsReached => write!(f, "max_generations_reached"),
        }
    }
}

/// A snapshot of the simulation statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statistics {
    pub generation: usize,
    pub alive_cells: usize,
    pub dead_cells: usize,
    /// Fraction of living cells, between 0 and 1.
    pub density: f64,
    /// Name of the active rule.
    pub rule: String,
    /// `WxH`.
    pub board_size: String,
}

impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "generation: {}", self.generation)?;
        writeln!(f, "alive_cells: {}", self.alive_cells)?;
        writeln!(f, "dead_cells: {}", self.dead_cells)?;
        writeln!(f, "density: {:.4}", self.density)?;
        writeln!(f, "rule: {}", self.rule)?;
        write!(f, "board_size: {}", self.board_size)
    }
}

/// Owns a grid and evolves it under one rule.
///
/// Every operation either completes or fails before touching the grid;
/// callers never observe a half-evolved generation.
pub struct Simulator {
    /// The current generation.
    grid: Grid,

    /// Name the active rule was looked up by.
    rule_name: String,

    /// The active rule.
    rule: Arc<dyn Rule>,

    /// Snapshots recorded by [`run_with`](Self::run_with).
    history: Vec<Grid>,
}

impl Simulator {
    /// Creates a simulator, looking the rule up by name.
    pub fn new(grid: Grid, registry: &RuleRegistry, rule_name: &str) -> Result<Self, Error> {
        let rule = registry.get(rule_name)?;
        Ok(Simulator::with_rule(grid, rule_name, rule))
    }

    /// Creates a simulator with Conway's Game of Life,
    /// registered as `standard`.
    pub fn standard(grid: Grid) -> Self {
        Simulator::with_rule(grid, "standard", Arc::new(LifeLike::standard()))
    }

    /// Creates a simulator with a rule that is not taken from a registry.
    pub fn with_rule<S: Into<String>>(grid: Grid, rule_name: S, rule: Arc<dyn Rule>) -> Self {
        let rule_name = rule_name.into();
        debug!("Initialized simulator with {} rules", rule_name);
        Simulator {
            grid,
            rule_name,
            rule,
            history: Vec::new(),
        }
    }

    /// Switches to another rule. The grid and the history are kept.
    pub fn set_rule(&mut self, registry: &RuleRegistry, rule_name: &str) -> Result<(), Error> {
        self.rule = registry.get(rule_name)?;
        self.rule_name = rule_name.to_string();
        debug!("Changed to {} rules", rule_name);
        Ok(())
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn rule_name(&self) -> &str {
        &self.rule_name
    }

    /// Snapshots recorded by the last [`run_with`](Self::run_with)
    /// with `record_history` set.
    #[inline]
    pub fn history(&self) -> &[Grid] {
        &self.history
    }

    /// Replaces the grid with its successor and returns the old grid.
    fn advance(&mut self) -> Grid {
        let next = self.rule.evolve(&self.grid);
        debug_assert_eq!(
            (next.width(), next.height()),
            (self.grid.width(), self.grid.height())
        );
        mem::replace(&mut self.grid, next)
    }

    /// Applies the rule once and returns the new grid.
    pub fn step(&mut self) -> &Grid {
        self.advance();
        &self.grid
    }

    /// Applies the rule `generations` times, stopping early if
    /// all cells die.
    pub fn run(&mut self, generations: usize) -> Result<&Grid, Error> {
        self.run_with(generations, false, |_, _| ())
    }

    /// Applies the rule `generations` times, stopping early if
    /// all cells die.
    ///
    /// After each step, `on_generation` is called with the new grid and
    /// the number of steps taken so far (starting from 1); the next step
    /// waits until it returns. Then, if `record_history` is set, a copy of
    /// the grid is appended to the history. The history is restarted with
    /// a copy of the initial grid at the beginning of such a run.
    ///
    /// Fails with [`Error::OverflowError`] if `generations` exceeds
    /// [`MAX_GENERATIONS`], without stepping at all.
    pub fn run_with<F>(
        &mut self,
        generations: usize,
        record_history: bool,
        mut on_generation: F,
    ) -> Result<&Grid, Error>
    where
        F: FnMut(&Grid, usize),
    {
        if generations > MAX_GENERATIONS {
            return Err(Error::OverflowError {
                requested: generations,
                max: MAX_GENERATIONS,
            });
        }
        debug!("Running simulation for {} generations", generations);

        if record_history {
            self.history.clear();
            self.history.push(self.grid.copy());
        }

        for steps in 1..=generations {
            self.advance();
            on_generation(&self.grid, steps);
            if record_history {
                self.history.push(self.grid.copy());
            }
            if self.grid.count_alive() == 0 {
                info!(
                    "Simulation ended at generation {} (extinction)",
                    self.grid.generation()
                );
                break;
            }
        }

        debug!("Simulation completed at generation {}", self.grid.generation());
        Ok(&self.grid)
    }

    /// Steps until the pattern dies out, stops changing, or repeats itself.
    ///
    /// After each step, checks in this order:
    ///
    /// 1. no living cells: [`Stability::Extinction`];
    /// 2. identical to the previous generation: [`Stability::StillLife`];
    /// 3. only on steps whose 0-based index is a multiple of `check_period`:
    ///    identical to one of the last [`OSCILLATION_WINDOW`] checked
    ///    generations: [`Stability::Oscillator`].
    ///
    /// Gives up with [`Stability::MaxGenerationsReached`] after
    /// `max_generations` steps ([`MAX_GENERATIONS`] if `None`).
    /// A `check_period` of 0 is treated as 1.
    pub fn run_until_stable(
        &mut self,
        max_generations: Option<usize>,
        check_period: usize,
    ) -> (&Grid, Stability) {
        let max_generations = max_generations.unwrap_or(MAX_GENERATIONS);
        let check_period = check_period.max(1);
        let mut window: VecDeque<Grid> = VecDeque::with_capacity(OSCILLATION_WINDOW + 1);

        for index in 0..max_generations {
            let prev = self.advance();

            if self.grid.count_alive() == 0 {
                info!("Extinction at generation {}", self.grid.generation());
                return (&self.grid, Stability::Extinction);
            }

            if self.grid.same_cells(&prev) {
                info!("Still life at generation {}", self.grid.generation());
                return (&self.grid, Stability::StillLife);
            }

            if index % check_period == 0 {
                let grid = &self.grid;
                if let Some(i) = window.iter().position(|past| past.same_cells(grid)) {
                    let period = window.len() - i;
                    info!("Detected oscillator with period {}", period);
                    return (&self.grid, Stability::Oscillator(period));
                }
                window.push_back(self.grid.copy());
                if window.len() > OSCILLATION_WINDOW {
                    window.pop_front();
                }
            }
        }

        debug!("No stable state within {} generations", max_generations);
        (&self.grid, Stability::MaxGenerationsReached)
    }

    /// Clears the history, and replaces the grid if a new one is given.
    pub fn reset(&mut self, grid: Option<Grid>) {
        if let Some(grid) = grid {
            self.grid = grid;
        }
        self.history.clear();
        debug!("Simulator reset");
    }

    /// Computes the statistics of the current grid.
    pub fn statistics(&self) -> Statistics {
        let alive_cells = self.grid.count_alive();
        let size = self.grid.size();
        Statistics {
            generation: self.grid.generation(),
            alive_cells,
            dead_cells: size - alive_cells,
            density: alive_cells as f64 / size as f64,
            rule: self.rule_name.clone(),
            board_size: format!("{}x{}", self.grid.width(), self.grid.height()),
        }
    }
}

impl Debug for Simulator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("rule_name", &self.rule_name)
            .field("generation", &self.grid.generation())
            .field("history", &self.history.len())
            .finish()
    }
}
