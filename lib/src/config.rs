//! Simulation configuration.

use crate::{
    error::Error,
    grid::Grid,
    pattern::PatternCache,
    preset::Preset,
    registry::RuleRegistry,
    simulator::{Simulator, MAX_GENERATIONS},
};
use educe::Educe;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fills the grid at random before anything else is placed on it.
#[derive(Clone, Copy, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RandomFill {
    /// Probability of each cell being alive.
    #[educe(Default = 0.3)]
    pub density: f64,

    /// Seed of the random number generator.
    pub seed: u64,
}

/// Simulation configuration.
///
/// The simulator will be generated from this configuration.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Width.
    #[educe(Default = 40)]
    pub width: isize,

    /// Height.
    #[educe(Default = 20)]
    pub height: isize,

    /// Name of the rule in the [`RuleRegistry`].
    #[educe(Default(expression = "String::from(\"standard\")"))]
    pub rule: String,

    /// A preset placed at the center of the grid.
    pub preset: Option<Preset>,

    /// A pattern file to load.
    pub pattern: Option<PathBuf>,

    /// Where the top-left corner of the pattern file goes, `(row, col)`.
    pub offset: (isize, isize),

    /// Only every `check_period`-th generation is compared
    /// against earlier ones when looking for oscillators.
    #[educe(Default = 1)]
    pub check_period: usize,

    /// Upper limit of generations when running until stable.
    #[educe(Default(expression = "MAX_GENERATIONS"))]
    pub max_generations: usize,

    /// How living cells are displayed.
    #[educe(Default(expression = "String::from(\"O\")"))]
    pub alive: String,

    /// How dead cells are displayed.
    #[educe(Default(expression = "String::from(\".\")"))]
    pub dead: String,

    /// Random initial cells.
    ///
    /// `None` means that the grid starts empty.
    pub random: Option<RandomFill>,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(width: isize, height: isize) -> Self {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    /// Sets the rule name.
    pub fn set_rule<S: ToString>(mut self, rule: S) -> Self {
        self.rule = rule.to_string();
        self
    }

    /// Sets the preset.
    pub fn set_preset<T: Into<Option<Preset>>>(mut self, preset: T) -> Self {
        self.preset = preset.into();
        self
    }

    /// Sets the pattern file and where to put it.
    pub fn set_pattern<T: Into<Option<PathBuf>>>(mut self, pattern: T, offset: (isize, isize)) -> Self {
        self.pattern = pattern.into();
        self.offset = offset;
        self
    }

    /// Sets the random fill.
    pub fn set_random<T: Into<Option<RandomFill>>>(mut self, random: T) -> Self {
        self.random = random.into();
        self
    }

    /// Sets the check period for oscillators.
    pub fn set_check_period(mut self, check_period: usize) -> Self {
        self.check_period = check_period;
        self
    }

    /// Sets the upper limit of generations when running until stable.
    pub fn set_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Sets how cells are displayed.
    pub fn set_symbols<S: ToString>(mut self, alive: S, dead: S) -> Self {
        self.alive = alive.to_string();
        self.dead = dead.to_string();
        self
    }

    /// Creates the initial grid: random cells first, then the preset,
    /// then the pattern file.
    pub fn grid(&self) -> Result<Grid, Error> {
        self.grid_with(&mut PatternCache::new())
    }

    /// Same as [`grid`](Self::grid), but the pattern file is taken from
    /// the cache when it has been read before.
    ///
    /// Since the random fill is seeded, every call gives the same grid
    /// as long as the pattern file is cached.
    pub fn grid_with(&self, cache: &mut PatternCache) -> Result<Grid, Error> {
        let mut grid = Grid::new(self.width, self.height)?;
        if let Some(random) = self.random {
            grid.randomize(random.density, random.seed);
        }
        if let Some(preset) = self.preset {
            preset.place(&mut grid);
        }
        if let Some(path) = &self.pattern {
            let pattern = cache.load(path)?;
            grid.load_pattern(pattern, self.offset.0, self.offset.1);
        }
        Ok(grid)
    }

    /// Creates a new simulator from the configuration.
    ///
    /// Returns an error if the dimensions are invalid, the pattern file
    /// can't be loaded, or the rule is not in the registry.
    pub fn simulator(&self, registry: &RuleRegistry) -> Result<Simulator, Error> {
        self.simulator_with(registry, &mut PatternCache::new())
    }

    /// Same as [`simulator`](Self::simulator), loading the pattern file
    /// through the cache.
    pub fn simulator_with(
        &self,
        registry: &RuleRegistry,
        cache: &mut PatternCache,
    ) -> Result<Simulator, Error> {
        let rule = registry.get(&self.rule)?;
        let grid = self.grid_with(cache)?;
        Ok(Simulator::with_rule(grid, self.rule.as_str(), rule))
    }
}
