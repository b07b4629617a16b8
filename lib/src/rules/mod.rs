//! Cellular automata rules.
//!
//! A rule turns one generation into the next. It only reads the input grid
//! and only writes a freshly allocated output grid, so the order in which
//! cells are updated never matters.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

mod life;

use crate::grid::Grid;
pub use life::LifeLike;

/// A cellular automaton rule.
///
/// Besides [`LifeLike`], any `Fn(&Grid) -> Grid` can be turned into a rule
/// with [`FnRule`], or registered directly with
/// [`RuleRegistry::register_fn`](crate::RuleRegistry::register_fn).
pub trait Rule: Send + Sync {
    /// Computes the next generation.
    ///
    /// Must return a new grid with the same dimensions as the input,
    /// whose generation is one more than the input's.
    /// [`Grid::next_generation`] is a convenient starting point.
    fn evolve(&self, grid: &Grid) -> Grid;
}

/// A rule backed by a plain function or closure.
#[derive(Clone, Copy, Debug)]
pub struct FnRule<F>(pub F);

impl<F> Rule for FnRule<F>
where
    F: Fn(&Grid) -> Grid + Send + Sync,
{
    #[inline]
    fn evolve(&self, grid: &Grid) -> Grid {
        (self.0)(grid)
    }
}
