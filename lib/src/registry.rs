//! A catalog of rules by name.

use crate::{
    error::Error,
    grid::Grid,
    rules::{FnRule, LifeLike, Rule},
};
use log::debug;
use std::{
    collections::HashMap,
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

/// Names of the built-in rules, in registration order.
pub const BUILTIN_RULES: [&str; 3] = ["standard", "highlife", "day_and_night"];

/// Maps rule names to rules.
///
/// Names are listed in the order they were first registered.
/// Registering an existing name replaces the rule but keeps its position.
///
/// The registry has no interior locking. Construct it once at startup
/// and pass it by reference to whatever needs to look rules up;
/// a multithreaded host should put it behind a lock of its own.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    /// Rules in registration order.
    rules: Vec<(String, Arc<dyn Rule>)>,

    /// Position of each name in `rules`.
    index: HashMap<String, usize>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        RuleRegistry::default()
    }

    /// A registry with the built-in rules:
    ///
    /// * `standard`: [`LifeLike::standard`];
    /// * `highlife`: [`LifeLike::high_life`];
    /// * `day_and_night`: [`LifeLike::day_and_night`].
    pub fn with_builtins() -> Self {
        let mut registry = RuleRegistry::new();
        registry.register("standard", LifeLike::standard());
        registry.register("highlife", LifeLike::high_life());
        registry.register("day_and_night", LifeLike::day_and_night());
        registry
    }

    /// Registers a rule under a name, replacing any rule with the same name.
    pub fn register<S: Into<String>, R: Rule + 'static>(&mut self, name: S, rule: R) {
        self.register_arc(name, Arc::new(rule))
    }

    /// Registers an already shared rule.
    pub fn register_arc<S: Into<String>>(&mut self, name: S, rule: Arc<dyn Rule>) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => {
                debug!("Replaced rule: {}", name);
                self.rules[i].1 = rule;
            }
            None => {
                debug!("Registered rule: {}", name);
                self.index.insert(name.clone(), self.rules.len());
                self.rules.push((name, rule));
            }
        }
    }

    /// Registers a function as a rule.
    pub fn register_fn<S, F>(&mut self, name: S, evolve: F)
    where
        S: Into<String>,
        F: Fn(&Grid) -> Grid + Send + Sync + 'static,
    {
        self.register(name, FnRule(evolve))
    }

    /// Parses a Life-like rule string such as `B36/S23`
    /// and registers it under a name.
    pub fn register_rule_string<S: Into<String>>(
        &mut self,
        name: S,
        rule_string: &str,
    ) -> Result<(), Error> {
        let rule: LifeLike = rule_string.parse()?;
        self.register(name, rule);
        Ok(())
    }

    /// Looks up a rule by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Rule>, Error> {
        self.index
            .get(name)
            .map(|&i| Arc::clone(&self.rules[i].1))
            .ok_or_else(|| Error::RuleNotFound {
                name: name.to_string(),
                known: self.list().into_iter().map(String::from).collect(),
            })
    }

    /// All registered names, in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.rules.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Debug for RuleRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.list())
            .finish()
    }
}
