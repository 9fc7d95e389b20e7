//! Population-optimization strategies.
//!
//! Three optimizers share one contract: `evaluate` refreshes fitness
//! statistics (and any strategy-internal best tracking), `evolve` produces
//! the next generation and is the only operation that advances the
//! generation counter, and `stats` reports the latest statistics. Each
//! strategy owns its per-individual bookkeeping exclusively; nothing is
//! shared between strategy instances.

mod evolutionary;
mod reward;
mod swarm;

pub use evolutionary::EvolutionaryStrategy;
pub use reward::{MAX_ADJUST_STEPS, RewardAdjustStrategy};
pub use swarm::SwarmStrategy;

use serde::{Deserialize, Serialize};

use crate::engine::network::{INPUT_SIZE, OUTPUT_SIZE};
use crate::engine::population::Individual;
use crate::engine::rng::WeightRng;
use crate::schema::{ArenaBounds, OptimizerConfig};

/// Fitness statistics for one strategy, refreshed on every `evaluate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Completed generations for this strategy.
    pub generation: usize,
    /// Best fitness of the most recently evaluated population.
    pub best_fitness: f32,
    /// Mean fitness of the most recently evaluated population.
    pub avg_fitness: f32,
}

/// Round a fitness value to one decimal for reporting.
pub(crate) fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Shared optimizer contract.
pub trait Strategy {
    /// Refresh fitness statistics (and strategy-internal best tracking)
    /// from the current population. Does not modify any individual.
    ///
    /// # Panics
    ///
    /// Panics on an empty population.
    fn evaluate(&mut self, population: &[Individual]);

    /// Produce the next generation and advance the generation counter.
    /// The returned population always has the same size as the input.
    ///
    /// # Panics
    ///
    /// Panics on an empty population.
    fn evolve(&mut self, population: Vec<Individual>, bounds: &ArenaBounds) -> Vec<Individual>;

    /// Latest statistics, fitness rounded to one decimal.
    fn stats(&self) -> Statistics;
}

/// A strategy instance bound to one sub-population for the lifetime of a
/// run.
#[derive(Debug)]
pub enum Optimizer {
    /// Genetic search.
    Evolutionary(EvolutionaryStrategy),
    /// Particle-swarm search.
    Swarm(SwarmStrategy),
    /// Reward-weighted local adjustment.
    RewardAdjust(RewardAdjustStrategy),
}

impl Optimizer {
    /// Build the strategy selected by the configuration.
    pub fn from_config(config: &OptimizerConfig, population_size: usize, seed: u64) -> Self {
        let rng = WeightRng::new(seed);
        match config {
            OptimizerConfig::Evolutionary(config) => {
                Self::Evolutionary(EvolutionaryStrategy::new(config, rng))
            }
            OptimizerConfig::Swarm(config) => Self::Swarm(SwarmStrategy::new(config, rng)),
            OptimizerConfig::RewardAdjust(config) => {
                Self::RewardAdjust(RewardAdjustStrategy::new(config, population_size, rng))
            }
        }
    }

    /// Replace the active strategy's tunables without resetting its
    /// generation counter or per-individual state. A configuration for a
    /// different strategy is logged and ignored.
    pub fn set_parameters(&mut self, config: &OptimizerConfig) {
        match (self, config) {
            (Self::Evolutionary(strategy), OptimizerConfig::Evolutionary(config)) => {
                strategy.set_parameters(config);
            }
            (Self::Swarm(strategy), OptimizerConfig::Swarm(config)) => {
                strategy.set_parameters(config);
            }
            (Self::RewardAdjust(strategy), OptimizerConfig::RewardAdjust(config)) => {
                strategy.set_parameters(config);
            }
            _ => log::warn!("parameter update does not match the active optimizer, ignoring"),
        }
    }

    /// Forward one (observation, action) step to the reward-adjustment
    /// strategy's experience log. A no-op for the other strategies and for
    /// unknown indices.
    pub fn record_step(
        &mut self,
        index: usize,
        observation: [f32; INPUT_SIZE],
        action: [f32; OUTPUT_SIZE],
    ) {
        if let Self::RewardAdjust(strategy) = self {
            strategy.record_step(index, observation, action);
        }
    }
}

impl Strategy for Optimizer {
    fn evaluate(&mut self, population: &[Individual]) {
        match self {
            Self::Evolutionary(strategy) => strategy.evaluate(population),
            Self::Swarm(strategy) => strategy.evaluate(population),
            Self::RewardAdjust(strategy) => strategy.evaluate(population),
        }
    }

    fn evolve(&mut self, population: Vec<Individual>, bounds: &ArenaBounds) -> Vec<Individual> {
        match self {
            Self::Evolutionary(strategy) => strategy.evolve(population, bounds),
            Self::Swarm(strategy) => strategy.evolve(population, bounds),
            Self::RewardAdjust(strategy) => strategy.evolve(population, bounds),
        }
    }

    fn stats(&self) -> Statistics {
        match self {
            Self::Evolutionary(strategy) => strategy.stats(),
            Self::Swarm(strategy) => strategy.stats(),
            Self::RewardAdjust(strategy) => strategy.stats(),
        }
    }
}
