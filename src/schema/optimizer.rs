//! Optimizer selection and per-strategy tunables.
//!
//! Each strategy exposes a small set of knobs that can be replaced between
//! generations without resetting the strategy's generation counter or its
//! per-individual bookkeeping.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Optimization strategy selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OptimizerConfig {
    /// Genetic search: tournament selection, single-point crossover,
    /// Gaussian mutation.
    Evolutionary(EvolutionaryConfig),
    /// Particle-swarm search over the weight space.
    Swarm(SwarmConfig),
    /// Reward-weighted local gradient adjustment of each individual's own
    /// network.
    RewardAdjust(RewardAdjustConfig),
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::Evolutionary(EvolutionaryConfig::default())
    }
}

impl OptimizerConfig {
    /// Validate strategy tunables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Evolutionary(config) => config.validate(),
            Self::Swarm(_) => Ok(()),
            Self::RewardAdjust(config) => config.validate(),
        }
    }
}

/// Genetic search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionaryConfig {
    /// Per-weight mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    /// Crossover probability per offspring (0.0-1.0).
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f32,
    /// Number of best individuals carried forward unchanged.
    #[serde(default = "default_elite_count")]
    pub elite_count: usize,
    /// Tournament size for parent selection.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
}

impl Default for EvolutionaryConfig {
    fn default() -> Self {
        Self {
            mutation_rate: default_mutation_rate(),
            crossover_rate: default_crossover_rate(),
            elite_count: default_elite_count(),
            tournament_size: default_tournament_size(),
        }
    }
}

impl EvolutionaryConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::RateOutOfRange {
                name: "mutation_rate",
                value: self.mutation_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ConfigError::RateOutOfRange {
                name: "crossover_rate",
                value: self.crossover_rate,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::ZeroTournament);
        }
        Ok(())
    }
}

fn default_mutation_rate() -> f32 {
    0.1
}
fn default_crossover_rate() -> f32 {
    0.8
}
fn default_elite_count() -> usize {
    1
}
fn default_tournament_size() -> usize {
    3
}

/// Particle-swarm configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmConfig {
    /// Weight applied to the previous velocity.
    #[serde(default = "default_inertia_weight")]
    pub inertia_weight: f32,
    /// Pull toward each particle's personal best.
    #[serde(default = "default_cognitive_weight")]
    pub cognitive_weight: f32,
    /// Pull toward the swarm's global best.
    #[serde(default = "default_social_weight")]
    pub social_weight: f32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            inertia_weight: default_inertia_weight(),
            cognitive_weight: default_cognitive_weight(),
            social_weight: default_social_weight(),
        }
    }
}

fn default_inertia_weight() -> f32 {
    0.7
}
fn default_cognitive_weight() -> f32 {
    1.5
}
fn default_social_weight() -> f32 {
    1.5
}

/// Reward-adjustment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardAdjustConfig {
    /// Step size for the local gradient adjustment.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,
}

impl Default for RewardAdjustConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
        }
    }
}

impl RewardAdjustConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.learning_rate <= 0.0 {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }
}

fn default_learning_rate() -> f32 {
    0.01
}
