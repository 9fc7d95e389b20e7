//! Configuration types for training runs.

use serde::{Deserialize, Serialize};

use super::OptimizerConfig;

fn default_population_size() -> usize {
    15
}
fn default_steps_per_generation() -> u64 {
    300
}

/// Top-level training configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of individuals in the population.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Simulated frames per episode before the generation boundary.
    #[serde(default = "default_steps_per_generation")]
    pub steps_per_generation: u64,
    /// Spawn bounds for respawned individuals.
    #[serde(default)]
    pub arena: ArenaBounds,
    /// Optimization strategy and its tunables.
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    /// Maximum number of generations to run.
    pub max_generations: usize,
    /// Stop early once the all-time best fitness reaches this value.
    #[serde(default)]
    pub target_fitness: Option<f32>,
    /// Stop after this many generations without improving the all-time best.
    #[serde(default)]
    pub stagnation_limit: Option<usize>,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            steps_per_generation: default_steps_per_generation(),
            arena: ArenaBounds::default(),
            optimizer: OptimizerConfig::default(),
            max_generations: 100,
            target_fitness: None,
            stagnation_limit: None,
            random_seed: None,
        }
    }
}

/// Rectangular spawn area for respawned individuals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArenaBounds {
    /// Width of the spawn area.
    pub width: f32,
    /// Height of the spawn area.
    pub height: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
        }
    }
}

impl TrainingConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.steps_per_generation == 0 {
            return Err(ConfigError::ZeroEpisodeLength);
        }
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return Err(ConfigError::InvalidArena);
        }
        self.optimizer.validate()
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Steps per generation must be non-zero")]
    ZeroEpisodeLength,
    #[error("Arena bounds must be positive")]
    InvalidArena,
    #[error("Rate {name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },
    #[error("Tournament size must be non-zero")]
    ZeroTournament,
    #[error("Learning rate must be positive, got {0}")]
    InvalidLearningRate(f32),
}
