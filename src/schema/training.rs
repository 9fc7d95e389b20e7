//! Progress and result types for headless training runs.

use serde::{Deserialize, Serialize};

/// Per-generation fitness series for a whole run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingHistory {
    /// Best fitness observed in each generation.
    pub best_fitness: Vec<f32>,
    /// Mean fitness of each generation.
    pub avg_fitness: Vec<f32>,
}

/// Snapshot reported after every generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingProgress {
    /// Generations completed so far.
    pub generation: usize,
    /// All-time best fitness.
    pub best_fitness: f32,
    /// Best fitness of the generation that just finished.
    pub generation_best: f32,
    /// Mean fitness of the generation that just finished.
    pub generation_avg: f32,
    /// Generations since the all-time best last improved.
    pub stagnation_count: usize,
}

/// Why a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Cancelled via the engine's cancellation handle.
    Cancelled,
    /// Reached the configured generation limit.
    MaxGenerations,
    /// All-time best fitness reached the configured target.
    TargetReached,
    /// No improvement for the configured number of generations.
    Stagnation,
}

/// Final outcome of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Generations completed.
    pub generations: usize,
    /// All-time best fitness.
    pub best_fitness: f32,
    /// Mean fitness of the final generation.
    pub final_avg_fitness: f32,
    /// Weight vector of the best individual ever evaluated.
    pub best_weights: Vec<f32>,
    /// Why the run stopped.
    pub stop_reason: StopReason,
    /// Wall-clock duration of the run.
    pub elapsed_seconds: f64,
    /// Per-generation fitness series.
    pub history: TrainingHistory,
}
