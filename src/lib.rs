//! Neuroforage - Neuroevolution of fixed-topology foraging controllers.
//!
//! This crate evolves the weights of small feedforward controller networks
//! through three interchangeable population optimizers: genetic search,
//! particle-swarm search, and reward-weighted local gradient adjustment.
//! Fitness is accrued episodically by an external environment behind the
//! [`engine::Arena`] seam.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, validation, and training report types
//! - `engine`: The network evaluator, optimizers, and generation loop
//!
//! # Example
//!
//! ```rust
//! use neuroforage::{
//!     engine::{TrackingArena, TrainingEngine},
//!     schema::TrainingConfig,
//! };
//!
//! // Create configuration
//! let config = TrainingConfig {
//!     population_size: 8,
//!     steps_per_generation: 50,
//!     max_generations: 3,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//! config.validate().unwrap();
//!
//! // Run a short headless training session against the demo arena
//! let mut engine = TrainingEngine::new(config);
//! let mut arena = TrackingArena::new(42);
//! let result = engine.run(&mut arena);
//!
//! println!("Best fitness after {} generations: {}", result.generations, result.best_fitness);
//! ```

pub mod engine;
pub mod schema;

// Re-export commonly used types
pub use engine::{
    Arena, Individual, NeuralNetwork, TrackingArena, TrainingEngine,
    strategy::{Optimizer, Statistics, Strategy},
};
pub use schema::{OptimizerConfig, TrainingConfig, TrainingResult};
