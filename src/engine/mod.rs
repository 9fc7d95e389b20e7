//! Engine module - Networks, populations, optimizers, and the training loop.

mod arena;
mod network;
mod population;
mod rng;
mod trainer;

pub mod strategy;

pub use arena::*;
pub use network::*;
pub use population::*;
pub use rng::*;
pub use trainer::*;
