//! Individuals and population bookkeeping.

use crate::engine::network::NeuralNetwork;
use crate::engine::rng::WeightRng;
use crate::schema::ArenaBounds;

/// One candidate controller: a network, its episode fitness accumulator, and
/// the respawnable episode state (position and heading).
///
/// Fitness accrues additively during an episode and is reset at episode
/// start. Strategies replace individuals wholesale at generation boundaries.
#[derive(Debug, Clone)]
pub struct Individual {
    /// The controller network.
    pub brain: NeuralNetwork,
    /// Reward accumulated during the current episode.
    pub fitness: f32,
    /// Spawn x position.
    pub x: f32,
    /// Spawn y position.
    pub y: f32,
    /// Spawn heading in radians.
    pub heading: f32,
}

impl Individual {
    /// Wrap a network in a freshly spawned individual: zero fitness, uniform
    /// random position within the bounds, uniform random heading.
    pub fn spawn(brain: NeuralNetwork, bounds: &ArenaBounds, rng: &mut WeightRng) -> Self {
        let (x, y) = rng.position(bounds);
        Self {
            brain,
            fitness: 0.0,
            x,
            y,
            heading: rng.heading(),
        }
    }

    /// Reset the episode fitness accumulator.
    pub fn reset_fitness(&mut self) {
        self.fitness = 0.0;
    }
}

/// Spawn a population of random controllers.
pub fn spawn_population(
    size: usize,
    bounds: &ArenaBounds,
    rng: &mut WeightRng,
) -> Vec<Individual> {
    (0..size)
        .map(|_| Individual::spawn(NeuralNetwork::random(rng), bounds, rng))
        .collect()
}
