//! Environment seam for episode evaluation.
//!
//! The foraging environment proper (movement, sensing geometry, collision,
//! wrap-around) lives outside this crate. The engine only needs two calls
//! per individual per frame: an observation in, a fitness delta out.

use crate::engine::network::{INPUT_SIZE, OUTPUT_SIZE};
use crate::engine::population::Individual;
use crate::engine::rng::WeightRng;

/// One simulated environment driving fitness accrual for a population.
pub trait Arena {
    /// Called once at the start of every episode with the freshly spawned
    /// population.
    fn begin_episode(&mut self, population: &[Individual]);

    /// Observation for one individual: [food bearing, food distance,
    /// velocity x, velocity y, bias].
    fn sense(&mut self, slot: usize, agent: &Individual) -> [f32; INPUT_SIZE];

    /// Apply an action for one individual and return the fitness delta it
    /// earned this frame. The delta is added onto the individual's fitness
    /// accumulator by the engine; it is never overwritten.
    fn act(&mut self, slot: usize, agent: &mut Individual, action: [f32; OUTPUT_SIZE]) -> f32;
}

/// Reward granted when a target is reached.
const CAPTURE_REWARD: f32 = 10.0;
/// How quickly a well-aimed, fast agent closes on its target.
const CLOSING_RATE: f32 = 0.05;
/// How strongly a turn reduces the remaining bearing error.
const TURN_GAIN: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
struct Target {
    bearing: f32,
    range: f32,
}

/// Geometry-free demonstration environment.
///
/// Each individual chases a virtual target described only by a bearing in
/// [-1, 1] and a normalized range. Turning toward the bearing while moving
/// fast closes the range; reaching the target pays a capture reward and
/// spawns a new one. This keeps the full foraging simulation out of the
/// crate while still giving the optimizers a learnable signal, so it backs
/// both the CLI and the integration tests.
#[derive(Debug)]
pub struct TrackingArena {
    targets: Vec<Target>,
    last_actions: Vec<[f32; OUTPUT_SIZE]>,
    rng: WeightRng,
}

impl TrackingArena {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            targets: Vec::new(),
            last_actions: Vec::new(),
            rng: WeightRng::new(seed),
        }
    }

    fn fresh_target(rng: &mut WeightRng) -> Target {
        Target {
            bearing: rng.weight(),
            range: 1.0,
        }
    }
}

impl Arena for TrackingArena {
    fn begin_episode(&mut self, population: &[Individual]) {
        self.targets = (0..population.len())
            .map(|_| Self::fresh_target(&mut self.rng))
            .collect();
        self.last_actions = vec![[0.0; OUTPUT_SIZE]; population.len()];
    }

    fn sense(&mut self, slot: usize, _agent: &Individual) -> [f32; INPUT_SIZE] {
        let target = self.targets[slot];
        let last = self.last_actions[slot];
        [target.bearing, target.range, last[0], last[1], 1.0]
    }

    fn act(&mut self, slot: usize, _agent: &mut Individual, action: [f32; OUTPUT_SIZE]) -> f32 {
        let turn = action[0];
        let speed = (action[1] + 1.0) / 2.0;
        self.last_actions[slot] = action;

        let target = &mut self.targets[slot];
        let alignment = (1.0 - (turn - target.bearing).abs()).max(0.0);
        target.range -= speed * alignment * CLOSING_RATE;
        target.bearing = (target.bearing - turn * TURN_GAIN).clamp(-1.0, 1.0);

        if target.range <= 0.0 {
            *target = Self::fresh_target(&mut self.rng);
            return CAPTURE_REWARD;
        }
        0.0
    }
}
