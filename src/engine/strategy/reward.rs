//! Reward-weighted local adjustment of each individual's own network.
//!
//! During an episode the orchestrator records every (observation, action)
//! pair per individual. At the generation boundary each network receives
//! backpropagation steps toward its own recorded actions, with the error
//! scaled by a single episode-wide reward sign: +1 if the episode improved
//! fitness on average, -1 otherwise. The sign is deliberately coarse; the
//! source behavior applies one sign to the whole episode rather than
//! per-step credit assignment.
//!
//! Unlike the genetic and swarm strategies, this one never discards a
//! network: it nudges the same weights every generation and respawns only
//! the episode state.

use crate::engine::network::{INPUT_SIZE, OUTPUT_SIZE};
use crate::engine::population::Individual;
use crate::engine::rng::WeightRng;
use crate::engine::strategy::{Statistics, Strategy, round_tenth};
use crate::schema::{ArenaBounds, RewardAdjustConfig};

/// At most this many recorded steps are replayed per training pass.
pub const MAX_ADJUST_STEPS: usize = 100;

/// Per-individual episode log.
#[derive(Debug, Clone, Default)]
struct Experience {
    observations: Vec<[f32; INPUT_SIZE]>,
    actions: Vec<[f32; OUTPUT_SIZE]>,
    rewards: Vec<f32>,
    /// Fitness watermark from the previous evaluation; persists across
    /// generations so each reward is the delta since the last one.
    last_fitness: f32,
}

/// Reward-adjustment optimizer.
#[derive(Debug)]
pub struct RewardAdjustStrategy {
    learning_rate: f32,
    generation: usize,
    best_fitness: f32,
    avg_fitness: f32,
    experiences: Vec<Experience>,
    rng: WeightRng,
}

impl RewardAdjustStrategy {
    /// Create a strategy with one experience slot per configured
    /// individual.
    pub fn new(config: &RewardAdjustConfig, population_size: usize, rng: WeightRng) -> Self {
        Self {
            learning_rate: config.learning_rate,
            generation: 0,
            best_fitness: 0.0,
            avg_fitness: 0.0,
            experiences: vec![Experience::default(); population_size],
            rng,
        }
    }

    /// Replace the learning rate without touching experience logs.
    pub fn set_parameters(&mut self, config: &RewardAdjustConfig) {
        self.learning_rate = config.learning_rate;
    }

    /// Append one step to an individual's episode log. Unknown indices only
    /// arise from caller misuse and are ignored rather than crashing a
    /// running simulation.
    pub fn record_step(
        &mut self,
        index: usize,
        observation: [f32; INPUT_SIZE],
        action: [f32; OUTPUT_SIZE],
    ) {
        if let Some(experience) = self.experiences.get_mut(index) {
            experience.observations.push(observation);
            experience.actions.push(action);
        }
    }

    /// Number of steps currently logged for an individual (for inspection).
    pub fn recorded_steps(&self, index: usize) -> usize {
        self.experiences
            .get(index)
            .map_or(0, |experience| experience.observations.len())
    }
}

impl Strategy for RewardAdjustStrategy {
    fn evaluate(&mut self, population: &[Individual]) {
        assert!(!population.is_empty(), "cannot evaluate an empty population");

        let mut total = 0.0;
        let mut best = f32::NEG_INFINITY;
        for (i, individual) in population.iter().enumerate() {
            total += individual.fitness;
            best = best.max(individual.fitness);

            if let Some(experience) = self.experiences.get_mut(i) {
                let reward = individual.fitness - experience.last_fitness;
                experience.rewards.push(reward);
                experience.last_fitness = individual.fitness;
            }
        }
        self.best_fitness = best;
        self.avg_fitness = total / population.len() as f32;
    }

    fn evolve(&mut self, population: Vec<Individual>, bounds: &ArenaBounds) -> Vec<Individual> {
        assert!(!population.is_empty(), "cannot evolve an empty population");

        let mut next = Vec::with_capacity(population.len());
        for (i, mut individual) in population.into_iter().enumerate() {
            if let Some(experience) = self.experiences.get_mut(i)
                && !experience.observations.is_empty()
            {
                let avg_reward = experience.rewards.iter().sum::<f32>()
                    / experience.rewards.len().max(1) as f32;
                let reward_sign = if avg_reward > 0.0 { 1.0 } else { -1.0 };

                let steps = experience.observations.len().min(MAX_ADJUST_STEPS);
                for step in 0..steps {
                    individual.brain.local_adjust(
                        &experience.observations[step],
                        &experience.actions[step],
                        reward_sign,
                        self.learning_rate,
                    );
                }

                experience.observations.clear();
                experience.actions.clear();
                experience.rewards.clear();
            }

            // Same network, fresh episode state.
            next.push(Individual::spawn(individual.brain, bounds, &mut self.rng));
        }

        self.generation += 1;
        next
    }

    fn stats(&self) -> Statistics {
        Statistics {
            generation: self.generation,
            best_fitness: round_tenth(self.best_fitness),
            avg_fitness: round_tenth(self.avg_fitness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::population::spawn_population;

    fn strategy(population_size: usize) -> RewardAdjustStrategy {
        RewardAdjustStrategy::new(&RewardAdjustConfig::default(), population_size, WeightRng::new(42))
    }

    fn scored_population(fitness: &[f32]) -> Vec<Individual> {
        let bounds = ArenaBounds::default();
        let mut rng = WeightRng::new(7);
        let mut population = spawn_population(fitness.len(), &bounds, &mut rng);
        for (individual, &f) in population.iter_mut().zip(fitness) {
            individual.fitness = f;
        }
        population
    }

    #[test]
    fn test_empty_experience_leaves_weights_unchanged() {
        let population = scored_population(&[3.0, 1.0]);
        let before: Vec<Vec<f32>> = population
            .iter()
            .map(|individual| individual.brain.weights().to_vec())
            .collect();

        let mut strategy = strategy(2);
        strategy.evaluate(&population);
        let next = strategy.evolve(population, &ArenaBounds::default());

        for (individual, weights) in next.iter().zip(&before) {
            assert_eq!(individual.brain.weights(), weights.as_slice());
        }
    }

    #[test]
    fn test_record_step_with_unknown_index_is_ignored() {
        let mut strategy = strategy(2);
        strategy.record_step(5, [0.1; INPUT_SIZE], [0.2; OUTPUT_SIZE]);
        assert_eq!(strategy.recorded_steps(0), 0);
        assert_eq!(strategy.recorded_steps(5), 0);
    }

    #[test]
    fn test_positive_reward_adjusts_recorded_networks() {
        let population = scored_population(&[10.0]);
        let before = population[0].brain.weights().to_vec();

        let mut strategy = strategy(1);
        strategy.record_step(0, [0.4, 0.7, -0.2, 0.1, 1.0], [0.5, -0.5]);
        strategy.evaluate(&population);
        let next = strategy.evolve(population, &ArenaBounds::default());

        assert_ne!(next[0].brain.weights(), before.as_slice());
        assert_eq!(strategy.recorded_steps(0), 0, "logs are cleared after training");
    }

    #[test]
    fn test_fitness_watermark_yields_deltas() {
        let mut strategy = strategy(1);

        let mut population = scored_population(&[5.0]);
        strategy.evaluate(&population);
        assert_eq!(strategy.experiences[0].rewards, vec![5.0]);
        assert_eq!(strategy.experiences[0].last_fitness, 5.0);

        population[0].fitness = 3.0;
        strategy.evaluate(&population);
        assert_eq!(strategy.experiences[0].rewards, vec![5.0, -2.0]);
        assert_eq!(strategy.experiences[0].last_fitness, 3.0);
    }

    #[test]
    fn test_training_replays_at_most_the_step_cap() {
        let observation = [0.4, 0.7, -0.2, 0.1, 1.0];
        let action = [0.5, -0.5];
        let population = scored_population(&[10.0]);
        let bounds = ArenaBounds::default();

        // Replaying 150 recorded steps must produce exactly the same
        // weights as replaying the first 100.
        let mut capped = strategy(1);
        let mut reference = strategy(1);
        for _ in 0..150 {
            capped.record_step(0, observation, action);
        }
        for _ in 0..MAX_ADJUST_STEPS {
            reference.record_step(0, observation, action);
        }

        capped.evaluate(&population);
        reference.evaluate(&population);
        let capped_next = capped.evolve(population.clone(), &bounds);
        let reference_next = reference.evolve(population, &bounds);

        assert_eq!(
            capped_next[0].brain.weights(),
            reference_next[0].brain.weights()
        );
    }

    #[test]
    fn test_networks_carry_over_between_generations() {
        let population = scored_population(&[10.0, 20.0]);
        let mut strategy = strategy(2);

        strategy.record_step(0, [0.4, 0.7, -0.2, 0.1, 1.0], [0.5, -0.5]);
        strategy.evaluate(&population);
        let adjusted = {
            let next = strategy.evolve(population, &ArenaBounds::default());
            next[0].brain.weights().to_vec()
        };

        // The adjusted network is the input network nudged in place, not a
        // freshly initialized one.
        assert_eq!(adjusted.len(), crate::engine::network::WEIGHT_COUNT);
        assert_eq!(strategy.stats().generation, 1);
    }

    #[test]
    #[should_panic(expected = "empty population")]
    fn test_evaluate_rejects_empty_population() {
        strategy(0).evaluate(&[]);
    }
}
