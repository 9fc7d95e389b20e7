//! Particle-swarm search over controller weight vectors.
//!
//! Each individual is a particle: its weight vector is the position, and the
//! strategy tracks a velocity, a personal best, and the swarm-wide global
//! best. Personal and global best fitness start at negative infinity so the
//! first observed fitness, including exactly zero, always becomes the best.

use crate::engine::network::{NeuralNetwork, WEIGHT_LIMIT};
use crate::engine::population::Individual;
use crate::engine::rng::WeightRng;
use crate::engine::strategy::{Statistics, Strategy, round_tenth};
use crate::schema::{ArenaBounds, SwarmConfig};

/// Velocities are clamped to [-VELOCITY_LIMIT, VELOCITY_LIMIT] per weight.
const VELOCITY_LIMIT: f32 = 1.0;

/// Particle-swarm optimizer.
#[derive(Debug)]
pub struct SwarmStrategy {
    inertia_weight: f32,
    cognitive_weight: f32,
    social_weight: f32,
    generation: usize,
    best_fitness: f32,
    avg_fitness: f32,
    velocities: Vec<Vec<f32>>,
    personal_best_weights: Vec<Vec<f32>>,
    personal_best_fitness: Vec<f32>,
    global_best_weights: Vec<f32>,
    global_best_fitness: f32,
    rng: WeightRng,
}

impl SwarmStrategy {
    /// Create a strategy with the given tunables and randomness source.
    /// Per-particle state is initialized lazily on the first `evolve`.
    pub fn new(config: &SwarmConfig, rng: WeightRng) -> Self {
        Self {
            inertia_weight: config.inertia_weight,
            cognitive_weight: config.cognitive_weight,
            social_weight: config.social_weight,
            generation: 0,
            best_fitness: 0.0,
            avg_fitness: 0.0,
            velocities: Vec::new(),
            personal_best_weights: Vec::new(),
            personal_best_fitness: Vec::new(),
            global_best_weights: Vec::new(),
            global_best_fitness: f32::NEG_INFINITY,
            rng,
        }
    }

    /// Replace the tunables without touching any per-particle state.
    pub fn set_parameters(&mut self, config: &SwarmConfig) {
        self.inertia_weight = config.inertia_weight;
        self.cognitive_weight = config.cognitive_weight;
        self.social_weight = config.social_weight;
    }

    /// Per-particle personal best fitness values (for inspection).
    pub fn personal_best_fitness(&self) -> &[f32] {
        &self.personal_best_fitness
    }

    /// Swarm-wide best fitness seen so far.
    pub fn global_best_fitness(&self) -> f32 {
        self.global_best_fitness
    }

    fn initialized(&self) -> bool {
        !self.velocities.is_empty()
    }

    /// Zero velocities, personal bests at the current positions with a
    /// negative-infinity fitness sentinel.
    fn initialize(&mut self, population: &[Individual]) {
        let weight_count = population[0].brain.weights().len();
        self.velocities = vec![vec![0.0; weight_count]; population.len()];
        self.personal_best_weights = population
            .iter()
            .map(|individual| individual.brain.weights().to_vec())
            .collect();
        self.personal_best_fitness = vec![f32::NEG_INFINITY; population.len()];
        self.global_best_weights = population[0].brain.weights().to_vec();
        self.global_best_fitness = f32::NEG_INFINITY;
    }

    fn update_bests(&mut self, population: &[Individual]) {
        assert_eq!(
            self.velocities.len(),
            population.len(),
            "population size changed after swarm state initialization"
        );
        for (i, individual) in population.iter().enumerate() {
            if individual.fitness > self.personal_best_fitness[i] {
                self.personal_best_fitness[i] = individual.fitness;
                self.personal_best_weights[i] = individual.brain.weights().to_vec();
            }
            if individual.fitness > self.global_best_fitness {
                self.global_best_fitness = individual.fitness;
                self.global_best_weights = individual.brain.weights().to_vec();
            }
        }
    }
}

impl Strategy for SwarmStrategy {
    fn evaluate(&mut self, population: &[Individual]) {
        assert!(!population.is_empty(), "cannot evaluate an empty population");

        // Before the first evolve there is no particle state to refresh;
        // only the reported statistics are computed.
        if self.initialized() {
            self.update_bests(population);
        }

        let mut total = 0.0;
        let mut best = f32::NEG_INFINITY;
        for individual in population {
            total += individual.fitness;
            best = best.max(individual.fitness);
        }
        self.best_fitness = best;
        self.avg_fitness = total / population.len() as f32;
    }

    fn evolve(&mut self, population: Vec<Individual>, bounds: &ArenaBounds) -> Vec<Individual> {
        assert!(!population.is_empty(), "cannot evolve an empty population");

        if !self.initialized() {
            self.initialize(&population);
            // The fitness already accrued this episode arrived before the
            // particle state existed; fold it in so the sentinel never
            // survives a generation.
            self.update_bests(&population);
        }
        assert_eq!(
            self.velocities.len(),
            population.len(),
            "population size changed after swarm state initialization"
        );

        let mut next = Vec::with_capacity(population.len());
        for (i, individual) in population.iter().enumerate() {
            let current = individual.brain.weights();
            let mut weights = Vec::with_capacity(current.len());
            for (j, &position) in current.iter().enumerate() {
                let inertia = self.inertia_weight * self.velocities[i][j];
                let cognitive = self.cognitive_weight
                    * self.rng.unit()
                    * (self.personal_best_weights[i][j] - position);
                let social = self.social_weight
                    * self.rng.unit()
                    * (self.global_best_weights[j] - position);

                let velocity =
                    (inertia + cognitive + social).clamp(-VELOCITY_LIMIT, VELOCITY_LIMIT);
                self.velocities[i][j] = velocity;
                weights.push((position + velocity).clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT));
            }
            next.push(Individual::spawn(
                NeuralNetwork::with_weights(weights),
                bounds,
                &mut self.rng,
            ));
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

    fn strategy(config: SwarmConfig) -> SwarmStrategy {
        SwarmStrategy::new(&config, WeightRng::new(42))
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
    #[should_panic(expected = "empty population")]
    fn test_evolve_rejects_empty_population() {
        strategy(SwarmConfig::default()).evolve(vec![], &ArenaBounds::default());
    }

    #[test]
    fn test_zero_coefficients_reproduce_weights_exactly() {
        let population = scored_population(&[1.0, 5.0, 3.0]);
        let before: Vec<Vec<f32>> = population
            .iter()
            .map(|individual| individual.brain.weights().to_vec())
            .collect();

        let mut strategy = strategy(SwarmConfig {
            inertia_weight: 0.0,
            cognitive_weight: 0.0,
            social_weight: 0.0,
        });
        strategy.evaluate(&population);
        let next = strategy.evolve(population, &ArenaBounds::default());

        for (individual, weights) in next.iter().zip(&before) {
            assert_eq!(individual.brain.weights(), weights.as_slice());
        }
    }

    #[test]
    fn test_sentinel_never_survives_first_evolve() {
        // Fitness of exactly zero must still replace the sentinel.
        let population = scored_population(&[0.0, 2.0, 7.0]);

        let mut strategy = strategy(SwarmConfig::default());
        strategy.evaluate(&population);
        let _ = strategy.evolve(population, &ArenaBounds::default());

        assert_eq!(strategy.personal_best_fitness(), &[0.0, 2.0, 7.0]);
        assert_eq!(strategy.global_best_fitness(), 7.0);
    }

    #[test]
    fn test_global_best_tracks_across_generations() {
        let bounds = ArenaBounds::default();
        let mut strategy = strategy(SwarmConfig::default());

        let population = scored_population(&[1.0, 9.0]);
        strategy.evaluate(&population);
        let mut next = strategy.evolve(population, &bounds);
        assert_eq!(strategy.global_best_fitness(), 9.0);

        // A weaker generation must not lower the global best.
        next[0].fitness = 2.0;
        next[1].fitness = 3.0;
        strategy.evaluate(&next);
        let _ = strategy.evolve(next, &bounds);
        assert_eq!(strategy.global_best_fitness(), 9.0);
    }

    #[test]
    fn test_produced_weights_stay_within_limits() {
        let bounds = ArenaBounds::default();
        let mut strategy = strategy(SwarmConfig {
            inertia_weight: 2.0,
            cognitive_weight: 4.0,
            social_weight: 4.0,
        });

        let mut population = scored_population(&[1.0, 2.0, 3.0, 4.0]);
        for _ in 0..10 {
            strategy.evaluate(&population);
            population = strategy.evolve(population, &bounds);
            for individual in &population {
                for &w in individual.brain.weights() {
                    assert!((-WEIGHT_LIMIT..=WEIGHT_LIMIT).contains(&w));
                }
            }
        }
    }

    #[test]
    fn test_evaluate_before_initialization_only_reports_stats() {
        let population = scored_population(&[4.0, 6.0]);
        let mut strategy = strategy(SwarmConfig::default());

        strategy.evaluate(&population);
        assert_eq!(strategy.stats().best_fitness, 6.0);
        assert_eq!(strategy.stats().avg_fitness, 5.0);
        assert!(strategy.personal_best_fitness().is_empty());
    }

    #[test]
    fn test_population_size_preserved() {
        let population = scored_population(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut strategy = strategy(SwarmConfig::default());
        let next = strategy.evolve(population, &ArenaBounds::default());
        assert_eq!(next.len(), 5);
        assert_eq!(strategy.stats().generation, 1);
    }
}
