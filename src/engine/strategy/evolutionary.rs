//! Genetic search over controller weight vectors.
//!
//! Tournament selection, single-point crossover, and per-weight Gaussian
//! mutation, with the top individuals carried forward unchanged.

use crate::engine::network::{NeuralNetwork, WEIGHT_LIMIT};
use crate::engine::population::Individual;
use crate::engine::rng::WeightRng;
use crate::engine::strategy::{Statistics, Strategy, round_tenth};
use crate::schema::{ArenaBounds, EvolutionaryConfig};

/// Standard deviation of the Gaussian mutation noise.
const MUTATION_SIGMA: f32 = 0.3;

/// Genetic optimizer.
#[derive(Debug)]
pub struct EvolutionaryStrategy {
    mutation_rate: f32,
    crossover_rate: f32,
    elite_count: usize,
    tournament_size: usize,
    generation: usize,
    best_fitness: f32,
    avg_fitness: f32,
    rng: WeightRng,
}

impl EvolutionaryStrategy {
    /// Create a strategy with the given tunables and randomness source.
    pub fn new(config: &EvolutionaryConfig, rng: WeightRng) -> Self {
        Self {
            mutation_rate: config.mutation_rate,
            crossover_rate: config.crossover_rate,
            elite_count: config.elite_count,
            tournament_size: config.tournament_size,
            generation: 0,
            best_fitness: 0.0,
            avg_fitness: 0.0,
            rng,
        }
    }

    /// Replace the tunables without touching the generation counter.
    pub fn set_parameters(&mut self, config: &EvolutionaryConfig) {
        self.mutation_rate = config.mutation_rate;
        self.crossover_rate = config.crossover_rate;
        self.elite_count = config.elite_count;
        self.tournament_size = config.tournament_size;
    }

    /// Tournament selection: sample `tournament_size` individuals with
    /// replacement and return the index of the fittest. Ties keep the first
    /// candidate seen.
    fn tournament(&mut self, population: &[Individual]) -> usize {
        let mut best = self.rng.index(population.len());
        for _ in 1..self.tournament_size {
            let candidate = self.rng.index(population.len());
            if population[candidate].fitness > population[best].fitness {
                best = candidate;
            }
        }
        best
    }

    /// Single-point crossover with probability `crossover_rate`; otherwise
    /// parent 1's weights verbatim.
    fn crossover(&mut self, parent1: &[f32], parent2: &[f32]) -> Vec<f32> {
        if self.rng.coin(self.crossover_rate) {
            let cut = self.rng.index(parent1.len());
            let mut child = Vec::with_capacity(parent1.len());
            child.extend_from_slice(&parent1[..cut]);
            child.extend_from_slice(&parent2[cut..]);
            child
        } else {
            parent1.to_vec()
        }
    }

    /// Per-weight Gaussian mutation, clamped to the weight limits.
    fn mutate(&mut self, weights: &mut [f32]) {
        for weight in weights.iter_mut() {
            if self.rng.coin(self.mutation_rate) {
                *weight = (*weight + self.rng.gaussian(MUTATION_SIGMA))
                    .clamp(-WEIGHT_LIMIT, WEIGHT_LIMIT);
            }
        }
    }
}

impl Strategy for EvolutionaryStrategy {
    fn evaluate(&mut self, population: &[Individual]) {
        assert!(!population.is_empty(), "cannot evaluate an empty population");

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
        let size = population.len();

        // Rank indices by fitness; the stable sort keeps earlier indices
        // first among ties.
        let mut ranked: Vec<usize> = (0..size).collect();
        ranked.sort_by(|&a, &b| {
            population[b]
                .fitness
                .partial_cmp(&population[a].fitness)
                .unwrap()
        });

        let mut next = Vec::with_capacity(size);
        for &index in ranked.iter().take(self.elite_count.min(size)) {
            next.push(Individual::spawn(
                population[index].brain.clone(),
                bounds,
                &mut self.rng,
            ));
        }

        while next.len() < size {
            let parent1 = self.tournament(&population);
            let parent2 = self.tournament(&population);
            let mut child = self.crossover(
                population[parent1].brain.weights(),
                population[parent2].brain.weights(),
            );
            self.mutate(&mut child);
            next.push(Individual::spawn(
                NeuralNetwork::with_weights(child),
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
    use crate::engine::network::WEIGHT_COUNT;
    use crate::engine::population::spawn_population;

    fn strategy(config: EvolutionaryConfig) -> EvolutionaryStrategy {
        EvolutionaryStrategy::new(&config, WeightRng::new(42))
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
    fn test_evaluate_rejects_empty_population() {
        strategy(EvolutionaryConfig::default()).evaluate(&[]);
    }

    #[test]
    #[should_panic(expected = "empty population")]
    fn test_evolve_rejects_empty_population() {
        strategy(EvolutionaryConfig::default()).evolve(vec![], &ArenaBounds::default());
    }

    #[test]
    fn test_elite_weights_survive_bitwise() {
        let population = scored_population(&[10.0, 30.0, 20.0, 5.0]);
        let best_weights = population[1].brain.weights().to_vec();

        let mut strategy = strategy(EvolutionaryConfig {
            elite_count: 1,
            ..Default::default()
        });
        strategy.evaluate(&population);
        let next = strategy.evolve(population, &ArenaBounds::default());

        assert_eq!(next.len(), 4);
        assert_eq!(next[0].brain.weights(), best_weights.as_slice());
        assert_eq!(next[0].fitness, 0.0);
    }

    #[test]
    fn test_elite_ties_keep_first_seen_order() {
        let population = scored_population(&[10.0, 30.0, 30.0, 5.0]);
        let first_best = population[1].brain.weights().to_vec();
        let second_best = population[2].brain.weights().to_vec();

        let mut strategy = strategy(EvolutionaryConfig {
            elite_count: 2,
            ..Default::default()
        });
        let next = strategy.evolve(population, &ArenaBounds::default());

        assert_eq!(next[0].brain.weights(), first_best.as_slice());
        assert_eq!(next[1].brain.weights(), second_best.as_slice());
    }

    #[test]
    fn test_evolve_preserves_population_size_and_weight_length() {
        let population = scored_population(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let mut strategy = strategy(EvolutionaryConfig::default());
        let next = strategy.evolve(population, &ArenaBounds::default());

        assert_eq!(next.len(), 7);
        for individual in &next {
            assert_eq!(individual.brain.weights().len(), WEIGHT_COUNT);
        }
    }

    #[test]
    fn test_offspring_weights_stay_within_limits() {
        let population = scored_population(&[1.0, 2.0, 3.0, 4.0]);
        let mut strategy = strategy(EvolutionaryConfig {
            mutation_rate: 1.0,
            ..Default::default()
        });

        let mut current = population;
        for _ in 0..10 {
            current = strategy.evolve(current, &ArenaBounds::default());
            for individual in &current {
                for &w in individual.brain.weights() {
                    assert!((-WEIGHT_LIMIT..=WEIGHT_LIMIT).contains(&w));
                }
            }
        }
    }

    #[test]
    fn test_no_operators_copies_a_parent_verbatim() {
        let population = scored_population(&[4.0, 1.0, 2.0, 3.0]);
        let parent_weights: Vec<Vec<f32>> = population
            .iter()
            .map(|individual| individual.brain.weights().to_vec())
            .collect();

        let mut strategy = strategy(EvolutionaryConfig {
            mutation_rate: 0.0,
            crossover_rate: 0.0,
            elite_count: 0,
            ..Default::default()
        });
        let next = strategy.evolve(population, &ArenaBounds::default());

        for child in &next {
            assert!(
                parent_weights
                    .iter()
                    .any(|weights| weights.as_slice() == child.brain.weights()),
                "child weights must match some tournament winner exactly"
            );
        }
    }

    #[test]
    fn test_generation_advances_only_in_evolve() {
        let population = scored_population(&[1.0, 2.0]);
        let mut strategy = strategy(EvolutionaryConfig::default());

        strategy.evaluate(&population);
        strategy.evaluate(&population);
        assert_eq!(strategy.stats().generation, 0);

        let population = strategy.evolve(population, &ArenaBounds::default());
        assert_eq!(strategy.stats().generation, 1);
        let _ = strategy.evolve(population, &ArenaBounds::default());
        assert_eq!(strategy.stats().generation, 2);
    }
}
