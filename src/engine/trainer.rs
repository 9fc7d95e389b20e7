//! Headless generation orchestrator.
//!
//! Drives episodes through an [`Arena`], accrues fitness onto each
//! individual, and fires `evaluate` then `evolve` on the bound optimizer at
//! every generation boundary.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::engine::arena::Arena;
use crate::engine::population::{Individual, spawn_population};
use crate::engine::rng::WeightRng;
use crate::engine::strategy::{Optimizer, Statistics, Strategy};
use crate::schema::{
    StopReason, TrainingConfig, TrainingHistory, TrainingProgress, TrainingResult,
};

/// Training engine that runs the generation loop.
pub struct TrainingEngine {
    config: TrainingConfig,
    optimizer: Optimizer,
    population: Vec<Individual>,
    history: TrainingHistory,
    best_fitness: f32,
    best_weights: Vec<f32>,
    stagnation_count: usize,
    cancelled: Arc<AtomicBool>,
    rng: WeightRng,
}

impl TrainingEngine {
    /// Create a new engine. The configured seed (or an entropy seed) feeds
    /// both population initialization and the optimizer's randomness.
    pub fn new(config: TrainingConfig) -> Self {
        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = WeightRng::new(seed);
        let optimizer =
            Optimizer::from_config(&config.optimizer, config.population_size, rng.next_seed());

        Self {
            config,
            optimizer,
            population: Vec::new(),
            history: TrainingHistory::default(),
            best_fitness: f32::NEG_INFINITY,
            best_weights: Vec::new(),
            stagnation_count: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
            rng,
        }
    }

    /// Get cancellation handle. Setting it stops the run at the next
    /// generation boundary.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// The current population.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// The bound optimizer.
    pub fn optimizer(&self) -> &Optimizer {
        &self.optimizer
    }

    /// Latest optimizer statistics.
    pub fn stats(&self) -> Statistics {
        self.optimizer.stats()
    }

    /// Spawn a fresh random population.
    pub fn initialize(&mut self) {
        self.population =
            spawn_population(self.config.population_size, &self.config.arena, &mut self.rng);
    }

    fn generations_completed(&self) -> usize {
        self.history.best_fitness.len()
    }

    /// Run one episode: every individual is stepped once per frame, in
    /// population order.
    fn run_episode(&mut self, arena: &mut dyn Arena) {
        for individual in &mut self.population {
            individual.reset_fitness();
        }
        arena.begin_episode(&self.population);

        for _ in 0..self.config.steps_per_generation {
            for i in 0..self.population.len() {
                let observation = arena.sense(i, &self.population[i]);
                let action = self.population[i].brain.predict(&observation);
                let reward = arena.act(i, &mut self.population[i], action);
                self.population[i].fitness += reward;
                self.optimizer.record_step(i, observation, action);
            }
        }
    }

    /// Generation boundary: evaluate, record history, evolve.
    fn step_generation(&mut self) {
        self.optimizer.evaluate(&self.population);

        let mut generation_best = f32::NEG_INFINITY;
        let mut total = 0.0;
        let mut best_index = 0;
        for (i, individual) in self.population.iter().enumerate() {
            total += individual.fitness;
            if individual.fitness > generation_best {
                generation_best = individual.fitness;
                best_index = i;
            }
        }
        let generation_avg = total / self.population.len() as f32;

        if generation_best > self.best_fitness {
            self.best_fitness = generation_best;
            self.best_weights = self.population[best_index].brain.weights().to_vec();
            self.stagnation_count = 0;
        } else {
            self.stagnation_count += 1;
        }

        self.history.best_fitness.push(generation_best);
        self.history.avg_fitness.push(generation_avg);

        let survivors = std::mem::take(&mut self.population);
        self.population = self.optimizer.evolve(survivors, &self.config.arena);
    }

    /// Get current progress.
    pub fn progress(&self) -> TrainingProgress {
        TrainingProgress {
            generation: self.generations_completed(),
            best_fitness: self.best_fitness,
            generation_best: self.history.best_fitness.last().copied().unwrap_or(0.0),
            generation_avg: self.history.avg_fitness.last().copied().unwrap_or(0.0),
            stagnation_count: self.stagnation_count,
        }
    }

    /// Check if training should stop.
    fn should_stop(&self) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }

        if self.generations_completed() >= self.config.max_generations {
            return Some(StopReason::MaxGenerations);
        }

        if let Some(target) = self.config.target_fitness
            && self.best_fitness >= target
        {
            return Some(StopReason::TargetReached);
        }

        if let Some(limit) = self.config.stagnation_limit
            && self.stagnation_count >= limit
        {
            return Some(StopReason::Stagnation);
        }

        None
    }

    /// Run training with a per-generation progress callback.
    pub fn run_with_callback<F>(&mut self, arena: &mut dyn Arena, callback: F) -> TrainingResult
    where
        F: Fn(&TrainingProgress),
    {
        let start = Instant::now();
        self.initialize();

        let stop_reason = loop {
            if let Some(reason) = self.should_stop() {
                break reason;
            }

            self.run_episode(arena);
            self.step_generation();
            callback(&self.progress());
        };

        TrainingResult {
            generations: self.generations_completed(),
            best_fitness: self.best_fitness,
            final_avg_fitness: self.history.avg_fitness.last().copied().unwrap_or(0.0),
            best_weights: self.best_weights.clone(),
            stop_reason,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            history: self.history.clone(),
        }
    }

    /// Run training (blocking).
    pub fn run(&mut self, arena: &mut dyn Arena) -> TrainingResult {
        self.run_with_callback(arena, |_| {})
    }
}
