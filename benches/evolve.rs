//! Benchmarks for the optimizer generation step.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use neuroforage::{
    engine::{WeightRng, spawn_population, strategy::Optimizer, strategy::Strategy},
    schema::{
        ArenaBounds, EvolutionaryConfig, OptimizerConfig, RewardAdjustConfig, SwarmConfig,
    },
};

fn bench_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve");

    let configs = [
        (
            "evolutionary",
            OptimizerConfig::Evolutionary(EvolutionaryConfig::default()),
        ),
        ("swarm", OptimizerConfig::Swarm(SwarmConfig::default())),
        (
            "reward_adjust",
            OptimizerConfig::RewardAdjust(RewardAdjustConfig::default()),
        ),
    ];

    for size in [15, 50, 200] {
        for (name, config) in &configs {
            let bounds = ArenaBounds::default();
            let mut rng = WeightRng::new(42);

            let population = {
                let mut population = spawn_population(size, &bounds, &mut rng);
                for (i, individual) in population.iter_mut().enumerate() {
                    individual.fitness = i as f32;
                }
                population
            };

            group.bench_with_input(BenchmarkId::new(*name, size), &size, |b, _| {
                b.iter_batched(
                    || {
                        let mut optimizer = Optimizer::from_config(config, size, 42);
                        // Give the reward strategy a full experience window
                        // so its evolve replays the capped step count.
                        if let Optimizer::RewardAdjust(strategy) = &mut optimizer {
                            for i in 0..size {
                                for _ in 0..100 {
                                    strategy.record_step(
                                        i,
                                        [0.4, 0.7, -0.2, 0.1, 1.0],
                                        [0.5, -0.5],
                                    );
                                }
                            }
                        }
                        (optimizer, population.clone())
                    },
                    |(mut optimizer, population)| {
                        optimizer.evaluate(&population);
                        optimizer.evolve(black_box(population), &bounds)
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_evolve);
criterion_main!(benches);
