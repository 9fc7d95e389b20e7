//! Neuroforage CLI - Run headless training from JSON configuration.

use std::fs;
use std::path::PathBuf;

use neuroforage::{
    engine::{TrackingArena, TrainingEngine},
    schema::TrainingConfig,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations]", args[0]);
        eprintln!();
        eprintln!("Run headless controller training from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to training configuration file");
        eprintln!("  generations  Override for the configured generation limit");
        eprintln!();
        eprintln!("An example configuration is printed with the --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let mut config: TrainingConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    if let Some(generations) = args.get(2) {
        config.max_generations = generations.parse().unwrap_or_else(|e| {
            eprintln!("Error parsing generation count: {}", e);
            std::process::exit(1);
        });
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    println!("Neuroforage Training");
    println!("====================");
    println!("Population: {}", config.population_size);
    println!("Steps per generation: {}", config.steps_per_generation);
    println!("Optimizer: {:?}", config.optimizer);
    println!("Generations: {}", config.max_generations);
    println!();

    let arena_seed = config.random_seed.unwrap_or_else(rand::random);
    let mut arena = TrackingArena::new(arena_seed);
    let mut engine = TrainingEngine::new(config);

    println!("Running training...");
    let result = engine.run_with_callback(&mut arena, |progress| {
        println!(
            "  Gen {}: best={:.1}, avg={:.1}, all-time best={:.1}",
            progress.generation,
            progress.generation_best,
            progress.generation_avg,
            progress.best_fitness
        );
    });

    println!();
    println!("Finished: {:?}", result.stop_reason);
    println!("  Generations: {}", result.generations);
    println!("  Best fitness: {:.1}", result.best_fitness);
    println!("  Final average fitness: {:.1}", result.final_avg_fitness);
    println!(
        "  Time: {:.2}s ({:.1} generations/s)",
        result.elapsed_seconds,
        result.generations as f64 / result.elapsed_seconds.max(1e-9)
    );
}

fn print_example_config() {
    let config = TrainingConfig::default();

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
