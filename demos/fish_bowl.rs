//! Fish Bowl Evolution
//!
//! This example breeds a bowl of fish toward a target size, color, speed and
//! swimming radius, then walks back and forth through the stored generations
//! the way an interactive explorer would.
//!
//! Run with `RUST_LOG=fishbowl_evo=debug` to see each breeding step.

use fishbowl_evo::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Fish Bowl Evolution ===\n");

    let config = EvolutionConfig::default().with_seed(42);
    println!("Configuration:\n{}\n", config.to_json()?);

    // Big, teal, quick fish close to the glass
    let target = FishFitness::new(1.6, 180.0, 1.4, 11.0);

    let mut explorer = EvolutionControllerBuilder::new()
        .config(config)
        .fitness(target)
        .build()?;

    for _ in 0..20 {
        explorer.advance()?;
    }
    let last = explorer.generation_count() - 1;
    explorer.evaluate_generation(last);

    println!("{:>4} {:>10} {:>10} {:>9}", "gen", "best", "mean", "elites");
    for index in 0..explorer.generation_count() {
        if let Some(stats) = explorer.generation_stats(index) {
            println!(
                "{:>4} {:>10.4} {:>10.4} {:>9}",
                stats.generation,
                stats.best_fitness.unwrap_or(f64::NAN),
                stats.mean_fitness.unwrap_or(f64::NAN),
                stats.selected
            );
        }
    }

    if let Some(best) = explorer.current().best() {
        let traits = FishTraits::from_genome(best)?;
        println!("\nBest fish of generation {}:", explorer.current_index());
        println!("  size:        {:.3}", traits.size);
        println!("  color hue:   {:.1}°", traits.color_hue);
        println!("  speed:       {:.3}", traits.speed);
        println!("  bowl radius: {:.3}", traits.bowl_radius);
        println!("  fitness:     {:.4}", best.fitness_or_zero());
    }

    // Browsing stored generations never breeds new ones
    explorer.goto_generation(3);
    explorer.retreat();
    explorer.advance()?;
    println!(
        "\nBrowsed back to generation {} of {} (last: {})",
        explorer.current_index(),
        explorer.generation_count(),
        explorer.is_at_last_generation()
    );

    Ok(())
}
