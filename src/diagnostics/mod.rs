//! Diagnostics and statistics
//!
//! This module provides per-generation summaries for display.

use serde::{Deserialize, Serialize};

use crate::population::population::Population;

/// Statistics for a single generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number
    pub generation: usize,
    /// Number of members
    pub size: usize,
    /// Number of members with an up-to-date fitness
    pub evaluated: usize,
    /// Number of members flagged as selected for the next generation
    pub selected: usize,
    /// Best fitness among evaluated members
    pub best_fitness: Option<f64>,
    /// Worst fitness among evaluated members
    pub worst_fitness: Option<f64>,
    /// Mean fitness among evaluated members
    pub mean_fitness: Option<f64>,
    /// Population diversity
    pub diversity: f64,
}

impl GenerationStats {
    /// Compute statistics from a population
    pub fn from_population(population: &Population, generation: usize) -> Self {
        let fitnesses: Vec<f64> = population.iter().filter_map(|g| g.fitness()).collect();

        let best = fitnesses.iter().copied().reduce(f64::max);
        let worst = fitnesses.iter().copied().reduce(f64::min);

        Self {
            generation,
            size: population.len(),
            evaluated: fitnesses.len(),
            selected: population.selected_count(),
            best_fitness: best,
            worst_fitness: worst,
            mean_fitness: population.mean_fitness(),
            diversity: population.diversity(),
        }
    }

    /// Fraction of members carried forward as elites
    pub fn selection_ratio(&self) -> f64 {
        if self.size == 0 {
            0.0
        } else {
            self.selected as f64 / self.size as f64
        }
    }
}
