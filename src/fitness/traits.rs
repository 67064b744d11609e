//! Fitness traits
//!
//! This module defines the fitness evaluation trait injected by the host.

use crate::genome::genome::Genome;

/// Fitness evaluation trait
///
/// Maps a genome to a finite, non-negative score (higher = fitter). The score
/// feeds fitness-proportionate selection, so negative or non-finite values
/// break the roulette wheel.
///
/// Any closure `Fn(&Genome) -> f64` is a fitness function.
pub trait Fitness {
    /// Evaluate fitness
    fn evaluate(&self, genome: &Genome) -> f64;
}

impl<F> Fitness for F
where
    F: Fn(&Genome) -> f64,
{
    fn evaluate(&self, genome: &Genome) -> f64 {
        self(genome)
    }
}

/// Lorentzian peak `1 / (1 + d²)` used to score a distance from a target
///
/// Equals 1 at `distance == 0` and decays towards 0 on both sides.
pub fn lorentzian(distance: f64) -> f64 {
    1.0 / (1.0 + distance * distance)
}
