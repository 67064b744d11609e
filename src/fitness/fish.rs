//! Fish-bowl fitness
//!
//! The bowl scores fish by how close their traits are to user-tunable
//! targets. Each trait is scored with a Lorentzian peak centred on its target
//! and the per-trait scores are multiplied, so the result lies in `(0, 1]`
//! and reaches 1 only when every trait hits its target.
//!
//! Gene layout:
//!
//! | index | trait         | range        |
//! |-------|---------------|--------------|
//! | 0     | `size`        | `[0.5, 2]`   |
//! | 1     | `color_hue`   | `[0, 360]`   |
//! | 2     | `speed`       | `[0.5, 2]`   |
//! | 3     | `bowl_radius` | `[5, 12]`    |

use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::fitness::traits::{lorentzian, Fitness};
use crate::genome::bounds::{Bounds, MultiBounds};
use crate::genome::genome::Genome;

/// Number of genes of a fish genome
pub const FISH_GENES: usize = 4;

/// Hue scale used when comparing colors: a full turn maps onto 10 units
const HUE_SCALE: f64 = 10.0;

/// Gene ranges of the fish bowl, in gene order
pub fn fish_gene_ranges() -> MultiBounds {
    MultiBounds::new(vec![
        Bounds::new(0.5, 2.0),
        Bounds::new(0.0, 360.0),
        Bounds::new(0.5, 2.0),
        Bounds::new(5.0, 12.0),
    ])
}

/// Decoded traits of one fish
///
/// Hosts call [`FishTraits::from_genome`] right after swapping a genome into
/// a visual agent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FishTraits {
    pub size: f64,
    /// Hue in degrees
    pub color_hue: f64,
    pub speed: f64,
    pub bowl_radius: f64,
}

impl FishTraits {
    /// Decode the traits encoded in `genome`
    pub fn from_genome(genome: &Genome) -> Result<Self, GenomeError> {
        match *genome.genes() {
            [size, color_hue, speed, bowl_radius, ..] => Ok(Self {
                size,
                color_hue,
                speed,
                bowl_radius,
            }),
            _ => Err(GenomeError::DimensionMismatch {
                expected: FISH_GENES,
                actual: genome.dimension(),
            }),
        }
    }

    /// Hue as a fraction of a full turn, in `[0, 1]`
    pub fn hue_fraction(&self) -> f64 {
        self.color_hue / 360.0
    }
}

/// Fitness of a fish against tunable trait targets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FishFitness {
    /// Target size
    pub size: f64,
    /// Target hue in degrees
    pub color_hue: f64,
    /// Target speed
    pub speed: f64,
    /// Target bowl radius
    pub bowl_radius: f64,
}

impl FishFitness {
    /// Create a fitness function with the given targets
    pub fn new(size: f64, color_hue: f64, speed: f64, bowl_radius: f64) -> Self {
        Self {
            size,
            color_hue,
            speed,
            bowl_radius,
        }
    }

    pub fn set_size(&mut self, value: f64) {
        self.size = value;
    }

    pub fn set_color_hue(&mut self, value: f64) {
        self.color_hue = value;
    }

    pub fn set_speed(&mut self, value: f64) {
        self.speed = value;
    }

    pub fn set_bowl_radius(&mut self, value: f64) {
        self.bowl_radius = value;
    }

    /// Score decoded traits against the targets
    pub fn score(&self, traits: &FishTraits) -> f64 {
        let hue = traits.color_hue / 360.0 * HUE_SCALE;
        let target_hue = self.color_hue / 360.0 * HUE_SCALE;
        let hue_gap = (hue - target_hue).abs();
        let hue_distance = hue_gap.min(HUE_SCALE - hue_gap);

        lorentzian(traits.size - self.size)
            * lorentzian(hue_distance)
            * lorentzian(traits.speed - self.speed)
            * lorentzian(traits.bowl_radius - self.bowl_radius)
    }
}

impl Default for FishFitness {
    fn default() -> Self {
        Self::new(0.5, 0.0, 0.5, 5.0)
    }
}

impl Fitness for FishFitness {
    /// Genomes too short to encode a fish score 0
    fn evaluate(&self, genome: &Genome) -> f64 {
        FishTraits::from_genome(genome)
            .map(|traits| self.score(&traits))
            .unwrap_or(0.0)
    }
}
