//! Configuration for the evolution controller

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::fish::fish_gene_ranges;
use crate::genome::bounds::MultiBounds;

/// Setup values consumed once when the controller creates generation 0
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Per-gene `[min, max]` ranges, in gene order
    pub gene_ranges: MultiBounds,
    /// Population size
    pub population_size: usize,
    /// Number of distinct elites bred into each next generation
    pub elitism: usize,
    /// Per-gene mutation probability
    pub mutation_rate: f64,
    /// Random seed (None for entropy)
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            gene_ranges: fish_gene_ranges(),
            population_size: 50,
            elitism: 15,
            mutation_rate: 0.1,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Create a configuration for the given gene ranges with default parameters
    pub fn new(gene_ranges: MultiBounds) -> Self {
        Self {
            gene_ranges,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> EvoResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EvolutionError::configuration(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> EvoResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EvolutionError::configuration(format!("unserializable config: {e}")))
    }

    pub fn with_gene_ranges(mut self, gene_ranges: MultiBounds) -> Self {
        self.gene_ranges = gene_ranges;
        self
    }

    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_elitism(mut self, elitism: usize) -> Self {
        self.elitism = elitism;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration before any generation is created
    pub fn validate(&self) -> EvoResult<()> {
        if self.gene_ranges.is_empty() {
            return Err(EvolutionError::configuration(
                "at least one gene range is required",
            ));
        }
        self.gene_ranges.validate()?;
        if self.population_size == 0 {
            return Err(EvolutionError::configuration(
                "population size must be at least 1",
            ));
        }
        if self.elitism == 0 {
            return Err(EvolutionError::configuration("elitism must be at least 1"));
        }
        if self.elitism >= self.population_size {
            return Err(EvolutionError::configuration(format!(
                "elitism ({}) must be smaller than the population size ({})",
                self.elitism, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolutionError::configuration(format!(
                "mutation rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}
