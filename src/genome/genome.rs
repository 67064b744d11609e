//! Real-valued genome
//!
//! This module provides the genome type evolved by a [`Population`]: an
//! ordered vector of real genes, a scalar fitness and a stable identity.
//!
//! [`Population`]: crate::population::population::Population

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::fitness::traits::Fitness;
use crate::genome::bounds::MultiBounds;

/// Identity key of a genome, assigned when the genome is created
///
/// Two genomes holding identical genes are still distinct members if their
/// ids differ. Elites carried into the next generation keep their id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenomeId(pub u64);

impl fmt::Display for GenomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One candidate solution
///
/// Each gene index maps to a specific trait, so gene order is meaningful.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    id: GenomeId,
    genes: Vec<f64>,
    /// The fitness value (None until evaluated or after the genes changed)
    fitness: Option<f64>,
}

impl Genome {
    /// Create an unevaluated genome with the given genes
    pub fn new(id: GenomeId, genes: Vec<f64>) -> Self {
        Self {
            id,
            genes,
            fitness: None,
        }
    }

    /// Create a genome with genes drawn uniformly from each gene's range
    pub fn random<R: Rng>(id: GenomeId, bounds: &MultiBounds, rng: &mut R) -> Self {
        Self::new(id, bounds.sample(rng))
    }

    /// Identity of this genome
    pub fn id(&self) -> GenomeId {
        self.id
    }

    /// The genes of this genome
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Number of genes
    pub fn dimension(&self) -> usize {
        self.genes.len()
    }

    /// The fitness value, `None` if stale
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// The fitness value, reading a stale fitness as 0
    pub fn fitness_or_zero(&self) -> f64 {
        self.fitness.unwrap_or(0.0)
    }

    /// Check if this genome has an up-to-date fitness
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Set the fitness value
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Mark the fitness as stale
    pub fn clear_fitness(&mut self) {
        self.fitness = None;
    }

    /// Score this genome with `fitness`, replacing any previous value
    pub fn evaluate<F>(&mut self, fitness: &F) -> f64
    where
        F: Fitness + ?Sized,
    {
        let value = fitness.evaluate(self);
        self.fitness = Some(value);
        value
    }

    /// Resample genes in place
    ///
    /// Every gene is an independent trial: with probability `probability` it
    /// is replaced by a uniform draw from its full range in `bounds`.
    /// Returns the number of resampled genes. A genome with any resampled gene
    /// loses its fitness.
    pub fn mutate<R: Rng>(
        &mut self,
        probability: f64,
        bounds: &MultiBounds,
        rng: &mut R,
    ) -> usize {
        let mut mutated = 0;
        for (gene, bound) in self.genes.iter_mut().zip(bounds.iter()) {
            if rng.gen::<f64>() < probability {
                *gene = bound.sample(rng);
                mutated += 1;
            }
        }
        if mutated > 0 {
            self.clear_fitness();
        }
        mutated
    }

    /// Create a child whose genes each come from `parent1` or `parent2` by a fair coin flip
    pub fn crossover<R: Rng>(
        id: GenomeId,
        parent1: &Genome,
        parent2: &Genome,
        rng: &mut R,
    ) -> Result<Genome, GenomeError> {
        if parent1.dimension() != parent2.dimension() {
            return Err(GenomeError::DimensionMismatch {
                expected: parent1.dimension(),
                actual: parent2.dimension(),
            });
        }

        let genes = parent1
            .genes
            .iter()
            .zip(parent2.genes.iter())
            .map(|(&a, &b)| if rng.gen_bool(0.5) { a } else { b })
            .collect();

        Ok(Genome::new(id, genes))
    }

    /// Euclidean distance between two gene vectors
    pub fn distance(&self, other: &Self) -> f64 {
        self.genes
            .iter()
            .zip(other.genes.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl std::ops::Index<usize> for Genome {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.genes[index]
    }
}

impl<'a> IntoIterator for &'a Genome {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.genes.iter()
    }
}
