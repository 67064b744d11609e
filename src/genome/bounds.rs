//! Bounds for gene values
//!
//! This module provides the per-gene ranges a population samples from.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;

/// Bounds for a single gene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Create new bounds
    ///
    /// # Panics
    /// Panics if min > max
    pub fn new(min: f64, max: f64) -> Self {
        assert!(
            min <= max,
            "Invalid bounds: min ({}) must be <= max ({})",
            min,
            max
        );
        Self { min, max }
    }

    /// Create bounds for gene `index`, rejecting empty or non-finite ranges
    pub fn try_new(index: usize, min: f64, max: f64) -> Result<Self, GenomeError> {
        let bounds = Self { min, max };
        bounds.check(index)?;
        Ok(bounds)
    }

    /// Create symmetric bounds centered at 0
    ///
    /// # Panics
    /// Panics if `half_width` is negative
    pub fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Check if a value is within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Draw a value uniformly from `[min, max]`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }

    /// Both ends and the width must be finite, otherwise sampling overflows
    pub(crate) fn check(&self, index: usize) -> Result<(), GenomeError> {
        if self.min <= self.max && (self.max - self.min).is_finite() {
            Ok(())
        } else {
            Err(GenomeError::InvalidBounds {
                index,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Per-gene bounds of a population, one entry per gene index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiBounds {
    /// Bounds for each gene
    pub bounds: Vec<Bounds>,
}

impl MultiBounds {
    /// Create new multi-dimensional bounds
    pub fn new(bounds: Vec<Bounds>) -> Self {
        Self { bounds }
    }

    /// Build from ordered `(min, max)` pairs, validating every pair
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, GenomeError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (min, max))| Bounds::try_new(i, min, max))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Create uniform bounds for all genes
    pub fn uniform(bound: Bounds, dimension: usize) -> Self {
        Self {
            bounds: vec![bound; dimension],
        }
    }

    /// Create symmetric bounds for all genes
    pub fn symmetric(half_width: f64, dimension: usize) -> Self {
        Self::uniform(Bounds::symmetric(half_width), dimension)
    }

    /// Get number of genes
    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    /// Check whether no gene ranges are configured
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Get bounds for a specific gene
    pub fn get(&self, index: usize) -> Option<&Bounds> {
        self.bounds.get(index)
    }

    /// Iterate over the per-gene bounds
    pub fn iter(&self) -> impl Iterator<Item = &Bounds> {
        self.bounds.iter()
    }

    /// Lower bounds in gene order
    pub fn mins(&self) -> Vec<f64> {
        self.bounds.iter().map(|b| b.min).collect()
    }

    /// Upper bounds in gene order
    pub fn maxs(&self) -> Vec<f64> {
        self.bounds.iter().map(|b| b.max).collect()
    }

    /// Validate every gene range
    pub fn validate(&self) -> Result<(), GenomeError> {
        self.bounds
            .iter()
            .enumerate()
            .try_for_each(|(i, b)| b.check(i))
    }

    /// Draw one value per gene, each uniformly from its own range
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.bounds.iter().map(|b| b.sample(rng)).collect()
    }

    /// Check if all values are within bounds
    pub fn contains_vec(&self, values: &[f64]) -> bool {
        values.len() == self.bounds.len()
            && values
                .iter()
                .zip(self.bounds.iter())
                .all(|(&v, b)| b.contains(v))
    }
}

impl FromIterator<Bounds> for MultiBounds {
    fn from_iter<I: IntoIterator<Item = Bounds>>(iter: I) -> Self {
        Self {
            bounds: iter.into_iter().collect(),
        }
    }
}
