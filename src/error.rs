//! Error types for fishbowl-evo
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for genome operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A gene range is empty or not finite
    #[error("Invalid bounds for gene {index}: min ({min}) must be <= max ({max}) and both finite")]
    InvalidBounds { index: usize, min: f64, max: f64 },
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Invalid configuration (gene ranges, population size, elitism, mutation rate)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// An internal invariant does not hold, e.g. nothing left to select from
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Numerical instability
    #[error("Numerical instability: {0}")]
    Numerical(String),
}

impl EvolutionError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into())
    }
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
