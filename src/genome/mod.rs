//! Genome types
//!
//! This module provides the real-valued genome and the per-gene bounds it is sampled from.

pub mod bounds;
#[allow(clippy::module_inception)]
pub mod genome;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::genome::*;
}
