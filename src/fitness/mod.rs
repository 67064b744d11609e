//! Fitness evaluation
//!
//! This module provides the fitness abstraction and the fish-bowl fitness.

pub mod fish;
pub mod traits;

pub mod prelude {
    pub use super::fish::*;
    pub use super::traits::*;
}
