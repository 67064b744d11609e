//! Evolution controller
//!
//! This module provides the generation history, its navigation cursor and the
//! configuration consumed at setup.

pub mod config;
#[allow(clippy::module_inception)]
pub mod controller;

pub mod prelude {
    pub use super::config::*;
    pub use super::controller::*;
}
