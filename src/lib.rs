//! # fishbowl-evo
//!
//! An interactive generational genetic algorithm with a navigable history.
//!
//! A population of real-valued genomes evolves one generation at a time
//! toward higher fitness against a target the user can retune between
//! generations. Every generation is kept so a display layer can step back
//! and forth through the history and highlight which genomes were picked
//! as elites.
//!
//! ## Core Concepts
//!
//! - **Genome**: a fixed-length vector of real genes plus a fitness score
//! - **Population**: one generation sharing per-gene bounds; breeds the next
//!   generation by roulette-wheel elitism, uniform crossover and resampling mutation
//! - **EvolutionController**: owns the generation history and a cursor into it
//!
//! ## Quick Start
//!
//! ```rust
//! use fishbowl_evo::prelude::*;
//!
//! let mut controller = EvolutionControllerBuilder::new()
//!     .config(EvolutionConfig::default().with_seed(42))
//!     .fitness(FishFitness::default())
//!     .build()?;
//!
//! controller.advance()?;
//! for (genome, selected) in controller.history()[0].iter_with_selection() {
//!     let traits = FishTraits::from_genome(genome)?;
//!     assert!((0.5..=2.0).contains(&traits.size));
//!     if selected {
//!         println!("{} hue {:.2} radius {:.1}", genome.id(), traits.hue_fraction(), traits.bowl_radius);
//!     }
//! }
//! # Ok::<(), EvolutionError>(())
//! ```

pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::controller::prelude::*;
    pub use crate::diagnostics::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::population::prelude::*;
}
