//! Evolution controller
//!
//! Owns the append-only generation history and a cursor into it. Moving the
//! cursor past the last generation breeds a new one; moving it anywhere else
//! only changes which generation is displayed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

use crate::controller::config::EvolutionConfig;
use crate::diagnostics::GenerationStats;
use crate::error::EvoResult;
use crate::fitness::traits::Fitness;
use crate::genome::bounds::{Bounds, MultiBounds};
use crate::population::population::Population;

/// Builder for [`EvolutionController`]
///
/// ```rust
/// use fishbowl_evo::prelude::*;
///
/// let mut controller = EvolutionControllerBuilder::new()
///     .gene_ranges([(0.5, 2.0), (0.0, 360.0)])
///     .population_size(50)
///     .elitism(15)
///     .mutation_rate(0.1)
///     .seed(42)
///     .fitness(|g: &Genome| 1.0 / (1.0 + (g[0] - 1.0).powi(2)))
///     .build()?;
///
/// assert_eq!(controller.advance()?, 1);
/// # Ok::<(), EvolutionError>(())
/// ```
pub struct EvolutionControllerBuilder<Fit> {
    config: EvolutionConfig,
    fitness: Fit,
}

impl EvolutionControllerBuilder<()> {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: EvolutionConfig::default(),
            fitness: (),
        }
    }
}

impl Default for EvolutionControllerBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Fit> EvolutionControllerBuilder<Fit> {
    /// Replace the whole configuration
    pub fn config(mut self, config: EvolutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the gene ranges from ordered `(min, max)` pairs; checked at build time
    pub fn gene_ranges<I>(mut self, ranges: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.config.gene_ranges = ranges
            .into_iter()
            .map(|(min, max)| Bounds { min, max })
            .collect();
        self
    }

    /// Set the gene ranges
    pub fn bounds(mut self, bounds: MultiBounds) -> Self {
        self.config.gene_ranges = bounds;
        self
    }

    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set the number of elites per generation
    pub fn elitism(mut self, elitism: usize) -> Self {
        self.config.elitism = elitism;
        self
    }

    /// Set the per-gene mutation probability
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.config.mutation_rate = rate;
        self
    }

    /// Seed the random source used by [`build`](Self::build)
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the fitness function
    pub fn fitness<NewFit>(self, fitness: NewFit) -> EvolutionControllerBuilder<NewFit>
    where
        NewFit: Fitness,
    {
        EvolutionControllerBuilder {
            config: self.config,
            fitness,
        }
    }
}

impl<Fit: Fitness> EvolutionControllerBuilder<Fit> {
    /// Build with a [`StdRng`] seeded from the configured seed, or from entropy
    pub fn build(self) -> EvoResult<EvolutionController<Fit, StdRng>> {
        EvolutionController::from_config(self.config, self.fitness)
    }

    /// Build with a caller-supplied random source
    pub fn build_with_rng<R: Rng>(self, rng: R) -> EvoResult<EvolutionController<Fit, R>> {
        EvolutionController::new(self.config, self.fitness, rng)
    }
}

/// Drives generation transitions and keeps every generation for display
pub struct EvolutionController<Fit, R = StdRng> {
    config: EvolutionConfig,
    fitness: Fit,
    rng: R,
    /// One population per generation; never empty
    history: Vec<Population>,
    cursor: usize,
}

impl<Fit: Fitness> EvolutionController<Fit, StdRng> {
    /// Create a controller whose random source follows `config.seed`
    pub fn from_config(config: EvolutionConfig, fitness: Fit) -> EvoResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, fitness, rng)
    }
}

impl<Fit, R> EvolutionController<Fit, R>
where
    Fit: Fitness,
    R: Rng,
{
    /// Validate `config` and create generation 0 at random; the cursor starts at 0
    pub fn new(config: EvolutionConfig, fitness: Fit, mut rng: R) -> EvoResult<Self> {
        config.validate()?;

        let mut first = Population::new();
        first.initialize_gene_ranges(config.gene_ranges.iter().map(|b| (b.min, b.max)))?;
        first.initialize_population(config.population_size, &mut rng)?;
        info!(
            population_size = config.population_size,
            genes = config.gene_ranges.dimension(),
            elitism = config.elitism,
            mutation_rate = config.mutation_rate,
            "created generation 0"
        );

        Ok(Self {
            config,
            fitness,
            rng,
            history: vec![first],
            cursor: 0,
        })
    }

    /// Move to the next generation, breeding it first if the cursor is on the last one
    ///
    /// Breeding evaluates the current generation with the fitness function and
    /// appends its offspring generation. Otherwise the stored history is
    /// untouched. Returns the new cursor.
    #[instrument(level = "debug", skip(self), fields(cursor = self.cursor, generations = self.history.len()))]
    pub fn advance(&mut self) -> EvoResult<usize> {
        if self.is_at_last_generation() {
            let current = &mut self.history[self.cursor];
            current.evaluate_population(&self.fitness);
            let next = current.next_generation(
                self.config.elitism,
                self.config.mutation_rate,
                &mut self.rng,
            )?;
            let best = current.best().and_then(|g| g.fitness());
            self.history.push(next);
            info!(
                generation = self.history.len() - 1,
                parent_best = ?best,
                "bred new generation"
            );
        } else {
            debug!("advancing through stored history");
        }
        self.cursor += 1;
        Ok(self.cursor)
    }

    /// Evaluate a stored generation with the current fitness function
    ///
    /// Returns false if `index` is not a stored generation.
    pub fn evaluate_generation(&mut self, index: usize) -> bool {
        match self.history.get_mut(index) {
            Some(population) => {
                if population.selected_count() > 0 {
                    warn!(
                        generation = index,
                        "re-evaluating a generation that already bred its successor"
                    );
                }
                population.evaluate_population(&self.fitness);
                true
            }
            None => false,
        }
    }
}

impl<Fit, R> EvolutionController<Fit, R> {
    /// Move back one generation; no-op at generation 0. Returns the cursor.
    pub fn retreat(&mut self) -> usize {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.cursor
    }

    /// Jump to a stored generation
    ///
    /// Out-of-range requests, including negative ones, leave the cursor where
    /// it is. Returns the cursor.
    pub fn goto_generation<I: TryInto<usize>>(&mut self, generation: I) -> usize {
        match generation.try_into() {
            Ok(index) if index < self.history.len() => self.cursor = index,
            _ => debug!(cursor = self.cursor, "ignored out-of-range generation request"),
        }
        self.cursor
    }

    /// True iff the cursor is on the newest generation
    pub fn is_at_last_generation(&self) -> bool {
        self.cursor == self.history.len() - 1
    }

    /// Index of the displayed generation
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    /// The displayed generation
    pub fn current(&self) -> &Population {
        &self.history[self.cursor]
    }

    /// A stored generation
    pub fn generation(&self, index: usize) -> Option<&Population> {
        self.history.get(index)
    }

    /// Every stored generation, oldest first
    pub fn history(&self) -> &[Population] {
        &self.history
    }

    /// Number of stored generations
    pub fn generation_count(&self) -> usize {
        self.history.len()
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn fitness(&self) -> &Fit {
        &self.fitness
    }

    /// Mutable access to the fitness function, e.g. to retune its targets
    pub fn fitness_mut(&mut self) -> &mut Fit {
        &mut self.fitness
    }

    /// Statistics of a stored generation
    pub fn generation_stats(&self, index: usize) -> Option<GenerationStats> {
        self.history
            .get(index)
            .map(|population| GenerationStats::from_population(population, index))
    }
}
