//! Population type
//!
//! One generation of genomes sharing the same per-gene bounds, together with
//! the selection flags that mark which members were picked as elites for the
//! next generation.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, warn};

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::Fitness;
use crate::genome::bounds::MultiBounds;
use crate::genome::genome::{Genome, GenomeId};

/// A population of genomes (one generation)
#[derive(Clone, Debug, Default)]
pub struct Population {
    /// Per-gene bounds shared by every member
    bounds: MultiBounds,
    /// The members of this generation
    members: Vec<Genome>,
    /// Selection flag per member, same length as `members`
    selected: Vec<bool>,
    /// Next identity handed out to a newly created genome
    next_id: u64,
}

impl Population {
    /// Create an empty population without gene ranges
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty population with the given gene ranges
    pub fn with_bounds(bounds: MultiBounds) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Create a random population of `size` genomes within `bounds`
    pub fn random<R: Rng>(size: usize, bounds: MultiBounds, rng: &mut R) -> EvoResult<Self> {
        let mut population = Self::new();
        population.initialize_gene_ranges(bounds.iter().map(|b| (b.min, b.max)))?;
        population.initialize_population(size, rng)?;
        Ok(population)
    }

    /// Create a population from existing genomes, all flags cleared
    ///
    /// Fails if a genome's length differs from the number of gene ranges.
    pub fn from_genomes(bounds: MultiBounds, members: Vec<Genome>) -> EvoResult<Self> {
        bounds.validate()?;
        if let Some(genome) = members.iter().find(|g| g.dimension() != bounds.dimension()) {
            return Err(EvolutionError::configuration(format!(
                "genome {} has {} genes but {} gene ranges are configured",
                genome.id(),
                genome.dimension(),
                bounds.dimension()
            )));
        }
        let next_id = members.iter().map(|g| g.id().0 + 1).max().unwrap_or(0);
        let selected = vec![false; members.len()];
        Ok(Self {
            bounds,
            members,
            selected,
            next_id,
        })
    }

    /// Set the gene ranges from ordered `(min, max)` pairs, one per gene
    ///
    /// Fails without changing anything if a range is invalid, or if members
    /// already exist and the number of ranges differs from their gene count.
    pub fn initialize_gene_ranges<I>(&mut self, ranges: I) -> EvoResult<()>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let bounds = MultiBounds::try_from_pairs(ranges)?;
        if let Some(first) = self.members.first() {
            if first.dimension() != bounds.dimension() {
                return Err(EvolutionError::configuration(format!(
                    "{} gene ranges given for genomes with {} genes",
                    bounds.dimension(),
                    first.dimension()
                )));
            }
        }
        self.bounds = bounds;
        Ok(())
    }

    /// Replace the members with `size` random genomes and clear all flags
    pub fn initialize_population<R: Rng>(&mut self, size: usize, rng: &mut R) -> EvoResult<()> {
        if size == 0 {
            return Err(EvolutionError::configuration(
                "population size must be at least 1",
            ));
        }
        if self.bounds.is_empty() {
            return Err(EvolutionError::configuration(
                "gene ranges must be initialized before the population",
            ));
        }

        let mut members = Vec::with_capacity(size);
        for _ in 0..size {
            let id = self.allocate_id();
            members.push(Genome::random(id, &self.bounds, rng));
        }
        self.members = members;
        self.reset_selections();
        Ok(())
    }

    /// Mark every member as not selected
    pub fn reset_selections(&mut self) {
        self.selected = vec![false; self.members.len()];
    }

    /// Evaluate every member with `fitness`
    ///
    /// Selection reads these values; a member that was never evaluated counts
    /// as fitness 0.
    pub fn evaluate_population<F>(&mut self, fitness: &F)
    where
        F: Fitness + ?Sized,
    {
        for genome in &mut self.members {
            genome.evaluate(fitness);
        }
    }

    /// Fitness-proportionate (roulette wheel) selection of one member
    ///
    /// Members whose slot index is in `excluded` are skipped. Returns the slot
    /// index of the chosen member. Does not mark it as selected.
    pub fn select<R: Rng>(&self, excluded: &HashSet<usize>, rng: &mut R) -> EvoResult<usize> {
        let eligible: Vec<usize> = (0..self.members.len())
            .filter(|i| !excluded.contains(i))
            .collect();
        let last = *eligible.last().ok_or_else(|| {
            EvolutionError::invariant(format!(
                "no eligible members left to select from ({} members, {} excluded)",
                self.members.len(),
                excluded.len()
            ))
        })?;

        let total: f64 = eligible
            .iter()
            .map(|&i| self.members[i].fitness_or_zero())
            .sum();
        if !total.is_finite() {
            return Err(EvolutionError::Numerical(format!(
                "total fitness of eligible members is {total}"
            )));
        }

        let threshold = if total > 0.0 {
            rng.gen_range(0.0..total)
        } else {
            0.0
        };

        let mut cumulative = 0.0;
        for &i in &eligible {
            cumulative += self.members[i].fitness_or_zero();
            if cumulative >= threshold {
                return Ok(i);
            }
        }

        warn!(threshold, cumulative, "roulette wheel fell through, picking last eligible member");
        Ok(last)
    }

    /// Select `amount` distinct members and flag them as selected
    ///
    /// Returns a new population holding clones of the chosen genomes in draw
    /// order, with the same bounds and all flags cleared.
    pub fn selection<R: Rng>(&mut self, amount: usize, rng: &mut R) -> EvoResult<Population> {
        if amount > self.members.len() {
            return Err(EvolutionError::configuration(format!(
                "cannot select {} distinct members from a population of {}",
                amount,
                self.members.len()
            )));
        }

        let mut chosen: Vec<usize> = Vec::with_capacity(amount);
        let mut excluded: HashSet<usize> = HashSet::with_capacity(amount);
        for _ in 0..amount {
            let index = self.select(&excluded, rng)?;
            excluded.insert(index);
            chosen.push(index);
        }

        for &index in &chosen {
            self.selected[index] = true;
        }
        debug!(amount, "selected elites");

        let members: Vec<Genome> = chosen.iter().map(|&i| self.members[i].clone()).collect();
        Ok(Population {
            bounds: self.bounds.clone(),
            selected: vec![false; members.len()],
            members,
            next_id: self.next_id,
        })
    }

    /// Append `amount_to_add` crossover offspring
    ///
    /// Both parents of every child are drawn uniformly, with replacement, from
    /// the members present before this call.
    pub fn crossover_population<R: Rng>(
        &mut self,
        amount_to_add: usize,
        rng: &mut R,
    ) -> EvoResult<()> {
        if amount_to_add == 0 {
            return Ok(());
        }
        let parents = self.members.len();
        if parents == 0 {
            return Err(EvolutionError::invariant(
                "crossover requires at least one existing member",
            ));
        }

        let mut offspring = Vec::with_capacity(amount_to_add);
        for _ in 0..amount_to_add {
            let parent1 = &self.members[rng.gen_range(0..parents)];
            let parent2 = &self.members[rng.gen_range(0..parents)];
            let id = GenomeId(self.next_id + offspring.len() as u64);
            offspring.push(Genome::crossover(id, parent1, parent2, rng)?);
        }

        self.next_id += offspring.len() as u64;
        self.members.extend(offspring);
        self.selected.resize(self.members.len(), false);
        debug!(amount_to_add, parents, "appended crossover offspring");
        Ok(())
    }

    /// Mutate every member with the population's own bounds
    pub fn mutate_population<R: Rng>(&mut self, probability: f64, rng: &mut R) -> EvoResult<()> {
        check_probability(probability)?;
        let mut mutated = 0;
        for genome in &mut self.members {
            mutated += genome.mutate(probability, &self.bounds, rng);
        }
        debug!(probability, mutated, "mutated population");
        Ok(())
    }

    /// Derive the next generation
    ///
    /// `self` must have been evaluated. Picks `elitism` distinct elites by
    /// roulette wheel (flagging them on `self`), refills to the current size
    /// with crossover offspring of the elites, mutates every member of the new
    /// generation and clears its flags. The returned population is
    /// unevaluated.
    pub fn next_generation<R: Rng>(
        &mut self,
        elitism: usize,
        mutation_probability: f64,
        rng: &mut R,
    ) -> EvoResult<Population> {
        let size = self.members.len();
        if elitism == 0 {
            return Err(EvolutionError::configuration("elitism must be at least 1"));
        }
        if elitism >= size {
            return Err(EvolutionError::configuration(format!(
                "elitism ({elitism}) must be smaller than the population size ({size})"
            )));
        }
        check_probability(mutation_probability)?;
        if !self.all_evaluated() {
            warn!(
                evaluated = self.count_evaluated(),
                size, "deriving next generation from a partially evaluated population"
            );
        }

        let mut next = self.selection(elitism, rng)?;
        next.crossover_population(size - elitism, rng)?;
        next.mutate_population(mutation_probability, rng)?;
        next.reset_selections();
        // elites carry scores from the parent's targets
        for genome in &mut next.members {
            genome.clear_fitness();
        }
        Ok(next)
    }

    /// Whether `genome` is a member of this population and flagged as selected
    pub fn is_selected(&self, genome: &Genome) -> bool {
        self.index_of(genome.id())
            .is_some_and(|index| self.selected[index])
    }

    /// Whether the member at `index` is flagged as selected
    pub fn is_selected_at(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Slot index of the member with the given id
    pub fn index_of(&self, id: GenomeId) -> Option<usize> {
        self.members.iter().position(|g| g.id() == id)
    }

    /// Get the gene ranges
    pub fn bounds(&self) -> &MultiBounds {
        &self.bounds
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Get a member by index
    pub fn get(&self, index: usize) -> Option<&Genome> {
        self.members.get(index)
    }

    /// Get an iterator over the members
    pub fn iter(&self) -> impl Iterator<Item = &Genome> {
        self.members.iter()
    }

    /// Get an iterator over `(member, selected)` pairs
    pub fn iter_with_selection(&self) -> impl Iterator<Item = (&Genome, bool)> {
        self.members.iter().zip(self.selected.iter().copied())
    }

    /// Get the members
    pub fn members(&self) -> &[Genome] {
        &self.members
    }

    /// Get the selection flags, one per member
    pub fn selected_flags(&self) -> &[bool] {
        &self.selected
    }

    /// Number of members flagged as selected
    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Check if all members have been evaluated
    pub fn all_evaluated(&self) -> bool {
        self.members.iter().all(|g| g.is_evaluated())
    }

    /// Count the number of evaluated members
    pub fn count_evaluated(&self) -> usize {
        self.members.iter().filter(|g| g.is_evaluated()).count()
    }

    /// Get the best member (by fitness)
    pub fn best(&self) -> Option<&Genome> {
        self.members
            .iter()
            .filter(|g| g.is_evaluated())
            .max_by(|a, b| {
                a.fitness_or_zero()
                    .partial_cmp(&b.fitness_or_zero())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Compute mean fitness of the evaluated members
    pub fn mean_fitness(&self) -> Option<f64> {
        let evaluated: Vec<f64> = self.members.iter().filter_map(|g| g.fitness()).collect();

        if evaluated.is_empty() {
            None
        } else {
            Some(evaluated.iter().sum::<f64>() / evaluated.len() as f64)
        }
    }

    /// Compute population diversity (average pairwise distance)
    pub fn diversity(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }

        let mut total_distance = 0.0;
        let mut count = 0;

        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                total_distance += self.members[i].distance(&self.members[j]);
                count += 1;
            }
        }

        total_distance / count as f64
    }

    fn allocate_id(&mut self) -> GenomeId {
        let id = GenomeId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn check_probability(probability: f64) -> EvoResult<()> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(EvolutionError::configuration(format!(
            "mutation probability must be in [0, 1], got {probability}"
        )))
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Genome;

    fn index(&self, index: usize) -> &Self::Output {
        &self.members[index]
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Genome;
    type IntoIter = std::slice::Iter<'a, Genome>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ranges() -> Vec<(f64, f64)> {
        vec![(0.5, 2.0), (0.0, 360.0)]
    }

    fn peak_at_one(g: &Genome) -> f64 {
        1.0 / (1.0 + (g[0] - 1.0).powi(2))
    }

    /// Population with fixed fitness values, one gene each
    fn create_test_population(fitness: &[f64]) -> Population {
        let members = fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut g = Genome::new(GenomeId(i as u64), vec![i as f64]);
                g.set_fitness(f);
                g
            })
            .collect();
        let bounds = MultiBounds::symmetric(100.0, 1);
        Population::from_genomes(bounds, members).unwrap()
    }

    fn evaluated_population(size: usize, seed: u64) -> (Population, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = MultiBounds::try_from_pairs(ranges()).unwrap();
        let mut pop = Population::random(size, bounds, &mut rng).unwrap();
        pop.evaluate_population(&peak_at_one);
        (pop, rng)
    }

    #[test]
    fn test_population_new() {
        let pop = Population::new();
        assert!(pop.is_empty());
        assert!(pop.bounds().is_empty());
    }

    #[test]
    fn test_initialize_population() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pop = Population::new();
        pop.initialize_gene_ranges(ranges()).unwrap();
        pop.initialize_population(50, &mut rng).unwrap();

        assert_eq!(pop.len(), 50);
        assert_eq!(pop.selected_flags().len(), 50);
        assert_eq!(pop.selected_count(), 0);
        assert!(!pop.all_evaluated());
        for genome in pop.iter() {
            assert!(pop.bounds().contains_vec(genome.genes()));
        }
    }

    #[test]
    fn test_initialize_population_assigns_distinct_ids() {
        let mut rng = StdRng::seed_from_u64(1);
        let pop = Population::random(20, MultiBounds::try_from_pairs(ranges()).unwrap(), &mut rng).unwrap();
        let ids: HashSet<GenomeId> = pop.iter().map(|g| g.id()).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_initialize_population_requires_ranges_and_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pop = Population::new();
        assert!(matches!(
            pop.initialize_population(10, &mut rng),
            Err(EvolutionError::Configuration(_))
        ));

        pop.initialize_gene_ranges(ranges()).unwrap();
        assert!(matches!(
            pop.initialize_population(0, &mut rng),
            Err(EvolutionError::Configuration(_))
        ));
    }

    #[test]
    fn test_initialize_gene_ranges_rejects_mismatch_with_members() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pop = Population::random(5, MultiBounds::try_from_pairs(ranges()).unwrap(), &mut rng).unwrap();

        let result = pop.initialize_gene_ranges(vec![(0.0, 1.0)]);
        assert!(matches!(result, Err(EvolutionError::Configuration(_))));
        assert_eq!(pop.bounds().dimension(), 2);

        // same length is accepted
        pop.initialize_gene_ranges(vec![(0.0, 1.0), (0.0, 1.0)])
            .unwrap();
        assert_eq!(pop.bounds().maxs(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_initialize_gene_ranges_rejects_inverted_range() {
        let mut pop = Population::new();
        let result = pop.initialize_gene_ranges(vec![(0.0, 1.0), (5.0, 2.0)]);
        assert!(matches!(result, Err(EvolutionError::Genome(_))));
        assert!(pop.bounds().is_empty());
    }

    #[test]
    fn test_initialize_gene_ranges_rejects_overflowing_width() {
        let mut pop = Population::new();
        let result = pop.initialize_gene_ranges([(-f64::MAX, f64::MAX)]);
        assert!(matches!(result, Err(EvolutionError::Genome(_))));

        let mut rng = StdRng::seed_from_u64(17);
        assert!(pop.initialize_population(3, &mut rng).is_err());
        assert!(pop.is_empty());
    }

    #[test]
    fn test_evaluate_population() {
        let (pop, _) = evaluated_population(10, 3);
        assert!(pop.all_evaluated());
        for genome in pop.iter() {
            assert_relative_eq!(genome.fitness().unwrap(), peak_at_one(genome));
        }
    }

    #[test]
    fn test_select_single_nonzero_member() {
        let pop = create_test_population(&[0.0, 0.0, 5.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            assert_eq!(pop.select(&HashSet::new(), &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_select_respects_exclusions() {
        let pop = create_test_population(&[1.0, 100.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(11);
        let excluded: HashSet<usize> = [1].into_iter().collect();
        for _ in 0..100 {
            assert_ne!(pop.select(&excluded, &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn test_select_all_zero_fitness_picks_first_eligible() {
        let pop = create_test_population(&[0.0, 0.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(5);
        let excluded: HashSet<usize> = [0].into_iter().collect();
        assert_eq!(pop.select(&excluded, &mut rng).unwrap(), 1);
    }

    #[test]
    fn test_select_is_fitness_proportionate() {
        let pop = create_test_population(&[1.0, 3.0]);
        let mut rng = StdRng::seed_from_u64(21);
        let draws = 20_000;
        let heavy = (0..draws)
            .filter(|_| pop.select(&HashSet::new(), &mut rng).unwrap() == 1)
            .count();
        let ratio = heavy as f64 / draws as f64;
        assert!((ratio - 0.75).abs() < 0.02, "ratio = {ratio}");
    }

    #[test]
    fn test_select_everything_excluded_is_invariant_error() {
        let pop = create_test_population(&[1.0, 2.0]);
        let mut rng = StdRng::seed_from_u64(1);
        let excluded: HashSet<usize> = [0, 1].into_iter().collect();
        assert!(matches!(
            pop.select(&excluded, &mut rng),
            Err(EvolutionError::Invariant(_))
        ));
    }

    #[test]
    fn test_select_non_finite_total() {
        let pop = create_test_population(&[1.0, f64::INFINITY]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            pop.select(&HashSet::new(), &mut rng),
            Err(EvolutionError::Numerical(_))
        ));
    }

    #[test]
    fn test_selection_returns_distinct_flagged_members() {
        let (mut pop, mut rng) = evaluated_population(30, 4);
        let elites = pop.selection(10, &mut rng).unwrap();

        assert_eq!(elites.len(), 10);
        assert_eq!(elites.selected_count(), 0);
        assert_eq!(elites.bounds(), pop.bounds());

        let ids: HashSet<GenomeId> = elites.iter().map(|g| g.id()).collect();
        assert_eq!(ids.len(), 10);
        assert_eq!(pop.selected_count(), 10);
        for elite in elites.iter() {
            assert!(pop.is_selected(elite));
        }
    }

    #[test]
    fn test_selection_distinct_even_with_identical_genes() {
        let members = (0..4)
            .map(|i| {
                let mut g = Genome::new(GenomeId(i), vec![1.0]);
                g.set_fitness(1.0);
                g
            })
            .collect();
        let mut pop = Population::from_genomes(MultiBounds::symmetric(2.0, 1), members).unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        let elites = pop.selection(4, &mut rng).unwrap();
        let ids: HashSet<GenomeId> = elites.iter().map(|g| g.id()).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(pop.selected_count(), 4);
    }

    #[test]
    fn test_selection_too_many_leaves_source_unchanged() {
        let (mut pop, mut rng) = evaluated_population(5, 4);
        let result = pop.selection(6, &mut rng);
        assert!(matches!(result, Err(EvolutionError::Configuration(_))));
        assert_eq!(pop.selected_count(), 0);
    }

    #[test]
    fn test_crossover_population_appends_offspring() {
        let (mut pop, mut rng) = evaluated_population(5, 6);
        let parents: Vec<Genome> = pop.members().to_vec();
        pop.crossover_population(7, &mut rng).unwrap();

        assert_eq!(pop.len(), 12);
        assert_eq!(pop.selected_flags().len(), 12);
        assert_eq!(&pop.members()[..5], &parents[..]);
        for child in &pop.members()[5..] {
            assert!(!child.is_evaluated());
            for (i, gene) in child.genes().iter().enumerate() {
                assert!(parents.iter().any(|p| p.genes()[i] == *gene));
            }
        }
        let ids: HashSet<GenomeId> = pop.iter().map(|g| g.id()).collect();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_crossover_population_from_empty_fails() {
        let mut pop = Population::with_bounds(MultiBounds::symmetric(1.0, 2));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            pop.crossover_population(3, &mut rng),
            Err(EvolutionError::Invariant(_))
        ));
        assert!(pop.crossover_population(0, &mut rng).is_ok());
    }

    #[test]
    fn test_mutate_population_zero_probability() {
        let (mut pop, mut rng) = evaluated_population(10, 7);
        let before: Vec<Genome> = pop.members().to_vec();
        pop.mutate_population(0.0, &mut rng).unwrap();
        assert_eq!(pop.members(), &before[..]);
    }

    #[test]
    fn test_mutate_population_stays_in_bounds() {
        let (mut pop, mut rng) = evaluated_population(10, 7);
        pop.mutate_population(1.0, &mut rng).unwrap();
        for genome in pop.iter() {
            assert!(pop.bounds().contains_vec(genome.genes()));
            assert!(!genome.is_evaluated());
        }
    }

    #[test]
    fn test_mutate_population_rejects_bad_probability() {
        let (mut pop, mut rng) = evaluated_population(3, 7);
        assert!(pop.mutate_population(1.5, &mut rng).is_err());
        assert!(pop.mutate_population(-0.1, &mut rng).is_err());
        assert!(pop.all_evaluated());
    }

    #[test]
    fn test_next_generation() {
        let (mut pop, mut rng) = evaluated_population(50, 12);
        let next = pop.next_generation(15, 0.1, &mut rng).unwrap();

        assert_eq!(next.len(), 50);
        assert_eq!(next.selected_count(), 0);
        assert_eq!(next.bounds(), pop.bounds());
        assert_eq!(pop.selected_count(), 15);
        for genome in next.iter() {
            assert!(next.bounds().contains_vec(genome.genes()));
        }
        // the parent generation keeps its genes and fitness
        assert!(pop.all_evaluated());
    }

    #[test]
    fn test_next_generation_is_unevaluated() {
        let (mut pop, mut rng) = evaluated_population(50, 15);
        let next = pop.next_generation(15, 0.1, &mut rng).unwrap();

        assert_eq!(next.count_evaluated(), 0);
        assert!(next.best().is_none());
        assert!(next.mean_fitness().is_none());

        // no mutation at all still leaves the elites stale
        let (mut pop, mut rng) = evaluated_population(20, 16);
        let next = pop.next_generation(5, 0.0, &mut rng).unwrap();
        assert_eq!(next.count_evaluated(), 0);
        assert!(pop.all_evaluated());
    }

    #[test]
    fn test_next_generation_ids_unique_across_lineage() {
        let (mut pop, mut rng) = evaluated_population(20, 13);
        let next = pop.next_generation(5, 0.1, &mut rng).unwrap();
        let ids: HashSet<GenomeId> = next.iter().map(|g| g.id()).collect();
        assert_eq!(ids.len(), 20);

        // offspring ids never collide with any parent id
        let parent_ids: HashSet<GenomeId> = pop.iter().map(|g| g.id()).collect();
        let reused = ids.intersection(&parent_ids).count();
        assert_eq!(reused, 5);
    }

    #[test]
    fn test_next_generation_rejects_bad_elitism() {
        let (mut pop, mut rng) = evaluated_population(10, 14);
        assert!(matches!(
            pop.next_generation(10, 0.1, &mut rng),
            Err(EvolutionError::Configuration(_))
        ));
        assert!(matches!(
            pop.next_generation(0, 0.1, &mut rng),
            Err(EvolutionError::Configuration(_))
        ));
        assert!(matches!(
            pop.next_generation(3, 2.0, &mut rng),
            Err(EvolutionError::Configuration(_))
        ));
        assert_eq!(pop.selected_count(), 0);
    }

    #[test]
    fn test_is_selected_non_member() {
        let (mut pop, mut rng) = evaluated_population(5, 15);
        pop.selection(5, &mut rng).unwrap();
        let stranger = Genome::new(GenomeId(999), vec![1.0, 1.0]);
        assert!(!pop.is_selected(&stranger));
        assert!(!pop.is_selected_at(42));
        assert!(pop.is_selected_at(0));
    }

    #[test]
    fn test_best_and_mean_fitness() {
        let pop = create_test_population(&[1.0, 4.0, 2.0]);
        assert_eq!(pop.best().unwrap().id(), GenomeId(1));
        assert_relative_eq!(pop.mean_fitness().unwrap(), 7.0 / 3.0);
    }

    #[test]
    fn test_population_diversity() {
        let members = vec![
            Genome::new(GenomeId(0), vec![0.0, 0.0]),
            Genome::new(GenomeId(1), vec![1.0, 0.0]),
            Genome::new(GenomeId(2), vec![0.0, 1.0]),
        ];
        let pop = Population::from_genomes(MultiBounds::symmetric(1.0, 2), members).unwrap();

        let diversity = pop.diversity();
        // Average of distances: (1, 1, sqrt(2)) / 3 ≈ 1.14
        assert!(diversity > 1.0 && diversity < 1.2);
    }

    #[test]
    fn test_from_genomes_rejects_wrong_length() {
        let members = vec![Genome::new(GenomeId(0), vec![0.0])];
        let result = Population::from_genomes(MultiBounds::symmetric(1.0, 2), members);
        assert!(matches!(result, Err(EvolutionError::Configuration(_))));
    }
}
