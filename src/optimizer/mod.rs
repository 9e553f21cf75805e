pub mod crossover;
pub mod initialization;
pub mod mutation;
pub mod progress;
pub mod refine;
pub mod runner;
pub mod selection;

pub use self::progress::{CancelFlag, ChannelProgress, Flow, NoProgress, ProgressCallback, ProgressEvent};
pub use self::runner::Optimizer;

use crate::catalog::{Catalog, ItemId};
use crate::config::{GeneticParams, SearchParams};
use crate::consts::{DEFAULT_BASE_VALUE, DEFAULT_MAX_PERMS, MAX_ACTIVE_EFFECTS};
use crate::error::{MfResult, MixForgeError};
use crate::scorer::{ActiveEffects, Evaluation, Scorer};
use fastrand::Rng;
use serde::Serialize;
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Ordered item ids; repeats allowed.
pub type Combination = Vec<ItemId>;

/// An evaluated combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub combination: Combination,
    pub evaluation: Evaluation,
    pub profit: f64,
}

impl Candidate {
    pub fn new(combination: Combination, evaluation: Evaluation, base_value: f64) -> Self {
        let profit = evaluation.profit(base_value);
        Self {
            combination,
            evaluation,
            profit,
        }
    }

    pub fn evaluate(
        scorer: &Scorer,
        combination: Combination,
        seed: &ActiveEffects,
        base_value: f64,
    ) -> Self {
        let evaluation = scorer.evaluate(&combination, seed);
        Self::new(combination, evaluation, base_value)
    }
}

/// Stable sort, highest profit first.
pub fn sort_by_profit(population: &mut [Candidate]) {
    population.sort_by(|a, b| b.profit.total_cmp(&a.profit));
}

/// Uniform real in `[lo, hi)`.
#[inline(always)]
pub fn uniform(rng: &mut Rng, lo: f64, hi: f64) -> f64 {
    lo + rng.f64() * (hi - lo)
}

/// Hyperparameters drawn once per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunParams {
    pub population_size: usize,
    pub base_mutation_rate: f64,
    pub tournament_size: usize,
}

impl RunParams {
    pub fn draw(params: &GeneticParams, rng: &mut Rng) -> Self {
        Self {
            population_size: rng.usize(params.population_min..=params.population_max),
            base_mutation_rate: uniform(rng, params.mutation_min, params.mutation_max),
            tournament_size: rng.usize(params.tournament_min..=params.tournament_max),
        }
    }

    /// Linear decay toward half the base rate at the generation ceiling.
    pub fn mutation_rate_at(&self, generation: usize, max_generations: usize) -> f64 {
        let progress = generation as f64 / (2.0 * max_generations as f64);
        self.base_mutation_rate * (1.0 - progress)
    }

    /// `ceil(pop * U(lo, hi))`, at least one, at most the whole population.
    pub fn elite_count(&self, params: &GeneticParams, rng: &mut Rng) -> usize {
        let fraction = uniform(rng, params.elite_min, params.elite_max);
        let count = (self.population_size as f64 * fraction).ceil() as usize;
        count.clamp(1, self.population_size.max(1))
    }
}

/// Immutable inputs of one search.
#[derive(Debug, Clone, TypedBuilder)]
pub struct SearchConfig {
    #[builder(default)]
    pub initial_effects: ActiveEffects,
    #[builder(default = 8)]
    pub combo_size: usize,
    #[builder(default = Duration::from_secs(30))]
    pub time_limit: Duration,
    #[builder(default = DEFAULT_MAX_PERMS)]
    pub max_perms: usize,
    #[builder(default, setter(into))]
    pub banned: Vec<String>,
    #[builder(default = DEFAULT_BASE_VALUE)]
    pub base_value: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SearchConfig {
    pub fn from_params(params: &SearchParams, catalog: &Catalog) -> MfResult<Self> {
        let (initial_effects, base_value) = params.substance.resolve(catalog)?;
        let config = Self::builder()
            .initial_effects(initial_effects)
            .combo_size(params.combo_size)
            .time_limit(Duration::from_secs(params.time_limit))
            .max_perms(params.max_perms)
            .banned(params.banned.clone())
            .base_value(base_value)
            .build();
        config.validate(catalog)?;
        Ok(config)
    }

    pub fn validate(&self, catalog: &Catalog) -> MfResult<()> {
        if self.initial_effects.len() > MAX_ACTIVE_EFFECTS {
            return Err(MixForgeError::Config(format!(
                "At most {} initial effects are allowed (got {})",
                MAX_ACTIVE_EFFECTS,
                self.initial_effects.len()
            )));
        }
        if !self.base_value.is_finite() {
            return Err(MixForgeError::Config(format!(
                "Base value must be finite (got {})",
                self.base_value
            )));
        }
        for effect in self.initial_effects.effects() {
            catalog.effects.require(effect)?;
        }
        catalog.items.resolve_all(&self.banned)?;
        Ok(())
    }

    /// Catalog ids with banned items removed, in catalog order.
    pub fn available_items(&self, catalog: &Catalog) -> MfResult<Vec<ItemId>> {
        let banned = catalog.items.resolve_all(&self.banned)?;
        Ok(catalog.items.ids().filter(|id| !banned.contains(id)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    Completed,
    Cancelled,
}

/// Counters from a finished run. Zeroed for cancelled runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchStats {
    pub generations: usize,
    pub evaluations: usize,
    pub permutations_tested: usize,
    pub elapsed_ms: u64,
    pub population_size: usize,
    pub base_mutation_rate: f64,
    pub tournament_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub status: SearchStatus,
    pub combination: Vec<String>,
    pub multiplier: f64,
    pub effects: ActiveEffects,
    pub cost: f64,
    pub profit: f64,
    pub stats: SearchStats,
}

impl SearchResult {
    /// The hard-abort result: empty combination and all zeros.
    pub fn cancelled() -> Self {
        Self {
            status: SearchStatus::Cancelled,
            combination: Vec::new(),
            multiplier: 0.0,
            effects: ActiveEffects::new(),
            cost: 0.0,
            profit: 0.0,
            stats: SearchStats::default(),
        }
    }

    pub fn completed(catalog: &Catalog, best: Candidate, stats: SearchStats) -> Self {
        Self {
            status: SearchStatus::Completed,
            combination: catalog.items.names_of(&best.combination),
            multiplier: best.evaluation.multiplier,
            effects: best.evaluation.effects,
            cost: best.evaluation.cost,
            profit: best.profit,
            stats,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == SearchStatus::Cancelled
    }

    /// `(combination, multiplier, effects, cost, profit)`
    pub fn into_tuple(self) -> (Vec<String>, f64, ActiveEffects, f64, f64) {
        (
            self.combination,
            self.multiplier,
            self.effects,
            self.cost,
            self.profit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_rate_decays_to_half() {
        let run = RunParams {
            population_size: 200,
            base_mutation_rate: 0.4,
            tournament_size: 4,
        };
        assert_eq!(run.mutation_rate_at(0, 10_000), 0.4);
        assert!((run.mutation_rate_at(10_000, 10_000) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_elite_count_is_at_least_one() {
        let mut rng = Rng::with_seed(7);
        let params = GeneticParams::default();
        let run = RunParams {
            population_size: 1,
            base_mutation_rate: 0.1,
            tournament_size: 2,
        };
        assert_eq!(run.elite_count(&params, &mut rng), 1);

        let run = RunParams {
            population_size: 200,
            ..run
        };
        for _ in 0..100 {
            let n = run.elite_count(&params, &mut rng);
            assert!((10..=30).contains(&n), "elite count {}", n);
        }
    }

    #[test]
    fn test_draw_stays_in_ranges() {
        let mut rng = Rng::with_seed(11);
        let params = GeneticParams::default();
        for _ in 0..200 {
            let run = RunParams::draw(&params, &mut rng);
            assert!((200..=800).contains(&run.population_size));
            assert!((0.1..0.8).contains(&run.base_mutation_rate));
            assert!((2..=8).contains(&run.tournament_size));
        }
    }

    #[test]
    fn test_unknown_ban_is_rejected() {
        let catalog = Catalog::standard();
        let config = SearchConfig::builder()
            .banned(vec!["Oregano".to_string()])
            .build();
        assert!(matches!(
            config.validate(&catalog),
            Err(MixForgeError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_available_items_skip_banned() {
        let catalog = Catalog::standard();
        let config = SearchConfig::builder()
            .banned(vec!["Cuke".to_string(), "Banana".to_string()])
            .build();
        let available = config.available_items(&catalog).unwrap();
        assert_eq!(available.len(), 14);
        assert!(!available.contains(&catalog.items.resolve("Cuke").unwrap()));
    }
}
