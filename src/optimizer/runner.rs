use super::crossover::crossover;
use super::initialization::random_combination;
use super::mutation::mutate;
use super::progress::ProgressCallback;
use super::refine::{refine, RefineBudget};
use super::selection::tournament;
use super::{sort_by_profit, Candidate, Combination, RunParams, SearchConfig, SearchResult, SearchStats};
use crate::catalog::ItemId;
use crate::config::GeneticParams;
use crate::consts::{
    PROGRESS_DONE, PROGRESS_EVOLUTION_DONE, PROGRESS_EVOLUTION_SPAN, PROGRESS_INIT,
    PROGRESS_POPULATION_READY,
};
use crate::error::MfResult;
use crate::scorer::{ActiveEffects, Scorer};
use fastrand::Rng;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Genetic search over item sequences followed by order refinement.
///
/// Each `run` owns its population and RNG; the catalog behind the scorer is
/// shared read-only, so several runs may execute at once.
pub struct Optimizer {
    scorer: Scorer,
    params: GeneticParams,
}

impl Optimizer {
    pub fn new(scorer: Scorer, params: GeneticParams) -> Self {
        Self { scorer, params }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn params(&self) -> &GeneticParams {
        &self.params
    }

    /// Runs to completion, time-out or cancellation.
    ///
    /// Invalid configuration is an `Err`. Cancellation is a normal
    /// `SearchResult::cancelled()`.
    pub fn run<CB: ProgressCallback + ?Sized>(
        &self,
        config: &SearchConfig,
        seed: Option<u64>,
        callback: &CB,
    ) -> MfResult<SearchResult> {
        self.params.validate()?;
        let catalog = self.scorer.catalog();
        config.validate(catalog)?;

        let started = Instant::now();
        let mut rng = seed.map_or_else(Rng::new, Rng::with_seed);

        if callback
            .on_progress(PROGRESS_INIT, "Initializing optimizer...")
            .is_stop()
        {
            return Ok(SearchResult::cancelled());
        }

        let available = config.available_items(catalog)?;
        let mut combo_size = config.combo_size;
        if available.len() < combo_size {
            info!(
                "✂️  Only {} items available; combo size {} -> {}",
                available.len(),
                combo_size,
                available.len()
            );
            combo_size = available.len();
        }

        let seed_effects = &config.initial_effects;
        let base_value = config.base_value;

        if combo_size == 0 {
            warn!("No items to mix (combo size 0 or every item banned); returning the unmixed base");
            let empty = Candidate::evaluate(&self.scorer, Vec::new(), seed_effects, base_value);
            if callback.on_progress(PROGRESS_DONE, "Nothing to optimize").is_stop() {
                return Ok(SearchResult::cancelled());
            }
            let stats = SearchStats {
                elapsed_ms: started.elapsed().as_millis() as u64,
                ..SearchStats::default()
            };
            return Ok(SearchResult::completed(catalog, empty, stats));
        }

        // 1. Per-run hyperparameters
        let run = RunParams::draw(&self.params, &mut rng);
        info!(
            "🧬 Population {} | mutation {:.3} | tournament {} | combo {} | pool {}",
            run.population_size,
            run.base_mutation_rate,
            run.tournament_size,
            combo_size,
            available.len()
        );

        // 2. Initial population
        let combos: Vec<Combination> = (0..run.population_size)
            .map(|_| random_combination(&mut rng, &available, combo_size))
            .collect();
        let mut population = self.evaluate_all(combos, seed_effects, base_value);
        sort_by_profit(&mut population);
        let mut evaluations = population.len();

        let mut best = population[0].clone();
        debug!("   -> initial best profit {:.2}", best.profit);

        if callback
            .on_progress(PROGRESS_POPULATION_READY, "Population ready")
            .is_stop()
        {
            return Ok(SearchResult::cancelled());
        }

        // 3. Evolution
        let max_gen = self.params.max_generations;
        let mut generations = 0;

        for gen in 0..max_gen {
            if started.elapsed() > config.time_limit {
                info!("⏱️  Time limit reached after {} generations", gen);
                break;
            }

            if gen % self.params.report_interval == 0 {
                let pct = PROGRESS_POPULATION_READY as usize
                    + (PROGRESS_EVOLUTION_SPAN * gen / max_gen).min(PROGRESS_EVOLUTION_SPAN);
                let msg = format!("Generation {} | best profit {:.2}", gen, best.profit);
                if callback.on_progress(pct as u8, &msg).is_stop() {
                    info!("🛑 Search cancelled at generation {}", gen);
                    return Ok(SearchResult::cancelled());
                }
            }

            let elite = run.elite_count(&self.params, &mut rng);
            let rate = run.mutation_rate_at(gen, max_gen);

            let offspring: Vec<Combination> = (elite..run.population_size)
                .map(|_| {
                    let a = tournament(&population, run.tournament_size, &mut rng);
                    let b = tournament(&population, run.tournament_size, &mut rng);
                    let child = crossover(&mut rng, &a.combination, &b.combination, &available);
                    if rng.f64() < rate {
                        mutate(&mut rng, &child, &available, rate)
                    } else {
                        child
                    }
                })
                .collect();

            let children = self.evaluate_all(offspring, seed_effects, base_value);
            evaluations += children.len();
            for child in &children {
                if child.profit > best.profit {
                    debug!("   -> gen {} new best {:.2}", gen, child.profit);
                    best = child.clone();
                }
            }

            let mut next: Vec<Candidate> = Vec::with_capacity(run.population_size);
            next.extend(population.iter().take(elite).cloned());
            next.extend(children);
            sort_by_profit(&mut next);

            if is_diversity_generation(gen, self.params.diversity_interval) {
                let fresh = diversity_count(run.population_size, self.params.diversity_fraction);
                inject_diversity(&mut next, &mut best, fresh, || {
                    let combo = random_combination(&mut rng, &available, combo_size);
                    Candidate::evaluate(&self.scorer, combo, seed_effects, base_value)
                });
                evaluations += fresh;
            }

            population = next;
            generations = gen + 1;

            if gen % 10 == 0 {
                debug!(
                    "Gen {:5} | top {:.2} | best {:.2} | rate {:.3}",
                    gen, population[0].profit, best.profit, rate
                );
            }
        }

        info!(
            "🏁 Evolution finished: {} generations, {} evaluations, best profit {:.2}",
            generations, evaluations, best.profit
        );

        if callback
            .on_progress(PROGRESS_EVOLUTION_DONE, "Evolution complete")
            .is_stop()
        {
            return Ok(SearchResult::cancelled());
        }

        // 4. Order refinement
        let budget = RefineBudget {
            max_perms: config.max_perms,
            started,
            time_limit: config.time_limit,
            report_interval: self.params.perm_report_interval,
        };
        let (best, permutations_tested) = match refine(
            &self.scorer,
            best,
            seed_effects,
            base_value,
            budget,
            &mut rng,
            callback,
        ) {
            Some(refined) => refined,
            None => {
                info!("🛑 Search cancelled during refinement");
                return Ok(SearchResult::cancelled());
            }
        };

        if callback.on_progress(PROGRESS_DONE, "Done").is_stop() {
            return Ok(SearchResult::cancelled());
        }

        let stats = SearchStats {
            generations,
            evaluations: evaluations + permutations_tested,
            permutations_tested,
            elapsed_ms: started.elapsed().as_millis() as u64,
            population_size: run.population_size,
            base_mutation_rate: run.base_mutation_rate,
            tournament_size: run.tournament_size,
        };
        Ok(SearchResult::completed(catalog, best, stats))
    }

    /// Scores combinations in parallel; output order matches input order.
    fn evaluate_all(
        &self,
        combos: Vec<Vec<ItemId>>,
        seed: &ActiveEffects,
        base_value: f64,
    ) -> Vec<Candidate> {
        combos
            .into_par_iter()
            .map(|combo| Candidate::evaluate(&self.scorer, combo, seed, base_value))
            .collect()
    }
}

/// Every `interval` generations, skipping generation 0.
fn is_diversity_generation(gen: usize, interval: usize) -> bool {
    gen > 0 && gen % interval == 0
}

/// `floor(pop * fraction)`, at least one.
fn diversity_count(population_size: usize, fraction: f64) -> usize {
    ((population_size as f64 * fraction).floor() as usize).max(1)
}

/// Overwrites the weakest slot `count` times with fresh candidates, then
/// re-sorts once. A fresh candidate above `best` becomes the new best.
fn inject_diversity<F>(population: &mut [Candidate], best: &mut Candidate, count: usize, mut fresh: F)
where
    F: FnMut() -> Candidate,
{
    for _ in 0..count {
        let candidate = fresh();
        if candidate.profit > best.profit {
            debug!("   -> fresh candidate new best {:.2}", candidate.profit);
            *best = candidate.clone();
        }
        if let Some(last) = population.last_mut() {
            *last = candidate;
        }
    }
    sort_by_profit(population);
}
