use super::progress::ProgressCallback;
use super::Candidate;
use crate::consts::{PROGRESS_REFINE_SPAN, PROGRESS_REFINE_START};
use crate::scorer::{ActiveEffects, Scorer};
use fastrand::Rng;
use itertools::{Itertools, Permutations};
use std::collections::HashSet;
use std::ops::Range;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// `n!` over positions, saturating at `usize::MAX`.
pub fn position_permutations(n: usize) -> usize {
    (1..=n)
        .try_fold(1usize, |acc, k| acc.checked_mul(k))
        .unwrap_or(usize::MAX)
}

/// Position orderings of an `n`-slot sequence to try, at most `cap` of them.
///
/// Lazy: when `n!` exceeds `cap`, each ordering is a fresh distinct shuffle
/// drawn on demand, so nothing is built before the caller asks for it.
/// Duplicated items are not collapsed: two orderings that swap equal items
/// count separately.
pub fn orderings(rng: &mut Rng, n: usize, cap: usize) -> Orderings<'_> {
    let total = position_permutations(n);
    let source = if total <= cap {
        Source::Exhaustive((0..n).permutations(n))
    } else {
        Source::Sampled {
            rng,
            perm: (0..n).collect(),
            seen: HashSet::new(),
        }
    };
    Orderings {
        source,
        remaining: total.min(cap),
    }
}

pub struct Orderings<'a> {
    source: Source<'a>,
    remaining: usize,
}

enum Source<'a> {
    Exhaustive(Permutations<Range<usize>>),
    Sampled {
        rng: &'a mut Rng,
        perm: Vec<usize>,
        seen: HashSet<Vec<usize>>,
    },
}

impl Iterator for Orderings<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        match &mut self.source {
            Source::Exhaustive(all) => all.next(),
            // seen.len() < cap < n!, so an unseen shuffle always exists
            Source::Sampled { rng, perm, seen } => loop {
                rng.shuffle(perm);
                if seen.insert(perm.clone()) {
                    return Some(perm.clone());
                }
            },
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Orderings<'_> {}

/// Limits shared with the evolutionary phase.
#[derive(Debug, Clone, Copy)]
pub struct RefineBudget {
    pub max_perms: usize,
    pub started: Instant,
    pub time_limit: Duration,
    pub report_interval: usize,
}

/// Re-orders `best` and keeps any strictly more profitable ordering.
///
/// Returns `None` when the callback asks to stop, otherwise the (possibly
/// unchanged) best candidate and the number of orderings evaluated.
pub fn refine<CB: ProgressCallback + ?Sized>(
    scorer: &Scorer,
    best: Candidate,
    seed: &ActiveEffects,
    base_value: f64,
    budget: RefineBudget,
    rng: &mut Rng,
    callback: &CB,
) -> Option<(Candidate, usize)> {
    let mut perms = orderings(rng, best.combination.len(), budget.max_perms);
    let to_test = perms.len();

    if to_test > 0
        && callback
            .on_progress(PROGRESS_REFINE_START, "Refining item order...")
            .is_stop()
    {
        return None;
    }

    let start_profit = best.profit;
    let original = best.combination.clone();
    let mut best = best;
    let mut tested = 0;

    while tested < to_test {
        if tested > 0 && tested % budget.report_interval == 0 {
            let pct = PROGRESS_REFINE_START as usize
                + (PROGRESS_REFINE_SPAN * tested / to_test).min(PROGRESS_REFINE_SPAN);
            let msg = format!("Tested {}/{} orderings", tested, to_test);
            if callback.on_progress(pct as u8, &msg).is_stop() {
                return None;
            }
        }

        if budget.started.elapsed() > budget.time_limit {
            info!("⏱️  Time limit reached during refinement ({} orderings)", tested);
            break;
        }

        let Some(perm) = perms.next() else {
            break;
        };
        let reordered: Vec<_> = perm.iter().map(|&p| original[p]).collect();
        let candidate = Candidate::evaluate(scorer, reordered, seed, base_value);
        tested += 1;

        if candidate.profit > best.profit {
            debug!("   -> reorder improved profit {:.2} -> {:.2}", best.profit, candidate.profit);
            best = candidate;
        }
    }

    info!(
        "🔀 Refinement: {} orderings, profit {:.2} -> {:.2}",
        tested, start_profit, best.profit
    );
    Some((best, tested))
}
