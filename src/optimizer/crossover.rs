use super::initialization::random_item;
use super::selection::sample_indices;
use super::Combination;
use crate::catalog::ItemId;
use fastrand::Rng;
use strum::{EnumCount, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumCount, strum::Display)]
pub enum CrossoverStrategy {
    OnePoint,
    TwoPoint,
    Uniform,
}

impl CrossoverStrategy {
    pub fn random(rng: &mut Rng) -> Self {
        Self::iter()
            .nth(rng.usize(0..Self::COUNT))
            .unwrap_or(CrossoverStrategy::Uniform)
    }
}

/// Produces one child the length of `a`, using a randomly chosen strategy.
pub fn crossover(rng: &mut Rng, a: &[ItemId], b: &[ItemId], available: &[ItemId]) -> Combination {
    let strategy = CrossoverStrategy::random(rng);
    crossover_with(strategy, rng, a, b, available)
}

pub fn crossover_with(
    strategy: CrossoverStrategy,
    rng: &mut Rng,
    a: &[ItemId],
    b: &[ItemId],
    available: &[ItemId],
) -> Combination {
    let len = a.len();

    let mut child = match strategy {
        CrossoverStrategy::OnePoint if len >= 2 => {
            let idx = rng.usize(1..len);
            a[..idx].iter().chain(b.iter().skip(idx)).copied().collect()
        }
        CrossoverStrategy::TwoPoint if len >= 3 => {
            let mut cuts = sample_indices(rng, len - 1, 2);
            cuts.sort_unstable();
            let (i, j) = (cuts[0] + 1, cuts[1] + 1);
            a[..i]
                .iter()
                .chain(b.iter().skip(i).take(j - i))
                .chain(a[j..].iter())
                .copied()
                .collect()
        }
        _ => uniform(rng, a, b),
    };

    // Parents of unequal length can leave gaps; the pool fills them.
    if child.len() < len {
        child = uniform(rng, a, b);
    }
    while child.len() < len && !available.is_empty() {
        child.push(random_item(rng, available));
    }
    child.truncate(len);

    if rng.bool() {
        rng.shuffle(&mut child);
    }
    child
}

fn uniform(rng: &mut Rng, a: &[ItemId], b: &[ItemId]) -> Combination {
    a.iter()
        .enumerate()
        .map(|(i, &from_a)| match b.get(i) {
            Some(&from_b) if rng.bool() => from_b,
            _ => from_a,
        })
        .collect()
}
