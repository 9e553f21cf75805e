use super::initialization::random_item;
use super::selection::sample_indices;
use super::{uniform, Combination};
use crate::catalog::ItemId;
use fastrand::Rng;

/// How many slots a mutation at `rate` rewrites: `max(1, round(len * rate * U(0.5, 1.5)))`, capped at `len`.
pub fn mutation_count(rng: &mut Rng, len: usize, rate: f64) -> usize {
    let scaled = (len as f64 * rate * uniform(rng, 0.5, 1.5)).round() as usize;
    scaled.max(1).min(len)
}

/// Resamples distinct positions from `available`, then shuffles half the time.
pub fn mutate(rng: &mut Rng, combination: &[ItemId], available: &[ItemId], rate: f64) -> Combination {
    let mut mutated = combination.to_vec();
    if mutated.is_empty() || available.is_empty() {
        return mutated;
    }

    let count = mutation_count(rng, mutated.len(), rate);
    for pos in sample_indices(rng, mutated.len(), count) {
        mutated[pos] = random_item(rng, available);
    }

    if rng.bool() {
        rng.shuffle(&mut mutated);
    }
    mutated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_bounds() {
        let mut rng = Rng::with_seed(21);
        for _ in 0..200 {
            let n = mutation_count(&mut rng, 8, 0.1);
            assert!((1..=2).contains(&n));
            let n = mutation_count(&mut rng, 8, 1.0);
            assert!((4..=8).contains(&n));
        }
        assert_eq!(mutation_count(&mut rng, 1, 0.8), 1);
    }

    #[test]
    fn test_mutate_preserves_length_and_pool() {
        let mut rng = Rng::with_seed(8);
        let combo = vec![0, 0, 0, 0, 0, 0];
        for _ in 0..50 {
            let out = mutate(&mut rng, &combo, &[4, 5], 0.5);
            assert_eq!(out.len(), combo.len());
            assert!(out.iter().all(|&id| [0, 4, 5].contains(&id)));
            assert!(out.iter().any(|&id| id != 0));
        }
    }

    #[test]
    fn test_mutate_does_not_touch_input() {
        let mut rng = Rng::with_seed(8);
        let combo = vec![1, 2, 3];
        let _ = mutate(&mut rng, &combo, &[9], 0.9);
        assert_eq!(combo, vec![1, 2, 3]);
    }
}
