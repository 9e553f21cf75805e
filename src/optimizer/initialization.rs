use super::Combination;
use crate::catalog::ItemId;
use fastrand::Rng;

/// Each slot drawn uniformly, with replacement, from `available`.
pub fn random_combination(rng: &mut Rng, available: &[ItemId], size: usize) -> Combination {
    if available.is_empty() {
        return Vec::new();
    }
    (0..size)
        .map(|_| available[rng.usize(0..available.len())])
        .collect()
}

pub fn random_item(rng: &mut Rng, available: &[ItemId]) -> ItemId {
    available[rng.usize(0..available.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_combination_uses_only_available() {
        let mut rng = Rng::with_seed(1);
        let available = vec![2, 5, 9];
        for _ in 0..50 {
            let combo = random_combination(&mut rng, &available, 8);
            assert_eq!(combo.len(), 8);
            assert!(combo.iter().all(|id| available.contains(id)));
        }
    }

    #[test]
    fn test_empty_pool_gives_empty_combination() {
        let mut rng = Rng::with_seed(1);
        assert!(random_combination(&mut rng, &[], 8).is_empty());
    }
}
