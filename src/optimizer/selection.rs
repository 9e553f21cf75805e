use super::Candidate;
use fastrand::Rng;

/// `k` distinct indices from `0..n`, uniformly. `k` is capped at `n`.
pub fn sample_indices(rng: &mut Rng, n: usize, k: usize) -> Vec<usize> {
    let k = k.min(n);

    // Small samples from large pools: rejection is cheaper than a full index vector.
    if k * 4 <= n {
        let mut picked = Vec::with_capacity(k);
        while picked.len() < k {
            let idx = rng.usize(0..n);
            if !picked.contains(&idx) {
                picked.push(idx);
            }
        }
        return picked;
    }

    // Partial Fisher-Yates
    let mut pool: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = rng.usize(i..n);
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}

/// Samples `k` members without replacement and returns the most profitable.
/// Ties go to the member sampled first.
pub fn tournament<'a>(population: &'a [Candidate], k: usize, rng: &mut Rng) -> &'a Candidate {
    debug_assert!(!population.is_empty());

    let mut best: Option<&Candidate> = None;
    for idx in sample_indices(rng, population.len(), k.max(1)) {
        let candidate = &population[idx];
        match best {
            Some(b) if candidate.profit <= b.profit => {}
            _ => best = Some(candidate),
        }
    }

    best.unwrap_or(&population[0])
}
