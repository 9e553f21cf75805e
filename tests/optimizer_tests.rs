use mixforge::catalog::{Catalog, Effect};
use mixforge::config::GeneticParams;
use mixforge::error::MixForgeError;
use mixforge::optimizer::{NoProgress, Optimizer, SearchConfig, SearchStatus};
use mixforge::scorer::{ActiveEffects, Scorer};
use std::sync::Mutex;
use std::time::Duration;

fn quick_params() -> GeneticParams {
    GeneticParams {
        population_min: 20,
        population_max: 30,
        max_generations: 60,
        ..GeneticParams::default()
    }
}

fn ban_all_except(catalog: &Catalog, keep: &[&str]) -> Vec<String> {
    catalog
        .items
        .iter()
        .map(|i| i.name.clone())
        .filter(|n| !keep.contains(&n.as_str()))
        .collect()
}

fn optimizer() -> Optimizer {
    Optimizer::new(Scorer::standard(), quick_params())
}

#[test]
fn test_only_cuke_available() {
    let catalog = Catalog::standard();
    let config = SearchConfig::builder()
        .combo_size(1)
        .banned(ban_all_except(&catalog, &["Cuke"]))
        .build();

    let result = optimizer().run(&config, None, &NoProgress).unwrap();
    let (combination, multiplier, _effects, cost, profit) = result.into_tuple();
    assert_eq!(combination, vec!["Cuke"]);
    assert!((multiplier - 1.22).abs() < 1e-9);
    assert_eq!(cost, 2.0);
    assert!((profit - 120.0).abs() < 1e-9);
}

#[test]
fn test_combo_size_clamped_to_available() {
    let catalog = Catalog::standard();
    let config = SearchConfig::builder()
        .combo_size(8)
        .banned(ban_all_except(&catalog, &["Cuke", "Banana"]))
        .build();

    let result = optimizer().run(&config, Some(4), &NoProgress).unwrap();
    assert_eq!(result.status, SearchStatus::Completed);
    assert_eq!(result.combination.len(), 2);
    assert!(result
        .combination
        .iter()
        .all(|n| n == "Cuke" || n == "Banana"));
}

#[test]
fn test_result_is_consistent_with_evaluator() {
    let scorer = Scorer::standard();
    let config = SearchConfig::builder()
        .combo_size(5)
        .base_value(70.0)
        .max_perms(200)
        .build();

    let opt = Optimizer::new(scorer.clone(), quick_params());
    let result = opt.run(&config, Some(99), &NoProgress).unwrap();
    assert_eq!(result.combination.len(), 5);

    let eval = scorer
        .evaluate_names(&result.combination, &ActiveEffects::new())
        .unwrap();
    assert!((eval.multiplier - result.multiplier).abs() < 1e-9);
    assert!((eval.cost - result.cost).abs() < 1e-9);
    assert!((eval.profit(70.0) - result.profit).abs() < 1e-9);
    assert!(result.effects.len() <= 8);
}

#[test]
fn test_stop_at_first_checkpoint() {
    let calls = Mutex::new(Vec::new());
    let stop = |p: u8, _m: &str| {
        calls.lock().unwrap().push(p);
        false
    };
    let result = optimizer()
        .run(&SearchConfig::default(), Some(1), &stop)
        .unwrap();

    assert_eq!(result.status, SearchStatus::Cancelled);
    assert!(result.combination.is_empty());
    assert_eq!(result.multiplier, 0.0);
    assert!(result.effects.is_empty());
    assert_eq!(result.cost, 0.0);
    assert_eq!(result.profit, 0.0);
    assert_eq!(*calls.lock().unwrap(), vec![10]);
}

#[test]
fn test_stop_during_refinement_discards_best() {
    let stop_late = |p: u8, _m: &str| p < 75;
    let config = SearchConfig::builder().combo_size(4).build();
    let result = optimizer().run(&config, Some(2), &stop_late).unwrap();
    assert!(result.is_cancelled());
    assert!(result.combination.is_empty());
    assert_eq!(result.profit, 0.0);
}

#[test]
fn test_progress_is_monotonic() {
    let seen = Mutex::new(Vec::new());
    let record = |p: u8, _m: &str| {
        seen.lock().unwrap().push(p);
        true
    };
    let config = SearchConfig::builder().combo_size(4).max_perms(30).build();
    let params = GeneticParams {
        report_interval: 10,
        perm_report_interval: 10,
        ..quick_params()
    };
    let result = Optimizer::new(Scorer::standard(), params)
        .run(&config, Some(5), &record)
        .unwrap();
    assert_eq!(result.status, SearchStatus::Completed);

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.first(), Some(&10));
    assert_eq!(seen.last(), Some(&100));
    for p in [20, 70, 75] {
        assert!(seen.contains(&p), "missing checkpoint {}: {:?}", p, seen);
    }
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{:?}", seen);
    assert!(seen.iter().all(|&p| p <= 100));
}

#[test]
fn test_everything_banned_returns_unmixed_base() {
    let catalog = Catalog::standard();
    let seed = ActiveEffects::from_effects([Effect::Calming], &catalog.effects);
    let config = SearchConfig::builder()
        .initial_effects(seed.clone())
        .banned(ban_all_except(&catalog, &[]))
        .base_value(35.0)
        .build();

    let result = optimizer().run(&config, None, &NoProgress).unwrap();
    assert_eq!(result.status, SearchStatus::Completed);
    assert!(result.combination.is_empty());
    assert_eq!(result.effects, seed);
    assert!((result.multiplier - 1.10).abs() < 1e-9);
    assert_eq!(result.cost, 0.0);
    assert!((result.profit - 38.5).abs() < 1e-9);
}

#[test]
fn test_zero_combo_size() {
    let config = SearchConfig::builder().combo_size(0).build();
    let result = optimizer().run(&config, None, &NoProgress).unwrap();
    assert_eq!(result.status, SearchStatus::Completed);
    assert!(result.combination.is_empty());
    assert_eq!(result.multiplier, 1.0);
    assert_eq!(result.profit, 100.0);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let config = SearchConfig::builder()
        .combo_size(6)
        .max_perms(100)
        .time_limit(Duration::from_secs(60))
        .build();
    let a = optimizer().run(&config, Some(1234), &NoProgress).unwrap();
    let b = optimizer().run(&config, Some(1234), &NoProgress).unwrap();
    assert_eq!(a.combination, b.combination);
    assert_eq!(a.profit, b.profit);
    assert_eq!(a.stats.population_size, b.stats.population_size);
}

#[test]
fn test_zero_time_limit_still_returns_a_mix() {
    let config = SearchConfig::builder()
        .combo_size(3)
        .time_limit(Duration::ZERO)
        .build();
    let result = optimizer().run(&config, Some(8), &NoProgress).unwrap();
    assert_eq!(result.status, SearchStatus::Completed);
    assert_eq!(result.combination.len(), 3);
    assert_eq!(result.stats.generations, 0);
}

#[test]
fn test_unknown_ban_is_an_error() {
    let config = SearchConfig::builder()
        .banned(vec!["Oregano".to_string()])
        .build();
    let err = optimizer().run(&config, None, &NoProgress).unwrap_err();
    assert!(matches!(err, MixForgeError::UnknownItem(_)));
}

#[test]
fn test_invalid_genetic_params_are_an_error() {
    let params = GeneticParams {
        population_min: 50,
        population_max: 10,
        ..GeneticParams::default()
    };
    let opt = Optimizer::new(Scorer::standard(), params);
    let err = opt.run(&SearchConfig::default(), None, &NoProgress).unwrap_err();
    assert!(matches!(err, MixForgeError::Config(_)));
}
