use mixforge::catalog::Effect;
use mixforge::error::MixForgeError;
use mixforge::scorer::{ActiveEffects, Scorer};

const EPS: f64 = 1e-9;

#[test]
fn test_cuke_alone() {
    let scorer = Scorer::standard();
    let eval = scorer.evaluate_names(&["Cuke"], &ActiveEffects::new()).unwrap();
    assert!((eval.multiplier - 1.22).abs() < EPS);
    assert_eq!(eval.cost, 2.0);
    assert!((eval.profit(100.0) - 120.0).abs() < EPS);
    assert!((eval.sell_price(100.0) - 122.0).abs() < EPS);
}

#[test]
fn test_cost_counts_duplicates() {
    let scorer = Scorer::standard();
    let ids = scorer
        .catalog()
        .items
        .resolve_all(&["Cuke", "Cuke", "Gasoline"])
        .unwrap();
    assert_eq!(scorer.cost(&ids), 9.0);
}

#[test]
fn test_multiplier_is_one_plus_sum() {
    let scorer = Scorer::standard();
    let seed = ActiveEffects::from_effects([Effect::Calming], &scorer.catalog().effects);
    let eval = scorer
        .evaluate_names(&["Banana", "Chili", "Cuke"], &seed)
        .unwrap();
    let sum: f64 = eval.effects.iter().map(|(_, v)| v).sum();
    assert!((eval.multiplier - (1.0 + sum)).abs() < EPS);
    assert!(eval.multiplier >= 1.0);
}

#[test]
fn test_evaluation_is_deterministic() {
    let scorer = Scorer::standard();
    let names = ["Mega Bean", "Donut", "Addy", "Battery", "Cuke", "Viagra"];
    let a = scorer.evaluate_names(&names, &ActiveEffects::new()).unwrap();
    let b = scorer.evaluate_names(&names, &ActiveEffects::new()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_empty_combination_values_the_seed() {
    let scorer = Scorer::standard();
    let seed = ActiveEffects::from_effects([Effect::Sneaky], &scorer.catalog().effects);
    let eval = scorer.evaluate(&[], &seed);
    assert!((eval.multiplier - 1.24).abs() < EPS);
    assert_eq!(eval.cost, 0.0);
}

#[test]
fn test_unknown_item_name() {
    let scorer = Scorer::standard();
    let err = scorer
        .evaluate_names(&["Cuke", "Oregano"], &ActiveEffects::new())
        .unwrap_err();
    assert!(matches!(err, MixForgeError::UnknownItem(ref n) if n == "Oregano"));
}

#[test]
fn test_profit_shortcut_matches_evaluation() {
    let scorer = Scorer::standard();
    let ids = scorer
        .catalog()
        .items
        .resolve_all(&["Gasoline", "Cuke"])
        .unwrap();
    let seed = ActiveEffects::new();
    // Gasoline then Cuke leaves Energizing + Euphoric: x1.40, cost 7.
    assert!((scorer.profit(&ids, &seed, 100.0) - 133.0).abs() < 1e-9);
}
