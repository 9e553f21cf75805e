pub mod engine;
pub mod types;

pub use self::types::{ActiveEffects, BaseEffectOutcome, Evaluation, MixStep};
use crate::catalog::{Catalog, ItemId};
use crate::error::MfResult;
use std::sync::Arc;

/// Evaluates combinations against a shared, read-only catalog.
///
/// Pure: the same combination and seed always give bit-identical results.
#[derive(Debug, Clone)]
pub struct Scorer {
    catalog: Arc<Catalog>,
}

impl Scorer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(Catalog::standard()))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[inline(always)]
    pub fn apply(&self, combination: &[ItemId], seed: &ActiveEffects) -> ActiveEffects {
        engine::apply(&self.catalog, combination, seed)
    }

    pub fn apply_traced(
        &self,
        combination: &[ItemId],
        seed: &ActiveEffects,
    ) -> (ActiveEffects, Vec<MixStep>) {
        engine::apply_traced(&self.catalog, combination, seed)
    }

    /// Sum of item prices, duplicates counted each time.
    #[inline(always)]
    pub fn cost(&self, combination: &[ItemId]) -> f64 {
        combination
            .iter()
            .map(|&id| self.catalog.items.get(id).price)
            .sum()
    }

    pub fn evaluate(&self, combination: &[ItemId], seed: &ActiveEffects) -> Evaluation {
        let effects = self.apply(combination, seed);
        Evaluation {
            multiplier: effects.multiplier(),
            cost: self.cost(combination),
            effects,
        }
    }

    #[inline(always)]
    pub fn profit(&self, combination: &[ItemId], seed: &ActiveEffects, base_value: f64) -> f64 {
        self.evaluate(combination, seed).profit(base_value)
    }

    /// Convenience for callers holding item names.
    pub fn evaluate_names<S: AsRef<str>>(
        &self,
        names: &[S],
        seed: &ActiveEffects,
    ) -> MfResult<Evaluation> {
        let combination = self.catalog.items.resolve_all(names)?;
        Ok(self.evaluate(&combination, seed))
    }
}
