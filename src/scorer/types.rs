use crate::catalog::{Effect, EffectTable, Rule};
use crate::consts::MAX_ACTIVE_EFFECTS;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Active effects in insertion order.
///
/// Updating an existing key keeps its position; removing then inserting
/// moves the new key to the end. Display order of results relies on this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveEffects {
    entries: Vec<(Effect, f64)>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_ACTIVE_EFFECTS),
        }
    }

    /// Builds a seed set from effect names' table values. Later duplicates are ignored.
    pub fn from_effects<I>(effects: I, table: &EffectTable) -> Self
    where
        I: IntoIterator<Item = Effect>,
    {
        let mut set = Self::new();
        for effect in effects {
            set.set(effect, table.value(effect));
        }
        set
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline(always)]
    pub fn contains(&self, effect: Effect) -> bool {
        self.entries.iter().any(|(e, _)| *e == effect)
    }

    pub fn get(&self, effect: Effect) -> Option<f64> {
        self.entries
            .iter()
            .find(|(e, _)| *e == effect)
            .map(|&(_, v)| v)
    }

    /// Inserts or overwrites in place.
    #[inline(always)]
    pub fn set(&mut self, effect: Effect, value: f64) {
        match self.entries.iter_mut().find(|(e, _)| *e == effect) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((effect, value)),
        }
    }

    #[inline(always)]
    pub fn remove(&mut self, effect: Effect) -> Option<f64> {
        let pos = self.entries.iter().position(|(e, _)| *e == effect)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Effect, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn effects(&self) -> impl Iterator<Item = Effect> + '_ {
        self.entries.iter().map(|&(e, _)| e)
    }

    /// Sum of the active contributions (insertion order).
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|&(_, v)| v).sum()
    }

    /// 1.0 plus every active contribution.
    pub fn multiplier(&self) -> f64 {
        1.0 + self.total()
    }

    /// Highest contribution first; ties keep insertion order.
    pub fn sorted_by_value(&self) -> Vec<(Effect, f64)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
        sorted
    }
}

impl Serialize for ActiveEffects {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (effect, value) in &self.entries {
            map.serialize_entry(effect.name(), value)?;
        }
        map.end()
    }
}

/// Outcome of evaluating one combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub multiplier: f64,
    pub effects: ActiveEffects,
    pub cost: f64,
}

impl Evaluation {
    #[inline(always)]
    pub fn profit(&self, base_value: f64) -> f64 {
        base_value * self.multiplier - self.cost
    }

    pub fn sell_price(&self, base_value: f64) -> f64 {
        base_value * self.multiplier
    }
}

/// What happened to an item's base effect on its step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BaseEffectOutcome {
    Added,
    AlreadyActive,
    DroppedAtCeiling,
}

/// One item application, recorded by `engine::apply_traced`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixStep {
    pub item: String,
    pub base_effect: Effect,
    pub outcome: BaseEffectOutcome,
    pub fired: Vec<Rule>,
    /// Rules whose trigger was the effect written this same step.
    pub exempt: Vec<Rule>,
    pub after: ActiveEffects,
}
