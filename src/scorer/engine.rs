use super::types::{ActiveEffects, BaseEffectOutcome, MixStep};
use crate::catalog::{Catalog, EffectTable, Item, ItemId, Rule};
use crate::consts::MAX_ACTIVE_EFFECTS;

/// Folds an ordered item sequence into the final active-effect set.
///
/// Per item: write the base effect unless the set is full and the effect is
/// new, then apply every rule whose trigger is active (and is not the base
/// effect just written). Triggers are matched against the set as it stands
/// before any replacement of this item; the replacements are then applied in
/// rule order.
pub fn apply(catalog: &Catalog, combination: &[ItemId], seed: &ActiveEffects) -> ActiveEffects {
    let mut active = seed.clone();
    let mut pending: Vec<Rule> = Vec::with_capacity(MAX_ACTIVE_EFFECTS);

    for &id in combination {
        step(&catalog.effects, catalog.items.get(id), &mut active, &mut pending);
    }

    active
}

/// Same fold as `apply`, recording every decision for display.
pub fn apply_traced(
    catalog: &Catalog,
    combination: &[ItemId],
    seed: &ActiveEffects,
) -> (ActiveEffects, Vec<MixStep>) {
    let mut active = seed.clone();
    let mut pending: Vec<Rule> = Vec::with_capacity(MAX_ACTIVE_EFFECTS);
    let mut steps = Vec::with_capacity(combination.len());

    for &id in combination {
        let item = catalog.items.get(id);
        let outcome = step(&catalog.effects, item, &mut active, &mut pending);

        let exempt = if outcome == BaseEffectOutcome::DroppedAtCeiling {
            Vec::new()
        } else {
            item.rules
                .iter()
                .filter(|r| r.trigger == item.effect)
                .copied()
                .collect()
        };

        steps.push(MixStep {
            item: item.name.clone(),
            base_effect: item.effect,
            outcome,
            fired: pending.clone(),
            exempt,
            after: active.clone(),
        });
    }

    (active, steps)
}

#[inline(always)]
fn step(
    table: &EffectTable,
    item: &Item,
    active: &mut ActiveEffects,
    pending: &mut Vec<Rule>,
) -> BaseEffectOutcome {
    let effect = item.effect;

    let outcome = if active.contains(effect) {
        active.set(effect, table.value(effect));
        BaseEffectOutcome::AlreadyActive
    } else if active.len() >= MAX_ACTIVE_EFFECTS {
        BaseEffectOutcome::DroppedAtCeiling
    } else {
        active.set(effect, table.value(effect));
        BaseEffectOutcome::Added
    };

    pending.clear();
    pending.extend(
        item.rules
            .iter()
            .filter(|r| r.trigger != effect && active.contains(r.trigger))
            .copied(),
    );

    for rule in pending.iter() {
        active.remove(rule.trigger);
        active.set(rule.replacement, table.value(rule.replacement));
    }

    outcome
}
