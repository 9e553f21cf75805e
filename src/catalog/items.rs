use super::effects::Effect;
use crate::error::{MfResult, MixForgeError};
use serde::Serialize;
use std::collections::HashMap;

/// Index of an item inside its `ItemCatalog`.
pub type ItemId = usize;

/// "If `trigger` is active, replace it with `replacement`."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub trigger: Effect,
    pub replacement: Effect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub name: String,
    pub price: f64,
    pub effect: Effect,
    /// Declaration order is significant: replacements are applied in this order.
    pub rules: Vec<Rule>,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64, effect: Effect, rules: &[(Effect, Effect)]) -> Self {
        Self {
            name: name.into(),
            price,
            effect,
            rules: rules
                .iter()
                .map(|&(trigger, replacement)| Rule { trigger, replacement })
                .collect(),
        }
    }

    /// True when one of the item's own rules is keyed on its base effect.
    /// Such a rule can never fire during the item's own step.
    pub fn has_self_trigger(&self) -> bool {
        self.rules.iter().any(|r| r.trigger == self.effect)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
    index: HashMap<String, ItemId>,
}

impl ItemCatalog {
    pub fn new(items: Vec<Item>) -> MfResult<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (id, item) in items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(MixForgeError::Validation(format!(
                    "Item #{} has an empty name",
                    id
                )));
            }
            if index.insert(item.name.clone(), id).is_some() {
                return Err(MixForgeError::Validation(format!(
                    "Item '{}' is defined twice",
                    item.name
                )));
            }
        }
        Ok(Self { items, index })
    }

    #[inline(always)]
    pub fn get(&self, id: ItemId) -> &Item {
        &self.items[id]
    }

    pub fn id_of(&self, name: &str) -> Option<ItemId> {
        self.index.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Item> {
        self.id_of(name).map(|id| &self.items[id])
    }

    pub fn resolve(&self, name: &str) -> MfResult<ItemId> {
        self.id_of(name)
            .ok_or_else(|| MixForgeError::UnknownItem(name.to_string()))
    }

    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> MfResult<Vec<ItemId>> {
        names.iter().map(|n| self.resolve(n.as_ref())).collect()
    }

    pub fn names_of(&self, combination: &[ItemId]) -> Vec<String> {
        combination
            .iter()
            .map(|&id| self.items[id].name.clone())
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> {
        0..self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The built-in sixteen mixing ingredients.
pub(crate) fn standard_items() -> Vec<Item> {
    use Effect::*;
    vec![
        Item::new(
            "Cuke",
            2.0,
            Energizing,
            &[
                (Toxic, Euphoric),
                (Slippery, Munchies),
                (Sneaky, Paranoia),
                (Foggy, Cyclopean),
                (Gingeritis, ThoughtProvoking),
                (Munchies, Athletic),
                (Euphoric, Laxative),
            ],
        ),
        Item::new(
            "Flu Medicine",
            5.0,
            Sedating,
            &[
                (Calming, BrightEyed),
                (Athletic, Munchies),
                (ThoughtProvoking, Gingeritis),
                (Cyclopean, Foggy),
                (Munchies, Slippery),
                (Laxative, Euphoric),
                (Euphoric, Toxic),
                (Focused, Calming),
                (Electrifying, Refreshing),
                (Shrinking, Paranoia),
            ],
        ),
        Item::new(
            "Gasoline",
            5.0,
            Toxic,
            &[
                (Gingeritis, Smelly),
                (Jennerising, Sneaky),
                (Sneaky, TropicThunder),
                (Munchies, Sedating),
                (Energizing, Euphoric),
                (Euphoric, Energizing),
                (Laxative, Foggy),
                (Disorienting, Glowing),
                (Paranoia, Calming),
                (Electrifying, Disorienting),
                (Shrinking, Focused),
            ],
        ),
        Item::new(
            "Donut",
            3.0,
            CalorieDense,
            &[
                (CalorieDense, Explosive),
                (Balding, Sneaky),
                (AntiGravity, Slippery),
                (Jennerising, Gingeritis),
                (Focused, Euphoric),
                (Shrinking, Energizing),
            ],
        ),
        Item::new(
            "Energy Drink",
            6.0,
            Athletic,
            &[
                (Sedating, Munchies),
                (Euphoric, Energizing),
                (Spicy, Euphoric),
                (TropicThunder, Sneaky),
                (Glowing, Disorienting),
                (Foggy, Laxative),
                (Disorienting, Electrifying),
                (Schizophrenia, Balding),
                (Focused, Shrinking),
            ],
        ),
        Item::new(
            "Mouth Wash",
            4.0,
            Balding,
            &[
                (Calming, AntiGravity),
                (CalorieDense, Sneaky),
                (Explosive, Sedating),
                (Focused, Jennerising),
            ],
        ),
        Item::new(
            "Motor Oil",
            6.0,
            Slippery,
            &[
                (Energizing, Munchies),
                (Foggy, Toxic),
                (Euphoric, Sedating),
                (Paranoia, AntiGravity),
                (Munchies, Schizophrenia),
            ],
        ),
        Item::new(
            "Banana",
            2.0,
            Gingeritis,
            &[
                (Energizing, ThoughtProvoking),
                (Calming, Sneaky),
                (Toxic, Smelly),
                (LongFaced, Refreshing),
                (Cyclopean, ThoughtProvoking),
                (Disorienting, Focused),
                (Focused, SeizureInducing),
                (Paranoia, Jennerising),
                (Smelly, AntiGravity),
            ],
        ),
        Item::new(
            "Chili",
            7.0,
            Spicy,
            &[
                (Athletic, Euphoric),
                (AntiGravity, TropicThunder),
                (Sneaky, BrightEyed),
                (Munchies, Toxic),
                (Laxative, LongFaced),
                (Shrinking, Refreshing),
            ],
        ),
        Item::new(
            "Iodine",
            8.0,
            Jennerising,
            &[
                (Calming, Balding),
                (Toxic, Sneaky),
                (Foggy, Paranoia),
                (CalorieDense, Gingeritis),
                (Euphoric, SeizureInducing),
                (Refreshing, ThoughtProvoking),
            ],
        ),
        Item::new(
            "Paracetamol",
            3.0,
            Sneaky,
            &[
                (Energizing, Paranoia),
                (Calming, Slippery),
                (Toxic, TropicThunder),
                (Spicy, BrightEyed),
                (Glowing, Toxic),
                (Foggy, Calming),
                (Munchies, AntiGravity),
                (Paranoia, Balding),
                (Electrifying, Athletic),
                (Focused, Gingeritis),
            ],
        ),
        Item::new(
            "Viagra",
            4.0,
            TropicThunder,
            &[
                (Athletic, Sneaky),
                (Euphoric, BrightEyed),
                (Laxative, Calming),
                (Disorienting, Toxic),
            ],
        ),
        Item::new(
            "Horse Semen",
            9.0,
            LongFaced,
            &[
                (AntiGravity, Calming),
                (Gingeritis, Refreshing),
                (ThoughtProvoking, Electrifying),
            ],
        ),
        Item::new(
            "Mega Bean",
            7.0,
            Foggy,
            &[
                (Energizing, Cyclopean),
                (Calming, Glowing),
                (Sneaky, Calming),
                (Jennerising, Paranoia),
                (Athletic, Laxative),
                (Slippery, Toxic),
                (ThoughtProvoking, Energizing),
                (SeizureInducing, Focused),
                (Focused, Disorienting),
                (Shrinking, Electrifying),
            ],
        ),
        Item::new(
            "Addy",
            9.0,
            ThoughtProvoking,
            &[
                (Sedating, Gingeritis),
                (LongFaced, Electrifying),
                (Glowing, Refreshing),
                (Foggy, Energizing),
                (Explosive, Euphoric),
            ],
        ),
        Item::new(
            "Battery",
            8.0,
            BrightEyed,
            &[
                (Munchies, TropicThunder),
                (Euphoric, Zombifying),
                (Electrifying, Euphoric),
                (Laxative, CalorieDense),
                (Cyclopean, Glowing),
                (Shrinking, Munchies),
            ],
        ),
    ]
}
