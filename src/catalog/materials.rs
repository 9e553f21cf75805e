use super::effects::{Effect, EffectTable};
use crate::scorer::ActiveEffects;
use serde::{Deserialize, Serialize};

/// A base substance: the starting effect (if any) and its unmixed sale value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterial {
    pub name: String,
    pub effect: Option<Effect>,
    pub value: f64,
}

impl RawMaterial {
    pub fn new(name: impl Into<String>, effect: Option<Effect>, value: f64) -> Self {
        Self {
            name: name.into(),
            effect,
            value,
        }
    }

    /// The seed effect set a search starts from when mixing into this material.
    pub fn initial_effects(&self, table: &EffectTable) -> ActiveEffects {
        let mut effects = ActiveEffects::new();
        if let Some(effect) = self.effect {
            effects.set(effect, table.value(effect));
        }
        effects
    }
}

pub(crate) fn standard_materials() -> Vec<RawMaterial> {
    vec![
        RawMaterial::new("OG Kush", Some(Effect::Calming), 35.0),
        RawMaterial::new("Sour Diesel", Some(Effect::Refreshing), 35.0),
        RawMaterial::new("Green Crack", Some(Effect::Energizing), 35.0),
        RawMaterial::new("Granddaddy Purple", Some(Effect::Sedating), 35.0),
        RawMaterial::new("Meth", None, 70.0),
        RawMaterial::new("Cocaine", None, 150.0),
    ]
}
