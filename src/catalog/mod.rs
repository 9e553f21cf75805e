pub mod effects;
pub mod items;
pub mod loader;
pub mod materials;

pub use self::effects::{Effect, EffectTable};
pub use self::items::{Item, ItemCatalog, ItemId, Rule};
pub use self::materials::RawMaterial;

use crate::error::{MfResult, MixForgeError};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Read-only game data shared (via `Arc`) by the scorer and the optimizer.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub effects: EffectTable,
    pub items: ItemCatalog,
    pub materials: Vec<RawMaterial>,
}

impl Catalog {
    /// Validated construction. Every effect an item or material can produce
    /// must have a multiplier; anything else is a data error.
    pub fn new(effects: EffectTable, items: Vec<Item>, materials: Vec<RawMaterial>) -> MfResult<Self> {
        let catalog = Self {
            effects,
            items: ItemCatalog::new(items)?,
            materials,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in effect table, sixteen items and six raw materials.
    ///
    /// Built-in data that fails validation is a bug, not a user error.
    pub fn standard() -> Self {
        Self::built_in(items::standard_items())
    }

    fn built_in(items: Vec<Item>) -> Self {
        Self::new(EffectTable::standard(), items, materials::standard_materials())
            .unwrap_or_else(|e| panic!("❌ Built-in catalog is invalid: {}", e))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> MfResult<Self> {
        loader::load_catalog_file(path)
    }

    pub fn validate(&self) -> MfResult<()> {
        let table = &self.effects;
        let missing = |owner: &str, effect: Effect| {
            MixForgeError::Validation(format!(
                "'{}' references effect '{}' which has no multiplier",
                owner, effect
            ))
        };

        for item in self.items.iter() {
            if !(item.price.is_finite() && item.price > 0.0) {
                return Err(MixForgeError::Validation(format!(
                    "Item '{}' must have a positive price (got {})",
                    item.name, item.price
                )));
            }
            if !table.contains(item.effect) {
                return Err(missing(&item.name, item.effect));
            }

            let mut triggers = HashSet::with_capacity(item.rules.len());
            for rule in &item.rules {
                if !table.contains(rule.trigger) {
                    return Err(missing(&item.name, rule.trigger));
                }
                if !table.contains(rule.replacement) {
                    return Err(missing(&item.name, rule.replacement));
                }
                if !triggers.insert(rule.trigger) {
                    return Err(MixForgeError::Validation(format!(
                        "Item '{}' has two rules triggered by '{}'",
                        item.name, rule.trigger
                    )));
                }
            }

            if item.has_self_trigger() {
                warn!(
                    "Item '{}' has a rule keyed on its own base effect '{}'; it will never fire on its own step",
                    item.name, item.effect
                );
            }
        }

        let mut names = HashSet::with_capacity(self.materials.len());
        for material in &self.materials {
            if !names.insert(material.name.as_str()) {
                return Err(MixForgeError::Validation(format!(
                    "Raw material '{}' is defined twice",
                    material.name
                )));
            }
            if !(material.value.is_finite() && material.value >= 0.0) {
                return Err(MixForgeError::Validation(format!(
                    "Raw material '{}' has invalid value {}",
                    material.name, material.value
                )));
            }
            if let Some(effect) = material.effect {
                if !table.contains(effect) {
                    return Err(missing(&material.name, effect));
                }
            }
        }

        Ok(())
    }

    pub fn material(&self, name: &str) -> MfResult<&RawMaterial> {
        self.materials
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| MixForgeError::UnknownMaterial(name.to_string()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
