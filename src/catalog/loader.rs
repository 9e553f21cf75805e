use super::effects::{Effect, EffectTable};
use super::items::{standard_items, Item};
use super::materials::{standard_materials, RawMaterial};
use super::Catalog;
use crate::error::{MfResult, MixForgeError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// On-disk catalog. Every section is optional and falls back to the built-in data.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default)]
    pub effects: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub items: Option<Vec<ItemEntry>>,
    #[serde(default)]
    pub materials: Option<Vec<MaterialEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemEntry {
    pub name: String,
    pub price: f64,
    pub effect: String,
    /// `[trigger, replacement]` pairs, applied in listed order.
    #[serde(default)]
    pub rules: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialEntry {
    pub name: String,
    #[serde(default)]
    pub effect: Option<String>,
    pub value: f64,
}

pub fn load_catalog_file<P: AsRef<Path>>(path: P) -> MfResult<Catalog> {
    let path = path.as_ref();
    info!("📚 Loading catalog from: {}", path.display());
    let file = File::open(path).map_err(|e| {
        MixForgeError::Config(format!(
            "Could not open catalog at '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_catalog_from_reader(BufReader::new(file))
}

pub fn load_catalog_from_reader<R: Read>(reader: R) -> MfResult<Catalog> {
    let raw: CatalogFile = serde_json::from_reader(reader)?;
    build_catalog(raw)
}

pub fn build_catalog(raw: CatalogFile) -> MfResult<Catalog> {
    let effects = match raw.effects {
        Some(map) => {
            let entries = map
                .into_iter()
                .map(|(name, value)| Effect::parse(&name).map(|e| (e, value)))
                .collect::<MfResult<Vec<_>>>()?;
            EffectTable::from_entries(entries)?
        }
        None => EffectTable::standard(),
    };

    let items = match raw.items {
        Some(entries) => entries
            .into_iter()
            .map(parse_item)
            .collect::<MfResult<Vec<_>>>()?,
        None => standard_items(),
    };

    let materials = match raw.materials {
        Some(entries) => entries
            .into_iter()
            .map(parse_material)
            .collect::<MfResult<Vec<_>>>()?,
        None => standard_materials(),
    };

    debug!(
        "   -> {} effects, {} items, {} raw materials",
        effects.len(),
        items.len(),
        materials.len()
    );

    Catalog::new(effects, items, materials)
}

fn parse_item(entry: ItemEntry) -> MfResult<Item> {
    let effect = Effect::parse(&entry.effect)?;
    let rules = entry
        .rules
        .iter()
        .map(|(t, r)| Ok((Effect::parse(t)?, Effect::parse(r)?)))
        .collect::<MfResult<Vec<_>>>()?;
    Ok(Item::new(entry.name, entry.price, effect, &rules))
}

fn parse_material(entry: MaterialEntry) -> MfResult<RawMaterial> {
    let effect = match entry.effect.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(name) if name.eq_ignore_ascii_case("none") => None,
        Some(name) => Some(Effect::parse(name)?),
    };
    Ok(RawMaterial::new(entry.name, effect, entry.value))
}
