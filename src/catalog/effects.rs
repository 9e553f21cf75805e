use crate::error::{MfResult, MixForgeError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// The fixed effect vocabulary. Display/FromStr use the in-game names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum Effect {
    #[strum(serialize = "Anti-Gravity")]
    AntiGravity,
    Athletic,
    Balding,
    #[strum(serialize = "Bright-Eyed")]
    BrightEyed,
    Calming,
    #[strum(serialize = "Calorie-Dense")]
    CalorieDense,
    Cyclopean,
    Disorienting,
    Electrifying,
    Energizing,
    Euphoric,
    Explosive,
    Focused,
    Foggy,
    Gingeritis,
    Glowing,
    Jennerising,
    Laxative,
    #[strum(serialize = "Long Faced")]
    LongFaced,
    Munchies,
    Paranoia,
    Refreshing,
    Schizophrenia,
    Sedating,
    #[strum(serialize = "Seizure-Inducing")]
    SeizureInducing,
    Shrinking,
    Slippery,
    Smelly,
    Sneaky,
    Spicy,
    #[strum(serialize = "Thought-Provoking")]
    ThoughtProvoking,
    Toxic,
    #[strum(serialize = "Tropic Thunder")]
    TropicThunder,
    Zombifying,
}

impl Effect {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Parses an in-game effect name, mapping failures into the crate error.
    pub fn parse(name: &str) -> MfResult<Self> {
        Effect::from_str(name.trim()).map_err(|_| MixForgeError::UnknownEffect(name.to_string()))
    }
}

impl Serialize for Effect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Effect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Effect::from_str(&raw).map_err(|_| serde::de::Error::custom(format!("unknown effect '{}'", raw)))
    }
}

const STANDARD_MULTIPLIERS: [(Effect, f64); Effect::COUNT] = [
    (Effect::AntiGravity, 0.54),
    (Effect::Athletic, 0.32),
    (Effect::Balding, 0.30),
    (Effect::BrightEyed, 0.40),
    (Effect::Calming, 0.10),
    (Effect::CalorieDense, 0.28),
    (Effect::Cyclopean, 0.56),
    (Effect::Disorienting, 0.00),
    (Effect::Electrifying, 0.50),
    (Effect::Energizing, 0.22),
    (Effect::Euphoric, 0.18),
    (Effect::Explosive, 0.00),
    (Effect::Focused, 0.16),
    (Effect::Foggy, 0.36),
    (Effect::Gingeritis, 0.20),
    (Effect::Glowing, 0.48),
    (Effect::Jennerising, 0.42),
    (Effect::Laxative, 0.00),
    (Effect::LongFaced, 0.52),
    (Effect::Munchies, 0.12),
    (Effect::Paranoia, 0.00),
    (Effect::Refreshing, 0.14),
    (Effect::Schizophrenia, 0.00),
    (Effect::Sedating, 0.26),
    (Effect::SeizureInducing, 0.00),
    (Effect::Shrinking, 0.60),
    (Effect::Slippery, 0.34),
    (Effect::Smelly, 0.00),
    (Effect::Sneaky, 0.24),
    (Effect::Spicy, 0.38),
    (Effect::ThoughtProvoking, 0.44),
    (Effect::Toxic, 0.00),
    (Effect::TropicThunder, 0.46),
    (Effect::Zombifying, 0.58),
];

/// Effect -> multiplier contribution. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectTable {
    values: [Option<f64>; Effect::COUNT],
}

impl EffectTable {
    pub fn standard() -> Self {
        let mut values = [None; Effect::COUNT];
        for (effect, value) in STANDARD_MULTIPLIERS {
            values[effect.index()] = Some(value);
        }
        Self { values }
    }

    /// Builds a partial table. Coverage against the item catalog is checked by `Catalog::new`.
    pub fn from_entries<I>(entries: I) -> MfResult<Self>
    where
        I: IntoIterator<Item = (Effect, f64)>,
    {
        let mut values = [None; Effect::COUNT];
        for (effect, value) in entries {
            if !value.is_finite() || value < 0.0 {
                return Err(MixForgeError::Validation(format!(
                    "Effect '{}' has invalid multiplier {}",
                    effect, value
                )));
            }
            if values[effect.index()].replace(value).is_some() {
                return Err(MixForgeError::Validation(format!(
                    "Effect '{}' is defined twice",
                    effect
                )));
            }
        }
        Ok(Self { values })
    }

    #[inline(always)]
    pub fn get(&self, effect: Effect) -> Option<f64> {
        self.values[effect.index()]
    }

    /// Multiplier for an effect known to be covered; uncovered effects contribute nothing.
    #[inline(always)]
    pub fn value(&self, effect: Effect) -> f64 {
        self.values[effect.index()].unwrap_or(0.0)
    }

    pub fn contains(&self, effect: Effect) -> bool {
        self.values[effect.index()].is_some()
    }

    pub fn require(&self, effect: Effect) -> MfResult<f64> {
        self.get(effect)
            .ok_or_else(|| MixForgeError::UnknownEffect(effect.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Effect, f64)> + '_ {
        Effect::iter().filter_map(move |e| self.get(e).map(|v| (e, v)))
    }
}

impl Default for EffectTable {
    fn default() -> Self {
        Self::standard()
    }
}
