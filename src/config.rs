use crate::catalog::{Catalog, Effect};
use crate::consts::{DEFAULT_BASE_VALUE, DEFAULT_MAX_PERMS, MAX_ACTIVE_EFFECTS};
use crate::error::{MfResult, MixForgeError};
use crate::scorer::ActiveEffects;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub genetics: GeneticParams,
}

/// What the mix starts from: a raw material and/or explicit effects, plus its value.
#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SubstanceParams {
    /// Raw material to mix into (sets the starting effect and base value)
    #[arg(short = 'm', long)]
    pub material: Option<String>,

    /// Extra starting effects, comma separated
    #[arg(short = 'e', long, value_delimiter = ',')]
    pub effects: Vec<String>,

    /// Base sale value; overrides the raw material's value
    #[arg(short = 'b', long)]
    pub base_value: Option<f64>,
}

impl SubstanceParams {
    /// Resolves into the seed effect set and the base value used for profit.
    pub fn resolve(&self, catalog: &Catalog) -> MfResult<(ActiveEffects, f64)> {
        let mut seed = ActiveEffects::new();
        let mut base_value = DEFAULT_BASE_VALUE;

        if let Some(name) = &self.material {
            let material = catalog.material(name)?;
            seed = material.initial_effects(&catalog.effects);
            base_value = material.value;
        }

        for name in &self.effects {
            let effect = Effect::parse(name)?;
            let value = catalog.effects.require(effect)?;
            seed.set(effect, value);
        }

        if seed.len() > MAX_ACTIVE_EFFECTS {
            return Err(MixForgeError::Config(format!(
                "At most {} starting effects are allowed (got {})",
                MAX_ACTIVE_EFFECTS,
                seed.len()
            )));
        }

        if let Some(v) = self.base_value {
            base_value = v;
        }
        if !base_value.is_finite() {
            return Err(MixForgeError::Config(format!(
                "Base value must be finite (got {})",
                base_value
            )));
        }

        Ok((seed, base_value))
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Number of items in the mix (repeats allowed)
    #[arg(short = 'n', long, default_value_t = 8)]
    pub combo_size: usize,

    /// Wall-clock budget in seconds, shared by evolution and refinement
    #[arg(short = 'T', long = "time", default_value_t = 30)]
    pub time_limit: u64,

    /// Orderings tried by the permutation refiner
    #[arg(long, default_value_t = DEFAULT_MAX_PERMS)]
    pub max_perms: usize,

    /// Item excluded from the search (repeatable)
    #[arg(long = "ban", value_name = "ITEM")]
    pub banned: Vec<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub substance: SubstanceParams,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            combo_size: 8,
            time_limit: 30,
            max_perms: DEFAULT_MAX_PERMS,
            banned: Vec::new(),
            seed: None,
            substance: SubstanceParams::default(),
        }
    }
}

/// Genetic search tuning. Per-run hyperparameters are drawn uniformly from these ranges.
#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticParams {
    // === POPULATION ===
    #[arg(long, default_value_t = 200)]
    pub population_min: usize,
    #[arg(long, default_value_t = 800)]
    pub population_max: usize,

    // === MUTATION ===
    #[arg(long, default_value_t = 0.1)]
    pub mutation_min: f64,
    #[arg(long, default_value_t = 0.8)]
    pub mutation_max: f64,

    // === SELECTION ===
    #[arg(long, default_value_t = 2)]
    pub tournament_min: usize,
    #[arg(long, default_value_t = 8)]
    pub tournament_max: usize,

    // Fraction of the population carried over unchanged, redrawn every generation
    #[arg(long, default_value_t = 0.05)]
    pub elite_min: f64,
    #[arg(long, default_value_t = 0.15)]
    pub elite_max: f64,

    // === SCHEDULE ===
    #[arg(long, default_value_t = 10_000)]
    pub max_generations: usize,
    #[arg(long, default_value_t = 20)]
    pub diversity_interval: usize,
    #[arg(long, default_value_t = 0.1)]
    pub diversity_fraction: f64,

    // === REPORTING ===
    #[arg(long, default_value_t = 100)]
    pub report_interval: usize,
    #[arg(long, default_value_t = 500)]
    pub perm_report_interval: usize,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_min: 200,
            population_max: 800,
            mutation_min: 0.1,
            mutation_max: 0.8,
            tournament_min: 2,
            tournament_max: 8,
            elite_min: 0.05,
            elite_max: 0.15,
            max_generations: 10_000,
            diversity_interval: 20,
            diversity_fraction: 0.1,
            report_interval: 100,
            perm_report_interval: 500,
        }
    }
}

impl GeneticParams {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> MfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MixForgeError::Config(format!(
                "Could not read genetics file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let params: GeneticParams = serde_json::from_str(&content)?;
        params.validate()?;
        Ok(params)
    }

    /// Overwrites fields the user passed explicitly on the command line.
    pub fn merge_from_cli(&mut self, cli: &GeneticParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $id:expr) => {
                if matches.value_source($id) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(population_min, "population_min");
        update_if_present!(population_max, "population_max");
        update_if_present!(mutation_min, "mutation_min");
        update_if_present!(mutation_max, "mutation_max");
        update_if_present!(tournament_min, "tournament_min");
        update_if_present!(tournament_max, "tournament_max");
        update_if_present!(elite_min, "elite_min");
        update_if_present!(elite_max, "elite_max");
        update_if_present!(max_generations, "max_generations");
        update_if_present!(diversity_interval, "diversity_interval");
        update_if_present!(diversity_fraction, "diversity_fraction");
        update_if_present!(report_interval, "report_interval");
        update_if_present!(perm_report_interval, "perm_report_interval");
    }

    pub fn validate(&self) -> MfResult<()> {
        fn range<T: PartialOrd + std::fmt::Display>(name: &str, lo: T, hi: T) -> MfResult<()> {
            if lo > hi {
                return Err(MixForgeError::Config(format!(
                    "{} range is inverted ({} > {})",
                    name, lo, hi
                )));
            }
            Ok(())
        }

        fn unit(name: &str, v: f64) -> MfResult<()> {
            if !(0.0..=1.0).contains(&v) {
                return Err(MixForgeError::Config(format!(
                    "{} must be within [0, 1] (got {})",
                    name, v
                )));
            }
            Ok(())
        }

        if self.population_min == 0 {
            return Err(MixForgeError::Config("population_min must be > 0".into()));
        }
        if self.tournament_min == 0 {
            return Err(MixForgeError::Config("tournament_min must be > 0".into()));
        }
        range("population", self.population_min, self.population_max)?;
        range("mutation", self.mutation_min, self.mutation_max)?;
        range("tournament", self.tournament_min, self.tournament_max)?;
        range("elite", self.elite_min, self.elite_max)?;

        unit("mutation_min", self.mutation_min)?;
        unit("mutation_max", self.mutation_max)?;
        unit("elite_min", self.elite_min)?;
        unit("elite_max", self.elite_max)?;
        unit("diversity_fraction", self.diversity_fraction)?;

        if self.max_generations == 0 {
            return Err(MixForgeError::Config("max_generations must be > 0".into()));
        }
        if self.diversity_interval == 0
            || self.report_interval == 0
            || self.perm_report_interval == 0
        {
            return Err(MixForgeError::Config(
                "diversity/report intervals must be > 0".into(),
            ));
        }
        Ok(())
    }
}
