/// Hard ceiling on simultaneously active effects.
/// Base effects beyond this are dropped; rule replacements never grow the set.
pub const MAX_ACTIVE_EFFECTS: usize = 8;

/// Base value used for profit when neither a raw material nor an explicit value is given.
pub const DEFAULT_BASE_VALUE: f64 = 100.0;

/// Default number of orderings tried by the permutation refiner.
pub const DEFAULT_MAX_PERMS: usize = 5000;

// Progress checkpoints (percent) reported through the progress channel.
pub const PROGRESS_INIT: u8 = 10;
pub const PROGRESS_POPULATION_READY: u8 = 20;
pub const PROGRESS_EVOLUTION_SPAN: usize = 50;
pub const PROGRESS_EVOLUTION_DONE: u8 = 70;
pub const PROGRESS_REFINE_START: u8 = 75;
pub const PROGRESS_REFINE_SPAN: usize = 20;
pub const PROGRESS_DONE: u8 = 100;
