use crate::catalog::Catalog;
use crate::config::GeneticParams;
use crate::error::{MfResult, MixForgeError};
use crate::optimizer::{
    CancelFlag, ChannelProgress, NoProgress, Optimizer, ProgressCallback, ProgressEvent,
    SearchConfig, SearchResult,
};
use crate::scorer::{ActiveEffects, Scorer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::info;

/// `(combination, multiplier, effects, cost, profit)`
pub type ResultTuple = (Vec<String>, f64, ActiveEffects, f64, f64);

/// Service: search the built-in catalog with default genetic settings.
///
/// A stop from `callback` yields the empty tuple `([], 0, {}, 0, 0)`.
pub fn find_best_combination(
    config: &SearchConfig,
    callback: Option<&dyn ProgressCallback>,
) -> MfResult<ResultTuple> {
    let scorer = Scorer::standard();
    let result = search(&scorer, &GeneticParams::default(), config, None, callback)?;
    Ok(result.into_tuple())
}

/// Service: one synchronous run against any catalog.
pub fn search(
    scorer: &Scorer,
    params: &GeneticParams,
    config: &SearchConfig,
    seed: Option<u64>,
    callback: Option<&dyn ProgressCallback>,
) -> MfResult<SearchResult> {
    let optimizer = Optimizer::new(scorer.clone(), params.clone());
    match callback {
        Some(cb) => optimizer.run(config, seed, cb),
        None => optimizer.run(config, seed, &NoProgress),
    }
}

/// A search running on its own thread.
pub struct SearchHandle {
    events: Receiver<ProgressEvent>,
    cancel: Arc<AtomicBool>,
    worker: JoinHandle<MfResult<SearchResult>>,
}

impl SearchHandle {
    /// Progress checkpoints, in order. Closes when the worker finishes.
    pub fn events(&self) -> &Receiver<ProgressEvent> {
        &self.events
    }

    /// Requests a stop; honoured at the next checkpoint.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    pub fn join(self) -> MfResult<SearchResult> {
        self.worker
            .join()
            .map_err(|_| MixForgeError::Worker("search thread panicked".into()))?
    }
}

/// Service: start a search on a dedicated thread so the caller never blocks.
pub fn spawn_search(
    catalog: Arc<Catalog>,
    params: GeneticParams,
    config: SearchConfig,
    seed: Option<u64>,
) -> MfResult<SearchHandle> {
    params.validate()?;
    config.validate(&catalog)?;

    let (tx, events) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let callback = CancelFlag::with_flag(Arc::clone(&cancel), ChannelProgress::new(tx));

    let worker = thread::Builder::new()
        .name("mixforge-search".into())
        .spawn(move || {
            info!("🚀 Background search started");
            let optimizer = Optimizer::new(Scorer::new(catalog), params);
            optimizer.run(&config, seed, &callback)
        })?;

    Ok(SearchHandle {
        events,
        cancel,
        worker,
    })
}
