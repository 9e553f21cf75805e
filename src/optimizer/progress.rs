use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Whether the search should keep going after a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl Flow {
    #[inline(always)]
    pub fn is_stop(self) -> bool {
        self == Flow::Stop
    }
}

impl From<bool> for Flow {
    fn from(keep_going: bool) -> Self {
        if keep_going {
            Flow::Continue
        } else {
            Flow::Stop
        }
    }
}

/// Receives progress at fixed checkpoints.
/// Returning `Flow::Stop` aborts the run with an empty result.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, percent: u8, message: &str) -> Flow;
}

/// Plain closures: `true` means continue.
impl<F> ProgressCallback for F
where
    F: Fn(u8, &str) -> bool + Send + Sync,
{
    fn on_progress(&self, percent: u8, message: &str) -> Flow {
        Flow::from(self(percent, message))
    }
}

/// Ignores every checkpoint and never stops.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _percent: u8, _message: &str) -> Flow {
        Flow::Continue
    }
}

/// Wraps a callback with an externally settable stop flag.
///
/// The flag is only consulted at checkpoints, so a stop takes effect at the
/// next generation or permutation batch boundary.
pub struct CancelFlag<CB> {
    flag: Arc<AtomicBool>,
    inner: CB,
}

impl<CB: ProgressCallback> CancelFlag<CB> {
    pub fn new(inner: CB) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            inner,
        }
    }

    pub fn with_flag(flag: Arc<AtomicBool>, inner: CB) -> Self {
        Self { flag, inner }
    }

    pub fn handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

impl<CB: ProgressCallback> ProgressCallback for CancelFlag<CB> {
    fn on_progress(&self, percent: u8, message: &str) -> Flow {
        if self.flag.load(Ordering::Relaxed) {
            return Flow::Stop;
        }
        let flow = self.inner.on_progress(percent, message);
        if self.flag.load(Ordering::Relaxed) {
            Flow::Stop
        } else {
            flow
        }
    }
}

/// One checkpoint, as forwarded to another thread.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProgressEvent {
    pub percent: u8,
    pub message: String,
}

/// Forwards checkpoints over a channel. A dropped receiver does not stop the run.
pub struct ChannelProgress {
    tx: Sender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn new(tx: Sender<ProgressEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressCallback for ChannelProgress {
    fn on_progress(&self, percent: u8, message: &str) -> Flow {
        let _ = self.tx.send(ProgressEvent {
            percent,
            message: message.to_string(),
        });
        Flow::Continue
    }
}
