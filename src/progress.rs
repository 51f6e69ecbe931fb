//! Progress snapshots and observer type

use serde::Serialize;
use std::sync::Arc;

/// Bytes transferred so far and, when known, the expected total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl ProgressEvent {
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        Self { loaded, total }
    }

    pub fn length_computable(&self) -> bool {
        matches!(self.total, Some(total) if total > 0)
    }

    /// Completed fraction in `0.0..=1.0`, if the total is known.
    pub fn fraction(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some((self.loaded as f64 / total as f64).min(1.0)),
            _ => None,
        }
    }
}

/// Caller-supplied progress observer.
pub type ProgressCallback = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;
