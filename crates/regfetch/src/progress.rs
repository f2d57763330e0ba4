//! Progress events and the channel that carries per-entry fetch telemetry.
//!
//! The fetcher emits `FetchEvent`s while it walks the catalog. They flow
//! through an unbounded `tokio::sync::mpsc` channel to a single consumer (the
//! CLI printer, tests). Every event is delivered in order regardless of how
//! far the consumer falls behind; once the receiver is gone, events are
//! dropped.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::report::EntryOutcome;

/// A progress event emitted during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchEvent {
    /// Monotonically increasing sequence number.
    pub seq: u64,
    /// The kind of progress event.
    pub event: FetchEventKind,
}

/// The specific kind of progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FetchEventKind {
    /// The run is about to walk `total` catalog entries.
    RunStarted { total: usize, output_dir: PathBuf },
    /// A network attempt for this entry is starting.
    EntryStarted { id: String, url: String },
    /// An entry reached its final outcome for this run.
    EntryFinished { id: String, outcome: EntryOutcome },
    /// All entries processed.
    RunFinished {
        downloaded: usize,
        skipped: usize,
        failed: usize,
    },
}

pub type ProgressSender = tokio::sync::mpsc::UnboundedSender<FetchEvent>;

pub type ProgressReceiver = tokio::sync::mpsc::UnboundedReceiver<FetchEvent>;

/// Create a progress channel.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Emit an event, ignoring send errors (receiver dropped).
pub fn emit(tx: &Option<ProgressSender>, seq: &mut u64, event: FetchEventKind) {
    if let Some(ref sender) = tx {
        *seq += 1;
        let _ = sender.send(FetchEvent { seq: *seq, event });
    }
}
