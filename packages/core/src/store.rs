//! In-memory snapshot store.
//!
//! `SnapshotStore` keeps a bounded window of computed summaries collected
//! across polling cycles (ring-buffer semantics backed by `VecDeque`), plus
//! the most recent poll failure so readers never mistake stale numbers for
//! current ones.
//!
//! The store itself is not `Sync`; callers wrap it in
//! `Arc<RwLock<SnapshotStore>>` to share it between the polling task and
//! the Axum handlers.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::types::Summary;

/// Default number of snapshots retained: 24 hours at a 30 second interval.
pub const DEFAULT_CAPACITY: usize = 2_880;

/// One successful analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub fetched_at: DateTime<Utc>,
    pub rows_dropped: usize,
    pub summary: Summary,
}

/// A poll that produced no usable summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollFailure {
    pub message: String,
    pub failed_at: DateTime<Utc>,
}

/// What a reader should display right now.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    /// No poll has completed yet.
    Pending,
    Ready(Snapshot),
    /// The latest poll failed; any older snapshot is stale.
    Failed(PollFailure),
}

/// Capacity-bounded store for `Snapshot` values.
#[derive(Debug)]
pub struct SnapshotStore {
    data: VecDeque<Snapshot>,
    capacity: usize,
    last_failure: Option<PollFailure>,
}

impl SnapshotStore {
    /// Create a new store with the given maximum capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
            last_failure: None,
        }
    }

    /// Append a snapshot, evicting the oldest if the store is full.
    /// Clears any recorded failure.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.capacity == 0 {
            return;
        }
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(snapshot);
        self.last_failure = None;
    }

    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.last_failure = Some(PollFailure {
            message: message.into(),
            failed_at: Utc::now(),
        });
    }

    pub fn feed_state(&self) -> FeedState {
        if let Some(failure) = &self.last_failure {
            return FeedState::Failed(failure.clone());
        }
        match self.data.back() {
            Some(snapshot) => FeedState::Ready(snapshot.clone()),
            None => FeedState::Pending,
        }
    }

    /// Most recent snapshot regardless of later failures.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.data.back()
    }

    /// Return the `n` most recent snapshots, oldest first.
    pub fn get_last_n(&self, n: usize) -> Vec<Snapshot> {
        let skip = self.data.len().saturating_sub(n);
        self.data.iter().skip(skip).cloned().collect()
    }

    /// Number of snapshots currently held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when the store contains no snapshots.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
