use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::errors::CoreError;
use crate::models::ledger::LedgerState;
use crate::models::settings::Settings;
use crate::models::snapshot::PersistedSnapshot;

use super::blob::BlobStore;
use super::format;

/// Result of reading the stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key.
    Missing,
    /// A snapshot inside the retention window.
    Loaded(LedgerState),
    /// A snapshot older than the retention window. Its contents are not returned.
    Expired,
}

enum WriteOp {
    Set(String),
    Remove,
}

impl std::fmt::Debug for WriteOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteOp::Set(blob) => write!(f, "Set({} bytes)", blob.len()),
            WriteOp::Remove => write!(f, "Remove"),
        }
    }
}

/// Sequenced persistence of ledger snapshots to a [`BlobStore`].
///
/// Every write gets a sequence number when it is issued. Writes are applied
/// one at a time under `applied`, which holds the highest sequence number
/// attempted so far; a write that arrives with a lower number is dropped.
/// So however the runtime schedules the spawned tasks, an older snapshot
/// never replaces a newer one.
pub struct StorageManager {
    store: Arc<dyn BlobStore>,
    key: String,
    retention: Duration,
    issued: u64,
    applied: Arc<Mutex<u64>>,
    pending: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for StorageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageManager")
            .field("store", &self.store.name())
            .field("key", &self.key)
            .field("retention_days", &self.retention.num_days())
            .field("issued", &self.issued)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl StorageManager {
    pub fn new(store: Arc<dyn BlobStore>, settings: &Settings) -> Self {
        Self {
            store,
            key: settings.storage_key.clone(),
            retention: settings.retention(),
            issued: 0,
            applied: Arc::new(Mutex::new(0)),
            pending: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    /// Number of scheduled writes that have not finished yet.
    pub fn pending_writes(&self) -> usize {
        self.pending.iter().filter(|h| !h.is_finished()).count()
    }

    /// Snapshot `state` as of `now` and write it in the background.
    ///
    /// The snapshot content is captured before this returns; the write itself
    /// runs on the tokio runtime and is not awaited. Failures are logged.
    /// Outside a tokio runtime nothing is scheduled and an error is returned.
    pub fn schedule_save(&mut self, state: &LedgerState, now: DateTime<Utc>) -> Result<u64, CoreError> {
        let runtime = Handle::try_current()
            .map_err(|e| CoreError::Storage(format!("No async runtime to persist on: {e}")))?;
        let write = self.prepare_save(state, now)?;
        let seq = write.seq();

        let handle = runtime.spawn(async move {
            let key = write.key.clone();
            if let Err(e) = write.apply().await {
                tracing::error!(key = %key, seq, error = %e, "failed to persist ledger snapshot");
            }
        });

        self.pending.retain(|h| !h.is_finished());
        self.pending.push(handle);
        Ok(seq)
    }

    /// Capture `state` as of `now` and assign the write its sequence number,
    /// without running it. [`schedule_save`](Self::schedule_save) spawns the
    /// returned write; callers that drive writes themselves apply it directly.
    pub fn prepare_save(&mut self, state: &LedgerState, now: DateTime<Utc>) -> Result<SnapshotWrite, CoreError> {
        let snapshot = PersistedSnapshot::capture(state, now);
        let blob = format::encode(&snapshot)?;
        Ok(self.prepare(WriteOp::Set(blob)))
    }

    /// Remove the stored snapshot. Sequenced like a save, so it supersedes
    /// every write issued before it.
    pub async fn clear(&mut self) -> Result<(), CoreError> {
        self.prepare(WriteOp::Remove).apply().await.map(|_| ())
    }

    /// Wait until every scheduled write has completed.
    pub async fn flush(&mut self) {
        for handle in self.pending.drain(..) {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "snapshot write task did not complete");
            }
        }
    }

    /// Read the stored snapshot and classify it against the retention window.
    ///
    /// Does not modify storage; an `Expired` outcome is for the caller to act on.
    pub async fn load(&self, now: DateTime<Utc>) -> Result<LoadOutcome, CoreError> {
        let blob = match self.store.get_item(&self.key).await? {
            Some(blob) => blob,
            None => return Ok(LoadOutcome::Missing),
        };

        let snapshot = format::decode(&blob)?;
        if snapshot.is_expired(now, self.retention) {
            return Ok(LoadOutcome::Expired);
        }
        Ok(LoadOutcome::Loaded(snapshot.into_state()))
    }

    fn prepare(&mut self, op: WriteOp) -> SnapshotWrite {
        self.issued = self.issued.saturating_add(1);
        SnapshotWrite {
            store: Arc::clone(&self.store),
            applied: Arc::clone(&self.applied),
            key: self.key.clone(),
            seq: self.issued,
            op,
        }
    }
}

/// One sequenced write, issued by a [`StorageManager`] but not yet applied.
pub struct SnapshotWrite {
    store: Arc<dyn BlobStore>,
    applied: Arc<Mutex<u64>>,
    key: String,
    seq: u64,
    op: WriteOp,
}

impl std::fmt::Debug for SnapshotWrite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotWrite")
            .field("key", &self.key)
            .field("seq", &self.seq)
            .field("op", &self.op)
            .finish()
    }
}

impl SnapshotWrite {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Apply the write unless a write with a higher sequence number has
    /// already been attempted. Returns `false` when it was skipped as stale.
    pub async fn apply(self) -> Result<bool, CoreError> {
        let mut last = self.applied.lock().await;
        if self.seq < *last {
            tracing::debug!(key = %self.key, seq = self.seq, last = *last, "skipping superseded snapshot write");
            return Ok(false);
        }
        // An attempted write supersedes older ones even if it fails.
        *last = self.seq;

        match self.op {
            WriteOp::Set(blob) => self.store.set_item(&self.key, &blob).await?,
            WriteOp::Remove => self.store.remove_item(&self.key).await?,
        }
        Ok(true)
    }
}
