//! Background snapshot writer.
//!
//! Save requests bump a generation counter. A single background task waits for
//! the counter to change, snapshots the store and hands the snapshot to the
//! sink. Requests made while a write is running collapse into one follow-up
//! write of the latest state, and there is never more than one write in flight.
//! The outcome of the latest write is kept so callers waiting on a save learn
//! when it failed.

use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    data::{document::SnapshotSink, store::SettingsStore},
    error::AppError,
};

pub struct SnapshotWriter {
    requested: watch::Sender<u64>,
    completed: watch::Receiver<WriteStatus>,
    task: JoinHandle<()>,
}

/// Generation and outcome of the latest finished write.
#[derive(Debug, Clone, Default)]
struct WriteStatus {
    generation: u64,
    failure: Option<String>,
}

impl WriteStatus {
    fn result(&self) -> Result<(), AppError> {
        match &self.failure {
            Some(reason) => Err(AppError::SnapshotWriteErr {
                generation: self.generation,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl SnapshotWriter {
    /// Spawns the writer task.
    ///
    /// # Arguments
    /// - `store` - Store snapshotted on every write
    /// - `sink` - Destination of the snapshots
    pub fn spawn(store: Arc<SettingsStore>, sink: Arc<dyn SnapshotSink>) -> Self {
        let (requested, requested_rx) = watch::channel(0u64);
        let (completed_tx, completed) = watch::channel(WriteStatus::default());

        let task = tokio::spawn(run(store, sink, requested_rx, completed_tx));

        Self {
            requested,
            completed,
            task,
        }
    }

    /// Requests a snapshot of the current state.
    ///
    /// Returns immediately with the request's generation, which `wait_for`
    /// accepts.
    pub fn request_save(&self) -> u64 {
        let mut generation = 0;
        self.requested.send_modify(|current| {
            *current += 1;
            generation = *current;
        });
        generation
    }

    /// Waits until a write covering `generation` has finished.
    ///
    /// A write covers every request made before its snapshot was taken.
    ///
    /// # Returns
    /// - `Ok(())` - The latest write, at or after `generation`, succeeded
    /// - `Err(AppError::SnapshotWriteErr)` - The latest write failed
    /// - `Err(AppError::InternalError)` - The writer stopped first
    pub async fn wait_for(&self, generation: u64) -> Result<(), AppError> {
        let mut completed = self.completed.clone();
        let status = completed
            .wait_for(|done| done.generation >= generation)
            .await
            .map_err(|_| AppError::InternalError("Snapshot writer stopped".to_string()))?
            .clone();
        status.result()
    }

    /// Last generation written, successfully or not.
    pub fn completed_generation(&self) -> u64 {
        self.completed.borrow().generation
    }

    /// Flushes any pending request and stops the writer.
    ///
    /// # Returns
    /// - `Ok(())` - Writer stopped and its last write succeeded
    /// - `Err(AppError::SnapshotWriteErr)` - The final write failed
    /// - `Err(AppError::InternalError)` - The writer task panicked
    pub async fn shutdown(self) -> Result<(), AppError> {
        let Self {
            requested,
            completed,
            task,
        } = self;
        drop(requested);
        task.await
            .map_err(|e| AppError::InternalError(format!("Snapshot writer panicked: {}", e)))?;

        let status = completed.borrow().clone();
        status.result()
    }
}

async fn run(
    store: Arc<SettingsStore>,
    sink: Arc<dyn SnapshotSink>,
    mut requested: watch::Receiver<u64>,
    completed: watch::Sender<WriteStatus>,
) {
    while requested.changed().await.is_ok() {
        let generation = *requested.borrow_and_update();

        let db = store.snapshot().await;
        let failure = match sink.write(&db).await {
            Ok(()) => {
                tracing::debug!("Wrote settings snapshot {}", generation);
                None
            }
            Err(e) => {
                tracing::error!("Failed to write settings snapshot {}: {:?}", generation, e);
                Some(e.to_string())
            }
        };

        completed.send_replace(WriteStatus {
            generation,
            failure,
        });
    }
}
