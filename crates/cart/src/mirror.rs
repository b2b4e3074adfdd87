//! Latest-wins mirror writer.
//!
//! Every mutation publishes the full line list into a watch channel; one
//! background task serializes and writes it. The channel only ever holds the
//! newest snapshot, so bursts coalesce and a slow write can never land after
//! a newer one. Write failures are logged and swallowed - the in-memory cart
//! stays authoritative and the mirror catches up on the next mutation.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::line::CartLine;
use crate::store::CartStore;

/// Handle to the background writer task.
pub(crate) struct Mirror {
    snapshot_tx: watch::Sender<(u64, Vec<CartLine>)>,
    attempted_rx: watch::Receiver<u64>,
    generation: u64,
    // The task exits on its own when `snapshot_tx` is dropped; `shutdown`
    // additionally waits for that exit.
    writer: JoinHandle<()>,
}

impl Mirror {
    /// Spawn the writer task against the given store.
    ///
    /// Must be called within a tokio runtime.
    pub(crate) fn spawn(store: Arc<dyn CartStore>) -> Self {
        let (snapshot_tx, mut snapshot_rx) = watch::channel((0_u64, Vec::new()));
        let (attempted_tx, attempted_rx) = watch::channel(0_u64);

        let writer = tokio::spawn(async move {
            while snapshot_rx.changed().await.is_ok() {
                let (generation, lines) = snapshot_rx.borrow_and_update().clone();
                write_snapshot(store.as_ref(), &lines).await;
                if attempted_tx.send(generation).is_err() {
                    break;
                }
            }
        });

        Self {
            snapshot_tx,
            attempted_rx,
            generation: 0,
            writer,
        }
    }

    /// Queue the given snapshot for writing, replacing any queued one.
    pub(crate) fn publish(&mut self, lines: Vec<CartLine>) {
        self.generation += 1;
        // Send only fails when the writer task is gone; the cart stays
        // authoritative in memory either way.
        if self.snapshot_tx.send((self.generation, lines)).is_err() {
            tracing::warn!("cart mirror writer is no longer running");
        }
    }

    /// Wait until the writer has attempted the newest published snapshot.
    ///
    /// "Attempted" rather than "persisted": a store that keeps failing would
    /// otherwise wedge callers forever, and failures are best-effort by
    /// design.
    pub(crate) async fn flush(&mut self) {
        let target = self.generation;
        if self
            .attempted_rx
            .wait_for(|attempted| *attempted >= target)
            .await
            .is_err()
        {
            tracing::warn!("cart mirror writer stopped before flush completed");
        }
    }

    /// Flush, then stop the writer task and wait for it to exit.
    pub(crate) async fn shutdown(mut self) {
        self.flush().await;
        let Self {
            snapshot_tx, writer, ..
        } = self;
        drop(snapshot_tx);
        if writer.await.is_err() {
            tracing::warn!("cart mirror writer ended abnormally");
        }
    }
}

async fn write_snapshot(store: &dyn CartStore, lines: &[CartLine]) {
    let payload = match serde_json::to_vec(lines) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::warn!(%error, "failed to serialize cart snapshot");
            return;
        }
    };
    if let Err(error) = store.save(&payload).await {
        tracing::warn!(%error, lines = lines.len(), "failed to persist cart snapshot");
    }
}
