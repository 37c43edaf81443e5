//! Per-client table watcher.
//!
//! Each client subscribes to the table document and reacts when the
//! status flips to both-ready by attempting the round resolution itself.
//! Both clients race; the version-checked write in `resolve_if_ready`
//! lets exactly one of them commit.

use std::sync::Arc;

use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::table_flow::{presentation, TableFlowService};
use crate::store::retry::is_transient;
use crate::tables::{TableDoc, TableStatus, TABLES_COLLECTION};

pub struct TableWatcher {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl TableWatcher {
    pub fn spawn(service: Arc<TableFlowService>, table_id: Uuid) -> Self {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            run_watch_loop(service, table_id, task_cancel).await;
        });
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Stop watching. Safe to call while a resolution or the presentation
    /// timer is in flight; both are cancellation-aware.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TableWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_watch_loop(
    service: Arc<TableFlowService>,
    table_id: Uuid,
    cancel: CancellationToken,
) {
    let id = table_id.to_string();
    loop {
        let mut stream = service.store().watch(TABLES_COLLECTION, &id);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                snapshot = stream.next() => {
                    match snapshot {
                        Some(snapshot) => {
                            handle_snapshot(&service, table_id, &snapshot, &cancel).await;
                        }
                        None => break,
                    }
                }
            }
        }
        if cancel.is_cancelled() {
            return;
        }
        warn!(%table_id, "table subscription ended, resubscribing");
        tokio::time::sleep(service.timing().retry.base_delay).await;
    }
}

async fn handle_snapshot(
    service: &Arc<TableFlowService>,
    table_id: Uuid,
    snapshot: &crate::store::VersionedDoc,
    cancel: &CancellationToken,
) {
    let doc = match TableDoc::decode(snapshot) {
        Ok(doc) => doc,
        Err(err) => {
            // Not ready yet: the document may be mid-migration or from a
            // newer schema. Observing is a no-op.
            debug!(%table_id, error = %err, "ignoring snapshot that does not decode");
            return;
        }
    };
    if doc.status != TableStatus::BothReady {
        return;
    }

    match service.resolve_if_ready(table_id).await {
        Ok(Some(resolved)) => {
            info!(%table_id, message = %resolved.outcome.message, "watcher resolved the round");
            if !resolved.outcome.is_game_over() {
                let _timer = presentation::schedule_clear(
                    service.clone(),
                    table_id,
                    resolved.version,
                    cancel.child_token(),
                );
            }
        }
        Ok(None) => {
            debug!(%table_id, "round already resolved by the other client");
        }
        Err(err) if is_transient(&err) => {
            // The next snapshot (or the other client) retries naturally.
            warn!(%table_id, error = %err, "transient failure while resolving, will retry on next snapshot");
        }
        Err(err) => {
            warn!(%table_id, error = %err, "round resolution failed");
        }
    }
}
