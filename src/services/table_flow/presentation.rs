//! Display-only deferred clear of played cards.
//!
//! After a round resolves, the played cards stay in the document briefly
//! so the UI can show them. The clear is an independent, cancellable
//! timer making a single version-checked write; if it is cancelled or
//! loses its race, the next submission performs the same clear, so the
//! state machine never depends on wall-clock delay.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::domain::DomainError;
use crate::services::table_flow::TableFlowService;
use crate::tables::{TableDoc, TableStatus, TABLES_COLLECTION};

impl TableFlowService {
    /// Clear both current cards if the table still sits at the resolved
    /// version. Any interleaving write (a new submission, the other
    /// client's clear) makes this a no-op.
    pub(crate) async fn clear_played_cards(
        &self,
        table_id: Uuid,
        resolved_version: u64,
    ) -> Result<(), DomainError> {
        let id = table_id.to_string();
        let Some(snapshot) = self.store().get(TABLES_COLLECTION, &id).await? else {
            return Ok(());
        };
        if snapshot.version != resolved_version {
            return Ok(());
        }
        let mut doc = TableDoc::decode(&snapshot)?;
        if !matches!(doc.status, TableStatus::RoundResolved { .. }) {
            return Ok(());
        }
        for seat in &mut doc.players {
            seat.current_card = None;
        }
        doc.updated_at = time::OffsetDateTime::now_utc();
        match self
            .store()
            .put_checked(TABLES_COLLECTION, &id, snapshot.version, doc.encode()?)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if err.is_lock_conflict() => {
                debug!(%table_id, "display clear lost its race");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// Schedule the deferred clear. Returns the timer task; cancelling the
/// token (e.g. on unmount) stops it cleanly mid-wait.
pub(crate) fn schedule_clear(
    service: Arc<TableFlowService>,
    table_id: Uuid,
    resolved_version: u64,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let delay = service.timing().clear_delay;
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(delay) => {
                if let Err(err) = service.clear_played_cards(table_id, resolved_version).await {
                    warn!(%table_id, error = %err, "failed to clear played cards");
                }
            }
        }
    })
}
