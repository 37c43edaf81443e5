//! Multiplayer table flow: every state transition reads the shared table
//! document, computes the next state locally, and writes it back under a
//! version check, so a client never overwrites a concurrent write blindly.

mod mutation;
mod presentation;
mod rounds;
mod watcher;


use std::sync::Arc;

use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::config::TimingConfig;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::identity::UserProfile;
use crate::services::table_flow::mutation::Step;
use crate::store::retry::with_retry;
use crate::store::{DocumentStore, NO_VERSION};
use crate::tables::{Seat, TableDoc, TableStatus, TABLES_COLLECTION};

pub use rounds::{ResolvedRound, SubmitOutcome};
pub use watcher::TableWatcher;

pub struct TableFlowService {
    store: Arc<dyn DocumentStore>,
    timing: TimingConfig,
}

impl TableFlowService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_timing(store, TimingConfig::default())
    }

    pub fn with_timing(store: Arc<dyn DocumentStore>, timing: TimingConfig) -> Self {
        Self { store, timing }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Create a fresh table with the host seated. The create is itself
    /// version-checked so a colliding table id cannot be overwritten.
    pub async fn create_table(&self, host: &UserProfile) -> Result<TableDoc, DomainError> {
        let table_id = Uuid::new_v4();
        let doc = TableDoc::new(table_id, host, OffsetDateTime::now_utc());
        let id = table_id.to_string();
        with_retry("create table", &self.timing.retry, || async {
            self.store
                .put_checked(TABLES_COLLECTION, &id, NO_VERSION, doc.encode()?)
                .await
        })
        .await?;
        info!(%table_id, host = %host.uid, "table created");
        Ok(doc)
    }

    /// Seat a guest at the table. Joining a table you already sit at is a
    /// no-op; joining a full table is a conflict.
    pub async fn join_table(
        &self,
        table_id: Uuid,
        guest: &UserProfile,
    ) -> Result<TableDoc, DomainError> {
        let guest = guest.clone();
        let mutated = self
            .run_mutation(table_id, "join table", |doc| {
                if doc.seat_index_of(&guest.uid).is_some() {
                    return Ok(Step::Skip(()));
                }
                if doc.is_full() {
                    return Err(DomainError::conflict(
                        ConflictKind::SeatTaken,
                        format!("table {table_id} already has two players"),
                    ));
                }
                doc.players.push(Seat::new(&guest));
                Ok(Step::Write(()))
            })
            .await?;
        info!(%table_id, guest = %guest.uid, "guest joined table");
        Ok(mutated.doc)
    }

    /// Deal a fresh shuffled deck, host's call only. The host takes the
    /// front half. Valid before the first round and after game over;
    /// dealing over a running game is a phase mismatch.
    pub async fn deal(&self, table_id: Uuid, uid: &str) -> Result<TableDoc, DomainError> {
        self.deal_with_seed(table_id, uid, crate::domain::dealing::fresh_seed())
            .await
    }

    pub async fn deal_with_seed(
        &self,
        table_id: Uuid,
        uid: &str,
        seed: u64,
    ) -> Result<TableDoc, DomainError> {
        let uid = uid.to_string();
        let mutated = self
            .run_mutation(table_id, "deal", |doc| {
                match doc.seat_index_of(&uid) {
                    Some(crate::tables::HOST_SEAT) => {}
                    Some(_) => {
                        return Err(DomainError::validation(
                            ValidationKind::NotHost,
                            "only the host deals",
                        ))
                    }
                    None => {
                        return Err(DomainError::validation(
                            ValidationKind::NotSeated,
                            format!("user {uid} is not seated at this table"),
                        ))
                    }
                }
                if !doc.is_full() {
                    return Err(DomainError::validation(
                        ValidationKind::PhaseMismatch,
                        "cannot deal before both seats are taken",
                    ));
                }
                if !matches!(doc.status, TableStatus::Waiting | TableStatus::GameOver { .. }) {
                    return Err(DomainError::validation(
                        ValidationKind::PhaseMismatch,
                        "cannot deal while a game is in progress",
                    ));
                }

                let mut deck = crate::domain::full_deck();
                crate::domain::shuffle_with_seed(&mut deck, seed);
                let (front, back) = crate::domain::deal_halves(deck);
                for (seat, half) in doc.players.iter_mut().zip([front, back]) {
                    seat.score = half.len() as u32;
                    seat.deck = half;
                    seat.current_card = None;
                }
                doc.status = TableStatus::Dealt;
                Ok(Step::Write(()))
            })
            .await?;
        info!(%table_id, "table dealt");
        Ok(mutated.doc)
    }

    /// Drop the table document entirely (both clients' watchers simply
    /// stop seeing snapshots).
    pub async fn close_table(&self, table_id: Uuid) -> Result<(), DomainError> {
        self.store
            .delete(TABLES_COLLECTION, &table_id.to_string())
            .await
    }
}
