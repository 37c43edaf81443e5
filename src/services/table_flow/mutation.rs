//! The read-modify-write cycle every table mutation goes through.

use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::services::table_flow::TableFlowService;
use crate::store::retry::with_retry;
use crate::tables::{TableDoc, TABLES_COLLECTION};

/// How often a mutation re-reads and re-applies after losing a
/// version-checked write before giving up.
const MAX_CAS_ATTEMPTS: u32 = 8;

/// What a mutation closure decided.
pub(crate) enum Step<R> {
    /// Write the mutated document back and return `R`.
    Write(R),
    /// Nothing to change; return `R` without touching the store.
    Skip(R),
}

pub(crate) struct Mutated<R> {
    /// Document state as of this mutation (post-write if one happened).
    pub doc: TableDoc,
    /// Store version matching `doc`.
    pub version: u64,
    pub result: R,
    pub wrote: bool,
}

impl TableFlowService {
    /// Read the table, apply `mutate`, and commit under a version check.
    /// A lost race re-reads and re-applies; the closure must therefore be
    /// pure in the document it is given. Transient read failures are
    /// retried with backoff.
    pub(crate) async fn run_mutation<R, F>(
        &self,
        table_id: Uuid,
        op_name: &'static str,
        mutate: F,
    ) -> Result<Mutated<R>, DomainError>
    where
        F: Fn(&mut TableDoc) -> Result<Step<R>, DomainError>,
    {
        let id = table_id.to_string();
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let snapshot = with_retry(op_name, &self.timing().retry, || {
                self.store().get(TABLES_COLLECTION, &id)
            })
            .await?
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Table, format!("table {table_id}"))
            })?;
            let mut doc = TableDoc::decode(&snapshot)?;

            match mutate(&mut doc)? {
                Step::Skip(result) => {
                    return Ok(Mutated {
                        doc,
                        version: snapshot.version,
                        result,
                        wrote: false,
                    })
                }
                Step::Write(result) => {
                    doc.updated_at = OffsetDateTime::now_utc();
                    let write = self
                        .store()
                        .put_checked(TABLES_COLLECTION, &id, snapshot.version, doc.encode()?)
                        .await;
                    match write {
                        Ok(committed) => {
                            debug!(
                                %table_id,
                                version = committed.version,
                                "{op_name} committed"
                            );
                            return Ok(Mutated {
                                doc,
                                version: committed.version,
                                result,
                                wrote: true,
                            });
                        }
                        Err(err) if err.is_lock_conflict() && attempt < MAX_CAS_ATTEMPTS => {
                            debug!(%table_id, attempt, "{op_name} lost a concurrent update, re-reading");
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
        }
    }
}
