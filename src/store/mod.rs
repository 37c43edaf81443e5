//! Document store contract consumed by the multiplayer driver.
//!
//! The hosted backend behind this trait is external; the engine only
//! relies on the operations below. Documents are untyped JSON values
//! carrying a server-side version counter, and every write of game state
//! goes through [`DocumentStore::put_checked`] so a client never
//! overwrites a concurrent write blindly.

pub mod memory;
pub mod retry;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::{Map, Value};

use crate::errors::domain::DomainError;

/// A document snapshot together with its version counter.
///
/// Versions start at 1 on creation and increase by 1 on every committed
/// write. Version 0 never names an existing document; passing it to
/// [`DocumentStore::put_checked`] means create-if-absent.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedDoc {
    pub version: u64,
    pub data: Value,
}

/// Expected version for a create-if-absent [`DocumentStore::put_checked`].
pub const NO_VERSION: u64 = 0;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document snapshot, or `None` if it does not exist.
    async fn get(&self, collection: &str, id: &str)
        -> Result<Option<VersionedDoc>, DomainError>;

    /// Create or replace a document unconditionally (last write wins).
    ///
    /// Game state never goes through this; it exists for data the engine
    /// does not contend on.
    async fn put(&self, collection: &str, id: &str, data: Value)
        -> Result<VersionedDoc, DomainError>;

    /// Replace a document only if its current version matches
    /// `expected_version`; otherwise fail with
    /// `Conflict(OptimisticLock)` and leave the document untouched.
    async fn put_checked(
        &self,
        collection: &str,
        id: &str,
        expected_version: u64,
        data: Value,
    ) -> Result<VersionedDoc, DomainError>;

    /// Shallow partial update: overwrite the given top-level keys, keep
    /// the rest. Fails with `NotFound` if the document does not exist.
    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<VersionedDoc, DomainError>;

    /// Remove a document. Removing a missing document is a no-op.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), DomainError>;

    /// Subscribe to a document: the stream yields the current snapshot
    /// immediately (if the document exists) and then every committed
    /// write. Dropping the stream unsubscribes. A slow subscriber may
    /// miss intermediate snapshots but always observes a suffix ending
    /// in the latest committed one.
    fn watch(&self, collection: &str, id: &str) -> BoxStream<'static, VersionedDoc>;
}
