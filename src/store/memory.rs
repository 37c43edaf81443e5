//! In-process document store used by tests and local play.
//!
//! Semantics match the consumed contract of the hosted backend: whole-
//! document writes with a version counter, shallow merges, and per-
//! document subscription streams fed from a broadcast channel.

use std::collections::HashMap;

use dashmap::DashMap;
use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::debug;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::store::{DocumentStore, VersionedDoc, NO_VERSION};

type DocKey = (String, String);

const WATCH_CHANNEL_CAPACITY: usize = 64;

pub struct MemoryStore {
    docs: RwLock<HashMap<DocKey, VersionedDoc>>,
    watchers: DashMap<DocKey, broadcast::Sender<VersionedDoc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(HashMap::new()),
            watchers: DashMap::new(),
        }
    }

    fn key(collection: &str, id: &str) -> DocKey {
        (collection.to_string(), id.to_string())
    }

    fn publish(&self, key: &DocKey, doc: &VersionedDoc) {
        if let Some(tx) = self.watchers.get(key) {
            // Send only fails when nobody is subscribed.
            let _ = tx.send(doc.clone());
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<VersionedDoc>, DomainError> {
        Ok(self.docs.read().get(&Self::key(collection, id)).cloned())
    }

    async fn put(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<VersionedDoc, DomainError> {
        let key = Self::key(collection, id);
        let doc = {
            let mut docs = self.docs.write();
            let version = docs.get(&key).map(|d| d.version).unwrap_or(NO_VERSION) + 1;
            let doc = VersionedDoc { version, data };
            docs.insert(key.clone(), doc.clone());
            doc
        };
        self.publish(&key, &doc);
        Ok(doc)
    }

    async fn put_checked(
        &self,
        collection: &str,
        id: &str,
        expected_version: u64,
        data: Value,
    ) -> Result<VersionedDoc, DomainError> {
        let key = Self::key(collection, id);
        let doc = {
            let mut docs = self.docs.write();
            let current = docs.get(&key).map(|d| d.version).unwrap_or(NO_VERSION);
            if current != expected_version {
                return Err(DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "{collection}/{id} was modified concurrently \
                         (expected version {expected_version}, actual version {current})"
                    ),
                ));
            }
            let doc = VersionedDoc {
                version: current + 1,
                data,
            };
            docs.insert(key.clone(), doc.clone());
            doc
        };
        self.publish(&key, &doc);
        Ok(doc)
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<VersionedDoc, DomainError> {
        let key = Self::key(collection, id);
        let doc = {
            let mut docs = self.docs.write();
            let Some(existing) = docs.get(&key) else {
                return Err(DomainError::not_found(
                    NotFoundKind::Document,
                    format!("{collection}/{id}"),
                ));
            };
            let Value::Object(mut fields) = existing.data.clone() else {
                return Err(DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("{collection}/{id} is not an object document"),
                ));
            };
            for (field, value) in patch {
                fields.insert(field, value);
            }
            let doc = VersionedDoc {
                version: existing.version + 1,
                data: Value::Object(fields),
            };
            docs.insert(key.clone(), doc.clone());
            doc
        };
        self.publish(&key, &doc);
        Ok(doc)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DomainError> {
        self.docs.write().remove(&Self::key(collection, id));
        debug!(collection, id, "document deleted");
        Ok(())
    }

    fn watch(&self, collection: &str, id: &str) -> BoxStream<'static, VersionedDoc> {
        let key = Self::key(collection, id);
        let rx = self
            .watchers
            .entry(key.clone())
            .or_insert_with(|| broadcast::channel(WATCH_CHANNEL_CAPACITY).0)
            .subscribe();
        // Snapshot after subscribing: a write racing this setup may be
        // seen twice, but never missed.
        let initial = self.docs.read().get(&key).cloned();
        stream::iter(initial)
            .chain(BroadcastStream::new(rx).filter_map(|res| futures::future::ready(res.ok())))
            .boxed()
    }
}
