#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod identity;
pub mod services;
pub mod store;
pub mod tables;
pub mod telemetry;
pub mod view;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{RetryConfig, TimingConfig};
pub use domain::{Card, Rank, RoundOutcome, Suit};
pub use errors::DomainError;
pub use identity::UserProfile;
pub use services::solo::SoloGame;
pub use services::table_flow::{SubmitOutcome, TableFlowService, TableWatcher};
pub use store::memory::MemoryStore;
pub use store::{DocumentStore, VersionedDoc};
pub use tables::{TableDoc, TableStatus};
pub use view::{SoloView, TableView};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
