//! Domain-level error type used across services and the store layer.
//!
//! This error type is store- and transport-agnostic. Expected game flow
//! (playing before dealing, ties, game over) is never an error; it is
//! represented as outcome state plus a user-facing message. `DomainError`
//! covers contract violations, concurrency conflicts, and operational
//! failures of the external document store.

use thiserror::Error;

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    StoreUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Table,
    Document,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    SeatTaken,
    OptimisticLock,
    Other(String),
}

/// Validation failure kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    ParseCard,
    PhaseMismatch,
    NotSeated,
    NotHost,
    AlreadySubmitted,
    InvalidConfig,
    Other(String),
}

/// Central domain error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or business rule violation
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Semantic conflict
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// True for the optimistic-lock conflict raised by version-checked writes.
    pub fn is_lock_conflict(&self) -> bool {
        matches!(self, Self::Conflict(ConflictKind::OptimisticLock, _))
    }
}
