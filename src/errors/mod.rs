//! Error handling for the wartable engine.

pub mod domain;

pub use domain::DomainError;
