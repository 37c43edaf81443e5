//! Engine configuration read from the environment.

pub mod timing;

pub use timing::{RetryConfig, TimingConfig};
