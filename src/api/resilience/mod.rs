//! Resilience features for API calls

pub mod retry;

pub use retry::{Classify, RetryConfig, RetryPolicy, RetryableError};
