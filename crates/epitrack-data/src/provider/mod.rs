//! Case data provider abstractions and implementations.
//!
//! This module contains:
//! - The `CaseDataProvider` trait the remote source implements
//! - Connection settings for the remote provider
//! - The API Ninjas implementation
//!
//! # Architecture
//!
//! Providers are deliberately thin: one request, one parse, one error
//! mapping. Everything about what to do when a provider fails (retrying,
//! falling back to the bundled snapshot, memoizing) lives in the resolver.

mod config;
mod traits;

pub mod api_ninjas;

// Re-exports
pub use config::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use traits::CaseDataProvider;
