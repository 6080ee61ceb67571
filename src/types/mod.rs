//! Core types shared across the crate.
//!
//! - **IDs**: Strongly-typed identifiers (ProcessId, TenantId)
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Tenant, credential, HTTP and logging configuration

mod config;
mod errors;
mod ids;

pub use config::{Config, Credentials, HttpConfig, ObservabilityConfig, TenantConfig, ENV_PREFIX};
pub use errors::{Error, Result};
pub use ids::{ProcessId, TenantId};
