//! # Process Envelope - Process Manager update payloads
//!
//! Turns a process definition fetched from Nintex Process Manager
//! (`GET /Api/v1/Processes/{id}`) into the body its update endpoint
//! (`PUT /Api/v1/Processes/{id}`) expects:
//! - Envelope building: serialize the definition, wrap it with fixed flags
//! - Import/export of read responses and envelopes as JSON files
//! - HTTP collaborators for bearer/anti-forgery tokens, fetch and update
//! - `curl` rendering for sending saved payloads by hand
//!
//! ## Architecture
//!
//! ```text
//!   api::HttpProcessClient ──GET──►  envelope::import  ──► ProcessDefinition
//!                                                             │ edit
//!                                                             ▼
//!   api::HttpProcessClient ◄──PUT──  UpdateEnvelope::build (pure, no I/O)
//! ```
//!
//! ```
//! use process_envelope::envelope::UpdateEnvelope;
//! use serde_json::json;
//!
//! let envelope = UpdateEnvelope::from_value(&json!({"Name": "Proc1", "Id": 7}), Some(&json!("fix typo")))?;
//! assert_eq!(envelope.process_json(), r#"{"Name":"Proc1","Id":7}"#);
//! assert_eq!(envelope.change_description(), "fix typo");
//! # Ok::<(), process_envelope::Error>(())
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod api;
pub mod envelope;
pub mod render;
pub mod types;
pub mod validation;

// Internal utilities
pub mod observability;

pub use envelope::{ProcessDefinition, UpdateEnvelope};
pub use types::{Config, Error, Result};
