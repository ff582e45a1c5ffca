//! Chatbot intent resolution for the souq customer assistant.
//!
//! This crate turns a classified intent plus the raw chat message into a
//! plain-text reply by performing at most one backend REST call:
//! - **Backend seam** (`backend`) - `BackendApi` trait + reqwest implementation
//! - **Reply formatting** (`format`) - lenient JSON field rendering rules
//! - **Dispatch** (`resolver`) - per-intent handlers and failure mapping
//!
//! # Contract
//!
//! `IntentResolver::resolve` never returns an error to its caller. Backend
//! failures collapse into a fixed user-facing string, and intents outside the
//! known set produce the empty string so the caller can substitute a generic
//! answer. The resolver keeps no state between invocations.

pub mod backend;
pub mod format;
pub mod resolver;

pub use backend::{BackendApi, HttpBackend};
pub use resolver::{IntentResolver, CATEGORY_FAILURE_REPLY, GENERIC_FAILURE_REPLY};
