//! Core domain layer for Praiser.
//!
//! This crate contains the session state container, the settings document
//! and its merge rules, the repository interface the storage layer
//! implements, and the transcript export helpers. It performs no I/O
//! beyond reading a configuration file; persistence lives in
//! `praiser-infrastructure` and scheduling in `praiser-application`.

pub mod config;
pub mod error;
pub mod export;
pub mod session;
pub mod settings;

// Re-export common error type
pub use error::{PraiserError, Result};
