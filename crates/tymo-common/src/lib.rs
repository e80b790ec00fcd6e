//! Common utilities for the tymo type model compiler.
//!
//! This crate provides the pieces shared by every tymo crate:
//! - Compiler limits and thresholds
//! - Tracing subscriber setup driven by `TYMO_LOG`

// Centralized limits and thresholds
pub mod limits;

// Opt-in tracing output for embedding applications and tests
pub mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};
