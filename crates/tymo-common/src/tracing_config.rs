//! Tracing configuration for inspecting model compilation.
//!
//! Supports three output formats controlled by `TYMO_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Every classification decision, indented
//! TYMO_LOG=tymo_compiler=trace TYMO_LOG_FORMAT=tree cargo test -p tymo-compiler
//!
//! # Only cycle and limit reports
//! TYMO_LOG=debug cargo test
//! ```
//!
//! The subscriber is only initialised when `TYMO_LOG` (or `RUST_LOG`) is set,
//! so there is zero overhead in normal use.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name. Unknown names fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Read from the `TYMO_LOG_FORMAT` environment variable.
    fn from_env() -> Self {
        Self::parse(&std::env::var("TYMO_LOG_FORMAT").unwrap_or_default())
    }
}

/// The filter requested through `TYMO_LOG`, else `RUST_LOG`, if either is set.
fn requested_filter() -> Option<EnvFilter> {
    match std::env::var("TYMO_LOG") {
        Ok(directives) => Some(EnvFilter::builder().parse_lossy(directives)),
        Err(_) if std::env::var_os("RUST_LOG").is_some() => Some(EnvFilter::from_default_env()),
        Err(_) => None,
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Does nothing when neither `TYMO_LOG` nor `RUST_LOG` is set. Safe to call
/// repeatedly (every test may call it): a call made after a global subscriber
/// exists is ignored.
pub fn init_tracing() {
    let Some(filter) = requested_filter() else {
        return;
    };
    let registry = Registry::default().with(filter);

    // `try_init` fails only when a subscriber is already set.
    let format = LogFormat::from_env();
    let installed = match format {
        LogFormat::Tree => registry
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_indent_lines(true)
                    .with_targets(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    if installed.is_ok() {
        tracing::debug!(?format, "tracing initialised");
    }
}
