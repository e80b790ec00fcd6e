//! Compiler configuration.

use serde::{Deserialize, Serialize};
use tymo_common::limits::{MAX_MODEL_DEPTH, MAX_MODEL_NODES};

use crate::recursion::GuardLimits;

/// How the compiler treats a handle that is reached again while it is still
/// being compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CyclePolicy {
    /// Track handles on the current path; a repeat yields the `recursive`
    /// marker model.
    #[default]
    Detect,
    /// The engine guarantees acyclic graphs. Nothing is tracked and depth is
    /// unbounded unless `maxDepth` is set; the node budget still applies, so
    /// a cyclic graph compiled this way ends in `unidentified` leaves.
    Trust,
}

/// Options for [`TypeModelCompiler`](crate::TypeModelCompiler).
///
/// Deserializable from camelCase JSON; omitted fields take their defaults:
///
/// ```
/// use tymo_compiler::{CompilerOptions, CyclePolicy};
///
/// let options = CompilerOptions::from_json_str(r#"{ "cyclePolicy": "trust", "maxDepth": 64 }"#).unwrap();
/// assert_eq!(options.cycle_policy, CyclePolicy::Trust);
/// assert!(options.record_origin);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    pub cycle_policy: CyclePolicy,
    /// Attach the source handle to every produced model.
    pub record_origin: bool,
    /// Override of the default nesting limit.
    pub max_depth: Option<u32>,
    /// Override of the per-call node budget.
    pub max_nodes: Option<u32>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            cycle_policy: CyclePolicy::Detect,
            record_origin: true,
            max_depth: None,
            max_nodes: None,
        }
    }
}

impl CompilerOptions {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn with_cycle_policy(mut self, cycle_policy: CyclePolicy) -> Self {
        self.cycle_policy = cycle_policy;
        self
    }

    pub fn with_record_origin(mut self, record_origin: bool) -> Self {
        self.record_origin = record_origin;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: u32) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Limits the compiler's guard is built with.
    pub fn guard_limits(&self) -> GuardLimits {
        let default_depth = match self.cycle_policy {
            CyclePolicy::Detect => MAX_MODEL_DEPTH,
            CyclePolicy::Trust => u32::MAX,
        };
        GuardLimits::MODEL_COMPILATION
            .with_max_depth(self.max_depth.unwrap_or(default_depth))
            .with_max_nodes(self.max_nodes.unwrap_or(MAX_MODEL_NODES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = CompilerOptions::default();
        assert_eq!(options.cycle_policy, CyclePolicy::Detect);
        assert!(options.record_origin);
        assert_eq!(options.guard_limits().max_depth, MAX_MODEL_DEPTH);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(
            CompilerOptions::from_json_str("{}").unwrap(),
            CompilerOptions::default()
        );
    }

    #[test]
    fn max_depth_overrides_default_limit() {
        let options = CompilerOptions::default().with_max_depth(3);
        assert_eq!(options.guard_limits().max_depth, 3);
        assert_eq!(options.guard_limits().max_nodes, MAX_MODEL_NODES);
    }

    #[test]
    fn trust_is_unbounded_in_depth_by_default() {
        let trust = CompilerOptions::default().with_cycle_policy(CyclePolicy::Trust);
        assert_eq!(trust.guard_limits().max_depth, u32::MAX);
        assert_eq!(trust.guard_limits().max_nodes, MAX_MODEL_NODES);
        assert_eq!(trust.with_max_depth(64).guard_limits().max_depth, 64);
    }

    #[test]
    fn max_nodes_from_json() {
        let options = CompilerOptions::from_json_str(r#"{ "maxNodes": 10 }"#).unwrap();
        assert_eq!(options, CompilerOptions::default().with_max_nodes(10));
        assert_eq!(options.guard_limits().max_nodes, 10);
        assert_eq!(options.guard_limits().max_depth, MAX_MODEL_DEPTH);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(CompilerOptions::from_json_str(r#"{ "cyclePolicy": "ignore" }"#).is_err());
    }
}
