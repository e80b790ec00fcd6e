//! Path tracking for model compilation.
//!
//! Compilation is plain recursive descent over the engine's type graph, and
//! that graph may loop back on itself. A [`PathGuard`] sits in front of every
//! recursive step and decides whether the step may proceed:
//!
//! - with path tracking on, a handle that is already being compiled further
//!   up the current path is a [`Step::Revisit`];
//! - the path may not grow past [`GuardLimits::max_depth`] handles;
//! - the guard allows at most [`GuardLimits::max_nodes`] steps between resets.
//!
//! The owner resets the guard before each top-level request, so every request
//! gets the full budget and an empty path even if an earlier one unwound
//! without reaching its [`leave`](PathGuard::leave) calls.

use rustc_hash::FxHashSet;
use std::hash::Hash;
use tymo_common::limits::{MAX_MODEL_DEPTH, MAX_MODEL_NODES, MAX_VISITING_HANDLES};

/// Bounds enforced by a [`PathGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardLimits {
    /// Longest path, counted in handles.
    pub max_depth: u32,
    /// Steps allowed before the guard refuses all further work.
    pub max_nodes: u32,
}

impl GuardLimits {
    /// [`MAX_MODEL_DEPTH`] and [`MAX_MODEL_NODES`].
    pub const MODEL_COMPILATION: GuardLimits = GuardLimits {
        max_depth: MAX_MODEL_DEPTH,
        max_nodes: MAX_MODEL_NODES,
    };

    pub const fn with_max_depth(self, max_depth: u32) -> Self {
        Self { max_depth, ..self }
    }

    pub const fn with_max_nodes(self, max_nodes: u32) -> Self {
        Self { max_nodes, ..self }
    }
}

impl Default for GuardLimits {
    fn default() -> Self {
        Self::MODEL_COMPILATION
    }
}

/// Outcome of [`PathGuard::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The handle is now on the path; call [`PathGuard::leave`] afterwards.
    Entered,
    /// The handle is already on the path.
    Revisit,
    /// The path is at its maximum length.
    TooDeep,
    /// The node budget is spent.
    OutOfBudget,
}

impl Step {
    pub fn is_limit(self) -> bool {
        matches!(self, Self::TooDeep | Self::OutOfBudget)
    }
}

/// Guards one compiler's recursion.
///
/// ```ignore
/// match guard.enter(&handle) {
///     Step::Entered => {
///         let data = classify(handle);
///         guard.leave(&handle);
///         data
///     }
///     Step::Revisit => TypeData::Recursive,
///     Step::TooDeep | Step::OutOfBudget => TypeData::Unidentified,
/// }
/// ```
pub struct PathGuard<K: Hash + Eq + Clone> {
    /// `None` when the caller vouches for an acyclic graph.
    on_path: Option<FxHashSet<K>>,
    depth: u32,
    nodes: u32,
    limits: GuardLimits,
    hit_limit: bool,
}

impl<K: Hash + Eq + Clone> PathGuard<K> {
    /// A guard that remembers every handle on the path.
    pub fn tracking(limits: GuardLimits) -> Self {
        Self::build(Some(FxHashSet::default()), limits)
    }

    /// A guard that only counts depth and nodes.
    pub fn depth_only(limits: GuardLimits) -> Self {
        Self::build(None, limits)
    }

    fn build(on_path: Option<FxHashSet<K>>, limits: GuardLimits) -> Self {
        Self {
            on_path,
            depth: 0,
            nodes: 0,
            limits,
            hit_limit: false,
        }
    }

    pub fn tracks_path(&self) -> bool {
        self.on_path.is_some()
    }

    /// Ask to step into `key`.
    pub fn enter(&mut self, key: &K) -> Step {
        self.nodes = self.nodes.saturating_add(1);
        if self.nodes > self.limits.max_nodes {
            self.hit_limit = true;
            return Step::OutOfBudget;
        }

        let max_depth = self.max_depth();
        match &mut self.on_path {
            Some(on_path) if on_path.contains(key) => return Step::Revisit,
            _ if self.depth >= max_depth => {
                self.hit_limit = true;
                return Step::TooDeep;
            }
            Some(on_path) => {
                on_path.insert(key.clone());
            }
            None => {}
        }
        self.depth += 1;
        Step::Entered
    }

    /// Step back out of `key`. Pairs with an [`enter`](Self::enter) that
    /// returned [`Step::Entered`].
    pub fn leave(&mut self, key: &K) {
        if let Some(on_path) = &mut self.on_path {
            let removed = on_path.remove(key);
            debug_assert!(removed, "PathGuard::leave() for a handle not on the path");
        }
        debug_assert!(self.depth > 0, "PathGuard::leave() at depth 0");
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn is_on_path(&self, key: &K) -> bool {
        self.on_path
            .as_ref()
            .is_some_and(|on_path| on_path.contains(key))
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Effective depth limit. Tracking guards never hold more than
    /// [`MAX_VISITING_HANDLES`] handles.
    pub fn max_depth(&self) -> u32 {
        if self.tracks_path() {
            self.limits.max_depth.min(MAX_VISITING_HANDLES)
        } else {
            self.limits.max_depth
        }
    }

    /// Steps taken since construction or the last reset, refused ones
    /// included.
    pub fn nodes(&self) -> u32 {
        self.nodes
    }

    pub fn limits(&self) -> GuardLimits {
        self.limits
    }

    /// Whether any step was refused for a limit. Cleared by
    /// [`reset`](Self::reset).
    pub fn hit_limit(&self) -> bool {
        self.hit_limit
    }

    /// Start over with an empty path and the full node budget.
    pub fn reset(&mut self) {
        if let Some(on_path) = &mut self.on_path {
            on_path.clear();
        }
        self.depth = 0;
        self.nodes = 0;
        self.hit_limit = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(max_depth: u32, max_nodes: u32) -> GuardLimits {
        GuardLimits {
            max_depth,
            max_nodes,
        }
    }

    #[test]
    fn default_limits() {
        let limits = GuardLimits::default();
        assert_eq!(limits.max_depth, MAX_MODEL_DEPTH);
        assert_eq!(limits.max_nodes, MAX_MODEL_NODES);
        assert_eq!(limits.with_max_depth(7).max_depth, 7);
        assert_eq!(limits.with_max_depth(7).max_nodes, MAX_MODEL_NODES);
        assert_eq!(limits.with_max_nodes(9).max_nodes, 9);
        assert_eq!(limits.with_max_nodes(9).max_depth, MAX_MODEL_DEPTH);
    }

    #[test]
    fn enter_and_leave() {
        let mut guard = PathGuard::tracking(limits(10, 100));
        assert_eq!(guard.enter(&1u32), Step::Entered);
        assert_eq!(guard.depth(), 1);
        assert!(guard.is_on_path(&1));

        guard.leave(&1);
        assert_eq!(guard.depth(), 0);
        assert!(!guard.is_on_path(&1));
    }

    #[test]
    fn revisit_on_same_path() {
        let mut guard = PathGuard::tracking(limits(10, 100));
        assert_eq!(guard.enter(&1u32), Step::Entered);
        assert_eq!(guard.enter(&2u32), Step::Entered);
        assert_eq!(guard.enter(&1u32), Step::Revisit);
        assert_eq!(guard.depth(), 2);
        assert!(!guard.hit_limit());

        guard.leave(&2);
        guard.leave(&1);
    }

    #[test]
    fn siblings_are_not_revisits() {
        let mut guard = PathGuard::tracking(limits(10, 100));
        assert_eq!(guard.enter(&1u32), Step::Entered);
        assert_eq!(guard.enter(&2u32), Step::Entered);
        guard.leave(&2);
        assert_eq!(guard.enter(&2u32), Step::Entered);
        guard.leave(&2);
        guard.leave(&1);
    }

    #[test]
    fn depth_only_never_reports_revisits() {
        let mut guard = PathGuard::depth_only(limits(2, 100));
        assert!(!guard.tracks_path());
        assert_eq!(guard.enter(&1u32), Step::Entered);
        assert_eq!(guard.enter(&1u32), Step::Entered);
        assert_eq!(guard.enter(&1u32), Step::TooDeep);
        assert!(!guard.is_on_path(&1));
        guard.leave(&1);
        guard.leave(&1);
    }

    #[test]
    fn depth_limit() {
        let mut guard = PathGuard::tracking(limits(2, 100));
        assert_eq!(guard.enter(&1u32), Step::Entered);
        assert_eq!(guard.enter(&2u32), Step::Entered);
        assert_eq!(guard.enter(&3u32), Step::TooDeep);
        assert!(Step::TooDeep.is_limit());
        assert!(guard.hit_limit());
        guard.leave(&2);
        guard.leave(&1);
    }

    #[test]
    fn revisit_wins_over_depth_limit() {
        let mut guard = PathGuard::tracking(limits(1, 100));
        assert_eq!(guard.enter(&1u32), Step::Entered);
        assert_eq!(guard.enter(&1u32), Step::Revisit);
        guard.leave(&1);
    }

    #[test]
    fn node_budget() {
        let mut guard = PathGuard::tracking(limits(10, 3));
        for key in 0..3u32 {
            assert_eq!(guard.enter(&key), Step::Entered);
            guard.leave(&key);
        }
        assert_eq!(guard.enter(&9), Step::OutOfBudget);
        assert_eq!(guard.nodes(), 4);
        assert!(guard.hit_limit());
    }

    #[test]
    fn reset_restores_budget() {
        let mut guard = PathGuard::tracking(limits(1, 100));
        assert_eq!(guard.enter(&1u32), Step::Entered);
        assert_eq!(guard.enter(&2u32), Step::TooDeep);
        guard.leave(&1);
        guard.reset();
        assert!(!guard.hit_limit());
        assert_eq!(guard.nodes(), 0);
    }

    #[test]
    fn string_keys() {
        let mut guard = PathGuard::tracking(limits(10, 100));
        let key = "Node".to_string();
        assert_eq!(guard.enter(&key), Step::Entered);
        assert_eq!(guard.enter(&key), Step::Revisit);
        guard.leave(&key);
    }

    #[test]
    fn reset_clears_an_abandoned_path() {
        let mut guard = PathGuard::tracking(limits(10, 100));
        assert_eq!(guard.enter(&1u32), Step::Entered);
        assert_eq!(guard.enter(&2u32), Step::Entered);

        guard.reset();
        assert_eq!(guard.depth(), 0);
        assert!(!guard.is_on_path(&1));
        assert_eq!(guard.enter(&1u32), Step::Entered);
        guard.leave(&1);
    }

    #[test]
    fn only_tracking_guards_cap_the_path() {
        let unbounded = limits(u32::MAX, 100);
        assert_eq!(PathGuard::<u32>::tracking(unbounded).max_depth(), MAX_VISITING_HANDLES);
        assert_eq!(PathGuard::<u32>::depth_only(unbounded).max_depth(), u32::MAX);
    }

    #[test]
    fn depth_only_guard_goes_past_the_tracking_cap() {
        let mut guard = PathGuard::depth_only(limits(u32::MAX, u32::MAX));
        let past_cap = MAX_VISITING_HANDLES + 1;
        for _ in 0..past_cap {
            assert_eq!(guard.enter(&0u32), Step::Entered);
        }
        assert_eq!(guard.depth(), past_cap);
        assert!(!guard.hit_limit());
        guard.reset();
    }
}
