//! Centralized limits and thresholds for type model compilation.
//!
//! The compiler walks an engine's type graph by plain recursion, one frame
//! group per nested type position (property value, array element, tuple
//! slot, union/intersection member, enum member, index value type). The
//! constants below bound that walk.
//!
//! # Compiler recursion limits
//!
//! The compiler's guard defaults to
//! `tymo_compiler::recursion::GuardLimits::MODEL_COMPILATION`, built from
//! these constants. `CompilerOptions::max_depth` and
//! `CompilerOptions::max_nodes` override them. With cycle detection on, the
//! depth never exceeds [`MAX_VISITING_HANDLES`].

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth of a single model compilation.
///
/// Each level is one nested type position. Handles beyond this depth are
/// compiled to the `unidentified` marker and a warning is logged. Applies
/// when cycles are detected; a compiler trusting the engine to be acyclic has
/// no default depth limit.
///
/// # TypeScript example
///
/// ```typescript
/// // Every `[]` and every property adds one level:
/// type Deep = { a: { b: { c: string[][][] } } };
///
/// // Generated declaration files can nest far deeper than hand-written code:
/// type Json = { v: { v: { v: /* ... hundreds of levels ... */ string } } };
/// ```
pub const MAX_MODEL_DEPTH: u32 = 500;

// =============================================================================
// Operation Count Limits
// =============================================================================

/// Maximum number of handles one `compile` call may enter.
///
/// The budget is restored at the start of every call, so earlier calls on the
/// same compiler never affect later ones. Wide but acyclic graphs (a union of
/// thousands of object types that share property types) are visited once per
/// occurrence because models are not deduplicated.
pub const MAX_MODEL_NODES: u32 = 1_000_000;

/// Hard cap on path length while cycles are detected, whatever depth a caller
/// configures.
///
/// Bounds the set of handles tracked for cycle detection.
pub const MAX_VISITING_HANDLES: u32 = 10_000;

// =============================================================================
// Stack Growth
// =============================================================================

/// Remaining stack below which the compiler switches to a fresh segment.
pub const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated when the red zone is reached.
pub const STACK_GROWTH_SIZE: usize = 1024 * 1024;
