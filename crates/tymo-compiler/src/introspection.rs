//! The query interface a type-checking engine exposes to the compiler.

use std::fmt::Debug;
use std::hash::Hash;

use tymo_model::PseudoBigInt;

use crate::flags::{ObjectFlags, SymbolFlags, TypeFlags};

/// Name of the engine's built-in array type symbol.
pub const ARRAY_SYMBOL_NAME: &str = "Array";

/// Read-only introspection over an engine's type graph.
///
/// The compiler never mutates engine state; every method is a query. Queries
/// that do not apply to a handle (asking a string type for its properties,
/// say) return an empty or `None` answer rather than failing.
///
/// Handles are compared by identity (`Eq + Hash`) for cycle detection, so two
/// handles must be equal exactly when they denote the same engine type.
pub trait TypeIntrospection {
    /// Opaque type handle.
    type Type: Clone + Eq + Hash + Debug;
    /// Opaque symbol handle (object properties, named types).
    type Symbol;

    /// Category flags of `ty`.
    fn type_flags(&self, ty: &Self::Type) -> TypeFlags;

    /// Object sub-classification of an object-category handle.
    fn object_flags(&self, ty: &Self::Type) -> ObjectFlags;

    /// Object flags of the generic target a reference handle instantiates.
    ///
    /// Empty for handles that are not generic instantiations.
    fn reference_target_flags(&self, ty: &Self::Type) -> ObjectFlags;

    /// Concrete type arguments of a generic instantiation, in order.
    fn type_arguments(&self, ty: &Self::Type) -> Vec<Self::Type>;

    /// The symbol naming `ty`, if any.
    fn type_symbol(&self, ty: &Self::Type) -> Option<Self::Symbol>;

    fn string_literal_value(&self, ty: &Self::Type) -> Option<String>;

    fn number_literal_value(&self, ty: &Self::Type) -> Option<f64>;

    fn boolean_literal_value(&self, ty: &Self::Type) -> Option<bool>;

    fn bigint_literal_value(&self, ty: &Self::Type) -> Option<PseudoBigInt>;

    /// Members of a union or intersection handle, in engine order.
    fn member_types(&self, ty: &Self::Type) -> Vec<Self::Type>;

    /// Own properties of an object-category handle, in declaration order.
    fn properties(&self, ty: &Self::Type) -> Vec<Self::Symbol>;

    fn symbol_name(&self, symbol: &Self::Symbol) -> String;

    fn symbol_flags(&self, symbol: &Self::Symbol) -> SymbolFlags;

    /// Type of `symbol` resolved at its value declaration.
    ///
    /// What an engine returns for a symbol without a resolvable declaration
    /// is the engine's own business; the compiler classifies whatever handle
    /// comes back.
    fn declared_type_of_symbol(&self, symbol: &Self::Symbol) -> Self::Type;

    /// Value type of the string-keyed index signature, if declared.
    fn string_index_type(&self, ty: &Self::Type) -> Option<Self::Type>;

    /// Value type of the number-keyed index signature, if declared.
    fn number_index_type(&self, ty: &Self::Type) -> Option<Self::Type>;
}
