//! Model discriminants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The `kind` discriminant of a [`TypeData`](crate::TypeData) variant.
///
/// The string form (see [`as_str`](Self::as_str)) is exactly the value of the
/// `kind` field in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    // =========================================================================
    // Primitives
    // =========================================================================
    Any,
    Unknown,
    String,
    Number,
    Boolean,
    #[serde(rename = "bigint")]
    BigInt,
    EsSymbol,
    UniqueEsSymbol,
    Void,
    Undefined,
    Null,
    Never,
    TypeParameter,
    NonPrimitive,

    // =========================================================================
    // Literals and enums
    // =========================================================================
    StringLiteral,
    NumberLiteral,
    BooleanLiteral,
    #[serde(rename = "bigintLiteral")]
    BigIntLiteral,
    Enum,
    EnumLiteral,

    // =========================================================================
    // Composite
    // =========================================================================
    Union,
    Intersection,
    Index,
    Object,
    ObjectWithIndex,
    Array,
    Tuple,

    // =========================================================================
    // Unresolved markers
    // =========================================================================
    IndexedAccess,
    Conditional,
    Substitution,
    Unidentified,
    Recursive,
}

impl TypeKind {
    /// Every discriminant, in declaration order.
    pub const ALL: [TypeKind; 32] = [
        Self::Any,
        Self::Unknown,
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::BigInt,
        Self::EsSymbol,
        Self::UniqueEsSymbol,
        Self::Void,
        Self::Undefined,
        Self::Null,
        Self::Never,
        Self::TypeParameter,
        Self::NonPrimitive,
        Self::StringLiteral,
        Self::NumberLiteral,
        Self::BooleanLiteral,
        Self::BigIntLiteral,
        Self::Enum,
        Self::EnumLiteral,
        Self::Union,
        Self::Intersection,
        Self::Index,
        Self::Object,
        Self::ObjectWithIndex,
        Self::Array,
        Self::Tuple,
        Self::IndexedAccess,
        Self::Conditional,
        Self::Substitution,
        Self::Unidentified,
        Self::Recursive,
    ];

    /// The serialized `kind` string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::EsSymbol => "esSymbol",
            Self::UniqueEsSymbol => "uniqueEsSymbol",
            Self::Void => "void",
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Never => "never",
            Self::TypeParameter => "typeParameter",
            Self::NonPrimitive => "nonPrimitive",
            Self::StringLiteral => "stringLiteral",
            Self::NumberLiteral => "numberLiteral",
            Self::BooleanLiteral => "booleanLiteral",
            Self::BigIntLiteral => "bigintLiteral",
            Self::Enum => "enum",
            Self::EnumLiteral => "enumLiteral",
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Index => "index",
            Self::Object => "object",
            Self::ObjectWithIndex => "objectWithIndex",
            Self::Array => "array",
            Self::Tuple => "tuple",
            Self::IndexedAccess => "indexedAccess",
            Self::Conditional => "conditional",
            Self::Substitution => "substitution",
            Self::Unidentified => "unidentified",
            Self::Recursive => "recursive",
        }
    }

    /// Look up a discriminant by its serialized string.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Kinds that carry no payload at all.
    pub const fn is_payloadless(self) -> bool {
        !matches!(
            self,
            Self::StringLiteral
                | Self::NumberLiteral
                | Self::BooleanLiteral
                | Self::BigIntLiteral
                | Self::Enum
                | Self::EnumLiteral
                | Self::Union
                | Self::Intersection
                | Self::Index
                | Self::Object
                | Self::ObjectWithIndex
                | Self::Array
                | Self::Tuple
        )
    }

    /// Unresolved markers: categories recorded without expanding their
    /// structure, plus the fallback and cycle markers.
    pub const fn is_marker(self) -> bool {
        matches!(
            self,
            Self::IndexedAccess
                | Self::Conditional
                | Self::Substitution
                | Self::NonPrimitive
                | Self::Unidentified
                | Self::Recursive
        )
    }

    /// Literal value kinds.
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::StringLiteral | Self::NumberLiteral | Self::BooleanLiteral | Self::BigIntLiteral
        )
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
