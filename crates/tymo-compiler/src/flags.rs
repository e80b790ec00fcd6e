//! Classification flags reported by the type-checking engine.
//!
//! Bit positions match the engine's own numeric encoding so that an adapter
//! can pass raw flag words through with `from_bits_retain`. Bits this crate
//! does not name are kept, and a handle carrying only such bits compiles to
//! the `unidentified` model.

use bitflags::bitflags;

bitflags! {
    /// Category flags of a type handle. Categories are not mutually
    /// exclusive: `boolean` is also a union, an enum is also a union.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u32 {
        const ANY = 1 << 0;
        const UNKNOWN = 1 << 1;
        const STRING = 1 << 2;
        const NUMBER = 1 << 3;
        const BOOLEAN = 1 << 4;
        const ENUM = 1 << 5;
        const BIG_INT = 1 << 6;
        const STRING_LITERAL = 1 << 7;
        const NUMBER_LITERAL = 1 << 8;
        const BOOLEAN_LITERAL = 1 << 9;
        const ENUM_LITERAL = 1 << 10;
        const BIG_INT_LITERAL = 1 << 11;
        const ES_SYMBOL = 1 << 12;
        const UNIQUE_ES_SYMBOL = 1 << 13;
        const VOID = 1 << 14;
        const UNDEFINED = 1 << 15;
        const NULL = 1 << 16;
        const NEVER = 1 << 17;
        const TYPE_PARAMETER = 1 << 18;
        const OBJECT = 1 << 19;
        const UNION = 1 << 20;
        const INTERSECTION = 1 << 21;
        /// `keyof T`
        const INDEX = 1 << 22;
        /// `T[K]`
        const INDEXED_ACCESS = 1 << 23;
        const CONDITIONAL = 1 << 24;
        const SUBSTITUTION = 1 << 25;
        /// The `object` keyword type.
        const NON_PRIMITIVE = 1 << 26;
        const TEMPLATE_LITERAL = 1 << 27;
        const STRING_MAPPING = 1 << 28;

        const LITERAL = Self::STRING_LITERAL.bits()
            | Self::NUMBER_LITERAL.bits()
            | Self::BIG_INT_LITERAL.bits()
            | Self::BOOLEAN_LITERAL.bits();
        const UNION_OR_INTERSECTION = Self::UNION.bits() | Self::INTERSECTION.bits();
        const ES_SYMBOL_LIKE = Self::ES_SYMBOL.bits() | Self::UNIQUE_ES_SYMBOL.bits();
    }
}

bitflags! {
    /// Sub-classification of object-category handles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ObjectFlags: u32 {
        const CLASS = 1 << 0;
        const INTERFACE = 1 << 1;
        /// Generic instantiation (`Array<string>`, `[string, number]`).
        const REFERENCE = 1 << 2;
        /// Set on the generic target of tuple instantiations.
        const TUPLE = 1 << 3;
        const ANONYMOUS = 1 << 4;
        const MAPPED = 1 << 5;
        const INSTANTIATED = 1 << 6;
        const OBJECT_LITERAL = 1 << 7;
    }
}

bitflags! {
    /// Flags of a declared symbol. Only the property-related bits matter here.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SymbolFlags: u32 {
        const PROPERTY = 1 << 2;
        const ENUM_MEMBER = 1 << 3;
        const METHOD = 1 << 13;
        const GET_ACCESSOR = 1 << 15;
        const SET_ACCESSOR = 1 << 16;
        const OPTIONAL = 1 << 24;
    }
}
