//! In-memory type graph implementing [`TypeIntrospection`].
//!
//! `TypeArena` stores types and symbols in two flat vectors addressed by
//! [`TypeId`] and [`SymbolId`]. It is deterministic and cheap to build, which
//! makes it the engine used by the compiler's tests and benchmarks, and a
//! reference for how an adapter over a real checker should answer queries.
//!
//! The graph may be cyclic: [`TypeArena::reserve`] hands out a handle before
//! its shape exists and [`TypeArena::define`] fills it in afterwards.

use rustc_hash::FxHashMap;
use tymo_model::PseudoBigInt;

use crate::flags::{ObjectFlags, SymbolFlags, TypeFlags};
use crate::introspection::{ARRAY_SYMBOL_NAME, TypeIntrospection};

/// Handle of a type stored in a [`TypeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    // These are interned at these indices by `TypeArena::new()`.
    pub const ANY: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    pub const STRING: TypeId = TypeId(2);
    pub const NUMBER: TypeId = TypeId(3);
    pub const BOOLEAN: TypeId = TypeId(4);
    pub const BIGINT: TypeId = TypeId(5);
    pub const SYMBOL: TypeId = TypeId(6);
    pub const VOID: TypeId = TypeId(7);
    pub const UNDEFINED: TypeId = TypeId(8);
    pub const NULL: TypeId = TypeId(9);
    pub const NEVER: TypeId = TypeId(10);
    /// The `object` keyword type.
    pub const NON_PRIMITIVE: TypeId = TypeId(11);
    pub const TRUE: TypeId = TypeId(12);
    pub const FALSE: TypeId = TypeId(13);

    /// First index handed out for user-built types.
    pub const FIRST_DYNAMIC: u32 = 14;

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle of a symbol stored in a [`TypeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// The built-in `Array` interface symbol.
    pub const ARRAY: SymbolId = SymbolId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
enum Shape {
    Intrinsic,
    StringLiteral(String),
    NumberLiteral(f64),
    BooleanLiteral(bool),
    BigIntLiteral(PseudoBigInt),
    Members(Vec<TypeId>),
    Object {
        properties: Vec<SymbolId>,
        string_index: Option<TypeId>,
        number_index: Option<TypeId>,
    },
    Reference {
        symbol: Option<SymbolId>,
        target_flags: ObjectFlags,
        arguments: Vec<TypeId>,
    },
}

#[derive(Debug, Clone)]
struct TypeEntry {
    flags: TypeFlags,
    object_flags: ObjectFlags,
    shape: Shape,
}

impl TypeEntry {
    fn new(flags: TypeFlags, shape: Shape) -> Self {
        Self {
            flags,
            object_flags: ObjectFlags::empty(),
            shape,
        }
    }

    const PLACEHOLDER: TypeEntry = TypeEntry {
        flags: TypeFlags::empty(),
        object_flags: ObjectFlags::empty(),
        shape: Shape::Intrinsic,
    };
}

#[derive(Debug, Clone)]
struct SymbolEntry {
    name: String,
    flags: SymbolFlags,
    declared_type: Option<TypeId>,
}

/// A growable, self-contained type graph.
#[derive(Debug, Clone)]
pub struct TypeArena {
    types: Vec<TypeEntry>,
    symbols: Vec<SymbolEntry>,
    string_literals: FxHashMap<String, TypeId>,
    number_literals: FxHashMap<u64, TypeId>,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    pub fn new() -> Self {
        let mut arena = Self {
            types: Vec::with_capacity(64),
            symbols: Vec::with_capacity(16),
            string_literals: FxHashMap::default(),
            number_literals: FxHashMap::default(),
        };

        // Order must match the `TypeId` constants.
        for flags in [
            TypeFlags::ANY,
            TypeFlags::UNKNOWN,
            TypeFlags::STRING,
            TypeFlags::NUMBER,
        ] {
            arena.push(TypeEntry::new(flags, Shape::Intrinsic));
        }
        arena.push(TypeEntry::new(
            TypeFlags::BOOLEAN | TypeFlags::UNION,
            Shape::Members(vec![TypeId::FALSE, TypeId::TRUE]),
        ));
        for flags in [
            TypeFlags::BIG_INT,
            TypeFlags::ES_SYMBOL,
            TypeFlags::VOID,
            TypeFlags::UNDEFINED,
            TypeFlags::NULL,
            TypeFlags::NEVER,
            TypeFlags::NON_PRIMITIVE,
        ] {
            arena.push(TypeEntry::new(flags, Shape::Intrinsic));
        }
        arena.push(TypeEntry::new(
            TypeFlags::BOOLEAN_LITERAL,
            Shape::BooleanLiteral(true),
        ));
        arena.push(TypeEntry::new(
            TypeFlags::BOOLEAN_LITERAL,
            Shape::BooleanLiteral(false),
        ));
        debug_assert_eq!(arena.types.len(), TypeId::FIRST_DYNAMIC as usize);

        arena.symbols.push(SymbolEntry {
            name: ARRAY_SYMBOL_NAME.to_string(),
            flags: SymbolFlags::empty(),
            declared_type: None,
        });

        arena
    }

    /// Number of stored types, intrinsics included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn push(&mut self, entry: TypeEntry) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(entry);
        id
    }

    fn push_symbol(&mut self, entry: SymbolEntry) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(entry);
        id
    }

    fn get(&self, id: &TypeId) -> Option<&TypeEntry> {
        self.types.get(id.index())
    }

    fn symbol(&self, id: &SymbolId) -> Option<&SymbolEntry> {
        self.symbols.get(id.index())
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// A type with arbitrary flags and no structure.
    pub fn intrinsic(&mut self, flags: TypeFlags) -> TypeId {
        self.push(TypeEntry::new(flags, Shape::Intrinsic))
    }

    pub fn type_parameter(&mut self) -> TypeId {
        self.intrinsic(TypeFlags::TYPE_PARAMETER)
    }

    pub fn unique_symbol(&mut self) -> TypeId {
        self.intrinsic(TypeFlags::UNIQUE_ES_SYMBOL)
    }

    /// Interned: the same text always yields the same handle.
    pub fn string_literal(&mut self, value: &str) -> TypeId {
        if let Some(&id) = self.string_literals.get(value) {
            return id;
        }
        let id = self.push(TypeEntry::new(
            TypeFlags::STRING_LITERAL,
            Shape::StringLiteral(value.to_string()),
        ));
        self.string_literals.insert(value.to_string(), id);
        id
    }

    /// Interned by bit pattern.
    pub fn number_literal(&mut self, value: f64) -> TypeId {
        let key = value.to_bits();
        if let Some(&id) = self.number_literals.get(&key) {
            return id;
        }
        let id = self.push(TypeEntry::new(
            TypeFlags::NUMBER_LITERAL,
            Shape::NumberLiteral(value),
        ));
        self.number_literals.insert(key, id);
        id
    }

    pub fn boolean_literal(&self, value: bool) -> TypeId {
        if value { TypeId::TRUE } else { TypeId::FALSE }
    }

    pub fn bigint_literal(&mut self, value: PseudoBigInt) -> TypeId {
        self.push(TypeEntry::new(
            TypeFlags::BIG_INT_LITERAL,
            Shape::BigIntLiteral(value),
        ))
    }

    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.push(TypeEntry::new(TypeFlags::UNION, Shape::Members(members)))
    }

    pub fn intersection(&mut self, members: Vec<TypeId>) -> TypeId {
        self.push(TypeEntry::new(
            TypeFlags::INTERSECTION,
            Shape::Members(members),
        ))
    }

    /// A numeric enum member type, such as `E.A` for `enum E { A = 0 }`.
    pub fn enum_member(&mut self, value: f64) -> TypeId {
        self.push(TypeEntry::new(
            TypeFlags::NUMBER_LITERAL | TypeFlags::ENUM_LITERAL,
            Shape::NumberLiteral(value),
        ))
    }

    /// A string enum member type, such as `E.A` for `enum E { A = "a" }`.
    pub fn string_enum_member(&mut self, value: &str) -> TypeId {
        self.push(TypeEntry::new(
            TypeFlags::STRING_LITERAL | TypeFlags::ENUM_LITERAL,
            Shape::StringLiteral(value.to_string()),
        ))
    }

    /// An enum whose members are all literal, reported as a union of them.
    pub fn enum_literal_union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.push(TypeEntry::new(
            TypeFlags::ENUM_LITERAL | TypeFlags::UNION,
            Shape::Members(members),
        ))
    }

    /// An enum with computed members, reported as a union of them.
    pub fn enum_union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.push(TypeEntry::new(
            TypeFlags::ENUM | TypeFlags::UNION,
            Shape::Members(members),
        ))
    }

    pub fn property(&mut self, name: &str, ty: TypeId) -> SymbolId {
        self.push_symbol(SymbolEntry {
            name: name.to_string(),
            flags: SymbolFlags::PROPERTY,
            declared_type: Some(ty),
        })
    }

    pub fn optional_property(&mut self, name: &str, ty: TypeId) -> SymbolId {
        self.push_symbol(SymbolEntry {
            name: name.to_string(),
            flags: SymbolFlags::PROPERTY | SymbolFlags::OPTIONAL,
            declared_type: Some(ty),
        })
    }

    /// A property whose declaration the engine cannot resolve.
    pub fn unresolved_property(&mut self, name: &str) -> SymbolId {
        self.push_symbol(SymbolEntry {
            name: name.to_string(),
            flags: SymbolFlags::PROPERTY,
            declared_type: None,
        })
    }

    /// An anonymous object type with the given properties, in order.
    pub fn object(&mut self, properties: Vec<SymbolId>) -> TypeId {
        self.object_with_index(properties, None, None)
    }

    pub fn object_with_index(
        &mut self,
        properties: Vec<SymbolId>,
        string_index: Option<TypeId>,
        number_index: Option<TypeId>,
    ) -> TypeId {
        let mut entry = TypeEntry::new(
            TypeFlags::OBJECT,
            Shape::Object {
                properties,
                string_index,
                number_index,
            },
        );
        entry.object_flags = ObjectFlags::ANONYMOUS;
        self.push(entry)
    }

    /// `Array<element>`.
    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.push_reference(
            Some(SymbolId::ARRAY),
            ObjectFlags::INTERFACE,
            vec![element],
        )
    }

    /// A tuple instantiation with one argument per slot.
    pub fn tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.push_reference(None, ObjectFlags::TUPLE, elements)
    }

    /// An instantiation of the generic interface `name`.
    pub fn reference(&mut self, name: &str, arguments: Vec<TypeId>) -> TypeId {
        let symbol = self.push_symbol(SymbolEntry {
            name: name.to_string(),
            flags: SymbolFlags::empty(),
            declared_type: None,
        });
        self.push_reference(Some(symbol), ObjectFlags::INTERFACE, arguments)
    }

    fn push_reference(
        &mut self,
        symbol: Option<SymbolId>,
        target_flags: ObjectFlags,
        arguments: Vec<TypeId>,
    ) -> TypeId {
        let mut entry = TypeEntry::new(
            TypeFlags::OBJECT,
            Shape::Reference {
                symbol,
                target_flags,
                arguments,
            },
        );
        entry.object_flags = ObjectFlags::REFERENCE;
        self.push(entry)
    }

    /// A handle whose shape is supplied later by [`define`](Self::define).
    ///
    /// Until then it carries no flags.
    pub fn reserve(&mut self) -> TypeId {
        self.push(TypeEntry::PLACEHOLDER)
    }

    /// Give `id` the flags and structure of `shape_of`.
    ///
    /// Returns `false` when either handle is unknown to this arena.
    pub fn define(&mut self, id: TypeId, shape_of: TypeId) -> bool {
        let Some(entry) = self.get(&shape_of).cloned() else {
            return false;
        };
        match self.types.get_mut(id.index()) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }
}

impl TypeIntrospection for TypeArena {
    type Type = TypeId;
    type Symbol = SymbolId;

    fn type_flags(&self, ty: &TypeId) -> TypeFlags {
        self.get(ty).map(|entry| entry.flags).unwrap_or_default()
    }

    fn object_flags(&self, ty: &TypeId) -> ObjectFlags {
        self.get(ty)
            .map(|entry| entry.object_flags)
            .unwrap_or_default()
    }

    fn reference_target_flags(&self, ty: &TypeId) -> ObjectFlags {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::Reference { target_flags, .. }) => *target_flags,
            _ => ObjectFlags::empty(),
        }
    }

    fn type_arguments(&self, ty: &TypeId) -> Vec<TypeId> {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::Reference { arguments, .. }) => arguments.clone(),
            _ => Vec::new(),
        }
    }

    fn type_symbol(&self, ty: &TypeId) -> Option<SymbolId> {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::Reference { symbol, .. }) => *symbol,
            _ => None,
        }
    }

    fn string_literal_value(&self, ty: &TypeId) -> Option<String> {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::StringLiteral(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn number_literal_value(&self, ty: &TypeId) -> Option<f64> {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::NumberLiteral(value)) => Some(*value),
            _ => None,
        }
    }

    fn boolean_literal_value(&self, ty: &TypeId) -> Option<bool> {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::BooleanLiteral(value)) => Some(*value),
            _ => None,
        }
    }

    fn bigint_literal_value(&self, ty: &TypeId) -> Option<PseudoBigInt> {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::BigIntLiteral(value)) => Some(value.clone()),
            _ => None,
        }
    }

    fn member_types(&self, ty: &TypeId) -> Vec<TypeId> {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::Members(members)) => members.clone(),
            _ => Vec::new(),
        }
    }

    fn properties(&self, ty: &TypeId) -> Vec<SymbolId> {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::Object { properties, .. }) => properties.clone(),
            _ => Vec::new(),
        }
    }

    fn symbol_name(&self, symbol: &SymbolId) -> String {
        self.symbol(symbol)
            .map(|entry| entry.name.clone())
            .unwrap_or_default()
    }

    fn symbol_flags(&self, symbol: &SymbolId) -> SymbolFlags {
        self.symbol(symbol)
            .map(|entry| entry.flags)
            .unwrap_or_default()
    }

    /// Unresolvable declarations resolve to `any`.
    fn declared_type_of_symbol(&self, symbol: &SymbolId) -> TypeId {
        self.symbol(symbol)
            .and_then(|entry| entry.declared_type)
            .unwrap_or(TypeId::ANY)
    }

    fn string_index_type(&self, ty: &TypeId) -> Option<TypeId> {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::Object { string_index, .. }) => *string_index,
            _ => None,
        }
    }

    fn number_index_type(&self, ty: &TypeId) -> Option<TypeId> {
        match self.get(ty).map(|entry| &entry.shape) {
            Some(Shape::Object { number_index, .. }) => *number_index,
            _ => None,
        }
    }
}
