//! Type model variants.
//!
//! # Wire format
//!
//! Every model serializes as one JSON object whose `kind` field carries the
//! [`TypeKind`] string, followed by the variant payload:
//!
//! | kind | payload |
//! |---|---|
//! | `stringLiteral`, `numberLiteral`, `booleanLiteral`, `bigintLiteral` | `value` |
//! | `enum`, `enumLiteral` | `values` |
//! | `union`, `intersection`, `tuple` | `types` |
//! | `array` | `type` |
//! | `object` | `props` |
//! | `objectWithIndex` | `props`, `index` |
//! | `index` | `keyType`, `valueType` |
//!
//! Properties are models extended with `name` and `optional`, which are
//! written before the property's own `kind`. The engine handle a model was
//! compiled from (`origin`) is never written. Integral number literal values
//! are written as JSON integers.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::bigint::PseudoBigInt;
use crate::kind::TypeKind;

/// One compiled type: the variant data plus an optional back-reference to the
/// engine handle it was derived from.
///
/// `H` is the engine's handle type. Models built by hand or read back from
/// JSON use the default `()` and carry no origin.
///
/// Equality compares the variant data only; two models compiled from
/// different handles with the same structure are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TypeModel<H = ()> {
    #[serde(flatten)]
    pub data: TypeData<H>,
    #[serde(skip)]
    pub origin: Option<H>,
}

/// The closed set of type categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", bound = "")]
pub enum TypeData<H = ()> {
    Any,
    Unknown,
    String,
    Number,
    Boolean,
    Enum {
        values: Vec<TypeModel<H>>,
    },
    #[serde(rename = "bigint")]
    BigInt,
    StringLiteral {
        value: String,
    },
    NumberLiteral {
        #[serde(serialize_with = "serialize_number")]
        value: f64,
    },
    BooleanLiteral {
        value: bool,
    },
    EnumLiteral {
        values: Vec<TypeModel<H>>,
    },
    #[serde(rename = "bigintLiteral")]
    BigIntLiteral {
        value: PseudoBigInt,
    },
    EsSymbol,
    UniqueEsSymbol,
    Void,
    Undefined,
    Null,
    Never,
    TypeParameter,
    Union {
        types: Vec<TypeModel<H>>,
    },
    Intersection {
        types: Vec<TypeModel<H>>,
    },
    /// A standalone index signature. Object types carry theirs in
    /// [`TypeData::ObjectWithIndex`] as an [`IndexModel`].
    #[serde(rename_all = "camelCase")]
    Index {
        key_type: IndexKeyType,
        value_type: Box<TypeModel<H>>,
    },
    IndexedAccess,
    Conditional,
    Substitution,
    NonPrimitive,
    /// Fallback for handles no classification rule matches.
    Unidentified,
    Object {
        props: Vec<PropertyModel<H>>,
    },
    ObjectWithIndex {
        props: Vec<PropertyModel<H>>,
        index: IndexModel<H>,
    },
    Array {
        #[serde(rename = "type")]
        element: Box<TypeModel<H>>,
    },
    Tuple {
        types: Vec<TypeModel<H>>,
    },
    /// A handle reached again while it was still being compiled.
    Recursive,
}

/// A named object member: its value model plus `name` and `optional`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PropertyModel<H = ()> {
    pub name: String,
    pub optional: bool,
    #[serde(flatten)]
    pub model: TypeModel<H>,
}

/// The index signature of an object type, written as an `index` model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "index", rename_all = "camelCase", bound = "")]
pub struct IndexModel<H = ()> {
    pub key_type: IndexKeyType,
    pub value_type: Box<TypeModel<H>>,
}

/// Key category of an index signature.
///
/// Serialized as the model of the key type itself: `string`, `number`, or
/// the union of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKeyType {
    String,
    Number,
    StringOrNumber,
}

// =============================================================================
// TypeModel
// =============================================================================

impl<H> TypeModel<H> {
    pub fn new(data: TypeData<H>) -> Self {
        Self { data, origin: None }
    }

    pub fn with_origin(data: TypeData<H>, origin: H) -> Self {
        Self {
            data,
            origin: Some(origin),
        }
    }

    pub fn string() -> Self {
        Self::new(TypeData::String)
    }

    pub fn number() -> Self {
        Self::new(TypeData::Number)
    }

    pub fn boolean() -> Self {
        Self::new(TypeData::Boolean)
    }

    pub fn string_literal(value: impl Into<String>) -> Self {
        Self::new(TypeData::StringLiteral {
            value: value.into(),
        })
    }

    pub fn number_literal(value: f64) -> Self {
        Self::new(TypeData::NumberLiteral { value })
    }

    pub fn array(element: TypeModel<H>) -> Self {
        Self::new(TypeData::Array {
            element: Box::new(element),
        })
    }

    pub fn union(types: Vec<TypeModel<H>>) -> Self {
        Self::new(TypeData::Union { types })
    }

    pub fn kind(&self) -> TypeKind {
        self.data.kind()
    }

    pub fn origin(&self) -> Option<&H> {
        self.origin.as_ref()
    }

    /// Extend this model with property fields.
    pub fn into_property(self, name: impl Into<String>, optional: bool) -> PropertyModel<H> {
        PropertyModel::new(name, optional, self)
    }

    /// Replace every origin in the tree, keeping the structure.
    pub fn map_origin<G, F: FnMut(H) -> G>(self, f: &mut F) -> TypeModel<G> {
        self.filter_map_origin(&mut |origin| Some(f(origin)))
    }

    /// Replace every origin in the tree; `None` clears it.
    pub fn filter_map_origin<G, F: FnMut(H) -> Option<G>>(self, f: &mut F) -> TypeModel<G> {
        TypeModel {
            data: self.data.filter_map_origin(f),
            origin: self.origin.and_then(|origin| f(origin)),
        }
    }

    /// Drop every origin in the tree.
    pub fn detach(self) -> TypeModel {
        self.filter_map_origin(&mut |_| None)
    }

    /// Serialize to a JSON value. Origins are not included.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Serialize to compact JSON text. Origins are not included.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl TypeModel {
    /// Read a model back from JSON text. The result carries no origins.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl<H: PartialEq> PartialEq for TypeModel<H> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<H> From<TypeData<H>> for TypeModel<H> {
    fn from(data: TypeData<H>) -> Self {
        Self::new(data)
    }
}

// =============================================================================
// TypeData
// =============================================================================

impl<H> TypeData<H> {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeData::Any => TypeKind::Any,
            TypeData::Unknown => TypeKind::Unknown,
            TypeData::String => TypeKind::String,
            TypeData::Number => TypeKind::Number,
            TypeData::Boolean => TypeKind::Boolean,
            TypeData::Enum { .. } => TypeKind::Enum,
            TypeData::BigInt => TypeKind::BigInt,
            TypeData::StringLiteral { .. } => TypeKind::StringLiteral,
            TypeData::NumberLiteral { .. } => TypeKind::NumberLiteral,
            TypeData::BooleanLiteral { .. } => TypeKind::BooleanLiteral,
            TypeData::EnumLiteral { .. } => TypeKind::EnumLiteral,
            TypeData::BigIntLiteral { .. } => TypeKind::BigIntLiteral,
            TypeData::EsSymbol => TypeKind::EsSymbol,
            TypeData::UniqueEsSymbol => TypeKind::UniqueEsSymbol,
            TypeData::Void => TypeKind::Void,
            TypeData::Undefined => TypeKind::Undefined,
            TypeData::Null => TypeKind::Null,
            TypeData::Never => TypeKind::Never,
            TypeData::TypeParameter => TypeKind::TypeParameter,
            TypeData::Union { .. } => TypeKind::Union,
            TypeData::Intersection { .. } => TypeKind::Intersection,
            TypeData::Index { .. } => TypeKind::Index,
            TypeData::IndexedAccess => TypeKind::IndexedAccess,
            TypeData::Conditional => TypeKind::Conditional,
            TypeData::Substitution => TypeKind::Substitution,
            TypeData::NonPrimitive => TypeKind::NonPrimitive,
            TypeData::Unidentified => TypeKind::Unidentified,
            TypeData::Object { .. } => TypeKind::Object,
            TypeData::ObjectWithIndex { .. } => TypeKind::ObjectWithIndex,
            TypeData::Array { .. } => TypeKind::Array,
            TypeData::Tuple { .. } => TypeKind::Tuple,
            TypeData::Recursive => TypeKind::Recursive,
        }
    }

    /// Properties of `object` and `objectWithIndex` models; empty otherwise.
    pub fn props(&self) -> &[PropertyModel<H>] {
        match self {
            TypeData::Object { props } | TypeData::ObjectWithIndex { props, .. } => props,
            _ => &[],
        }
    }

    pub fn map_origin<G, F: FnMut(H) -> G>(self, f: &mut F) -> TypeData<G> {
        self.filter_map_origin(&mut |origin| Some(f(origin)))
    }

    pub fn filter_map_origin<G, F: FnMut(H) -> Option<G>>(self, f: &mut F) -> TypeData<G> {
        match self {
            TypeData::Any => TypeData::Any,
            TypeData::Unknown => TypeData::Unknown,
            TypeData::String => TypeData::String,
            TypeData::Number => TypeData::Number,
            TypeData::Boolean => TypeData::Boolean,
            TypeData::Enum { values } => TypeData::Enum {
                values: map_models(values, f),
            },
            TypeData::BigInt => TypeData::BigInt,
            TypeData::StringLiteral { value } => TypeData::StringLiteral { value },
            TypeData::NumberLiteral { value } => TypeData::NumberLiteral { value },
            TypeData::BooleanLiteral { value } => TypeData::BooleanLiteral { value },
            TypeData::EnumLiteral { values } => TypeData::EnumLiteral {
                values: map_models(values, f),
            },
            TypeData::BigIntLiteral { value } => TypeData::BigIntLiteral { value },
            TypeData::EsSymbol => TypeData::EsSymbol,
            TypeData::UniqueEsSymbol => TypeData::UniqueEsSymbol,
            TypeData::Void => TypeData::Void,
            TypeData::Undefined => TypeData::Undefined,
            TypeData::Null => TypeData::Null,
            TypeData::Never => TypeData::Never,
            TypeData::TypeParameter => TypeData::TypeParameter,
            TypeData::Union { types } => TypeData::Union {
                types: map_models(types, f),
            },
            TypeData::Intersection { types } => TypeData::Intersection {
                types: map_models(types, f),
            },
            TypeData::Index {
                key_type,
                value_type,
            } => TypeData::Index {
                key_type,
                value_type: Box::new(value_type.filter_map_origin(f)),
            },
            TypeData::IndexedAccess => TypeData::IndexedAccess,
            TypeData::Conditional => TypeData::Conditional,
            TypeData::Substitution => TypeData::Substitution,
            TypeData::NonPrimitive => TypeData::NonPrimitive,
            TypeData::Unidentified => TypeData::Unidentified,
            TypeData::Object { props } => TypeData::Object {
                props: map_props(props, f),
            },
            TypeData::ObjectWithIndex { props, index } => TypeData::ObjectWithIndex {
                props: map_props(props, f),
                index: index.filter_map_origin(f),
            },
            TypeData::Array { element } => TypeData::Array {
                element: Box::new(element.filter_map_origin(f)),
            },
            TypeData::Tuple { types } => TypeData::Tuple {
                types: map_models(types, f),
            },
            TypeData::Recursive => TypeData::Recursive,
        }
    }
}

impl<H> From<IndexModel<H>> for TypeData<H> {
    fn from(index: IndexModel<H>) -> Self {
        TypeData::Index {
            key_type: index.key_type,
            value_type: index.value_type,
        }
    }
}

fn map_models<H, G, F: FnMut(H) -> Option<G>>(
    models: Vec<TypeModel<H>>,
    f: &mut F,
) -> Vec<TypeModel<G>> {
    models
        .into_iter()
        .map(|model| model.filter_map_origin(f))
        .collect()
}

fn map_props<H, G, F: FnMut(H) -> Option<G>>(
    props: Vec<PropertyModel<H>>,
    f: &mut F,
) -> Vec<PropertyModel<G>> {
    props
        .into_iter()
        .map(|prop| PropertyModel {
            name: prop.name,
            optional: prop.optional,
            model: prop.model.filter_map_origin(f),
        })
        .collect()
}

// =============================================================================
// PropertyModel / IndexModel
// =============================================================================

impl<H> PropertyModel<H> {
    pub fn new(name: impl Into<String>, optional: bool, model: TypeModel<H>) -> Self {
        Self {
            name: name.into(),
            optional,
            model,
        }
    }

    pub fn kind(&self) -> TypeKind {
        self.model.kind()
    }
}

impl<H> IndexModel<H> {
    pub fn new(key_type: IndexKeyType, value_type: TypeModel<H>) -> Self {
        Self {
            key_type,
            value_type: Box::new(value_type),
        }
    }

    pub fn kind(&self) -> TypeKind {
        TypeKind::Index
    }

    pub fn map_origin<G, F: FnMut(H) -> G>(self, f: &mut F) -> IndexModel<G> {
        self.filter_map_origin(&mut |origin| Some(f(origin)))
    }

    pub fn filter_map_origin<G, F: FnMut(H) -> Option<G>>(self, f: &mut F) -> IndexModel<G> {
        IndexModel {
            key_type: self.key_type,
            value_type: Box::new(self.value_type.filter_map_origin(f)),
        }
    }
}

// =============================================================================
// IndexKeyType
// =============================================================================

impl IndexKeyType {
    /// The model of the key type.
    pub fn to_model<H>(self) -> TypeModel<H> {
        match self {
            IndexKeyType::String => TypeModel::string(),
            IndexKeyType::Number => TypeModel::number(),
            IndexKeyType::StringOrNumber => {
                TypeModel::union(vec![TypeModel::string(), TypeModel::number()])
            }
        }
    }

    /// Recognize a key type model. Union members may appear in either order.
    pub fn from_model<H>(model: &TypeModel<H>) -> Option<Self> {
        match &model.data {
            TypeData::String => Some(IndexKeyType::String),
            TypeData::Number => Some(IndexKeyType::Number),
            TypeData::Union { types } => match types.as_slice() {
                [a, b] => match (a.kind(), b.kind()) {
                    (TypeKind::String, TypeKind::Number) | (TypeKind::Number, TypeKind::String) => {
                        Some(IndexKeyType::StringOrNumber)
                    }
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        }
    }

    pub fn accepts_string(self) -> bool {
        matches!(self, IndexKeyType::String | IndexKeyType::StringOrNumber)
    }

    pub fn accepts_number(self) -> bool {
        matches!(self, IndexKeyType::Number | IndexKeyType::StringOrNumber)
    }
}

impl Serialize for IndexKeyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_model::<()>().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for IndexKeyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let model = TypeModel::<()>::deserialize(deserializer)?;
        IndexKeyType::from_model(&model).ok_or_else(|| {
            de::Error::custom(format!(
                "index key type must be string, number or their union, found `{}`",
                model.kind()
            ))
        })
    }
}

// =============================================================================
// Number literals
// =============================================================================

/// Largest integer an `f64` represents exactly, together with all smaller ones.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Writes integral values without a fraction (`42`, not `42.0`).
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
