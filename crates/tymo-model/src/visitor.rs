//! Read-only traversal over compiled models.
//!
//! Children of a model are the nested models it owns, in wire order:
//! enum values, union/intersection/tuple members, the array element,
//! property value models, and the index value type. Index key types are
//! part of the signature, not children.
//!
//! Traversal is iterative, so arbitrarily deep models do not grow the stack.

use crate::kind::TypeKind;
use crate::model::{TypeData, TypeModel};

/// Visitor over a model tree.
pub trait ModelVisitor<H> {
    /// Called once per model in pre-order.
    ///
    /// Return `false` to skip the children of `model`.
    fn visit(&mut self, model: &TypeModel<H>) -> bool;
}

impl<H, F> ModelVisitor<H> for F
where
    F: FnMut(&TypeModel<H>) -> bool,
{
    fn visit(&mut self, model: &TypeModel<H>) -> bool {
        self(model)
    }
}

/// Call `f` for each direct child of `model`, in order.
pub fn for_each_child<'a, H>(model: &'a TypeModel<H>, mut f: impl FnMut(&'a TypeModel<H>)) {
    match &model.data {
        TypeData::Enum { values } | TypeData::EnumLiteral { values } => values.iter().for_each(f),
        TypeData::Union { types }
        | TypeData::Intersection { types }
        | TypeData::Tuple { types } => types.iter().for_each(f),
        TypeData::Array { element } => f(element),
        TypeData::Index { value_type, .. } => f(value_type),
        TypeData::Object { props } => props.iter().for_each(|prop| f(&prop.model)),
        TypeData::ObjectWithIndex { props, index } => {
            props.iter().for_each(|prop| f(&prop.model));
            f(&index.value_type);
        }
        TypeData::Any
        | TypeData::Unknown
        | TypeData::String
        | TypeData::Number
        | TypeData::Boolean
        | TypeData::BigInt
        | TypeData::StringLiteral { .. }
        | TypeData::NumberLiteral { .. }
        | TypeData::BooleanLiteral { .. }
        | TypeData::BigIntLiteral { .. }
        | TypeData::EsSymbol
        | TypeData::UniqueEsSymbol
        | TypeData::Void
        | TypeData::Undefined
        | TypeData::Null
        | TypeData::Never
        | TypeData::TypeParameter
        | TypeData::IndexedAccess
        | TypeData::Conditional
        | TypeData::Substitution
        | TypeData::NonPrimitive
        | TypeData::Unidentified
        | TypeData::Recursive => {}
    }
}

/// Walk `root` and every nested model in pre-order.
pub fn walk<H, V: ModelVisitor<H> + ?Sized>(root: &TypeModel<H>, visitor: &mut V) {
    let mut stack = vec![root];
    let mut children = Vec::new();
    while let Some(model) = stack.pop() {
        if !visitor.visit(model) {
            continue;
        }
        for_each_child(model, |child| children.push(child));
        stack.extend(children.drain(..).rev());
    }
}

/// Number of models in the tree, including `root`.
pub fn node_count<H>(root: &TypeModel<H>) -> usize {
    let mut count = 0;
    walk(root, &mut |_: &TypeModel<H>| {
        count += 1;
        true
    });
    count
}

/// Whether `root` or any nested model has the given kind.
pub fn contains_kind<H>(root: &TypeModel<H>, kind: TypeKind) -> bool {
    let mut found = false;
    walk(root, &mut |model: &TypeModel<H>| {
        found |= model.kind() == kind;
        !found
    });
    found
}
