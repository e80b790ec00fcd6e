//! Type model compilation.
//!
//! Turns one engine type handle into one [`TypeModel`], recursing through
//! every nested type position. Compilation is total: each handle yields
//! exactly one model, with `unidentified` as the fallback.
//!
//! # Rule order
//!
//! Classification flags overlap (an enum is also a union, `boolean` is the
//! union `true | false`, literal types carry their general category), so the
//! rules below are tried in a fixed order and the first match wins:
//!
//! 1. `any`, `unknown`
//! 2. string, number and boolean literals
//! 3. enum-literal unions
//! 4. big-integer literals
//! 5. `string`, `boolean`, `number`
//! 6. enum unions
//! 7. `bigint`, `symbol`, `unique symbol`, `void`, `undefined`, `null`,
//!    `never`, type parameters
//! 8. tuple instantiations
//! 9. `Array` instantiations
//! 10. remaining object types, with or without an index signature
//! 11. unions, then intersections
//! 12. indexed-access, conditional, substitution and `object` markers
//! 13. `unidentified`
//!
//! Tuples are tried before arrays because both are generic references with
//! type arguments; only arrays are additionally required to be named `Array`.

use tracing::{debug, trace, warn};
use tymo_common::limits::{STACK_GROWTH_SIZE, STACK_RED_ZONE};
use tymo_model::{IndexKeyType, IndexModel, PropertyModel, TypeData, TypeModel};

use crate::flags::{ObjectFlags, SymbolFlags, TypeFlags};
use crate::introspection::{ARRAY_SYMBOL_NAME, TypeIntrospection};
use crate::options::{CompilerOptions, CyclePolicy};
use crate::recursion::{PathGuard, Step};

/// Compile `ty` with default options.
pub fn classify<E>(engine: &E, ty: &E::Type) -> TypeModel<E::Type>
where
    E: TypeIntrospection + ?Sized,
{
    TypeModelCompiler::new(engine).compile(ty)
}

/// Compiles engine handles into type models.
///
/// A compiler holds only its path guard between calls; the models it
/// returns are independent values owned by the caller. Each `compile` call
/// starts with an empty path and the full node budget, so the same handle
/// always yields the same model.
pub struct TypeModelCompiler<'e, E: TypeIntrospection + ?Sized> {
    engine: &'e E,
    options: CompilerOptions,
    guard: PathGuard<E::Type>,
}

impl<'e, E: TypeIntrospection + ?Sized> TypeModelCompiler<'e, E> {
    pub fn new(engine: &'e E) -> Self {
        Self::with_options(engine, CompilerOptions::default())
    }

    pub fn with_options(engine: &'e E, options: CompilerOptions) -> Self {
        let limits = options.guard_limits();
        let guard = match options.cycle_policy {
            CyclePolicy::Detect => PathGuard::tracking(limits),
            CyclePolicy::Trust => PathGuard::depth_only(limits),
        };
        Self {
            engine,
            options,
            guard,
        }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Whether the last `compile` call hit a depth or work limit.
    pub fn limit_exceeded(&self) -> bool {
        self.guard.hit_limit()
    }

    /// Compile one handle.
    pub fn compile(&mut self, ty: &E::Type) -> TypeModel<E::Type> {
        self.guard.reset();
        self.compile_nested(ty)
    }

    fn compile_nested(&mut self, ty: &E::Type) -> TypeModel<E::Type> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH_SIZE, || self.compile_guarded(ty))
    }

    fn compile_guarded(&mut self, ty: &E::Type) -> TypeModel<E::Type> {
        let data = match self.guard.enter(ty) {
            Step::Entered => {
                let data = self.classify(ty);
                self.guard.leave(ty);
                data
            }
            Step::Revisit => {
                debug!(?ty, "handle reached again on its own path");
                TypeData::Recursive
            }
            step @ (Step::TooDeep | Step::OutOfBudget) => {
                warn!(?ty, ?step, "model compilation limit exceeded");
                TypeData::Unidentified
            }
        };

        if self.options.record_origin {
            TypeModel::with_origin(data, ty.clone())
        } else {
            TypeModel::new(data)
        }
    }

    fn compile_all(&mut self, types: &[E::Type]) -> Vec<TypeModel<E::Type>> {
        types.iter().map(|ty| self.compile_nested(ty)).collect()
    }

    // =========================================================================
    // Classification cascade
    // =========================================================================

    fn classify(&mut self, ty: &E::Type) -> TypeData<E::Type> {
        let engine = self.engine;
        let flags = engine.type_flags(ty);

        // Escape hatches may carry other category bits as well.
        if flags.contains(TypeFlags::ANY) {
            trace!(?ty, "any");
            return TypeData::Any;
        }
        if flags.contains(TypeFlags::UNKNOWN) {
            trace!(?ty, "unknown");
            return TypeData::Unknown;
        }

        if let Some(data) = self.classify_literal(ty, flags) {
            return data;
        }

        if flags.contains(TypeFlags::ENUM_LITERAL | TypeFlags::UNION) {
            trace!(?ty, "enum literal union");
            let values = self.compile_all(&engine.member_types(ty));
            return TypeData::EnumLiteral { values };
        }

        if flags.contains(TypeFlags::BIG_INT_LITERAL) {
            if let Some(value) = engine.bigint_literal_value(ty) {
                trace!(?ty, %value, "bigint literal");
                return TypeData::BigIntLiteral { value };
            }
        }

        if flags.contains(TypeFlags::STRING) {
            return TypeData::String;
        }
        if flags.contains(TypeFlags::BOOLEAN) {
            return TypeData::Boolean;
        }
        if flags.contains(TypeFlags::NUMBER) {
            return TypeData::Number;
        }

        if flags.contains(TypeFlags::ENUM | TypeFlags::UNION) {
            trace!(?ty, "enum union");
            let values = self.compile_all(&engine.member_types(ty));
            return TypeData::Enum { values };
        }

        if let Some(data) = classify_primitive(flags) {
            return data;
        }

        if flags.contains(TypeFlags::OBJECT) {
            if let Some(data) = self.classify_tuple(ty) {
                return data;
            }
            if let Some(data) = self.classify_array(ty) {
                return data;
            }
            return self.classify_object(ty);
        }

        if flags.contains(TypeFlags::UNION) {
            trace!(?ty, "union");
            let types = self.compile_all(&engine.member_types(ty));
            return TypeData::Union { types };
        }
        if flags.contains(TypeFlags::INTERSECTION) {
            trace!(?ty, "intersection");
            let types = self.compile_all(&engine.member_types(ty));
            return TypeData::Intersection { types };
        }

        classify_marker(flags).unwrap_or_else(|| {
            trace!(?ty, ?flags, "unidentified");
            TypeData::Unidentified
        })
    }

    /// String, number and boolean literals.
    ///
    /// A literal bit whose value the engine cannot produce does not match.
    fn classify_literal(&self, ty: &E::Type, flags: TypeFlags) -> Option<TypeData<E::Type>> {
        let engine = self.engine;
        if flags.contains(TypeFlags::STRING_LITERAL) {
            if let Some(value) = engine.string_literal_value(ty) {
                trace!(?ty, value = value.as_str(), "string literal");
                return Some(TypeData::StringLiteral { value });
            }
        }
        if flags.contains(TypeFlags::NUMBER_LITERAL) {
            if let Some(value) = engine.number_literal_value(ty) {
                trace!(?ty, value, "number literal");
                return Some(TypeData::NumberLiteral { value });
            }
        }
        if flags.contains(TypeFlags::BOOLEAN_LITERAL) {
            if let Some(value) = engine.boolean_literal_value(ty) {
                trace!(?ty, value, "boolean literal");
                return Some(TypeData::BooleanLiteral { value });
            }
        }
        None
    }

    /// A generic reference whose target is a tuple, with at least one
    /// materialized type argument.
    fn classify_tuple(&mut self, ty: &E::Type) -> Option<TypeData<E::Type>> {
        let engine = self.engine;
        if !engine.object_flags(ty).contains(ObjectFlags::REFERENCE)
            || !engine
                .reference_target_flags(ty)
                .contains(ObjectFlags::TUPLE)
        {
            return None;
        }
        let arguments = engine.type_arguments(ty);
        if arguments.is_empty() {
            return None;
        }
        trace!(?ty, arity = arguments.len(), "tuple");
        Some(TypeData::Tuple {
            types: self.compile_all(&arguments),
        })
    }

    /// A generic reference to the built-in `Array` type with an element type.
    fn classify_array(&mut self, ty: &E::Type) -> Option<TypeData<E::Type>> {
        let engine = self.engine;
        if !engine.object_flags(ty).contains(ObjectFlags::REFERENCE) {
            return None;
        }
        let arguments = engine.type_arguments(ty);
        let element = arguments.first()?;
        let symbol = engine.type_symbol(ty)?;
        if engine.symbol_name(&symbol) != ARRAY_SYMBOL_NAME {
            return None;
        }
        trace!(?ty, "array");
        Some(TypeData::Array {
            element: Box::new(self.compile_nested(element)),
        })
    }

    /// Any remaining object type: its own properties plus at most one index
    /// signature.
    ///
    /// When both a string and a number index exist, the key becomes
    /// `string | number` and the value is the string index's value type.
    fn classify_object(&mut self, ty: &E::Type) -> TypeData<E::Type> {
        let engine = self.engine;
        let props: Vec<_> = engine
            .properties(ty)
            .iter()
            .map(|symbol| self.compile_property(symbol))
            .collect();

        let string_index = engine.string_index_type(ty);
        let number_index = engine.number_index_type(ty);
        let index = match (string_index, number_index) {
            (Some(value), Some(_)) => Some((IndexKeyType::StringOrNumber, value)),
            (None, Some(value)) => Some((IndexKeyType::Number, value)),
            (Some(value), None) => Some((IndexKeyType::String, value)),
            (None, None) => None,
        };

        match index {
            Some((key_type, value)) => {
                trace!(?ty, props = props.len(), ?key_type, "object with index");
                let value_type = self.compile_nested(&value);
                TypeData::ObjectWithIndex {
                    props,
                    index: IndexModel::new(key_type, value_type),
                }
            }
            None => {
                trace!(?ty, props = props.len(), "object");
                TypeData::Object { props }
            }
        }
    }

    fn compile_property(&mut self, symbol: &E::Symbol) -> PropertyModel<E::Type> {
        let engine = self.engine;
        let name = engine.symbol_name(symbol);
        let optional = engine.symbol_flags(symbol).contains(SymbolFlags::OPTIONAL);
        let value = engine.declared_type_of_symbol(symbol);
        PropertyModel::new(name, optional, self.compile_nested(&value))
    }
}

/// Categories recognized by a single flag, with no payload.
fn classify_primitive<H>(flags: TypeFlags) -> Option<TypeData<H>> {
    let data = if flags.contains(TypeFlags::BIG_INT) {
        TypeData::BigInt
    } else if flags.contains(TypeFlags::ES_SYMBOL) {
        TypeData::EsSymbol
    } else if flags.contains(TypeFlags::UNIQUE_ES_SYMBOL) {
        TypeData::UniqueEsSymbol
    } else if flags.contains(TypeFlags::VOID) {
        TypeData::Void
    } else if flags.contains(TypeFlags::UNDEFINED) {
        TypeData::Undefined
    } else if flags.contains(TypeFlags::NULL) {
        TypeData::Null
    } else if flags.contains(TypeFlags::NEVER) {
        TypeData::Never
    } else if flags.contains(TypeFlags::TYPE_PARAMETER) {
        TypeData::TypeParameter
    } else {
        return None;
    };
    Some(data)
}

/// Categories recorded without expanding their structure.
fn classify_marker<H>(flags: TypeFlags) -> Option<TypeData<H>> {
    let data = if flags.contains(TypeFlags::INDEXED_ACCESS) {
        TypeData::IndexedAccess
    } else if flags.contains(TypeFlags::CONDITIONAL) {
        TypeData::Conditional
    } else if flags.contains(TypeFlags::SUBSTITUTION) {
        TypeData::Substitution
    } else if flags.contains(TypeFlags::NON_PRIMITIVE) {
        TypeData::NonPrimitive
    } else {
        return None;
    };
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tymo_model::TypeKind;

    #[test]
    fn primitive_rule_order() {
        let both = TypeFlags::BIG_INT | TypeFlags::NEVER;
        assert_eq!(classify_primitive::<()>(both).map(|d| d.kind()), Some(TypeKind::BigInt));
        assert_eq!(
            classify_primitive::<()>(TypeFlags::UNDEFINED | TypeFlags::NULL).map(|d| d.kind()),
            Some(TypeKind::Undefined)
        );
        assert!(classify_primitive::<()>(TypeFlags::OBJECT).is_none());
    }

    #[test]
    fn marker_rule_order() {
        let flags = TypeFlags::SUBSTITUTION | TypeFlags::CONDITIONAL;
        assert_eq!(
            classify_marker::<()>(flags).map(|d| d.kind()),
            Some(TypeKind::Conditional)
        );
        assert!(classify_marker::<()>(TypeFlags::INDEX).is_none());
        assert!(classify_marker::<()>(TypeFlags::TEMPLATE_LITERAL).is_none());
    }
}
