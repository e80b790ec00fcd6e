//! Compiles type-checker type handles into the tymo type model.
//!
//! An engine exposes its type graph through [`TypeIntrospection`]; the
//! [`TypeModelCompiler`] walks it from one handle and returns a
//! [`TypeModel`] owned by the caller.
//!
//! ```
//! use tymo_compiler::arena::{TypeArena, TypeId};
//! use tymo_compiler::classify;
//!
//! let mut arena = TypeArena::new();
//! let id = arena.property("id", TypeId::NUMBER);
//! let tags = arena.array(TypeId::STRING);
//! let tags = arena.optional_property("tags", tags);
//! let user = arena.object(vec![id, tags]);
//!
//! let model = classify(&arena, &user);
//! assert_eq!(
//!     model.to_json_string().unwrap(),
//!     r#"{"kind":"object","props":[{"name":"id","optional":false,"kind":"number"},{"name":"tags","optional":true,"kind":"array","type":{"kind":"string"}}]}"#
//! );
//! ```

pub mod arena;
mod compiler;
mod flags;
mod introspection;
mod options;
pub mod recursion;

pub use compiler::{TypeModelCompiler, classify};
pub use flags::{ObjectFlags, SymbolFlags, TypeFlags};
pub use introspection::{ARRAY_SYMBOL_NAME, TypeIntrospection};
pub use options::{CompilerOptions, CyclePolicy};

pub use tymo_model::{
    IndexKeyType, IndexModel, PropertyModel, PseudoBigInt, TypeData, TypeKind, TypeModel,
};
