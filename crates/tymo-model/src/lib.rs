//! Canonical, serializable type model.
//!
//! A [`TypeModel`] is the detached projection of one engine type handle: a
//! closed sum of [`TypeData`] variants plus an optional back-reference to the
//! handle it came from. The back-reference never reaches serialized output.
//!
//! ```rust
//! use tymo_model::{PropertyModel, TypeData, TypeModel};
//!
//! let model = TypeModel::<()>::new(TypeData::Object {
//!     props: vec![
//!         PropertyModel::new("a", false, TypeModel::string()),
//!         PropertyModel::new("b", true, TypeModel::number()),
//!     ],
//! });
//!
//! assert_eq!(
//!     model.to_json_string().unwrap(),
//!     r#"{"kind":"object","props":[{"name":"a","optional":false,"kind":"string"},{"name":"b","optional":true,"kind":"number"}]}"#
//! );
//! ```

mod bigint;
mod kind;
mod model;
pub mod visitor;

pub use bigint::PseudoBigInt;
pub use kind::TypeKind;
pub use model::{IndexKeyType, IndexModel, PropertyModel, TypeData, TypeModel};
pub use visitor::{ModelVisitor, contains_kind, for_each_child, node_count, walk};
