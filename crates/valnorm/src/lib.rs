//! # valnorm
//!
//! `valnorm` is the **public facade crate** for the value normalizer. It is
//! the recommended dependency for downstream code: configure a
//! [`NormalizerBuilder`], `.build()` it into a [`Normalizer`], then call
//! [`Normalizer::normalize`].
//!
//! ## Crate layout
//!
//! - `builder`
//!   The configuration façade: `NormalizerBuilder` and `Normalizer`.
//!
//! - `attributes`
//!   Default attribute-bound key transformers shipped out of the box
//!   (`RenamePropertyKey`, `AddPrefixToPropertyKey`, `RecasePropertyKey`).
//!
//! Low-level dispatch, the registry, and the engine live in `valnorm-core`
//! and are re-exported here for downstream code that needs to name their
//! types directly (registering a free transformer, implementing a custom
//! attribute).
//!
//! ## Prelude
//!
//! `prelude` is an opinionated glob-import covering the types most call
//! sites need: the derive macro, the builder, the canonical tree types, and
//! the error taxonomy.

mod attributes;
mod builder;

pub use attributes::{AddPrefixToPropertyKey, RecasePropertyKey, RenamePropertyKey};
pub use builder::{Normalizer, NormalizerBuilder};
pub use valnorm_derive::Normalize;
pub use valnorm_utils::Case;

// core re-exports, so downstream code implementing a custom transformer or
// attribute does not need to depend on valnorm-core directly.
pub use valnorm_core::{
    bag::Bag,
    datetime::{DateTime, DateTimeFormat, TimeZone},
    dispatch::Next,
    engine::Engine,
    error::{Code, NormalizeError},
    node::{Key, Node},
    output::{self, OutputNode},
    reflect::{
        AttributeEntry, AttributeInstance, AttributeKind, EnumRepr, FieldDescriptor, KeyAttribute,
        KeyParamKind, Normalize as Reflect, ValueAttribute,
    },
    registry::Registry,
};
pub use valnorm_types::{
    self as types, EnumIdentity, IntRefinement, RecordIdentity, RuntimeKind, RuntimeSubject,
    TypeDescriptor,
};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// Glob-import for typical call sites: the derive macro, the builder, the
/// canonical tree types, and the error taxonomy.
///

pub mod prelude {
    pub use crate::{
        AddPrefixToPropertyKey, Bag, Case, DateTime, DateTimeFormat, Key, Node, Normalize,
        NormalizerBuilder, RecasePropertyKey, RenamePropertyKey, TimeZone,
    };
    pub use valnorm_core::error::{Code, NormalizeError};
}
