//! Runtime for `valnorm`: the transformer registry, dispatch planner, and
//! normalizer engine.
//!
//! This crate has no knowledge of user-facing configuration ergonomics (see
//! the `valnorm` façade crate) or of how `Normalize` gets implemented for a
//! user's own records (see `valnorm-derive`) — it only defines the traits
//! and the engine that drives them.

pub mod bag;
pub mod collection;
pub mod cycle;
pub mod datetime;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod node;
pub mod output;
pub mod primitives;
pub mod reflect;
pub mod registry;

///
/// Prelude
/// Domain vocabulary needed to implement `Normalize` by hand or to build a
/// `Registry` directly (most users go through the `valnorm` façade instead).
///

pub mod prelude {
    pub use crate::{
        bag::Bag,
        datetime::{DateTime, DateTimeFormat, TimeZone},
        dispatch::Next,
        engine::Engine,
        error::{Code, NormalizeError},
        node::{Key, Node},
        reflect::{
            AttributeEntry, AttributeInstance, AttributeKind, EnumRepr, FieldDescriptor,
            KeyAttribute, KeyParamKind, Normalize, ValueAttribute,
        },
        registry::Registry,
    };
}
