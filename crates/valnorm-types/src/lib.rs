//! Type descriptor model and matcher for `valnorm`'s dispatch engine.
//!
//! This crate has no knowledge of normalization itself — it only answers
//! "does this runtime value satisfy this declared parameter type?" — so it
//! can be depended on by both the derive macro and the runtime engine
//! without a cycle.

mod descriptor;
mod matcher;

pub use descriptor::{EnumIdentity, IntRefinement, RecordIdentity, TypeDescriptor};
pub use matcher::{RuntimeKind, RuntimeSubject, matches};
