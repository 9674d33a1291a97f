//! The Transformer Registry: accumulates free-transformer and
//! attribute-identity registrations during configuration (see
//! `valnorm::NormalizerBuilder`), then answers the Dispatch Planner's
//! queries at normalize time.

use crate::dispatch::Next;
use crate::engine::Engine;
use crate::error::NormalizeError;
use crate::node::Node;
use crate::reflect::{AttributeEntry, Normalize};
use std::any::TypeId;
use std::collections::HashSet;
use valnorm_types::TypeDescriptor;

/// One registered free transformer.
pub struct ValueRegistration {
    pub parameter: TypeDescriptor,
    /// `Some` when registered against a concrete Rust type (the common
    /// case); `None` for transformers registered purely by descriptor
    /// (e.g. against `AnyObject` or a `Union`), which must match every
    /// candidate subject by descriptor alone.
    pub type_id_filter: Option<TypeId>,
    pub priority: i32,
    pub insertion_index: u64,
    pub invoke:
        Box<dyn Fn(&dyn Normalize, Next<'_, '_>, &mut Engine<'_>) -> Result<Node, NormalizeError>>,
    pub name: &'static str,
}

///
/// Registry
/// Built once by `NormalizerBuilder`, then frozen behind an `Arc` and
/// shared by every `Engine` the built `Normalizer` creates.
///

#[derive(Default)]
pub struct Registry {
    value_registrations: Vec<ValueRegistration>,
    registered_identities: HashSet<TypeId>,
    next_insertion_index: u64,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn value_registrations(&self) -> &[ValueRegistration] {
        &self.value_registrations
    }

    fn next_index(&mut self) -> u64 {
        let index = self.next_insertion_index;
        self.next_insertion_index += 1;
        index
    }

    /// Register a free transformer against a concrete Rust type `V`,
    /// ignoring `next` — a leaf transformer that fully replaces the
    /// default step.
    pub fn register_transformer<V, F>(&mut self, priority: i32, f: F)
    where
        V: Normalize,
        F: Fn(&V) -> Result<Node, NormalizeError> + 'static,
    {
        self.register_transformer_with_next::<V, _>(priority, move |value, _next, _engine| {
            f(value)
        });
    }

    /// Register a free transformer against a concrete Rust type `V` that
    /// may delegate to `next`.
    pub fn register_transformer_with_next<V, F>(&mut self, priority: i32, f: F)
    where
        V: Normalize,
        F: Fn(&V, Next<'_, '_>, &mut Engine<'_>) -> Result<Node, NormalizeError> + 'static,
    {
        self.register_transformer_for_descriptor::<V, _>(V::static_descriptor(), priority, f);
    }

    /// Register a free transformer against a concrete Rust type `V`, but
    /// narrowed by an explicit descriptor (e.g. a refined `Int`) rather
    /// than `V`'s own static descriptor.
    pub fn register_transformer_for_descriptor<V, F>(
        &mut self,
        descriptor: TypeDescriptor,
        priority: i32,
        f: F,
    ) where
        V: Normalize,
        F: Fn(&V, Next<'_, '_>, &mut Engine<'_>) -> Result<Node, NormalizeError> + 'static,
    {
        let insertion_index = self.next_index();
        let invoke = move |value: &dyn Normalize, next: Next<'_, '_>, engine: &mut Engine<'_>| {
            let value = value
                .as_any()
                .downcast_ref::<V>()
                .expect("type_id_filter guarantees this value is a V");
            f(value, next, engine)
        };
        self.value_registrations.push(ValueRegistration {
            parameter: descriptor,
            type_id_filter: Some(TypeId::of::<V>()),
            priority,
            insertion_index,
            invoke: Box::new(invoke),
            name: std::any::type_name::<V>(),
        });
    }

    /// Register a free transformer purely by descriptor, matched against
    /// every candidate's runtime subject regardless of concrete Rust
    /// type. The only way to target `AnyObject`, `Iterable`, or a
    /// `Union`/`Intersection` with a single registration.
    pub fn register_transformer_for_any<F>(
        &mut self,
        descriptor: TypeDescriptor,
        priority: i32,
        name: &'static str,
        f: F,
    ) where
        F: Fn(&dyn Normalize, Next<'_, '_>, &mut Engine<'_>) -> Result<Node, NormalizeError> + 'static,
    {
        let insertion_index = self.next_index();
        self.value_registrations.push(ValueRegistration {
            parameter: descriptor,
            type_id_filter: None,
            priority,
            insertion_index,
            invoke: Box::new(f),
            name,
        });
    }

    /// Record `A`'s `TypeId` as eligible for attribute-driven dispatch.
    /// Used both for a concrete attribute class and for a marker type
    /// standing in for an abstraction the attribute declares (mirrors
    /// registering an interface, not just a final class).
    pub fn register_attribute<A: 'static>(&mut self) {
        self.registered_identities.insert(TypeId::of::<A>());
    }

    #[must_use]
    pub(crate) fn is_registered(&self, id: &TypeId) -> bool {
        self.registered_identities.contains(id)
    }

    #[must_use]
    pub(crate) fn is_attribute_eligible(&self, entry: &AttributeEntry) -> bool {
        self.is_registered(&entry.identity)
            || entry.abstractions.iter().any(|a| self.is_registered(a))
    }
}
