//! The Orchestration façade (spec §2 component 9): accumulates
//! configuration into a `NormalizerBuilder`, then freezes it into a
//! `Normalizer` bound to a single entry point, `normalize(value)`.

use std::sync::Arc;
use valnorm_core::datetime::DateTimeFormat;
use valnorm_core::dispatch::Next;
use valnorm_core::engine::Engine;
use valnorm_core::error::NormalizeError;
use valnorm_core::node::Node;
use valnorm_core::output::{self, OutputNode};
use valnorm_core::reflect::Normalize;
use valnorm_core::registry::Registry;
use valnorm_types::TypeDescriptor;

///
/// NormalizerBuilder
/// Configuration-accumulation façade. The Registry it wraps is mutable
/// until `.build()`, at which point it is frozen behind an `Arc` and
/// shared read-only by every `Engine` the returned `Normalizer` creates
/// (§5's "façade hands a frozen snapshot to the Engine").
///

#[derive(Default)]
pub struct NormalizerBuilder {
    registry: Registry,
    datetime_format: Option<DateTimeFormat>,
}

impl NormalizerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a free transformer against a concrete Rust type `V`,
    /// ignoring `next`.
    #[must_use]
    pub fn register_transformer<V, F>(mut self, priority: i32, f: F) -> Self
    where
        V: Normalize,
        F: Fn(&V) -> Result<Node, NormalizeError> + 'static,
    {
        self.registry.register_transformer::<V, F>(priority, f);
        self
    }

    /// Register a free transformer against a concrete Rust type `V` that
    /// may delegate to `next`.
    #[must_use]
    pub fn register_transformer_with_next<V, F>(mut self, priority: i32, f: F) -> Self
    where
        V: Normalize,
        F: Fn(&V, Next<'_, '_>, &mut Engine<'_>) -> Result<Node, NormalizeError> + 'static,
    {
        self.registry.register_transformer_with_next::<V, F>(priority, f);
        self
    }

    /// Register a free transformer against a concrete Rust type `V`,
    /// narrowed by an explicit descriptor (e.g. a refined `Int`).
    #[must_use]
    pub fn register_transformer_for_descriptor<V, F>(
        mut self,
        descriptor: TypeDescriptor,
        priority: i32,
        f: F,
    ) -> Self
    where
        V: Normalize,
        F: Fn(&V, Next<'_, '_>, &mut Engine<'_>) -> Result<Node, NormalizeError> + 'static,
    {
        self.registry.register_transformer_for_descriptor::<V, F>(descriptor, priority, f);
        self
    }

    /// Register a free transformer purely by descriptor (`AnyObject`,
    /// `Iterable`, `Union`, ...), matched by runtime subject alone.
    #[must_use]
    pub fn register_transformer_for_any<F>(
        mut self,
        descriptor: TypeDescriptor,
        priority: i32,
        name: &'static str,
        f: F,
    ) -> Self
    where
        F: Fn(&dyn Normalize, Next<'_, '_>, &mut Engine<'_>) -> Result<Node, NormalizeError> + 'static,
    {
        self.registry.register_transformer_for_any(descriptor, priority, name, f);
        self
    }

    /// Make an attribute class (or abstraction marker) `A` eligible for
    /// attribute-driven dispatch (invariant 6).
    #[must_use]
    pub fn register_attribute<A: 'static>(mut self) -> Self {
        self.registry.register_attribute::<A>();
        self
    }

    /// Override the default `DateTime` rendering. Per-value transformers
    /// still take priority regardless of this setting — this only changes
    /// what the Default step falls back to.
    #[must_use]
    pub const fn date_time_format(mut self, format: DateTimeFormat) -> Self {
        self.datetime_format = Some(format);
        self
    }

    /// Freeze accumulated configuration into a `Normalizer`.
    #[must_use]
    pub fn build(self) -> Normalizer {
        Normalizer {
            registry: Arc::new(self.registry),
            datetime_format: self.datetime_format.unwrap_or_default(),
        }
    }
}

///
/// Normalizer
/// The single entry point: `normalize(value)`. Cheap to clone (an `Arc`
/// clone) and safe to share across threads — each call constructs its own
/// `Engine` with a fresh `CycleGuard`, so concurrent calls never interfere
/// (§5: no shared mutable state crosses normalization calls).
///

#[derive(Clone)]
pub struct Normalizer {
    registry: Arc<Registry>,
    datetime_format: DateTimeFormat,
}

impl Normalizer {
    /// Normalize a value into the canonical `Node` tree.
    pub fn normalize<T: Normalize>(&self, value: &T) -> Result<Node, NormalizeError> {
        self.normalize_dyn(value)
    }

    /// Normalize a type-erased value — the entry point `#[derive(Normalize)]`
    /// and container impls recurse through internally.
    pub fn normalize_dyn(&self, value: &dyn Normalize) -> Result<Node, NormalizeError> {
        let mut engine = Engine::new(&self.registry, self.datetime_format);
        engine.normalize(value)
    }

    /// Normalize a value and materialize it into the array output form
    /// (§4.6): sequences become integer-keyed maps, maps keep insertion
    /// order.
    pub fn normalize_to_array<T: Normalize>(&self, value: &T) -> Result<OutputNode, NormalizeError> {
        self.normalize(value).map(|node| output::to_array_form(&node))
    }
}
