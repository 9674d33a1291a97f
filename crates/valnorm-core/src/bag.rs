//! `Bag`: a dynamic, untyped object with public fields known only at
//! runtime (the `stdClass`-equivalent mentioned in §4.5's default-step
//! table). Field order is insertion order.

use crate::engine::Engine;
use crate::error::NormalizeError;
use crate::node::{Key, Node};
use crate::reflect::Normalize;
use derive_more::Deref;
use std::any::{Any, TypeId};
use valnorm_types::{RuntimeKind, RuntimeSubject, TypeDescriptor};

///
/// Bag
/// An ordered collection of dynamically-named, dynamically-typed public
/// fields. Participates in cycle detection like a record, since a bag
/// field may itself hold another bag (or any boxed `Normalize` value)
/// reachable through a shared or cyclic graph.
///

#[derive(Default, Deref)]
#[repr(transparent)]
pub struct Bag(Vec<(String, Box<dyn Normalize>)>);

impl Bag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Re-inserting an existing name adds a second entry
    /// rather than replacing it — a bag has no identity-based dedup, it is
    /// purely an append log, matching a dynamic property bag's semantics.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Normalize) -> &mut Self {
        self.0.push((name.into(), Box::new(value)));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Normalize for Bag {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::Bag).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::AnyObject
    }

    fn default_normalize(&self, engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        let mut entries = Vec::with_capacity(self.0.len());
        for (name, value) in &self.0 {
            let node = engine.normalize_value(value.as_ref(), &[])?;
            entries.push((Key::String(name.clone()), node));
        }
        Ok(Node::Map(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn bag_normalizes_dynamic_fields_in_insertion_order() {
        let registry = Registry::new();
        let mut engine = Engine::new(&registry, crate::datetime::DateTimeFormat::default());

        let mut bag = Bag::new();
        bag.insert("name", "ada".to_string());
        bag.insert("age", 30_i32);

        let node = engine.normalize(&bag).unwrap();
        assert_eq!(
            node,
            Node::Map(vec![
                (Key::from("name"), Node::String("ada".to_string())),
                (Key::from("age"), Node::Int(30)),
            ])
        );
    }
}
