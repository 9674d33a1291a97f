//! The Normalizer Engine: drives one `normalize` call end to end — chain
//! assembly, cycle detection, and the recursive default step for
//! containers.

use crate::cycle::{object_id, CycleGuard};
use crate::datetime::DateTimeFormat;
use crate::dispatch::{build_chain, resolve_key};
use crate::error::NormalizeError;
use crate::node::{Key, Node};
use crate::reflect::{AttributeEntry, Normalize};
use crate::registry::Registry;
use valnorm_types::RuntimeKind;

///
/// Engine
/// Single-use per top-level `normalize` call — construct one, call
/// `normalize` once, discard it. Not `Send`/`Sync`: the crate's
/// concurrency model is "build once, normalize from many threads each
/// with their own `Engine`", never a shared mutable engine (see
/// SPEC_FULL.md §5).
///

pub struct Engine<'r> {
    registry: &'r Registry,
    cycle: CycleGuard,
    datetime_format: DateTimeFormat,
}

impl<'r> Engine<'r> {
    #[must_use]
    pub fn new(registry: &'r Registry, datetime_format: DateTimeFormat) -> Self {
        Self {
            registry,
            cycle: CycleGuard::new(),
            datetime_format,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    #[must_use]
    pub fn datetime_format(&self) -> &DateTimeFormat {
        &self.datetime_format
    }

    /// Normalize a top-level value (no enclosing field, so no field-level
    /// attributes apply).
    pub fn normalize(&mut self, value: &dyn Normalize) -> Result<Node, NormalizeError> {
        self.normalize_value(value, &[])
    }

    /// Normalize a value reached as a record field, sequence element, or
    /// mapping value, with the field/element's own attribute entries (if
    /// any) in scope.
    pub fn normalize_value(
        &mut self,
        value: &dyn Normalize,
        field_attrs: &'static [AttributeEntry],
    ) -> Result<Node, NormalizeError> {
        let subject = value.runtime_subject();
        let guards_identity = matches!(subject.kind, RuntimeKind::Record | RuntimeKind::Bag);

        let id = object_id(value);
        if guards_identity && !self.cycle.push(id) {
            let name = subject
                .record
                .map_or("<bag>", |identity| identity.name);
            return Err(NormalizeError::circular_reference(name));
        }

        let chain = build_chain(
            self.registry,
            &subject,
            field_attrs,
            value.type_attributes(),
        );
        let result = match chain {
            Ok(chain) => chain.invoke(0, value, self),
            Err(err) => Err(err),
        };

        if guards_identity {
            self.cycle.pop(id);
        }
        result
    }

    /// Resolve a record field's output key by running its key-transformer
    /// chain.
    pub fn resolve_field_key(
        &self,
        field_name: &'static str,
        field_attrs: &'static [AttributeEntry],
    ) -> Result<Key, NormalizeError> {
        resolve_key(self.registry, field_name, field_attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::FieldDescriptor;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;
    use valnorm_types::{RecordIdentity, RuntimeKind, RuntimeSubject, TypeDescriptor};

    // Hand-rolled `Normalize` impls rather than `#[derive(Normalize)]`: these
    // nodes reference each other through `Rc<RefCell<...>>`, which the
    // derive macro's generated accessors don't peel (only `Rc`/`Arc`/`Box`
    // directly wrapping the field type) — exercising the engine's cycle
    // detection doesn't need the derive macro at all.

    struct NodeA {
        // Two edges to the same shared child, used by the shared-DAG test;
        // the cycle test only ever populates one.
        b1: RefCell<Option<Rc<NodeB>>>,
        b2: RefCell<Option<Rc<NodeB>>>,
    }

    struct NodeB {
        a: RefCell<Option<Rc<NodeA>>>,
    }

    fn node_a_identity() -> RecordIdentity {
        RecordIdentity::new(TypeId::of::<NodeA>(), "NodeA")
    }

    fn node_b_identity() -> RecordIdentity {
        RecordIdentity::new(TypeId::of::<NodeB>(), "NodeB")
    }

    fn resolve_child<'a, T: Normalize>(slot: &'a RefCell<Option<Rc<T>>>) -> &'a dyn Normalize {
        match slot.borrow().as_ref() {
            Some(rc) => {
                let raw: *const T = Rc::as_ptr(rc);
                // SAFETY: `rc`'s allocation is owned by a field of the node
                // `slot` lives inside, which outlives this call by
                // construction (the traversal only ever holds shared
                // references into the graph, never moves it).
                unsafe { &*raw as &dyn Normalize }
            }
            None => &() as &dyn Normalize,
        }
    }

    static NODE_A_FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor {
            name: "b1",
            declared: || TypeDescriptor::AnyObject,
            get: |any| resolve_child(&any.downcast_ref::<NodeA>().unwrap().b1),
            attributes: || &[],
            flatten: false,
        },
        FieldDescriptor {
            name: "b2",
            declared: || TypeDescriptor::AnyObject,
            get: |any| resolve_child(&any.downcast_ref::<NodeA>().unwrap().b2),
            attributes: || &[],
            flatten: false,
        },
    ];

    impl Normalize for NodeA {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn runtime_subject(&self) -> RuntimeSubject {
            RuntimeSubject::new(RuntimeKind::Record)
                .with_type_id(TypeId::of::<Self>())
                .with_record(node_a_identity(), &[])
        }

        fn static_descriptor() -> TypeDescriptor {
            TypeDescriptor::record(node_a_identity())
        }

        fn default_normalize(&self, engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
            crate::reflect::normalize_record(NODE_A_FIELDS, self.as_any(), engine)
        }

        fn fields(&self) -> &'static [FieldDescriptor] {
            NODE_A_FIELDS
        }
    }

    static NODE_B_FIELDS: &[FieldDescriptor] = &[FieldDescriptor {
        name: "a",
        declared: || TypeDescriptor::AnyObject,
        get: |any| resolve_child(&any.downcast_ref::<NodeB>().unwrap().a),
        attributes: || &[],
        flatten: false,
    }];

    impl Normalize for NodeB {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn runtime_subject(&self) -> RuntimeSubject {
            RuntimeSubject::new(RuntimeKind::Record)
                .with_type_id(TypeId::of::<Self>())
                .with_record(node_b_identity(), &[])
        }

        fn static_descriptor() -> TypeDescriptor {
            TypeDescriptor::record(node_b_identity())
        }

        fn default_normalize(&self, engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
            crate::reflect::normalize_record(NODE_B_FIELDS, self.as_any(), engine)
        }

        fn fields(&self) -> &'static [FieldDescriptor] {
            NODE_B_FIELDS
        }
    }

    #[test]
    fn circular_reference_raises_the_structural_error() {
        let a = Rc::new(NodeA {
            b1: RefCell::new(None),
            b2: RefCell::new(None),
        });
        let b = Rc::new(NodeB { a: RefCell::new(None) });
        *a.b1.borrow_mut() = Some(Rc::clone(&b));
        *b.a.borrow_mut() = Some(Rc::clone(&a));

        let registry = Registry::new();
        let mut engine = Engine::new(&registry, DateTimeFormat::default());
        let err = engine.normalize(a.as_ref()).unwrap_err();
        assert_eq!(
            err.code(),
            crate::error::Code::CircularReferenceFoundDuringNormalization
        );
        assert!(err.to_string().contains("NodeA"));
    }

    #[test]
    fn shared_dag_without_a_cycle_normalizes_successfully() {
        let shared = Rc::new(NodeB { a: RefCell::new(None) });
        let a = NodeA {
            b1: RefCell::new(Some(Rc::clone(&shared))),
            b2: RefCell::new(Some(Rc::clone(&shared))),
        };

        let registry = Registry::new();
        let mut engine = Engine::new(&registry, DateTimeFormat::default());
        assert!(engine.normalize(&a).is_ok());
    }
}
