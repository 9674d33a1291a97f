use crate::descriptor::{EnumIdentity, RecordIdentity, TypeDescriptor};
use std::any::TypeId;

///
/// RuntimeKind
/// Coarse structural shape of a runtime value, used for shallow matching
/// (the engine relies on recursion for element-level correctness — see
/// the Sequence/Mapping rules in the spec's Type Matcher section).
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuntimeKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Sequence,
    Mapping,
    Record,
    Enum,
    /// A `stdClass`-equivalent bag of dynamic public fields.
    Bag,
    DateTime,
    TimeZone,
    Callable,
}

///
/// RuntimeSubject
/// The effective type of a value, as seen by the matcher at dispatch time.
///

#[derive(Clone, Debug)]
pub struct RuntimeSubject {
    pub kind: RuntimeKind,
    pub type_id: Option<TypeId>,
    pub int_value: Option<i64>,
    pub record: Option<RecordIdentity>,
    pub ancestors: &'static [RecordIdentity],
    pub enum_identity: Option<EnumIdentity>,
}

impl RuntimeSubject {
    #[must_use]
    pub const fn new(kind: RuntimeKind) -> Self {
        Self {
            kind,
            type_id: None,
            int_value: None,
            record: None,
            ancestors: &[],
            enum_identity: None,
        }
    }

    #[must_use]
    pub const fn with_type_id(mut self, type_id: TypeId) -> Self {
        self.type_id = Some(type_id);
        self
    }

    #[must_use]
    pub const fn with_int_value(mut self, value: i64) -> Self {
        self.int_value = Some(value);
        self
    }

    #[must_use]
    pub const fn with_record(mut self, record: RecordIdentity, ancestors: &'static [RecordIdentity]) -> Self {
        self.record = Some(record);
        self.ancestors = ancestors;
        self
    }

    #[must_use]
    pub const fn with_enum_identity(mut self, identity: EnumIdentity) -> Self {
        self.enum_identity = Some(identity);
        self
    }

    const fn is_object_like(&self) -> bool {
        matches!(
            self.kind,
            RuntimeKind::Record
                | RuntimeKind::Enum
                | RuntimeKind::Bag
                | RuntimeKind::DateTime
                | RuntimeKind::TimeZone
        )
    }
}

/// Does runtime value `subject` satisfy declared parameter descriptor `d`?
///
/// Pure function over `(Descriptor, RuntimeKind)`: matching never coerces,
/// it only selects.
#[must_use]
pub fn matches(descriptor: &TypeDescriptor, subject: &RuntimeSubject) -> bool {
    match descriptor {
        TypeDescriptor::Any => true,
        TypeDescriptor::AnyObject => subject.is_object_like(),
        TypeDescriptor::Null => subject.kind == RuntimeKind::Null,
        TypeDescriptor::Bool => subject.kind == RuntimeKind::Bool,
        TypeDescriptor::Int { refinement } => {
            subject.kind == RuntimeKind::Int
                && refinement.is_none_or(|r| subject.int_value.is_some_and(|v| r.holds(v)))
        }
        TypeDescriptor::Float => subject.kind == RuntimeKind::Float,
        TypeDescriptor::String => subject.kind == RuntimeKind::String,
        TypeDescriptor::Sequence(_) => subject.kind == RuntimeKind::Sequence,
        TypeDescriptor::Mapping(_, _) => {
            matches!(subject.kind, RuntimeKind::Mapping | RuntimeKind::Bag)
        }
        TypeDescriptor::Record { identity } => {
            subject.record == Some(*identity) || subject.ancestors.contains(identity)
        }
        TypeDescriptor::Enum { identity } => subject.enum_identity == Some(*identity),
        TypeDescriptor::Union(descriptors) => descriptors.iter().any(|d| matches(d, subject)),
        TypeDescriptor::Intersection(descriptors) => {
            descriptors.iter().all(|d| matches(d, subject))
        }
        TypeDescriptor::Iterable => {
            matches!(subject.kind, RuntimeKind::Sequence | RuntimeKind::Mapping)
        }
        TypeDescriptor::Callable => subject.kind == RuntimeKind::Callable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::IntRefinement;

    #[test]
    fn int_refinement_gates_the_match() {
        let subject = RuntimeSubject::new(RuntimeKind::Int).with_int_value(42);

        assert!(matches(&TypeDescriptor::int(), &subject));
        assert!(matches(
            &TypeDescriptor::int_refined(IntRefinement::Positive),
            &subject
        ));
        assert!(!matches(
            &TypeDescriptor::int_refined(IntRefinement::Negative),
            &subject
        ));
    }

    #[test]
    fn record_matches_declared_ancestor() {
        use std::any::TypeId;

        #[derive(Debug)]
        struct Dog;
        #[derive(Debug)]
        struct Animal;

        let animal_id = RecordIdentity::new(TypeId::of::<Animal>(), "Animal");
        let dog_id = RecordIdentity::new(TypeId::of::<Dog>(), "Dog");
        static ANCESTORS: &[RecordIdentity] = &[];

        let subject = RuntimeSubject::new(RuntimeKind::Record)
            .with_record(dog_id, ANCESTORS)
            .with_type_id(TypeId::of::<Dog>());

        assert!(matches(&TypeDescriptor::record(dog_id), &subject));
        assert!(!matches(&TypeDescriptor::record(animal_id), &subject));
    }

    #[test]
    fn union_matches_if_any_component_does() {
        let subject = RuntimeSubject::new(RuntimeKind::String);
        let d = TypeDescriptor::Union(vec![TypeDescriptor::Int { refinement: None }, TypeDescriptor::String]);
        assert!(matches(&d, &subject));
    }
}
