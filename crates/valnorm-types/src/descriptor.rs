use std::any::TypeId;

///
/// RecordIdentity
/// Identifies a record type (or an abstraction a record declares it
/// implements) for `Record` matching. Rust has no struct inheritance, so
/// covariance on the "ancestor chain" is realized as: a concrete record's
/// `TypeId` plus a static list of abstraction `TypeId`s it declares via
/// `#[derive(Normalize)]`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RecordIdentity {
    pub type_id: TypeId,
    pub name: &'static str,
}

impl RecordIdentity {
    #[must_use]
    pub const fn new(type_id: TypeId, name: &'static str) -> Self {
        Self { type_id, name }
    }
}

///
/// EnumIdentity
/// Identifies an enumeration type for `Enum` matching.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct EnumIdentity {
    pub type_id: TypeId,
    pub name: &'static str,
}

impl EnumIdentity {
    #[must_use]
    pub const fn new(type_id: TypeId, name: &'static str) -> Self {
        Self { type_id, name }
    }
}

///
/// IntRefinement
/// Numeric predicates narrowing the `Int` descriptor (e.g. `positive-int`).
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum IntRefinement {
    Positive,
    Negative,
    NonNegative,
    NonPositive,
}

impl IntRefinement {
    #[must_use]
    pub const fn holds(self, value: i64) -> bool {
        match self {
            Self::Positive => value > 0,
            Self::Negative => value < 0,
            Self::NonNegative => value >= 0,
            Self::NonPositive => value <= 0,
        }
    }
}

///
/// TypeDescriptor
/// Algebraic description of a declared parameter type, used purely for
/// dispatch selection. No coercion is implied by a match.
///

#[derive(Clone, Debug)]
pub enum TypeDescriptor {
    Null,
    Bool,
    Int { refinement: Option<IntRefinement> },
    Float,
    String,
    Sequence(Box<TypeDescriptor>),
    Mapping(Box<TypeDescriptor>, Box<TypeDescriptor>),
    Record { identity: RecordIdentity },
    Enum { identity: EnumIdentity },
    Union(Vec<TypeDescriptor>),
    Intersection(Vec<TypeDescriptor>),
    AnyObject,
    Iterable,
    Callable,
    Any,
}

impl TypeDescriptor {
    #[must_use]
    pub fn int() -> Self {
        Self::Int { refinement: None }
    }

    #[must_use]
    pub const fn int_refined(refinement: IntRefinement) -> Self {
        Self::Int {
            refinement: Some(refinement),
        }
    }

    #[must_use]
    pub fn record(identity: RecordIdentity) -> Self {
        Self::Record { identity }
    }

    #[must_use]
    pub fn enum_(identity: EnumIdentity) -> Self {
        Self::Enum { identity }
    }
}
