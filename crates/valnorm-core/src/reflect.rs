//! The Reflection Adapter: the `Normalize` trait every normalizable value
//! implements (by hand for leaves, via `#[derive(Normalize)]` for records
//! and enums), plus the attribute-binding surface attached to record types
//! and fields.

use crate::{engine::Engine, error::NormalizeError, node::Node};
use std::any::{Any, TypeId};
use valnorm_types::{RuntimeSubject, TypeDescriptor};

///
/// EnumRepr
/// The backing representation of an enum variant, used by the Engine's
/// default step for `RuntimeKind::Enum`.
///

#[derive(Clone, Debug)]
pub enum EnumRepr {
    /// A pure (data-less, unbacked) variant: normalizes to its declared name.
    Pure(&'static str),
    StringBacked(String),
    IntBacked(i64),
}

///
/// FieldDescriptor
/// One field of a record type, in declaration order (flattened base fields
/// first — see `Normalize::fields` on the owning record).
///

pub struct FieldDescriptor {
    pub name: &'static str,
    pub declared: fn() -> TypeDescriptor,
    pub get: fn(&dyn Any) -> &dyn Normalize,
    pub attributes: fn() -> &'static [AttributeEntry],
    /// `#[normalize(flatten)]`: this field's own normalized entries are
    /// spliced directly into the owning record's map rather than nested
    /// under `name`. Declaring the flattened field first in the struct
    /// yields the spec's "ancestor-first" ordering without Rust needing
    /// real struct inheritance.
    pub flatten: bool,
}

///
/// AttributeKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttributeKind {
    Value,
    Key,
}

///
/// AttributeEntry
/// One attribute instance attached (by the derive macro) to a type or a
/// field, discovered in source order.
///

pub struct AttributeEntry {
    pub kind: AttributeKind,
    pub identity: TypeId,
    pub abstractions: &'static [TypeId],
    pub instance: AttributeInstance,
    /// The attribute class's name, used only in error messages.
    pub name: &'static str,
}

pub enum AttributeInstance {
    Value(Box<dyn ValueAttribute + Send + Sync>),
    Key(Box<dyn KeyAttribute + Send + Sync>),
}

///
/// KeyParamKind
/// The declared parameter kind of a key-transformer attribute's
/// `normalize_key` method. `Other` exists only so a misbehaving
/// implementation can be rejected by the registry (invariant 2: a
/// key-transformer parameter, if present, must be string or integer).
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyParamKind {
    None,
    String,
    Int,
    Other,
}

///
/// ValueAttribute
/// An attribute class registered as a value-transformer producer. Mirrors
/// the attribute contract's `normalize(value[, next])` method.
///

pub trait ValueAttribute: Send + Sync + 'static {
    /// Declared arity of `normalize`: must be 1 or 2.
    fn param_count(&self) -> u8 {
        2
    }

    /// Whether the second parameter (if declared) is the `next`
    /// continuation. Only meaningful when `param_count() == 2`.
    fn takes_next(&self) -> bool {
        true
    }

    /// The descriptor of `normalize`'s first parameter.
    fn parameter(&self) -> TypeDescriptor {
        TypeDescriptor::Any
    }

    fn normalize(
        &self,
        value: &dyn Normalize,
        next: crate::dispatch::Next<'_, '_>,
        engine: &mut Engine<'_>,
    ) -> Result<Node, NormalizeError>;

    /// This attribute instance's own concrete identity — used by the
    /// registry to decide whether it (or one of its `abstractions`) has
    /// been registered (invariant 6). `TypeId::of` needs no `Sized` bound,
    /// so this default works even when called through `&dyn ValueAttribute`
    /// — it resolves to the *implementing* type, monomorphized per impl.
    fn identity(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Abstractions (marker types) this attribute declares it implements,
    /// for registration by interface rather than concrete class.
    fn abstractions(&self) -> &'static [TypeId] {
        &[]
    }

    /// Name surfaced in configuration-error messages.
    fn attribute_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

///
/// KeyAttribute
/// An attribute class registered as a key-transformer producer. Mirrors
/// the attribute contract's `normalizeKey([key])` method.
///

pub trait KeyAttribute: Send + Sync + 'static {
    /// Declared arity of `normalize_key`: must be 0 or 1.
    fn param_count(&self) -> u8 {
        1
    }

    /// The declared type of the single parameter, when `param_count() == 1`.
    fn parameter_kind(&self) -> KeyParamKind {
        KeyParamKind::String
    }

    /// Produce the next key in the chain. `input` is `None` when this
    /// attribute is first in the chain and declares zero parameters — in
    /// that case the implementation must substitute its own name.
    fn normalize_key(&self, input: Option<crate::node::Key>) -> crate::node::Key;

    /// This attribute instance's own concrete identity. See
    /// `ValueAttribute::identity`.
    fn identity(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Abstractions (marker types) this attribute declares it implements.
    fn abstractions(&self) -> &'static [TypeId] {
        &[]
    }

    /// Name surfaced in configuration-error messages.
    fn attribute_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

///
/// Normalize
/// The Reflection Adapter's core capability: every value the engine can
/// visit implements this, either directly (leaves) or via
/// `#[derive(Normalize)]` (records, enums).
///

pub trait Normalize: 'static {
    fn as_any(&self) -> &dyn Any;

    /// The effective runtime type of this value, used by the matcher.
    fn runtime_subject(&self) -> RuntimeSubject;

    /// The static declared type of `Self`, used to select free
    /// transformers registered against a concrete Rust type.
    fn static_descriptor() -> TypeDescriptor
    where
        Self: Sized;

    /// The default normalization for this value's kind (see spec §4.5).
    /// Transformers wrap this; it is never called directly by user code.
    fn default_normalize(&self, engine: &mut Engine<'_>) -> Result<Node, NormalizeError>;

    /// Record fields, ancestor (flattened) fields first. Empty for
    /// non-record kinds.
    fn fields(&self) -> &'static [FieldDescriptor] {
        &[]
    }

    /// Class-level attributes, in source order (ancestor classes' own
    /// attributes would be appended here too, were struct inheritance
    /// expressible in Rust — see SPEC_FULL.md §4.1).
    fn type_attributes(&self) -> &'static [AttributeEntry] {
        &[]
    }

    /// The backing representation of an enum variant. Only meaningful
    /// when `runtime_subject().kind == RuntimeKind::Enum`.
    fn enum_representation(&self) -> Option<EnumRepr> {
        None
    }
}

/// Normalize a record's fields into a `Node::Map`, ancestor fields first.
/// Called from derive-generated `default_normalize` bodies — never
/// invoked directly from a transformer.
pub fn normalize_record(
    fields: &'static [FieldDescriptor],
    subject_any: &dyn Any,
    engine: &mut Engine<'_>,
) -> Result<Node, NormalizeError> {
    let mut entries = Vec::with_capacity(fields.len());
    for field in fields {
        let value = (field.get)(subject_any);
        let field_attrs = (field.attributes)();

        if field.flatten {
            // Splice the flattened field's own entries straight into this
            // record's map instead of nesting them under `field.name` —
            // declaring the flattened field first yields ancestor-first
            // ordering without Rust needing real struct inheritance.
            if let Node::Map(inner) = engine.normalize_value(value, field_attrs)? {
                entries.extend(inner);
            }
            continue;
        }

        let key = engine.resolve_field_key(field.name, field_attrs)?;
        let node = engine.normalize_value(value, field_attrs)?;
        entries.push((key, node));
    }
    Ok(Node::Map(entries))
}

/// Render an enum variant per §4.5: pure variants render their declared
/// name, string-backed variants their backing string, integer-backed
/// variants their backing integer. Called from derive-generated
/// `default_normalize` bodies for enum types.
#[must_use]
pub fn normalize_enum(repr: &EnumRepr) -> Node {
    match repr {
        EnumRepr::Pure(name) => Node::String((*name).to_string()),
        EnumRepr::StringBacked(s) => Node::String(s.clone()),
        EnumRepr::IntBacked(i) => Node::Int(*i),
    }
}

/// A value whose kind the normalizer fundamentally cannot render — a raw
/// callable or OS resource handle, in the spec's vocabulary. Matching
/// `RuntimeKind::Callable` always raises `TypeUnhandledByNormalizer`; there
/// is no default rendering to fall back to (§4.5's default-step table).
pub struct Unrepresentable {
    pub kind_name: &'static str,
}

impl Normalize for Unrepresentable {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> valnorm_types::RuntimeSubject {
        valnorm_types::RuntimeSubject::new(valnorm_types::RuntimeKind::Callable)
    }

    fn static_descriptor() -> TypeDescriptor
    where
        Self: Sized,
    {
        TypeDescriptor::Callable
    }

    fn default_normalize(&self, _engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        Err(NormalizeError::type_unhandled(self.kind_name))
    }
}
