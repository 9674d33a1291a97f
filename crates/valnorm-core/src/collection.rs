//! `Normalize` impls for the container kinds: optional values, ordered
//! sequences, and string/int-keyed mappings.
//!
//! None of these guard cycle-detection identity themselves (see
//! `engine::normalize_value`): a `Vec`/`Option`/`Map` is a transparent
//! container, not an object with its own identity, so the *field or
//! element* it wraps is what might need the cycle guard.

use crate::engine::Engine;
use crate::error::NormalizeError;
use crate::node::{Key, Node};
use crate::reflect::{AttributeEntry, EnumRepr, FieldDescriptor, Normalize};
use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use valnorm_types::{RuntimeKind, RuntimeSubject, TypeDescriptor};

///
/// `Option<T>` normalizes to `null` when absent. When present, dispatch for
/// `T` already ran (the chain was built from `runtime_subject`, which
/// delegates to the inner value), so the default step simply finishes `T`'s
/// own default rendering rather than re-entering dispatch.
///

impl<T: Normalize> Normalize for Option<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        self.as_ref().map_or_else(
            || RuntimeSubject::new(RuntimeKind::Null).with_type_id(TypeId::of::<Self>()),
            Normalize::runtime_subject,
        )
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::Union(vec![TypeDescriptor::Null, T::static_descriptor()])
    }

    fn default_normalize(&self, engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        self.as_ref()
            .map_or(Ok(Node::Null), |value| value.default_normalize(engine))
    }

    fn fields(&self) -> &'static [FieldDescriptor] {
        self.as_ref().map_or(&[], Normalize::fields)
    }

    fn type_attributes(&self) -> &'static [AttributeEntry] {
        self.as_ref().map_or(&[], Normalize::type_attributes)
    }

    fn enum_representation(&self) -> Option<EnumRepr> {
        self.as_ref().and_then(Normalize::enum_representation)
    }
}

///
/// `Vec<T>` normalizes to an index-ordered sequence; element keys are
/// discarded (§4.5 "sequence/iterable with non-string keys").
///

impl<T: Normalize> Normalize for Vec<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::Sequence).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::Sequence(Box::new(T::static_descriptor()))
    }

    fn default_normalize(&self, engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        let mut items = Vec::with_capacity(self.len());
        for element in self {
            items.push(engine.normalize_value(element, &[])?);
        }
        Ok(Node::Seq(items))
    }
}

impl<T: Normalize, const N: usize> Normalize for [T; N] {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::Sequence).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::Sequence(Box::new(T::static_descriptor()))
    }

    fn default_normalize(&self, engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        let mut items = Vec::with_capacity(self.len());
        for element in self {
            items.push(engine.normalize_value(element, &[])?);
        }
        Ok(Node::Seq(items))
    }
}

/// A mapping key that normalizes into a `Key::String` or `Key::Int`. Only
/// these two kinds are index-addressable per the Normalized Node model.
pub trait MapKey {
    fn to_key(&self) -> Key;
}

impl MapKey for String {
    fn to_key(&self) -> Key {
        Key::String(self.clone())
    }
}

impl MapKey for &str {
    fn to_key(&self) -> Key {
        Key::String((*self).to_string())
    }
}

macro_rules! impl_map_key_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MapKey for $ty {
                fn to_key(&self) -> Key {
                    Key::Int(i64::from(*self))
                }
            }
        )*
    };
}

impl_map_key_int!(i8, i16, i32, i64, u8, u16, u32);

impl MapKey for usize {
    fn to_key(&self) -> Key {
        Key::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

///
/// `HashMap<K, V>` normalizes to a key-preserving map (§4.5 "mapping /
/// iterable with string (or mixed) keys"). `HashMap` has no stable
/// iteration order, so entries are sorted by rendered key for
/// `Dispatch determinism` (§8) — callers who need declaration order
/// should use `BTreeMap` with an orderable key or a record instead.
///

impl<K, V> Normalize for HashMap<K, V>
where
    K: MapKey + Eq + std::hash::Hash + 'static,
    V: Normalize,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::Mapping).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::Mapping(Box::new(TypeDescriptor::Any), Box::new(V::static_descriptor()))
    }

    fn default_normalize(&self, engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        let mut keys: Vec<&K> = self.keys().collect();
        keys.sort_by(|a, b| a.to_key().to_string().cmp(&b.to_key().to_string()));
        let mut entries = Vec::with_capacity(self.len());
        for key in keys {
            let value = &self[key];
            entries.push((key.to_key(), engine.normalize_value(value, &[])?));
        }
        Ok(Node::Map(entries))
    }
}

///
/// `BTreeMap<K, V>` normalizes the same way, but in key order — already
/// deterministic, so no extra sort is needed.
///

impl<K, V> Normalize for BTreeMap<K, V>
where
    K: MapKey + Ord + 'static,
    V: Normalize,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::Mapping).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::Mapping(Box::new(TypeDescriptor::Any), Box::new(V::static_descriptor()))
    }

    fn default_normalize(&self, engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        let mut entries = Vec::with_capacity(self.len());
        for (key, value) in self {
            entries.push((key.to_key(), engine.normalize_value(value, &[])?));
        }
        Ok(Node::Map(entries))
    }
}
