//! `Normalize` impls for the primitive kinds that terminate recursion:
//! `null`, `bool`, `int`, `float`, `string`. None of these carry children,
//! so none participate in cycle detection (see `engine::normalize_value`'s
//! `guards_identity` check, which only guards records and bags).

use crate::engine::Engine;
use crate::error::NormalizeError;
use crate::node::Node;
use crate::reflect::Normalize;
use std::any::{Any, TypeId};
use valnorm_types::{RuntimeKind, RuntimeSubject, TypeDescriptor};

impl Normalize for () {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::Null).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::Null
    }

    fn default_normalize(&self, _engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        Ok(Node::Null)
    }
}

impl Normalize for bool {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::Bool).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::Bool
    }

    fn default_normalize(&self, _engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        Ok(Node::Bool(*self))
    }
}

/// Implements `Normalize` for an integer type by casting to `i64`, the
/// engine's canonical integer representation.
macro_rules! impl_normalize_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Normalize for $ty {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn runtime_subject(&self) -> RuntimeSubject {
                    RuntimeSubject::new(RuntimeKind::Int)
                        .with_int_value(i64::from(*self))
                        .with_type_id(TypeId::of::<Self>())
                }

                fn static_descriptor() -> TypeDescriptor {
                    TypeDescriptor::int()
                }

                fn default_normalize(&self, _engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
                    Ok(Node::Int(i64::from(*self)))
                }
            }
        )*
    };
}

impl_normalize_int!(i8, i16, i32, i64, u8, u16, u32);

/// `i64::from` does not exist for `usize`/`isize`/`u64`/`i128` (lossy or
/// platform-dependent), so these get a `TryFrom`-based impl that saturates
/// rather than panics — a value normalizer must never panic on a value it
/// was asked to render.
macro_rules! impl_normalize_int_saturating {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Normalize for $ty {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn runtime_subject(&self) -> RuntimeSubject {
                    RuntimeSubject::new(RuntimeKind::Int)
                        .with_int_value(self.saturating_as_i64())
                        .with_type_id(TypeId::of::<Self>())
                }

                fn static_descriptor() -> TypeDescriptor {
                    TypeDescriptor::int()
                }

                fn default_normalize(&self, _engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
                    Ok(Node::Int(self.saturating_as_i64()))
                }
            }
        )*
    };
}

trait SaturatingAsI64 {
    fn saturating_as_i64(&self) -> i64;
}

impl SaturatingAsI64 for usize {
    fn saturating_as_i64(&self) -> i64 {
        i64::try_from(*self).unwrap_or(i64::MAX)
    }
}

impl SaturatingAsI64 for isize {
    fn saturating_as_i64(&self) -> i64 {
        i64::try_from(*self).unwrap_or(i64::MAX)
    }
}

impl SaturatingAsI64 for u64 {
    fn saturating_as_i64(&self) -> i64 {
        i64::try_from(*self).unwrap_or(i64::MAX)
    }
}

impl SaturatingAsI64 for i128 {
    fn saturating_as_i64(&self) -> i64 {
        i64::try_from(*self).unwrap_or(if *self > 0 { i64::MAX } else { i64::MIN })
    }
}

impl_normalize_int_saturating!(usize, isize, u64, i128);

impl Normalize for f32 {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::Float).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::Float
    }

    fn default_normalize(&self, _engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        Ok(Node::Float(f64::from(*self)))
    }
}

impl Normalize for f64 {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::Float).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::Float
    }

    fn default_normalize(&self, _engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        Ok(Node::Float(*self))
    }
}

impl Normalize for String {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_subject(&self) -> RuntimeSubject {
        RuntimeSubject::new(RuntimeKind::String).with_type_id(TypeId::of::<Self>())
    }

    fn static_descriptor() -> TypeDescriptor {
        TypeDescriptor::String
    }

    fn default_normalize(&self, _engine: &mut Engine<'_>) -> Result<Node, NormalizeError> {
        Ok(Node::String(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn primitives_are_idempotent_without_a_matching_transformer() {
        let registry = Registry::new();
        let mut engine = Engine::new(&registry, DateTimeFormatDefault::get());

        assert_eq!(engine.normalize(&42_i32).unwrap(), Node::Int(42));
        assert_eq!(engine.normalize(&true).unwrap(), Node::Bool(true));
        assert_eq!(engine.normalize(&1.5_f64).unwrap(), Node::Float(1.5));
        assert_eq!(
            engine.normalize(&"hi".to_string()).unwrap(),
            Node::String("hi".to_string())
        );
        assert_eq!(engine.normalize(&()).unwrap(), Node::Null);
    }

    /// Small shim so this module's tests don't need to depend on the
    /// `datetime` module's default just to construct an `Engine`.
    struct DateTimeFormatDefault;
    impl DateTimeFormatDefault {
        fn get() -> crate::datetime::DateTimeFormat {
            crate::datetime::DateTimeFormat::default()
        }
    }

    #[test]
    fn int_transformer_matches_by_refinement() {
        let mut registry = Registry::new();
        registry.register_transformer::<i32, _>(0, |v| Ok(Node::Int(i64::from(*v) + 1)));
        let mut engine = Engine::new(&registry, DateTimeFormatDefault::get());
        assert_eq!(engine.normalize(&42_i32).unwrap(), Node::Int(43));
    }
}
