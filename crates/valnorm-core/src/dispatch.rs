//! The Dispatch Planner: assembles the ordered transformer chain for one
//! value, and the key chain for one record field.

use crate::engine::Engine;
use crate::error::NormalizeError;
use crate::node::{Key, Node};
use crate::reflect::{AttributeEntry, AttributeInstance, AttributeKind, Normalize};
use crate::registry::{Registry, ValueRegistration};
use valnorm_types::{matches as descriptor_matches, RuntimeSubject};

///
/// Link
/// One step of an assembled chain. `Default` always terminates the chain.
///

enum Link<'r> {
    Free(&'r ValueRegistration),
    Attribute(&'r AttributeEntry),
    Default,
}

///
/// Chain
/// An assembled, ready-to-invoke transformer chain for one value. Built
/// fresh per visit (cheap — a handful of pointer-sized comparisons and a
/// sort over what is usually a very small candidate set).
///

pub struct Chain<'r> {
    links: Vec<Link<'r>>,
}

impl<'r> Chain<'r> {
    pub fn invoke(
        &self,
        position: usize,
        value: &dyn Normalize,
        engine: &mut Engine<'r>,
    ) -> Result<Node, NormalizeError> {
        match &self.links[position] {
            Link::Default => value.default_normalize(engine),
            Link::Free(reg) => {
                let next = Next {
                    chain: self,
                    position: position + 1,
                };
                (reg.invoke)(value, next, engine)
            }
            Link::Attribute(entry) => {
                let next = Next {
                    chain: self,
                    position: position + 1,
                };
                match &entry.instance {
                    AttributeInstance::Value(attr) => attr.normalize(value, next, engine),
                    AttributeInstance::Key(_) => unreachable!(
                        "key-kind attribute entries are never placed on the value chain"
                    ),
                }
            }
        }
    }
}

///
/// Next
/// The continuation passed to a transformer. `Copy` and self-contained —
/// it borrows the chain, not the engine — so it may be invoked zero, one,
/// or any number of times without fighting the borrow checker.
///

pub struct Next<'a, 'r> {
    chain: &'a Chain<'r>,
    position: usize,
}

impl<'a, 'r> Clone for Next<'a, 'r> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, 'r> Copy for Next<'a, 'r> {}

impl<'a, 'r> Next<'a, 'r> {
    pub fn call(
        self,
        value: &dyn Normalize,
        engine: &mut Engine<'r>,
    ) -> Result<Node, NormalizeError> {
        self.chain.invoke(self.position, value, engine)
    }
}

fn validate_value_attribute(
    attr: &dyn crate::reflect::ValueAttribute,
    name: &'static str,
) -> Result<(), NormalizeError> {
    match attr.param_count() {
        0 => Err(NormalizeError::transformer_missing_parameter(name)),
        1 => Ok(()),
        2 => {
            if attr.takes_next() {
                Ok(())
            } else {
                Err(NormalizeError::transformer_second_parameter_not_callable(
                    name,
                ))
            }
        }
        _ => Err(NormalizeError::transformer_too_many_parameters(name)),
    }
}

/// Build the value chain for `value`: free transformers (priority desc,
/// insertion order asc) first, then attribute-bound transformers in
/// nearest-scope-first order (`field_attrs` before `type_attrs`), then
/// the default step.
pub fn build_chain<'r>(
    registry: &'r Registry,
    subject: &RuntimeSubject,
    field_attrs: &'static [AttributeEntry],
    type_attrs: &'static [AttributeEntry],
) -> Result<Chain<'r>, NormalizeError> {
    let mut free: Vec<&ValueRegistration> = registry
        .value_registrations()
        .iter()
        .filter(|reg| {
            reg.type_id_filter
                .is_none_or(|id| Some(id) == subject.type_id)
                && descriptor_matches(&reg.parameter, subject)
        })
        .collect();
    free.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then(a.insertion_index.cmp(&b.insertion_index))
    });

    let mut links: Vec<Link<'r>> = free.into_iter().map(Link::Free).collect();

    for entry in field_attrs.iter().chain(type_attrs.iter()) {
        if entry.kind != AttributeKind::Value || !registry.is_attribute_eligible(entry) {
            continue;
        }
        let AttributeInstance::Value(attr) = &entry.instance else {
            continue;
        };
        if !descriptor_matches(&attr.parameter(), subject) {
            continue;
        }
        validate_value_attribute(attr.as_ref(), entry.name)?;
        links.push(Link::Attribute(entry));
    }

    links.push(Link::Default);
    Ok(Chain { links })
}

fn validate_key_attribute(
    attr: &dyn crate::reflect::KeyAttribute,
    name: &'static str,
) -> Result<(), NormalizeError> {
    use crate::reflect::KeyParamKind;
    match attr.param_count() {
        0 => Ok(()),
        1 => match attr.parameter_kind() {
            KeyParamKind::String | KeyParamKind::Int => Ok(()),
            KeyParamKind::None | KeyParamKind::Other => Err(
                NormalizeError::key_transformer_parameter_wrong_type(name),
            ),
        },
        _ => Err(NormalizeError::key_transformer_too_many_parameters(name)),
    }
}

/// Resolve a field's output key by running its registered key-transformer
/// attributes in declaration order, seeded with the field's own name.
pub fn resolve_key(
    registry: &Registry,
    field_name: &'static str,
    field_attrs: &'static [AttributeEntry],
) -> Result<Key, NormalizeError> {
    let mut current = Key::String(field_name.to_string());
    for entry in field_attrs {
        if entry.kind != AttributeKind::Key || !registry.is_attribute_eligible(entry) {
            continue;
        }
        let AttributeInstance::Key(attr) = &entry.instance else {
            continue;
        };
        validate_key_attribute(attr.as_ref(), entry.name)?;
        let input = if attr.param_count() == 0 {
            None
        } else {
            Some(current.clone())
        };
        current = attr.normalize_key(input);
    }
    Ok(current)
}
