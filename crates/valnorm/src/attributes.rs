//! Default attribute-bound key transformers shipped out of the box (see
//! spec §8 scenario 5: `RenamePropertyKey` then `AddPrefixToPropertyKey`).
//! None of these are registered automatically — a `NormalizerBuilder` must
//! opt in with `.register_attribute::<RenamePropertyKey>()` /
//! `.register_attribute::<AddPrefixToPropertyKey>()` /
//! `.register_attribute::<RecasePropertyKey>()`, matching invariant 6 (an
//! attribute contributes nothing until its identity is registered).

use valnorm_core::node::Key;
use valnorm_core::reflect::{KeyAttribute, KeyParamKind};
use valnorm_utils::Case;

///
/// RenamePropertyKey
/// A zero-parameter key transformer: substitutes a fixed name for whatever
/// key reached it, regardless of chain position.
///

pub struct RenamePropertyKey {
    name: &'static str,
}

impl RenamePropertyKey {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl KeyAttribute for RenamePropertyKey {
    fn param_count(&self) -> u8 {
        0
    }

    fn parameter_kind(&self) -> KeyParamKind {
        KeyParamKind::None
    }

    fn normalize_key(&self, _input: Option<Key>) -> Key {
        Key::String(self.name.to_string())
    }
}

///
/// AddPrefixToPropertyKey
/// A one-parameter key transformer: prepends a fixed prefix to whatever
/// string key reached it.
///

pub struct AddPrefixToPropertyKey {
    prefix: &'static str,
}

impl AddPrefixToPropertyKey {
    #[must_use]
    pub const fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }
}

impl KeyAttribute for AddPrefixToPropertyKey {
    fn param_count(&self) -> u8 {
        1
    }

    fn parameter_kind(&self) -> KeyParamKind {
        KeyParamKind::String
    }

    fn normalize_key(&self, input: Option<Key>) -> Key {
        let current = input.and_then(|key| key.as_str().map(str::to_string)).unwrap_or_default();
        Key::String(valnorm_utils::with_prefix(self.prefix, &current))
    }
}

///
/// RecasePropertyKey
/// A one-parameter key transformer: rewrites whatever string key reached
/// it into the requested case convention (e.g. `snake_case` field `created_at`
/// rendered as `createdAt` under `Case::Camel`).
///

pub struct RecasePropertyKey {
    case: Case,
}

impl RecasePropertyKey {
    #[must_use]
    pub const fn new(case: Case) -> Self {
        Self { case }
    }
}

impl KeyAttribute for RecasePropertyKey {
    fn param_count(&self) -> u8 {
        1
    }

    fn parameter_kind(&self) -> KeyParamKind {
        KeyParamKind::String
    }

    fn normalize_key(&self, input: Option<Key>) -> Key {
        let current = input.and_then(|key| key.as_str().map(str::to_string)).unwrap_or_default();
        Key::String(valnorm_utils::to_case(&current, self.case))
    }
}
