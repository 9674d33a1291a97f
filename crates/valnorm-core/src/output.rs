//! The Output Adapter (§4.6): materializes a `Node` tree into a concrete,
//! publicly consumable container shape. The array form is the primary one
//! the spec names; it preserves map insertion order and produces
//! integer-keyed lists for sequences (i.e. a sequence's "keys" are its
//! positions, made explicit rather than implicit).

use crate::node::{Key, Node};
use serde::Serialize;

///
/// OutputNode
/// The array-form materialization of a `Node`. Unlike `Node`, every `Seq`
/// becomes an explicitly integer-keyed `Map` — the shape a downstream
/// array-oriented serializer (the spec's "array tree") expects, with no
/// loss of the original element order.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutputNode {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Map(Vec<(Key, OutputNode)>),
}

/// Materializes a `Node` into the array form: sequences become
/// integer-keyed maps (position order preserved), maps keep their
/// insertion order.
#[must_use]
pub fn to_array_form(node: &Node) -> OutputNode {
    match node {
        Node::Null => OutputNode::Null,
        Node::Bool(b) => OutputNode::Bool(*b),
        Node::Int(i) => OutputNode::Int(*i),
        Node::Float(f) => OutputNode::Float(*f),
        Node::String(s) => OutputNode::String(s.clone()),
        Node::Seq(items) => OutputNode::Map(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    (
                        Key::Int(i64::try_from(index).unwrap_or(i64::MAX)),
                        to_array_form(item),
                    )
                })
                .collect(),
        ),
        Node::Map(entries) => OutputNode::Map(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), to_array_form(value)))
                .collect(),
        ),
    }
}
