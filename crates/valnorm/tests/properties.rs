//! Property-level tests from the specification's testable properties
//! section, exercised through the public façade and `#[derive(Normalize)]`.

use std::rc::Rc;
use valnorm::{Key, Node, Normalize, NormalizerBuilder};

#[test]
fn idempotence_on_primitives_without_a_matching_transformer() {
    let normalizer = NormalizerBuilder::new().build();
    assert_eq!(normalizer.normalize(&42_i32).unwrap(), Node::Int(42));
    assert_eq!(normalizer.normalize(&true).unwrap(), Node::Bool(true));
    assert_eq!(normalizer.normalize(&1.5_f64).unwrap(), Node::Float(1.5));
    assert_eq!(
        normalizer.normalize(&"hi".to_string()).unwrap(),
        Node::String("hi".to_string())
    );
}

#[test]
fn iteration_flattening_produces_an_ordered_sequence() {
    let normalizer = NormalizerBuilder::new().build();
    let value = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    assert_eq!(
        normalizer.normalize(&value).unwrap(),
        Node::Seq(vec![
            Node::String("a".to_string()),
            Node::String("b".to_string()),
            Node::String("c".to_string()),
        ])
    );
}

#[derive(Normalize)]
struct Base {
    id: i32,
}

#[derive(Normalize)]
struct Account {
    #[normalize(flatten)]
    base: Base,
    name: String,
}

#[test]
fn record_faithfulness_orders_flattened_ancestor_fields_first() {
    let normalizer = NormalizerBuilder::new().build();
    let value = Account {
        base: Base { id: 7 },
        name: "ada".to_string(),
    };
    let node = normalizer.normalize(&value).unwrap();
    assert_eq!(
        node,
        Node::Map(vec![
            (Key::String("id".to_string()), Node::Int(7)),
            (Key::String("name".to_string()), Node::String("ada".to_string())),
        ])
    );
}

#[test]
fn dispatch_determinism_is_stable_across_repeated_calls() {
    let normalizer = NormalizerBuilder::new()
        .register_transformer::<i32, _>(0, |v| Ok(Node::Int(i64::from(*v) * 2)))
        .build();
    let first = normalizer.normalize(&21_i32).unwrap();
    let second = normalizer.normalize(&21_i32).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, Node::Int(42));
}

#[derive(Normalize)]
struct Shared {
    label: String,
}

#[derive(Normalize)]
struct Pair {
    left: Rc<Shared>,
    right: Rc<Shared>,
}

#[test]
fn shared_dag_reachable_through_two_fields_normalizes_successfully() {
    let normalizer = NormalizerBuilder::new().build();
    let shared = Rc::new(Shared { label: "s".to_string() });
    let value = Pair {
        left: Rc::clone(&shared),
        right: Rc::clone(&shared),
    };

    let node = normalizer.normalize(&value).unwrap();
    let expected_shared = Node::Map(vec![(
        Key::String("label".to_string()),
        Node::String("s".to_string()),
    )]);
    assert_eq!(
        node,
        Node::Map(vec![
            (Key::String("left".to_string()), expected_shared.clone()),
            (Key::String("right".to_string()), expected_shared),
        ])
    );
}
