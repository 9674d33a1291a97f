//! The six literal end-to-end scenarios from the specification's testable
//! properties section, exercised through the public façade.

use time::macros::datetime;
use valnorm::{
    AddPrefixToPropertyKey, DateTime, IntRefinement, Key, Node, Normalize, NormalizerBuilder,
    RenamePropertyKey, TypeDescriptor,
};

#[test]
fn scenario_1_int_transformer_matches_plain_int_but_not_a_negative_refinement() {
    let plain = NormalizerBuilder::new()
        .register_transformer::<i32, _>(0, |v| Ok(Node::Int(i64::from(*v) + 1)))
        .build();
    assert_eq!(plain.normalize(&42_i32).unwrap(), Node::Int(43));

    let refined = NormalizerBuilder::new()
        .register_transformer_for_descriptor::<i32, _>(
            TypeDescriptor::int_refined(IntRefinement::Negative),
            0,
            |v, _next, _engine| Ok(Node::Int(i64::from(*v) + 1)),
        )
        .build();
    assert_eq!(refined.normalize(&42_i32).unwrap(), Node::Int(42));
}

#[test]
fn scenario_2_date_time_default_rendering_and_a_custom_transformer() {
    let value = DateTime(datetime!(1971-11-08 00:00:00 +00:00));

    let default = NormalizerBuilder::new().build();
    assert_eq!(
        default.normalize(&value).unwrap(),
        Node::String("1971-11-08T00:00:00.000000+00:00".to_string())
    );

    let custom = NormalizerBuilder::new()
        .register_transformer::<DateTime, _>(0, |dt| {
            Ok(Node::String(format!(
                "{}-{:02}-{:02}",
                dt.0.year(),
                u8::from(dt.0.month()),
                dt.0.day()
            )))
        })
        .build();
    assert_eq!(
        custom.normalize(&value).unwrap(),
        Node::String("1971-11-08".to_string())
    );
}

#[derive(Normalize)]
struct Foo {
    value: String,
}

#[test]
fn scenario_3_priority_ordering_wraps_outermost_to_innermost() {
    // -20 ignores `next` entirely: it is the innermost link and stands in
    // for the record's own string representation, "foo".
    let normalizer = NormalizerBuilder::new()
        .register_transformer::<Foo, _>(-20, |record| Ok(Node::String(record.value.clone())))
        .register_transformer_with_next::<Foo, _>(-10, |record, next, engine| {
            let prior = next.call(record, engine)?;
            Ok(Node::String(format!("{}*", prior.as_str().unwrap_or_default())))
        })
        .register_transformer_with_next::<Foo, _>(0, |record, next, engine| {
            let prior = next.call(record, engine)?;
            Ok(Node::String(format!("{}!", prior.as_str().unwrap_or_default())))
        })
        .register_transformer_with_next::<Foo, _>(20, |record, next, engine| {
            let prior = next.call(record, engine)?;
            Ok(Node::String(format!("{}?", prior.as_str().unwrap_or_default())))
        })
        .build();

    let node = normalizer.normalize(&Foo { value: "foo".to_string() }).unwrap();
    assert_eq!(node, Node::String("foo*!?".to_string()));
}

#[test]
fn scenario_4_equal_priority_ties_break_on_insertion_order() {
    // All three at priority 0: A is registered first and ends up
    // outermost, C is registered last and ends up innermost (closest to
    // Default, which it never reaches because it ignores `next`).
    let normalizer = NormalizerBuilder::new()
        .register_transformer_with_next::<Foo, _>(0, |record, next, engine| {
            let prior = next.call(record, engine)?;
            Ok(Node::String(format!("{}*", prior.as_str().unwrap_or_default())))
        })
        .register_transformer_with_next::<Foo, _>(0, |record, next, engine| {
            let prior = next.call(record, engine)?;
            Ok(Node::String(format!("{}!", prior.as_str().unwrap_or_default())))
        })
        .register_transformer::<Foo, _>(0, |record| Ok(Node::String(format!("{}?", record.value))))
        .build();

    let node = normalizer.normalize(&Foo { value: "foo".to_string() }).unwrap();
    assert_eq!(node, Node::String("foo?!*".to_string()));
}

#[derive(Normalize)]
struct Entry {
    #[normalize(key = RenamePropertyKey::new("renamed"))]
    #[normalize(key = AddPrefixToPropertyKey::new("prefix_"))]
    field: String,
}

#[test]
fn scenario_5_key_transformers_compose_in_declaration_order() {
    let normalizer = NormalizerBuilder::new()
        .register_attribute::<RenamePropertyKey>()
        .register_attribute::<AddPrefixToPropertyKey>()
        .build();

    let node = normalizer
        .normalize(&Entry { field: "value".to_string() })
        .unwrap();
    assert_eq!(
        node,
        Node::Map(vec![(
            Key::String("prefix_renamed".to_string()),
            Node::String("value".to_string())
        )])
    );
}

// Scenario 6 (circular reference raises the structural error) is covered at
// the engine level in `valnorm-core`'s own test suite, where the
// hand-rolled `Normalize` impls can use `RefCell` to build a genuine
// mutable cycle — `#[derive(Normalize)]`'s `Rc`/`Arc`/`Box` field peeling
// only handles immutable sharing, so it cannot construct one directly.
