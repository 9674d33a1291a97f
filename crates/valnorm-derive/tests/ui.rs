//! Compile-fail fixtures for `#[derive(Normalize)]`'s rejection paths.

#[test]
fn ui() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/*_fail.rs");
}
