use valnorm::Normalize;

// Only structs with named fields are records; a tuple struct has no field
// names to key a `Node::Map` by.
#[derive(Normalize)]
struct Point(f64, f64);

fn main() {}
