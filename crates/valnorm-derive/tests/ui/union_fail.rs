use valnorm::Normalize;

// Unions have no stable notion of "current field" to reflect over, so the
// derive refuses them outright rather than guessing at an active variant.
#[derive(Normalize)]
union Bits {
    as_int: i32,
    as_float: f32,
}

fn main() {}
