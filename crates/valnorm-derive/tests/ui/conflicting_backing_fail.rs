use valnorm::Normalize;

// An enum cannot be both `string_backed` and `int_backed` — these are two
// different rendering contracts for the same Pure representation, and a
// type only gets to pick one.
#[derive(Normalize)]
#[normalize(string_backed)]
#[normalize(int_backed)]
enum Mixed {
    #[normalize(value = 0)]
    Zero,
}

fn main() {}
