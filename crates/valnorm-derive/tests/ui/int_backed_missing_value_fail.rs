use valnorm::Normalize;

// `int_backed` variants must each declare their backing integer explicitly
// via `#[normalize(value = ...)]` — there is no implicit discriminant the
// way a plain Rust `#[repr(i32)]` enum would assign one.
#[derive(Normalize)]
#[normalize(int_backed)]
enum Priority {
    #[normalize(value = 0)]
    Low,
    High,
}

fn main() {}
