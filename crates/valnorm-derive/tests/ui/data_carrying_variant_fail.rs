use valnorm::Normalize;

// Enum derive is restricted to unit variants: the spec's `Enum(identity)`
// descriptor never inspects a payload, so a data-carrying variant is
// rejected at compile time rather than silently guessing a representation.
#[derive(Normalize)]
enum Status {
    Active,
    Pending(String),
}

fn main() {}
