//! Small, dependency-light helpers shared by `valnorm-derive` and the
//! default key-transformer attributes shipped by `valnorm`.

pub use convert_case::{Case, Casing};

/// Convert an identifier (typically a Rust field name, already `snake_case`)
/// into the requested case convention.
#[must_use]
pub fn to_case(ident: &str, case: Case) -> String {
    ident.to_case(case)
}

/// Prefix a key with `prefix`, leaving the rest untouched.
#[must_use]
pub fn with_prefix(prefix: &str, key: &str) -> String {
    format!("{prefix}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_snake_to_camel() {
        assert_eq!(to_case("created_at", Case::Camel), "createdAt");
    }

    #[test]
    fn prefixes_keys() {
        assert_eq!(with_prefix("prefix_", "renamed"), "prefix_renamed");
    }
}
