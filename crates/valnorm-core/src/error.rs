//! Re-exports the stable error taxonomy. Kept as its own module (rather
//! than inlined into `lib.rs`) so call sites read `crate::error::...`,
//! matching the teacher's `icydb-core::error` convention.

pub use valnorm_error::{Code, NormalizeError};
