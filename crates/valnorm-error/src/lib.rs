//! Stable error taxonomy for the `valnorm` normalizer.
//!
//! Every error raised while building a dispatch chain or normalizing a
//! value carries one of the [`Code`] constants below. Codes are part of the
//! public contract and must never be renumbered.

use std::fmt;
use thiserror::Error as ThisError;

///
/// Code
/// Stable, never-renumbered error codes surfaced to callers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Code {
    TypeUnhandledByNormalizer = 1_695_062_925,
    CircularReferenceFoundDuringNormalization = 1_695_064_016,
    TransformerMissingParameter = 1_695_064_946,
    TransformerTooManyParameters = 1_695_065_433,
    TransformerSecondParameterNotCallable = 1_695_065_710,
    KeyTransformerTooManyParameters = 1_701_701_102,
    KeyTransformerParameterWrongType = 1_701_706_316,
}

impl Code {
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

///
/// NormalizeError
/// Canonical, fatal error taxonomy for a single `normalize` call.
///
/// Every variant is terminal: there is no partial output and no recovery
/// within the call that raised it.
///

#[derive(Debug, ThisError)]
pub enum NormalizeError {
    #[error("[{code}] type `{kind}` is not handled by the normalizer")]
    TypeUnhandled { code: Code, kind: String },

    #[error("[{code}] circular reference detected while normalizing `{type_name}`")]
    CircularReference { code: Code, type_name: String },

    #[error("[{code}] transformer for `{type_name}` declares no parameters")]
    TransformerMissingParameter { code: Code, type_name: String },

    #[error(
        "[{code}] transformer for `{type_name}` declares more than two parameters"
    )]
    TransformerTooManyParameters { code: Code, type_name: String },

    #[error(
        "[{code}] transformer for `{type_name}`'s second parameter must be the `next` continuation"
    )]
    TransformerSecondParameterNotCallable { code: Code, type_name: String },

    #[error(
        "[{code}] key transformer `{attribute_name}` declares more than one parameter"
    )]
    KeyTransformerTooManyParameters { code: Code, attribute_name: String },

    #[error(
        "[{code}] key transformer `{attribute_name}`'s parameter must be string or integer"
    )]
    KeyTransformerParameterWrongType { code: Code, attribute_name: String },
}

impl NormalizeError {
    #[must_use]
    pub const fn code(&self) -> Code {
        match self {
            Self::TypeUnhandled { code, .. }
            | Self::CircularReference { code, .. }
            | Self::TransformerMissingParameter { code, .. }
            | Self::TransformerTooManyParameters { code, .. }
            | Self::TransformerSecondParameterNotCallable { code, .. }
            | Self::KeyTransformerTooManyParameters { code, .. }
            | Self::KeyTransformerParameterWrongType { code, .. } => *code,
        }
    }

    #[must_use]
    pub fn type_unhandled(kind: impl Into<String>) -> Self {
        Self::TypeUnhandled {
            code: Code::TypeUnhandledByNormalizer,
            kind: kind.into(),
        }
    }

    #[must_use]
    pub fn circular_reference(type_name: impl Into<String>) -> Self {
        Self::CircularReference {
            code: Code::CircularReferenceFoundDuringNormalization,
            type_name: type_name.into(),
        }
    }

    #[must_use]
    pub fn transformer_missing_parameter(type_name: impl Into<String>) -> Self {
        Self::TransformerMissingParameter {
            code: Code::TransformerMissingParameter,
            type_name: type_name.into(),
        }
    }

    #[must_use]
    pub fn transformer_too_many_parameters(type_name: impl Into<String>) -> Self {
        Self::TransformerTooManyParameters {
            code: Code::TransformerTooManyParameters,
            type_name: type_name.into(),
        }
    }

    #[must_use]
    pub fn transformer_second_parameter_not_callable(type_name: impl Into<String>) -> Self {
        Self::TransformerSecondParameterNotCallable {
            code: Code::TransformerSecondParameterNotCallable,
            type_name: type_name.into(),
        }
    }

    #[must_use]
    pub fn key_transformer_too_many_parameters(attribute_name: impl Into<String>) -> Self {
        Self::KeyTransformerTooManyParameters {
            code: Code::KeyTransformerTooManyParameters,
            attribute_name: attribute_name.into(),
        }
    }

    #[must_use]
    pub fn key_transformer_parameter_wrong_type(attribute_name: impl Into<String>) -> Self {
        Self::KeyTransformerParameterWrongType {
            code: Code::KeyTransformerParameterWrongType,
            attribute_name: attribute_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(Code::TypeUnhandledByNormalizer.as_u32(), 1_695_062_925);
        assert_eq!(
            Code::CircularReferenceFoundDuringNormalization.as_u32(),
            1_695_064_016
        );
        assert_eq!(Code::TransformerMissingParameter.as_u32(), 1_695_064_946);
        assert_eq!(Code::TransformerTooManyParameters.as_u32(), 1_695_065_433);
        assert_eq!(
            Code::TransformerSecondParameterNotCallable.as_u32(),
            1_695_065_710
        );
        assert_eq!(
            Code::KeyTransformerTooManyParameters.as_u32(),
            1_701_701_102
        );
        assert_eq!(
            Code::KeyTransformerParameterWrongType.as_u32(),
            1_701_706_316
        );
    }

    #[test]
    fn error_carries_its_code() {
        let err = NormalizeError::circular_reference("Account");
        assert_eq!(
            err.code(),
            Code::CircularReferenceFoundDuringNormalization
        );
        assert!(err.to_string().contains("Account"));
    }
}
