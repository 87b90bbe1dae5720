//! Error types for the link-nest library
//!
//! The text processor and link stripper never fail; these errors cover the
//! snapshot boundary (keyword records and settings coming from the host).

use thiserror::Error;

/// Keyword-related errors
#[derive(Debug, Clone, Error, uniffi::Error)]
pub enum KeywordError {
    /// A positional keyword record is missing a field
    #[error("Keyword record is missing field `{field}` (got {found} of 4 fields)")]
    MissingField { field: String, found: u32 },

    /// Catalog snapshot could not be decoded
    #[error("Failed to decode keyword catalog: {0}")]
    DecodeFailed(String),

    /// Catalog snapshot could not be encoded
    #[error("Failed to encode keyword catalog: {0}")]
    EncodeFailed(String),
}

impl KeywordError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>, found: usize) -> Self {
        Self::MissingField {
            field: field.into(),
            found: u32::try_from(found).unwrap_or(u32::MAX),
        }
    }

    /// Create a decode failed error
    pub fn decode_failed(reason: impl Into<String>) -> Self {
        Self::DecodeFailed(reason.into())
    }

    /// Create an encode failed error
    pub fn encode_failed(reason: impl Into<String>) -> Self {
        Self::EncodeFailed(reason.into())
    }
}

/// Result type for keyword operations
pub type KeywordResult<T> = Result<T, KeywordError>;

/// Settings-related errors
#[derive(Debug, Clone, Error, uniffi::Error)]
pub enum SettingsError {
    /// An option flag holds something other than `yes` or `no`
    #[error("Invalid flag value: {0}")]
    InvalidFlag(String),

    /// Settings snapshot could not be decoded
    #[error("Failed to decode settings: {0}")]
    DecodeFailed(String),

    /// Settings snapshot could not be encoded
    #[error("Failed to encode settings: {0}")]
    EncodeFailed(String),
}

impl SettingsError {
    /// Create an invalid flag error
    pub fn invalid_flag(value: impl Into<String>) -> Self {
        Self::InvalidFlag(value.into())
    }

    /// Create a decode failed error
    pub fn decode_failed(reason: impl Into<String>) -> Self {
        Self::DecodeFailed(reason.into())
    }

    /// Create an encode failed error
    pub fn encode_failed(reason: impl Into<String>) -> Self {
        Self::EncodeFailed(reason.into())
    }
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Main unified error type that can represent any link-nest error
#[derive(Debug, Error, uniffi::Error)]
pub enum LinkNestError {
    /// Keyword error
    #[error(transparent)]
    Keyword(#[from] KeywordError),

    /// Settings error
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Result type for link-nest operations
pub type LinkNestResult<T> = Result<T, LinkNestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_error_missing_field() {
        let err = KeywordError::missing_field("href", 3);
        assert!(err.to_string().contains("href"));
        assert!(err.to_string().contains("3 of 4"));
    }

    #[test]
    fn test_settings_error_invalid_flag() {
        let err = SettingsError::invalid_flag("maybe");
        assert!(err.to_string().contains("maybe"));
    }

    #[test]
    fn test_link_nest_error_from_keyword_error() {
        let err: LinkNestError = KeywordError::decode_failed("truncated").into();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_link_nest_error_from_settings_error() {
        let err: LinkNestError = SettingsError::encode_failed("boom").into();
        assert!(matches!(err, LinkNestError::Settings(_)));
    }
}
