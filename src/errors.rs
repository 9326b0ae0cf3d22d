//! Error types shared across the crate.
//!
//! Only hard failures are errors. A key that fails validation is *not* an
//! error: `validate_key` reports rejections through
//! [`crate::license_key::KeyValidation`] so callers always get a boolean plus
//! a diagnostic message.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type LicenseResult<T> = Result<T, LicenseError>;

#[derive(Debug, Error)]
pub enum LicenseError {
    /// Caller supplied input that cannot produce a key (e.g. a machine id
    /// shorter than 4 characters).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
