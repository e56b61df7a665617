//! Error handling for mavsettings
//!
//! Provides the unified error type used by the value model and by the
//! higher-level settings crate when it needs to surface a core failure.
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::value::{SettingKind, SettingValue};
use thiserror::Error;

/// Main error type for mavsettings core
#[derive(Error, Debug)]
pub enum Error {
    /// A value could not be converted to the requested kind
    #[error("Unable to convert {value} to type {kind}")]
    Conversion {
        /// Textual form of the rejected value.
        value: String,
        /// The kind the value was being converted to.
        kind: SettingKind,
    },
}

impl Error {
    /// Create a conversion error for `value` and the target `kind`
    pub fn conversion(value: &SettingValue, kind: SettingKind) -> Self {
        Error::Conversion {
            value: value.to_string(),
            kind,
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_display() {
        let err = Error::conversion(&SettingValue::Str("abc".into()), SettingKind::Int);
        assert_eq!(err.to_string(), "Unable to convert abc to type int");
        assert!(matches!(err, Error::Conversion { kind: SettingKind::Int, .. }));
    }

    #[test]
    fn test_conversion_error_uses_value_text() {
        let err = Error::conversion(&SettingValue::Float(2.0), SettingKind::Bool);
        assert_eq!(err.to_string(), "Unable to convert 2.0 to type bool");
    }
}
