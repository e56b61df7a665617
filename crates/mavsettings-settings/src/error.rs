//! Error types for the settings crate.
//!
//! This module provides structured error types for setting validation,
//! registry lookups, and settings persistence.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// No setting with this name is registered.
    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),

    /// The value could not be converted to the setting's type.
    #[error(transparent)]
    Value(#[from] mavsettings_core::Error),

    /// The value lies outside the setting's inclusive range.
    #[error("Value {value} for '{name}' outside range [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: String,
        min: f64,
        max: f64,
    },

    /// The value is not one of the setting's allowed choices.
    #[error("Value {value} for '{name}' is not one of {choices}")]
    NotAChoice {
        name: String,
        value: String,
        choices: String,
    },

    /// I/O error, e.g. while starting the dialog watcher.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A persistence error occurred.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Errors related to settings persistence operations.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The settings file format is not supported.
    #[error("Unsupported settings format: {0}")]
    UnsupportedFormat(String),

    /// The configuration directory could not be found or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during persistence.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON error during persistence.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
