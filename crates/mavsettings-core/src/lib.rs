//! # mavsettings Core
//!
//! Core types shared by the mavsettings crates.
//! Provides the setting value model, the unified error type,
//! and the shared-state aliases used between the registry and its editors.

pub mod error;
pub mod types;
pub mod value;

pub use error::{Error, Result};

pub use types::{thread_safe, ThreadSafe};

pub use value::{value_text, SettingKind, SettingValue};
