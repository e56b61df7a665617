//! # mavsettings
//!
//! Typed settings for ground control station modules:
//! - A registry of named settings with type coercion, range and choice
//!   validation, and change callbacks
//! - JSON/TOML persistence in the platform config directory
//! - A tabbed dialog model whose applied edits are relayed back to the
//!   owning registry from a watcher thread
//!
//! ## Architecture
//!
//! 1. **mavsettings-core** - Value model, errors, shared-state aliases
//! 2. **mavsettings-settings** - Registry, persistence, dialog, relay, controller
//! 3. **mavsettings** - Console shell binary that integrates both crates

pub mod shell;

pub use mavsettings_core::{Error, Result, SettingKind, SettingValue, ThreadSafe};

pub use mavsettings_settings::{
    Control, ControlKind, DialogSession, LoadReport, Setting, SettingChange, SettingInput,
    Settings, SettingsController, SettingsDialog, SettingsError, SettingsPersistence,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// The demonstration settings shown by the shell
pub fn demo_settings() -> Settings {
    Settings::new(
        vec![
            Setting::new("link", SettingKind::Int, 1).with_tab("TabOne"),
            Setting::new("altreadout", SettingKind::Int, 10)
                .with_range(-30.0, 1017.0)
                .with_increment(1.0),
            Setting::new("pvalue", SettingKind::Float, 0.3)
                .with_range(-3.0, 1e6)
                .with_increment(0.1)
                .with_digits(2),
            Setting::new("enable", SettingKind::Bool, true).with_tab("TabTwo"),
            Setting::new("colour", SettingKind::Str, "Blue").with_choice(["Red", "Green", "Blue"]),
            Setting::new("foostr", SettingKind::Str, "blah").with_label("Foo String"),
            Setting::without_default("logfile", SettingKind::Path).with_label("Log File"),
        ],
        "Settings",
    )
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    // stdout carries command output, so logs go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
