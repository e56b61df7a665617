//! Settings Persistence
//!
//! Handles loading and saving setting values from/to configuration files.
//! Files hold a flat `name = value` map in JSON or TOML, chosen by extension.
//! Loaded values go through [`Settings::set`], so they are validated and the
//! change callback fires exactly as for interactive edits.

use crate::error::{PersistenceError, PersistenceResult};
use crate::registry::Settings;
use mavsettings_core::SettingValue;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name under the platform config directory
const APP_DIR: &str = "mavsettings";

/// Default settings file name
const SETTINGS_FILE: &str = "settings.toml";

/// On-disk format of a settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> PersistenceResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(PersistenceError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Outcome of [`SettingsPersistence::load_into`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of values applied
    pub applied: usize,
    /// Names in the file that the registry does not know
    pub unknown: Vec<String>,
    /// Names whose stored value failed validation
    pub rejected: Vec<String>,
}

/// Settings persistence layer
pub struct SettingsPersistence;

impl SettingsPersistence {
    /// Current values by name; unset values are left out
    pub fn to_map(settings: &Settings) -> BTreeMap<String, SettingValue> {
        settings
            .iter()
            .filter_map(|s| s.value().map(|v| (s.name.clone(), v.clone())))
            .collect()
    }

    /// Save settings to file.
    ///
    /// JSON has no spelling for NaN or infinity, so such floats are left out
    /// of JSON files; TOML keeps them.
    pub fn save_to_file(settings: &Settings, path: &Path) -> PersistenceResult<()> {
        let mut map = Self::to_map(settings);
        let content = match FileFormat::from_path(path)? {
            FileFormat::Json => {
                map.retain(|name, value| match value {
                    SettingValue::Float(f) if !f.is_finite() => {
                        warn!("Not saving non-finite {} = {} to JSON", name, value);
                        false
                    }
                    _ => true,
                });
                serde_json::to_string_pretty(&map)?
            }
            FileFormat::Toml => toml::to_string_pretty(&map)?,
        };
        std::fs::write(path, content)?;
        info!("Saved {} settings to {}", map.len(), path.display());
        Ok(())
    }

    /// Read a settings file into a name/value map without applying it.
    ///
    /// A JSON `null` reads as `None`.
    pub fn read_file(path: &Path) -> PersistenceResult<BTreeMap<String, Option<SettingValue>>> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let map = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str::<BTreeMap<String, SettingValue>>(&content)?
                .into_iter()
                .map(|(name, value)| (name, Some(value)))
                .collect(),
        };
        Ok(map)
    }

    /// Load settings from file into `settings`.
    ///
    /// Unknown names, `null` entries and invalid values are reported and skipped.
    pub fn load_into(settings: &mut Settings, path: &Path) -> PersistenceResult<LoadReport> {
        let map = Self::read_file(path)?;
        let mut report = LoadReport::default();

        for (name, value) in map {
            if !settings.contains(&name) {
                warn!("Ignoring unknown setting '{}' in {}", name, path.display());
                report.unknown.push(name);
                continue;
            }
            let Some(value) = value else {
                warn!("Ignoring empty value for '{}' in {}", name, path.display());
                report.rejected.push(name);
                continue;
            };
            match settings.set(&name, value) {
                Ok(()) => report.applied += 1,
                Err(_) => report.rejected.push(name),
            }
        }

        info!(
            "Loaded {} settings from {} ({} unknown, {} rejected)",
            report.applied,
            path.display(),
            report.unknown.len(),
            report.rejected.len()
        );
        Ok(report)
    }

    /// Platform configuration directory for settings files
    pub fn config_dir() -> PersistenceResult<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or_else(|| {
                PersistenceError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Default settings file path
    pub fn config_file_path() -> PersistenceResult<PathBuf> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE))
    }

    /// Create the configuration directory if it is missing
    pub fn ensure_config_dir() -> PersistenceResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)
            .map_err(|e| PersistenceError::ConfigDirectory(format!("{}: {}", dir.display(), e)))?;
        Ok(dir)
    }
}
