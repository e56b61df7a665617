//! Settings Controller
//!
//! Handles interaction between a preferences UI and the settings registry.
//! Provides data transformation for UI consumption and handles user actions.

use crate::dialog::ControlKind;
use crate::error::{SettingsError, SettingsResult};
use crate::persistence::SettingsPersistence;
use crate::registry::Settings;
use mavsettings_core::{SettingKind, ThreadSafe};
use std::path::Path;
use std::sync::Arc;

/// UI-friendly representation of a setting
#[derive(Debug, Clone, PartialEq)]
pub struct SettingUiModel {
    pub id: String,
    pub name: String,
    pub value: String,
    pub value_type: String,
    pub tab: String,
    pub options: Vec<String>,
    pub current_index: i32,
}

type Listener = Box<dyn Fn(&str, &str) + Send + Sync>;

/// Controller for settings logic
pub struct SettingsController {
    pub settings: ThreadSafe<Settings>,
    listeners: Arc<parking_lot::RwLock<Vec<Listener>>>,
}

impl SettingsController {
    /// Create new settings controller
    pub fn new(settings: ThreadSafe<Settings>) -> Self {
        Self {
            settings,
            listeners: Arc::new(parking_lot::RwLock::new(Vec::new())),
        }
    }

    /// Register a callback to be notified when a setting changes
    pub fn on_setting_changed<F>(&self, callback: F)
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.listeners.write().push(Box::new(callback));
    }

    /// Get settings formatted for UI display, optionally filtered by tab
    pub fn settings_for_ui(&self, tab_filter: Option<&str>) -> Vec<SettingUiModel> {
        let settings = self.settings.lock();

        let items: Vec<SettingUiModel> = settings
            .iter()
            .filter(|s| tab_filter.is_none_or(|tab| s.tab.as_deref() == Some(tab)))
            .map(|setting| {
                let value_type = match setting.kind {
                    SettingKind::Bool => "Boolean",
                    _ if setting.choice.is_some() => "Enum",
                    SettingKind::Int => "Integer",
                    SettingKind::Float => "Float",
                    SettingKind::Path => "Path",
                    SettingKind::Str => "String",
                };

                let value = setting.value_text();
                let options = match ControlKind::for_setting(setting) {
                    ControlKind::Choice { options } => options,
                    _ => Vec::new(),
                };
                let current_index = options.iter().position(|o| *o == value).unwrap_or(0) as i32;

                SettingUiModel {
                    id: setting.name.clone(),
                    name: setting.label.clone(),
                    value,
                    value_type: value_type.to_string(),
                    tab: setting.tab.clone().unwrap_or_default(),
                    options,
                    current_index,
                }
            })
            .collect();
        items
    }

    /// Update a setting value from string input
    pub fn update_setting(&self, id: &str, value: &str) -> SettingsResult<()> {
        let new_value = {
            let mut settings = self.settings.lock();
            settings.set(id, value)?;
            settings
                .get_setting(id)
                .map(|s| s.value_text())
                .ok_or_else(|| SettingsError::UnknownSetting(id.to_string()))?
        };

        for listener in self.listeners.read().iter() {
            listener(id, &new_value);
        }
        Ok(())
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        SettingsPersistence::save_to_file(&self.settings.lock(), path)?;
        Ok(())
    }

    /// Restore default settings, notifying listeners of every value that moved
    pub fn restore_defaults(&self) {
        let changed: Vec<(String, String)> = {
            let mut settings = self.settings.lock();
            let before: Vec<(String, String)> = settings
                .iter()
                .map(|s| (s.name.clone(), s.value_text()))
                .collect();
            settings.reset_to_defaults();
            let moved = before
                .into_iter()
                .filter_map(|(name, old)| {
                    let new = settings.get_setting(&name)?.value_text();
                    (new != old).then_some((name, new))
                })
                .collect();
            moved
        };

        let listeners = self.listeners.read();
        for (id, value) in &changed {
            for listener in listeners.iter() {
                listener(id, value);
            }
        }
    }
}
