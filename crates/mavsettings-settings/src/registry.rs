//! Settings registry
//!
//! An ordered collection of [`Setting`]s addressed by name. Assignments go
//! through [`Settings::set`], which validates the value and then notifies the
//! registered change callback. The registry also answers the `set` console
//! command (show one, show all, assign).

use crate::error::{SettingsError, SettingsResult};
use crate::setting::{Setting, SettingInput};
use mavsettings_core::{SettingKind, SettingValue};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Tab assigned to settings declared before any tab is named
pub const DEFAULT_TAB: &str = "Settings";

/// Title used when none is given
pub const DEFAULT_TITLE: &str = "Settings";

/// Callback invoked after a successful [`Settings::set`]
pub type ChangeCallback = Box<dyn Fn(&Setting) + Send>;

/// Ordered, typed settings registry
pub struct Settings {
    vars: HashMap<String, Setting>,
    keys: Vec<String>,
    title: String,
    default_tab: String,
    callback: Option<ChangeCallback>,
}

impl Settings {
    /// Create a registry holding `vars` in order
    pub fn new<I>(vars: I, title: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = Setting>,
    {
        let mut settings = Self {
            vars: HashMap::new(),
            keys: Vec::new(),
            title: title.into(),
            default_tab: DEFAULT_TAB.to_string(),
            callback: None,
        };
        for v in vars {
            settings.append(v);
        }
        settings
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Add a setting.
    ///
    /// A setting without a tab lands on the most recently named tab; a
    /// setting with a tab becomes the default for those that follow.
    /// Appending an existing name replaces it in place.
    pub fn append(&mut self, mut setting: Setting) {
        match &setting.tab {
            Some(tab) => self.default_tab = tab.clone(),
            None => setting.tab = Some(self.default_tab.clone()),
        }

        if !self.vars.contains_key(&setting.name) {
            self.keys.push(setting.name.clone());
        }
        self.vars.insert(setting.name.clone(), setting);
    }

    /// Add a setting from its short form: name, type, default and optional label and tab
    pub fn append_simple(
        &mut self,
        name: &str,
        kind: SettingKind,
        default: Option<SettingValue>,
        label: Option<&str>,
        tab: Option<&str>,
    ) {
        let mut setting = match default {
            Some(d) => Setting::new(name, kind, d),
            None => Setting::without_default(name, kind),
        };
        if let Some(label) = label {
            setting = setting.with_label(label);
        }
        if let Some(tab) = tab {
            setting = setting.with_tab(tab);
        }
        self.append(setting);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn get_setting(&self, name: &str) -> Option<&Setting> {
        self.vars.get(name)
    }

    pub fn get_setting_mut(&mut self, name: &str) -> Option<&mut Setting> {
        self.vars.get_mut(name)
    }

    /// Current value of `name`; `Ok(None)` when the setting is unset
    pub fn value(&self, name: &str) -> SettingsResult<Option<&SettingValue>> {
        self.vars
            .get(name)
            .map(Setting::value)
            .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.value(name).ok().flatten()?.as_bool()
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.value(name).ok().flatten()?.as_i64()
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.value(name).ok().flatten()? {
            SettingValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.value(name).ok().flatten()?.as_str()
    }

    /// Set a setting, validating the value and notifying the callback
    pub fn set<'a>(&mut self, name: &str, input: impl Into<SettingInput<'a>>) -> SettingsResult<()> {
        let input = input.into();
        let setting = self
            .vars
            .get_mut(name)
            .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))?;

        let shown = input.to_string();
        if let Err(e) = setting.set(input) {
            warn!("Unable to convert {} to type {}: {}", shown, setting.kind, e);
            return Err(e);
        }
        debug!("Setting {} = {}", setting.name, setting.value_text());

        if let Some(callback) = &self.callback {
            callback(setting);
        }
        Ok(())
    }

    /// Register the callback run after each successful [`Settings::set`], replacing any previous one
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: Fn(&Setting) + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Setting names in insertion order
    pub fn list(&self) -> &[String] {
        &self.keys
    }

    /// Candidates for command line completion
    pub fn completion(&self, _text: &str) -> Vec<String> {
        self.keys.clone()
    }

    /// Tab names in first-seen order
    pub fn tabs(&self) -> Vec<String> {
        let mut tabs: Vec<String> = Vec::new();
        for setting in self.iter() {
            let tab = setting.tab.as_deref().unwrap_or(DEFAULT_TAB);
            if !tabs.iter().any(|t| t == tab) {
                tabs.push(tab.to_string());
            }
        }
        tabs
    }

    /// Settings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.keys.iter().filter_map(|k| self.vars.get(k))
    }

    /// One `name value` line, name right-aligned to 20 columns
    pub fn show(&self, name: &str) -> SettingsResult<String> {
        let setting = self
            .vars
            .get(name)
            .ok_or_else(|| SettingsError::UnknownSetting(name.to_string()))?;
        Ok(format!("{:>20} {}", name, setting.value_text()))
    }

    /// `show` for every setting, sorted by name
    pub fn show_all(&self) -> Vec<String> {
        let mut names: Vec<&String> = self.vars.keys().collect();
        names.sort();
        names
            .into_iter()
            .filter_map(|name| self.show(name).ok())
            .collect()
    }

    /// Handle the `set` console command.
    ///
    /// No arguments lists every setting, one argument shows that setting, two
    /// or more assign the second argument to the first.
    pub fn command<S: AsRef<str>>(&mut self, args: &[S]) -> Vec<String> {
        let Some(name) = args.first().map(AsRef::as_ref) else {
            return self.show_all();
        };
        if !self.contains(name) {
            return vec![format!("Unknown setting '{}'", name)];
        }
        match args.get(1) {
            None => self.show(name).into_iter().collect(),
            Some(value) => match self.set(name, value.as_ref()) {
                Ok(()) => Vec::new(),
                Err(e) => vec![e.to_string()],
            },
        }
    }

    /// Restore every setting to its default without running the callback
    pub fn reset_to_defaults(&mut self) {
        for setting in self.vars.values_mut() {
            setting.reset();
        }
    }

    /// Copy of the declarations and values, without the change callback
    pub fn snapshot(&self) -> Self {
        Self {
            vars: self.vars.clone(),
            keys: self.keys.clone(),
            title: self.title.clone(),
            default_tab: self.default_tab.clone(),
            callback: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_TITLE)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("title", &self.title)
            .field("keys", &self.keys)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn sample() -> Settings {
        Settings::new(
            vec![
                Setting::new("link", SettingKind::Int, 1).with_tab("TabOne"),
                Setting::new("altreadout", SettingKind::Int, 10).with_range(-30.0, 1017.0),
                Setting::new("enable", SettingKind::Bool, true).with_tab("TabTwo"),
                Setting::new("colour", SettingKind::Str, "Blue"),
            ],
            "Test",
        )
    }

    #[test]
    fn test_tab_cascade() {
        let settings = sample();
        let tab = |n: &str| settings.get_setting(n).unwrap().tab.clone().unwrap();
        assert_eq!(tab("link"), "TabOne");
        assert_eq!(tab("altreadout"), "TabOne");
        assert_eq!(tab("enable"), "TabTwo");
        assert_eq!(tab("colour"), "TabTwo");
        assert_eq!(settings.tabs(), vec!["TabOne", "TabTwo"]);
    }

    #[test]
    fn test_completion_lists_every_name() {
        let settings = sample();
        let expected = vec!["link", "altreadout", "enable", "colour"];
        assert_eq!(settings.completion("al"), expected);
        assert_eq!(settings.completion(""), expected);
    }

    #[test]
    fn test_first_tab_defaults_to_settings() {
        let settings = Settings::new(vec![Setting::new("a", SettingKind::Int, 0)], "T");
        assert_eq!(settings.tabs(), vec![DEFAULT_TAB]);
    }

    #[test]
    fn test_append_replaces_in_place() {
        let mut settings = sample();
        settings.append(Setting::new("link", SettingKind::Int, 7));
        assert_eq!(settings.list(), &["link", "altreadout", "enable", "colour"]);
        assert_eq!(settings.get_int("link"), Some(7));
    }

    #[test]
    fn test_append_simple() {
        let mut settings = Settings::default();
        settings.append_simple("speed", SettingKind::Float, Some(2.5.into()), Some("Speed"), Some("Motion"));
        let s = settings.get_setting("speed").unwrap();
        assert_eq!(s.label, "Speed");
        assert_eq!(s.tab.as_deref(), Some("Motion"));
        assert_eq!(settings.title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_set_unknown() {
        let mut settings = sample();
        assert!(matches!(
            settings.set("nope", "1"),
            Err(SettingsError::UnknownSetting(_))
        ));
    }

    #[test]
    fn test_callback_only_on_success() {
        let mut settings = sample();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        settings.set_callback(move |s| sink.lock().unwrap().push(s.value_text()));

        settings.set("altreadout", "20").unwrap();
        assert!(settings.set("altreadout", "5000").is_err());
        settings.set("enable", "false").unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["20", "False"]);
    }

    #[test]
    fn test_show_format() {
        let settings = sample();
        assert_eq!(settings.show("link").unwrap(), format!("{:>20} 1", "link"));
        let all = settings.show_all();
        assert_eq!(all.len(), 4);
        assert!(all[0].ends_with("altreadout 10"));
    }

    #[test]
    fn test_command() {
        let mut settings = sample();
        assert_eq!(settings.command::<&str>(&[]).len(), 4);
        assert_eq!(settings.command(&["bogus"]), vec!["Unknown setting 'bogus'"]);
        assert_eq!(settings.command(&["colour"]), vec![format!("{:>20} Blue", "colour")]);
        assert!(settings.command(&["colour", "Red"]).is_empty());
        assert_eq!(settings.get_str("colour"), Some("Red"));
        assert_eq!(settings.command(&["link", "x"]).len(), 1);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let mut settings = sample();
        settings.set_callback(|_| {});
        settings.set("link", 3).unwrap();
        let copy = settings.snapshot();
        assert_eq!(copy.get_int("link"), Some(3));
        assert!(copy.callback.is_none());

        settings.reset_to_defaults();
        assert_eq!(settings.get_int("link"), Some(1));
        assert_eq!(copy.get_int("link"), Some(3));
    }
}
