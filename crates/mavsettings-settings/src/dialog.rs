//! Settings Dialog
//!
//! Toolkit-independent model of the tabbed settings dialog. Each setting gets
//! one control on its tab; the control kind is chosen from the setting's type
//! and hints. Edits stay in the controls' text buffers until [`SettingsDialog::apply`]
//! validates them against the dialog's own copy of the settings and relays the
//! values that actually changed to the owning registry.

use crate::registry::{Settings, DEFAULT_TAB, DEFAULT_TITLE};
use crate::relay::{RelayMessage, RelaySender, SettingChange};
use crate::setting::Setting;
use mavsettings_core::SettingKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// The widget used to edit a setting
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Read-only drop-down over a sorted option list
    Choice { options: Vec<String> },
    /// Integer spin control
    IntSpin { min: i64, max: i64, increment: i64 },
    /// Floating point spin control
    FloatSpin {
        min: f64,
        max: f64,
        increment: f64,
        digits: Option<u32>,
        format: Option<String>,
    },
    /// Text entry with a browse button
    FileChooser,
    /// Single-line text entry
    Text,
}

impl ControlKind {
    /// Pick the control for a setting
    pub fn for_setting(setting: &Setting) -> Self {
        if setting.kind == SettingKind::Bool {
            return Self::choice(["True".to_string(), "False".to_string()]);
        }
        if let Some(choices) = &setting.choice {
            return Self::choice(choices.iter().map(|c| c.to_string()));
        }
        match (setting.kind, setting.increment, setting.range) {
            (SettingKind::Int, Some(increment), Some((min, max))) => Self::IntSpin {
                min: min as i64,
                max: max as i64,
                increment: (increment as i64).max(1),
            },
            (SettingKind::Float, Some(increment), Some((min, max))) => Self::FloatSpin {
                min,
                max,
                increment,
                digits: setting.digits,
                format: setting.format.clone(),
            },
            (SettingKind::Path, _, _) => Self::FileChooser,
            _ => Self::Text,
        }
    }

    fn choice(options: impl IntoIterator<Item = String>) -> Self {
        let mut options: Vec<String> = options.into_iter().collect();
        options.sort();
        Self::Choice { options }
    }
}

/// One labelled input on a tab
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub label: String,
    /// Name of the setting this control edits
    pub name: String,
    pub tab: String,
    pub kind: ControlKind,
    text: String,
}

impl Control {
    /// Current contents of the input
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Tabbed settings dialog model
#[derive(Debug)]
pub struct SettingsDialog {
    title: String,
    tabs: Vec<String>,
    controls: Vec<Control>,
    settings: Settings,
    relay: Option<RelaySender>,
}

impl SettingsDialog {
    /// Build the dialog over a copy of the settings.
    ///
    /// Without a relay, [`SettingsDialog::apply`] only reports changes.
    pub fn new(settings: Settings) -> Self {
        let title = if settings.title().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            settings.title().to_string()
        };

        let controls = settings
            .iter()
            .map(|setting| Control {
                label: setting.label.clone(),
                name: setting.name.clone(),
                tab: setting.tab.clone().unwrap_or_else(|| DEFAULT_TAB.to_string()),
                kind: ControlKind::for_setting(setting),
                text: setting.value_text(),
            })
            .collect();

        Self {
            title,
            tabs: settings.tabs(),
            controls,
            settings,
            relay: None,
        }
    }

    /// Send applied changes through `relay`
    pub fn with_relay(mut self, relay: RelaySender) -> Self {
        self.relay = Some(relay);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Controls on one tab, in declaration order
    pub fn controls_on(&self, tab: &str) -> impl Iterator<Item = &Control> {
        let tab = tab.to_string();
        self.controls.iter().filter(move |c| c.tab == tab)
    }

    pub fn control(&self, label: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.label == label)
    }

    /// The dialog's working copy of the settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the text of the control labelled `label`
    pub fn set_text(&mut self, label: &str, text: impl Into<String>) -> bool {
        match self.controls.iter_mut().find(|c| c.label == label) {
            Some(control) => {
                control.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Starting point for a file picker: the absolute path and its directory
    pub fn browse_start(&self, label: &str) -> Option<(PathBuf, PathBuf)> {
        let control = self.control(label)?;
        if control.kind != ControlKind::FileChooser {
            return None;
        }
        let path = std::path::absolute(&control.text).ok()?;
        let dir = path.parent().map(PathBuf::from).unwrap_or_else(|| path.clone());
        Some((path, dir))
    }

    /// Store the path picked for a file chooser
    pub fn set_path(&mut self, label: &str, path: &std::path::Path) -> bool {
        self.set_text(label, path.to_string_lossy())
    }

    /// Validate edited controls and relay the values that changed.
    ///
    /// Invalid entries are logged and skipped; they do not stop the rest.
    pub fn apply(&mut self) -> Vec<SettingChange> {
        let mut changes = Vec::new();

        for control in &self.controls {
            let Some(setting) = self.settings.get_setting_mut(&control.name) else {
                continue;
            };
            let old = setting.value_text();
            if control.text == old {
                continue;
            }
            if let Err(e) = setting.set(control.text.as_str()) {
                warn!("Invalid value {} for {}: {}", control.text, setting.name, e);
                continue;
            }
            if setting.value_text() != old {
                changes.push(SettingChange {
                    name: setting.name.clone(),
                    value: setting.value().cloned(),
                });
            }
        }

        for change in &changes {
            debug!("Relaying {} = {:?}", change.name, change.value);
            self.send(RelayMessage::Changed(change.clone()));
        }
        changes
    }

    /// Close the dialog without applying; the relay is shut down
    pub fn cancel(&mut self) {
        self.send(RelayMessage::Closed);
        self.relay = None;
    }

    /// Whether the dialog still has an open relay
    pub fn is_connected(&self) -> bool {
        self.relay.as_ref().is_some_and(|r| !r.is_closed())
    }

    fn send(&self, message: RelayMessage) {
        if let Some(relay) = &self.relay {
            if relay.send(message).is_err() {
                warn!("Settings relay closed; change not delivered");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mavsettings_core::SettingValue;

    fn demo() -> Settings {
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
                Setting::new("logfile", SettingKind::Path, PathBuf::from("logs/flight.log")),
            ],
            "Demo",
        )
    }

    #[test]
    fn test_control_selection() {
        let dialog = SettingsDialog::new(demo());
        let kind = |label: &str| dialog.control(label).unwrap().kind.clone();

        assert_eq!(kind("link"), ControlKind::Text);
        assert_eq!(
            kind("altreadout"),
            ControlKind::IntSpin { min: -30, max: 1017, increment: 1 }
        );
        assert!(matches!(kind("pvalue"), ControlKind::FloatSpin { digits: Some(2), .. }));
        assert_eq!(
            kind("enable"),
            ControlKind::Choice { options: vec!["False".into(), "True".into()] }
        );
        assert_eq!(
            kind("colour"),
            ControlKind::Choice { options: vec!["Blue".into(), "Green".into(), "Red".into()] }
        );
        assert_eq!(kind("Foo String"), ControlKind::Text);
        assert_eq!(kind("logfile"), ControlKind::FileChooser);

        let gain = Setting::new("gain", SettingKind::Float, 0.5)
            .with_range(0.0, 1.0)
            .with_increment(0.05)
            .with_format("%.2f");
        assert_eq!(
            ControlKind::for_setting(&gain),
            ControlKind::FloatSpin {
                min: 0.0,
                max: 1.0,
                increment: 0.05,
                digits: None,
                format: Some("%.2f".into()),
            }
        );

        // choices win over spin hints
        let rate = Setting::new("rate", SettingKind::Int, 10)
            .with_range(1.0, 50.0)
            .with_increment(1.0)
            .with_choice([10, 2, 50]);
        assert_eq!(
            ControlKind::for_setting(&rate),
            ControlKind::Choice { options: vec!["10".into(), "2".into(), "50".into()] }
        );

        let unset = SettingsDialog::new(Settings::new(
            vec![Setting::without_default("arm", SettingKind::Bool)],
            "T",
        ));
        let arm = unset.control("arm").unwrap();
        assert_eq!(arm.kind, ControlKind::Choice { options: vec!["False".into(), "True".into()] });
        assert_eq!(arm.text(), "None");
    }

    #[test]
    fn test_tabs_and_title() {
        let dialog = SettingsDialog::new(demo());
        assert_eq!(dialog.title(), "Demo");
        assert_eq!(dialog.tabs(), &["TabOne", "TabTwo"]);
        assert_eq!(dialog.controls_on("TabOne").count(), 3);
        assert_eq!(dialog.controls_on("TabTwo").count(), 4);
    }

    #[test]
    fn test_initial_text_is_current_value() {
        let mut settings = demo();
        settings.set("altreadout", 99).unwrap();
        let dialog = SettingsDialog::new(settings);
        assert_eq!(dialog.control("altreadout").unwrap().text(), "99");
        assert_eq!(dialog.control("enable").unwrap().text(), "True");
    }

    #[test]
    fn test_apply_reports_only_real_changes() {
        let mut dialog = SettingsDialog::new(demo());
        assert!(dialog.set_text("altreadout", "42"));
        assert!(dialog.set_text("pvalue", "0.30"));
        assert!(dialog.set_text("colour", "Purple"));
        assert!(!dialog.set_text("missing", "1"));

        let changes = dialog.apply();
        assert_eq!(
            changes,
            vec![SettingChange { name: "altreadout".into(), value: Some(SettingValue::Int(42)) }]
        );
        assert_eq!(dialog.settings().get_int("altreadout"), Some(42));
        assert_eq!(dialog.settings().get_str("colour"), Some("Blue"));

        // nothing new to apply the second time
        assert!(dialog.apply().is_empty());
    }

    #[test]
    fn test_browse_start() {
        let dialog = SettingsDialog::new(demo());
        let (path, dir) = dialog.browse_start("logfile").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("logs/flight.log"));
        assert!(dir.ends_with("logs"));
        assert!(dialog.browse_start("link").is_none());
    }
}
