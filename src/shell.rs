//! Console shell
//!
//! Line-oriented front end over a shared [`Settings`] registry. `set` is the
//! registry's own command; the `dialog`/`edit`/`apply`/`close` commands drive a
//! [`SettingsDialog`] session so dialog edits flow through the relay exactly as
//! they would from a graphical front end.

use mavsettings_core::{thread_safe, ThreadSafe};
use mavsettings_settings::{
    ControlKind, DialogSession, Settings, SettingsController, SettingsDialog, SettingsPersistence,
};
use std::path::{Path, PathBuf};
use tracing::info;

const HELP: &[&str] = &[
    "set [name [value]]   show or change settings",
    "tabs                 list settings grouped by tab",
    "save [path]          write settings (.toml or .json)",
    "load [path]          read settings (.toml or .json)",
    "defaults             restore default values",
    "dialog               open the settings dialog",
    "edit <label> = <v>   edit a dialog control",
    "browse <label>       show where a file picker would start",
    "apply                apply dialog edits",
    "close                close the dialog",
    "quit                 leave the shell",
];

/// Result of one shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Output lines; keep reading input
    Continue(Vec<String>),
    Quit,
}

/// Interactive settings shell
pub struct Shell {
    controller: SettingsController,
    settings_path: PathBuf,
    dialog: Option<(SettingsDialog, DialogSession)>,
}

impl Shell {
    /// Create a shell over `settings`, saving to `settings_path` by default
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            controller: SettingsController::new(thread_safe(settings)),
            settings_path,
            dialog: None,
        }
    }

    /// The registry edited by this shell
    pub fn settings(&self) -> &ThreadSafe<Settings> {
        &self.controller.settings
    }

    /// Run one line of input
    pub fn execute(&mut self, line: &str) -> ShellAction {
        let args: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, rest)) = args.split_first() else {
            return ShellAction::Continue(Vec::new());
        };

        let output = match cmd {
            "set" => self.controller.settings.lock().command(rest),
            "tabs" => self.tabs(),
            "save" => self.save(rest.first().map(Path::new)),
            "load" => self.load(rest.first().map(Path::new)),
            "defaults" => {
                self.controller.restore_defaults();
                vec!["Defaults restored".to_string()]
            }
            "dialog" => self.open_dialog(),
            "edit" => self.edit(line),
            "browse" => self.browse(rest),
            "apply" => self.apply(),
            "close" => self.close_dialog(),
            "help" => HELP.iter().map(|s| s.to_string()).collect(),
            "quit" | "exit" => {
                self.close_dialog();
                return ShellAction::Quit;
            }
            other => vec![format!("Unknown command '{}'", other)],
        };
        ShellAction::Continue(output)
    }

    fn tabs(&self) -> Vec<String> {
        let tabs = self.controller.settings.lock().tabs();
        let mut lines = Vec::new();
        for tab in tabs {
            lines.push(format!("[{}]", tab));
            for item in self.controller.settings_for_ui(Some(&tab)) {
                lines.push(format!("  {} ({}) = {}", item.name, item.value_type, item.value));
            }
        }
        lines
    }

    fn save(&self, path: Option<&Path>) -> Vec<String> {
        let path = path.unwrap_or(self.settings_path.as_path());
        match self.controller.save(path) {
            Ok(()) => vec![format!("Saved settings to {}", path.display())],
            Err(e) => vec![format!("Save failed: {}", e)],
        }
    }

    fn load(&self, path: Option<&Path>) -> Vec<String> {
        let path = path.unwrap_or(self.settings_path.as_path());
        let mut settings = self.controller.settings.lock();
        match SettingsPersistence::load_into(&mut settings, path) {
            Ok(report) => vec![format!(
                "Loaded {} settings from {} ({} unknown, {} rejected)",
                report.applied,
                path.display(),
                report.unknown.len(),
                report.rejected.len()
            )],
            Err(e) => vec![format!("Load failed: {}", e)],
        }
    }

    fn open_dialog(&mut self) -> Vec<String> {
        if self.dialog.is_some() {
            return vec!["Dialog already open".to_string()];
        }
        let (dialog, session) = match DialogSession::open(self.controller.settings.clone()) {
            Ok(opened) => opened,
            Err(e) => return vec![format!("Unable to open dialog: {}", e)],
        };

        let mut lines = vec![format!("== {} ==", dialog.title())];
        for tab in dialog.tabs() {
            lines.push(format!("[{}]", tab));
            for control in dialog.controls_on(tab) {
                lines.push(format!(
                    "  {:<20} {:<12} {}",
                    control.label,
                    control_name(&control.kind),
                    control.text()
                ));
            }
        }
        self.dialog = Some((dialog, session));
        lines
    }

    fn edit(&mut self, line: &str) -> Vec<String> {
        let Some((dialog, _)) = self.dialog.as_mut() else {
            return vec!["No dialog open".to_string()];
        };
        let body = line.trim_start().strip_prefix("edit").unwrap_or_default();
        let Some((label, text)) = body.split_once('=') else {
            return vec!["usage: edit <label> = <value>".to_string()];
        };
        let label = label.trim();
        if dialog.set_text(label, text.trim()) {
            Vec::new()
        } else {
            vec![format!("No control labelled '{}'", label)]
        }
    }

    fn browse(&self, rest: &[&str]) -> Vec<String> {
        let Some((dialog, _)) = self.dialog.as_ref() else {
            return vec!["No dialog open".to_string()];
        };
        let label = rest.join(" ");
        match dialog.browse_start(&label) {
            Some((path, dir)) => vec![format!("Select file for {} in {} ({})", label, dir.display(), path.display())],
            None => vec![format!("'{}' is not a file chooser", label)],
        }
    }

    fn apply(&mut self) -> Vec<String> {
        let Some((dialog, _)) = self.dialog.as_mut() else {
            return vec!["No dialog open".to_string()];
        };
        let changes = dialog.apply();
        info!("Applied {} dialog change(s)", changes.len());
        changes
            .iter()
            .map(|c| format!("Relayed {}", c.name))
            .collect()
    }

    fn close_dialog(&mut self) -> Vec<String> {
        match self.dialog.take() {
            Some((mut dialog, session)) => {
                dialog.cancel();
                let applied = session.join();
                vec![format!("Dialog closed, {} change(s) applied", applied)]
            }
            None => vec!["No dialog open".to_string()],
        }
    }
}

fn control_name(kind: &ControlKind) -> &'static str {
    match kind {
        ControlKind::Choice { .. } => "choice",
        ControlKind::IntSpin { .. } => "int spin",
        ControlKind::FloatSpin { .. } => "float spin",
        ControlKind::FileChooser => "file",
        ControlKind::Text => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_settings;
    use tempfile::tempdir;

    fn output(action: ShellAction) -> Vec<String> {
        match action {
            ShellAction::Continue(lines) => lines,
            ShellAction::Quit => panic!("unexpected quit"),
        }
    }

    fn shell() -> Shell {
        Shell::new(demo_settings(), PathBuf::from("unused.toml"))
    }

    #[test]
    fn test_set_command() {
        let mut shell = shell();
        assert_eq!(output(shell.execute("set")).len(), 7);
        assert!(output(shell.execute("set altreadout 50")).is_empty());
        assert_eq!(
            output(shell.execute("set altreadout")),
            vec![format!("{:>20} 50", "altreadout")]
        );
        assert_eq!(output(shell.execute("set nope")), vec!["Unknown setting 'nope'"]);
        assert_eq!(output(shell.execute("")), Vec::<String>::new());
    }

    #[test]
    fn test_tabs_listing() {
        let mut shell = shell();
        let lines = output(shell.execute("tabs"));
        assert_eq!(lines[0], "[TabOne]");
        assert!(lines.contains(&"  Foo String (String) = blah".to_string()));
    }

    #[test]
    fn test_dialog_flow() {
        let mut shell = shell();
        let lines = output(shell.execute("dialog"));
        assert_eq!(lines[0], "== Settings ==");
        assert_eq!(output(shell.execute("dialog")), vec!["Dialog already open"]);

        assert!(output(shell.execute("edit Foo String = hello there")).is_empty());
        assert!(output(shell.execute("edit altreadout = 12")).is_empty());
        assert_eq!(
            output(shell.execute("edit Missing = 1")),
            vec!["No control labelled 'Missing'"]
        );
        assert_eq!(
            output(shell.execute("apply")),
            vec!["Relayed altreadout", "Relayed foostr"]
        );
        assert_eq!(
            output(shell.execute("close")),
            vec!["Dialog closed, 2 change(s) applied"]
        );

        let settings = shell.settings().lock();
        assert_eq!(settings.get_str("foostr"), Some("hello there"));
        assert_eq!(settings.get_int("altreadout"), Some(12));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut shell = Shell::new(demo_settings(), path.clone());

        shell.execute("set colour Green");
        output(shell.execute("save"));
        shell.execute("set colour Red");
        let lines = output(shell.execute("load"));
        assert!(lines[0].starts_with("Loaded 6 settings"));
        assert_eq!(shell.settings().lock().get_str("colour"), Some("Green"));

        shell.execute("defaults");
        assert_eq!(shell.settings().lock().get_str("colour"), Some("Blue"));
    }

    #[test]
    fn test_quit() {
        let mut shell = shell();
        assert_eq!(shell.execute("quit"), ShellAction::Quit);
    }
}
