//! A single typed setting
//!
//! Holds the declaration (type, default, label, tab, range, choices and the
//! spin-control hints) together with the current value, and validates every
//! assignment against that declaration.

use crate::error::{SettingsError, SettingsResult};
use mavsettings_core::{value_text, SettingKind, SettingValue};
use std::fmt;
use tracing::warn;

/// Input accepted by [`Setting::set`]
#[derive(Debug, Clone, PartialEq)]
pub enum SettingInput<'a> {
    /// User-entered text, converted to the setting's type
    Text(&'a str),
    /// Typed value, coerced to the setting's type
    Value(SettingValue),
    /// Clear the value
    None,
}

impl SettingInput<'_> {
    /// True for the literal text `None`, which clears settings that default to nothing
    fn is_none_text(&self) -> bool {
        match self {
            Self::Text(t) => *t == "None",
            Self::Value(SettingValue::Str(s)) => s == "None",
            _ => false,
        }
    }
}

impl fmt::Display for SettingInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(t) => write!(f, "{}", t),
            Self::Value(v) => write!(f, "{}", v),
            Self::None => write!(f, "None"),
        }
    }
}

impl<'a> From<&'a str> for SettingInput<'a> {
    fn from(v: &'a str) -> Self {
        Self::Text(v)
    }
}

impl<'a> From<&'a String> for SettingInput<'a> {
    fn from(v: &'a String) -> Self {
        Self::Text(v.as_str())
    }
}

impl From<SettingValue> for SettingInput<'_> {
    fn from(v: SettingValue) -> Self {
        Self::Value(v)
    }
}

impl From<Option<SettingValue>> for SettingInput<'_> {
    fn from(v: Option<SettingValue>) -> Self {
        match v {
            Some(v) => Self::Value(v),
            None => Self::None,
        }
    }
}

impl From<bool> for SettingInput<'_> {
    fn from(v: bool) -> Self {
        Self::Value(v.into())
    }
}

impl From<i64> for SettingInput<'_> {
    fn from(v: i64) -> Self {
        Self::Value(v.into())
    }
}

impl From<i32> for SettingInput<'_> {
    fn from(v: i32) -> Self {
        Self::Value(v.into())
    }
}

impl From<f64> for SettingInput<'_> {
    fn from(v: f64) -> Self {
        Self::Value(v.into())
    }
}

/// A named, typed setting
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub name: String,
    pub kind: SettingKind,
    pub default: Option<SettingValue>,
    pub label: String,
    /// Tab the setting is shown on; filled in by the registry when absent
    pub tab: Option<String>,
    /// Inclusive numeric bounds
    pub range: Option<(f64, f64)>,
    /// Spin control step
    pub increment: Option<f64>,
    /// Display format for float spin controls
    pub format: Option<String>,
    /// Decimal digits for float spin controls
    pub digits: Option<u32>,
    /// Allowed values
    pub choice: Option<Vec<SettingValue>>,
    value: Option<SettingValue>,
}

impl Setting {
    /// Create a setting whose value starts at `default`.
    ///
    /// The default is converted to `kind` when possible; an unconvertible
    /// default is kept as given and logged.
    pub fn new(name: impl Into<String>, kind: SettingKind, default: impl Into<SettingValue>) -> Self {
        let name = name.into();
        let default = default.into();
        let default = match kind.coerce(&default) {
            Ok(converted) => converted,
            Err(e) => {
                warn!("Default for '{}' kept unconverted: {}", name, e);
                default
            }
        };
        Self::build(name, kind, Some(default))
    }

    /// Create a setting with no default value
    pub fn without_default(name: impl Into<String>, kind: SettingKind) -> Self {
        Self::build(name.into(), kind, None)
    }

    fn build(name: String, kind: SettingKind, default: Option<SettingValue>) -> Self {
        Self {
            label: name.clone(),
            name,
            kind,
            value: default.clone(),
            default,
            tab: None,
            range: None,
            increment: None,
            format: None,
            digits: None,
            choice: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = Some(tab.into());
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub fn with_increment(mut self, increment: f64) -> Self {
        self.increment = Some(increment);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = Some(digits);
        self
    }

    /// Restrict values to `choices`, each converted to the setting's kind
    pub fn with_choice<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SettingValue>,
    {
        let kind = self.kind;
        self.choice = Some(
            choices
                .into_iter()
                .map(|c| {
                    let c = c.into();
                    kind.coerce(&c).unwrap_or(c)
                })
                .collect(),
        );
        self
    }

    /// Current value, `None` when unset
    pub fn value(&self) -> Option<&SettingValue> {
        self.value.as_ref()
    }

    /// Textual form of the current value
    pub fn value_text(&self) -> String {
        value_text(self.value())
    }

    /// Set the value, converting and validating it first.
    ///
    /// On error the previous value is kept.
    pub fn set<'a>(&mut self, input: impl Into<SettingInput<'a>>) -> SettingsResult<()> {
        let input = input.into();
        let candidate = if input.is_none_text() && self.default.is_none() {
            None
        } else {
            match input {
                SettingInput::None => None,
                SettingInput::Text(text) => Some(self.kind.parse(text)?),
                SettingInput::Value(v) => Some(self.kind.coerce(&v)?),
            }
        };

        self.validate(candidate.as_ref())?;
        self.value = candidate;
        Ok(())
    }

    /// Restore the default value
    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }

    /// Check a converted value against range and choices
    pub fn validate(&self, candidate: Option<&SettingValue>) -> SettingsResult<()> {
        if let Some((min, max)) = self.range {
            let in_range = candidate
                .and_then(SettingValue::as_f64)
                .is_some_and(|n| n >= min && n <= max);
            if !in_range {
                return Err(SettingsError::OutOfRange {
                    name: self.name.clone(),
                    value: value_text(candidate),
                    min,
                    max,
                });
            }
        }

        if let Some(choices) = &self.choice {
            let allowed = candidate.is_some_and(|v| choices.contains(v));
            if !allowed {
                let listed: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
                return Err(SettingsError::NotAChoice {
                    name: self.name.clone(),
                    value: value_text(candidate),
                    choices: format!("[{}]", listed.join(", ")),
                });
            }
        }

        Ok(())
    }
}
