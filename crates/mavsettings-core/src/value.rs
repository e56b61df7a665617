//! Setting value model
//!
//! A setting declares a [`SettingKind`]; every value stored in it is a
//! [`SettingValue`] of that kind. Incoming values (typed or textual) are
//! converted with [`SettingKind::coerce`].
//!
//! Textual forms follow the conventions of the command line the settings
//! are edited from: booleans print as `True`/`False`, integral floats keep
//! their `.0`, and an unset value prints as `None`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Declared type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    /// Boolean flag
    Bool,
    /// Signed integer
    Int,
    /// Floating point number
    Float,
    /// Free text
    Str,
    /// Filesystem path, edited with a file chooser
    Path,
}

impl fmt::Display for SettingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Str => write!(f, "str"),
            Self::Path => write!(f, "path"),
        }
    }
}

/// A concrete setting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Path(PathBuf),
}

impl SettingValue {
    /// Numeric view used for range checks. Booleans count as 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Str(_) | Self::Path(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Path(p) => p.to_str(),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => fmt_float(*v, f),
            Self::Str(s) => write!(f, "{}", s),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Very large and very small magnitudes switch to exponent form with a signed,
/// two-digit exponent (`1e+20`, `1.5e-07`).
fn fmt_float(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if v.is_nan() {
        write!(f, "nan")
    } else if v.is_infinite() {
        write!(f, "{}", if v > 0.0 { "inf" } else { "-inf" })
    } else if v != 0.0 && (v.abs() >= 1e16 || v.abs() < 1e-4) {
        let sci = format!("{:e}", v);
        match sci.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
            Some((mantissa, Ok(exp))) => {
                let sign = if exp < 0 { '-' } else { '+' };
                write!(f, "{}e{}{:02}", mantissa, sign, exp.abs())
            }
            _ => write!(f, "{}", sci),
        }
    } else if v.fract() == 0.0 {
        write!(f, "{:.1}", v)
    } else {
        write!(f, "{}", v)
    }
}

/// Textual form of an optional value, `None` when unset
pub fn value_text(value: Option<&SettingValue>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<PathBuf> for SettingValue {
    fn from(v: PathBuf) -> Self {
        Self::Path(v)
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

impl SettingKind {
    /// Convert `value` to this kind.
    ///
    /// Booleans only accept `1/true/yes` and `0/false/no` (case-insensitive)
    /// in the value's textual form. Floats truncate toward zero when
    /// converted to integers.
    pub fn coerce(self, value: &SettingValue) -> Result<SettingValue> {
        use SettingValue as V;

        let converted = match self {
            Self::Bool => parse_bool(&value.to_string()).map(V::Bool),
            Self::Int => match value {
                V::Int(i) => Some(V::Int(*i)),
                V::Bool(b) => Some(V::Int(*b as i64)),
                V::Float(f) if f.is_finite() && f.abs() < i64::MAX as f64 => {
                    Some(V::Int(f.trunc() as i64))
                }
                V::Float(_) => None,
                V::Str(_) | V::Path(_) => value
                    .as_str()
                    .and_then(|s| s.trim().parse::<i64>().ok())
                    .map(V::Int),
            },
            Self::Float => match value {
                V::Str(_) | V::Path(_) => value
                    .as_str()
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .map(V::Float),
                other => other.as_f64().map(V::Float),
            },
            Self::Str => Some(V::Str(value.to_string())),
            Self::Path => Some(match value {
                V::Path(p) => V::Path(p.clone()),
                other => V::Path(PathBuf::from(other.to_string())),
            }),
        };

        converted.ok_or_else(|| {
            tracing::trace!("cannot convert {:?} to {}", value, self);
            Error::conversion(value, self)
        })
    }

    /// Convert user-entered text to this kind
    pub fn parse(self, text: &str) -> Result<SettingValue> {
        self.coerce(&SettingValue::Str(text.to_string()))
    }
}
