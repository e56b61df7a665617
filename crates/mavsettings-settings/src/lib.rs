//! mavsettings Settings Crate
//!
//! Typed settings registry with validation and change callbacks, file
//! persistence, the tabbed dialog model, and the relay that carries dialog
//! edits back to the owning registry.

pub mod controller;
pub mod dialog;
pub mod error;
pub mod persistence;
pub mod registry;
pub mod relay;
pub mod setting;

pub use controller::{SettingUiModel, SettingsController};
pub use dialog::{Control, ControlKind, SettingsDialog};
pub use error::{PersistenceError, PersistenceResult, SettingsError, SettingsResult};
pub use persistence::{FileFormat, LoadReport, SettingsPersistence};
pub use registry::{ChangeCallback, Settings, DEFAULT_TAB, DEFAULT_TITLE};
pub use relay::{DialogSession, RelayMessage, RelaySender, SettingChange};
pub use setting::{Setting, SettingInput};

pub use mavsettings_core::{SettingKind, SettingValue};
