pub use crate::adapter::{AccessAuthority, SettingsCatalog, SettingsSnapshot};
pub use crate::change::{ReadonlyLevel, SettingChange, SettingsChanges};
pub use crate::error::{Error, SgResult};
pub use crate::value::SettingValue;

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
