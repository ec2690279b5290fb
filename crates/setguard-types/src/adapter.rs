//! Collaborator traits consumed by the constraint engine.
//!
//! The engine never stores setting values or decides which names exist. It
//! reads those facts through the traits below:
//!
//! - [`SettingsCatalog`]: declared types of settings (casting, name hints)
//! - [`SettingsSnapshot`]: current values at the time of a check
//! - [`AccessAuthority`]: which names may be changed, and the merge policy

use crate::change::ReadonlyLevel;
use crate::error::SgResult;
use crate::value::SettingValue;

/// Meta-setting selecting a named settings profile
pub const PROFILE_SETTING: &str = "profile";
/// Global read-only level
pub const READONLY_SETTING: &str = "readonly";
/// Global DDL permission flag
pub const ALLOW_DDL_SETTING: &str = "allow_ddl";

/// Declared-type registry for settings
pub trait SettingsCatalog: Send + Sync {
	/// Convert a raw value to the declared type of `name`
	fn cast(&self, name: &str, value: &SettingValue) -> SgResult<SettingValue>;

	/// Registered names similar to `name`, for "maybe you meant" messages
	fn hints(&self, name: &str) -> Vec<String>;
}

/// Read access to the current settings
pub trait SettingsSnapshot {
	/// Current value of `name`, if the registry holds one
	fn try_get(&self, name: &str) -> Option<SettingValue>;

	fn readonly_level(&self) -> ReadonlyLevel {
		self.try_get(READONLY_SETTING)
			.map(|v| ReadonlyLevel::from_value(&v))
			.unwrap_or_default()
	}

	fn allow_ddl(&self) -> bool {
		match self.try_get(ALLOW_DDL_SETTING) {
			Some(SettingValue::Bool(b)) => b,
			Some(SettingValue::Int(i)) => i != 0,
			Some(SettingValue::UInt(u)) => u != 0,
			_ => true,
		}
	}
}

/// Decides which setting names are visible and how rule sets merge
pub trait AccessAuthority: Send + Sync {
	/// Non-raising visibility check
	fn is_setting_allowed(&self, name: &str) -> bool;

	/// Raising visibility check: `UnknownSetting` or `PermissionDenied`
	fn check_setting_allowed(&self, name: &str) -> SgResult<()>;

	/// Whether a merged rule set fully replaces earlier entries for the same name
	fn constraints_replace_previous(&self) -> bool;
}

impl SettingsSnapshot for std::collections::HashMap<String, SettingValue> {
	fn try_get(&self, name: &str) -> Option<SettingValue> {
		self.get(name).cloned()
	}
}


// vim: ts=4
