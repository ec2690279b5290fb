//! Built-in settings the constraint engine reads or special-cases

use crate::prelude::*;
use crate::settings::{PermissionLevel, SettingDefinition, SettingKind, SettingsRegistry};
use setguard_types::adapter::{ALLOW_DDL_SETTING, PROFILE_SETTING, READONLY_SETTING};

/// Register all core settings
pub fn register_settings(registry: &mut SettingsRegistry) -> SgResult<()> {
	registry.register(
		SettingDefinition::builder(READONLY_SETTING, SettingKind::UInt)
			.description(
				"Read-only level: 0 unrestricted, 1 whitelisted settings only, 2 all but readonly",
			)
			.default(0u64)
			.permission(PermissionLevel::User)
			.build()?,
	)?;

	registry.register(
		SettingDefinition::builder(ALLOW_DDL_SETTING, SettingKind::Bool)
			.description("Allow DDL queries")
			.default(true)
			.permission(PermissionLevel::User)
			.build()?,
	)?;

	// Selects a named settings profile; never constrained
	registry.register(
		SettingDefinition::builder(PROFILE_SETTING, SettingKind::String)
			.description("Settings profile to apply")
			.permission(PermissionLevel::User)
			.build()?,
	)?;

	Ok(())
}


// vim: ts=4
