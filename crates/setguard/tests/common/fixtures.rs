//! Reusable test fixtures
//!
//! A registry with a handful of typical server settings, plus builders for
//! an engine and store sharing it.

use std::sync::Arc;

use setguard::prelude::*;
use setguard::settings::{
	FrozenSettingsRegistry, PermissionLevel, SettingDefinition, SettingKind, SettingsRegistry,
	SettingsStore,
};
use setguard::{AccessConfig, AccessControl, SettingsConstraints};

/// Registry with the core settings and a few typical server settings.
///
/// `audit_log` needs the admin role, which the default config lacks.
pub fn sample_registry() -> Arc<FrozenSettingsRegistry> {
	let mut registry = SettingsRegistry::new();
	setguard::register_settings(&mut registry).unwrap();

	let user = PermissionLevel::User;
	let defs = [
		("max_threads", SettingKind::UInt, "Maximum number of worker threads", user),
		("max_memory", SettingKind::UInt, "Maximum memory per query in bytes", user),
		("load_factor", SettingKind::Float, "Target load factor", user),
		("timezone", SettingKind::String, "Session time zone", user),
		("priority", SettingKind::Int, "Query priority", user),
		("audit_log", SettingKind::Bool, "Record every query", PermissionLevel::Admin),
	];
	for (key, kind, description, permission) in defs {
		registry
			.register(
				SettingDefinition::builder(key, kind)
					.description(description)
					.permission(permission)
					.build()
					.unwrap(),
			)
			.unwrap();
	}
	Arc::new(registry.freeze())
}

pub struct TestEnv {
	pub constraints: SettingsConstraints,
	pub store: SettingsStore,
}

impl TestEnv {
	pub fn new() -> Self {
		Self::with_config(AccessConfig::default())
	}

	pub fn with_config(config: AccessConfig) -> Self {
		let registry = sample_registry();
		let access = Arc::new(AccessControl::new(registry.clone(), config));
		Self {
			constraints: SettingsConstraints::new(registry.clone(), access),
			store: SettingsStore::new(registry),
		}
	}

	/// Engine sharing this environment's registry and authority, with no rules
	pub fn empty_constraints(&self) -> SettingsConstraints {
		let mut constraints = self.constraints.clone();
		constraints.clear();
		constraints
	}

	pub fn set_readonly(&self, level: u64) {
		self.store.set("readonly", level).unwrap();
	}

	pub fn check(&self, name: &str, value: impl Into<SettingValue>) -> SgResult<()> {
		self.constraints.check(&self.store, &SettingChange::new(name, value))
	}

	/// Clamp a single change; `None` if it was dropped
	pub fn clamp_one(&self, name: &str, value: impl Into<SettingValue>) -> Option<SettingValue> {
		let mut changes = vec![SettingChange::new(name, value)];
		self.constraints.clamp(&self.store, &mut changes);
		changes.pop().map(|change| change.value)
	}
}

// vim: ts=4
