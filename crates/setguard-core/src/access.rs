//! Access control over setting names
//!
//! Decides which settings a caller may change, based on each definition's
//! [`PermissionLevel`] and the caller's roles, and carries the rule-merge
//! policy flag.

use serde::Deserialize;
use std::sync::Arc;

use crate::prelude::*;
use crate::settings::{FrozenSettingsRegistry, PermissionLevel};

/// Access control configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
	/// Merged constraint sets replace earlier entries instead of narrowing them
	pub settings_constraints_replace_previous: bool,
	/// Roles of the current caller
	pub roles: Vec<String>,
}

impl AccessConfig {
	pub fn from_json(json: &str) -> SgResult<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

pub struct AccessControl {
	registry: Arc<FrozenSettingsRegistry>,
	config: AccessConfig,
}

impl AccessControl {
	pub fn new(registry: Arc<FrozenSettingsRegistry>, config: AccessConfig) -> Self {
		Self { registry, config }
	}

	fn permission(&self, name: &str) -> Option<PermissionLevel> {
		self.registry.get(name).map(|def| def.permission)
	}
}

impl AccessAuthority for AccessControl {
	fn is_setting_allowed(&self, name: &str) -> bool {
		self.permission(name).is_some_and(|p| p.check(self.config.roles.as_slice()))
	}

	fn check_setting_allowed(&self, name: &str) -> SgResult<()> {
		match self.permission(name) {
			None => Err(Error::UnknownSetting { name: name.to_string(), hints: Vec::new() }),
			Some(permission) if !permission.check(self.config.roles.as_slice()) => {
				warn!("Permission denied for setting '{}': requires {:?}", name, permission);
				Err(Error::PermissionDenied { name: name.to_string() })
			}
			Some(_) => Ok(()),
		}
	}

	fn constraints_replace_previous(&self) -> bool {
		self.config.settings_constraints_replace_previous
	}
}


// vim: ts=4
