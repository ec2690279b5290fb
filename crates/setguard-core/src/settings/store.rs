//! In-memory settings store holding current values

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::types::FrozenSettingsRegistry;
use crate::prelude::*;

/// Current setting values, resolved as explicit value -> definition default
pub struct SettingsStore {
	registry: Arc<FrozenSettingsRegistry>,
	values: RwLock<HashMap<String, SettingValue>>,
}

impl SettingsStore {
	pub fn new(registry: Arc<FrozenSettingsRegistry>) -> Self {
		Self { registry, values: RwLock::new(HashMap::new()) }
	}

	/// Set a value, cast to the setting's declared kind
	pub fn set(&self, name: &str, value: impl Into<SettingValue>) -> SgResult<SettingValue> {
		let value = self.registry.cast(name, &value.into())?;
		self.values.write().insert(name.to_string(), value.clone());
		debug!("Setting '{}' set to {}", name, value);
		Ok(value)
	}

	/// Apply an already checked batch in order
	pub fn apply(&self, changes: &[SettingChange]) -> SgResult<()> {
		for change in changes {
			self.set(&change.name, change.value.clone())?;
		}
		info!("Applied {} setting changes", changes.len());
		Ok(())
	}

	/// Remove the explicit value, falling back to the default
	pub fn reset(&self, name: &str) -> bool {
		self.values.write().remove(name).is_some()
	}

	/// Point-in-time copy of the explicit values
	pub fn snapshot(&self) -> HashMap<String, SettingValue> {
		self.values.read().clone()
	}
}

impl SettingsSnapshot for SettingsStore {
	fn try_get(&self, name: &str) -> Option<SettingValue> {
		if let Some(value) = self.values.read().get(name) {
			return Some(value.clone());
		}
		self.registry.get(name).and_then(|def| def.default.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::settings::{SettingDefinition, SettingKind, SettingsRegistry};

	fn store() -> SettingsStore {
		let mut registry = SettingsRegistry::new();
		registry
			.register(
				SettingDefinition::builder("max_threads", SettingKind::UInt)
					.description("Worker threads")
					.default(8u64)
					.build()
					.unwrap(),
			)
			.unwrap();
		registry
			.register(
				SettingDefinition::builder("comment", SettingKind::String)
					.description("Free text")
					.build()
					.unwrap(),
			)
			.unwrap();
		SettingsStore::new(Arc::new(registry.freeze()))
	}

	#[test]
	fn test_default_then_explicit() {
		let store = store();
		assert_eq!(store.try_get("max_threads"), Some(SettingValue::UInt(8)));
		assert_eq!(store.try_get("comment"), None);

		assert_eq!(store.set("max_threads", "16").unwrap(), SettingValue::UInt(16));
		assert_eq!(store.try_get("max_threads"), Some(SettingValue::UInt(16)));

		assert!(store.reset("max_threads"));
		assert_eq!(store.try_get("max_threads"), Some(SettingValue::UInt(8)));
	}

	#[test]
	fn test_set_rejects_bad_values() {
		let store = store();
		assert!(store.set("max_threads", "many").is_err());
		assert!(store.set("unknown", 1i64).is_err());
		assert!(store.snapshot().is_empty());
	}

	#[test]
	fn test_apply_batch() {
		let store = store();
		store
			.apply(&[SettingChange::new("max_threads", "4"), SettingChange::new("comment", 42i64)])
			.unwrap();
		assert_eq!(store.try_get("max_threads"), Some(SettingValue::UInt(4)));
		assert_eq!(store.try_get("comment"), Some(SettingValue::from("42")));
	}
}

// vim: ts=4
