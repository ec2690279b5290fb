//! Settings types and definitions
//!
//! Declared kinds, permission levels and the definition registry that the
//! constraint engine uses as its catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::prelude::*;

/// Declared type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
	Bool,
	Int,
	UInt,
	Float,
	String,
	Json,
}

impl SettingKind {
	/// Convert `value` to this kind. Strings are parsed, numbers converted
	/// only when lossless.
	#[allow(
		clippy::cast_precision_loss,
		clippy::cast_possible_truncation,
		clippy::cast_sign_loss
	)]
	pub fn cast(self, value: &SettingValue) -> Result<SettingValue, String> {
		match (self, value) {
			(SettingKind::Bool, SettingValue::Bool(_))
			| (SettingKind::Int, SettingValue::Int(_))
			| (SettingKind::UInt, SettingValue::UInt(_))
			| (SettingKind::Float, SettingValue::Float(_))
			| (SettingKind::String, SettingValue::String(_))
			| (SettingKind::Json, SettingValue::Json(_)) => Ok(value.clone()),

			(SettingKind::Bool, SettingValue::Int(0) | SettingValue::UInt(0)) => {
				Ok(SettingValue::Bool(false))
			}
			(SettingKind::Bool, SettingValue::Int(1) | SettingValue::UInt(1)) => {
				Ok(SettingValue::Bool(true))
			}
			(SettingKind::Bool, SettingValue::String(s)) => match s.trim().to_lowercase().as_str() {
				"1" | "true" => Ok(SettingValue::Bool(true)),
				"0" | "false" => Ok(SettingValue::Bool(false)),
				_ => Err(format!("'{}' is not a boolean", s)),
			},

			(SettingKind::Int, SettingValue::Bool(b)) => Ok(SettingValue::Int(i64::from(*b))),
			(SettingKind::Int, SettingValue::UInt(u)) => i64::try_from(*u)
				.map(SettingValue::Int)
				.map_err(|_| format!("{} is out of range for int", u)),
			(SettingKind::Int, SettingValue::Float(f)) if f.fract() == 0.0 && f.abs() < 9.2e18 => {
				Ok(SettingValue::Int(*f as i64))
			}
			(SettingKind::Int, SettingValue::String(s)) => s
				.trim()
				.parse::<i64>()
				.map(SettingValue::Int)
				.map_err(|e| format!("'{}' is not an integer: {}", s, e)),

			(SettingKind::UInt, SettingValue::Bool(b)) => Ok(SettingValue::UInt(u64::from(*b))),
			(SettingKind::UInt, SettingValue::Int(i)) => u64::try_from(*i)
				.map(SettingValue::UInt)
				.map_err(|_| format!("{} is out of range for uint", i)),
			(SettingKind::UInt, SettingValue::Float(f))
				if f.fract() == 0.0 && *f >= 0.0 && *f < 1.8e19 =>
			{
				Ok(SettingValue::UInt(*f as u64))
			}
			(SettingKind::UInt, SettingValue::String(s)) => s
				.trim()
				.parse::<u64>()
				.map(SettingValue::UInt)
				.map_err(|e| format!("'{}' is not an unsigned integer: {}", s, e)),

			(SettingKind::Float, SettingValue::Bool(b)) => {
				Ok(SettingValue::Float(f64::from(u8::from(*b))))
			}
			(SettingKind::Float, SettingValue::Int(i)) => Ok(SettingValue::Float(*i as f64)),
			(SettingKind::Float, SettingValue::UInt(u)) => Ok(SettingValue::Float(*u as f64)),
			(SettingKind::Float, SettingValue::String(s)) => s
				.trim()
				.parse::<f64>()
				.map(SettingValue::Float)
				.map_err(|e| format!("'{}' is not a number: {}", s, e)),

			(SettingKind::String, SettingValue::Bool(_))
			| (SettingKind::String, SettingValue::Int(_))
			| (SettingKind::String, SettingValue::UInt(_))
			| (SettingKind::String, SettingValue::Float(_)) => {
				Ok(SettingValue::String(unquoted(value)))
			}
			(SettingKind::String, SettingValue::Json(j)) => Ok(SettingValue::String(j.to_string())),

			(SettingKind::Json, SettingValue::String(s)) => Ok(SettingValue::Json(
				serde_json::from_str(s).unwrap_or_else(|_| serde_json::Value::String(s.clone())),
			)),
			(SettingKind::Json, v) => serde_json::to_value(v)
				.map(SettingValue::Json)
				.map_err(|e| format!("cannot convert to json: {}", e)),

			(kind, v) => Err(format!("cannot convert {} to {:?}", v.type_name(), kind)),
		}
	}
}

fn unquoted(value: &SettingValue) -> String {
	match value {
		SettingValue::String(s) => s.clone(),
		v => v.to_string(),
	}
}

/// Setting permission level defines who can modify a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionLevel {
	/// System: Cannot be changed at runtime (read-only)
	#[serde(rename = "system")]
	System,
	/// Admin: Only users with admin role can change
	#[serde(rename = "admin")]
	Admin,
	/// User: Anyone can change it
	#[serde(rename = "user")]
	User,
}

impl PermissionLevel {
	/// Check if the given roles satisfy this permission level
	pub fn check<S: AsRef<str>>(&self, roles: &[S]) -> bool {
		match self {
			PermissionLevel::System => false, // Never changeable
			PermissionLevel::Admin => roles.iter().any(|r| r.as_ref() == "SADM"),
			PermissionLevel::User => true,
		}
	}
}

/// Setting definition - defines metadata for each setting
#[derive(Debug, Clone)]
pub struct SettingDefinition {
	/// Setting name, or a `prefix.*` wildcard pattern
	pub key: String,

	/// Human-readable description
	pub description: String,

	pub kind: SettingKind,

	/// Value reported when the setting was never set
	pub default: Option<SettingValue>,

	/// Permission level required to modify this setting
	pub permission: PermissionLevel,
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(key: impl Into<String>, kind: SettingKind) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key, kind)
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: String,
	kind: SettingKind,
	description: Option<String>,
	default: Option<SettingValue>,
	permission: PermissionLevel,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>, kind: SettingKind) -> Self {
		Self {
			key: key.into(),
			kind,
			description: None,
			default: None,
			permission: PermissionLevel::User,
		}
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	pub fn default(mut self, value: impl Into<SettingValue>) -> Self {
		self.default = Some(value.into());
		self
	}

	/// Set the permission level (defaults to User)
	pub fn permission(mut self, permission: PermissionLevel) -> Self {
		self.permission = permission;
		self
	}

	/// Build the SettingDefinition
	pub fn build(self) -> SgResult<SettingDefinition> {
		let description = self
			.description
			.ok_or_else(|| {
				Error::ConfigError(format!("Setting '{}' needs a description", self.key))
			})?;

		// Defaults are stored in their declared kind
		let default = match self.default {
			Some(value) => Some(self.kind.cast(&value).map_err(|reason| {
				let message = format!("Invalid default for setting '{}': {}", self.key, reason);
				Error::ConfigError(message)
			})?),
			None => None,
		};

		Ok(SettingDefinition {
			key: self.key,
			description,
			kind: self.kind,
			default,
			permission: self.permission,
		})
	}
}

/// Mutable registry used during initialization
pub struct SettingsRegistry {
	definitions: HashMap<String, SettingDefinition>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { definitions: HashMap::new() }
	}

	/// Register a new setting definition
	pub fn register(&mut self, def: SettingDefinition) -> SgResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		debug!("Registering setting: {}", def.key);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		info!("Freezing settings registry with {} definitions", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions }
	}

	/// Get number of registered settings
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Check if registry is empty
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry, shared between the store, access control and constraints
pub struct FrozenSettingsRegistry {
	definitions: HashMap<String, SettingDefinition>,
}

impl FrozenSettingsRegistry {
	/// Get a setting definition by key
	/// First tries exact match, then tries wildcard pattern "<first_element>.*"
	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		if let Some(def) = self.definitions.get(key) {
			return Some(def);
		}

		if let Some(dot_pos) = key.find('.') {
			let wildcard_key = format!("{}.*", &key[..dot_pos]);
			if let Some(def) = self.definitions.get(&wildcard_key) {
				return Some(def);
			}
		}

		None
	}

	/// List settings with a specific prefix
	pub fn list_by_prefix<'a>(
		&'a self,
		prefix: &'a str,
	) -> Box<dyn Iterator<Item = &'a SettingDefinition> + 'a> {
		Box::new(self.definitions.values().filter(move |def| def.key.starts_with(prefix)))
	}

	/// Get number of registered settings
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Check if registry is empty
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl SettingsCatalog for FrozenSettingsRegistry {
	fn cast(&self, name: &str, value: &SettingValue) -> SgResult<SettingValue> {
		let def = self
			.get(name)
			.ok_or_else(|| Error::UnknownSetting {
				name: name.to_string(),
				hints: self.hints(name),
			})?;

		def.kind.cast(value).map_err(|reason| Error::CastFailure {
			name: name.to_string(),
			value: value.to_string(),
			reason,
		})
	}

	fn hints(&self, name: &str) -> Vec<String> {
		super::hints::similar_names(name, self.definitions.keys().map(String::as_str))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_kind_cast() {
		assert_eq!(SettingKind::UInt.cast(&"16".into()), Ok(SettingValue::UInt(16)));
		assert_eq!(SettingKind::Int.cast(&SettingValue::UInt(7)), Ok(SettingValue::Int(7)));
		assert_eq!(SettingKind::Bool.cast(&"TRUE".into()), Ok(SettingValue::Bool(true)));
		assert_eq!(SettingKind::Bool.cast(&SettingValue::Int(0)), Ok(SettingValue::Bool(false)));
		assert_eq!(SettingKind::Float.cast(&SettingValue::Int(2)), Ok(SettingValue::Float(2.0)));
		assert_eq!(SettingKind::String.cast(&SettingValue::Int(2)), Ok(SettingValue::from("2")));
		assert_eq!(
			SettingKind::Json.cast(&"{\"a\":1}".into()),
			Ok(SettingValue::Json(serde_json::json!({"a": 1})))
		);

		assert!(SettingKind::UInt.cast(&SettingValue::Int(-1)).is_err());
		assert!(SettingKind::Int.cast(&"abc".into()).is_err());
		assert!(SettingKind::Int.cast(&SettingValue::Float(1.5)).is_err());
		assert!(SettingKind::Bool.cast(&SettingValue::Int(2)).is_err());
	}

	#[test]
	fn test_builder_requires_description() {
		let res = SettingDefinition::builder("x", SettingKind::Int).build();
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_builder_casts_default() {
		let def = SettingDefinition::builder("x", SettingKind::UInt)
			.description("x")
			.default("4")
			.build()
			.unwrap();
		assert_eq!(def.default, Some(SettingValue::UInt(4)));

		let res = SettingDefinition::builder("x", SettingKind::UInt)
			.description("x")
			.default("four")
			.build();
		assert!(res.is_err());
	}

	#[test]
	fn test_registry_duplicates_and_wildcards() {
		let mut registry = SettingsRegistry::new();
		let def = || {
			SettingDefinition::builder("custom.*", SettingKind::String)
				.description("custom")
				.build()
				.unwrap()
		};
		registry.register(def()).unwrap();
		assert!(registry.register(def()).is_err());

		let frozen = registry.freeze();
		assert!(frozen.get("custom.anything").is_some());
		assert!(frozen.get("custom").is_none());
		assert!(frozen.get("other.anything").is_none());
		assert_eq!(frozen.list_by_prefix("custom").count(), 1);
	}

	#[test]
	fn test_catalog_cast_errors() {
		let mut registry = SettingsRegistry::new();
		registry
			.register(
				SettingDefinition::builder("max_threads", SettingKind::UInt)
					.description("threads")
					.build()
					.unwrap(),
			)
			.unwrap();
		let frozen = registry.freeze();

		assert_eq!(frozen.cast("max_threads", &"8".into()), Ok(SettingValue::UInt(8)));
		assert!(matches!(
			frozen.cast("max_threads", &"eight".into()),
			Err(Error::CastFailure { .. })
		));
		assert_eq!(
			frozen.cast("max_thread", &"8".into()),
			Err(Error::UnknownSetting {
				name: "max_thread".into(),
				hints: vec!["max_threads".into()]
			})
		);
	}
}

// vim: ts=4
