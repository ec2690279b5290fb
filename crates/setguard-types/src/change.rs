//! Proposed setting changes and the global read-only level

use serde::{Deserialize, Serialize};

use crate::value::SettingValue;

/// A single proposed `name = value` change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingChange {
	pub name: String,
	pub value: SettingValue,
}

impl SettingChange {
	pub fn new(name: impl Into<String>, value: impl Into<SettingValue>) -> Self {
		Self { name: name.into(), value: value.into() }
	}
}

/// Ordered batch of changes; order is significant to the caller
pub type SettingsChanges = Vec<SettingChange>;

/// Value of the `readonly` setting.
///
/// - 0: no read-only restrictions
/// - 1: only settings explicitly marked changeable in read-only mode may change
/// - 2: any setting may change except `readonly` itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReadonlyLevel {
	#[default]
	Unrestricted,
	ChangeableOnly,
	SettingsOnly,
}

impl ReadonlyLevel {
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	pub fn from_value(value: &SettingValue) -> Self {
		let level = match value {
			SettingValue::Bool(b) => u64::from(*b),
			SettingValue::Int(i) => u64::try_from(*i).unwrap_or(0),
			SettingValue::UInt(u) => *u,
			SettingValue::Float(f) if *f >= 0.0 => *f as u64,
			SettingValue::String(s) => s.trim().parse().unwrap_or(0),
			SettingValue::Float(_) | SettingValue::Json(_) => 0,
		};
		match level {
			0 => ReadonlyLevel::Unrestricted,
			1 => ReadonlyLevel::ChangeableOnly,
			_ => ReadonlyLevel::SettingsOnly,
		}
	}
}


// vim: ts=4
