//! Error type shared by the constraint engine and its collaborators

use std::fmt;

use crate::value::SettingValue;

pub type SgResult<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
	/// Setting name is not known to the registry
	UnknownSetting { name: String, hints: Vec<String> },
	/// Setting exists but the current authority may not touch it
	PermissionDenied { name: String },
	/// Global read-only level forbids the change
	ReadOnlyViolation(String),
	/// DDL is prohibited and the change would lift the prohibition
	DdlProhibited(String),
	ConstViolation { name: String },
	/// Administrator misconfiguration: max is below min
	InvertedRange { name: String },
	BelowMinimum { name: String, min: SettingValue },
	AboveMaximum { name: String, max: SettingValue },
	CastFailure { name: String, value: String, reason: String },
	NotComparable { left: String, right: String },
	ConfigError(String),
}

impl Error {
	/// Stable machine-readable code for the error class
	pub fn code(&self) -> &'static str {
		match self {
			Error::UnknownSetting { .. } => "E-SETTING-UNKNOWN",
			Error::PermissionDenied { .. } => "E-PERMISSION",
			Error::ReadOnlyViolation(_) => "E-READONLY",
			Error::DdlProhibited(_) => "E-DDL-PROHIBITED",
			Error::ConstViolation { .. }
			| Error::InvertedRange { .. }
			| Error::BelowMinimum { .. }
			| Error::AboveMaximum { .. } => "E-SETTING-CONSTRAINT",
			Error::CastFailure { .. } => "E-SETTING-CAST",
			Error::NotComparable { .. } => "E-NOT-COMPARABLE",
			Error::ConfigError(_) => "E-CONFIG",
		}
	}

	/// Name of the setting the error refers to, if any
	pub fn setting_name(&self) -> Option<&str> {
		match self {
			Error::UnknownSetting { name, .. }
			| Error::PermissionDenied { name }
			| Error::ConstViolation { name }
			| Error::InvertedRange { name }
			| Error::BelowMinimum { name, .. }
			| Error::AboveMaximum { name, .. }
			| Error::CastFailure { name, .. } => Some(name),
			_ => None,
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::UnknownSetting { name, hints } => {
				write!(f, "Unknown setting '{}'", name)?;
				if !hints.is_empty() {
					write!(f, ". Maybe you meant {:?}", hints)?;
				}
				Ok(())
			}
			Error::PermissionDenied { name } => {
				write!(f, "Not enough privileges to change setting '{}'", name)
			}
			Error::ReadOnlyViolation(msg) | Error::DdlProhibited(msg) | Error::ConfigError(msg) => {
				write!(f, "{}", msg)
			}
			Error::ConstViolation { name } | Error::InvertedRange { name } => {
				write!(f, "Setting {} should not be changed", name)
			}
			Error::BelowMinimum { name, min } => {
				write!(f, "Setting {} shouldn't be less than {}", name, min)
			}
			Error::AboveMaximum { name, max } => {
				write!(f, "Setting {} shouldn't be greater than {}", name, max)
			}
			Error::CastFailure { name, value, reason } => {
				write!(f, "Cannot convert {} to the type of setting '{}': {}", value, name, reason)
			}
			Error::NotComparable { left, right } => {
				write!(f, "Cannot compare {} with {}", left, right)
			}
		}
	}
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::ConfigError(format!("Invalid configuration: {}", err))
	}
}


// vim: ts=4
