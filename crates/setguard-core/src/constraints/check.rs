//! Change validation: one decision tree shared by strict and permissive mode

use super::SettingsConstraints;
use super::range::Range;
use crate::prelude::*;
use setguard_types::adapter::PROFILE_SETTING;

/// What to do when a change violates its range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforcement {
	/// Return the first violation as an error
	Strict,
	/// Drop the change or rewrite its value to the nearest bound
	Permissive,
}

impl Enforcement {
	/// Terminal action for a violation: error in strict mode, drop otherwise
	fn reject(self, name: &str, err: impl FnOnce() -> Error) -> SgResult<bool> {
		match self {
			Enforcement::Strict => {
				let err = err();
				warn!("Setting change rejected: {}", err);
				Err(err)
			}
			Enforcement::Permissive => {
				debug!("Dropping change of setting '{}'", name);
				Ok(false)
			}
		}
	}

	/// Ordering check; permissive mode reads "cannot compare" as "less"
	fn less(self, left: &SettingValue, right: &SettingValue) -> SgResult<bool> {
		match self {
			Enforcement::Strict => left.accurate_less(right),
			Enforcement::Permissive => Ok(left.accurate_less(right).unwrap_or(true)),
		}
	}
}

impl Range {
	/// Check `new_value` (already cast) against this range.
	///
	/// Returns `Ok(true)` if the change should be kept, possibly with its
	/// value rewritten to a bound, and `Ok(false)` if it should be dropped.
	/// Only strict mode returns errors.
	pub fn check(
		&self,
		change: &mut SettingChange,
		new_value: &SettingValue,
		mode: Enforcement,
	) -> SgResult<bool> {
		let name = change.name.as_str();

		if let Some(explain) = &self.explain {
			return mode.reject(name, || explain.to_error());
		}

		if self.is_const {
			return mode.reject(name, || Error::ConstViolation { name: name.to_string() });
		}

		if let (Some(min), Some(max)) = (&self.min_value, &self.max_value) {
			if mode.less(max, min)? {
				warn!("Constraint of setting '{}' is inverted: max {} < min {}", name, max, min);
				return mode.reject(name, || Error::InvertedRange { name: name.to_string() });
			}
		}

		if let Some(min) = &self.min_value {
			if mode.less(new_value, min)? {
				if mode == Enforcement::Strict {
					return mode.reject(name, || Error::BelowMinimum {
						name: name.to_string(),
						min: min.clone(),
					});
				}
				debug!("Clamping setting '{}' up to {}", name, min);
				change.value = min.clone();
				return Ok(true);
			}
		}

		if let Some(max) = &self.max_value {
			if mode.less(max, new_value)? {
				if mode == Enforcement::Strict {
					return mode.reject(name, || Error::AboveMaximum {
						name: name.to_string(),
						max: max.clone(),
					});
				}
				debug!("Clamping setting '{}' down to {}", name, max);
				change.value = max.clone();
				return Ok(true);
			}
		}

		Ok(true)
	}
}

impl SettingsConstraints {
	/// Decide one change. `Ok(false)` means "drop silently".
	pub(super) fn check_impl(
		&self,
		settings: &dyn SettingsSnapshot,
		change: &mut SettingChange,
		mode: Enforcement,
	) -> SgResult<bool> {
		if change.name == PROFILE_SETTING {
			return Ok(true);
		}

		match mode {
			Enforcement::Strict => {
				if let Err(err) = self.access.check_setting_allowed(&change.name) {
					return Err(match err {
						Error::UnknownSetting { name, .. } => {
							let hints = self.catalog.hints(&name);
							Error::UnknownSetting { name, hints }
						}
						err => err,
					});
				}
			}
			Enforcement::Permissive => {
				if !self.access.is_setting_allowed(&change.name) {
					debug!("Dropping change of unknown or hidden setting '{}'", change.name);
					return Ok(false);
				}
			}
		}

		let current = settings.try_get(&change.name);

		// Unchanged values are not checked, even if their raw form cannot be cast
		if current.as_ref() == Some(&change.value) {
			debug!("Setting '{}' unchanged, skipping", change.name);
			return Ok(false);
		}

		let new_value = match self.catalog.cast(&change.name, &change.value) {
			Ok(value) => value,
			Err(err) if mode == Enforcement::Strict => return Err(err),
			Err(err) => {
				debug!("Dropping change of setting '{}': {}", change.name, err);
				return Ok(false);
			}
		};

		if current.as_ref() == Some(&new_value) {
			debug!("Setting '{}' unchanged after cast, skipping", change.name);
			return Ok(false);
		}

		self.get_range(settings, &change.name).check(change, &new_value, mode)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::constraints::range::ForbiddenKind;

	fn range(min: Option<i64>, max: Option<i64>) -> Range {
		Range {
			min_value: min.map(SettingValue::from),
			max_value: max.map(SettingValue::from),
			..Range::default()
		}
	}

	fn run(
		range: &Range,
		value: impl Into<SettingValue>,
		mode: Enforcement,
	) -> (SgResult<bool>, SettingChange) {
		let value = value.into();
		let mut change = SettingChange::new("x", value.clone());
		let res = range.check(&mut change, &value, mode);
		(res, change)
	}

	#[test]
	fn test_clamp_to_bounds() {
		let r = range(Some(10), Some(20));

		let (res, change) = run(&r, 5i64, Enforcement::Permissive);
		assert_eq!(res, Ok(true));
		assert_eq!(change.value, SettingValue::Int(10));

		let (res, change) = run(&r, 25i64, Enforcement::Permissive);
		assert_eq!(res, Ok(true));
		assert_eq!(change.value, SettingValue::Int(20));

		let (res, change) = run(&r, 15i64, Enforcement::Permissive);
		assert_eq!(res, Ok(true));
		assert_eq!(change.value, SettingValue::Int(15));
	}

	#[test]
	fn test_strict_bounds() {
		let r = range(Some(10), Some(20));
		let (res, change) = run(&r, 5i64, Enforcement::Strict);
		assert!(matches!(res, Err(Error::BelowMinimum { .. })));
		assert_eq!(change.value, SettingValue::Int(5));

		let (res, _) = run(&r, 25i64, Enforcement::Strict);
		assert_eq!(res.unwrap_err().to_string(), "Setting x shouldn't be greater than 20");

		assert_eq!(run(&r, 20i64, Enforcement::Strict).0, Ok(true));
	}

	#[test]
	fn test_explain_wins_over_bounds() {
		let mut r = Range::forbidden("nope", ForbiddenKind::ReadOnly);
		r.min_value = Some(0i64.into());
		let (res, _) = run(&r, 5i64, Enforcement::Strict);
		assert_eq!(res, Err(Error::ReadOnlyViolation("nope".into())));
		assert_eq!(run(&r, 5i64, Enforcement::Permissive).0, Ok(false));
	}

	#[test]
	fn test_const_and_inverted() {
		let r = Range { is_const: true, ..Range::default() };
		assert!(matches!(run(&r, 1i64, Enforcement::Strict).0, Err(Error::ConstViolation { .. })));
		assert_eq!(run(&r, 1i64, Enforcement::Permissive).0, Ok(false));

		let r = range(Some(20), Some(10));
		for v in [0i64, 15, 30] {
			assert!(matches!(run(&r, v, Enforcement::Strict).0, Err(Error::InvertedRange { .. })));
			assert_eq!(run(&r, v, Enforcement::Permissive).0, Ok(false));
		}
	}

	#[test]
	fn test_incomparable_values() {
		let r = range(Some(10), None);
		let (res, _) = run(&r, "abc", Enforcement::Strict);
		assert!(matches!(res, Err(Error::NotComparable { .. })));

		// Permissive mode treats "cannot compare" as "less", forcing the clamp
		let (res, change) = run(&r, "abc", Enforcement::Permissive);
		assert_eq!(res, Ok(true));
		assert_eq!(change.value, SettingValue::Int(10));

		// Incomparable bounds read as inverted
		let r = Range {
			min_value: Some("a".into()),
			max_value: Some(1i64.into()),
			..Range::default()
		};
		assert_eq!(run(&r, 1i64, Enforcement::Permissive).0, Ok(false));
	}
}

// vim: ts=4
