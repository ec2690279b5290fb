//! Settings constraint engine
//!
//! # Architecture
//!
//! - **Rules** (`rule.rs`): per-setting bounds and flags, the rule table and its merge policy
//! - **Ranges** (`range.rs`): effective constraint resolution with synthetic providers
//! - **Checks** (`check.rs`): the decision function, parameterized by [`Enforcement`]
//!
//! # Enforcement modes
//!
//! The same decision tree runs in both modes; only the terminal action differs:
//! - **Strict**: the first violation is returned as an error
//! - **Permissive**: violating changes are dropped, or clamped to the nearest bound

pub mod check;
pub mod range;
pub mod rule;

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::prelude::*;

pub use check::Enforcement;
pub use range::{DdlGuard, Explain, ForbiddenKind, Range, RangeProvider, ReadonlyGuard};
pub use rule::{MergePolicy, Rule, RuleTable};

/// Resolved constraint of one setting, for introspection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintInfo {
	pub min_value: Option<SettingValue>,
	pub max_value: Option<SettingValue>,
	pub is_const: bool,
}

/// Rule table bound to the catalog and authority it is checked against
#[derive(Clone)]
pub struct SettingsConstraints {
	rules: RuleTable,
	providers: Vec<Arc<dyn RangeProvider>>,
	catalog: Arc<dyn SettingsCatalog>,
	access: Arc<dyn AccessAuthority>,
}

impl SettingsConstraints {
	pub fn new(catalog: Arc<dyn SettingsCatalog>, access: Arc<dyn AccessAuthority>) -> Self {
		Self {
			rules: RuleTable::new(),
			providers: Vec::new(),
			catalog,
			access,
		}
	}

	/// Add a synthetic rule provider, consulted after the built-in guards and
	/// the `readonly=1` whitelist
	pub fn with_provider(mut self, provider: Arc<dyn RangeProvider>) -> Self {
		self.providers.push(provider);
		self
	}

	pub fn rules(&self) -> &RuleTable {
		&self.rules
	}

	pub fn clear(&mut self) {
		self.rules.clear();
	}

	/// Set the lower bound; the value is cast to the setting's declared type
	pub fn set_min_value(
		&mut self,
		name: &str,
		min_value: impl Into<SettingValue>,
	) -> SgResult<()> {
		let value = self.catalog.cast(name, &min_value.into())?;
		self.rules.entry(name).min_value = Some(value);
		Ok(())
	}

	/// Set the upper bound; the value is cast to the setting's declared type
	pub fn set_max_value(
		&mut self,
		name: &str,
		max_value: impl Into<SettingValue>,
	) -> SgResult<()> {
		let value = self.catalog.cast(name, &max_value.into())?;
		self.rules.entry(name).max_value = Some(value);
		Ok(())
	}

	pub fn set_is_const(&mut self, name: &str, is_const: bool) {
		self.rules.entry(name).is_const = is_const;
	}

	pub fn set_changeable_in_readonly(&mut self, name: &str, changeable_in_readonly: bool) {
		self.rules.entry(name).changeable_in_readonly = changeable_in_readonly;
	}

	/// Effective `(min, max, is_const)` of a setting under the current settings
	pub fn get(&self, settings: &dyn SettingsSnapshot, name: &str) -> ConstraintInfo {
		let range = self.get_range(settings, name);
		ConstraintInfo {
			min_value: range.min_value,
			max_value: range.max_value,
			is_const: range.is_const,
		}
	}

	/// Merge another rule set using the authority's merge policy
	pub fn merge(&mut self, other: &SettingsConstraints) {
		let policy = MergePolicy::from_replace_flag(self.access.constraints_replace_previous());
		self.merge_with(other, policy);
	}

	pub fn merge_with(&mut self, other: &SettingsConstraints, policy: MergePolicy) {
		info!("Merging {} setting constraints ({:?})", other.rules.len(), policy);
		self.rules.merge(&other.rules, policy);
	}

	pub fn get_range(&self, settings: &dyn SettingsSnapshot, name: &str) -> Range {
		range::resolve_range(&self.providers, &self.rules, settings, name)
	}

	/// Strict check of a single change
	pub fn check(&self, settings: &dyn SettingsSnapshot, change: &SettingChange) -> SgResult<()> {
		// Strict mode never rewrites, the copy only satisfies the shared signature
		let mut change = change.clone();
		self.check_impl(settings, &mut change, Enforcement::Strict)?;
		Ok(())
	}

	/// Strict check of a batch; stops at the first violation
	pub fn check_all(
		&self,
		settings: &dyn SettingsSnapshot,
		changes: &[SettingChange],
	) -> SgResult<()> {
		for change in changes {
			self.check(settings, change)?;
		}
		Ok(())
	}

	/// Strict check of a batch that also drops no-op entries.
	///
	/// On error, entries before the failing one may already be filtered out.
	pub fn check_and_filter(
		&self,
		settings: &dyn SettingsSnapshot,
		changes: &mut SettingsChanges,
	) -> SgResult<()> {
		let mut result = Ok(());
		changes.retain_mut(|change| {
			if result.is_err() {
				return true;
			}
			match self.check_impl(settings, change, Enforcement::Strict) {
				Ok(keep) => keep,
				Err(err) => {
					result = Err(err);
					true
				}
			}
		});
		result
	}

	/// Permissive check of a batch: violating entries are clamped or dropped
	pub fn clamp(&self, settings: &dyn SettingsSnapshot, changes: &mut SettingsChanges) {
		changes.retain_mut(|change| {
			// Permissive mode reports every violation as Ok(false)
			self.check_impl(settings, change, Enforcement::Permissive).unwrap_or(false)
		});
	}
}

impl PartialEq for SettingsConstraints {
	fn eq(&self, other: &Self) -> bool {
		self.rules == other.rules
	}
}

impl fmt::Debug for SettingsConstraints {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SettingsConstraints")
			.field("rules", &self.rules)
			.field("providers", &self.providers)
			.finish_non_exhaustive()
	}
}


// vim: ts=4
