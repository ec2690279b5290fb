//! Effective constraint resolution.
//!
//! A [`Range`] is what a single check runs against. It comes either from a
//! rule table entry or from a synthetic provider that forbids a setting
//! outright given the current global state.

use std::fmt::Debug;
use std::sync::Arc;

use super::rule::{Rule, RuleTable};
use crate::prelude::*;
use setguard_types::adapter::{ALLOW_DDL_SETTING, READONLY_SETTING};

/// Why a synthetic range forbids a change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenKind {
	ReadOnly,
	DdlProhibited,
}

/// Explanation carried by a forbidden range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explain {
	pub message: String,
	pub kind: ForbiddenKind,
}

impl Explain {
	pub fn to_error(&self) -> Error {
		match self.kind {
			ForbiddenKind::ReadOnly => Error::ReadOnlyViolation(self.message.clone()),
			ForbiddenKind::DdlProhibited => Error::DdlProhibited(self.message.clone()),
		}
	}
}

/// Resolved, transient constraint for one check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Range {
	pub min_value: Option<SettingValue>,
	pub max_value: Option<SettingValue>,
	pub is_const: bool,
	pub changeable_in_readonly: bool,
	/// Present on forbidden ranges; always fails the check
	pub explain: Option<Explain>,
}

impl Range {
	/// No constraint at all
	pub fn allowed() -> Self {
		Self::default()
	}

	pub fn forbidden(message: impl Into<String>, kind: ForbiddenKind) -> Self {
		Self { explain: Some(Explain { message: message.into(), kind }), ..Self::default() }
	}

	pub fn is_forbidden(&self) -> bool {
		self.explain.is_some()
	}
}

impl From<&Rule> for Range {
	fn from(rule: &Rule) -> Self {
		Self {
			min_value: rule.min_value.clone(),
			max_value: rule.max_value.clone(),
			is_const: rule.is_const,
			changeable_in_readonly: rule.changeable_in_readonly,
			explain: None,
		}
	}
}

/// Synthetic rule source consulted before the rule table.
///
/// Returning `Some` ends resolution with that range.
pub trait RangeProvider: Debug + Send + Sync {
	fn resolve(&self, settings: &dyn SettingsSnapshot, name: &str) -> Option<Range>;
}

/// Forbids re-enabling DDL while DDL is prohibited
#[derive(Debug, Default)]
pub struct DdlGuard;

impl RangeProvider for DdlGuard {
	fn resolve(&self, settings: &dyn SettingsSnapshot, name: &str) -> Option<Range> {
		(name == ALLOW_DDL_SETTING && !settings.allow_ddl()).then(|| {
			Range::forbidden(
				format!(
					"Cannot modify '{}' setting when DDL queries are prohibited for the user",
					ALLOW_DDL_SETTING
				),
				ForbiddenKind::DdlProhibited,
			)
		})
	}
}

/// Forbids changing `readonly` itself at the strict read-only level
#[derive(Debug, Default)]
pub struct ReadonlyGuard;

impl RangeProvider for ReadonlyGuard {
	fn resolve(&self, settings: &dyn SettingsSnapshot, name: &str) -> Option<Range> {
		(name == READONLY_SETTING && settings.readonly_level() == ReadonlyLevel::SettingsOnly).then(
			|| {
				Range::forbidden(
					format!("Cannot modify '{}' setting in readonly mode", READONLY_SETTING),
					ForbiddenKind::ReadOnly,
				)
			},
		)
	}
}

/// Guards consulted ahead of everything else
static BUILTIN_PROVIDERS: &[&dyn RangeProvider] = &[&DdlGuard, &ReadonlyGuard];

/// Resolve the effective range of `name`.
///
/// Order: built-in guards, the `readonly=1` whitelist, extra providers, the
/// table. Extra providers never see a name the whitelist rejects.
pub fn resolve_range(
	providers: &[Arc<dyn RangeProvider>],
	rules: &RuleTable,
	settings: &dyn SettingsSnapshot,
	name: &str,
) -> Range {
	if let Some(range) = BUILTIN_PROVIDERS.iter().find_map(|p| p.resolve(settings, name)) {
		return range;
	}

	let rule = rules.get(name);
	if settings.readonly_level() == ReadonlyLevel::ChangeableOnly
		&& !rule.is_some_and(|rule| rule.changeable_in_readonly)
	{
		return Range::forbidden(
			format!("Cannot modify '{}' setting in readonly mode", name),
			ForbiddenKind::ReadOnly,
		);
	}

	if let Some(range) = providers.iter().find_map(|p| p.resolve(settings, name)) {
		return range;
	}

	rule.map(Range::from).unwrap_or_else(Range::allowed)
}


// vim: ts=4
