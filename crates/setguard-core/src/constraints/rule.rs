//! Per-setting rules and the rule table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::prelude::*;

/// Constraint attached to a single setting name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
	/// Lower bound, `None` means unbounded
	pub min_value: Option<SettingValue>,
	/// Upper bound, `None` means unbounded
	pub max_value: Option<SettingValue>,
	/// Forbids any change regardless of value
	pub is_const: bool,
	/// Exempts the setting from `readonly = 1`
	pub changeable_in_readonly: bool,
}

/// How a merged rule set combines with the existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
	/// Incoming entries overwrite existing ones wholesale
	Replace,
	/// Only explicitly set fields are applied; constancy can only be turned on
	#[default]
	Narrow,
}

impl MergePolicy {
	pub fn from_replace_flag(replace_previous: bool) -> Self {
		if replace_previous { MergePolicy::Replace } else { MergePolicy::Narrow }
	}
}

/// Mapping from setting name to [`Rule`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
	rules: HashMap<String, Rule>,
}

impl RuleTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<&Rule> {
		self.rules.get(name)
	}

	/// Entry for `name`, created empty if missing
	pub fn entry(&mut self, name: &str) -> &mut Rule {
		self.rules.entry(name.to_string()).or_default()
	}

	pub fn insert(&mut self, name: impl Into<String>, rule: Rule) {
		self.rules.insert(name.into(), rule);
	}

	pub fn clear(&mut self) {
		self.rules.clear();
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
		self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Fold `other` into this table
	pub fn merge(&mut self, other: &RuleTable, policy: MergePolicy) {
		match policy {
			MergePolicy::Replace => {
				for (name, rule) in &other.rules {
					self.rules.insert(name.clone(), rule.clone());
				}
			}
			MergePolicy::Narrow => {
				for (name, other_rule) in &other.rules {
					let rule = self.entry(name);
					if let Some(min) = &other_rule.min_value {
						rule.min_value = Some(min.clone());
					}
					if let Some(max) = &other_rule.max_value {
						rule.max_value = Some(max.clone());
					}
					// Never reset to false once any source marked it constant
					rule.is_const |= other_rule.is_const;
				}
			}
		}
	}
}


// vim: ts=4
