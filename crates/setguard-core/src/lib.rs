//! Settings-constraint enforcement engine.
//!
//! Decides whether proposed changes to typed settings are allowed under a
//! set of administrator rules (bounds, constancy, read-only overrides), and
//! in permissive mode rewrites out-of-range values to the nearest bound.
//! A reference registry and access control implementation of the
//! collaborator traits live alongside the engine.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod access;
pub mod constraints;
pub mod core_settings;
pub mod prelude;
pub mod settings;

pub use access::{AccessConfig, AccessControl};
pub use constraints::{
	ConstraintInfo, Enforcement, MergePolicy, Rule, RuleTable, SettingsConstraints,
};

use crate::prelude::*;

pub fn register_settings(registry: &mut settings::SettingsRegistry) -> SgResult<()> {
	core_settings::register_settings(registry)
}

// vim: ts=4
