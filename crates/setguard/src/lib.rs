//! Settings-constraint enforcement.
//!
//! Re-exports the shared types and the engine so that callers depend on a
//! single crate.

pub use setguard_core::{
	access, constraints, core_settings, register_settings, settings, AccessConfig, AccessControl,
	ConstraintInfo, Enforcement, MergePolicy, Rule, RuleTable, SettingsConstraints,
};
pub use setguard_types::{adapter, change, error, value};

pub mod prelude {
	pub use setguard_core::prelude::*;
}

// vim: ts=4
