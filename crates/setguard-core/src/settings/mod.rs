//! Settings registry: declared kinds, definitions and current values
//!
//! - **Types** (`types.rs`): kinds, definitions, builder and registry
//! - **Store** (`store.rs`): in-memory current values
//! - **Hints** (`hints.rs`): name suggestions for unknown settings

pub mod hints;
pub mod store;
pub mod types;

pub use store::SettingsStore;
pub use types::{
	FrozenSettingsRegistry, PermissionLevel, SettingDefinition, SettingDefinitionBuilder,
	SettingKind, SettingsRegistry,
};

// vim: ts=4
