//! Common test utilities and helpers
//!
//! Shared registry, access control and engine builders for the integration tests.

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;

/// Initialize tracing output for tests that want to see engine decisions
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

// vim: ts=4
