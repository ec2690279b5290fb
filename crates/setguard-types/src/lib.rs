//! Shared types, collaborator traits, and core utilities for setguard.
//!
//! This crate contains the foundational types that are shared between the
//! constraint engine and every registry or access-control implementation
//! plugged into it.

pub mod adapter;
pub mod change;
pub mod error;
pub mod prelude;
pub mod value;

// vim: ts=4
