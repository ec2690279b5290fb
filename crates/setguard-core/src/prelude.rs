pub use setguard_types::prelude::*;

// vim: ts=4
