//! Shared identifiers, units and the error taxonomy.

pub mod core;
pub mod error;
