//! Declarative timeline descriptions and the builder DSL over them.

pub mod dsl;
pub mod spec;
