//! CLI command implementations for Veil.

pub mod aliases;
pub mod check;
pub mod mask;
pub mod scan;
