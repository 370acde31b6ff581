//! # veil-core
//!
//! Configuration types shared across the Veil crates: scan/masking tunables,
//! obfuscation rule definitions, and the YAML file that binds them together.

pub mod config;

pub use config::{ConfigError, ObfuscationMethod, RuleDefinition, ScanConfig, VeilConfig};
