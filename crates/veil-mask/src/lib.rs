//! # veil-mask
//!
//! Data-privacy layer for query results.
//!
//! - [`ObfuscationRule`]: one masking strategy applied value by value
//! - [`MaskingOrchestrator`]: rewrites result rows in place, applying rules
//!   declared against *base* column names to whatever result columns trace
//!   back to them through the query's aliases
//! - [`SensitiveScanner`]: samples a table/view through a [`DataSource`] and
//!   reports which columns hold values matching a list of patterns
//!
//! ## Rule methods
//!
//! | Method | Effect |
//! |--------|--------|
//! | `mask` | Replace characters `[start, end)` with a mask character |
//! | `truncate` | Keep characters `[start, end)` |
//! | `replace` | Global regex substitution |
//! | `generalize` | Numeric value to its `lo-hi` bucket |
//! | `add_noise` | Add uniform noise in `[-range/2, range/2]` |

pub mod error;
pub mod obfuscate;
pub mod orchestrator;
pub mod patterns;
pub mod rule;
pub mod scanner;
pub mod source;
pub mod value;

pub use error::{MaskError, RuleError, ScanError};
pub use orchestrator::MaskingOrchestrator;
pub use rule::{ObfuscationRule, RuleSet, compile_rules};
pub use scanner::{SensitiveColumn, SensitiveScanner};
pub use source::{DataSource, MemorySource, MemoryTable, TableRef};
pub use value::Row;
