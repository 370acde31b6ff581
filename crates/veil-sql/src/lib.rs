//! # veil-sql
//!
//! Static analysis of SQL projection lists for Veil.
//!
//! This crate works out which *result* column names of a query denote which
//! *underlying* table columns, however the query renamed them:
//! - Parse a SELECT (including FROM sub-queries) using `sqlparser`
//! - Extract one-hop `alias -> source` edges into a [`RenameGraph`]
//! - Close the graph transitively into a [`ClosureMap`]
//! - Decide with a [`ColumnMatcher`] whether a result column traces back to a
//!   base column
//!
//! ## Example
//!
//! ```sql
//! SELECT sub.fn AS fn1 FROM (SELECT col AS fn FROM t) sub
//! ```
//!
//! yields the edges `fn1 -> fn` and `fn -> col`, so the closure of `fn1` is
//! `{fn, col}` and a rule declared on `col` applies to result column `fn1`.

pub mod alias;
pub mod closure;
pub mod error;
pub mod matcher;
pub mod parser;

pub use alias::{AliasGraphBuilder, RenameGraph};
pub use closure::{ClosureMap, close_over};
pub use error::SqlError;
pub use matcher::ColumnMatcher;
pub use parser::SqlAnalyzer;
