//! `veil aliases` command implementation.

use anyhow::{Context, Result};
use serde_json::json;
use veil_sql::{AliasGraphBuilder, close_over};

pub fn run(sql: &str) -> Result<()> {
    let graph = AliasGraphBuilder::new()
        .build(sql)
        .context("Failed to analyze query")?;
    let closure = close_over(&graph);

    let report = json!({
        "graph": graph,
        "closure": closure,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
