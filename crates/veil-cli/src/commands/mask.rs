//! `veil mask` command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use veil_core::VeilConfig;
use veil_mask::{MaskingOrchestrator, Row, compile_rules};

pub fn run(sql: &str, rows_path: &Path, config_path: &Path, no_alias_resolution: bool) -> Result<()> {
    let config = VeilConfig::from_file(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    let content = fs::read_to_string(rows_path)
        .with_context(|| format!("Failed to read rows from {}", rows_path.display()))?;
    let mut rows: Vec<Row> =
        serde_json::from_str(&content).context("Rows file must hold an array of objects")?;

    let rules = compile_rules(&config.rules);
    let mut orchestrator = MaskingOrchestrator::new(config.scan);
    if no_alias_resolution {
        orchestrator.config_mut().alias_resolution_enabled = false;
    }

    let masked = orchestrator.mask_rows(&mut rows, sql, &rules)?;
    tracing::info!(rows = rows.len(), cells = masked, "Masking complete");

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
