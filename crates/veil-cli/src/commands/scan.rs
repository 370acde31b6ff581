//! `veil scan` command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use veil_core::VeilConfig;
use veil_mask::{MemorySource, SensitiveScanner, TableRef};

pub fn run(
    data_path: &Path,
    table: &str,
    config_path: Option<&Path>,
    extra_patterns: Vec<String>,
    sample_limit: Option<usize>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => VeilConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => VeilConfig::default(),
    };

    let content = fs::read_to_string(data_path)
        .with_context(|| format!("Failed to read data from {}", data_path.display()))?;
    let source = MemorySource::from_json(&content).context("Invalid data file")?;

    let mut patterns = config.patterns;
    patterns.extend(extra_patterns);
    if patterns.is_empty() {
        anyhow::bail!("No patterns to scan for. Pass --pattern or list them in the configuration.");
    }

    let mut scanner = SensitiveScanner::new(source, config.scan);
    if let Some(limit) = sample_limit {
        scanner.config_mut().sample_limit = limit;
    }

    let found = scanner.scan(&TableRef::parse(table), &patterns)?;
    println!("{}", serde_json::to_string_pretty(&found)?);
    Ok(())
}
