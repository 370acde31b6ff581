//! `veil check` command implementation.
//!
//! Validates a configuration file:
//! - Rule definitions compile (regexes, required parameters)
//! - Rules that would leave every value untouched are flagged
//! - Scan patterns compile or name an existing built-in

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use veil_core::{ObfuscationMethod, RuleDefinition, VeilConfig};
use veil_mask::{ObfuscationRule, patterns};

/// Severity level for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    /// Where in the configuration the issue is, e.g. `rules.email`.
    pub location: String,
    pub message: String,
}

impl CheckFinding {
    fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location: location.into(),
            message: message.into(),
        }
    }

    fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Results from running all checks.
#[derive(Debug, Default)]
pub struct CheckResults {
    pub findings: Vec<CheckFinding>,
}

impl CheckResults {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count()
    }

    pub fn print_summary(&self) {
        let mut findings: Vec<_> = self.findings.iter().collect();
        findings.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.location.cmp(&b.location)));

        for finding in findings {
            let icon = match finding.severity {
                Severity::Error => "✗",
                Severity::Warning => "⚠",
            };
            println!(
                "  {} {} [{}]: {}",
                icon, finding.severity, finding.location, finding.message
            );
        }

        println!();
        if self.findings.is_empty() {
            println!("All checks passed.");
        } else {
            println!(
                "Summary: {} error(s), {} warning(s)",
                self.error_count(),
                self.warning_count()
            );
        }
    }
}

/// Run every check against a loaded configuration.
pub fn check_config(config: &VeilConfig) -> CheckResults {
    let mut results = CheckResults::default();

    for (column, definition) in &config.rules {
        let location = format!("rules.{}", column);
        match ObfuscationRule::try_from_definition(definition) {
            Ok(_) => {
                if let Some(reason) = no_op_reason(definition) {
                    results
                        .findings
                        .push(CheckFinding::warning(location, format!("rule has no effect: {}", reason)));
                }
            }
            Err(e) => results.findings.push(CheckFinding::error(
                location,
                format!("{}; values would be left untouched", e),
            )),
        }
    }

    for (i, pattern) in config.patterns.iter().enumerate() {
        let location = format!("patterns[{}]", i);
        match patterns::resolve(pattern) {
            None => results.findings.push(CheckFinding::error(
                location,
                format!("unknown built-in pattern {:?}", pattern),
            )),
            Some(source) => {
                if let Err(e) = Regex::new(&source) {
                    results
                        .findings
                        .push(CheckFinding::error(location, format!("invalid regex: {}", e)));
                }
            }
        }
    }

    if config.scan.sample_limit == 0 {
        results.findings.push(CheckFinding::warning(
            "scan.sample_limit",
            "sample_limit is 0, scans will report columns without sample values",
        ));
    }

    results
}

/// Why a rule that compiles would still leave every value untouched.
fn no_op_reason(definition: &RuleDefinition) -> Option<&'static str> {
    let method = definition.method?;
    let zero_range = definition.start.unwrap_or(0) == 0 && definition.end.unwrap_or(0) == 0;

    match method {
        ObfuscationMethod::Mask | ObfuscationMethod::Truncate if zero_range => {
            Some("start and end are both 0")
        }
        ObfuscationMethod::Replace if definition.replacement.is_none() => {
            Some("no replacement given")
        }
        ObfuscationMethod::Generalize if definition.bucket_size.unwrap_or(0) <= 0 => {
            Some("bucket_size is not positive")
        }
        ObfuscationMethod::AddNoise
            if definition.noise_range.is_none_or(|r| r.is_nan() || r <= 0.0) =>
        {
            Some("noise_range is not positive")
        }
        _ => None,
    }
}

pub fn run(config_path: &Path) -> Result<()> {
    println!("Checking Veil configuration {}...", config_path.display());
    println!();

    let config = VeilConfig::from_file(config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    let results = check_config(&config);
    results.print_summary();

    if results.has_errors() {
        anyhow::bail!("Configuration has {} error(s).", results.error_count());
    }
    Ok(())
}
