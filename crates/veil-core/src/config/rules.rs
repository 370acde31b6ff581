//! Obfuscation rule definitions as they appear in configuration files.
//!
//! A definition is deliberately flat: every parameter is optional and only the
//! ones relevant to `method` are read when the definition is turned into an
//! executable rule. A definition without a `method` is the identity rule.
//!
//! ```yaml
//! rules:
//!   email:
//!     method: mask
//!     start: 0
//!     end: 5
//!     mask_char: "#"
//!   age:
//!     method: generalize
//!     bucket_size: 10
//! ```

use serde::{Deserialize, Serialize};

/// The obfuscation methods a rule can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObfuscationMethod {
    Mask,
    Truncate,
    Replace,
    Generalize,
    AddNoise,
}

impl std::fmt::Display for ObfuscationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObfuscationMethod::Mask => write!(f, "mask"),
            ObfuscationMethod::Truncate => write!(f, "truncate"),
            ObfuscationMethod::Replace => write!(f, "replace"),
            ObfuscationMethod::Generalize => write!(f, "generalize"),
            ObfuscationMethod::AddNoise => write!(f, "add_noise"),
        }
    }
}

/// A single obfuscation rule as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Method to apply. `None` leaves values untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<ObfuscationMethod>,

    /// First character index affected by `mask`/`truncate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,

    /// Exclusive end index for `mask`/`truncate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,

    /// Replacement character for `mask` (defaults to `*`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_char: Option<char>,

    /// Pattern for `replace`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,

    /// Replacement text for `replace`; `$1`-style group references allowed.
    /// When absent the rule leaves values untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,

    /// Bucket width for `generalize`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_size: Option<i64>,

    /// Total width of the uniform noise interval for `add_noise`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_range: Option<f64>,
}

impl RuleDefinition {
    /// A `mask` definition.
    pub fn mask(start: i64, end: i64, mask_char: char) -> Self {
        Self {
            method: Some(ObfuscationMethod::Mask),
            start: Some(start),
            end: Some(end),
            mask_char: Some(mask_char),
            ..Default::default()
        }
    }

    /// A `truncate` definition.
    pub fn truncate(start: i64, end: i64) -> Self {
        Self {
            method: Some(ObfuscationMethod::Truncate),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    /// A `replace` definition.
    pub fn replace(regex: impl Into<String>, replacement: Option<String>) -> Self {
        Self {
            method: Some(ObfuscationMethod::Replace),
            regex: Some(regex.into()),
            replacement,
            ..Default::default()
        }
    }

    /// A `generalize` definition.
    pub fn generalize(bucket_size: i64) -> Self {
        Self {
            method: Some(ObfuscationMethod::Generalize),
            bucket_size: Some(bucket_size),
            ..Default::default()
        }
    }

    /// An `add_noise` definition.
    pub fn add_noise(noise_range: f64) -> Self {
        Self {
            method: Some(ObfuscationMethod::AddNoise),
            noise_range: Some(noise_range),
            ..Default::default()
        }
    }
}
