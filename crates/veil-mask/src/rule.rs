//! Executable obfuscation rules.

use indexmap::IndexMap;
use regex::Regex;
use veil_core::{ObfuscationMethod, RuleDefinition};

use crate::error::RuleError;

/// Rules keyed by base column name, in declaration order.
///
/// When several rules could apply to one result column the first declared
/// one wins.
pub type RuleSet = IndexMap<String, ObfuscationRule>;

/// A single obfuscation strategy with only the parameters it uses.
#[derive(Debug, Clone, Default)]
pub enum ObfuscationRule {
    /// Leaves values untouched.
    #[default]
    Identity,

    /// Replace characters `[start, end)` with `mask_char`.
    Mask { start: i64, end: i64, mask_char: char },

    /// Keep characters `[start, end)`.
    Truncate { start: i64, end: i64 },

    /// Global substitution of `pattern`. A missing replacement leaves values
    /// untouched.
    Replace {
        pattern: Regex,
        replacement: Option<String>,
    },

    /// Map a number to the `lo-hi` bucket of width `bucket_size` holding it.
    Generalize { bucket_size: i64 },

    /// Add uniform noise in `[-noise_range / 2, noise_range / 2]`.
    AddNoise { noise_range: f64 },
}

impl ObfuscationRule {
    /// Compile a definition, reporting why it cannot be used as written.
    pub fn try_from_definition(definition: &RuleDefinition) -> Result<Self, RuleError> {
        let Some(method) = definition.method else {
            return Ok(ObfuscationRule::Identity);
        };

        let start = definition.start.unwrap_or(0);
        let end = definition.end.unwrap_or(0);

        let rule = match method {
            ObfuscationMethod::Mask => ObfuscationRule::Mask {
                start,
                end,
                mask_char: definition.mask_char.unwrap_or('*'),
            },
            ObfuscationMethod::Truncate => ObfuscationRule::Truncate { start, end },
            ObfuscationMethod::Replace => {
                let pattern = definition.regex.as_deref().ok_or(RuleError::MissingParameter {
                    method,
                    parameter: "regex",
                })?;
                let pattern = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
                ObfuscationRule::Replace {
                    pattern,
                    replacement: definition.replacement.as_deref().map(brace_group_refs),
                }
            }
            ObfuscationMethod::Generalize => ObfuscationRule::Generalize {
                bucket_size: definition.bucket_size.unwrap_or(0),
            },
            ObfuscationMethod::AddNoise => ObfuscationRule::AddNoise {
                noise_range: definition.noise_range.unwrap_or(0.0),
            },
        };

        Ok(rule)
    }

    /// The method this rule applies, `None` for the identity rule.
    pub fn method(&self) -> Option<ObfuscationMethod> {
        match self {
            ObfuscationRule::Identity => None,
            ObfuscationRule::Mask { .. } => Some(ObfuscationMethod::Mask),
            ObfuscationRule::Truncate { .. } => Some(ObfuscationMethod::Truncate),
            ObfuscationRule::Replace { .. } => Some(ObfuscationMethod::Replace),
            ObfuscationRule::Generalize { .. } => Some(ObfuscationMethod::Generalize),
            ObfuscationRule::AddNoise { .. } => Some(ObfuscationMethod::AddNoise),
        }
    }
}

/// Rewrite numbered references `$1` as `${1}`.
///
/// `regex` reads the longest `[_0-9A-Za-z]` run after `$` as the group name,
/// so `$1_masked` would name a group `1_masked`. `$$` stays an escaped `$`.
fn brace_group_refs(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                out.push_str("$$");
            }
            Some(d) if d.is_ascii_digit() => {
                out.push_str("${");
                while let Some(d) = chars.next_if(char::is_ascii_digit) {
                    out.push(d);
                }
                out.push('}');
            }
            _ => out.push('$'),
        }
    }
    out
}

/// Unusable definitions become the identity rule.
impl From<&RuleDefinition> for ObfuscationRule {
    fn from(definition: &RuleDefinition) -> Self {
        match Self::try_from_definition(definition) {
            Ok(rule) => rule,
            Err(e) => {
                tracing::warn!(error = %e, "Rule cannot be compiled, values will be left untouched");
                ObfuscationRule::Identity
            }
        }
    }
}

/// Compile every definition of a rule map, keeping declaration order.
pub fn compile_rules(definitions: &IndexMap<String, RuleDefinition>) -> RuleSet {
    definitions
        .iter()
        .map(|(column, definition)| {
            let rule = match ObfuscationRule::try_from_definition(definition) {
                Ok(rule) => rule,
                Err(e) => {
                    tracing::warn!(
                        column = column.as_str(),
                        error = %e,
                        "Rule cannot be compiled, values will be left untouched"
                    );
                    ObfuscationRule::Identity
                }
            };
            (column.clone(), rule)
        })
        .collect()
}
