//! Built-in sensitive-data patterns.
//!
//! Scan pattern lists may refer to these as `builtin:<name>` instead of
//! spelling out the regex.

use std::borrow::Cow;

/// Prefix marking a reference to a built-in pattern.
pub const BUILTIN_PREFIX: &str = "builtin:";

/// A named detection pattern.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinPattern {
    pub name: &'static str,
    pub regex: &'static str,
    pub description: &'static str,
}

pub const BUILTIN_PATTERNS: &[BuiltinPattern] = &[
    BuiltinPattern {
        name: "email",
        regex: r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}",
        description: "Email address",
    },
    BuiltinPattern {
        name: "phone",
        regex: r"^(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}$",
        description: "North American phone number",
    },
    BuiltinPattern {
        name: "ssn",
        regex: r"\b\d{3}-\d{2}-\d{4}\b",
        description: "US social security number",
    },
    BuiltinPattern {
        name: "credit_card",
        regex: r"\b(?:4\d{3}|5[1-5]\d{2}|3[47]\d{2}|6(?:011|5\d{2}))[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{3,4}\b",
        description: "Visa, Mastercard, Amex or Discover card number",
    },
    BuiltinPattern {
        name: "ipv4",
        regex: r"\b(?:(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\.){3}(?:25[0-5]|2[0-4]\d|[01]?\d\d?)\b",
        description: "IPv4 address",
    },
    BuiltinPattern {
        name: "numeric",
        regex: r"^-?\d+(?:\.\d+)?$",
        description: "Whole value is a number",
    },
];

/// Look up a built-in pattern by name.
pub fn builtin(name: &str) -> Option<&'static BuiltinPattern> {
    BUILTIN_PATTERNS.iter().find(|p| p.name == name)
}

/// The regex source for a scan pattern entry.
///
/// Plain entries are returned as is; `builtin:<name>` entries resolve to the
/// catalogue, or `None` when no such built-in exists.
pub fn resolve(pattern: &str) -> Option<Cow<'_, str>> {
    match pattern.strip_prefix(BUILTIN_PREFIX) {
        Some(name) => builtin(name).map(|p| Cow::Borrowed(p.regex)),
        None => Some(Cow::Borrowed(pattern)),
    }
}
