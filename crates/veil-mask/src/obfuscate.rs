//! Value-by-value application of obfuscation rules.
//!
//! String methods (`mask`, `truncate`, `replace`) work on the text form of
//! non-string values. Numeric methods (`generalize`, `add_noise`) accept
//! numbers and numeric text and leave anything else untouched. `NULL` is never
//! rewritten, and neither are values a rule's zero defaults would destroy.

use rand::Rng;
use serde_json::{Number, Value};

use crate::rule::ObfuscationRule;
use crate::value::{Numeric, string_form};

impl ObfuscationRule {
    /// Apply this rule to one value.
    pub fn apply(&self, value: &Value) -> Value {
        match self {
            ObfuscationRule::Identity => value.clone(),
            ObfuscationRule::Mask {
                start,
                end,
                mask_char,
            } => mask(value, *start, *end, *mask_char),
            ObfuscationRule::Truncate { start, end } => truncate(value, *start, *end),
            ObfuscationRule::Replace {
                pattern,
                replacement,
            } => match (replacement, string_form(value)) {
                (Some(replacement), Some(text)) => {
                    Value::String(pattern.replace_all(&text, replacement.as_str()).into_owned())
                }
                _ => value.clone(),
            },
            ObfuscationRule::Generalize { bucket_size } => generalize(value, *bucket_size),
            ObfuscationRule::AddNoise { noise_range } => add_noise(value, *noise_range),
        }
    }
}

fn mask(value: &Value, start: i64, end: i64, mask_char: char) -> Value {
    if start == 0 && end == 0 {
        return value.clone();
    }
    let Some(text) = string_form(value).filter(|t| !t.is_empty()) else {
        return value.clone();
    };

    let len = text.chars().count() as i64;
    let end = end.clamp(0, len);
    let start = start.clamp(0, end);

    let masked = text
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let i = i as i64;
            if i >= start && i < end { mask_char } else { c }
        })
        .collect();
    Value::String(masked)
}

fn truncate(value: &Value, start: i64, end: i64) -> Value {
    // Zero defaults mean no truncation was asked for, not an empty result.
    if start == 0 && end == 0 {
        return value.clone();
    }
    let Some(text) = string_form(value).filter(|t| !t.is_empty()) else {
        return value.clone();
    };

    let len = text.chars().count() as i64;
    let start = start.max(0);
    let end = end.min(len);
    if start >= end {
        return Value::String(String::new());
    }

    let kept = text
        .chars()
        .skip(start as usize)
        .take((end - start) as usize)
        .collect();
    Value::String(kept)
}

fn generalize(value: &Value, bucket_size: i64) -> Value {
    if bucket_size <= 0 {
        return value.clone();
    }
    let Some(number) = Numeric::of(value) else {
        return value.clone();
    };

    let lo = match number {
        Numeric::Int(v) => v.div_euclid(bucket_size).checked_mul(bucket_size),
        Numeric::Float(v) => {
            let lo = (v / bucket_size as f64).floor() * bucket_size as f64;
            // i64::MAX rounds up to 2^63 as f64, which is out of range.
            (lo >= i64::MIN as f64 && lo < i64::MAX as f64).then_some(lo as i64)
        }
    };

    match lo.and_then(|lo| Some((lo, lo.checked_add(bucket_size - 1)?))) {
        Some((lo, hi)) => Value::String(format!("{lo}-{hi}")),
        None => value.clone(),
    }
}

fn add_noise(value: &Value, noise_range: f64) -> Value {
    if !noise_range.is_finite() || noise_range <= 0.0 {
        return value.clone();
    }
    let Some(number) = Numeric::of(value) else {
        return value.clone();
    };

    let half = noise_range / 2.0;
    let noise = rand::rng().random_range(-half..=half);
    Number::from_f64(number.as_f64() + noise)
        .map(Value::Number)
        .unwrap_or_else(|| value.clone())
}
