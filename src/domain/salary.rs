//! Salary normalization for raw API records and stored mappings.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

pub const NOT_SPECIFIED: &str = "not specified";
pub const DEFAULT_CURRENCY: &str = "RUR";

/// A vacancy salary: either a non-negative amount or display text.
///
/// Serializes untagged, so stored files hold a plain JSON number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Salary {
    Amount(Number),
    Text(String),
}

impl Salary {
    pub fn not_specified() -> Self {
        Salary::Text(NOT_SPECIFIED.to_string())
    }

    /// A comparable amount: the number itself, or the first number found in
    /// display text such as `"from 100000 to 150000 RUR"`.
    pub fn lower_bound(&self) -> Option<f64> {
        match self {
            Salary::Amount(number) => number.as_f64(),
            Salary::Text(text) => amount_pattern()
                .find(text)
                .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok()),
        }
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Salary::Amount(number) => write!(f, "{}", number),
            Salary::Text(text) => f.write_str(text),
        }
    }
}

impl PartialOrd for Salary {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Salary::Amount(a), Salary::Amount(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
            (Salary::Text(a), Salary::Text(b)) => Some(a.cmp(b)),
            (Salary::Amount(_), Salary::Text(_)) => Some(Ordering::Less),
            (Salary::Text(_), Salary::Amount(_)) => Some(Ordering::Greater),
        }
    }
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+(?:[.,]\d+)?").expect("valid amount pattern"))
}

/// Normalizes whatever the API put in a vacancy's `salary` slot.
pub fn normalize_salary(raw: Option<&Value>) -> Salary {
    match raw {
        None | Some(Value::Null) => Salary::not_specified(),
        Some(Value::Object(range)) => format_salary_range(range),
        Some(scalar) => valid_salary(scalar),
    }
}

/// Formats a `{from, to, currency}` object into display text.
pub fn format_salary_range(range: &Map<String, Value>) -> Salary {
    let currency = range
        .get("currency")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(DEFAULT_CURRENCY);

    match (bound(range.get("from")), bound(range.get("to"))) {
        (Some(from), Some(to)) => Salary::Text(format!("from {} to {} {}", from, to, currency)),
        (Some(from), None) => Salary::Text(format!("from {} {}", from, currency)),
        (None, Some(to)) => Salary::Text(format!("to {} {}", to, currency)),
        (None, None) => Salary::not_specified(),
    }
}

/// Accepts a non-negative number (or numeric text) as the salary itself.
pub fn valid_salary(value: &Value) -> Salary {
    let number = match value {
        Value::Number(number) => number.clone(),
        Value::String(text) => match text.trim().parse::<Number>() {
            Ok(number) => number,
            Err(_) => return Salary::not_specified(),
        },
        _ => return Salary::not_specified(),
    };

    match number.as_f64() {
        Some(amount) if amount >= 0.0 => Salary::Amount(number),
        _ => Salary::not_specified(),
    }
}

// Zero bounds are treated as absent, the same as null.
fn bound(value: Option<&Value>) -> Option<&Number> {
    match value {
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => Some(number),
        _ => None,
    }
}
