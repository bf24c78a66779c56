use crate::dataset::Mode;
use crate::engine::{Dimension, Outcome, SortKey};
use crate::output::OutputFormat;

pub fn parse_mode(value: &str) -> Result<Mode, String> {
    Mode::parse(value).ok_or_else(|| "expected no-search or with-search".to_string())
}

pub fn parse_sort_key(value: &str) -> Result<SortKey, String> {
    SortKey::parse(value).ok_or_else(|| "expected model, accuracy, pass1 or pass3".to_string())
}

pub fn parse_outcome(value: &str) -> Result<Outcome, String> {
    Outcome::parse(value).ok_or_else(|| "expected correct or incorrect".to_string())
}

pub fn parse_dimension(value: &str) -> Result<Dimension, String> {
    Dimension::parse(value).ok_or_else(|| "expected model, mode or category".to_string())
}

pub fn parse_output_format(value: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(value).ok_or_else(|| "expected text, json or html".to_string())
}

pub fn parse_difficulty(value: u8) -> Result<u8, String> {
    if (1..=5).contains(&value) {
        Ok(value)
    } else {
        Err("expected a value from 1 to 5".to_string())
    }
}

/// Empty strings mean "unconstrained", as an empty select box would.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
