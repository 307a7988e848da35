use std::str::FromStr;

use rusqlite::types::Value;
use serde_json::{Map, Number, Value as Json};

use crate::storage::{Filters, Row};

/// Read a textual scalar as integer, then real, else text. Numbers are only
/// taken when they print back as `raw`, so `007` or `1e3` stay text.
pub fn parse_scalar(raw: &str) -> Value {
    if let Ok(n) = i64::from_str(raw) {
        if n.to_string() == raw {
            return Value::Integer(n);
        }
    }
    match f64::from_str(raw) {
        Ok(f) if f.is_finite() && f.to_string() == raw => Value::Real(f),
        _ => Value::Text(raw.to_string()),
    }
}

/// Parse `column=value` as given on the command line.
pub fn parse_filter(raw: &str) -> Result<(String, Value), String> {
    let (column, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected column=value, got {raw:?}"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("empty column name in {raw:?}"));
    }
    Ok((column.to_string(), parse_scalar(value)))
}

pub fn filters_from_pairs<I>(pairs: I) -> Filters
where
    I: IntoIterator<Item = (String, Value)>,
{
    pairs.into_iter().collect()
}

/// Blobs become lowercase hex strings.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Integer(n) => Json::from(*n),
        Value::Real(f) => Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
        Value::Text(s) => Json::String(s.clone()),
        Value::Blob(bytes) => Json::String(hex::encode(bytes)),
    }
}

pub fn row_to_json(row: &Row) -> Json {
    let map: Map<String, Json> = row
        .iter()
        .map(|(column, value)| (column.clone(), value_to_json(value)))
        .collect();
    Json::Object(map)
}

/// Plain-text rendering for tables and terminals.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(n) => n.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(bytes) => hex::encode(bytes),
    }
}
