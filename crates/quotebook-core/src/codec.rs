//! Import/export codec
//!
//! Exported documents are a pretty-printed JSON array of
//! `{"text": .., "category": ..}` objects in collection order.
//!
//! Imports only check that the document is a JSON array. Individual records
//! are coerced leniently instead of rejected:
//! - string `text` / `category` fields are used as-is
//! - missing or `null` fields become empty strings
//! - any other value is kept as its JSON text
//! - a non-object record becomes a quote whose text is the record's JSON text

use serde_json::Value;
use thiserror::Error;

use crate::models::Quote;

/// Default file name for exported collections
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Errors decoding an imported document
#[derive(Error, Debug)]
pub enum CodecError {
    /// Document is not valid JSON
    #[error("Error parsing JSON file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document is JSON, but not an array
    #[error("Invalid JSON format: expected an array of quotes, found {found}")]
    NotAnArray { found: &'static str },
}

/// Encode a collection as a pretty-printed JSON document
pub fn encode(quotes: &[Quote]) -> String {
    // Serializing plain string fields cannot fail
    serde_json::to_string_pretty(quotes).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a JSON document into quotes
pub fn decode(text: &str) -> Result<Vec<Quote>, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    match value {
        Value::Array(items) => Ok(items.into_iter().map(coerce_record).collect()),
        other => Err(CodecError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

fn coerce_record(item: Value) -> Quote {
    match item {
        Value::Object(mut fields) => Quote::new(
            coerce_field(fields.remove("text")),
            coerce_field(fields.remove("category")),
        ),
        other => Quote::new(other.to_string(), String::new()),
    }
}

fn coerce_field(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
