use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use iondoc::ion::{Document, ParsedValue};
use iondoc::session::{ParseState, Result, SessionFile, load_session};
use serde_json::{Map, Value, json};

/// Largest magnitude rendered as a JSON integer.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_991.0;

/// Read and parse a recording from disk.
pub(crate) fn load_document(path: &Path) -> Result<Document> {
	let buffer = std::fs::read(path)?;
	let mut state = ParseState::default();
	load_session(&buffer, &mut state)
}

/// Read a recording and extract its session view.
pub(crate) fn load_session_file(path: &Path) -> Result<(Document, SessionFile)> {
	let document = load_document(path)?;
	let session = SessionFile::from_document(&document)?;
	Ok((document, session))
}

/// Print a JSON payload to stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to encode json: {err}"),
	}
}

/// JSON rendering of a whole document; a sequence becomes an array.
pub(crate) fn document_json(document: &Document, include_bytes: bool) -> Value {
	match document {
		Document::Value(value) => value_json(value, include_bytes),
		Document::Sequence(values) => Value::Array(values.iter().map(|item| value_json(item, include_bytes)).collect()),
	}
}

/// JSON rendering of one value.
///
/// Binary becomes `{"binary_len": n}`, plus `"base64"` when `include_bytes`.
pub(crate) fn value_json(value: &ParsedValue, include_bytes: bool) -> Value {
	match value {
		ParsedValue::Null => Value::Null,
		ParsedValue::Boolean(flag) => Value::Bool(*flag),
		ParsedValue::Number(number) => number_json(*number),
		ParsedValue::Decimal(text) | ParsedValue::Timestamp(text) | ParsedValue::Text(text) | ParsedValue::ErrorPlaceholder(text) => {
			Value::String(text.clone())
		}
		ParsedValue::Binary(bytes) => {
			if include_bytes {
				json!({ "binary_len": bytes.len(), "base64": STANDARD.encode(bytes) })
			} else {
				json!({ "binary_len": bytes.len() })
			}
		}
		ParsedValue::List(items) | ParsedValue::SExpression(items) => {
			Value::Array(items.iter().map(|item| value_json(item, include_bytes)).collect())
		}
		ParsedValue::Struct(item) => {
			let mut out = Map::new();
			for field in &item.fields {
				out.insert(field.name.to_string(), value_json(&field.value, include_bytes));
			}
			Value::Object(out)
		}
	}
}

fn number_json(number: f64) -> Value {
	if number.fract() == 0.0 && number.abs() <= MAX_EXACT_INT {
		return json!(number as i64);
	}
	serde_json::Number::from_f64(number).map_or(Value::Null, Value::Number)
}

/// One-line label for a scalar, or a size summary for containers.
pub(crate) fn short_value(value: &ParsedValue) -> String {
	match value {
		ParsedValue::Null => "null".to_owned(),
		ParsedValue::Boolean(flag) => flag.to_string(),
		ParsedValue::Number(number) => number.to_string(),
		ParsedValue::Decimal(text) | ParsedValue::Timestamp(text) | ParsedValue::ErrorPlaceholder(text) => text.clone(),
		ParsedValue::Text(text) => format!("\"{}\"", truncate(text, 60)),
		ParsedValue::Binary(bytes) => format!("bytes[{}]", bytes.len()),
		ParsedValue::List(items) | ParsedValue::SExpression(items) => format!("[{} items]", items.len()),
		ParsedValue::Struct(item) => format!("{{{} fields}}", item.len()),
	}
}

/// Cut `input` to `max_len` characters, marking the cut with `...`.
pub(crate) fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
