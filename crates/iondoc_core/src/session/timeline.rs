use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::ion::ParsedValue;
use crate::session::{Result, SessionError};

/// 2^63; the first magnitude past what `i64` holds.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Items ordered by epoch-millisecond timestamp.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
	entries: Vec<(i64, T)>,
}

impl<T> Default for Timeline<T> {
	fn default() -> Self {
		Self { entries: Vec::new() }
	}
}

impl<T> FromIterator<(i64, T)> for Timeline<T> {
	fn from_iter<I: IntoIterator<Item = (i64, T)>>(iter: I) -> Self {
		let mut entries: Vec<(i64, T)> = iter.into_iter().collect();
		entries.sort_by_key(|(timestamp, _)| *timestamp);
		Self { entries }
	}
}

impl<T> Timeline<T> {
	/// Number of items.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the timeline is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Items in ascending timestamp order.
	pub fn iter(&self) -> impl Iterator<Item = &(i64, T)> {
		self.entries.iter()
	}

	/// Item closest to `target_ms`; the earliest wins ties.
	pub fn nearest(&self, target_ms: i64) -> Option<&(i64, T)> {
		let after = self.entries.partition_point(|(timestamp, _)| *timestamp < target_ms);
		let later = self.entries.get(after);
		let earlier = after.checked_sub(1).and_then(|idx| self.entries.get(idx));

		let pick = match (earlier, later) {
			(Some(before), Some(at)) if target_ms.abs_diff(before.0) <= at.0.abs_diff(target_ms) => before.0,
			(_, Some(at)) => at.0,
			(Some(before), None) => before.0,
			(None, None) => return None,
		};
		let first = self.entries.partition_point(|(timestamp, _)| *timestamp < pick);
		self.entries.get(first)
	}
}

/// Epoch milliseconds of a timestamp-like value.
///
/// Numbers are taken as epoch milliseconds; text and Ion timestamps are
/// parsed as RFC 3339, minute-precision Ion text, or a bare date (UTC).
pub fn timestamp_millis(value: &ParsedValue) -> Result<i64> {
	let parsed = match value {
		ParsedValue::Number(ms) => whole_millis(*ms),
		ParsedValue::Text(text) | ParsedValue::Timestamp(text) => parse_text_millis(text),
		_ => None,
	};
	parsed.ok_or_else(|| invalid(value))
}

/// Playback position `seconds` past `start_time`, in epoch milliseconds.
pub fn playback_target_millis(start_time: &ParsedValue, seconds: f64) -> Result<i64> {
	let start = timestamp_millis(start_time)?;
	whole_millis(seconds * 1000.0)
		.and_then(|offset| start.checked_add(offset))
		.ok_or_else(|| SessionError::InvalidTimestamp {
			value: format!("{seconds}s past {start}"),
		})
}

/// `timestamp - origin`, rejecting differences outside `i64`.
pub fn elapsed_millis(timestamp: i64, origin: i64) -> Result<i64> {
	timestamp.checked_sub(origin).ok_or_else(|| SessionError::InvalidTimestamp {
		value: format!("{timestamp} - {origin}"),
	})
}

/// Round to whole milliseconds; `None` when not finite or out of `i64` range.
fn whole_millis(ms: f64) -> Option<i64> {
	let rounded = ms.round();
	(rounded >= -I64_BOUND && rounded < I64_BOUND).then_some(rounded as i64)
}

fn parse_text_millis(text: &str) -> Option<i64> {
	let text = text.trim();
	if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
		return Some(parsed.timestamp_millis());
	}

	let normalized = match text.strip_suffix('Z') {
		Some(head) => format!("{head}+00:00"),
		None => text.to_owned(),
	};
	if let Ok(parsed) = DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M%:z") {
		return Some(parsed.timestamp_millis());
	}
	if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
		return Some(parsed.and_utc().timestamp_millis());
	}

	NaiveDate::parse_from_str(text, "%Y-%m-%d")
		.ok()
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|midnight| midnight.and_utc().timestamp_millis())
}

fn invalid(value: &ParsedValue) -> SessionError {
	let value = match value {
		ParsedValue::Text(text) | ParsedValue::Timestamp(text) => text.clone(),
		other => other.kind().to_owned(),
	};
	SessionError::InvalidTimestamp { value }
}
