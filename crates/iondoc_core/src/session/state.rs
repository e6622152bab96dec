use std::fmt::Display;

use tracing::debug;

use crate::ion::{Document, parse, validate_shape};
use crate::session::Result;

/// Progress record a caller keeps for UI feedback around a parse.
///
/// The parser never touches this; [`load_session`] updates it explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
	/// A parse is in progress.
	pub parsing: bool,
	/// Message of the last failed parse, cleared when a new one begins.
	pub last_error: Option<String>,
}

impl ParseState {
	/// Mark a parse as started.
	pub fn begin(&mut self) {
		self.parsing = true;
		self.last_error = None;
	}

	/// Mark the parse as finished, recording the failure message if any.
	pub fn finish<T, E: Display>(&mut self, result: &std::result::Result<T, E>) {
		self.parsing = false;
		if let Err(err) = result {
			self.last_error = Some(err.to_string());
		}
	}
}

/// Parse a recording and apply the shape gate, updating `state` around it.
pub fn load_session(buffer: &[u8], state: &mut ParseState) -> Result<Document> {
	state.begin();
	let result = parse(buffer).and_then(|document| validate_shape(&document).map(|()| document));
	state.finish(&result);

	let document = result?;
	debug!(
		bytes = buffer.len(),
		root = document.kind(),
		placeholders = document.placeholder_count(),
		"loaded session document"
	);
	Ok(document)
}

#[cfg(test)]
mod tests {
	use iondoc_testkit::{Element, encode};

	use super::{ParseState, load_session};
	use crate::session::SessionError;

	#[test]
	fn successful_load_clears_previous_error() {
		let mut state = ParseState {
			parsing: false,
			last_error: Some("stale".to_owned()),
		};
		let bytes = encode(&[Element::structure([("topics", Element::list([]))])]);

		load_session(&bytes, &mut state).expect("load");

		assert_eq!(state, ParseState::default());
	}

	#[test]
	fn failures_are_recorded_and_parsing_cleared() {
		let mut state = ParseState::default();

		let err = load_session(&[], &mut state).expect_err("empty input");
		assert!(matches!(err, SessionError::Parse(_)));
		assert!(!state.parsing);
		assert_eq!(state.last_error.as_deref(), Some("invalid or empty data provided"));

		let bytes = encode(&[Element::Int(42)]);
		load_session(&bytes, &mut state).expect_err("primitive root");
		assert_eq!(
			state.last_error.as_deref(),
			Some("parsed data does not match expected session file shape (root=number)")
		);
	}
}
