use thiserror::Error;

use crate::ion::ParseError;

/// Crate-local result type for session-level operations.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors produced while interpreting a parsed session recording.
#[derive(Debug, Error)]
pub enum SessionError {
	/// Document could not be parsed or failed the shape gate.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// File or payload I/O failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),
	/// A conventional field held the wrong kind of value.
	#[error("field '{field}' has unexpected type: expected {expected}, got {got}")]
	UnexpectedType {
		/// Dotted field path.
		field: String,
		/// Expected kind label.
		expected: &'static str,
		/// Actual kind label.
		got: &'static str,
	},
	/// Payload carried no bytes where some were required.
	#[error("missing payload: {what}")]
	MissingPayload {
		/// Payload description.
		what: &'static str,
	},
	/// Decompressed payload exceeds the size limit.
	#[error("decompressed payload exceeds limit {limit} bytes")]
	PayloadTooLarge {
		/// Configured output limit in bytes.
		limit: usize,
	},
	/// Model payload did not decode to Wavefront OBJ text.
	#[error("model payload is not OBJ text (codec={codec})")]
	NotObjModel {
		/// Codec that produced the candidate bytes.
		codec: &'static str,
	},
	/// Legacy byte-escape text contained a malformed `\x` escape.
	#[error("invalid byte escape at offset {at}")]
	InvalidByteEscape {
		/// Character offset inside the quoted body.
		at: usize,
	},
	/// Timestamp value could not be converted to epoch milliseconds.
	#[error("invalid timestamp value: {value}")]
	InvalidTimestamp {
		/// Offending value rendering.
		value: String,
	},
	/// No topic with the requested name exists.
	#[error("topic not found: {name}")]
	TopicNotFound {
		/// Requested topic name.
		name: String,
	},
	/// Decode pool has shut down.
	#[error("decode pool is closed")]
	PoolClosed,
	/// A worker panicked while running a task.
	#[error("decode worker panicked on task {task_id}")]
	WorkerPanicked {
		/// Task that was running.
		task_id: u64,
	},
}
