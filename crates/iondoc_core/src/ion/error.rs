use thiserror::Error;

use crate::ion::IonType;

/// Crate-local result type for cursor-level operations.
pub type Result<T> = std::result::Result<T, IonError>;

/// Errors produced while walking an Ion binary stream.
#[derive(Debug, Error)]
pub enum IonError {
	/// The underlying reader rejected the stream.
	#[error(transparent)]
	Wire(#[from] ion_rs::IonError),
	/// Stream did not begin with an Ion version marker.
	#[error("missing ion version marker (magic={magic:?})")]
	MissingVersionMarker {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Version marker names an Ion version other than 1.0.
	#[error("unsupported ion version {major}.{minor}")]
	UnsupportedVersion {
		/// Major version byte.
		major: u8,
		/// Minor version byte.
		minor: u8,
	},
	/// Decimal text from the reader could not be interpreted.
	#[error("unreadable decimal text {text:?}")]
	InvalidDecimal {
		/// Text as rendered by the reader.
		text: String,
	},
	/// Scalar text rendering ran past its length cap.
	#[error("{what} text exceeds {limit} bytes")]
	RenderLimit {
		/// Scalar type label.
		what: &'static str,
		/// Cap in bytes.
		limit: usize,
	},
	/// Scalar text rendering panicked inside the reader.
	#[error("{what} rendering failed")]
	RenderPanicked {
		/// Scalar type label.
		what: &'static str,
	},
	/// Typed read did not match the current value type.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Expected type label.
		expected: &'static str,
		/// Actual current type.
		got: IonType,
	},
	/// `step_in` on a value that is not a non-null container.
	#[error("cannot step into {got}")]
	NotAContainer {
		/// Actual current type.
		got: IonType,
	},
	/// `step_out` with no open container.
	#[error("step out at top level")]
	StepOutAtTopLevel,
	/// Read attempted with no current value.
	#[error("no current value")]
	NoCurrentValue,
	/// Nesting exceeded configured parse depth.
	#[error("parse depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
}

/// Document-level failures returned by [`crate::ion::parse`].
#[derive(Debug, Error)]
pub enum ParseError {
	/// Input buffer was missing or zero-length.
	#[error("invalid or empty data provided")]
	EmptyInput,
	/// The cursor could not be constructed over the buffer.
	#[error("failed to create ion reader: {0}")]
	ReaderCreation(#[source] IonError),
	/// Top-level iteration failed outside single-value containment.
	#[error("document parse failed: {0}")]
	DocumentParse(#[source] IonError),
	/// Decoded root is a primitive rather than a container.
	#[error("parsed data does not match expected session file shape (root={kind})")]
	UnexpectedShape {
		/// Kind label of the decoded root.
		kind: &'static str,
	},
}
