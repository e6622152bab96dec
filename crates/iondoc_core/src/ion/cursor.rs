use crate::ion::{Decimal, IonType, Result};

/// Pull-style reader over a stream of Ion values.
///
/// The cursor is positioned on at most one value at a time. `next` moves to
/// the following sibling at the current depth; `step_in` descends into the
/// current container and `step_out` returns to the parent's sibling stream,
/// skipping whatever of the container was left unread.
///
/// Typed reads return `Ok(None)` for typed nulls (`null.int`, ...).
pub trait IonCursor {
	/// Advance to the next sibling, returning its type or `None` at the end
	/// of the current container or stream.
	fn next(&mut self) -> Result<Option<IonType>>;

	/// Type of the current value.
	fn ion_type(&self) -> Option<IonType>;

	/// Whether the current value is a null of any type.
	fn is_null(&self) -> bool;

	/// Field name of the current value inside a struct.
	///
	/// `Ok(None)` when outside a struct or when the symbol has no text.
	fn field_name(&self) -> Result<Option<String>>;

	/// Annotation texts of the current value; unknown texts render as `$0`.
	fn annotations(&self) -> Result<Vec<String>>;

	/// Read a `bool`.
	fn read_bool(&mut self) -> Result<Option<bool>>;

	/// Read an `int` or `float` as `f64`.
	fn read_f64(&mut self) -> Result<Option<f64>>;

	/// Read a `decimal`.
	fn read_decimal(&mut self) -> Result<Option<Decimal>>;

	/// Read a `timestamp` as its Ion text form.
	fn read_timestamp(&mut self) -> Result<Option<String>>;

	/// Read a `symbol` or `string` as text.
	fn read_text(&mut self) -> Result<Option<String>>;

	/// Read a `blob` or `clob` payload byte-for-byte.
	fn read_bytes(&mut self) -> Result<Option<Vec<u8>>>;

	/// Descend into the current container.
	fn step_in(&mut self) -> Result<()>;

	/// Return to the parent container.
	fn step_out(&mut self) -> Result<()>;

	/// Number of containers currently stepped into.
	fn depth(&self) -> usize;
}
