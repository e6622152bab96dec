use std::ops::{Deref, DerefMut};

use tracing::warn;

use crate::ion::{IonCursor, IonReaderCursor, IonError, IonType, ParseError, ParsedValue, StructValue};

/// Top-level result of a parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
	/// Zero top-level values (`Null`) or exactly one.
	Value(ParsedValue),
	/// Two or more top-level values in stream order.
	Sequence(Vec<ParsedValue>),
}

impl Document {
	/// Kind label of the root.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Value(value) => value.kind(),
			Self::Sequence(_) => "sequence",
		}
	}

	/// Top-level values in stream order.
	pub fn values(&self) -> &[ParsedValue] {
		match self {
			Self::Value(ParsedValue::Null) => &[],
			Self::Value(value) => std::slice::from_ref(value),
			Self::Sequence(values) => values,
		}
	}

	/// Recursive count of `ErrorPlaceholder` leaves.
	pub fn placeholder_count(&self) -> usize {
		self.values().iter().map(ParsedValue::placeholder_count).sum()
	}
}

/// Limits for document parsing.
#[derive(Debug, Clone)]
pub struct ParseOptions {
	/// Maximum container nesting depth.
	pub max_depth: u32,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self { max_depth: 64 }
	}
}

/// Parse a binary Ion buffer into a [`Document`].
pub fn parse(buffer: &[u8]) -> Result<Document, ParseError> {
	parse_with_options(buffer, &ParseOptions::default())
}

/// Parse a possibly-absent buffer; `None` behaves like an empty buffer.
pub fn parse_optional(buffer: Option<&[u8]>) -> Result<Document, ParseError> {
	parse(buffer.unwrap_or_default())
}

/// Parse with explicit limits.
pub fn parse_with_options(buffer: &[u8], options: &ParseOptions) -> Result<Document, ParseError> {
	if buffer.is_empty() {
		return Err(ParseError::EmptyInput);
	}
	let mut cursor = IonReaderCursor::new(buffer).map_err(ParseError::ReaderCreation)?;
	DocumentParser::new(options.clone()).read_document(&mut cursor)
}

/// Reject documents whose root is a non-binary primitive or null.
pub fn validate_shape(document: &Document) -> Result<(), ParseError> {
	match document {
		Document::Sequence(_) => Ok(()),
		Document::Value(value) if value.is_container() => Ok(()),
		Document::Value(ParsedValue::Binary(_)) => Ok(()),
		Document::Value(value) => Err(ParseError::UnexpectedShape { kind: value.kind() }),
	}
}

/// Recursive-descent tree builder over any [`IonCursor`].
///
/// A value that fails to decode is replaced by an `ErrorPlaceholder` at its
/// position; only a failure to advance the top-level cursor aborts the
/// document.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
	options: ParseOptions,
}

impl DocumentParser {
	/// Create a parser with the given limits.
	pub fn new(options: ParseOptions) -> Self {
		Self { options }
	}

	/// Read every top-level value from `cursor`.
	pub fn read_document<C: IonCursor>(&self, cursor: &mut C) -> Result<Document, ParseError> {
		let mut values = Vec::new();
		while let Some(ion_type) = cursor.next().map_err(ParseError::DocumentParse)? {
			let value = match self.decode_value(cursor, ion_type, 0) {
				Ok(value) => value,
				Err(err) => {
					warn!(%ion_type, error = %err, "failed to parse top-level value");
					ParsedValue::ErrorPlaceholder(format!("[Error: Failed to parse Ion type {ion_type}]"))
				}
			};
			values.push(value);
		}

		Ok(match values.len() {
			0 => Document::Value(ParsedValue::Null),
			1 => Document::Value(values.pop().unwrap_or(ParsedValue::Null)),
			_ => Document::Sequence(values),
		})
	}

	/// Decode exactly the value under the cursor, containing any failure.
	fn read_one<C: IonCursor>(&self, cursor: &mut C, ion_type: IonType, depth: u32) -> ParsedValue {
		match self.decode_value(cursor, ion_type, depth) {
			Ok(value) => value,
			Err(err) => {
				warn!(%ion_type, depth, error = %err, "failed to parse value");
				ParsedValue::ErrorPlaceholder(format!("[Error: {err}]"))
			}
		}
	}

	fn decode_value<C: IonCursor>(&self, cursor: &mut C, ion_type: IonType, depth: u32) -> Result<ParsedValue, IonError> {
		if ion_type == IonType::Null || cursor.is_null() {
			return Ok(ParsedValue::Null);
		}

		let value = match ion_type {
			IonType::Null => ParsedValue::Null,
			IonType::Bool => cursor.read_bool()?.map_or(ParsedValue::Null, ParsedValue::Boolean),
			IonType::Int | IonType::Float => cursor.read_f64()?.map_or(ParsedValue::Null, ParsedValue::Number),
			IonType::Decimal => cursor
				.read_decimal()?
				.map_or(ParsedValue::Null, |decimal| ParsedValue::Decimal(decimal.to_string())),
			IonType::Timestamp => cursor
				.read_timestamp()?
				.map_or(ParsedValue::Null, ParsedValue::Timestamp),
			IonType::Symbol | IonType::String => cursor.read_text()?.map_or(ParsedValue::Null, ParsedValue::Text),
			IonType::Clob | IonType::Blob => cursor.read_bytes()?.map_or(ParsedValue::Null, ParsedValue::Binary),
			IonType::List => ParsedValue::List(self.read_sequence(cursor, depth)?),
			IonType::SExp => ParsedValue::SExpression(self.read_sequence(cursor, depth)?),
			IonType::Struct => ParsedValue::Struct(self.read_struct(cursor, depth)?),
			IonType::Unknown => {
				warn!(%ion_type, depth, "unsupported ion type");
				ParsedValue::Text(format!("[Unsupported Ion type: {ion_type}]"))
			}
		};
		Ok(value)
	}

	fn read_sequence<C: IonCursor>(&self, cursor: &mut C, depth: u32) -> Result<Vec<ParsedValue>, IonError> {
		let mut scope = self.enter(cursor, depth)?;
		let mut items = Vec::new();
		while let Some(ion_type) = scope.next()? {
			items.push(self.read_one(&mut *scope, ion_type, depth + 1));
		}
		scope.close()?;
		Ok(items)
	}

	fn read_struct<C: IonCursor>(&self, cursor: &mut C, depth: u32) -> Result<StructValue, IonError> {
		let mut scope = self.enter(cursor, depth)?;
		let mut item = StructValue::default();
		while let Some(ion_type) = scope.next()? {
			let name = scope.field_name()?.unwrap_or_default();
			let value = self.read_one(&mut *scope, ion_type, depth + 1);
			item.insert(&name, value);
		}
		scope.close()?;
		Ok(item)
	}

	fn enter<'c, C: IonCursor>(&self, cursor: &'c mut C, depth: u32) -> Result<Scope<'c, C>, IonError> {
		if depth >= self.options.max_depth {
			return Err(IonError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}
		Scope::enter(cursor)
	}
}

/// Stepped-in container; dropping it steps back out.
struct Scope<'c, C: IonCursor> {
	cursor: &'c mut C,
	open: bool,
}

impl<'c, C: IonCursor> Scope<'c, C> {
	fn enter(cursor: &'c mut C) -> Result<Self, IonError> {
		cursor.step_in()?;
		Ok(Self { cursor, open: true })
	}

	/// Step out, reporting any cursor failure.
	fn close(mut self) -> Result<(), IonError> {
		self.open = false;
		self.cursor.step_out()
	}
}

impl<C: IonCursor> Deref for Scope<'_, C> {
	type Target = C;

	fn deref(&self) -> &C {
		self.cursor
	}
}

impl<C: IonCursor> DerefMut for Scope<'_, C> {
	fn deref_mut(&mut self) -> &mut C {
		self.cursor
	}
}

impl<C: IonCursor> Drop for Scope<'_, C> {
	fn drop(&mut self) {
		if !self.open {
			return;
		}
		if let Err(err) = self.cursor.step_out() {
			warn!(error = %err, "step out after failed container read");
		}
	}
}
