/// Generic value tree materialized from an Ion stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
	/// `null.null` or any typed null.
	Null,
	/// Boolean scalar.
	Boolean(bool),
	/// `int` or `float`, widened to `f64`.
	Number(f64),
	/// `decimal` in Ion text form.
	Decimal(String),
	/// `timestamp` in Ion text form.
	Timestamp(String),
	/// `symbol` or `string`.
	Text(String),
	/// `blob` or `clob` payload, byte-for-byte.
	Binary(Vec<u8>),
	/// Ordered `list`.
	List(Vec<ParsedValue>),
	/// Ordered `sexp`.
	SExpression(Vec<ParsedValue>),
	/// Field-keyed `struct`.
	Struct(StructValue),
	/// Stand-in for a single value that failed to decode.
	ErrorPlaceholder(String),
}

/// Struct fields in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructValue {
	/// Decoded fields; names are unique.
	pub fields: Vec<FieldValue>,
}

/// Named struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name; empty when the stream carried no text.
	pub name: Box<str>,
	/// Field payload.
	pub value: ParsedValue,
}

impl StructValue {
	/// Insert a field; a repeated name overwrites the earlier value in place.
	pub fn insert(&mut self, name: &str, value: ParsedValue) {
		match self.fields.iter_mut().find(|field| field.name.as_ref() == name) {
			Some(field) => field.value = value,
			None => self.fields.push(FieldValue { name: name.into(), value }),
		}
	}

	/// Look up a field by name.
	pub fn get(&self, name: &str) -> Option<&ParsedValue> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}

	/// Number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether the struct has no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl ParsedValue {
	/// Short kind label used in messages and CLI output.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Boolean(_) => "boolean",
			Self::Number(_) => "number",
			Self::Decimal(_) => "decimal",
			Self::Timestamp(_) => "timestamp",
			Self::Text(_) => "text",
			Self::Binary(_) => "binary",
			Self::List(_) => "list",
			Self::SExpression(_) => "sexp",
			Self::Struct(_) => "struct",
			Self::ErrorPlaceholder(_) => "error",
		}
	}

	/// Text payload of `Text`, `Decimal`, or `Timestamp`.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Text(text) | Self::Decimal(text) | Self::Timestamp(text) => Some(text),
			_ => None,
		}
	}

	/// Numeric payload.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(value) => Some(*value),
			_ => None,
		}
	}

	/// Boolean payload.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Boolean(value) => Some(*value),
			_ => None,
		}
	}

	/// Binary payload.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Self::Binary(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Elements of a `List` or `SExpression`.
	pub fn as_list(&self) -> Option<&[ParsedValue]> {
		match self {
			Self::List(items) | Self::SExpression(items) => Some(items),
			_ => None,
		}
	}

	/// Struct payload.
	pub fn as_struct(&self) -> Option<&StructValue> {
		match self {
			Self::Struct(item) => Some(item),
			_ => None,
		}
	}

	/// Field of a struct value.
	pub fn get(&self, name: &str) -> Option<&ParsedValue> {
		self.as_struct().and_then(|item| item.get(name))
	}

	/// Whether this is a `List`, `SExpression`, or `Struct`.
	pub fn is_container(&self) -> bool {
		matches!(self, Self::List(_) | Self::SExpression(_) | Self::Struct(_))
	}

	/// Recursive count of `ErrorPlaceholder` leaves.
	pub fn placeholder_count(&self) -> usize {
		match self {
			Self::ErrorPlaceholder(_) => 1,
			Self::List(items) | Self::SExpression(items) => items.iter().map(Self::placeholder_count).sum(),
			Self::Struct(item) => item.fields.iter().map(|field| field.value.placeholder_count()).sum(),
			_ => 0,
		}
	}
}
