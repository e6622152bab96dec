use std::fmt;

/// Type tag of the value under an Ion cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IonType {
	/// `null.null`.
	Null,
	/// `bool`.
	Bool,
	/// `int` (positive or negative encoding).
	Int,
	/// `float`.
	Float,
	/// `decimal`.
	Decimal,
	/// `timestamp`.
	Timestamp,
	/// `symbol`.
	Symbol,
	/// `string`.
	String,
	/// `clob`.
	Clob,
	/// `blob`.
	Blob,
	/// `list`.
	List,
	/// `sexp`.
	SExp,
	/// `struct`.
	Struct,
	/// Type the reader reports but the tree has no variant for.
	Unknown,
}

impl IonType {
	/// Render the type as its Ion text name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::Decimal => "decimal",
			Self::Timestamp => "timestamp",
			Self::Symbol => "symbol",
			Self::String => "string",
			Self::Clob => "clob",
			Self::Blob => "blob",
			Self::List => "list",
			Self::SExp => "sexp",
			Self::Struct => "struct",
			Self::Unknown => "unknown",
		}
	}

	/// Whether the cursor can step into values of this type.
	pub fn is_container(self) -> bool {
		matches!(self, Self::List | Self::SExp | Self::Struct)
	}
}

impl From<ion_rs::IonType> for IonType {
	#[allow(unreachable_patterns)]
	fn from(ion_type: ion_rs::IonType) -> Self {
		use ion_rs::IonType as Wire;

		match ion_type {
			Wire::Null => Self::Null,
			Wire::Bool => Self::Bool,
			Wire::Int => Self::Int,
			Wire::Float => Self::Float,
			Wire::Decimal => Self::Decimal,
			Wire::Timestamp => Self::Timestamp,
			Wire::Symbol => Self::Symbol,
			Wire::String => Self::String,
			Wire::Clob => Self::Clob,
			Wire::Blob => Self::Blob,
			Wire::List => Self::List,
			Wire::SExp => Self::SExp,
			Wire::Struct => Self::Struct,
			_ => Self::Unknown,
		}
	}
}

impl fmt::Display for IonType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
