mod cursor;
mod decimal;
mod document;
mod error;
mod ion_type;
mod reader;
mod value;

/// Pull-cursor protocol consumed by the document parser.
pub use cursor::IonCursor;
/// Exact decimal scalar.
pub use decimal::Decimal;
/// Document parser entry points, options, and result shape.
pub use document::{Document, DocumentParser, ParseOptions, parse, parse_optional, parse_with_options, validate_shape};
/// Error and result aliases.
pub use error::{IonError, ParseError, Result};
/// Ion type tags.
pub use ion_type::IonType;
/// Cursor over the `ion-rs` binary reader.
pub use reader::{DECIMAL_TEXT_LIMIT, ION_VERSION_MARKER, IonReaderCursor, TIMESTAMP_TEXT_LIMIT};
/// Parsed document tree.
pub use value::{FieldValue, ParsedValue, StructValue};
