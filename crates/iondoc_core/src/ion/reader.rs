use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};

use ion_rs::{IonReader, Reader, ReaderBuilder, StreamItem};
use tracing::debug;

use crate::ion::{Decimal, IonCursor, IonError, IonType, Result};

/// Binary Ion 1.0 version marker.
pub const ION_VERSION_MARKER: [u8; 4] = [0xE0, 0x01, 0x00, 0xEA];

/// Longest decimal text accepted from the reader.
pub const DECIMAL_TEXT_LIMIT: usize = 16 * 1024;
/// Longest timestamp text accepted from the reader.
pub const TIMESTAMP_TEXT_LIMIT: usize = 96;

/// [`IonCursor`] over the `ion-rs` binary reader.
///
/// Local symbol tables are resolved by the reader and never surface as
/// values. Decimal and timestamp scalars are rendered through the reader's
/// own text form, capped in length.
pub struct IonReaderCursor<'a> {
	reader: Reader<'a>,
	current: Option<IonType>,
}

impl<'a> IonReaderCursor<'a> {
	/// Create a cursor; the buffer must begin with an Ion 1.0 version marker.
	pub fn new(bytes: &'a [u8]) -> Result<Self> {
		let magic = first4(bytes);
		if bytes.len() < ION_VERSION_MARKER.len() || magic[0] != 0xE0 || magic[3] != 0xEA {
			return Err(IonError::MissingVersionMarker { magic });
		}
		if magic != ION_VERSION_MARKER {
			return Err(IonError::UnsupportedVersion {
				major: magic[1],
				minor: magic[2],
			});
		}

		let reader = ReaderBuilder::new().build(bytes)?;
		debug!(len = bytes.len(), "ion reader created");
		Ok(Self { reader, current: None })
	}

	fn current(&self) -> Result<IonType> {
		self.current.ok_or(IonError::NoCurrentValue)
	}
}

impl IonCursor for IonReaderCursor<'_> {
	fn next(&mut self) -> Result<Option<IonType>> {
		self.current = match self.reader.next()? {
			StreamItem::Value(ion_type) | StreamItem::Null(ion_type) => Some(IonType::from(ion_type)),
			StreamItem::Nothing => None,
		};
		Ok(self.current)
	}

	fn ion_type(&self) -> Option<IonType> {
		self.current
	}

	fn is_null(&self) -> bool {
		self.current.is_some() && self.reader.is_null()
	}

	fn field_name(&self) -> Result<Option<String>> {
		if self.reader.parent_type() != Some(ion_rs::IonType::Struct) {
			return Ok(None);
		}
		let name = self.reader.field_name()?;
		Ok(name.text().map(str::to_owned))
	}

	fn annotations(&self) -> Result<Vec<String>> {
		let mut texts = Vec::new();
		for annotation in self.reader.annotations() {
			let annotation = annotation?;
			texts.push(annotation.text().unwrap_or("$0").to_owned());
		}
		Ok(texts)
	}

	fn read_bool(&mut self) -> Result<Option<bool>> {
		if self.is_null() {
			return Ok(None);
		}
		match self.current()? {
			IonType::Bool => Ok(Some(self.reader.read_bool()?)),
			got => Err(IonError::TypeMismatch { expected: "bool", got }),
		}
	}

	fn read_f64(&mut self) -> Result<Option<f64>> {
		if self.is_null() {
			return Ok(None);
		}
		match self.current()? {
			IonType::Int => Ok(Some(self.reader.read_i64()? as f64)),
			IonType::Float => Ok(Some(self.reader.read_f64()?)),
			got => Err(IonError::TypeMismatch {
				expected: "int or float",
				got,
			}),
		}
	}

	fn read_decimal(&mut self) -> Result<Option<Decimal>> {
		if self.is_null() {
			return Ok(None);
		}
		match self.current()? {
			IonType::Decimal => {
				let decimal = self.reader.read_decimal()?;
				let text = render_bounded(&decimal, "decimal", DECIMAL_TEXT_LIMIT)?;
				Decimal::from_ion_text(&text).map(Some).ok_or(IonError::InvalidDecimal { text })
			}
			got => Err(IonError::TypeMismatch { expected: "decimal", got }),
		}
	}

	fn read_timestamp(&mut self) -> Result<Option<String>> {
		if self.is_null() {
			return Ok(None);
		}
		match self.current()? {
			IonType::Timestamp => {
				let timestamp = self.reader.read_timestamp()?;
				render_bounded(&timestamp, "timestamp", TIMESTAMP_TEXT_LIMIT).map(Some)
			}
			got => Err(IonError::TypeMismatch {
				expected: "timestamp",
				got,
			}),
		}
	}

	fn read_text(&mut self) -> Result<Option<String>> {
		if self.is_null() {
			return Ok(None);
		}
		match self.current()? {
			IonType::Symbol => {
				let symbol = self.reader.read_symbol()?;
				Ok(Some(symbol.text().unwrap_or("$0").to_owned()))
			}
			IonType::String => {
				let text = self.reader.read_string()?;
				Ok(Some(text.text().to_owned()))
			}
			got => Err(IonError::TypeMismatch {
				expected: "symbol or string",
				got,
			}),
		}
	}

	fn read_bytes(&mut self) -> Result<Option<Vec<u8>>> {
		if self.is_null() {
			return Ok(None);
		}
		match self.current()? {
			IonType::Blob => {
				let blob = self.reader.read_blob()?;
				let bytes: &[u8] = blob.as_ref();
				Ok(Some(bytes.to_vec()))
			}
			IonType::Clob => {
				let clob = self.reader.read_clob()?;
				let bytes: &[u8] = clob.as_ref();
				Ok(Some(bytes.to_vec()))
			}
			got => Err(IonError::TypeMismatch {
				expected: "blob or clob",
				got,
			}),
		}
	}

	fn step_in(&mut self) -> Result<()> {
		let got = self.current()?;
		if !got.is_container() || self.is_null() {
			return Err(IonError::NotAContainer { got });
		}
		self.reader.step_in()?;
		self.current = None;
		Ok(())
	}

	fn step_out(&mut self) -> Result<()> {
		if self.reader.depth() == 0 {
			return Err(IonError::StepOutAtTopLevel);
		}
		self.reader.step_out()?;
		self.current = None;
		Ok(())
	}

	fn depth(&self) -> usize {
		self.reader.depth()
	}
}

/// Render `value` into at most `limit` bytes of text.
///
/// Output past the limit, or a panic inside the formatter, is reported as an
/// error so that one oversized or hostile scalar degrades to a placeholder.
pub(crate) fn render_bounded(value: &dyn fmt::Display, what: &'static str, limit: usize) -> Result<String> {
	let mut out = Bounded {
		text: String::new(),
		limit,
	};
	match panic::catch_unwind(AssertUnwindSafe(|| write!(out, "{value}"))) {
		Ok(Ok(())) => Ok(out.text),
		Ok(Err(_)) => Err(IonError::RenderLimit { what, limit }),
		Err(_) => Err(IonError::RenderPanicked { what }),
	}
}

struct Bounded {
	text: String,
	limit: usize,
}

impl fmt::Write for Bounded {
	fn write_str(&mut self, chunk: &str) -> fmt::Result {
		if self.text.len() + chunk.len() > self.limit {
			return Err(fmt::Error);
		}
		self.text.push_str(chunk);
		Ok(())
	}
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut magic = [0_u8; 4];
	let take = bytes.len().min(4);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}
