use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::ion::ParsedValue;
use crate::session::{Result, SessionError};

/// How an image payload was carried in the recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
	/// Blob or clob bytes.
	Binary,
	/// Legacy `b'...'` byte-escape text.
	ByteEscape,
	/// Standard-alphabet base64 text.
	Base64,
	/// Text taken as its UTF-8 bytes.
	Raw,
}

impl ImageEncoding {
	/// Render encoding as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Binary => "binary",
			Self::ByteEscape => "byte-escape",
			Self::Base64 => "base64",
			Self::Raw => "raw",
		}
	}
}

/// Decode a message image payload to raw image bytes.
pub fn decode_image_payload(value: &ParsedValue) -> Result<(ImageEncoding, Vec<u8>)> {
	match value {
		ParsedValue::Binary(bytes) => Ok((ImageEncoding::Binary, bytes.clone())),
		ParsedValue::Text(text) => decode_image_text(text),
		other => Err(SessionError::UnexpectedType {
			field: "data".to_owned(),
			expected: "binary or text",
			got: other.kind(),
		}),
	}
}

/// Decode a textual image payload: byte-escape, then base64, then raw text.
pub fn decode_image_text(text: &str) -> Result<(ImageEncoding, Vec<u8>)> {
	if is_byte_escape(text) {
		return Ok((ImageEncoding::ByteEscape, decode_byte_escape(text)?));
	}
	match STANDARD.decode(text) {
		Ok(bytes) => Ok((ImageEncoding::Base64, bytes)),
		Err(_) => Ok((ImageEncoding::Raw, text.as_bytes().to_vec())),
	}
}

fn is_byte_escape(text: &str) -> bool {
	text.len() >= 3 && text.starts_with("b'") && text.ends_with('\'')
}

/// Decode `b'...'` byte-escape notation.
///
/// Recognizes `\xHH`, `\\`, `\'`, `\n`, `\r`, `\t`; any other escaped
/// character stands for itself. Unescaped characters contribute their low
/// byte.
pub fn decode_byte_escape(text: &str) -> Result<Vec<u8>> {
	let body = text.strip_prefix("b'").and_then(|rest| rest.strip_suffix('\'')).unwrap_or(text);
	let chars: Vec<char> = body.chars().collect();
	let mut out = Vec::with_capacity(chars.len());

	let mut i = 0;
	while i < chars.len() {
		if chars[i] != '\\' {
			out.push(low_byte(chars[i]));
			i += 1;
			continue;
		}

		let Some(&escaped) = chars.get(i + 1) else {
			out.push(b'\\');
			break;
		};
		match escaped {
			'x' => {
				out.push(hex_byte(chars.get(i + 2..i + 4)).ok_or(SessionError::InvalidByteEscape { at: i })?);
				i += 4;
			}
			'n' => {
				out.push(b'\n');
				i += 2;
			}
			'r' => {
				out.push(b'\r');
				i += 2;
			}
			't' => {
				out.push(b'\t');
				i += 2;
			}
			other => {
				out.push(low_byte(other));
				i += 2;
			}
		}
	}

	Ok(out)
}

fn hex_byte(digits: Option<&[char]>) -> Option<u8> {
	let [hi, lo] = digits? else {
		return None;
	};
	let hi = hi.to_digit(16)?;
	let lo = lo.to_digit(16)?;
	u8::try_from(hi * 16 + lo).ok()
}

fn low_byte(ch: char) -> u8 {
	(u32::from(ch) & 0xFF) as u8
}
