use std::io::Read;

use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use tracing::debug;

use crate::session::{Result, SessionError};

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
/// gzip member magic.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Codec that produced a decompressed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
	/// zstd frame.
	Zstd,
	/// gzip member.
	Gzip,
	/// zlib stream.
	Zlib,
	/// Raw deflate stream.
	Deflate,
	/// Not compressed, or no codec succeeded.
	Identity,
}

impl Codec {
	/// Render codec as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Zstd => "zstd",
			Self::Gzip => "gzip",
			Self::Zlib => "zlib",
			Self::Deflate => "deflate",
			Self::Identity => "identity",
		}
	}

	/// Codec suggested by the leading bytes of `raw`.
	pub fn detect(raw: &[u8]) -> Option<Self> {
		if raw.starts_with(&ZSTD_MAGIC) {
			return Some(Self::Zstd);
		}
		if raw.starts_with(&GZIP_MAGIC) {
			return Some(Self::Gzip);
		}
		if let &[cmf, flg, ..] = raw {
			let header = (u16::from(cmf) << 8) | u16::from(flg);
			if cmf & 0x0F == 8 && cmf >> 4 <= 7 && header % 31 == 0 {
				return Some(Self::Zlib);
			}
		}
		None
	}
}

/// Decompress a payload, falling back to raw deflate and then to the
/// original bytes when no codec applies.
///
/// Only an oversized output is an error.
pub fn decompress_payload(raw: &[u8]) -> Result<(Codec, Vec<u8>)> {
	if raw.is_empty() {
		return Ok((Codec::Identity, Vec::new()));
	}

	let candidates = Codec::detect(raw).into_iter().chain([Codec::Deflate]);
	for codec in candidates {
		match inflate(codec, raw) {
			Ok(out) if !out.is_empty() => {
				debug!(codec = codec.as_str(), input = raw.len(), output = out.len(), "decompressed payload");
				return Ok((codec, out));
			}
			Ok(_) => debug!(codec = codec.as_str(), "codec produced no output"),
			Err(err @ SessionError::PayloadTooLarge { .. }) => return Err(err),
			Err(err) => debug!(codec = codec.as_str(), error = %err, "codec rejected payload"),
		}
	}

	debug!(input = raw.len(), "payload passed through unchanged");
	Ok((Codec::Identity, raw.to_vec()))
}

/// Decompress a model payload and return it when it is Wavefront OBJ text.
pub fn extract_obj_model(raw: &[u8]) -> Result<String> {
	if raw.is_empty() {
		return Err(SessionError::MissingPayload { what: "model data" });
	}

	let (codec, bytes) = decompress_payload(raw)?;
	let text = String::from_utf8_lossy(&bytes);
	if !looks_like_obj(&text) {
		return Err(SessionError::NotObjModel { codec: codec.as_str() });
	}
	Ok(text.into_owned())
}

/// Vertex lines plus face or normal lines.
pub fn looks_like_obj(text: &str) -> bool {
	text.contains("v ") && (text.contains("f ") || text.contains("vn "))
}

fn inflate(codec: Codec, raw: &[u8]) -> Result<Vec<u8>> {
	match codec {
		Codec::Zstd => read_limited(zstd::stream::read::Decoder::new(raw)?),
		Codec::Gzip => read_limited(GzDecoder::new(raw)),
		Codec::Zlib => read_limited(ZlibDecoder::new(raw)),
		Codec::Deflate => {
			let mut decoder = DeflateDecoder::new(raw);
			let out = read_limited(&mut decoder)?;
			if decoder.total_in() != raw.len() as u64 {
				return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "trailing bytes after deflate stream").into());
			}
			Ok(out)
		}
		Codec::Identity => Ok(raw.to_vec()),
	}
}

fn read_limited(mut decoder: impl Read) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(SessionError::PayloadTooLarge {
				limit: MAX_DECOMPRESSED_BYTES,
			});
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}

#[cfg(test)]
mod tests;
