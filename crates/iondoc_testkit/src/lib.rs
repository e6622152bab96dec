//! Shared test helpers for workspace crates.
//!
//! Builds binary Ion streams with the `ion-rs` writer, compression helpers,
//! and a session-recording fixture shaped like the files produced on robots.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
pub use ion_rs::IonType as WireType;
use ion_rs::{BinaryWriterBuilder, IonResult, IonWriter};

/// Binary Ion 1.0 version marker.
pub const ION_VERSION_MARKER: [u8; 4] = [0xE0, 0x01, 0x00, 0xEA];

/// Ion value to encode.
#[derive(Debug, Clone)]
pub enum Element {
	/// `null.null`.
	Null,
	/// Typed null (`null.int`, `null.struct`, ...).
	TypedNull(WireType),
	/// `bool`.
	Bool(bool),
	/// `int`.
	Int(i64),
	/// 64-bit `float`.
	Float(f64),
	/// `decimal`.
	Decimal {
		/// Signed coefficient.
		coefficient: i64,
		/// Exponent.
		exponent: i64,
	},
	/// `symbol`.
	Symbol(String),
	/// `string`.
	String(String),
	/// `clob`.
	Clob(Vec<u8>),
	/// `blob`.
	Blob(Vec<u8>),
	/// `list`.
	List(Vec<Element>),
	/// `sexp`.
	SExp(Vec<Element>),
	/// `struct` with fields in order.
	Struct(Vec<(String, Element)>),
	/// Annotated value.
	Annotated(Vec<String>, Box<Element>),
}

impl Element {
	/// `string` value.
	pub fn string(text: &str) -> Self {
		Self::String(text.to_owned())
	}

	/// `symbol` value.
	pub fn symbol(text: &str) -> Self {
		Self::Symbol(text.to_owned())
	}

	/// `struct` from `(name, value)` pairs.
	pub fn structure<'a>(fields: impl IntoIterator<Item = (&'a str, Element)>) -> Self {
		Self::Struct(fields.into_iter().map(|(name, value)| (name.to_owned(), value)).collect())
	}

	/// `list` of values.
	pub fn list(items: impl IntoIterator<Item = Element>) -> Self {
		Self::List(items.into_iter().collect())
	}
}

/// Encode a full binary stream of `values`.
///
/// The writer emits the version marker and a local symbol table for every
/// symbol, field name and annotation text used.
pub fn encode(values: &[Element]) -> Vec<u8> {
	let mut out = Vec::new();
	write_stream(&mut out, values).expect("ion binary write");
	out
}

fn write_stream(out: &mut Vec<u8>, values: &[Element]) -> IonResult<()> {
	let mut writer = BinaryWriterBuilder::new().build(out)?;
	for value in values {
		write_value(&mut writer, value)?;
	}
	writer.flush()
}

fn write_value<W: IonWriter>(writer: &mut W, value: &Element) -> IonResult<()> {
	match value {
		Element::Null => writer.write_null(WireType::Null),
		Element::TypedNull(ion_type) => writer.write_null(*ion_type),
		Element::Bool(item) => writer.write_bool(*item),
		Element::Int(item) => writer.write_i64(*item),
		Element::Float(item) => writer.write_f64(*item),
		Element::Decimal { coefficient, exponent } => writer.write_decimal(&ion_rs::Decimal::new(*coefficient, *exponent)),
		Element::Symbol(text) => writer.write_symbol(text.as_str()),
		Element::String(text) => writer.write_string(text.as_str()),
		Element::Clob(bytes) => writer.write_clob(bytes.as_slice()),
		Element::Blob(bytes) => writer.write_blob(bytes.as_slice()),
		Element::List(items) => write_container(writer, WireType::List, items),
		Element::SExp(items) => write_container(writer, WireType::SExp, items),
		Element::Struct(fields) => {
			writer.step_in(WireType::Struct)?;
			for (name, field) in fields {
				writer.set_field_name(name.as_str());
				write_value(writer, field)?;
			}
			writer.step_out()
		}
		Element::Annotated(annotations, inner) => {
			writer.set_annotations(annotations.iter().map(String::as_str));
			write_value(writer, inner)
		}
	}
}

fn write_container<W: IonWriter>(writer: &mut W, ion_type: WireType, items: &[Element]) -> IonResult<()> {
	writer.step_in(ion_type)?;
	for item in items {
		write_value(writer, item)?;
	}
	writer.step_out()
}

/// zlib-wrap `bytes`.
pub fn zlib(bytes: &[u8]) -> Vec<u8> {
	let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(bytes).expect("zlib write");
	encoder.finish().expect("zlib finish")
}

/// gzip-wrap `bytes`.
pub fn gzip(bytes: &[u8]) -> Vec<u8> {
	let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(bytes).expect("gzip write");
	encoder.finish().expect("gzip finish")
}

/// Raw-deflate `bytes`.
pub fn deflate(bytes: &[u8]) -> Vec<u8> {
	let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(bytes).expect("deflate write");
	encoder.finish().expect("deflate finish")
}

/// Small Wavefront OBJ triangle.
pub const TRIANGLE_OBJ: &str = "# bot\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";

/// JPEG-like image bytes used by the camera topic fixture.
pub const IMAGE_BYTES: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0x27, 0x5C];

/// Session recording fixture: metadata plus `/rosout` and camera topics.
///
/// Session starts at `2024-03-01T10:00:00Z` (epoch ms 1709287200000).
pub fn session_fixture() -> Element {
	let metadata = Element::structure([
		("compressionMethod", Element::string("zlib")),
		("compressedTypes", Element::list([Element::string("sensor_msgs/CompressedImage")])),
		("botInfo", Element::structure([("botID", Element::string("bot-7")), ("botName", Element::string("Atlas"))])),
		(
			"sessionInfo",
			Element::structure([
				("session_id", Element::string("s-42")),
				("start_time", Element::string("2024-03-01T10:00:00Z")),
				("duration", Element::Int(12)),
			]),
		),
		("botConfig", Element::structure([("BOTTYPE", Element::string("uv")), ("ENABLE_IMU", Element::Bool(true))])),
		(
			"botModel",
			Element::structure([
				("format", Element::string("obj")),
				("filename", Element::string("bot.obj")),
				("data", Element::Blob(zlib(TRIANGLE_OBJ.as_bytes()))),
			]),
		),
		(
			"mapData",
			Element::structure([("format", Element::string("pgm")), ("data", Element::Blob(gzip(b"P5 2 2 255\n\x00\x01\x02\x03")))]),
		),
	]);

	let rosout = Element::structure([
		("topicName", Element::string("/rosout")),
		("topicType", Element::string("rosgraph_msgs/Log")),
		("frequency", Element::Float(2.0)),
		(
			"messages",
			Element::list([
				message(Element::structure([("level", Element::Int(2)), ("message", Element::string("boot"))]), 1_709_287_200_500),
				message(Element::structure([("level", Element::Int(4)), ("message", Element::string("lidar warm"))]), 1_709_287_203_000),
			]),
		),
	]);

	let base64_payload = "/9j/4Cdc";
	let escaped_payload = "b'\\xff\\xd8\\xff\\xe0\\'\\\\'";
	let camera = Element::structure([
		("topicName", Element::string("/camera/image")),
		("topicType", Element::string("sensor_msgs/CompressedImage")),
		("frequency", Element::Int(1)),
		(
			"messages",
			Element::list([
				message(Element::structure([("data", Element::string(base64_payload))]), 1_709_287_201_000),
				message(Element::structure([("data", Element::string(escaped_payload))]), 1_709_287_205_000),
				message(Element::structure([("data", Element::Blob(IMAGE_BYTES.to_vec()))]), 1_709_287_209_000),
			]),
		),
	]);

	Element::structure([("metadata", metadata), ("topics", Element::list([rosout, camera]))])
}

/// Encoded [`session_fixture`].
pub fn session_fixture_bytes() -> Vec<u8> {
	encode(&[session_fixture()])
}

fn message(data: Element, timestamp_ms: i64) -> Element {
	Element::structure([("data", data), ("timestamp", Element::Int(timestamp_ms))])
}

/// Write `bytes` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, bytes).expect("fixture write");
	path
}
