use iondoc_testkit::{TRIANGLE_OBJ, deflate, gzip, zlib};

use super::{Codec, decompress_payload, extract_obj_model, looks_like_obj};
use crate::session::SessionError;

#[test]
fn detects_codecs_from_leading_bytes() {
	assert_eq!(Codec::detect(&zlib(b"abc")), Some(Codec::Zlib));
	assert_eq!(Codec::detect(&gzip(b"abc")), Some(Codec::Gzip));
	assert_eq!(Codec::detect(&[0x28, 0xB5, 0x2F, 0xFD, 0x00]), Some(Codec::Zstd));
	assert_eq!(Codec::detect(b"v 1 2 3"), None);
}

#[test]
fn inflates_each_supported_codec() {
	let text = TRIANGLE_OBJ.as_bytes();
	let zstd = zstd::encode_all(text, 0).expect("zstd encode");

	assert_eq!(decompress_payload(&zlib(text)).expect("zlib"), (Codec::Zlib, text.to_vec()));
	assert_eq!(decompress_payload(&gzip(text)).expect("gzip"), (Codec::Gzip, text.to_vec()));
	assert_eq!(decompress_payload(&deflate(text)).expect("deflate"), (Codec::Deflate, text.to_vec()));
	assert_eq!(decompress_payload(&zstd).expect("zstd"), (Codec::Zstd, text.to_vec()));
}

#[test]
fn undecodable_payload_passes_through() {
	let raw = b"v 0 0 0\nv 1 0 0\nf 1 2 3\n";

	assert_eq!(decompress_payload(raw).expect("identity"), (Codec::Identity, raw.to_vec()));
	assert_eq!(decompress_payload(&[]).expect("empty"), (Codec::Identity, Vec::new()));
}

#[test]
fn corrupt_zlib_header_falls_back_to_original_bytes() {
	let mut raw = zlib(TRIANGLE_OBJ.as_bytes());
	raw[1] ^= 0x01;
	assert_eq!(Codec::detect(&raw), None);

	let (codec, out) = decompress_payload(&raw).expect("fallback");
	assert_eq!(codec, Codec::Identity);
	assert_eq!(out, raw);
}

#[test]
fn obj_model_is_extracted_from_compressed_payload() {
	assert_eq!(extract_obj_model(&zlib(TRIANGLE_OBJ.as_bytes())).expect("obj"), TRIANGLE_OBJ);
	assert_eq!(extract_obj_model(b"v 0 0 0\nvn 0 0 1\n").expect("plain obj"), "v 0 0 0\nvn 0 0 1\n");
}

#[test]
fn non_obj_payloads_are_rejected() {
	assert!(matches!(
		extract_obj_model(&gzip(b"P5 2 2 255\n")),
		Err(SessionError::NotObjModel { codec: "gzip" })
	));
	assert!(matches!(extract_obj_model(&[]), Err(SessionError::MissingPayload { .. })));
	assert!(!looks_like_obj("v 1 2 3 only vertices"));
}
