#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use iondoc_testkit::{Element, IMAGE_BYTES, TRIANGLE_OBJ, encode, session_fixture_bytes, write_fixture};
use serde_json::Value;

fn run_iondoc(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_iondoc")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run_iondoc(args);
	assert!(
		output.status.success(),
		"command should succeed: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn fixture(dir: &Path) -> PathBuf {
	write_fixture(dir, "session.ion", &session_fixture_bytes())
}

fn path_str(path: &Path) -> &str {
	path.to_str().expect("utf-8 temp path")
}

#[test]
fn info_json_summarizes_metadata_and_topics() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = fixture(dir.path());

	let json = run_json(&["info", path_str(&path), "--json"]);

	assert_eq!(json["root"], "struct");
	assert_eq!(json["placeholders"], 0);
	assert_eq!(json["compression_method"], "zlib");
	assert_eq!(json["compressed_types"][0], "sensor_msgs/CompressedImage");
	assert_eq!(json["bot_info"]["botName"], "Atlas");
	assert_eq!(json["start_time"], "2024-03-01T10:00:00Z");
	assert_eq!(json["bot_model"]["filename"], "bot.obj");
	assert_eq!(json["topics"], 2);
	assert_eq!(json["messages"], 5);
}

#[test]
fn topics_json_lists_each_topic() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = fixture(dir.path());

	let json = run_json(&["topics", path_str(&path), "--json"]);
	let topics = json["topics"].as_array().expect("topics array");

	assert_eq!(topics.len(), 2);
	assert_eq!(topics[0]["name"], "/rosout");
	assert_eq!(topics[0]["type"], "rosgraph_msgs/Log");
	assert_eq!(topics[0]["frequency"].as_f64(), Some(2.0));
	assert_eq!(topics[1]["name"], "/camera/image");
	assert_eq!(topics[1]["messages"], 3);
}

#[test]
fn dump_json_reports_binary_lengths_and_optional_base64() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = fixture(dir.path());

	let json = run_json(&["dump", path_str(&path), "--json"]);
	let image = &json["topics"][1]["messages"][2]["data"]["data"];
	assert_eq!(image["binary_len"], IMAGE_BYTES.len());
	assert!(image.get("base64").is_none());
	assert_eq!(json["topics"][0]["messages"][0]["data"]["message"], "boot");
	assert_eq!(json["topics"][0]["messages"][0]["timestamp"], 1_709_287_200_500_i64);

	let json = run_json(&["dump", path_str(&path), "--json", "--bytes"]);
	assert_eq!(json["topics"][1]["messages"][2]["data"]["data"]["base64"], "/9j/4Cdc");
}

#[test]
fn dump_text_prints_truncated_tree() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = fixture(dir.path());

	let output = run_iondoc(&["dump", path_str(&path), "--depth", "1"]);
	assert!(output.status.success());
	let stdout = String::from_utf8_lossy(&output.stdout);

	assert!(stdout.contains("root: struct"));
	assert!(stdout.contains("metadata = { ... 7 fields }"));
	assert!(stdout.contains("topics = [... 2 items]"));
}

#[test]
fn sequence_roots_dump_as_arrays() {
	let dir = tempfile::tempdir().expect("tempdir");
	let bytes = encode(&[
		Element::structure([("a", Element::Int(1))]),
		Element::structure([("b", Element::Int(2))]),
	]);
	let path = write_fixture(dir.path(), "seq.ion", &bytes);

	let json = run_json(&["dump", path_str(&path), "--json"]);

	assert_eq!(json, serde_json::json!([{ "a": 1 }, { "b": 2 }]));
}

#[test]
fn model_writes_obj_text_and_map_bytes() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = fixture(dir.path());
	let obj = dir.path().join("bot.obj");
	let map = dir.path().join("map.pgm");

	let output = run_iondoc(&["model", path_str(&path), "--out", path_str(&obj)]);
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
	assert_eq!(std::fs::read_to_string(&obj).expect("obj written"), TRIANGLE_OBJ);

	let output = run_iondoc(&["model", path_str(&path), "--map", "--out", path_str(&map)]);
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
	assert_eq!(std::fs::read(&map).expect("map written"), b"P5 2 2 255\n\x00\x01\x02\x03");
}

#[test]
fn images_decodes_every_payload_encoding() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = fixture(dir.path());
	let out = dir.path().join("frames");

	let output = run_iondoc(&[
		"images",
		path_str(&path),
		"--topic",
		"/camera/image",
		"--out",
		path_str(&out),
		"--workers",
		"2",
	]);
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

	for name in ["000000_1709287201000.jpg", "000001_1709287205000.jpg", "000002_1709287209000.jpg"] {
		assert_eq!(std::fs::read(out.join(name)).expect("frame written"), IMAGE_BYTES, "{name}");
	}
}

#[test]
fn frame_json_picks_nearest_message() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = fixture(dir.path());

	let json = run_json(&["frame", path_str(&path), "--topic", "/camera/image", "--at", "4.2", "--json"]);

	assert_eq!(json["start_ms"], 1_709_287_200_000_i64);
	assert_eq!(json["target_ms"], 1_709_287_204_200_i64);
	assert_eq!(json["candidates"], 3);
	assert_eq!(json["message"]["index"], 1);
	assert_eq!(json["message"]["offset_ms"], 5_000);
	assert_eq!(json["message"]["delta_ms"], 800);
}

#[test]
fn failures_exit_with_error_message() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = fixture(dir.path());
	let empty = write_fixture(dir.path(), "empty.ion", &[]);

	let output = run_iondoc(&["frame", path_str(&path), "--topic", "/missing", "--at", "1"]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("error: topic not found: /missing"));

	let output = run_iondoc(&["info", path_str(&empty)]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("error: invalid or empty data provided"));
}

#[test]
fn frame_rejects_offsets_beyond_millisecond_range() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = fixture(dir.path());

	let output = run_iondoc(&["frame", path_str(&path), "--topic", "/camera/image", "--at", "1e300"]);

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("error: invalid timestamp value"));
}
