use iondoc_testkit::{Element, IMAGE_BYTES, encode, session_fixture_bytes};

use super::SessionFile;
use crate::ion::{Document, ParsedValue, parse};
use crate::session::SessionError;

fn session(bytes: &[u8]) -> SessionFile {
	let document = parse(bytes).expect("parse");
	SessionFile::from_document(&document).expect("session view")
}

#[test]
fn fixture_exposes_metadata_and_topics() {
	let file = session(&session_fixture_bytes());

	assert_eq!(file.metadata.compression_method.as_deref(), Some("zlib"));
	assert_eq!(file.metadata.compressed_types, ["sensor_msgs/CompressedImage"]);
	assert_eq!(
		file.metadata.bot_info.as_ref().and_then(|info| info.get("botName")),
		Some(&ParsedValue::Text("Atlas".to_owned()))
	);
	assert_eq!(file.start_time(), Some(&ParsedValue::Text("2024-03-01T10:00:00Z".to_owned())));

	let model = file.metadata.bot_model.as_ref().expect("bot model");
	assert_eq!(model.format.as_deref(), Some("obj"));
	assert_eq!(model.filename.as_deref(), Some("bot.obj"));
	assert!(!model.data.is_empty());

	assert_eq!(file.topics.len(), 2);
	let rosout = file.topic("/rosout").expect("rosout topic");
	assert_eq!(rosout.topic_type.as_deref(), Some("rosgraph_msgs/Log"));
	assert_eq!(rosout.frequency, Some(2.0));
	assert_eq!(rosout.messages.len(), 2);
	assert_eq!(rosout.messages[0].timestamp, ParsedValue::Number(1_709_287_200_500.0));
}

#[test]
fn message_payload_reads_nested_data_field() {
	let file = session(&session_fixture_bytes());
	let camera = file.topic("/camera/image").expect("camera topic");

	assert_eq!(camera.messages[2].payload(), Some(&ParsedValue::Binary(IMAGE_BYTES.to_vec())));
	assert_eq!(file.topic("/rosout").expect("rosout").messages[0].payload(), None);
}

#[test]
fn missing_sections_are_empty() {
	let file = session(&encode(&[Element::structure([("other", Element::Int(1))])]));

	assert_eq!(file, SessionFile::default());
}

#[test]
fn sequence_root_uses_first_struct() {
	let bytes = encode(&[
		Element::Int(7),
		Element::structure([("topics", Element::list([Element::structure([("topicName", Element::string("/a"))])]))]),
	]);

	let file = session(&bytes);
	assert_eq!(file.topics[0].name, "/a");
	assert!(file.topics[0].messages.is_empty());
}

#[test]
fn wrong_field_types_are_reported_with_path() {
	let bytes = encode(&[Element::structure([(
		"metadata",
		Element::structure([("botModel", Element::structure([("data", Element::string("not bytes"))]))]),
	)])]);

	let err = SessionFile::from_document(&parse(&bytes).expect("parse")).expect_err("type mismatch");
	assert!(matches!(
		err,
		SessionError::UnexpectedType {
			ref field,
			expected: "binary",
			got: "text",
		} if field == "metadata.botModel.data"
	));
}

#[test]
fn non_struct_topic_entries_are_rejected() {
	let bytes = encode(&[Element::structure([("topics", Element::list([Element::Int(1)]))])]);

	let err = SessionFile::from_document(&parse(&bytes).expect("parse")).expect_err("bad topic");
	assert_eq!(err.to_string(), "field 'topics[0]' has unexpected type: expected struct, got number");
}

#[test]
fn list_root_has_no_session_struct() {
	let document = Document::Value(ParsedValue::List(Vec::new()));

	assert!(matches!(
		SessionFile::from_document(&document),
		Err(SessionError::UnexpectedType { got: "list", .. })
	));
}

#[test]
fn unknown_topic_is_an_error() {
	let file = SessionFile::default();

	assert!(matches!(file.topic("/nope"), Err(SessionError::TopicNotFound { .. })));
}
