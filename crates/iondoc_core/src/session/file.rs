use crate::ion::{Document, ParsedValue, StructValue};
use crate::session::{Result, SessionError};

/// Typed view over the conventional session recording layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionFile {
	/// Recording metadata.
	pub metadata: Metadata,
	/// Recorded topics in file order.
	pub topics: Vec<Topic>,
}

/// `metadata` struct of a recording.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
	/// `compressionMethod`.
	pub compression_method: Option<String>,
	/// `compressedTypes`.
	pub compressed_types: Vec<String>,
	/// `botInfo`, kept as-is.
	pub bot_info: Option<StructValue>,
	/// `sessionInfo`.
	pub session_info: Option<SessionInfo>,
	/// `botConfig`, kept as-is.
	pub bot_config: Option<StructValue>,
	/// `botModel`.
	pub bot_model: Option<BotModel>,
	/// `mapData`.
	pub map_data: Option<MapData>,
}

/// `sessionInfo` struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionInfo {
	/// All fields as recorded.
	pub fields: StructValue,
}

impl SessionInfo {
	/// `start_time` value (text or timestamp).
	pub fn start_time(&self) -> Option<&ParsedValue> {
		self.fields.get("start_time").filter(|value| **value != ParsedValue::Null)
	}

	/// Any other field.
	pub fn get(&self, name: &str) -> Option<&ParsedValue> {
		self.fields.get(name)
	}
}

/// `botModel` struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BotModel {
	/// Model format label, e.g. `obj`.
	pub format: Option<String>,
	/// Original file name.
	pub filename: Option<String>,
	/// Possibly compressed model bytes.
	pub data: Vec<u8>,
}

/// `mapData` struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapData {
	/// Map format label.
	pub format: Option<String>,
	/// Possibly compressed map bytes.
	pub data: Vec<u8>,
}

/// One recorded topic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topic {
	/// `topicName`.
	pub name: String,
	/// `topicType`.
	pub topic_type: Option<String>,
	/// `frequency` in Hz.
	pub frequency: Option<f64>,
	/// `messages` in file order.
	pub messages: Vec<Message>,
}

/// One topic message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
	/// `data` payload; the whole entry when it is not a struct.
	pub data: ParsedValue,
	/// `timestamp`, `Null` when absent.
	pub timestamp: ParsedValue,
}

impl Message {
	/// Embedded image or blob payload at `data.data`.
	pub fn payload(&self) -> Option<&ParsedValue> {
		self.data.get("data").filter(|value| **value != ParsedValue::Null)
	}
}

impl SessionFile {
	/// Extract the session view from a parsed document.
	///
	/// A `Sequence` root uses its first struct value.
	pub fn from_document(document: &Document) -> Result<Self> {
		let root = match document {
			Document::Value(value) => value.as_struct().ok_or_else(|| mismatch("<root>", "struct", value))?,
			Document::Sequence(values) => values
				.iter()
				.find_map(ParsedValue::as_struct)
				.ok_or(SessionError::UnexpectedType {
					field: "<root>".to_owned(),
					expected: "struct",
					got: "sequence",
				})?,
		};
		Self::from_struct(root)
	}

	/// Extract the session view from the root struct.
	pub fn from_struct(root: &StructValue) -> Result<Self> {
		let metadata = match struct_field(root, "", "metadata")? {
			Some(item) => Metadata::from_struct(item)?,
			None => Metadata::default(),
		};

		let mut topics = Vec::new();
		if let Some(items) = list_field(root, "", "topics")? {
			for (idx, item) in items.iter().enumerate() {
				let path = format!("topics[{idx}]");
				let fields = item.as_struct().ok_or_else(|| mismatch(&path, "struct", item))?;
				topics.push(Topic::from_struct(fields, &path)?);
			}
		}

		Ok(Self { metadata, topics })
	}

	/// Look up a topic by name.
	pub fn topic(&self, name: &str) -> Result<&Topic> {
		self.topics
			.iter()
			.find(|topic| topic.name == name)
			.ok_or_else(|| SessionError::TopicNotFound { name: name.to_owned() })
	}

	/// Session `start_time`, when recorded.
	pub fn start_time(&self) -> Option<&ParsedValue> {
		self.metadata.session_info.as_ref().and_then(SessionInfo::start_time)
	}
}

impl Metadata {
	fn from_struct(item: &StructValue) -> Result<Self> {
		let path = "metadata";
		let compressed_types = match list_field(item, path, "compressedTypes")? {
			Some(items) => items
				.iter()
				.enumerate()
				.map(|(idx, value)| {
					value
						.as_str()
						.map(str::to_owned)
						.ok_or_else(|| mismatch(&format!("{path}.compressedTypes[{idx}]"), "text", value))
				})
				.collect::<Result<Vec<_>>>()?,
			None => Vec::new(),
		};

		let bot_model = match struct_field(item, path, "botModel")? {
			Some(model) => Some(BotModel {
				format: text_field(model, "metadata.botModel", "format")?,
				filename: text_field(model, "metadata.botModel", "filename")?,
				data: bytes_field(model, "metadata.botModel", "data")?,
			}),
			None => None,
		};

		let map_data = match struct_field(item, path, "mapData")? {
			Some(map) => Some(MapData {
				format: text_field(map, "metadata.mapData", "format")?,
				data: bytes_field(map, "metadata.mapData", "data")?,
			}),
			None => None,
		};

		Ok(Self {
			compression_method: text_field(item, path, "compressionMethod")?,
			compressed_types,
			bot_info: struct_field(item, path, "botInfo")?.cloned(),
			session_info: struct_field(item, path, "sessionInfo")?.map(|fields| SessionInfo { fields: fields.clone() }),
			bot_config: struct_field(item, path, "botConfig")?.cloned(),
			bot_model,
			map_data,
		})
	}
}

impl Topic {
	fn from_struct(item: &StructValue, path: &str) -> Result<Self> {
		let messages = match list_field(item, path, "messages")? {
			Some(items) => items.iter().map(Message::from_value).collect(),
			None => Vec::new(),
		};

		Ok(Self {
			name: text_field(item, path, "topicName")?.unwrap_or_default(),
			topic_type: text_field(item, path, "topicType")?,
			frequency: number_field(item, path, "frequency")?,
			messages,
		})
	}
}

impl Message {
	fn from_value(value: &ParsedValue) -> Self {
		match value.as_struct() {
			Some(item) => Self {
				data: item.get("data").cloned().unwrap_or(ParsedValue::Null),
				timestamp: item.get("timestamp").cloned().unwrap_or(ParsedValue::Null),
			},
			None => Self {
				data: value.clone(),
				timestamp: ParsedValue::Null,
			},
		}
	}
}

fn present<'a>(item: &'a StructValue, name: &str) -> Option<&'a ParsedValue> {
	item.get(name).filter(|value| **value != ParsedValue::Null)
}

fn mismatch(field: &str, expected: &'static str, value: &ParsedValue) -> SessionError {
	SessionError::UnexpectedType {
		field: field.to_owned(),
		expected,
		got: value.kind(),
	}
}

fn join(path: &str, name: &str) -> String {
	if path.is_empty() { name.to_owned() } else { format!("{path}.{name}") }
}

fn struct_field<'a>(item: &'a StructValue, path: &str, name: &str) -> Result<Option<&'a StructValue>> {
	present(item, name)
		.map(|value| value.as_struct().ok_or_else(|| mismatch(&join(path, name), "struct", value)))
		.transpose()
}

fn list_field<'a>(item: &'a StructValue, path: &str, name: &str) -> Result<Option<&'a [ParsedValue]>> {
	present(item, name)
		.map(|value| value.as_list().ok_or_else(|| mismatch(&join(path, name), "list", value)))
		.transpose()
}

fn text_field(item: &StructValue, path: &str, name: &str) -> Result<Option<String>> {
	present(item, name)
		.map(|value| value.as_str().map(str::to_owned).ok_or_else(|| mismatch(&join(path, name), "text", value)))
		.transpose()
}

fn number_field(item: &StructValue, path: &str, name: &str) -> Result<Option<f64>> {
	present(item, name)
		.map(|value| value.as_f64().ok_or_else(|| mismatch(&join(path, name), "number", value)))
		.transpose()
}

fn bytes_field(item: &StructValue, path: &str, name: &str) -> Result<Vec<u8>> {
	Ok(present(item, name)
		.map(|value| value.as_bytes().map(<[u8]>::to_vec).ok_or_else(|| mismatch(&join(path, name), "binary", value)))
		.transpose()?
		.unwrap_or_default())
}

#[cfg(test)]
mod tests;
