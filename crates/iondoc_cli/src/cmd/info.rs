use std::path::PathBuf;

use iondoc::ion::ParsedValue;
use iondoc::session::Result;

use crate::cmd::util::{emit_json, load_session_file, short_value, value_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print a recording summary: root shape, placeholders, metadata, topic count.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;
	let (document, session) = load_session_file(&path)?;
	let metadata = &session.metadata;
	let message_count: usize = session.topics.iter().map(|topic| topic.messages.len()).sum();

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			root: document.kind().to_owned(),
			placeholders: document.placeholder_count(),
			compression_method: metadata.compression_method.clone(),
			compressed_types: metadata.compressed_types.clone(),
			bot_info: metadata.bot_info.clone().map(|item| value_json(&ParsedValue::Struct(item), false)),
			start_time: session.start_time().map(|value| value_json(value, false)),
			bot_model: metadata.bot_model.as_ref().map(|model| PayloadJson {
				format: model.format.clone(),
				filename: model.filename.clone(),
				bytes: model.data.len(),
			}),
			map_data: metadata.map_data.as_ref().map(|map| PayloadJson {
				format: map.format.clone(),
				filename: None,
				bytes: map.data.len(),
			}),
			topics: session.topics.len(),
			messages: message_count,
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("root: {}", document.kind());
	println!("placeholders: {}", document.placeholder_count());
	println!("compression: {}", metadata.compression_method.as_deref().unwrap_or("-"));
	if !metadata.compressed_types.is_empty() {
		println!("compressed_types: {}", metadata.compressed_types.join(", "));
	}
	if let Some(bot_info) = &metadata.bot_info {
		for field in &bot_info.fields {
			println!("bot.{}: {}", field.name, short_value(&field.value));
		}
	}
	if let Some(start) = session.start_time() {
		println!("start_time: {}", short_value(start));
	}
	if let Some(model) = &metadata.bot_model {
		println!(
			"bot_model: {} {} ({} bytes)",
			model.format.as_deref().unwrap_or("-"),
			model.filename.as_deref().unwrap_or("-"),
			model.data.len()
		);
	}
	if let Some(map) = &metadata.map_data {
		println!("map_data: {} ({} bytes)", map.format.as_deref().unwrap_or("-"), map.data.len());
	}
	println!("topics: {}", session.topics.len());
	println!("messages: {message_count}");

	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	root: String,
	placeholders: usize,
	compression_method: Option<String>,
	compressed_types: Vec<String>,
	bot_info: Option<serde_json::Value>,
	start_time: Option<serde_json::Value>,
	bot_model: Option<PayloadJson>,
	map_data: Option<PayloadJson>,
	topics: usize,
	messages: usize,
}

#[derive(serde::Serialize)]
struct PayloadJson {
	format: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	filename: Option<String>,
	bytes: usize,
}
