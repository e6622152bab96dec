use std::path::PathBuf;

use iondoc::session::Result;

use crate::cmd::util::{emit_json, load_session_file};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print one row per recorded topic.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;
	let (_, session) = load_session_file(&path)?;

	if json {
		let payload = TopicsJson {
			path: path.display().to_string(),
			topics: session
				.topics
				.iter()
				.map(|topic| TopicJson {
					name: topic.name.clone(),
					topic_type: topic.topic_type.clone(),
					frequency: topic.frequency,
					messages: topic.messages.len(),
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("topics: {}", session.topics.len());
	println!();
	println!("name\ttype\tfrequency\tmessages");
	for topic in &session.topics {
		let frequency = topic.frequency.map_or_else(|| "-".to_owned(), |hz| hz.to_string());
		println!(
			"{}\t{}\t{}\t{}",
			topic.name,
			topic.topic_type.as_deref().unwrap_or("-"),
			frequency,
			topic.messages.len()
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct TopicsJson {
	path: String,
	topics: Vec<TopicJson>,
}

#[derive(serde::Serialize)]
struct TopicJson {
	name: String,
	#[serde(rename = "type")]
	topic_type: Option<String>,
	frequency: Option<f64>,
	messages: usize,
}
