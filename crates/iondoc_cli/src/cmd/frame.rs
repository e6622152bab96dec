use std::path::PathBuf;

use iondoc::session::{Result, SessionError, Timeline, elapsed_millis, playback_target_millis, timestamp_millis};
use tracing::warn;

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, load_session_file, value_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub topic: String,
	/// Seconds past the session start time.
	#[arg(long)]
	pub at: f64,
	#[arg(long)]
	pub json: bool,
}

/// Show the topic message closest to `start_time + at`.
pub fn run(args: Args) -> Result<()> {
	let Args { path, topic, at, json } = args;
	let (_, session) = load_session_file(&path)?;
	let topic = session.topic(&topic)?;
	let start = session
		.start_time()
		.ok_or(SessionError::MissingPayload { what: "sessionInfo.start_time" })?;
	let start_ms = timestamp_millis(start)?;
	let target_ms = playback_target_millis(start, at)?;

	let timeline: Timeline<usize> = topic
		.messages
		.iter()
		.enumerate()
		.filter_map(|(idx, message)| match timestamp_millis(&message.timestamp) {
			Ok(ms) => Some((ms, idx)),
			Err(err) => {
				warn!(topic = %topic.name, index = idx, error = %err, "skipping message without usable timestamp");
				None
			}
		})
		.collect();

	let found = match timeline.nearest(target_ms) {
		Some(&(timestamp, idx)) => Some(Found {
			index: idx,
			timestamp,
			offset_ms: elapsed_millis(timestamp, start_ms)?,
			delta_ms: elapsed_millis(timestamp, target_ms)?,
		}),
		None => None,
	};

	if json {
		let payload = FrameJson {
			topic: topic.name.clone(),
			start_ms,
			target_ms,
			candidates: timeline.len(),
			message: found.map(|found| FrameMessageJson {
				index: found.index,
				timestamp: found.timestamp,
				offset_ms: found.offset_ms,
				delta_ms: found.delta_ms,
				data: value_json(&topic.messages[found.index].data, false),
			}),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("topic: {}", topic.name);
	println!("start_ms: {start_ms}");
	println!("target_ms: {target_ms}");
	let Some(found) = found else {
		println!("message: none");
		return Ok(());
	};
	println!("index: {}", found.index);
	println!("timestamp: {}", found.timestamp);
	println!("offset_ms: {}", found.offset_ms);
	println!("delta_ms: {}", found.delta_ms);
	println!("data:");
	print_value(&topic.messages[found.index].data, 2, 0, PrintOptions::default());

	Ok(())
}

struct Found {
	index: usize,
	timestamp: i64,
	offset_ms: i64,
	delta_ms: i64,
}

#[derive(serde::Serialize)]
struct FrameJson {
	topic: String,
	start_ms: i64,
	target_ms: i64,
	candidates: usize,
	message: Option<FrameMessageJson>,
}

#[derive(serde::Serialize)]
struct FrameMessageJson {
	index: usize,
	timestamp: i64,
	offset_ms: i64,
	delta_ms: i64,
	data: serde_json::Value,
}
