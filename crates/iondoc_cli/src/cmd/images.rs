use std::path::PathBuf;

use iondoc::session::{DecodePool, PoolOptions, Result, decode_image_payload, timestamp_millis};
use tracing::warn;

use crate::cmd::util::load_session_file;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub topic: String,
	#[arg(long)]
	pub out: PathBuf,
	#[arg(long)]
	pub workers: Option<usize>,
}

/// Decode every image payload of a topic on the decode pool and write it out.
pub fn run(args: Args) -> Result<()> {
	let Args { path, topic, out, workers } = args;
	let (_, session) = load_session_file(&path)?;
	let topic = session.topic(&topic)?;

	let options = workers.map_or_else(PoolOptions::default, |workers| PoolOptions { workers });
	let pool = DecodePool::new(&options)?;

	let mut pending = Vec::new();
	for (idx, message) in topic.messages.iter().enumerate() {
		let Some(payload) = message.payload() else {
			warn!(topic = %topic.name, index = idx, "message has no image payload");
			continue;
		};
		let timestamp = match timestamp_millis(&message.timestamp) {
			Ok(ms) => ms,
			Err(err) => {
				warn!(topic = %topic.name, index = idx, error = %err, "message timestamp unusable, using 0");
				0
			}
		};
		let payload = payload.clone();
		pending.push((idx, timestamp, pool.submit(move || decode_image_payload(&payload))?));
	}

	std::fs::create_dir_all(&out)?;
	println!("topic: {} ({} workers)", topic.name, pool.size());
	println!("index\ttimestamp\tencoding\tbytes\tfile");
	let mut written = 0_usize;
	for (idx, timestamp, handle) in pending {
		let (encoding, bytes) = handle.wait()?;
		let file = out.join(format!("{idx:06}_{timestamp}.jpg"));
		std::fs::write(&file, &bytes)?;
		println!("{idx}\t{timestamp}\t{}\t{}\t{}", encoding.as_str(), bytes.len(), file.display());
		written += 1;
	}
	println!("written: {written}");

	Ok(())
}
