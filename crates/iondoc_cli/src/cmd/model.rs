use std::path::PathBuf;

use iondoc::session::{Result, SessionError, decompress_payload, extract_obj_model};

use crate::cmd::util::load_session_file;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Extract `metadata.mapData` instead of the bot model.
	#[arg(long)]
	pub map: bool,
	#[arg(long)]
	pub out: PathBuf,
}

/// Decompress the bot model (as OBJ text) or the map (raw bytes) to a file.
pub fn run(args: Args) -> Result<()> {
	let Args { path, map, out } = args;
	let (_, session) = load_session_file(&path)?;

	if map {
		let map_data = session.metadata.map_data.as_ref().ok_or(SessionError::MissingPayload { what: "map data" })?;
		let (codec, bytes) = decompress_payload(&map_data.data)?;
		std::fs::write(&out, &bytes)?;
		println!(
			"map: {} {} -> {} bytes ({}) -> {}",
			map_data.format.as_deref().unwrap_or("-"),
			map_data.data.len(),
			bytes.len(),
			codec.as_str(),
			out.display()
		);
		return Ok(());
	}

	let model = session.metadata.bot_model.as_ref().ok_or(SessionError::MissingPayload { what: "bot model" })?;
	let text = extract_obj_model(&model.data)?;
	std::fs::write(&out, text.as_bytes())?;
	println!(
		"model: {} {} -> {} bytes -> {}",
		model.filename.as_deref().unwrap_or("-"),
		model.data.len(),
		text.len(),
		out.display()
	);

	Ok(())
}
