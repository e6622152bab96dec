use std::path::PathBuf;

use iondoc::ion::Document;
use iondoc::session::Result;

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{document_json, emit_json, load_document};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
	/// Include binary payloads as base64 in JSON output.
	#[arg(long)]
	pub bytes: bool,
	#[arg(long)]
	pub depth: Option<u32>,
	#[arg(long)]
	pub items: Option<usize>,
}

/// Print the parsed document tree, truncated, or as full JSON.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		json,
		bytes,
		depth,
		items,
	} = args;

	let document = load_document(&path)?;

	if json {
		emit_json(&document_json(&document, bytes));
		return Ok(());
	}

	let mut options = PrintOptions::default();
	if let Some(depth) = depth {
		options.max_print_depth = depth;
	}
	if let Some(items) = items {
		options.max_array_items = items;
	}

	println!("path: {}", path.display());
	println!("root: {}", document.kind());
	println!("placeholders: {}", document.placeholder_count());
	match &document {
		Document::Value(value) => print_value(value, 0, 0, options),
		Document::Sequence(values) => {
			for (idx, value) in values.iter().enumerate() {
				println!("[{idx}]");
				print_value(value, 2, 0, options);
			}
		}
	}

	Ok(())
}
