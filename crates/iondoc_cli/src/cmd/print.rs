use iondoc::ion::ParsedValue;

use crate::cmd::util::truncate;

/// Output truncation and formatting limits for parsed values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single struct.
	pub max_fields_per_struct: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for lists.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested lists/structs.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one parsed value tree.
pub fn print_value(value: &ParsedValue, indent: usize, depth: u32, options: PrintOptions) {
	for line in render_value(value, indent, depth, options) {
		println!("{line}");
	}
}

/// Render one parsed value tree as output lines.
pub fn render_value(value: &ParsedValue, indent: usize, depth: u32, options: PrintOptions) -> Vec<String> {
	let mut lines = Vec::new();
	render_into(&mut lines, String::new(), value, indent, depth, options);
	lines
}

fn render_into(lines: &mut Vec<String>, prefix: String, value: &ParsedValue, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		ParsedValue::Null => lines.push(format!("{pad}{prefix}null")),
		ParsedValue::Boolean(v) => lines.push(format!("{pad}{prefix}{v}")),
		ParsedValue::Number(v) => lines.push(format!("{pad}{prefix}{v}")),
		ParsedValue::Decimal(v) | ParsedValue::Timestamp(v) => lines.push(format!("{pad}{prefix}{v}")),
		ParsedValue::Text(v) => lines.push(format!("{pad}{prefix}\"{}\"", truncate(v, options.max_string_len))),
		ParsedValue::Binary(v) => lines.push(format!("{pad}{prefix}bytes[{}]", v.len())),
		ParsedValue::ErrorPlaceholder(v) => lines.push(format!("{pad}{prefix}!{v}")),
		ParsedValue::List(items) | ParsedValue::SExpression(items) => {
			let (open, close) = if matches!(value, ParsedValue::List(_)) { ("[", "]") } else { ("(", ")") };
			if depth >= options.max_print_depth {
				lines.push(format!("{pad}{prefix}{open}... {} items{close}", items.len()));
				return;
			}
			lines.push(format!("{pad}{prefix}{open}"));
			for item in items.iter().take(options.max_array_items) {
				render_into(lines, String::new(), item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				lines.push(format!("{pad}  ... {} more", items.len() - options.max_array_items));
			}
			lines.push(format!("{pad}{close}"));
		}
		ParsedValue::Struct(item) => {
			if depth >= options.max_print_depth {
				lines.push(format!("{pad}{prefix}{{ ... {} fields }}", item.len()));
				return;
			}
			lines.push(format!("{pad}{prefix}{{"));
			for field in item.fields.iter().take(options.max_fields_per_struct) {
				render_into(lines, format!("{} = ", field.name), &field.value, indent + 2, depth + 1, options);
			}
			if item.len() > options.max_fields_per_struct {
				lines.push(format!("{pad}  ... {} more fields", item.len() - options.max_fields_per_struct));
			}
			lines.push(format!("{pad}}}"));
		}
	}
}
