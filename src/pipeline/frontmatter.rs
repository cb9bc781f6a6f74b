//! Front matter splitting and parsing.
//!
//! A note may open with a `---` delimited YAML block. Only `title`, `date`,
//! `category`, and `source` are read; a note's type never comes from here.

use serde_yaml::Value;

/// Metadata recognized in a note header. Empty values count as absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrontMatter {
	/// Display title.
	pub title: Option<String>,
	/// Date string, kept as written.
	pub date: Option<String>,
	/// Free-form category.
	pub category: Option<String>,
	/// Citation or origin of the note.
	pub source: Option<String>,
}

/// Split a raw note into its metadata block (without delimiters) and body.
///
/// A block only counts when the very first line is `---` and a closing `---`
/// line follows; otherwise the whole text is body.
pub fn split(raw: &str) -> (Option<&str>, &str) {
	let Some(rest) = raw
		.strip_prefix("---")
		.and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))
	else {
		return (None, raw);
	};

	let mut offset = 0;
	for line in rest.split_inclusive('\n') {
		if line.trim_end() == "---" {
			return (Some(&rest[..offset]), &rest[offset + line.len()..]);
		}
		offset += line.len();
	}
	(None, raw)
}

/// Parse a note into front matter and body. Fails with a message when the
/// metadata block is not valid YAML.
pub fn parse(raw: &str) -> Result<(FrontMatter, &str), String> {
	let (block, body) = split(raw);
	let Some(block) = block.filter(|b| !b.trim().is_empty()) else {
		return Ok((FrontMatter::default(), body));
	};

	let value: Value = serde_yaml::from_str(block).map_err(|e| e.to_string())?;
	let Value::Mapping(map) = value else {
		return Ok((FrontMatter::default(), body));
	};

	let field = |key: &str| map.get(key).and_then(scalar_to_string);
	Ok((
		FrontMatter {
			title: field("title"),
			date: field("date"),
			category: field("category"),
			source: field("source"),
		},
		body,
	))
}

fn scalar_to_string(value: &Value) -> Option<String> {
	let text = match value {
		Value::String(s) => s.trim().to_string(),
		Value::Number(n) => n.to_string(),
		Value::Bool(b) => b.to_string(),
		Value::Tagged(tagged) => return scalar_to_string(&tagged.value),
		Value::Null | Value::Sequence(_) | Value::Mapping(_) => return None,
	};
	(!text.is_empty()).then_some(text)
}
