//! Markdown scrubbing shared by keyword extraction and excerpts.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// A leading `---` ... `---` metadata block.
static FRONT_MATTER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)\A---.*?---").expect("front matter pattern"));

static CODE_BLOCK: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("code block pattern"));

static MARKUP_CHARS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[#*_`\[\]()>|]").expect("markup pattern"));

static URL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern"));

/// Drop a leading `---` metadata block.
pub fn strip_front_matter(text: &str) -> Cow<'_, str> {
	FRONT_MATTER.replace(text, "")
}

/// Remove markup characters outright (used for human-readable excerpts).
pub fn remove_markup_chars(text: &str) -> Cow<'_, str> {
	MARKUP_CHARS.replace_all(text, "")
}

/// Prepare a note for term scanning: drop front matter and fenced code,
/// blank out markup punctuation, then drop URLs.
pub fn clean_for_terms(text: &str) -> String {
	let text = strip_front_matter(text);
	let text = CODE_BLOCK.replace_all(&text, "");
	let text = MARKUP_CHARS.replace_all(&text, " ");
	URL.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cleaning_drops_code_urls_and_punctuation() {
		let raw = "---\ntitle: x\n---\n**Bold** [link](https://example.com/a)\n```rust\nlet x = 1;\n```\nend";
		let clean = clean_for_terms(raw);
		assert!(!clean.contains("title"));
		assert!(!clean.contains("let x"));
		assert!(!clean.contains("https"));
		assert!(!clean.contains('*'));
		assert!(clean.contains("Bold"));
		assert!(clean.contains("end"));
	}

	#[test]
	fn front_matter_only_stripped_at_start() {
		assert_eq!(strip_front_matter("a\n---\nb\n---"), "a\n---\nb\n---");
		assert_eq!(strip_front_matter("---\nk: v\n---\nbody"), "\nbody");
	}
}
