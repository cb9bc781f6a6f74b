//! Corpus discovery and note record construction.
//!
//! Notes live under four fixed category directories of the corpus root. Each
//! directory is walked recursively in file-name order; the directory a file
//! was found under decides its type. A file that cannot be read or parsed is
//! logged and skipped so one bad note never aborts a run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use walkdir::WalkDir;

use super::config::{NOTE_EXTENSION, PipelineConfig, TEMPLATE_PREFIX};
use super::frontmatter;
use super::markup;
use super::terms::{LexicalExtractor, TermExtractor};
use crate::document::{NoteRecord, NoteType};
use crate::error::SourceReadError;

/// Journal-style file names carry a `2024年3月1日-` prefix that titles drop.
static DATE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[0-9]{4}年[0-9]{1,2}月[0-9]{1,2}日-").expect("date prefix pattern")
});

const ELLIPSIS: char = '…';

/// Builds note records from a corpus root.
pub struct CorpusLoader<E = LexicalExtractor> {
	config: PipelineConfig,
	extractor: E,
}

impl CorpusLoader<LexicalExtractor> {
	/// Loader using the [`LexicalExtractor`] sized by `config.max_keywords`.
	pub fn new(config: PipelineConfig) -> Self {
		let extractor = LexicalExtractor::new(config.max_keywords);
		Self { config, extractor }
	}
}

impl<E: TermExtractor> CorpusLoader<E> {
	/// Use a different term extractor; nothing else depends on how terms are
	/// found.
	pub fn with_extractor(config: PipelineConfig, extractor: E) -> Self {
		Self { config, extractor }
	}

	/// Load every note under the four category roots of `vault`.
	///
	/// Duplicate ids keep the first file seen and skip the rest.
	pub fn load(&self, vault: &Path) -> Vec<NoteRecord> {
		let mut notes = Vec::new();
		let mut seen: HashMap<String, PathBuf> = HashMap::new();

		for note_type in NoteType::ALL {
			let root = vault.join(note_type.dir_name());
			for path in discover(&root) {
				let record = match self.load_file(&path, note_type) {
					Ok(record) => record,
					Err(e) => {
						warn!("skipping note: {e}");
						continue;
					}
				};

				if let Some(first) = seen.get(&record.id) {
					let e = SourceReadError::DuplicateId {
						id: record.id,
						path,
						first: first.clone(),
					};
					warn!("skipping note: {e}");
					continue;
				}
				seen.insert(record.id.clone(), path);
				notes.push(record);
			}
		}

		debug!("loaded {} notes from {}", notes.len(), vault.display());
		notes
	}

	/// Read and parse one note file found under the root for `note_type`.
	pub fn load_file(
		&self,
		path: &Path,
		note_type: NoteType,
	) -> Result<NoteRecord, SourceReadError> {
		let bytes = fs::read(path).map_err(|source| SourceReadError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		// Stray bytes from other encodings become U+FFFD instead of dropping the note.
		let raw = String::from_utf8_lossy(&bytes);
		let (meta, body) =
			frontmatter::parse(&raw).map_err(|message| SourceReadError::FrontMatter {
				path: path.to_path_buf(),
				message,
			})?;

		let id = path
			.file_stem()
			.map(|stem| stem.to_string_lossy().into_owned())
			.unwrap_or_default();
		let title = meta
			.title
			.unwrap_or_else(|| DATE_PREFIX.replace(&id, "").into_owned());

		Ok(NoteRecord {
			title,
			date: meta.date.unwrap_or_default(),
			category: meta
				.category
				.unwrap_or_else(|| note_type.dir_name().to_string()),
			note_type,
			source: meta.source,
			excerpt: excerpt(body, self.config.excerpt_lines, self.config.excerpt_len),
			keywords: self.extractor.extract(body),
			id,
		})
	}
}

/// Note files under `root`, in deterministic order. A missing root is an
/// empty category, not an error.
pub fn discover(root: &Path) -> Vec<PathBuf> {
	if !root.is_dir() {
		debug!("category root {} not present", root.display());
		return Vec::new();
	}

	let mut files = Vec::new();
	for entry in WalkDir::new(root).sort_by_file_name() {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				let e = SourceReadError::Walk {
					root: root.to_path_buf(),
					message: e.to_string(),
				};
				warn!("{e}");
				continue;
			}
		};
		if entry.file_type().is_file() && is_note_file(entry.path()) {
			files.push(entry.into_path());
		}
	}
	files
}

fn is_note_file(path: &Path) -> bool {
	let is_markdown = path.extension().is_some_and(|ext| ext == NOTE_EXTENSION);
	let is_template = path
		.file_name()
		.is_some_and(|name| name.to_string_lossy().starts_with(TEMPLATE_PREFIX));
	is_markdown && !is_template
}

/// Plain-text summary: the first `max_lines` content lines (no headings, no
/// fence lines) joined with spaces, markup removed, cut at `max_chars`.
pub fn excerpt(body: &str, max_lines: usize, max_chars: usize) -> String {
	let body = markup::strip_front_matter(body);
	let lines: Vec<&str> = body
		.trim()
		.split('\n')
		.filter(|line| !line.trim().is_empty() && !line.starts_with('#') && !line.starts_with("```"))
		.take(max_lines)
		.collect();
	let joined = lines.join(" ");
	let text = markup::remove_markup_chars(&joined);
	let text = text.trim();

	if text.chars().count() > max_chars {
		let mut cut: String = text.chars().take(max_chars).collect();
		cut.push(ELLIPSIS);
		cut
	} else {
		text.to_string()
	}
}
