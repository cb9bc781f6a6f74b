//! Generator configuration.
//!
//! `GenerateArgs` is the command-line surface (with environment fallbacks);
//! it is converted into a plain `PipelineConfig` that the pipeline stages
//! consume and tests build directly.

use std::path::PathBuf;

use clap::Parser;

use super::terms::MAX_TERMS;

/// Notes are markdown files.
pub const NOTE_EXTENSION: &str = "md";

/// Files whose name starts with this are note templates, not notes.
pub const TEMPLATE_PREFIX: &str = "template";

/// Knobs for a single generation run.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
	/// Corpus root holding the four category directories.
	pub vault: PathBuf,
	/// Terms kept per note.
	pub max_keywords: usize,
	/// Minimum number of shared terms for two notes to be linked.
	pub min_shared: usize,
	/// Shared terms listed on an edge.
	pub shared_preview: usize,
	/// Excerpt length in characters before the ellipsis.
	pub excerpt_len: usize,
	/// Body lines considered for the excerpt.
	pub excerpt_lines: usize,
}

impl Default for PipelineConfig {
	fn default() -> Self {
		Self {
			vault: PathBuf::from("."),
			max_keywords: MAX_TERMS,
			min_shared: 2,
			shared_preview: 5,
			excerpt_len: 200,
			excerpt_lines: 5,
		}
	}
}

/// Command-line arguments of the `generate` binary.
#[derive(Debug, Parser)]
#[command(name = "generate")]
#[command(about = "Build the note similarity graph document from a note corpus")]
pub struct GenerateArgs {
	/// Corpus root containing learning/, dialogue/, journal/ and clips/
	#[arg(long, env = "NOTE_GRAPH_VAULT", default_value = ".")]
	pub vault: PathBuf,

	/// Where to write the graph document
	#[arg(long, env = "NOTE_GRAPH_OUT", default_value = "public/data/graph.json")]
	pub out: PathBuf,

	/// Keywords kept per note
	#[arg(long, default_value_t = MAX_TERMS)]
	pub max_keywords: usize,

	/// Shared keywords required for a link
	#[arg(long, default_value_t = 2)]
	pub min_shared: usize,

	/// Shared keywords recorded on each link
	#[arg(long, default_value_t = 5)]
	pub shared_preview: usize,

	/// Maximum excerpt length in characters
	#[arg(long, default_value_t = 200)]
	pub excerpt_len: usize,

	/// Body lines used to build the excerpt
	#[arg(long, default_value_t = 5)]
	pub excerpt_lines: usize,

	/// Write single-line JSON instead of indented output
	#[arg(long)]
	pub compact: bool,
}

impl GenerateArgs {
	/// The pipeline settings carried by these arguments.
	pub fn pipeline_config(&self) -> PipelineConfig {
		PipelineConfig {
			vault: self.vault.clone(),
			max_keywords: self.max_keywords,
			min_shared: self.min_shared,
			shared_preview: self.shared_preview,
			excerpt_len: self.excerpt_len,
			excerpt_lines: self.excerpt_lines,
		}
	}
}
