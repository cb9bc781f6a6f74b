//! Graph generation pipeline.
//!
//! Corpus loader (with the term extractor) -> similarity linker -> graph
//! assembler -> JSON on disk. A single synchronous pass, rebuilt from scratch
//! on every run.

pub mod assemble;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod linker;
pub mod loader;
mod markup;
pub mod terms;

use tracing_subscriber::EnvFilter;

pub use assemble::assemble;
pub use config::{GenerateArgs, PipelineConfig};
pub use generate::{build_document, run, write_document};
pub use linker::SimilarityLinker;
pub use loader::CorpusLoader;
pub use terms::{LexicalExtractor, TermExtractor};

/// Install a stderr subscriber for the generator. `log` records from the
/// pipeline are bridged into it; `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
}
