//! One-shot generation run: load, link, assemble, write.

use std::fs;
use std::path::Path;

use log::info;

use super::assemble::assemble;
use super::config::{GenerateArgs, PipelineConfig};
use super::linker::SimilarityLinker;
use super::loader::CorpusLoader;
use crate::document::{GraphDocument, NoteType};
use crate::error::{GenerateError, ValidationError};

/// Build the graph document for the corpus described by `config`.
pub fn build_document(config: &PipelineConfig) -> Result<GraphDocument, ValidationError> {
	let notes = CorpusLoader::new(config.clone()).load(&config.vault);
	if notes.is_empty() {
		info!("no notes found under {}", config.vault.display());
	}
	let edges = SimilarityLinker::from_config(config).link(&notes);
	assemble(notes, edges)
}

/// Serialize `document` to `path`, creating parent directories.
pub fn write_document(document: &GraphDocument, path: &Path, pretty: bool) -> Result<(), GenerateError> {
	let json = if pretty {
		serde_json::to_string_pretty(document)?
	} else {
		serde_json::to_string(document)?
	};

	let write_err = |source| GenerateError::Write {
		path: path.to_path_buf(),
		source,
	};
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).map_err(write_err)?;
	}
	fs::write(path, json).map_err(write_err)
}

/// Run the whole pipeline for parsed command-line arguments.
pub fn run(args: &GenerateArgs) -> Result<GraphDocument, GenerateError> {
	let document = build_document(&args.pipeline_config())?;
	write_document(&document, &args.out, !args.compact)?;

	info!(
		"generated {} nodes, {} links -> {}",
		document.nodes.len(),
		document.links.len(),
		args.out.display()
	);
	let counts: Vec<String> = NoteType::ALL
		.iter()
		.map(|&t| format!("{t}={}", document.count_of(t)))
		.collect();
	info!("types: {}", counts.join(", "));

	Ok(document)
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::Parser;
	use tempfile::TempDir;

	fn write(root: &Path, rel: &str, contents: &str) {
		let path = root.join(rel);
		fs::create_dir_all(path.parent().unwrap()).unwrap();
		fs::write(path, contents).unwrap();
	}

	#[test]
	fn end_to_end_writes_loadable_document() {
		let vault = TempDir::new().unwrap();
		write(
			vault.path(),
			"learning/qualia.md",
			"---\ntitle: クオリア\n---\nクオリア と 意識経験 と メタ認知 の話。",
		);
		write(
			vault.path(),
			"dialogue/2024年5月2日-対話.md",
			"クオリア は 意識経験 の中心。",
		);
		write(vault.path(), "journal/walk.md", "散歩 した。");
		write(vault.path(), "clips/broken.md", "---\ntitle: [oops\n---\n");

		let out = TempDir::new().unwrap();
		let out_path = out.path().join("public/data/graph.json");
		let args = GenerateArgs::try_parse_from([
			"generate",
			"--vault",
			vault.path().to_str().unwrap(),
			"--out",
			out_path.to_str().unwrap(),
		])
		.unwrap();

		let document = run(&args).unwrap();
		assert_eq!(document.nodes.len(), 3);
		assert_eq!(document.links.len(), 1);
		assert_eq!(document.links[0].source, "qualia");
		assert_eq!(document.links[0].target, "2024年5月2日-対話");
		assert_eq!(document.links[0].shared_keywords, vec!["クオリア", "意識経験"]);

		let written = fs::read_to_string(&out_path).unwrap();
		assert!(written.contains("\n  \"nodes\""));
		let reloaded: GraphDocument = serde_json::from_str(&written).unwrap();
		assert_eq!(reloaded, document);
		assert!(reloaded.validate().is_ok());
	}

	#[test]
	fn empty_vault_still_writes_a_document() {
		let vault = TempDir::new().unwrap();
		let out = vault.path().join("graph.json");
		let config = PipelineConfig {
			vault: vault.path().to_path_buf(),
			..PipelineConfig::default()
		};
		let document = build_document(&config).unwrap();
		write_document(&document, &out, false).unwrap();
		assert_eq!(fs::read_to_string(out).unwrap(), r#"{"nodes":[],"links":[]}"#);
	}
}
