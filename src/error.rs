//! Error types for the generator and the viewer.

use std::path::PathBuf;

use thiserror::Error;

/// A single note file could not be turned into a record. The loader logs
/// these and keeps going.
#[derive(Debug, Error)]
pub enum SourceReadError {
	/// The file could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Io {
		/// Note file.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},

	/// The metadata header is not valid YAML.
	#[error("malformed front matter in {}: {message}", path.display())]
	FrontMatter {
		/// Note file.
		path: PathBuf,
		/// Parser message.
		message: String,
	},

	/// Another file already produced this id.
	#[error("duplicate note id {id:?} at {} (first seen at {})", path.display(), first.display())]
	DuplicateId {
		/// The clashing id.
		id: String,
		/// The skipped file.
		path: PathBuf,
		/// The file that keeps the id.
		first: PathBuf,
	},

	/// A directory entry under a category root could not be visited.
	#[error("failed to walk {}: {message}", root.display())]
	Walk {
		/// Category root being walked.
		root: PathBuf,
		/// Walker message.
		message: String,
	},
}

/// The assembled document breaks its own cross-reference invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
	/// A link endpoint is not a node id.
	#[error("link {from} -> {to} references unknown node {missing}")]
	DanglingEdge {
		/// Link source id.
		from: String,
		/// Link target id.
		to: String,
		/// The endpoint that does not resolve.
		missing: String,
	},

	/// A link connects a node to itself.
	#[error("link from {0} to itself")]
	SelfLoop(String),

	/// Two nodes share an id.
	#[error("node id {0} appears more than once")]
	DuplicateNode(String),
}

/// The viewer could not obtain a usable graph document.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The page has no element carrying the document.
	#[error("graph document element #{0} not found")]
	MissingDocument(&'static str),

	/// The document text is not a graph document.
	#[error("graph document is not valid JSON: {0}")]
	Parse(#[from] serde_json::Error),

	/// The document parsed but breaks the closure invariant.
	#[error(transparent)]
	Invalid(#[from] ValidationError),
}

/// Fatal failure of a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
	/// The assembled document is inconsistent.
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// JSON encoding failed.
	#[error("failed to serialize graph document: {0}")]
	Serialize(#[from] serde_json::Error),

	/// The output file could not be written.
	#[error("failed to write {}: {source}", path.display())]
	Write {
		/// Output path.
		path: PathBuf,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},
}
