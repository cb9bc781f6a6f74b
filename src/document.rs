//! The graph document exchanged between the generator and the viewer.
//!
//! Serialized as a single JSON object with `nodes` and `links` collections.
//! Field names follow the published format (`type`, `sharedKeywords`), so a
//! document written by the generator loads in the viewer without re-running
//! extraction.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Which category root a note was discovered under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
	/// Study notes.
	Learning,
	/// Conversation logs.
	Dialogue,
	/// Free-form thinking.
	Journal,
	/// Saved excerpts from elsewhere.
	Clips,
}

impl NoteType {
	/// Category roots in discovery order.
	pub const ALL: [NoteType; 4] = [
		NoteType::Learning,
		NoteType::Dialogue,
		NoteType::Journal,
		NoteType::Clips,
	];

	/// Directory name of the category root, also the serialized tag.
	pub fn dir_name(self) -> &'static str {
		match self {
			NoteType::Learning => "learning",
			NoteType::Dialogue => "dialogue",
			NoteType::Journal => "journal",
			NoteType::Clips => "clips",
		}
	}
}

impl fmt::Display for NoteType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.dir_name())
	}
}

/// One note of the corpus. Immutable once produced by the loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
	/// File stem of the source note, unique across the corpus.
	pub id: String,
	/// Metadata title, or the file stem without its date prefix.
	pub title: String,
	/// ISO date string from metadata, or empty.
	#[serde(default)]
	pub date: String,
	/// Metadata category, falling back to the category root name.
	#[serde(default)]
	pub category: String,
	/// Decided by the directory, never by metadata.
	#[serde(rename = "type")]
	pub note_type: NoteType,
	/// Citation for clipped material.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<String>,
	/// Short plain-text preview of the body.
	#[serde(default)]
	pub excerpt: String,
	/// Frequency-ranked, deduplicated terms.
	#[serde(default)]
	pub keywords: Vec<String>,
}

/// Undirected similarity edge between two notes sharing keywords.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	/// Id of the earlier note in corpus order.
	pub source: String,
	/// Id of the later note.
	pub target: String,
	/// Size of the keyword intersection.
	pub weight: u32,
	/// Preview of the shared terms, in the source note's keyword order.
	#[serde(default)]
	pub shared_keywords: Vec<String>,
}

/// Nodes plus links; every link endpoint resolves to a node id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
	/// Notes in discovery order.
	pub nodes: Vec<NoteRecord>,
	/// Similarity edges.
	pub links: Vec<Edge>,
}

impl GraphDocument {
	/// Check the closure invariant: unique node ids, no self-loops, and no
	/// link pointing at an unknown node.
	pub fn validate(&self) -> Result<(), ValidationError> {
		let mut ids = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !ids.insert(node.id.as_str()) {
				return Err(ValidationError::DuplicateNode(node.id.clone()));
			}
		}

		for link in &self.links {
			if link.source == link.target {
				return Err(ValidationError::SelfLoop(link.source.clone()));
			}
			for endpoint in [&link.source, &link.target] {
				if !ids.contains(endpoint.as_str()) {
					return Err(ValidationError::DanglingEdge {
						from: link.source.clone(),
						to: link.target.clone(),
						missing: endpoint.clone(),
					});
				}
			}
		}
		Ok(())
	}

	/// Number of notes of the given type.
	pub fn count_of(&self, note_type: NoteType) -> usize {
		self.nodes.iter().filter(|n| n.note_type == note_type).count()
	}

	/// True for a corpus without notes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
