//! Graph document assembly.

use log::debug;

use crate::document::{Edge, GraphDocument, NoteRecord};
use crate::error::ValidationError;

/// Combine records and edges into a document, refusing to hand out one whose
/// links point at missing notes.
pub fn assemble(notes: Vec<NoteRecord>, edges: Vec<Edge>) -> Result<GraphDocument, ValidationError> {
	let document = GraphDocument {
		nodes: notes,
		links: edges,
	};
	document.validate()?;
	debug!(
		"assembled document: {} nodes, {} links",
		document.nodes.len(),
		document.links.len()
	);
	Ok(document)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::document::NoteType;
	use crate::document::tests::{edge, note};
	use crate::pipeline::linker::SimilarityLinker;

	#[test]
	fn linker_output_always_closes() {
		let notes = vec![
			note("a", NoteType::Learning, &["A", "B", "C"]),
			note("b", NoteType::Dialogue, &["B", "C", "D"]),
			note("c", NoteType::Clips, &["Z"]),
		];
		let edges = SimilarityLinker::default().link(&notes);
		let doc = assemble(notes, edges).unwrap();
		assert_eq!(doc.nodes.len(), 3);
		assert_eq!(doc.links.len(), 1);
	}

	#[test]
	fn dangling_edge_is_fatal() {
		let notes = vec![note("a", NoteType::Learning, &[])];
		let err = assemble(notes, vec![edge("a", "missing", 2)]).unwrap_err();
		assert!(matches!(err, ValidationError::DanglingEdge { ref missing, .. } if missing == "missing"));
	}

	#[test]
	fn empty_corpus_is_a_valid_document() {
		let doc = assemble(Vec::new(), Vec::new()).unwrap();
		assert!(doc.is_empty());
		assert!(doc.links.is_empty());
	}
}
