//! Keyword-overlap edges between notes.
//!
//! Every unordered pair of notes is compared once (`i < j` over the input
//! order), so the output is deterministic and never holds two edges for the
//! same pair. Pairs sharing fewer than `min_shared` keywords stay unlinked to
//! keep the rendered graph legible.
//!
//! The pairwise pass is O(n²·K). Fine for a few thousand notes; an inverted
//! index over keywords is the way out if corpora grow past that.

use std::collections::HashSet;

use log::debug;

use super::config::PipelineConfig;
use crate::document::{Edge, NoteRecord};

/// Links notes that share enough keywords.
pub struct SimilarityLinker {
	min_shared: usize,
	preview: usize,
}

impl Default for SimilarityLinker {
	fn default() -> Self {
		Self::from_config(&PipelineConfig::default())
	}
}

impl SimilarityLinker {
	/// A threshold below 1 is raised to 1: edges always have positive weight.
	pub fn new(min_shared: usize, preview: usize) -> Self {
		Self {
			min_shared: min_shared.max(1),
			preview,
		}
	}

	/// Linker using the configured threshold and preview length.
	pub fn from_config(config: &PipelineConfig) -> Self {
		Self::new(config.min_shared, config.shared_preview)
	}

	/// Edges between every pair of notes sharing at least the threshold of
	/// keywords, weighted by the number shared.
	pub fn link(&self, notes: &[NoteRecord]) -> Vec<Edge> {
		let keyword_sets: Vec<HashSet<&str>> = notes
			.iter()
			.map(|n| n.keywords.iter().map(String::as_str).collect())
			.collect();

		let mut edges = Vec::new();
		for (i, a) in notes.iter().enumerate() {
			for (j, b) in notes.iter().enumerate().skip(i + 1) {
				let shared = shared_terms(&a.keywords, &keyword_sets[j]);
				if shared.len() < self.min_shared {
					continue;
				}
				edges.push(Edge {
					source: a.id.clone(),
					target: b.id.clone(),
					weight: shared.len() as u32,
					shared_keywords: shared
						.into_iter()
						.take(self.preview)
						.map(str::to_string)
						.collect(),
				});
			}
		}

		debug!("linked {} notes with {} edges", notes.len(), edges.len());
		edges
	}
}

/// Terms of `first` also in `other`, in `first`'s order, each once.
fn shared_terms<'a>(first: &'a [String], other: &HashSet<&str>) -> Vec<&'a str> {
	let mut seen = HashSet::new();
	first
		.iter()
		.map(String::as_str)
		.filter(|term| other.contains(term) && seen.insert(*term))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::document::NoteType;
	use crate::document::tests::note;
	use proptest::prelude::*;

	#[test]
	fn two_shared_terms_make_one_edge() {
		let notes = vec![
			note("a", NoteType::Learning, &["A", "C", "B"]),
			note("b", NoteType::Journal, &["B", "C", "D"]),
		];
		let edges = SimilarityLinker::default().link(&notes);
		assert_eq!(edges.len(), 1);
		assert_eq!(edges[0].source, "a");
		assert_eq!(edges[0].target, "b");
		assert_eq!(edges[0].weight, 2);
		assert_eq!(edges[0].shared_keywords, vec!["C", "B"]);
	}

	#[test]
	fn single_shared_term_is_not_enough() {
		let notes = vec![
			note("a", NoteType::Learning, &["A"]),
			note("b", NoteType::Learning, &["A", "B"]),
		];
		assert!(SimilarityLinker::default().link(&notes).is_empty());
	}

	#[test]
	fn preview_is_capped_but_weight_is_not() {
		let terms = ["t1", "t2", "t3", "t4", "t5", "t6", "t7"];
		let notes = vec![
			note("a", NoteType::Clips, &terms),
			note("b", NoteType::Clips, &terms),
		];
		let edges = SimilarityLinker::default().link(&notes);
		assert_eq!(edges[0].weight, 7);
		assert_eq!(edges[0].shared_keywords, vec!["t1", "t2", "t3", "t4", "t5"]);
	}

	#[test]
	fn pairs_enumerated_in_input_order() {
		let notes = vec![
			note("x", NoteType::Learning, &["A", "B"]),
			note("y", NoteType::Learning, &["A", "B"]),
			note("z", NoteType::Learning, &["A", "B"]),
		];
		let pairs: Vec<(String, String)> = SimilarityLinker::default()
			.link(&notes)
			.into_iter()
			.map(|e| (e.source, e.target))
			.collect();
		assert_eq!(
			pairs,
			vec![
				("x".to_string(), "y".to_string()),
				("x".to_string(), "z".to_string()),
				("y".to_string(), "z".to_string()),
			]
		);
	}

	#[test]
	fn empty_corpus_has_no_edges() {
		assert!(SimilarityLinker::default().link(&[]).is_empty());
	}

	fn corpus() -> impl Strategy<Value = Vec<NoteRecord>> {
		prop::collection::vec(prop::collection::btree_set(0u8..8, 0..6), 0..10).prop_map(|sets| {
			sets.into_iter()
				.enumerate()
				.map(|(i, set)| {
					let terms: Vec<String> = set.into_iter().map(|k| format!("K{k}")).collect();
					let refs: Vec<&str> = terms.iter().map(String::as_str).collect();
					note(&format!("n{i}"), NoteType::Learning, &refs)
				})
				.collect()
		})
	}

	proptest! {
		#[test]
		fn edges_match_keyword_intersections(notes in corpus()) {
			let edges = SimilarityLinker::default().link(&notes);
			let sets: Vec<HashSet<&String>> = notes.iter().map(|n| n.keywords.iter().collect()).collect();
			let index = |id: &str| notes.iter().position(|n| n.id == id).unwrap();

			let mut pairs = HashSet::new();
			for edge in &edges {
				prop_assert_ne!(&edge.source, &edge.target);
				let (i, j) = (index(&edge.source), index(&edge.target));
				prop_assert!(i < j);
				prop_assert!(pairs.insert((i, j)));

				let size = sets[i].intersection(&sets[j]).count();
				prop_assert_eq!(edge.weight as usize, size);
				prop_assert!(edge.weight >= 2);
				prop_assert!(edge.shared_keywords.len() <= 5);
				prop_assert!(edge.shared_keywords.iter().all(|k| sets[i].contains(k) && sets[j].contains(k)));
			}

			let expected = (0..notes.len())
				.flat_map(|i| (i + 1..notes.len()).map(move |j| (i, j)))
				.filter(|&(i, j)| sets[i].intersection(&sets[j]).count() >= 2)
				.count();
			prop_assert_eq!(edges.len(), expected);
		}
	}
}
