//! Salient term extraction.
//!
//! A cheap lexical heuristic rather than NLP: three independent patterns
//! pick candidate terms out of the scrubbed note text, candidates are counted
//! over the whole note, stop terms are dropped, and the most frequent survive.
//!
//! - katakana runs of at least 3 characters (loan words, technical terms)
//! - kanji runs of 2 to 6 characters; longer compounds are cut into
//!   consecutive pieces, never merged
//! - capitalized Latin words of at least 4 letters
//!
//! Edge weights downstream depend on exact term identity, so the thresholds
//! here are part of the document format in practice.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use super::markup;

/// Default number of terms kept per note.
pub const MAX_TERMS: usize = 15;

/// Shortest term ever emitted, in characters.
const MIN_TERM_CHARS: usize = 2;

/// Function words and overly generic vocabulary, Japanese and English.
pub const STOP_TERMS: &[&str] = &[
	"する", "ある", "いる", "なる", "できる", "もの", "こと", "それ", "これ", "ため",
	"つまり", "以下", "以上", "場合", "問題", "必要", "可能", "自分", "意味", "理解",
	"The", "This", "That", "From", "With", "And", "For", "Not", "But", "All",
	"What", "How", "Why", "When", "Where", "Which", "About", "Into", "Over",
	"概念", "構造", "関係", "存在", "世界", "人間", "思考", "言語", "文化", "社会",
];

static KATAKANA_RUN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[\x{30A0}-\x{30FF}]{3,}").expect("katakana pattern"));

static KANJI_RUN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[\x{4E00}-\x{9FFF}]{2,6}").expect("kanji pattern"));

static CAPITALIZED_WORD: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"[A-Z][a-z]{3,}").expect("capitalized pattern"));

/// Anything that can turn note text into an ordered list of terms.
pub trait TermExtractor {
	/// Terms of `text`, most significant first.
	fn extract(&self, text: &str) -> Vec<String>;
}

/// The pattern-based extractor used by the generator.
#[derive(Clone, Debug)]
pub struct LexicalExtractor {
	max_terms: usize,
	stop_terms: HashSet<String>,
}

impl Default for LexicalExtractor {
	fn default() -> Self {
		Self::new(MAX_TERMS)
	}
}

impl LexicalExtractor {
	/// Extractor with the built-in stop terms.
	pub fn new(max_terms: usize) -> Self {
		Self::with_stop_terms(max_terms, STOP_TERMS.iter().copied())
	}

	/// Extractor with a custom stop list in place of [`STOP_TERMS`].
	pub fn with_stop_terms<I, S>(max_terms: usize, stop_terms: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			max_terms,
			stop_terms: stop_terms.into_iter().map(Into::into).collect(),
		}
	}

	fn is_candidate(&self, term: &str) -> bool {
		term.chars().count() >= MIN_TERM_CHARS && !self.stop_terms.contains(term)
	}
}

impl TermExtractor for LexicalExtractor {
	fn extract(&self, text: &str) -> Vec<String> {
		let clean = markup::clean_for_terms(text);

		// Insertion order is the tie-breaker: all katakana matches first, then
		// kanji, then Latin, each in text order.
		let mut counts: Vec<(&str, usize)> = Vec::new();
		let mut slots: HashMap<&str, usize> = HashMap::new();
		for pattern in [&*KATAKANA_RUN, &*KANJI_RUN, &*CAPITALIZED_WORD] {
			for m in pattern.find_iter(&clean) {
				match slots.entry(m.as_str()) {
					Entry::Occupied(slot) => counts[*slot.get()].1 += 1,
					Entry::Vacant(slot) => {
						slot.insert(counts.len());
						counts.push((m.as_str(), 1));
					}
				}
			}
		}

		counts.retain(|(term, _)| self.is_candidate(term));
		counts.sort_by(|a, b| b.1.cmp(&a.1));
		counts
			.into_iter()
			.take(self.max_terms)
			.map(|(term, _)| term.to_string())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ranks_repeated_katakana_first_and_drops_stop_terms() {
		let text = "### ノート\nクオリア の 概念 について クオリア は 重要";
		let extractor = LexicalExtractor::with_stop_terms(MAX_TERMS, ["概念"]);
		let terms = extractor.extract(text);
		assert_eq!(terms[0], "クオリア");
		assert!(!terms.iter().any(|t| t == "概念"));
		assert_eq!(terms, vec!["クオリア", "ノート", "重要"]);

		// the built-in list covers it too
		let terms = LexicalExtractor::default().extract(text);
		assert_eq!(terms[0], "クオリア");
		assert!(!terms.iter().any(|t| t == "概念"));
	}

	#[test]
	fn long_kanji_runs_are_cut_not_merged() {
		let terms = LexicalExtractor::default().extract("量子力学的世界観念論");
		assert_eq!(terms, vec!["量子力学的世", "界観念論"]);
	}

	#[test]
	fn short_katakana_runs_are_ignored() {
		let terms = LexicalExtractor::default().extract("メモ と ノート");
		assert_eq!(terms, vec!["ノート"]);
	}

	#[test]
	fn ignores_code_urls_and_front_matter() {
		let text = "---\ntitle: Hidden Title\n---\nBody Words\n```\nAlgorithm Algorithm\n```\nSee https://Example.com/Path Reading";
		let terms = LexicalExtractor::default().extract(text);
		assert_eq!(terms, vec!["Body", "Words", "Reading"]);
	}

	#[test]
	fn english_stop_words_removed() {
		let terms = LexicalExtractor::default().extract("This Thing When Where Thing");
		assert_eq!(terms, vec!["Thing"]);
	}

	#[test]
	fn ties_follow_pattern_class_then_position() {
		let terms = LexicalExtractor::default().extract("Zeta クオリア 意識状態");
		assert_eq!(terms, vec!["クオリア", "意識状態", "Zeta"]);
	}

	#[test]
	fn truncates_to_limit_by_frequency() {
		let mut text: Vec<String> = ('A'..='T').map(|c| format!("{c}ord")).collect();
		text.push("Tord".to_string());
		let terms = LexicalExtractor::default().extract(&text.join(" "));

		assert_eq!(terms.len(), MAX_TERMS);
		assert_eq!(terms[0], "Tord");
		let expected: Vec<String> = ('A'..='N').map(|c| format!("{c}ord")).collect();
		assert_eq!(&terms[1..], expected.as_slice());
	}

	#[test]
	fn deterministic_and_unique() {
		let text = "ニューラルネット と ニューラルネット、Transformer の Attention 機構 と 機構。";
		let extractor = LexicalExtractor::default();
		let first = extractor.extract(text);
		let second = extractor.extract(text);
		assert_eq!(first, second);

		let unique: HashSet<&String> = first.iter().collect();
		assert_eq!(unique.len(), first.len());
		assert!(first.iter().all(|t| !STOP_TERMS.contains(&t.as_str())));
		assert_eq!(first[0], "ニューラルネット");
	}

	#[test]
	fn empty_text_yields_nothing() {
		assert!(LexicalExtractor::default().extract("").is_empty());
		assert!(LexicalExtractor::default().extract("   \n").is_empty());
	}
}
