//! Documents, their tagged term tables, and query input.
//!
//! The corpus loader (an external collaborator) parses HTML and runs the
//! tokenizer/stemmer/lemmatizer; what arrives here is a table per variant
//! mapping each term to the structural tags it occurred under and how often.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::variant::{PerVariant, Variant};

/// Tag attached to terms injected by the named-entity recognizer.
pub const ENTITY_TAG: &str = "named entity";

/// Tag under which query tokens are recorded.
pub const QUERY_TAG: &str = "query";

/// Occurrence counts per structural tag for one term in one document.
pub type TagCounts = AHashMap<String, u32>;

/// Descriptive fields carried through to ranked results. All strings are
/// opaque pass-through values owned by the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMetadata {
    pub doc_id: u32,
    pub url: String,
    pub esrb: String,
    pub publisher: String,
    pub genre: String,
    pub developer: String,
}

/// One variant's term table for a document or query: term -> per-tag counts.
#[derive(Debug, Clone, Default)]
pub struct TermTable {
    entries: AHashMap<String, TagCounts>,
}

impl TermTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` occurrences of `term` under `tag`.
    pub fn add(&mut self, term: impl Into<String>, tag: impl Into<String>, count: u32) {
        *self
            .entries
            .entry(term.into())
            .or_default()
            .entry(tag.into())
            .or_insert(0) += count;
    }

    /// Whether `term` occurs anywhere in this table.
    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    /// Total occurrences of `term` across all tags (0 if unknown).
    pub fn count(&self, term: &str) -> u32 {
        self.entries
            .get(term)
            .map(|tags| tags.values().sum())
            .unwrap_or(0)
    }

    /// The per-tag counts for `term`.
    pub fn tag_counts(&self, term: &str) -> Option<&TagCounts> {
        self.entries.get(term)
    }

    /// Iterate the distinct terms in this table.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no terms.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total occurrences over every term and tag.
    pub fn total_occurrences(&self) -> u64 {
        self.entries
            .values()
            .map(|tags| tags.values().map(|&c| u64::from(c)).sum::<u64>())
            .sum()
    }
}

/// A loaded corpus document: metadata plus one tagged term table per variant.
///
/// Immutable once the corpus is built; re-weighting a changed document means
/// rebuilding the corpus.
#[derive(Debug, Clone)]
pub struct Document {
    metadata: DocMetadata,
    terms: PerVariant<TermTable>,
}

impl Document {
    /// Create an empty document for `metadata`.
    pub fn new(metadata: DocMetadata) -> Self {
        Self {
            metadata,
            terms: PerVariant::default(),
        }
    }

    /// Record `count` occurrences of `term` under `tag` for one variant.
    pub fn add_term(
        &mut self,
        variant: Variant,
        term: impl Into<String>,
        tag: impl Into<String>,
        count: u32,
    ) {
        self.terms.get_mut(variant).add(term, tag, count);
    }

    /// Record one token occurrence under each of its three normalized forms.
    pub fn add_token(&mut self, original: &str, stemmed: &str, lemmatized: &str, tag: &str) {
        self.terms.original.add(original, tag, 1);
        self.terms.stemmed.add(stemmed, tag, 1);
        self.terms.lemmatized.add(lemmatized, tag, 1);
    }

    /// Record a recognized named entity.
    ///
    /// The recognizer's convention: the combined `"{surface}, {category}"`
    /// form is indexed as a term of its own under [`ENTITY_TAG`], identically
    /// in all three variants (entity surface forms are neither stemmed nor
    /// lemmatized).
    pub fn add_entity(&mut self, surface: &str, category: &str) {
        let combined = format!("{surface}, {category}");
        for variant in Variant::ALL {
            self.terms.get_mut(variant).add(&combined, ENTITY_TAG, 1);
        }
    }

    /// Whether the recognizer tagged `surface` with `category` in this
    /// document. Checked against the original-variant table.
    pub fn has_entity(&self, surface: &str, category: &str) -> bool {
        let combined = format!("{surface}, {category}");
        self.terms
            .original
            .tag_counts(&combined)
            .is_some_and(|tags| tags.contains_key(ENTITY_TAG))
    }

    /// The document metadata.
    pub fn metadata(&self) -> &DocMetadata {
        &self.metadata
    }

    /// All three term tables.
    pub fn terms(&self) -> &PerVariant<TermTable> {
        &self.terms
    }

    /// The term table for one variant.
    pub fn terms_for(&self, variant: Variant) -> &TermTable {
        self.terms.get(variant)
    }

    /// Document length: total term occurrences in the original-variant
    /// table. This is the length BM25+ normalizes against for every variant.
    pub fn length(&self) -> u64 {
        self.terms.original.total_occurrences()
    }
}

/// A tokenized free-text query: each token recorded in its three normalized
/// forms under the synthetic [`QUERY_TAG`].
#[derive(Debug, Clone, Default)]
pub struct Query {
    terms: PerVariant<TermTable>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one query token in its three normalized forms.
    pub fn add_token(&mut self, original: &str, stemmed: &str, lemmatized: &str) {
        self.terms.original.add(original, QUERY_TAG, 1);
        self.terms.stemmed.add(stemmed, QUERY_TAG, 1);
        self.terms.lemmatized.add(lemmatized, QUERY_TAG, 1);
    }

    /// The query term table for one variant.
    pub fn terms_for(&self, variant: Variant) -> &TermTable {
        self.terms.get(variant)
    }

    /// Whether the query holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.terms.original.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(doc_id: u32) -> DocMetadata {
        DocMetadata {
            doc_id,
            url: format!("docs/{doc_id}.html"),
            ..DocMetadata::default()
        }
    }

    #[test]
    fn test_term_table_counts() {
        let mut table = TermTable::new();
        table.add("sword", "div", 2);
        table.add("sword", "contenttitle", 1);
        table.add("shield", "div", 1);

        assert_eq!(table.count("sword"), 3);
        assert_eq!(table.count("shield"), 1);
        assert_eq!(table.count("magic"), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total_occurrences(), 4);
    }

    #[test]
    fn test_document_length_uses_original_variant() {
        let mut doc = Document::new(metadata(0));
        doc.add_token("running", "run", "run", "div");
        doc.add_token("ran", "ran", "run", "div");
        // Lemmatized table collapsed to one term; length still counts the
        // original-variant occurrences.
        assert_eq!(doc.terms_for(Variant::Lemmatized).len(), 1);
        assert_eq!(doc.length(), 2);
    }

    #[test]
    fn test_entity_convention() {
        let mut doc = Document::new(metadata(0));
        doc.add_entity("Nintendo", "ORG");

        assert!(doc.has_entity("Nintendo", "ORG"));
        assert!(!doc.has_entity("Nintendo", "PERSON"));
        assert!(doc.terms_for(Variant::Stemmed).contains("Nintendo, ORG"));
        // Plain terms under other tags never count as entities.
        doc.add_term(Variant::Original, "Sega, ORG", "div", 1);
        assert!(!doc.has_entity("Sega", "ORG"));
    }

    #[test]
    fn test_query_tokens() {
        let mut query = Query::new();
        query.add_token("swords", "sword", "sword");
        query.add_token("swords", "sword", "sword");

        assert!(!query.is_empty());
        assert_eq!(query.terms_for(Variant::Original).count("swords"), 2);
        assert_eq!(query.terms_for(Variant::Stemmed).count("sword"), 2);
    }
}
