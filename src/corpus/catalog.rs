//! Corpus-wide term statistics.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::corpus::document::Document;
use crate::error::{Result, SorrelError};
use crate::variant::{PerVariant, Variant};

/// Format version written into persisted catalogs.
const FORMAT_VERSION: u32 = 1;

/// Aggregate statistics for one term in one variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermStats {
    /// Number of distinct documents containing the term.
    pub doc_count: usize,
    /// Total occurrences across the corpus.
    pub occurrence_count: u64,
    /// Top co-occurring terms, filled in by the co-occurrence pass. Ordered
    /// by descending co-occurrence score.
    pub related: Vec<String>,
}

/// Per-variant term statistics plus corpus-level aggregates.
///
/// Built once while the corpus loads and read-only afterwards. Lookups for
/// unknown terms return zero rather than failing, so cross-variant and
/// cross-document lookups degrade gracefully.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermCatalog {
    version: u32,
    terms: PerVariant<AHashMap<String, TermStats>>,
    num_documents: usize,
    total_length: u64,
}

impl TermCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION,
            ..Self::default()
        }
    }

    /// Record one document's term tables. Called exactly once per document
    /// at load time.
    pub fn record_document(&mut self, doc: &Document) {
        for variant in Variant::ALL {
            let table = doc.terms_for(variant);
            let stats_map = self.terms.get_mut(variant);
            for term in table.terms() {
                let stats = stats_map.entry(term.to_string()).or_default();
                stats.doc_count += 1;
                stats.occurrence_count += u64::from(table.count(term));
            }
        }
        self.num_documents += 1;
        self.total_length += doc.length();
    }

    /// Number of distinct documents containing `term` (0 if unknown). This
    /// is the document-frequency counter every idf formula uses.
    pub fn document_count(&self, variant: Variant, term: &str) -> usize {
        self.terms
            .get(variant)
            .get(term)
            .map(|s| s.doc_count)
            .unwrap_or(0)
    }

    /// Total occurrences of `term` across the corpus (0 if unknown). Kept
    /// for statistics; feeds no ranking formula.
    pub fn occurrence_count(&self, variant: Variant, term: &str) -> u64 {
        self.terms
            .get(variant)
            .get(term)
            .map(|s| s.occurrence_count)
            .unwrap_or(0)
    }

    /// Number of documents recorded.
    pub fn num_documents(&self) -> usize {
        self.num_documents
    }

    /// Mean per-document term-occurrence count.
    pub fn average_document_length(&self) -> f64 {
        if self.num_documents == 0 {
            0.0
        } else {
            self.total_length as f64 / self.num_documents as f64
        }
    }

    /// The precomputed co-occurring terms for `term` (empty if none).
    pub fn related(&self, variant: Variant, term: &str) -> &[String] {
        self.terms
            .get(variant)
            .get(term)
            .map(|s| s.related.as_slice())
            .unwrap_or(&[])
    }

    /// Attach co-occurring terms to a cataloged term. Unknown terms are
    /// ignored.
    pub(crate) fn set_related(&mut self, variant: Variant, term: &str, related: Vec<String>) {
        if let Some(stats) = self.terms.get_mut(variant).get_mut(term) {
            stats.related = related;
        }
    }

    /// Iterate the vocabulary for one variant. Order is unspecified; callers
    /// must not let it reach observable output.
    pub fn vocabulary(&self, variant: Variant) -> impl Iterator<Item = &str> {
        self.terms.get(variant).keys().map(String::as_str)
    }

    /// Vocabulary size for one variant.
    pub fn vocabulary_len(&self, variant: Variant) -> usize {
        self.terms.get(variant).len()
    }

    /// Serialize to a versioned JSON file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a previously saved catalog; rejects mismatched format versions.
    pub fn load_from(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let catalog: TermCatalog = serde_json::from_reader(BufReader::new(file))?;
        if catalog.version != FORMAT_VERSION {
            return Err(SorrelError::persistence(format!(
                "unsupported term catalog format version {} (expected {FORMAT_VERSION})",
                catalog.version
            )));
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::document::DocMetadata;

    fn doc(doc_id: u32, tokens: &[&str]) -> Document {
        let mut doc = Document::new(DocMetadata {
            doc_id,
            ..DocMetadata::default()
        });
        for token in tokens {
            doc.add_token(token, token, token, "div");
        }
        doc
    }

    #[test]
    fn test_record_and_lookup() {
        let mut catalog = TermCatalog::new();
        catalog.record_document(&doc(0, &["sword", "sword", "shield"]));
        catalog.record_document(&doc(1, &["sword"]));

        assert_eq!(catalog.num_documents(), 2);
        assert_eq!(catalog.document_count(Variant::Original, "sword"), 2);
        assert_eq!(catalog.document_count(Variant::Original, "shield"), 1);
        assert_eq!(catalog.occurrence_count(Variant::Original, "sword"), 3);
        assert_eq!(catalog.average_document_length(), 2.0);
    }

    #[test]
    fn test_unknown_term_is_zero_not_error() {
        let mut catalog = TermCatalog::new();
        catalog.record_document(&doc(0, &["sword"]));

        assert_eq!(catalog.document_count(Variant::Original, "magic"), 0);
        assert_eq!(catalog.occurrence_count(Variant::Stemmed, "magic"), 0);
        assert!(catalog.related(Variant::Original, "magic").is_empty());
    }

    #[test]
    fn test_document_count_never_exceeds_num_documents() {
        let mut catalog = TermCatalog::new();
        for doc_id in 0..5 {
            catalog.record_document(&doc(doc_id, &["sword", "sword"]));
        }
        for term in catalog.vocabulary(Variant::Original).collect::<Vec<_>>() {
            let df = catalog.document_count(Variant::Original, term);
            assert!(df >= 1);
            assert!(df <= catalog.num_documents());
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut catalog = TermCatalog::new();
        catalog.record_document(&doc(0, &["sword", "shield"]));
        catalog.set_related(Variant::Original, "sword", vec!["shield".to_string()]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        catalog.save_to(&path).unwrap();

        let loaded = TermCatalog::load_from(&path).unwrap();
        assert_eq!(loaded.num_documents(), 1);
        assert_eq!(loaded.document_count(Variant::Original, "sword"), 1);
        assert_eq!(loaded.related(Variant::Original, "sword"), ["shield"]);
    }
}
