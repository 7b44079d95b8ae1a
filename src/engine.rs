//! The search engine facade: owns the corpus, the vector store, and the
//! ranking configuration, and exposes the full query lifecycle (plain
//! search, co-occurrence expansion, relevance feedback, and spelling
//! suggestions).

use std::path::Path;

use crate::config::RankConfig;
use crate::cooccur;
use crate::corpus::{Corpus, Document, Query};
use crate::error::{Result, SorrelError};
use crate::rank::{EntityTerms, RankedHit, Ranker};
use crate::refine;
use crate::spell::SpellChecker;
use crate::store::VectorStore;
use crate::variant::Variant;
use crate::weighting::scheme::Scheme;
use crate::weighting::{TermVector, query_vector};

/// A fully built engine over a fixed document corpus.
#[derive(Debug)]
pub struct SearchEngine {
    corpus: Corpus,
    store: VectorStore,
    config: RankConfig,
}

impl SearchEngine {
    /// Build the engine from scratch: index the corpus, vectorize every
    /// document under every scheme and variant, then precompute related
    /// terms from the finished store.
    pub fn build(documents: Vec<Document>, config: RankConfig) -> Result<SearchEngine> {
        let mut corpus = Corpus::from_documents(documents)?;
        let store = VectorStore::build(&corpus, &config)?;
        cooccur::annotate_related_terms(corpus.catalog_mut(), &store, config.related_terms);
        log::info!(
            "engine ready: {} documents, {} original-variant terms",
            corpus.len(),
            corpus.space().len(Variant::Original)
        );
        Ok(SearchEngine {
            corpus,
            store,
            config,
        })
    }

    /// Rebuild the engine around a previously persisted vector store.
    ///
    /// The documents must be the same corpus the store was built from; a
    /// length mismatch is the cheapest check we can make and fails fast.
    /// Related terms are recomputed since the catalog is rebuilt here.
    pub fn with_store(
        documents: Vec<Document>,
        store: VectorStore,
        config: RankConfig,
    ) -> Result<SearchEngine> {
        let mut corpus = Corpus::from_documents(documents)?;
        if store.len() != corpus.len() {
            return Err(SorrelError::persistence(format!(
                "store covers {} documents but the corpus has {}",
                store.len(),
                corpus.len()
            )));
        }
        cooccur::annotate_related_terms(corpus.catalog_mut(), &store, config.related_terms);
        Ok(SearchEngine {
            corpus,
            store,
            config,
        })
    }

    /// The normalized query vector for one variant. Tokens outside the
    /// vocabulary contribute nothing.
    pub fn query_vector(&self, query: &Query, variant: Variant) -> TermVector {
        query_vector(query, variant, self.corpus.space())
    }

    /// Plain ranked search.
    pub fn search(
        &self,
        query: &Query,
        scheme: Scheme,
        variant: Variant,
        entities: &EntityTerms,
    ) -> Vec<RankedHit> {
        let vector = self.query_vector(query, variant);
        self.rank_vector(&vector, scheme, variant, entities)
    }

    /// Rank an already prepared (normalized) query vector.
    pub fn rank_vector(
        &self,
        vector: &TermVector,
        scheme: Scheme,
        variant: Variant,
        entities: &EntityTerms,
    ) -> Vec<RankedHit> {
        Ranker::new(&self.corpus, &self.store, &self.config).rank(vector, scheme, variant, entities)
    }

    /// Search with the query expanded by precomputed related terms.
    pub fn search_expanded(
        &self,
        query: &Query,
        scheme: Scheme,
        variant: Variant,
        entities: &EntityTerms,
    ) -> Vec<RankedHit> {
        let base = self.query_vector(query, variant);
        let expanded =
            refine::expand_query(&base, variant, self.corpus.catalog(), &self.config).normalize();
        self.rank_vector(&expanded, scheme, variant, entities)
    }

    /// Search with a query derived from user-marked relevant documents.
    ///
    /// The query is the intersection of the relevant documents' stored
    /// vectors under the requested scheme and variant, scaled by beta and
    /// renormalized. Unknown doc_ids are rejected.
    pub fn search_with_feedback(
        &self,
        relevant_ids: &[u32],
        scheme: Scheme,
        variant: Variant,
        entities: &EntityTerms,
    ) -> Result<Vec<RankedHit>> {
        let mut vectors = Vec::with_capacity(relevant_ids.len());
        for &doc_id in relevant_ids {
            let bundle = self
                .store
                .get(doc_id)
                .ok_or_else(|| SorrelError::invalid_argument(format!("unknown doc_id {doc_id}")))?;
            vectors.push(bundle.get(scheme).get(variant));
        }
        let fed = refine::feedback_query(&vectors, self.config.feedback_beta).normalize();
        Ok(self.rank_vector(&fed, scheme, variant, entities))
    }

    /// Spelling suggestions against the original-variant vocabulary.
    /// Tokens that are already known, or too far from everything, pass
    /// through unchanged.
    pub fn suggest(&self, tokens: &[&str]) -> Vec<String> {
        SpellChecker::new(self.corpus.space(), self.config.max_edit_distance).correct_all(tokens)
    }

    /// Persist the vector store to a versioned JSON file.
    pub fn save_store(&self, path: &Path) -> Result<()> {
        self.store.save_to(path)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::DocMetadata;

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

    fn engine() -> SearchEngine {
        SearchEngine::build(
            vec![
                doc(0, &["sword", "shield"]),
                doc(1, &["sword", "shield", "shield"]),
                doc(2, &["magic", "potion"]),
            ],
            RankConfig::default(),
        )
        .unwrap()
    }

    fn query(tokens: &[&str]) -> Query {
        let mut q = Query::new();
        for token in tokens {
            q.add_token(token, token, token);
        }
        q
    }

    #[test]
    fn test_search_finds_matching_documents() {
        let engine = engine();
        let hits = engine.search(
            &query(&["shield"]),
            Scheme::TfIdf,
            Variant::Original,
            &EntityTerms::new(),
        );
        assert_eq!(hits.len(), 2);
        // Doc 1 mentions shield twice and must outrank doc 0.
        assert_eq!(hits[0].metadata.doc_id, 1);
        assert_eq!(hits[1].metadata.doc_id, 0);
    }

    #[test]
    fn test_feedback_rejects_unknown_doc_id() {
        let engine = engine();
        let err = engine
            .search_with_feedback(&[99], Scheme::TfIdf, Variant::Original, &EntityTerms::new())
            .unwrap_err();
        assert!(matches!(err, SorrelError::InvalidArgument(_)));
    }

    #[test]
    fn test_feedback_recovers_relevant_documents() {
        let engine = engine();
        let hits = engine
            .search_with_feedback(&[0, 1], Scheme::TfIdf, Variant::Original, &EntityTerms::new())
            .unwrap();
        let ids: Vec<u32> = hits.iter().map(|h| h.metadata.doc_id).collect();
        assert!(ids.contains(&0));
        assert!(ids.contains(&1));
        assert!(!ids.contains(&2));
    }

    #[test]
    fn test_with_store_rejects_length_mismatch() {
        let engine = engine();
        let store = engine.store().clone();
        let err = SearchEngine::with_store(vec![doc(0, &["sword"])], store, RankConfig::default())
            .unwrap_err();
        assert!(matches!(err, SorrelError::Persistence(_)));
    }

    #[test]
    fn test_suggest_corrects_typos() {
        let engine = engine();
        let fixed = engine.suggest(&["swrod", "magic"]);
        assert_eq!(fixed, vec!["sword".to_string(), "magic".to_string()]);
    }
}
