//! Top-k scoring of a prepared query vector against the vector store.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use ordered_float::OrderedFloat;

use crate::config::RankConfig;
use crate::corpus::Corpus;
use crate::store::VectorStore;
use crate::variant::Variant;
use crate::weighting::scheme::Scheme;
use crate::weighting::vector::TermVector;

/// Recognized entities attached to a query: surface form to category.
///
/// A document whose original-variant term table carries the entity term
/// `"{surface}, {category}"` under the entity tag gets its score doubled,
/// once per document regardless of how many entities match.
pub type EntityTerms = BTreeMap<String, String>;

/// One ranked result.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedHit {
    /// Cosine similarity, after any entity boost.
    pub score: f64,
    /// Metadata of the matching document.
    pub metadata: crate::corpus::document::DocMetadata,
    /// Query terms that also occur in the document vector.
    pub matched_terms: BTreeSet<String>,
}

/// Scores one query against every stored document vector and keeps the
/// highest-scoring `top_k` in a bounded min-heap.
pub struct Ranker<'a> {
    corpus: &'a Corpus,
    store: &'a VectorStore,
    config: &'a RankConfig,
}

impl<'a> Ranker<'a> {
    pub fn new(corpus: &'a Corpus, store: &'a VectorStore, config: &'a RankConfig) -> Self {
        Ranker {
            corpus,
            store,
            config,
        }
    }

    /// Rank the corpus against a normalized query vector.
    ///
    /// Only strictly positive similarities are kept, so the result may hold
    /// fewer than `top_k` hits, and an empty query yields no hits at all.
    /// Among equal scores, documents that entered the heap earlier win:
    /// the heap evicts the entry with the larger insertion sequence first,
    /// and the final order lists earlier documents first.
    pub fn rank(
        &self,
        query: &TermVector,
        scheme: Scheme,
        variant: Variant,
        entities: &EntityTerms,
    ) -> Vec<RankedHit> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, Reverse<usize>)>> =
            BinaryHeap::with_capacity(self.config.top_k + 1);

        for (seq, vectors) in self.store.vectors().iter().enumerate() {
            let doc_vector = vectors.get(scheme).get(variant);
            let mut score = doc_vector.dot(query);
            if score <= 0.0 {
                continue;
            }
            if self.has_matching_entity(seq, entities) {
                score *= 2.0;
            }
            heap.push(Reverse((OrderedFloat(score), Reverse(seq))));
            if heap.len() > self.config.top_k {
                heap.pop();
            }
        }

        let mut ordered: Vec<(f64, usize)> = heap
            .into_iter()
            .map(|Reverse((score, Reverse(seq)))| (score.into_inner(), seq))
            .collect();
        ordered.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });

        ordered
            .into_iter()
            .map(|(score, seq)| {
                let doc = &self.corpus.documents()[seq];
                let doc_vector = self.store.vectors()[seq].get(scheme).get(variant);
                RankedHit {
                    score,
                    metadata: doc.metadata().clone(),
                    matched_terms: doc_vector.shared_terms(query),
                }
            })
            .collect()
    }

    fn has_matching_entity(&self, seq: usize, entities: &EntityTerms) -> bool {
        if entities.is_empty() {
            return false;
        }
        let doc = &self.corpus.documents()[seq];
        entities
            .iter()
            .any(|(surface, category)| doc.has_entity(surface, category))
    }
}
