//! Co-occurrence precomputation over the plain TF-IDF document vectors.
//!
//! For every vocabulary term: collect the documents it appears in together
//! with its TF-IDF weight there, score every other term by the sum of
//! weight products over shared documents, and keep the top few (two by
//! default) in the catalog as "related" terms. Query expansion reads them
//! back at search time.
//!
//! The pairwise pass is O(V^2) over the vocabulary. That is fine at
//! prototype corpus sizes (hundreds of documents, thousands of terms) and a
//! known scalability ceiling beyond; the catalog would need a real
//! co-occurrence index before this runs on a large vocabulary.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ahash::AHashMap;
use log::debug;
use ordered_float::OrderedFloat;
use rayon::prelude::*;

use crate::corpus::catalog::TermCatalog;
use crate::store::VectorStore;
use crate::variant::Variant;

/// Compute and attach related terms for every cataloged term, per variant.
pub fn annotate_related_terms(catalog: &mut TermCatalog, store: &VectorStore, keep: usize) {
    for variant in Variant::ALL {
        let postings = build_postings(store, variant);
        debug!(
            "co-occurrence pass: {} vocabulary terms ({variant})",
            postings.len()
        );

        let vocabulary: Vec<&String> = postings.keys().collect();
        let related: Vec<(&String, Vec<String>)> = vocabulary
            .par_iter()
            .map(|&term| (term, top_related(term, &postings, keep)))
            .collect();

        for (term, related) in related {
            if !related.is_empty() {
                catalog.set_related(variant, term, related);
            }
        }
    }
}

/// Per-term postings: the documents a term appears in and its weight there.
fn build_postings(store: &VectorStore, variant: Variant) -> AHashMap<String, Vec<(u32, f64)>> {
    let mut postings: AHashMap<String, Vec<(u32, f64)>> = AHashMap::new();
    for (doc_id, bundle) in store.iter() {
        for (term, weight) in bundle.tf_idf.get(variant).iter() {
            if weight > 0.0 {
                postings.entry(term.to_string()).or_default().push((doc_id, weight));
            }
        }
    }
    postings
}

/// The `keep` strongest co-occurring terms for `target`, by descending
/// weighted shared-document score. Equal scores keep the lexicographically
/// smaller term, so the result is reproducible.
fn top_related(
    target: &str,
    postings: &AHashMap<String, Vec<(u32, f64)>>,
    keep: usize,
) -> Vec<String> {
    let target_weights: AHashMap<u32, f64> = postings
        .get(target)
        .map(|docs| docs.iter().copied().collect())
        .unwrap_or_default();
    if target_weights.is_empty() || keep == 0 {
        return Vec::new();
    }

    // Bounded min-heap of size `keep`: the weakest candidate is evicted
    // first, with the lexicographically larger term losing score ties.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, Reverse<String>)>> =
        BinaryHeap::with_capacity(keep + 1);
    for (term, docs) in postings {
        if term == target {
            continue;
        }
        let score: f64 = docs
            .iter()
            .filter_map(|(doc_id, weight)| target_weights.get(doc_id).map(|w| w * weight))
            .sum();
        if score > 0.0 {
            heap.push(Reverse((OrderedFloat(score), Reverse(term.clone()))));
            if heap.len() > keep {
                heap.pop();
            }
        }
    }

    let mut scored: Vec<(f64, String)> = heap
        .into_iter()
        .map(|Reverse((score, Reverse(term)))| (score.0, term))
        .collect();
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });
    scored.into_iter().map(|(_, term)| term).collect()
}
