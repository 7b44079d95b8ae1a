//! Query refinement: co-occurrence expansion and relevance feedback.
//!
//! Both operations return an [`UnnormalizedVector`]: their raw output does
//! not have unit norm, and similarity scores against it would not be bounded
//! to [0, 1]. The type forces callers through `normalize()` before ranking.

use std::collections::BTreeSet;

use crate::config::RankConfig;
use crate::corpus::catalog::TermCatalog;
use crate::variant::Variant;
use crate::weighting::vector::{TermVector, UnnormalizedVector};

/// Expand a query vector with each query term's precomputed related terms.
///
/// Every related term gains a fixed weight increment (on top of its current
/// weight, 0 if absent) and joins the membership set. A query whose terms
/// have no co-occurrence data comes back unchanged.
pub fn expand_query(
    query: &TermVector,
    variant: Variant,
    catalog: &TermCatalog,
    config: &RankConfig,
) -> UnnormalizedVector {
    let mut expanded = UnnormalizedVector::from(query.clone());
    for term in query.terms() {
        for related in catalog.related(variant, term) {
            expanded.0.add_weight(related, config.expansion_weight);
        }
    }
    expanded
}

/// Rocchio-style feedback from user-marked relevant documents.
///
/// Only terms present in *every* relevant document survive, a stricter
/// intersection than classic Rocchio. Each surviving term keeps the
/// mean of its nonzero weights across the relevant documents, scaled by
/// `beta`. An empty relevant set yields an empty vector, not an error.
pub fn feedback_query(relevant: &[&TermVector], beta: f64) -> UnnormalizedVector {
    let Some((first, rest)) = relevant.split_first() else {
        return UnnormalizedVector::default();
    };

    let mut shared: BTreeSet<String> = first.terms().clone();
    for vector in rest {
        shared.retain(|term| vector.terms().contains(term));
    }

    let mut fed = UnnormalizedVector::default();
    for term in &shared {
        let mut total = 0.0;
        let mut count = 0usize;
        for vector in relevant {
            let weight = vector.weight(term);
            if weight != 0.0 {
                total += weight;
                count += 1;
            }
        }
        let mean = if count > 0 { total / count as f64 } else { 0.0 };
        fed.0.insert(term.clone(), mean * beta);
    }
    fed
}
