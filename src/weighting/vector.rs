//! Sparse term vectors and their algebra.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A sparse, L2-normalized term vector for one variant.
///
/// `terms` is the membership set (the document's terms intersected with the
/// corpus vector space); `weights` carries the non-negative weight of each
/// member term. A member with no stored weight weighs zero. Ordered
/// containers keep every downstream pass deterministic: repeated runs over
/// the same data produce byte-identical output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermVector {
    terms: BTreeSet<String>,
    weights: BTreeMap<String, f64>,
}

impl TermVector {
    /// Create an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member term with its weight.
    pub(crate) fn insert(&mut self, term: String, weight: f64) {
        debug_assert!(weight >= 0.0, "negative weight {weight} for term {term:?}");
        self.terms.insert(term.clone());
        self.weights.insert(term, weight);
    }

    /// Add `delta` to a term's weight (0 if absent), making it a member.
    pub(crate) fn add_weight(&mut self, term: &str, delta: f64) {
        if !self.terms.contains(term) {
            self.terms.insert(term.to_string());
        }
        *self.weights.entry(term.to_string()).or_insert(0.0) += delta;
    }

    /// The weight of `term`, 0 for non-members.
    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    /// The membership set.
    pub fn terms(&self) -> &BTreeSet<String> {
        &self.terms
    }

    /// Iterate `(term, weight)` pairs in term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(term, &w)| (term.as_str(), w))
    }

    /// Number of member terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vector has no member terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Euclidean norm of the weights.
    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Sparse dot product over the shared membership terms.
    ///
    /// Terms outside the intersection contribute zero. Both vectors being
    /// unit-normalized makes this the cosine similarity. The shared terms
    /// are visited in lexicographic order regardless of operand order, so
    /// `a.dot(b) == b.dot(a)` exactly.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (small, large) = if self.terms.len() <= other.terms.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .terms
            .iter()
            .filter(|term| large.terms.contains(*term))
            .map(|term| small.weight(term) * large.weight(term))
            .sum()
    }

    /// Membership terms shared with another vector.
    pub fn shared_terms(&self, other: &TermVector) -> BTreeSet<String> {
        self.terms.intersection(&other.terms).cloned().collect()
    }
}

/// A vector whose weights are not (or no longer) unit-normalized.
///
/// Query expansion and relevance feedback produce these. Cosine scoring
/// assumes unit vectors, so the only way back into ranking is through
/// [`UnnormalizedVector::normalize`]; the intermediate state cannot be
/// scored by accident.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnnormalizedVector(pub(crate) TermVector);

impl UnnormalizedVector {
    /// Divide every weight by the Euclidean norm. A zero vector stays zero.
    pub fn normalize(mut self) -> TermVector {
        let norm = self.0.norm();
        if norm > 0.0 {
            for weight in self.0.weights.values_mut() {
                *weight /= norm;
            }
        }
        self.0
    }

    /// The weight of `term`, 0 for non-members.
    pub fn weight(&self, term: &str) -> f64 {
        self.0.weight(term)
    }

    /// The membership set.
    pub fn terms(&self) -> &BTreeSet<String> {
        self.0.terms()
    }

    /// Whether the vector has no member terms.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<TermVector> for UnnormalizedVector {
    fn from(vector: TermVector) -> Self {
        UnnormalizedVector(vector)
    }
}
