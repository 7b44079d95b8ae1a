//! The corpus-wide vector space: one vocabulary set per variant.

use ahash::AHashSet;

use crate::corpus::catalog::TermCatalog;
use crate::variant::{PerVariant, Variant};

/// The set of all distinct terms per variant across the corpus.
///
/// Used for membership checks during vector construction: terms outside the
/// space are dropped from every vector, so all scoring happens on the agreed
/// vocabulary. Iteration order is never allowed to influence results.
#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    vocabularies: PerVariant<AHashSet<String>>,
}

impl VectorSpace {
    /// Build the space from a fully recorded catalog.
    pub fn from_catalog(catalog: &TermCatalog) -> Self {
        Self {
            vocabularies: PerVariant::from_fn(|variant| {
                catalog.vocabulary(variant).map(str::to_string).collect()
            }),
        }
    }

    /// Whether `term` belongs to the space for `variant`.
    pub fn contains(&self, variant: Variant, term: &str) -> bool {
        self.vocabularies.get(variant).contains(term)
    }

    /// Vocabulary size for one variant.
    pub fn len(&self, variant: Variant) -> usize {
        self.vocabularies.get(variant).len()
    }

    /// The full vocabulary set for one variant.
    pub fn vocabulary(&self, variant: Variant) -> &AHashSet<String> {
        self.vocabularies.get(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::document::{DocMetadata, Document};

    #[test]
    fn test_membership_per_variant() {
        let mut doc = Document::new(DocMetadata::default());
        doc.add_token("running", "run", "run", "div");

        let mut catalog = TermCatalog::new();
        catalog.record_document(&doc);
        let space = VectorSpace::from_catalog(&catalog);

        assert!(space.contains(Variant::Original, "running"));
        assert!(!space.contains(Variant::Original, "run"));
        assert!(space.contains(Variant::Stemmed, "run"));
        assert_eq!(space.len(Variant::Lemmatized), 1);
    }
}
