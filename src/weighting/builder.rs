//! Construction of weighted vectors for documents and queries.
//!
//! Vector construction runs in strict phases per variant: membership
//! intersection with the corpus vector space, raw term frequency, inverse
//! document frequency, weight = tf * idf, then L2 normalization. The three
//! variants are independent and run in parallel; they read the same
//! immutable catalog and write disjoint slots, joined before use.

use crate::config::RankConfig;
use crate::corpus::catalog::TermCatalog;
use crate::corpus::document::{Document, Query, TermTable};
use crate::corpus::space::VectorSpace;
use crate::error::Result;
use crate::variant::{PerVariant, Variant};
use crate::weighting::scheme::{DocShape, Scheme, inverse_document_frequency, term_frequency};
use crate::weighting::vector::{TermVector, UnnormalizedVector};

/// Compute one normalized sparse vector per variant for a document.
pub fn document_vector(
    doc: &Document,
    scheme: Scheme,
    catalog: &TermCatalog,
    space: &VectorSpace,
    config: &RankConfig,
) -> Result<PerVariant<TermVector>> {
    let shape = DocShape {
        doc_length: doc.length() as f64,
        avg_doc_length: catalog.average_document_length(),
    };
    let weigh = |variant: Variant| {
        variant_vector(doc.terms_for(variant), variant, scheme, catalog, space, config, shape)
    };
    let (original, (stemmed, lemmatized)) = rayon::join(
        || weigh(Variant::Original),
        || rayon::join(|| weigh(Variant::Stemmed), || weigh(Variant::Lemmatized)),
    );
    Ok(PerVariant::new(original?, stemmed?, lemmatized?))
}

fn variant_vector(
    table: &TermTable,
    variant: Variant,
    scheme: Scheme,
    catalog: &TermCatalog,
    space: &VectorSpace,
    config: &RankConfig,
    shape: DocShape,
) -> Result<TermVector> {
    let mut raw = UnnormalizedVector::default();
    for term in table.terms() {
        // Terms never seen corpus-wide are dropped even if this table has
        // them: the engine only scores on the agreed vector space.
        if !space.contains(variant, term) {
            continue;
        }
        let Some(tags) = table.tag_counts(term) else {
            continue;
        };
        let tf = term_frequency(scheme, config, table.count(term), tags, shape);
        debug_assert!(
            tf >= 0.0,
            "negative tf {tf} for term {term:?} ({variant}, {scheme})"
        );
        let idf = inverse_document_frequency(scheme, variant, term, catalog)?;
        raw.0.insert(term.to_string(), tf * idf);
    }
    Ok(raw.normalize())
}

/// Build the normalized query vector for one variant.
///
/// Query weighting is term-frequency only: tf is the raw token count and
/// idf is 1, so queries carry no corpus-frequency dampening. Tokens outside
/// the vector space are dropped like any other out-of-space term.
pub fn query_vector(query: &Query, variant: Variant, space: &VectorSpace) -> TermVector {
    let table = query.terms_for(variant);
    let mut raw = UnnormalizedVector::default();
    for term in table.terms() {
        if !space.contains(variant, term) {
            continue;
        }
        raw.0.insert(term.to_string(), f64::from(table.count(term)));
    }
    raw.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::corpus::document::DocMetadata;

    fn doc(doc_id: u32, tokens: &[(&str, &str)]) -> Document {
        let mut doc = Document::new(DocMetadata {
            doc_id,
            ..DocMetadata::default()
        });
        for (token, tag) in tokens {
            doc.add_token(token, token, token, tag);
        }
        doc
    }

    fn corpus() -> Corpus {
        Corpus::from_documents(vec![
            doc(0, &[("sword", "div"), ("sword", "contenttitle"), ("shield", "div")]),
            doc(1, &[("sword", "div"), ("magic", "div")]),
            doc(2, &[("potion", "div")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_document_vectors_are_unit_norm() {
        let corpus = corpus();
        let config = RankConfig::default();
        for scheme in Scheme::ALL {
            for doc in corpus.documents() {
                let vectors =
                    document_vector(doc, scheme, corpus.catalog(), corpus.space(), &config)
                        .unwrap();
                for (_, vector) in vectors.iter() {
                    let norm = vector.norm();
                    assert!(
                        norm == 0.0 || (norm - 1.0).abs() < 1e-9,
                        "norm {norm} for {scheme}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_out_of_space_query_terms_dropped() {
        let corpus = corpus();
        let mut query = Query::new();
        query.add_token("sword", "sword", "sword");
        query.add_token("dragon", "dragon", "dragon");

        let vector = query_vector(&query, Variant::Original, corpus.space());
        assert!(vector.terms().contains("sword"));
        assert!(!vector.terms().contains("dragon"));
        assert!((vector.weight("sword") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_query_tf_is_raw_count() {
        let corpus = corpus();
        let mut query = Query::new();
        query.add_token("sword", "sword", "sword");
        query.add_token("sword", "sword", "sword");
        query.add_token("shield", "shield", "shield");

        let vector = query_vector(&query, Variant::Original, corpus.space());
        // Raw counts 2 and 1, normalized by sqrt(5).
        let norm = 5.0_f64.sqrt();
        assert!((vector.weight("sword") - 2.0 / norm).abs() < 1e-12);
        assert!((vector.weight("shield") - 1.0 / norm).abs() < 1e-12);
    }

    #[test]
    fn test_empty_document_yields_zero_vectors() {
        let corpus = Corpus::from_documents(vec![
            doc(0, &[("sword", "div")]),
            doc(1, &[]),
        ])
        .unwrap();
        let config = RankConfig::default();
        let vectors = document_vector(
            &corpus.documents()[1],
            Scheme::TfIdf,
            corpus.catalog(),
            corpus.space(),
            &config,
        )
        .unwrap();
        assert!(vectors.original.is_empty());
        assert!(vectors.lemmatized.is_empty());
    }

    #[test]
    fn test_field_scheme_ranks_title_occurrences_higher() {
        // Same raw counts, but doc 0 carries its term in a boosted tag.
        let corpus = Corpus::from_documents(vec![
            doc(0, &[("sword", "contenttitle"), ("shield", "i")]),
            doc(1, &[("sword", "i"), ("shield", "i")]),
        ])
        .unwrap();
        let config = RankConfig::default();
        let v0 = document_vector(
            &corpus.documents()[0],
            Scheme::TfIdfField,
            corpus.catalog(),
            corpus.space(),
            &config,
        )
        .unwrap();
        let v1 = document_vector(
            &corpus.documents()[1],
            Scheme::TfIdfField,
            corpus.catalog(),
            corpus.space(),
            &config,
        )
        .unwrap();
        assert!(v0.original.weight("sword") > v1.original.weight("sword"));
    }
}
