//! Weighting schemes and their tf/idf formulas.
//!
//! The four schemes form a closed set; formula selection is a plain `match`
//! rather than virtual dispatch, so each formula can be tested in isolation.

use serde::{Deserialize, Serialize};

use crate::config::RankConfig;
use crate::corpus::catalog::TermCatalog;
use crate::corpus::document::TagCounts;
use crate::error::{Result, SorrelError};
use crate::variant::Variant;

/// The closed set of document weighting schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    /// Plain TF-IDF: `tf = ln(c) + 1`, `idf = ln(N/df + 1) + 1`.
    TfIdf,
    /// TF-IDF with tag-weighted counts: `tf = ln(weighted_c + 1)`, same idf.
    TfIdfField,
    /// BM25+ saturation tf with `idf = ln((N - df + 0.5)/(df + 0.5) + 1)`.
    Bm25Plus,
    /// BM25+ with tag-weighted counts fed into the saturation formula.
    Bm25PlusField,
}

impl Scheme {
    /// All schemes, in a fixed order.
    pub const ALL: [Scheme; 4] = [
        Scheme::TfIdf,
        Scheme::TfIdfField,
        Scheme::Bm25Plus,
        Scheme::Bm25PlusField,
    ];

    /// Short name, used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::TfIdf => "tfidf",
            Scheme::TfIdfField => "tfidf-field",
            Scheme::Bm25Plus => "bm25plus",
            Scheme::Bm25PlusField => "bm25plus-field",
        }
    }

    /// Whether this scheme weighs occurrences by their structural tag.
    pub fn is_field_weighted(&self) -> bool {
        matches!(self, Scheme::TfIdfField | Scheme::Bm25PlusField)
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural-tag boost applied by the field-weighted schemes.
///
/// Title-like and metadata tags count for more than generic containers;
/// decorative tags count for less. Unknown tags weigh 1.
pub fn tag_weight(tag: &str) -> f64 {
    match tag {
        "metadata" | "gameBioInfoText" => 5.0,
        "meta" | "contenttitle" | "gameBioSysReq" | "named entity" => 3.0,
        "div" | "a" => 2.0,
        "strong" | "b" => 1.25,
        "gameBioInfo" => 1.0,
        "i" => 0.75,
        "gameBioHeader" | "gameBioInfoHeader" | "gameBioSysReqTitle" => 0.5,
        _ => 1.0,
    }
}

/// Occurrence count weighted by the structural tags it appeared under.
pub fn weighted_count(tags: &TagCounts) -> f64 {
    tags.iter()
        .map(|(tag, count)| tag_weight(tag) * f64::from(*count))
        .sum()
}

/// Document-shape inputs shared by every tf formula of one vector.
#[derive(Debug, Clone, Copy)]
pub struct DocShape {
    /// Total term occurrences in the document.
    pub doc_length: f64,
    /// Mean document length across the corpus.
    pub avg_doc_length: f64,
}

/// Raw term-frequency component for one term under one scheme.
///
/// Note the deliberate asymmetry between the two TF-IDF variants: plain
/// TF-IDF computes `ln(c) + 1` (zero when the count is zero), the field
/// variant computes `ln(weighted_c + 1)` with no trailing `+ 1`.
pub(crate) fn term_frequency(
    scheme: Scheme,
    config: &RankConfig,
    raw_count: u32,
    tags: &TagCounts,
    shape: DocShape,
) -> f64 {
    match scheme {
        Scheme::TfIdf => log_tf(f64::from(raw_count)),
        Scheme::TfIdfField => (weighted_count(tags) + 1.0).ln(),
        Scheme::Bm25Plus => bm25_tf(f64::from(raw_count), config, shape),
        Scheme::Bm25PlusField => bm25_tf(weighted_count(tags), config, shape),
    }
}

fn log_tf(count: f64) -> f64 {
    if count == 0.0 { 0.0 } else { count.ln() + 1.0 }
}

fn bm25_tf(count: f64, config: &RankConfig, shape: DocShape) -> f64 {
    let RankConfig { k1, b, .. } = *config;
    let length_norm = 1.0 - b + b * (shape.doc_length / shape.avg_doc_length);
    count * (k1 + 1.0) / (count + k1 * length_norm)
}

/// Inverse-document-frequency component for one in-vocabulary term.
///
/// Both scheme families use the document-presence count for `df`. A
/// vector-space term with `df == 0` means the catalog and the space disagree
/// and is reported as a fatal configuration error.
pub(crate) fn inverse_document_frequency(
    scheme: Scheme,
    variant: Variant,
    term: &str,
    catalog: &TermCatalog,
) -> Result<f64> {
    let num_documents = catalog.num_documents() as f64;
    let doc_count = catalog.document_count(variant, term);
    if doc_count == 0 {
        return Err(SorrelError::configuration(format!(
            "term {term:?} ({variant}) is in the vector space but has zero document frequency ({scheme})"
        )));
    }
    let df = doc_count as f64;
    let idf = match scheme {
        Scheme::TfIdf | Scheme::TfIdfField => (num_documents / df + 1.0).ln() + 1.0,
        Scheme::Bm25Plus | Scheme::Bm25PlusField => {
            ((num_documents - df + 0.5) / (df + 0.5) + 1.0).ln()
        }
    };
    debug_assert!(
        idf > 0.0,
        "non-positive idf {idf} for term {term:?} ({variant}, {scheme})"
    );
    Ok(idf)
}
