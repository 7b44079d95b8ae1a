//! Sorrel is a vector-space search core for a fixed HTML document corpus.
//!
//! Documents arrive pre-tokenized in three normalization variants
//! (original, stemmed, lemmatized). The engine weighs every document
//! under four schemes (TF-IDF and BM25+, each with and without HTML
//! tag field weighting) and answers queries by cosine similarity over
//! L2-normalized vectors, with optional query expansion from precomputed
//! co-occurrence data, Rocchio-style relevance feedback, entity score
//! boosting, and vocabulary-driven spelling correction.
//!
//! # Example
//!
//! ```
//! use sorrel::{
//!     DocMetadata, Document, EntityTerms, Query, RankConfig, Scheme, SearchEngine, Variant,
//! };
//!
//! let mut doc = Document::new(DocMetadata {
//!     doc_id: 0,
//!     url: "https://example.com/games/0".to_string(),
//!     ..DocMetadata::default()
//! });
//! doc.add_token("dragon", "dragon", "dragon", "contenttitle");
//! doc.add_token("quest", "quest", "quest", "div");
//!
//! let engine = SearchEngine::build(vec![doc], RankConfig::default())?;
//!
//! let mut query = Query::new();
//! query.add_token("dragon", "dragon", "dragon");
//! let hits = engine.search(&query, Scheme::Bm25Plus, Variant::Original, &EntityTerms::new());
//! assert_eq!(hits[0].metadata.doc_id, 0);
//! # Ok::<(), sorrel::SorrelError>(())
//! ```

pub mod config;
pub mod cooccur;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod rank;
pub mod refine;
pub mod spell;
pub mod store;
pub mod variant;
pub mod weighting;

pub use config::RankConfig;
pub use corpus::{Corpus, DocMetadata, Document, Query, TermCatalog, TermTable, VectorSpace};
pub use engine::SearchEngine;
pub use error::{Result, SorrelError};
pub use rank::{EntityTerms, RankedHit, Ranker};
pub use spell::SpellChecker;
pub use store::VectorStore;
pub use variant::{PerVariant, Variant};
pub use weighting::{Scheme, TermVector, UnnormalizedVector};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
