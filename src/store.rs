//! Per-document vector bundles and the corpus-wide vector store.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RankConfig;
use crate::corpus::Corpus;
use crate::error::{Result, SorrelError};
use crate::variant::PerVariant;
use crate::weighting::builder::document_vector;
use crate::weighting::scheme::Scheme;
use crate::weighting::vector::TermVector;

/// Format version written into persisted stores.
const FORMAT_VERSION: u32 = 1;

/// The four per-scheme vector sets for one document, each holding one
/// vector per variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemeVectors {
    pub tf_idf: PerVariant<TermVector>,
    pub tf_idf_field: PerVariant<TermVector>,
    pub bm25_plus: PerVariant<TermVector>,
    pub bm25_plus_field: PerVariant<TermVector>,
}

impl SchemeVectors {
    /// The vector set for one scheme.
    pub fn get(&self, scheme: Scheme) -> &PerVariant<TermVector> {
        match scheme {
            Scheme::TfIdf => &self.tf_idf,
            Scheme::TfIdfField => &self.tf_idf_field,
            Scheme::Bm25Plus => &self.bm25_plus,
            Scheme::Bm25PlusField => &self.bm25_plus_field,
        }
    }
}

/// doc_id-indexed vectors for every document under every scheme and variant.
///
/// Built once per corpus load, or loaded from a previously saved file;
/// ranking behaves identically either way. Read-only while ranking;
/// regeneration replaces the store wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStore {
    version: u32,
    vectors: Vec<SchemeVectors>,
}

impl VectorStore {
    /// Build vectors for every document. Documents are independent and run
    /// in parallel; output order follows doc_id order regardless.
    pub fn build(corpus: &Corpus, config: &RankConfig) -> Result<VectorStore> {
        let vectors = corpus
            .documents()
            .par_iter()
            .map(|doc| {
                let catalog = corpus.catalog();
                let space = corpus.space();
                Ok(SchemeVectors {
                    tf_idf: document_vector(doc, Scheme::TfIdf, catalog, space, config)?,
                    tf_idf_field: document_vector(doc, Scheme::TfIdfField, catalog, space, config)?,
                    bm25_plus: document_vector(doc, Scheme::Bm25Plus, catalog, space, config)?,
                    bm25_plus_field: document_vector(
                        doc,
                        Scheme::Bm25PlusField,
                        catalog,
                        space,
                        config,
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        info!("built vector bundles for {} documents", vectors.len());
        Ok(Self {
            version: FORMAT_VERSION,
            vectors,
        })
    }

    /// The vector bundle for one document.
    pub fn get(&self, doc_id: u32) -> Option<&SchemeVectors> {
        self.vectors.get(doc_id as usize)
    }

    /// All vector bundles, indexed by doc_id.
    pub fn vectors(&self) -> &[SchemeVectors] {
        &self.vectors
    }

    /// Iterate `(doc_id, bundle)` pairs in doc_id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &SchemeVectors)> {
        self.vectors
            .iter()
            .enumerate()
            .map(|(id, bundle)| (id as u32, bundle))
    }

    /// Number of documents covered.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the store covers no documents.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Serialize to a versioned JSON file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        info!("saved vector store ({} documents) to {}", self.len(), path.display());
        Ok(())
    }

    /// Load a previously saved store; rejects mismatched format versions.
    pub fn load_from(path: &Path) -> Result<VectorStore> {
        let file = File::open(path)?;
        let store: VectorStore = serde_json::from_reader(BufReader::new(file))?;
        if store.version != FORMAT_VERSION {
            return Err(SorrelError::persistence(format!(
                "unsupported vector store format version {} (expected {FORMAT_VERSION})",
                store.version
            )));
        }
        info!("loaded vector store ({} documents) from {}", store.len(), path.display());
        Ok(store)
    }
}
