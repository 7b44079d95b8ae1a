//! Corpus data model: documents, term statistics, and the vector space.

pub mod catalog;
pub mod document;
pub mod space;

pub use catalog::{TermCatalog, TermStats};
pub use document::{DocMetadata, Document, ENTITY_TAG, QUERY_TAG, Query, TagCounts, TermTable};
pub use space::VectorSpace;

use crate::error::{Result, SorrelError};

/// A fixed, fully loaded corpus together with its aggregate statistics.
///
/// Constructed once by the application entry point and passed by reference
/// into vectorization and ranking; there is no global corpus state.
#[derive(Debug)]
pub struct Corpus {
    documents: Vec<Document>,
    catalog: TermCatalog,
    space: VectorSpace,
}

impl Corpus {
    /// Build a corpus from loader output.
    ///
    /// Documents must arrive in `doc_id` order starting at zero; the id
    /// doubles as the array index everywhere downstream.
    pub fn from_documents(documents: Vec<Document>) -> Result<Self> {
        let mut catalog = TermCatalog::new();
        for (index, doc) in documents.iter().enumerate() {
            if doc.metadata().doc_id as usize != index {
                return Err(SorrelError::invalid_argument(format!(
                    "document at position {index} carries doc_id {}",
                    doc.metadata().doc_id
                )));
            }
            catalog.record_document(doc);
        }
        let space = VectorSpace::from_catalog(&catalog);
        Ok(Self {
            documents,
            catalog,
            space,
        })
    }

    /// All documents, indexable by `doc_id`.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The document with the given id, if any.
    pub fn document(&self, doc_id: u32) -> Option<&Document> {
        self.documents.get(doc_id as usize)
    }

    /// The term catalog.
    pub fn catalog(&self) -> &TermCatalog {
        &self.catalog
    }

    pub(crate) fn catalog_mut(&mut self) -> &mut TermCatalog {
        &mut self.catalog
    }

    /// The vector space.
    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
