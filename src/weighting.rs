//! Term weighting: schemes, sparse vectors, and vector construction.

pub mod builder;
pub mod scheme;
pub mod vector;

pub use builder::{document_vector, query_vector};
pub use scheme::{Scheme, tag_weight, weighted_count};
pub use vector::{TermVector, UnnormalizedVector};
