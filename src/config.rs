//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tunable parameters for weighting, ranking, and query refinement.
///
/// Defaults: BM25+ with k1 = 1.2 and b = 0.75, top-10 result lists, a fixed
/// +0.25 increment per expanded term, Rocchio beta of 0.75, and spelling
/// correction within two edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    /// BM25+ term-frequency saturation parameter.
    pub k1: f64,
    /// BM25+ length-normalization strength.
    pub b: f64,
    /// Maximum number of ranked results returned.
    pub top_k: usize,
    /// Weight increment added to each related term during query expansion.
    pub expansion_weight: f64,
    /// Rocchio beta applied to relevance-feedback weights.
    pub feedback_beta: f64,
    /// An out-of-vocabulary token is corrected only when its distance to the
    /// nearest vocabulary word is strictly below this.
    pub max_edit_distance: u32,
    /// Number of co-occurring terms precomputed per vocabulary term.
    pub related_terms: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            k1: 1.2,
            b: 0.75,
            top_k: 10,
            expansion_weight: 0.25,
            feedback_beta: 0.75,
            max_edit_distance: 3,
            related_terms: 2,
        }
    }
}
