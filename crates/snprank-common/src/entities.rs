//! Result entities produced by the ranking pipeline.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ranked SNP
// ---------------------------------------------------------------------------

/// One output row: a SNP, its SNPrank score and its main effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSnp {
    pub snp: String,
    pub rank: f64,
    /// Diagonal of the GAIN matrix (information gain of the SNP alone)
    pub information_gain: f64,
}

impl RankedSnp {
    pub fn new(snp: impl Into<String>, rank: f64, information_gain: f64) -> Self {
        Self {
            snp: snp.into(),
            rank,
            information_gain,
        }
    }
}
