//! In-memory GAIN matrix.

use nalgebra::DMatrix;

/// Pairwise interaction matrix with SNP labels.
/// `values[(i, j)]` is the gain between SNP i and SNP j; the diagonal holds main effects.
#[derive(Debug, Clone, PartialEq)]
pub struct GainMatrix {
    pub names: Vec<String>,
    pub values: DMatrix<f64>,
}

impl GainMatrix {
    pub fn new(names: Vec<String>, values: DMatrix<f64>) -> Self {
        Self { names, values }
    }

    /// Build from row-major nested vectors. Rows must all have `names.len()` entries.
    pub fn from_rows(names: &[&str], rows: &[Vec<f64>]) -> Self {
        let ncols = names.len();
        let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            values: DMatrix::from_row_slice(rows.len(), ncols, &flat),
        }
    }

    /// Number of SNPs named in the header.
    pub fn dimension(&self) -> usize {
        self.names.len()
    }

    pub fn is_square(&self) -> bool {
        self.values.is_square()
    }

    /// Main effects, one per SNP. Only meaningful for square matrices.
    pub fn diagonal(&self) -> Vec<f64> {
        self.values.diagonal().iter().copied().collect()
    }
}
