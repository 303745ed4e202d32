//! SNPrank rank engine.
//!
//! Builds the transition matrix
//!
//! ```text
//! T = gamma * (G · D) + (diag(G) ⊗ T_nz) / trace(G)
//! ```
//!
//! where `D` holds reciprocal column sums and `T_nz` the per-column damping
//! mass, then runs L1-normalized power iteration from the uniform vector until
//! no entry moves by `CONVERGENCE_THRESHOLD` or more.
//!
//! Columns that sum to exactly zero are dangling: their `D` entry is 0 and
//! they are not damped (`T_nz = 1`). The comparison is exact, not epsilon based.

use nalgebra::{DMatrix, DVector};
use snprank_common::{Result, SnpRankError};
use snprank_config::SnpRankConfig;
use tracing::{debug, info, trace, warn};

use crate::backend::{self, CpuBackend, MatMulBackend};
use crate::gain::GainMatrix;

/// Damping factor used when none is configured.
pub const DEFAULT_GAMMA: f64 = 0.85;

/// Elementwise absolute tolerance between successive rank vectors.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Result of a rank computation.
#[derive(Debug, Clone)]
pub struct RankOutcome {
    /// SNPrank score per SNP, in input order. Sums to 1.
    pub scores: Vec<f64>,
    /// Main effects (diagonal of G), in input order
    pub diagonal: Vec<f64>,
    /// Number of power iterations performed
    pub iterations: usize,
    /// Final max elementwise change
    pub delta: f64,
    /// False only when iteration stopped on a non-finite rank vector
    pub converged: bool,
}

impl RankOutcome {
    /// The `(scores, diagonal)` pair.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.scores, self.diagonal)
    }
}

/// Damped power-iteration ranker.
pub struct RankEngine {
    gamma: f64,
    max_iterations: Option<usize>,
    backend: Box<dyn MatMulBackend>,
}

impl Default for RankEngine {
    fn default() -> Self {
        Self::new(DEFAULT_GAMMA)
    }
}

impl std::fmt::Debug for RankEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankEngine")
            .field("gamma", &self.gamma)
            .field("max_iterations", &self.max_iterations)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl RankEngine {
    /// Engine with the CPU backend and no iteration cap.
    pub fn new(gamma: f64) -> Self {
        Self {
            gamma,
            max_iterations: None,
            backend: Box::new(CpuBackend),
        }
    }

    /// Build an engine from loaded configuration.
    pub fn from_config(config: &SnpRankConfig) -> Result<Self> {
        let backend = backend::select(config.backend.kind)?;
        Ok(Self {
            gamma: config.ranking.gamma,
            max_iterations: config.ranking.max_iterations,
            backend,
        })
    }

    /// Stop with `NotConverged` after `max_iterations` iterations.
    ///
    /// Without a cap the engine iterates until convergence, which may never
    /// happen for a pathological transition matrix.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_backend(mut self, backend: Box<dyn MatMulBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn max_iterations(&self) -> Option<usize> {
        self.max_iterations
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Rank the SNPs of a square GAIN matrix.
    pub fn rank(&self, gain: &DMatrix<f64>) -> Result<RankOutcome> {
        let n = gain.nrows();
        info!(
            "Ranking {} SNPs (gamma = {}, backend = {})",
            n,
            self.gamma,
            self.backend.name()
        );

        let transition = transition_matrix(gain, self.gamma, self.backend.as_ref())?;

        let mut r = DVector::from_element(n, 1.0 / n as f64);
        let mut iterations = 0usize;

        loop {
            let mut next = &transition * &r;
            let total = next.sum();
            next /= total;
            iterations += 1;

            if next.iter().any(|v| !v.is_finite()) {
                warn!(
                    "Rank vector became non-finite at iteration {}; stopping",
                    iterations
                );
                return Ok(RankOutcome {
                    scores: next.iter().copied().collect(),
                    diagonal: gain.diagonal().iter().copied().collect(),
                    iterations,
                    delta: f64::NAN,
                    converged: false,
                });
            }

            let delta = max_abs_diff(&next, &r);
            trace!(iteration = iterations, delta, "power iteration");
            r = next;

            if delta < CONVERGENCE_THRESHOLD {
                info!("Converged after {} iterations (delta {:e})", iterations, delta);
                return Ok(RankOutcome {
                    scores: r.iter().copied().collect(),
                    diagonal: gain.diagonal().iter().copied().collect(),
                    iterations,
                    delta,
                    converged: true,
                });
            }

            if let Some(cap) = self.max_iterations {
                if iterations >= cap {
                    return Err(SnpRankError::NotConverged { iterations, delta });
                }
            }
        }
    }
}

/// Rank a loaded GAIN matrix with the CPU backend.
/// Returns the scores and the diagonal, both in input order.
pub fn rank(gain: &GainMatrix, gamma: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    RankEngine::new(gamma).rank(&gain.values).map(RankOutcome::into_parts)
}

/// `colsum[j] = Σ_i G[i][j]`
pub fn column_sums(gain: &DMatrix<f64>) -> DVector<f64> {
    DVector::from_iterator(gain.ncols(), gain.column_iter().map(|c| c.sum()))
}

/// Diagonal matrix of reciprocal column sums; 0 for dangling columns.
pub fn degree_normalization(colsum: &DVector<f64>) -> DMatrix<f64> {
    DMatrix::from_diagonal(&colsum.map(|s| if s == 0.0 { 0.0 } else { 1.0 / s }))
}

/// Per-column damping mass: `1 - gamma`, or 1 for dangling columns.
pub fn damping_vector(colsum: &DVector<f64>, gamma: f64) -> DVector<f64> {
    colsum.map(|s| if s == 0.0 { 1.0 } else { 1.0 - gamma })
}

/// Assemble the transition matrix T.
pub fn transition_matrix(
    gain: &DMatrix<f64>,
    gamma: f64,
    backend: &dyn MatMulBackend,
) -> Result<DMatrix<f64>> {
    if !gain.is_square() {
        return Err(SnpRankError::Shape {
            rows: gain.nrows(),
            cols: gain.ncols(),
        });
    }

    let colsum = column_sums(gain);
    let dangling = colsum.iter().filter(|&&s| s == 0.0).count();
    debug!("{} of {} columns are dangling", dangling, colsum.len());

    let trace = gain.trace();
    if trace == 0.0 {
        return Err(SnpRankError::Arithmetic(
            "trace of the GAIN matrix is zero; main-effect term would divide by zero".to_string(),
        ));
    }

    let d = degree_normalization(&colsum);
    let t_nz = damping_vector(&colsum, gamma);

    let gd = backend.multiply(gain, &d)?;
    let teleport = (gain.diagonal() * t_nz.transpose()) / trace;

    Ok(gd * gamma + teleport)
}

fn max_abs_diff(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
