//! snprank-ranker: SNP prioritization by damped power iteration over a GAIN matrix.
//!
//! Pipeline: [`loader`] parses the tab-separated matrix, [`engine`] computes
//! the SNPrank scores, [`formatter`] sorts and serializes the result rows.
//!
//! # Example
//! ```rust
//! use snprank_ranker::{engine::RankEngine, pipeline};
//!
//! let input = "rs1\trs2\n2\t1\n1\t2\n";
//! let rows = pipeline::rank_gain(input.as_bytes(), &RankEngine::default()).unwrap();
//! assert_eq!(rows.len(), 2);
//! assert!((rows[0].rank - 0.5).abs() < 1e-9);
//! ```

pub mod backend;
pub mod engine;
pub mod formatter;
pub mod gain;
pub mod loader;
pub mod pipeline;

pub use engine::{rank, RankEngine, RankOutcome};
pub use gain::GainMatrix;
