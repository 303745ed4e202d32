//! snprank-common: Shared error taxonomy and result types used across all SNPrank crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::RankedSnp;
pub use error::{Result, SnpRankError};
