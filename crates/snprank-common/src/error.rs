use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnpRankError {
    #[error("Input file could not be opened: {} ({source})", path.display())]
    InputFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Output file could not be opened: {} ({source})", path.display())]
    OutputFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Input is not an NxN matrix: got {rows}x{cols}")]
    Shape { rows: usize, cols: usize },

    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: u64,
        column: usize,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rank vector did not converge after {iterations} iterations (delta {delta:e})")]
    NotConverged { iterations: usize, delta: f64 },

    #[error("Matrix backend error: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SnpRankError {
    /// True when the failure is a missing input or output path.
    /// The CLI prints usage help for these.
    pub fn is_not_found(&self) -> bool {
        match self {
            SnpRankError::InputFile { source, .. } | SnpRankError::OutputFile { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SnpRankError>;
