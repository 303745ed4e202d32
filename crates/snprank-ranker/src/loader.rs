//! GAIN matrix loader.
//!
//! The first record holds the SNP names; every following record is one
//! matrix row with exactly as many numeric fields as there are names.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use nalgebra::DMatrix;
use snprank_common::{Result, SnpRankError};
use tracing::debug;

use crate::gain::GainMatrix;

/// Parsing options for GAIN files.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Field delimiter (default: tab)
    pub delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { delimiter: b'\t' }
    }
}

/// Load a tab-separated GAIN matrix.
pub fn load_gain<R: Read>(reader: R) -> Result<GainMatrix> {
    load_gain_with(reader, &LoaderOptions::default())
}

/// Open and load a GAIN file. Failure to open maps to `InputFile`.
pub fn load_gain_file(path: impl AsRef<Path>) -> Result<GainMatrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SnpRankError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    load_gain(file)
}

/// Load a GAIN matrix with explicit options.
///
/// Tokens are trimmed. A token that is not a number, or a row whose width
/// differs from the header, fails the whole load. Squareness is left to the
/// engine.
pub fn load_gain_with<R: Read>(reader: R, options: &LoaderOptions) -> Result<GainMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(from_csv)?,
        None => {
            return Err(SnpRankError::Parse {
                line: 1,
                column: 0,
                message: "empty input, expected a header row of SNP names".to_string(),
            })
        }
    };
    let names: Vec<String> = header.iter().map(str::to_string).collect();
    let width = names.len();

    let mut values = Vec::new();
    let mut rows = 0usize;
    for record in records {
        let record = record.map_err(from_csv)?;
        let line = record.position().map_or(0, csv::Position::line);

        if record.len() != width {
            return Err(SnpRankError::Parse {
                line,
                column: record.len().min(width) + 1,
                message: format!("expected {width} fields, found {}", record.len()),
            });
        }

        for (col, token) in record.iter().enumerate() {
            let value = token.parse::<f64>().map_err(|_| SnpRankError::Parse {
                line,
                column: col + 1,
                message: format!("'{token}' is not a number"),
            })?;
            values.push(value);
        }
        rows += 1;
    }

    debug!("Loaded GAIN matrix: {} SNPs, {} rows", width, rows);
    Ok(GainMatrix::new(names, DMatrix::from_row_slice(rows, width, &values)))
}

fn from_csv(err: csv::Error) -> SnpRankError {
    let line = err.position().map_or(0, csv::Position::line);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => SnpRankError::Io(source),
        _ => SnpRankError::Parse {
            line,
            column: 0,
            message,
        },
    }
}
