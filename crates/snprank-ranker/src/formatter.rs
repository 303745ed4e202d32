//! Result rows: pairing, sorting and serialization.

use std::io::Write;

use snprank_common::{RankedSnp, Result, SnpRankError};
use snprank_config::OutputFormat;

/// Header of the tab-separated output.
pub const TSV_HEADER: [&str; 3] = ["SNP", "SNPrank", "IG"];

/// Zip names, scores and main effects into rows sorted by score, highest first.
/// The sort is stable, so equal scores keep their input order.
pub fn rank_rows(names: &[String], scores: &[f64], diagonal: &[f64]) -> Result<Vec<RankedSnp>> {
    if names.len() != scores.len() || names.len() != diagonal.len() {
        return Err(SnpRankError::InvalidInput(format!(
            "length mismatch: {} names, {} scores, {} diagonal values",
            names.len(),
            scores.len(),
            diagonal.len()
        )));
    }

    let mut rows: Vec<RankedSnp> = names
        .iter()
        .zip(scores)
        .zip(diagonal)
        .map(|((name, &score), &ig)| RankedSnp::new(name.clone(), score, ig))
        .collect();
    rows.sort_by(|a, b| b.rank.total_cmp(&a.rank));
    Ok(rows)
}

/// Write `SNP\tSNPrank\tIG` followed by one row per SNP, numbers at 6 decimals.
pub fn write_tsv<W: Write>(rows: &[RankedSnp], writer: W) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    out.write_record(TSV_HEADER).map_err(from_csv)?;
    for row in rows {
        let rank = format!("{:.6}", row.rank);
        let ig = format!("{:.6}", row.information_gain);
        out.write_record([row.snp.as_str(), rank.as_str(), ig.as_str()])
            .map_err(from_csv)?;
    }
    out.flush()?;
    Ok(())
}

/// Write rows as a pretty-printed JSON array.
pub fn write_json<W: Write>(rows: &[RankedSnp], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_rows<W: Write>(rows: &[RankedSnp], format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Tsv => write_tsv(rows, writer),
        OutputFormat::Json => write_json(rows, writer),
    }
}

fn from_csv(err: csv::Error) -> SnpRankError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => SnpRankError::Io(source),
        _ => SnpRankError::InvalidInput(message),
    }
}
