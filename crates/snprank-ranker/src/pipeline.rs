//! Loader → engine → formatter in one call.

use std::io::Read;

use snprank_common::RankedSnp;
use snprank_common::Result;

use crate::engine::RankEngine;
use crate::formatter;
use crate::loader;

/// Load a GAIN matrix from `reader`, rank it, and return the sorted rows.
pub fn rank_gain<R: Read>(reader: R, engine: &RankEngine) -> Result<Vec<RankedSnp>> {
    let gain = loader::load_gain(reader)?;
    let outcome = engine.rank(&gain.values)?;
    formatter::rank_rows(&gain.names, &outcome.scores, &outcome.diagonal)
}
