//! Shared GAIN-matrix fixtures for tests across the SNPrank workspace.

pub use pretty_assertions;

/// Tolerance used when comparing rank scores.
pub const RANK_TOLERANCE: f64 = 1e-6;

/// Render names and rows as the tab-separated GAIN format the loader reads.
pub fn gain_tsv(names: &[&str], rows: &[Vec<f64>]) -> String {
    let mut out = names.join("\t");
    out.push('\n');
    for row in rows {
        let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&fields.join("\t"));
        out.push('\n');
    }
    out
}

/// Two SNPs with identical main effects and a symmetric interaction.
/// Both must rank at 0.5.
pub fn symmetric_pair() -> (Vec<&'static str>, Vec<Vec<f64>>) {
    (vec!["S1", "S2"], vec![vec![2.0, 1.0], vec![1.0, 2.0]])
}

/// Three SNPs where the last column sums to exactly zero (a dangling column).
pub fn chain_with_dangling() -> (Vec<&'static str>, Vec<Vec<f64>>) {
    (
        vec!["rs1", "rs2", "rs3"],
        vec![
            vec![1.0, 0.5, 0.0],
            vec![0.5, 2.0, 0.0],
            vec![0.25, 0.0, 0.0],
        ],
    )
}

/// A small asymmetric interaction network with distinct main effects.
pub fn four_snp_fixture() -> (Vec<&'static str>, Vec<Vec<f64>>) {
    (
        vec!["rs1000", "rs2000", "rs3000", "rs4000"],
        vec![
            vec![0.40, 0.10, 0.05, 0.00],
            vec![0.10, 0.20, 0.02, 0.01],
            vec![0.05, 0.02, 0.60, 0.15],
            vec![0.00, 0.01, 0.15, 0.05],
        ],
    )
}

/// Assert two float slices agree elementwise within `tol`.
pub fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tol,
            "index {i}: {a} differs from {e} by more than {tol}"
        );
    }
}
