//! Exit status and I/O behaviour of the `snprank` binary.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use snprank_test_utils::{four_snp_fixture, gain_tsv, symmetric_pair};
use tempfile::TempDir;

fn snprank(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_snprank"));
    cmd.current_dir(dir.path())
        .env_remove("SNPRANK_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_file_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let (names, rows) = symmetric_pair();
    fs::write(dir.path().join("gain.txt"), gain_tsv(&names, &rows)).unwrap();

    let status = snprank(&dir)
        .args(["-i", "gain.txt", "-o", "ranks.txt"])
        .status()
        .unwrap();
    assert!(status.success());

    let written = fs::read_to_string(dir.path().join("ranks.txt")).unwrap();
    assert_eq!(
        written,
        "SNP\tSNPrank\tIG\nS1\t0.500000\t2.000000\nS2\t0.500000\t2.000000\n"
    );
}

#[test]
fn test_stdin_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let (names, rows) = four_snp_fixture();
    let output = run_with_stdin(snprank(&dir), &gain_tsv(&names, &rows));
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "SNP\tSNPrank\tIG");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_missing_input_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = snprank(&dir).args(["-i", "missing.txt"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Input file could not be opened"), "{stderr}");
    assert!(stderr.contains("Usage"), "{stderr}");
}

#[test]
fn test_unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (names, rows) = symmetric_pair();
    fs::write(dir.path().join("gain.txt"), gain_tsv(&names, &rows)).unwrap();

    let output = snprank(&dir)
        .args(["-i", "gain.txt", "-o", "no/such/dir/ranks.txt"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Output file could not be opened"), "{stderr}");
}

#[test]
fn test_non_square_exits_non_zero_without_rows() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(snprank(&dir), "a\tb\tc\n1\t2\t3\n4\t5\t6\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("not an NxN matrix"), "{stderr}");
}

#[test]
fn test_zero_trace_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_stdin(snprank(&dir), "a\tb\n0\t1\n1\t0\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_json_format() {
    let dir = tempfile::tempdir().unwrap();
    let (names, rows) = symmetric_pair();
    let mut cmd = snprank(&dir);
    cmd.args(["--format", "json"]);
    let output = run_with_stdin(cmd, &gain_tsv(&names, &rows));
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.trim_start().starts_with('['));
    assert!(stdout.contains("\"information_gain\": 2.0"));
}

#[test]
fn test_config_file_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("snprank.toml"), "[output]\nformat = \"json\"\n").unwrap();
    let (names, rows) = symmetric_pair();
    let output = run_with_stdin(snprank(&dir), &gain_tsv(&names, &rows));
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.trim_start().starts_with('['));
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = snprank(&dir).arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().starts_with("snprank"));
}
