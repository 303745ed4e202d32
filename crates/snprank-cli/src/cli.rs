//! Command-line arguments and their merge with `snprank.toml`.

use std::path::PathBuf;

use clap::Parser;
use snprank_common::Result;
use snprank_config::{BackendKind, OutputFormat, SnpRankConfig};

#[derive(Debug, Parser)]
#[command(
    name = "snprank",
    version,
    about = "Rank SNPs of a GAIN matrix by SNPrank score",
    long_about = "Reads a tab-separated GAIN matrix (header row of SNP names, then one numeric \
                  row per SNP) and prints SNP, SNPrank score and information gain, sorted by \
                  descending SNPrank."
)]
pub struct Cli {
    /// Read data from INFILE (default: stdin)
    #[arg(short, long, value_name = "INFILE")]
    pub input: Option<PathBuf>,

    /// Write results to OUTFILE (default: stdout)
    #[arg(short, long, value_name = "OUTFILE")]
    pub output: Option<PathBuf>,

    /// Damping factor (default: 0.85)
    #[arg(short, long)]
    pub gamma: Option<f64>,

    /// Use the accelerated matrix backend
    #[arg(short = 'n', long)]
    pub gpu: bool,

    /// Give up after N power iterations (default: iterate until converged)
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Output format: tsv or json
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Config file (default: $SNPRANK_CONFIG, then ./snprank.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Load the config file, then apply command-line overrides.
    pub fn resolve_config(&self) -> Result<SnpRankConfig> {
        let base = match &self.config {
            Some(path) => SnpRankConfig::from_path(path)?,
            None => SnpRankConfig::load()?,
        };
        self.apply_overrides(base)
    }

    pub fn apply_overrides(&self, mut config: SnpRankConfig) -> Result<SnpRankConfig> {
        if let Some(gamma) = self.gamma {
            config.ranking.gamma = gamma;
        }
        if let Some(max) = self.max_iterations {
            config.ranking.max_iterations = Some(max);
        }
        if self.gpu {
            config.backend.kind = BackendKind::Accelerated;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        config.validate()?;
        Ok(config)
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "snprank=warn,warn",
            1 => "snprank=info,warn",
            2 => "snprank=debug,info",
            _ => "snprank=trace,info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("snprank").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
        assert!(!cli.gpu);
        let config = cli.apply_overrides(SnpRankConfig::default()).unwrap();
        assert_eq!(config, SnpRankConfig::default());
    }

    #[test]
    fn test_short_flags() {
        let cli = parse(&["-i", "gain.txt", "-o", "ranks.txt", "-g", "0.5", "-n"]);
        assert_eq!(cli.input, Some(PathBuf::from("gain.txt")));
        assert_eq!(cli.output, Some(PathBuf::from("ranks.txt")));
        assert_eq!(cli.gamma, Some(0.5));
        assert!(cli.gpu);
    }

    #[test]
    fn test_overrides_win_over_config() {
        let cli = parse(&["--gamma", "0.6", "--max-iterations", "500", "--format", "json", "--gpu"]);
        let config = cli.apply_overrides(SnpRankConfig::default()).unwrap();
        assert_eq!(config.ranking.gamma, 0.6);
        assert_eq!(config.ranking.max_iterations, Some(500));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.backend.kind, BackendKind::Accelerated);
    }

    #[test]
    fn test_config_values_kept_without_flags() {
        let mut base = SnpRankConfig::default();
        base.ranking.gamma = 0.7;
        let config = parse(&[]).apply_overrides(base).unwrap();
        assert_eq!(config.ranking.gamma, 0.7);
    }

    #[test]
    fn test_zero_max_iterations_rejected() {
        let cli = parse(&["--max-iterations", "0"]);
        assert!(cli.apply_overrides(SnpRankConfig::default()).is_err());
    }

    #[test]
    fn test_bad_format_rejected_by_parser() {
        let result = Cli::try_parse_from(["snprank", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_filters() {
        assert_eq!(parse(&[]).log_filter(), "snprank=warn,warn");
        assert_eq!(parse(&["-vv"]).log_filter(), "snprank=debug,info");
    }
}
