//! Entry point for the `snprank` binary.

mod cli;

use std::fs::File;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use snprank_common::SnpRankError;
use snprank_ranker::engine::RankEngine;
use snprank_ranker::{formatter, pipeline};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the ranking.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            let missing_file = e
                .downcast_ref::<SnpRankError>()
                .is_some_and(SnpRankError::is_not_found);
            if missing_file {
                eprintln!("{}", Cli::command().render_help());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    let engine = RankEngine::from_config(&config)?;
    debug!("Engine: {:?}", engine);

    let input: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(File::open(path).map_err(|source| SnpRankError::InputFile {
            path: path.clone(),
            source,
        })?),
        None => Box::new(io::stdin().lock()),
    };

    // Open the destination before ranking, but only write once every row is ready.
    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path).map_err(|source| SnpRankError::OutputFile {
            path: path.clone(),
            source,
        })?),
        None => Box::new(io::stdout().lock()),
    };

    let rows = pipeline::rank_gain(input, &engine)?;

    let mut rendered = Vec::new();
    formatter::write_rows(&rows, config.output.format, &mut rendered)?;
    output.write_all(&rendered)?;
    output.flush()?;

    info!("Wrote {} ranked SNPs", rows.len());
    Ok(())
}
