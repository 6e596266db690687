//! CLI for the guardmark benchmark suite.
//!
//! Two benchmark subcommands mirror the two measurement pipelines
//! (`guardrail` and `pii`), and `replay` re-renders a previously exported
//! run without touching the network. All setup failures abort with a
//! nonzero exit before anything is invoked; once the timed loop starts,
//! per-call failures are recorded instead of raised.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod progress;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use guardmark_bench::{NullProgress, ProgressSink, Runner};
use guardmark_client::{LiveInvoker, ModelClient};
use guardmark_detector::PiiDetector;
use guardmark_report::{read_export, render, write_export};
use guardmark_stats::analyze;

use crate::config::{resolve, Preset, GUARDRAIL_PRESET, PII_PRESET};
use crate::progress::BarProgress;

/// Environment variable carrying an optional bearer token for the backend.
const BEARER_TOKEN_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// Environment variable controlling log verbosity.
const LOG_ENV: &str = "GUARDMARK_LOG";

/// Measure the latency overhead of LLM guardrails.
#[derive(Parser, Debug)]
#[command(name = "guardmark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Benchmark baseline vs guardrail latency on the general prompt set.
    Guardrail(SharedArgs),
    /// Compare baseline, guardrail, and the local regex PII filter on the
    /// PII prompt set.
    Pii(SharedArgs),
    /// Re-analyze and re-render a previously exported run.
    Replay {
        /// Path of a JSON export written by a benchmark subcommand.
        file: PathBuf,
    },
}

/// Flags shared by the benchmark subcommands.
#[derive(Args, Debug)]
pub struct SharedArgs {
    /// AWS region the endpoint lives in. Defaults to us-east-1.
    #[arg(long, env = "GUARDMARK_REGION")]
    pub region: Option<String>,

    /// Model identifier to invoke. Defaults to amazon.nova-pro-v1:0.
    #[arg(long, env = "GUARDMARK_MODEL_ID")]
    pub model_id: Option<String>,

    /// Endpoint override, e.g. a local mock server.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Guardrail identifier. Required when the guardrail variant runs.
    #[arg(long, env = "GUARDMARK_GUARDRAIL_ID")]
    pub guardrail_id: Option<String>,

    /// Guardrail version. Defaults to 1.
    #[arg(long, env = "GUARDMARK_GUARDRAIL_VERSION")]
    pub guardrail_version: Option<String>,

    /// Timed calls per prompt and variant. Defaults to 3.
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Prompt file (one prompt per line, # for comments) replacing the
    /// built-in set.
    #[arg(long, value_name = "FILE")]
    pub prompts: Option<PathBuf>,

    /// Where to write the JSON export.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Skip the unrecorded warm-up call per variant.
    #[arg(long)]
    pub no_warmup: bool,

    /// Suppress the progress bar.
    #[arg(long)]
    pub quiet: bool,

    /// TOML config file; its values fill in for unset flags.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Parse arguments and run the selected command.
pub fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Guardrail(args) => benchmark(&GUARDRAIL_PRESET, &args),
        Commands::Pii(args) => benchmark(&PII_PRESET, &args),
        Commands::Replay { file } => replay(&file),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn benchmark(preset: &Preset, args: &SharedArgs) -> Result<()> {
    let resolved = resolve(preset, args)?;
    let bearer_token = std::env::var(BEARER_TOKEN_ENV).ok();

    let detector = PiiDetector::new()?;
    let client = ModelClient::new(&resolved.config, bearer_token)?;
    let invoker = LiveInvoker::new(client, detector, resolved.config.guardrail.clone());
    let runner = Runner::new(invoker);

    let progress: Box<dyn ProgressSink> = if args.quiet {
        Box::new(NullProgress)
    } else {
        Box::new(BarProgress::new(resolved.config.total_calls() as u64))
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    let run = runtime.block_on(runner.run(resolved.config, progress.as_ref()))?;

    let analysis = analyze(&run);
    println!("{}", render(&run, &analysis));

    write_export(&run, &resolved.out)?;
    println!("Results exported to {}", resolved.out.display());
    Ok(())
}

fn replay(file: &Path) -> Result<()> {
    let run = read_export(file)?;
    let analysis = analyze(&run);
    println!("{}", render(&run, &analysis));
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_guardrail_subcommand_parses() {
        let cli = Cli::try_parse_from([
            "guardmark",
            "guardrail",
            "--guardrail-id",
            "gr-abc123",
            "--iterations",
            "5",
            "--no-warmup",
        ])
        .unwrap();

        match cli.command {
            Commands::Guardrail(args) => {
                assert_eq!(args.guardrail_id.as_deref(), Some("gr-abc123"));
                assert_eq!(args.iterations, Some(5));
                assert!(args.no_warmup);
                assert!(!args.quiet);
                assert_eq!(args.region, None);
            }
            other => panic!("expected guardrail subcommand, got {other:?}"),
        }
    }

    #[test]
    fn test_replay_subcommand_takes_a_file() {
        let cli = Cli::try_parse_from(["guardmark", "replay", "results.json"]).unwrap();
        match cli.command {
            Commands::Replay { file } => {
                assert_eq!(file, PathBuf::from("results.json"));
            }
            other => panic!("expected replay subcommand, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["guardmark"]).is_err());
    }
}
