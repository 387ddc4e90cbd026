#![allow(clippy::doc_markdown)]
//! `tablestats` CLI - column statistics for large CSV/TSV files
//!
//! Usage:
//!   `tablestats analyze data.csv`
//!   `tablestats analyze large.tsv --sample-size 5000 --positions 10`
//!   `tablestats analyze data.csv --confidence 0.99 --format json`
//!   `tablestats generate --rows 1000000 --output big_data.csv`

mod generate;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tablestats_core::{LoggingConfig, SamplingConfig, StatsGenerator, TableStatsConfig};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::report::OutputFormat;

const DEFAULT_CONFIG_FILE: &str = "tablestats.toml";

#[derive(Parser)]
#[command(name = "tablestats")]
#[command(
    author,
    version,
    about = "tablestats - column statistics for CSV/TSV files, sampled when large"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true, env = "TABLESTATS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV or TSV file
    Analyze {
        /// Input file (.csv or .tsv)
        file: PathBuf,

        /// Number of rows to sample
        #[arg(short = 's', long)]
        sample_size: Option<usize>,

        /// Number of random positions
        #[arg(short = 'p', long)]
        positions: Option<usize>,

        /// Confidence level (0-1)
        #[arg(short = 'c', long)]
        confidence: Option<f64>,

        /// Max file size for full processing (bytes)
        #[arg(short = 'm', long)]
        max_size: Option<u64>,

        /// Seed for deterministic sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate a synthetic CSV/TSV file for testing
    Generate {
        /// Number of rows to generate
        #[arg(short, long, default_value = "1000000")]
        rows: usize,

        /// Output file (.tsv writes tab-separated)
        #[arg(short, long, default_value = "big_data.csv")]
        output: PathBuf,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

/// Flag overrides applied on top of the loaded configuration.
#[derive(Debug, Default)]
struct SamplingOverrides {
    sample_size: Option<usize>,
    positions: Option<usize>,
    confidence: Option<f64>,
    max_size: Option<u64>,
}

impl SamplingOverrides {
    fn apply(self, mut config: SamplingConfig) -> SamplingConfig {
        if let Some(v) = self.sample_size {
            config.sample_size = v;
        }
        if let Some(v) = self.positions {
            config.random_positions = v;
        }
        if let Some(v) = self.confidence {
            config.confidence = v;
        }
        if let Some(v) = self.max_size {
            config.max_file_size = v;
        }
        config
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Loads the layered configuration and checks its logging section. Sampling is
/// checked later, after flag overrides, and only by `analyze`.
fn load_config(path: Option<&Path>) -> Result<TableStatsConfig> {
    let config = TableStatsConfig::load_from_path(path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE)))
        .context("Failed to load configuration")?;
    config.logging.validate()?;
    Ok(config)
}

fn log_level(logging: &LoggingConfig, verbose: bool) -> &str {
    if verbose {
        "debug"
    } else {
        &logging.level
    }
}

fn run_analyze(
    file: &Path,
    sampling: SamplingConfig,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    sampling.validate()?;

    std::fs::metadata(file)
        .with_context(|| format!("cannot access file '{}'", file.display()))?;

    let start = Instant::now();
    let mut generator = StatsGenerator::for_path(file, sampling, seed)?;
    let stats = generator
        .generate_stats(file)
        .with_context(|| format!("Error processing file '{}'", file.display()))?;
    info!(elapsed = ?start.elapsed(), "process time");

    print!("{}", report::render(&stats, format)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Analyze {
            file,
            sample_size,
            positions,
            confidence,
            max_size,
            seed,
            format,
        } => {
            let config = loaded?;
            init_logging(log_level(&config.logging, cli.verbose));

            let sampling = SamplingOverrides {
                sample_size,
                positions,
                confidence,
                max_size,
            }
            .apply(config.sampling);
            run_analyze(&file, sampling, seed.or(config.reader.seed), format)?;
        }
        Commands::Generate {
            rows,
            output,
            seed,
            no_progress,
        } => {
            // Generation reads no settings; a bad config file only costs the log level.
            match loaded {
                Ok(config) => init_logging(log_level(&config.logging, cli.verbose)),
                Err(err) => {
                    init_logging(log_level(&LoggingConfig::default(), cli.verbose));
                    warn!("ignoring configuration for generate: {err:#}");
                }
            }

            let gen_config = generate::GenerateConfig {
                rows,
                output,
                seed,
                show_progress: !no_progress,
            };
            println!("Generating {} rows into {}", rows, gen_config.output.display());
            let stats = generate::generate(&gen_config)?;
            generate::print_summary(&gen_config, &stats);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let base = SamplingConfig::default();
        let overrides = SamplingOverrides {
            sample_size: Some(10),
            max_size: Some(2048),
            ..Default::default()
        };

        let merged = overrides.apply(base);

        assert_eq!(merged.sample_size, 10);
        assert_eq!(merged.max_file_size, 2048);
        assert_eq!(merged.random_positions, base.random_positions);
        assert!((merged.confidence - base.confidence).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cli_parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "tablestats",
            "analyze",
            "data.csv",
            "-s",
            "500",
            "-p",
            "10",
            "-c",
            "0.99",
            "-m",
            "1024",
            "--format",
            "json",
            "-v",
        ])
        .expect("parse");

        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze {
                file,
                sample_size,
                positions,
                confidence,
                max_size,
                format,
                ..
            } => {
                assert_eq!(file, PathBuf::from("data.csv"));
                assert_eq!(sample_size, Some(500));
                assert_eq!(positions, Some(10));
                assert_eq!(confidence, Some(0.99));
                assert_eq!(max_size, Some(1024));
                assert_eq!(format, OutputFormat::Json);
            }
            Commands::Generate { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_verbose_overrides_configured_level() {
        let logging = LoggingConfig {
            level: "error".to_string(),
        };

        assert_eq!(log_level(&logging, false), "error");
        assert_eq!(log_level(&logging, true), "debug");
    }

    #[test]
    fn test_load_config_rejects_unknown_level() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("tablestats.toml");
        std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").expect("write");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
