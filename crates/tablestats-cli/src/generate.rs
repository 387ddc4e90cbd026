//! Synthetic employee-table generator for exercising `tablestats analyze`.

use anyhow::{Context, Result};
use colored::Colorize;
use csv::WriterBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

const HEADER: [&str; 10] = [
    "id",
    "name",
    "email",
    "age",
    "salary",
    "department",
    "join_date",
    "active",
    "score",
    "category",
];

const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Marketing",
    "Sales",
    "HR",
    "Finance",
    "Operations",
    "Legal",
    "IT",
];
const CATEGORIES: &[&str] = &["A", "B", "C", "D", "E"];
const DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "company.com",
    "outlook.com",
    "hotmail.com",
];
const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Lisa", "Robert", "Emily", "James", "Ashley",
    "Chris", "Jessica", "Daniel", "Amanda", "Matthew", "Nicole", "William", "Jennifer", "Richard",
    "Michelle", "Joseph", "Kimberly", "Thomas", "Amy", "Charles", "Angela", "Christopher",
    "Brenda", "Mark", "Emma",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson",
];

/// Rows written between progress bar updates.
const PROGRESS_STEP: u64 = 10_000;

/// Generator options
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub rows: usize,
    pub output: PathBuf,
    pub seed: Option<u64>,
    pub show_progress: bool,
}

/// Generation summary
#[derive(Debug)]
pub struct GenerateStats {
    pub rows: usize,
    pub bytes: u64,
    pub duration: Duration,
}

impl GenerateStats {
    pub fn size_mb(&self) -> f64 {
        self.bytes as f64 / 1024.0 / 1024.0
    }

    pub fn rows_per_sec(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.rows as f64 / secs
        } else {
            0.0
        }
    }
}

/// `\t` for `.tsv` outputs, `,` otherwise.
fn delimiter_for(path: &Path) -> u8 {
    let is_tsv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
    if is_tsv {
        b'\t'
    } else {
        b','
    }
}

fn pick<'a, R: Rng>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

/// One synthetic row, fields in [`HEADER`] order.
fn generate_row<R: Rng>(rng: &mut R, id: usize) -> [String; 10] {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let email = format!(
        "{}.{}{}@{}",
        first.to_lowercase(),
        last.to_lowercase(),
        rng.gen_range(0..9999_u32),
        pick(rng, DOMAINS)
    );
    let join_date = format!(
        "{}-{:02}-{:02}",
        rng.gen_range(2015..=2023_u32),
        rng.gen_range(1..=12_u32),
        rng.gen_range(1..=28_u32)
    );

    [
        id.to_string(),
        format!("{first} {last}"),
        email,
        rng.gen_range(22..=65_u32).to_string(),
        rng.gen_range(30_000..150_000_u32).to_string(),
        pick(rng, DEPARTMENTS).to_string(),
        join_date,
        rng.gen_bool(0.5).to_string(),
        format!("{:.2}", rng.gen_range(0.0..100.0_f64)),
        pick(rng, CATEGORIES).to_string(),
    ]
}

fn create_progress_bar(total: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Writes `config.rows` synthetic rows plus a header to `config.output`.
pub fn generate(config: &GenerateConfig) -> Result<GenerateStats> {
    let start = Instant::now();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let file = File::create(&config.output)
        .with_context(|| format!("Failed to create '{}'", config.output.display()))?;
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter_for(&config.output))
        .from_writer(file);

    writer.write_record(HEADER).context("Failed to write header")?;

    let pb = create_progress_bar(config.rows, config.show_progress);
    for id in 1..=config.rows {
        writer
            .write_record(generate_row(&mut rng, id))
            .with_context(|| format!("Failed to write row {id}"))?;
        if id as u64 % PROGRESS_STEP == 0 {
            pb.set_position(id as u64);
        }
    }
    pb.finish_and_clear();

    writer.flush().context("Failed to flush output")?;
    drop(writer);

    let bytes = std::fs::metadata(&config.output)
        .with_context(|| format!("Failed to stat '{}'", config.output.display()))?
        .len();
    let stats = GenerateStats {
        rows: config.rows,
        bytes,
        duration: start.elapsed(),
    };
    debug!(rows = stats.rows, bytes, "generation finished");

    Ok(stats)
}

/// Prints the generation summary to stdout.
pub fn print_summary(config: &GenerateConfig, stats: &GenerateStats) {
    println!("\n{}", "Generation Summary".green().bold());
    println!("  File:             {}", config.output.display());
    println!("  Rows:             {} (plus header)", stats.rows);
    println!("  Size:             {:.2} MB", stats.size_mb());
    println!("  Duration:         {} ms", stats.duration.as_millis());
    println!("  Throughput:       {:.0} rows/sec", stats.rows_per_sec());
}

#[cfg(test)]
#[path = "generate_tests.rs"]
mod tests;
