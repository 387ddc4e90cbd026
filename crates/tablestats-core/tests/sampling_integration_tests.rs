//! End-to-end tests for the sampling reader through the public API.
#![allow(clippy::cast_possible_truncation, clippy::uninlined_format_args)]

use proptest::prelude::*;
use std::io::Write;
use std::path::Path;
use tablestats_core::{
    ColumnType, ColumnValue, Error, SamplingConfig, StatsGenerator, TableFormat, TableStats,
};
use tempfile::{NamedTempFile, TempDir};

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write");
    path
}

fn analyze(path: &Path, config: SamplingConfig, seed: u64) -> tablestats_core::Result<TableStats> {
    StatsGenerator::for_path(path, config, Some(seed))?.generate_stats(path)
}

fn generated_csv(rows: usize) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp file");
    writeln!(file, "id,score,label").expect("header");
    for i in 0..rows {
        writeln!(file, "{},{}.{:02},item-{}", i, i % 100, i % 97, i % 13).expect("row");
    }
    file.flush().expect("flush");
    file
}

#[test]
fn test_full_scan_scenario() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "people.csv",
        "name,age,salary\nJohn,25,50000\nJane,30,60000\nBob,35,55000\n",
    );

    let stats = analyze(&path, SamplingConfig::default(), 1).expect("stats");

    assert_eq!(stats.column_count, 3);
    assert_eq!(stats.row_count, 3);
    assert_eq!(stats.column_names, vec!["name", "age", "salary"]);
    let types: Vec<ColumnType> = stats.columns.iter().map(|c| c.column_type).collect();
    assert_eq!(
        types,
        vec![ColumnType::String, ColumnType::Int64, ColumnType::Int64]
    );
    let salary = stats.column("salary").expect("salary");
    let agg = salary.aggregates.as_ref().expect("aggregates");
    assert!((agg.mean - 55_000.0).abs() < 1e-9);
    assert!((agg.median - 55_000.0).abs() < 1e-9);
}

#[test]
fn test_tsv_selected_by_extension() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "scores.TSV", "player\tscore\nana\t1.5\nbo\t2\n");

    let stats = analyze(&path, SamplingConfig::default(), 1).expect("stats");

    assert_eq!(stats.format, "TSV");
    assert_eq!(
        stats.column("score").expect("score").column_type,
        ColumnType::Float64
    );
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "data.txt", "a,b\n1,2\n");

    let err = analyze(&path, SamplingConfig::default(), 1).unwrap_err();

    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert_eq!(err.code(), "TSTAT-005");
}

#[test]
fn test_parquet_extension_not_implemented() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "data.parquet", "PAR1");

    assert_eq!(TableFormat::from_path(&path).expect("format"), TableFormat::Parquet);
    let err = analyze(&path, SamplingConfig::default(), 1).unwrap_err();

    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn test_empty_and_header_only_files() {
    let dir = TempDir::new().expect("temp dir");
    let empty = write_file(&dir, "empty.csv", "");
    let header_only = write_file(&dir, "header.csv", "a,b,c\n");

    let err = analyze(&empty, SamplingConfig::default(), 1).unwrap_err();
    let stats = analyze(&header_only, SamplingConfig::default(), 1).expect("stats");

    assert!(matches!(err, Error::EmptyFile(_)));
    assert_eq!(stats.row_count, 0);
    assert_eq!(stats.column_count, 3);
}

#[test]
fn test_sampled_read_extrapolates_row_count() {
    // Arrange
    let file = generated_csv(20_000);
    let config = SamplingConfig {
        sample_size: 200,
        random_positions: 4,
        max_file_size: 4096,
        ..Default::default()
    };

    // Act
    let stats = analyze(file.path(), config, 99).expect("stats");

    // Assert: estimate within a factor of two of the real 20 000 rows
    assert!(stats.sampled);
    assert!(stats.row_count <= 200);
    assert!(stats.estimated_rows > stats.row_count);
    assert!(
        (10_000..=40_000).contains(&stats.estimated_rows),
        "estimated {}",
        stats.estimated_rows
    );
    assert_eq!(stats.sampling_config, config);
}

#[test]
fn test_sampled_columns_keep_types() {
    let file = generated_csv(20_000);
    let config = SamplingConfig {
        sample_size: 100,
        random_positions: 5,
        max_file_size: 1024,
        ..Default::default()
    };

    let stats = analyze(file.path(), config, 5).expect("stats");

    assert_eq!(stats.column("id").expect("id").column_type, ColumnType::Int64);
    assert_eq!(
        stats.column("score").expect("score").column_type,
        ColumnType::Float64
    );
    let label = stats.column("label").expect("label");
    assert_eq!(label.column_type, ColumnType::String);
    assert!(matches!(label.min_value, ColumnValue::Text(ref s) if s.starts_with("item-")));
}

#[test]
fn test_stats_serialize_to_json() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "t.csv", "k,v\na,1\nb,\n");

    let stats = analyze(&path, SamplingConfig::default(), 1).expect("stats");
    let json = serde_json::to_value(&stats).expect("json");

    assert_eq!(json["row_count"], 2);
    assert_eq!(json["columns"][1]["column_type"], "int64");
    assert_eq!(json["columns"][1]["null_count"], 1);
    assert_eq!(json["columns"][0]["min_value"]["kind"], "text");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_sampled_rows_never_exceed_sample_size(
        sample_size in 1usize..300,
        positions in 1usize..12,
        seed in any::<u64>(),
    ) {
        let file = generated_csv(3_000);
        let config = SamplingConfig {
            sample_size,
            random_positions: positions,
            max_file_size: 512,
            ..Default::default()
        };

        let stats = analyze(file.path(), config, seed).expect("stats");

        prop_assert!(stats.sampled);
        prop_assert!(stats.row_count <= sample_size as u64);
        prop_assert!(stats.sample_data.len() <= 5);
        for column in &stats.columns {
            prop_assert!(column.null_count <= stats.row_count);
            prop_assert!((0.0..=100.0).contains(&column.null_percentage));
        }
    }

    #[test]
    fn prop_full_scan_counts_every_row(rows in 0usize..200) {
        let file = generated_csv(rows);

        let stats = analyze(file.path(), SamplingConfig::default(), 0).expect("stats");

        prop_assert!(!stats.sampled);
        prop_assert_eq!(stats.row_count, rows as u64);
        prop_assert_eq!(stats.estimated_rows, rows as u64);
    }
}
