//! Report rendering for `tablestats analyze`.

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::fmt;
use tablestats_core::TableStats;

/// Output format for the analysis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Pretty-printed JSON of the full result
    Json,
}

/// Renders `stats` in the requested format.
pub fn render(stats: &TableStats, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(TextReport(stats).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)? + "\n"),
    }
}

/// Text layout of a [`TableStats`].
pub struct TextReport<'a>(pub &'a TableStats);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;

        writeln!(
            f,
            "{}",
            format!("=== {} File Statistics ===", stats.format).bold()
        )?;
        writeln!(f, "Sampled Rows: {}", stats.row_count)?;
        writeln!(f, "Estimated Total Rows: {}", stats.estimated_rows)?;
        if let Some(estimate) = &stats.row_estimate {
            writeln!(
                f,
                "  {:.0}% interval: {} - {}",
                estimate.confidence * 100.0,
                estimate.lower,
                estimate.upper
            )?;
        }
        writeln!(f, "Columns: {}", stats.column_count)?;
        writeln!(f, "Column Names: [{}]", stats.column_names.join(", "))?;

        writeln!(f, "\n{}", "Column Details:".bold())?;
        for column in &stats.columns {
            writeln!(f, "  {}:", column.name.cyan())?;
            writeln!(f, "    Type: {}", column.column_type)?;
            writeln!(
                f,
                "    Null Count: {} ({:.2}%)",
                column.null_count, column.null_percentage
            )?;
            writeln!(f, "    Min: {}", column.min_value)?;
            writeln!(f, "    Max: {}", column.max_value)?;

            if let Some(agg) = &column.aggregates {
                let p = |rank| agg.percentile(rank).unwrap_or_default();
                writeln!(f, "    Aggregates:")?;
                writeln!(f, "      Count: {}", agg.count)?;
                writeln!(f, "      Sum: {:.2}", agg.sum)?;
                writeln!(f, "      Mean: {:.2}", agg.mean)?;
                writeln!(f, "      Median: {:.2}", agg.median)?;
                writeln!(f, "      Std Dev: {:.2}", agg.std_dev)?;
                writeln!(
                    f,
                    "      Percentiles: 25th={:.2}, 75th={:.2}, 95th={:.2}, 99th={:.2}",
                    p(25),
                    p(75),
                    p(95),
                    p(99)
                )?;
            }
        }

        if !stats.sample_data.is_empty() {
            writeln!(f, "\n{}", "Sample Data:".bold())?;
            writeln!(f, "{}", preview_table(stats))?;
        }

        Ok(())
    }
}

/// Preview rows as a table, one leading column for the row number.
fn preview_table(stats: &TableStats) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Row").fg(Color::Cyan)];
    header.extend(
        stats
            .column_names
            .iter()
            .map(|name| Cell::new(name).fg(Color::Cyan)),
    );
    table.set_header(header);

    for (i, row) in stats.sample_data.iter().enumerate() {
        let mut cells = vec![Cell::new(i + 1)];
        cells.extend(
            (0..stats.column_count).map(|col| Cell::new(row.get(col).map_or("", String::as_str))),
        );
        table.add_row(cells);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tablestats_core::{
        AggregateStats, ColumnStats, ColumnType, ColumnValue, RowEstimate, SamplingConfig,
    };

    fn sample_stats() -> TableStats {
        let mut percentiles = BTreeMap::new();
        for (rank, value) in [(25, 27.5), (50, 30.0), (75, 32.5), (90, 34.0), (95, 34.5), (99, 34.9)]
        {
            percentiles.insert(rank, value);
        }

        TableStats {
            format: "CSV".to_string(),
            file_size: 64,
            sampled: false,
            row_count: 3,
            estimated_rows: 3,
            row_estimate: None,
            column_count: 2,
            column_names: vec!["name".to_string(), "age".to_string()],
            columns: vec![
                ColumnStats {
                    name: "name".to_string(),
                    column_type: ColumnType::String,
                    null_count: 0,
                    null_percentage: 0.0,
                    min_value: ColumnValue::Text("Bob".to_string()),
                    max_value: ColumnValue::Text("John".to_string()),
                    aggregates: None,
                },
                ColumnStats {
                    name: "age".to_string(),
                    column_type: ColumnType::Int64,
                    null_count: 1,
                    null_percentage: 100.0 / 3.0,
                    min_value: ColumnValue::Numeric(25.0),
                    max_value: ColumnValue::Numeric(35.0),
                    aggregates: Some(AggregateStats {
                        count: 2,
                        sum: 60.0,
                        mean: 30.0,
                        median: 30.0,
                        std_dev: 5.0,
                        variance: 25.0,
                        percentiles,
                    }),
                },
            ],
            sample_data: vec![
                vec!["John".to_string(), "25".to_string()],
                vec!["Jane".to_string()],
                vec!["Bob".to_string(), "35".to_string()],
            ],
            sampling_config: SamplingConfig::default(),
        }
    }

    #[test]
    fn test_text_report_layout() {
        colored::control::set_override(false);

        let text = render(&sample_stats(), OutputFormat::Text).expect("render");

        assert!(text.starts_with("=== CSV File Statistics ===\n"));
        assert!(text.contains("Sampled Rows: 3\n"));
        assert!(text.contains("Estimated Total Rows: 3\n"));
        assert!(text.contains("Column Names: [name, age]\n"));
        assert!(text.contains("    Type: string\n"));
        assert!(text.contains("    Null Count: 1 (33.33%)\n"));
        assert!(text.contains("    Min: 25\n"));
        assert!(text.contains("    Max: John\n"));
        assert!(text.contains("      Mean: 30.00\n"));
        assert!(text.contains("25th=27.50, 75th=32.50, 95th=34.50, 99th=34.90"));
        assert!(!text.contains("interval"));
    }

    #[test]
    fn test_text_report_preview_table() {
        colored::control::set_override(false);

        let text = render(&sample_stats(), OutputFormat::Text).expect("render");

        assert!(text.contains("Sample Data:"));
        assert!(text.contains("Jane"));
        assert!(text.contains("Row"));
    }

    #[test]
    fn test_text_report_shows_interval_when_sampled() {
        colored::control::set_override(false);
        let mut stats = sample_stats();
        stats.sampled = true;
        stats.estimated_rows = 5_000;
        stats.row_estimate = Some(RowEstimate {
            point: 5_000,
            lower: 4_500,
            upper: 5_600,
            confidence: 0.95,
        });

        let text = TextReport(&stats).to_string();

        assert!(text.contains("Estimated Total Rows: 5000\n"));
        assert!(text.contains("95% interval: 4500 - 5600"));
    }

    #[test]
    fn test_text_report_without_rows_has_no_preview() {
        colored::control::set_override(false);
        let mut stats = sample_stats();
        stats.sample_data.clear();

        let text = TextReport(&stats).to_string();

        assert!(!text.contains("Sample Data:"));
    }

    #[test]
    fn test_json_report_fields() {
        let stats = sample_stats();

        let json = render(&stats, OutputFormat::Json).expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");

        assert_eq!(value["format"], "CSV");
        assert_eq!(value["row_count"], 3);
        assert_eq!(value["column_names"], serde_json::json!(["name", "age"]));
        assert_eq!(value["columns"][1]["column_type"], "int64");
        assert_eq!(value["columns"][1]["aggregates"]["percentiles"]["90"], 34.0);
        assert!(value["row_estimate"].is_null());
    }
}
