//! CSV/TSV reader with random-position sampling for large files.
//!
//! Files up to `max_file_size` bytes are read end to end. Larger files are sampled:
//! the reader seeks to `random_positions` uniformly chosen offsets past the first
//! 1% of the file, discards the partial line at each offset, and parses a bounded
//! batch of records from there. The bytes consumed per position drive the
//! population row-count estimate; the interval uses record bytes only, leaving
//! out the discarded partial line.

use csv::{ReaderBuilder, StringRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::analyzer::analyze_columns;
use crate::config::SamplingConfig;
use crate::error::{Error, Result};
use crate::model::{Record, TableStats, SAMPLE_PREVIEW_ROWS};
use crate::reader::estimate::{row_estimate, PositionSample};
use crate::reader::TableReader;

/// Delimited-text reader. CSV and TSV differ only in the delimiter.
///
/// Owns the pseudo-random generator used to pick sampling offsets, so a seeded
/// reader samples the same positions on every run over the same file.
#[derive(Debug, Clone)]
pub struct DelimitedReader<R = StdRng> {
    delimiter: u8,
    name: &'static str,
    rng: R,
}

impl DelimitedReader<StdRng> {
    /// Comma-separated reader seeded from entropy.
    #[must_use]
    pub fn csv() -> Self {
        Self::with_rng(b',', "CSV", StdRng::from_entropy())
    }

    /// Tab-separated reader seeded from entropy.
    #[must_use]
    pub fn tsv() -> Self {
        Self::with_rng(b'\t', "TSV", StdRng::from_entropy())
    }

    /// Reseeds the position generator for deterministic sampling.
    #[must_use]
    pub fn seeded(self, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..self
        }
    }
}

impl<R: Rng> DelimitedReader<R> {
    /// Creates a reader with an explicit delimiter, format name and generator.
    #[must_use]
    pub const fn with_rng(delimiter: u8, name: &'static str, rng: R) -> Self {
        Self {
            delimiter,
            name,
            rng,
        }
    }

    /// Field delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn builder(&self, has_headers: bool) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(has_headers)
            .flexible(true);
        builder
    }

    /// Draws up to `sample_size` records from random offsets of `file`.
    ///
    /// A position whose seek or read fails is skipped, not retried.
    fn sample_records(
        &mut self,
        mut file: File,
        file_size: u64,
        config: &SamplingConfig,
    ) -> (Vec<Record>, Vec<PositionSample>) {
        let per_position = config.records_per_position();
        // Skip the first 1% to stay clear of the header.
        let min_pos = file_size / 100;

        let mut records: Vec<Record> = Vec::with_capacity(config.sample_size);
        let mut positions = Vec::with_capacity(config.random_positions);

        for position in 0..config.random_positions {
            let offset = self.rng.gen_range(min_pos..file_size);

            match read_from_position(&mut file, self.builder(false), offset, per_position) {
                Ok((batch, sample)) => {
                    debug!(
                        position,
                        offset,
                        records = sample.records,
                        bytes = sample.bytes,
                        fragment = sample.fragment,
                        "sampled position"
                    );
                    positions.push(sample);
                    records.extend(batch);
                }
                Err(err) => {
                    warn!(position, offset, error = %err, "skipping sampling position");
                    continue;
                }
            }

            if records.len() >= config.sample_size {
                break;
            }
        }

        records.truncate(config.sample_size);
        (records, positions)
    }
}

/// Seeks to `offset`, drops the partial line there, then parses up to
/// `max_records` records. Malformed records are dropped but still use up an
/// attempt. Returns the records and what was consumed from `offset`, with the
/// partial line kept apart from the record bytes.
fn read_from_position(
    file: &mut File,
    builder: ReaderBuilder,
    offset: u64,
    max_records: usize,
) -> io::Result<(Vec<Record>, PositionSample)> {
    file.seek(SeekFrom::Start(offset))?;

    let mut buffered = BufReader::new(file);
    let mut fragment = Vec::new();
    let skipped = buffered.read_until(b'\n', &mut fragment)? as u64;

    let mut reader = builder.from_reader(buffered);
    let mut records = Vec::with_capacity(max_records);
    let mut record = StringRecord::new();

    for _ in 0..max_records {
        match reader.read_record(&mut record) {
            Ok(true) => records.push(to_record(&record)),
            Ok(false) => break,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                warn!(offset, error = %err, "dropping malformed record");
            }
        }
    }

    let sample = PositionSample {
        bytes: skipped + reader.position().byte(),
        fragment: skipped,
        records: records.len(),
    };
    Ok((records, sample))
}

fn to_record(record: &StringRecord) -> Record {
    record.iter().map(str::to_string).collect()
}

impl<R: Rng> TableReader for DelimitedReader<R> {
    fn read_table(&mut self, path: &Path, config: &SamplingConfig) -> Result<TableStats> {
        config.validate()?;

        let file = File::open(path)?;
        let file_size = file.metadata()?.len();
        if file_size == 0 {
            return Err(Error::EmptyFile(path.to_path_buf()));
        }

        let mut reader = self.builder(true).from_reader(file);
        let header = reader
            .headers()
            .map_err(|e| Error::Header(e.to_string()))?
            .clone();
        if header.is_empty() {
            return Err(Error::Header("first record has no fields".to_string()));
        }
        let column_names: Vec<String> = header.iter().map(str::to_string).collect();

        let sampled = file_size > config.max_file_size;
        let (records, estimated_rows, estimate) = if sampled {
            debug!(
                file_size,
                max_file_size = config.max_file_size,
                sample_size = config.sample_size,
                random_positions = config.random_positions,
                "file exceeds cutoff, sampling"
            );
            let file = reader.into_inner();
            let (records, positions) = self.sample_records(file, file_size, config);
            let estimate = row_estimate(file_size, &positions, config, records.len() as u64);
            (records, estimate.point, Some(estimate))
        } else {
            debug!(file_size, "reading entire file");
            let mut records = Vec::new();
            for result in reader.records() {
                records.push(to_record(&result?));
            }
            let total = records.len() as u64;
            (records, total, None)
        };

        let row_count = records.len() as u64;
        info!(
            path = %path.display(),
            format = self.name,
            sampled,
            row_count,
            estimated_rows,
            "table read"
        );

        let columns = analyze_columns(&records, &column_names);
        let sample_data = records.iter().take(SAMPLE_PREVIEW_ROWS).cloned().collect();

        Ok(TableStats {
            format: self.name.to_string(),
            file_size,
            sampled,
            row_count,
            estimated_rows,
            row_estimate: estimate,
            column_count: column_names.len(),
            column_names,
            columns,
            sample_data,
            sampling_config: *config,
        })
    }

    fn format_name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
#[path = "delimited_tests.rs"]
mod tests;
