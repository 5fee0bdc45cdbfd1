//! Result files.
//!
//! A result file starts with the experiment description, one `#` comment
//! line per description line, followed by CSV:
//!
//! ```text
//! # Total cost with increasing marginal costs (n log n).
//! Scheduler,Tasks,Resources,Total Cost
//! (MC)2MKP,1000,10,31254.79
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::ExperimentError;
use crate::allocators::Strategy;

/// One recorded run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Allocator display name.
    pub scheduler: String,
    /// Number of tasks.
    pub tasks: usize,
    /// Number of resources.
    pub resources: usize,
    /// Total cost or elapsed seconds.
    pub value: f64,
}

impl ResultRow {
    /// Row for `strategy`, recorded under its display name.
    pub fn new(strategy: Strategy, tasks: usize, resources: usize, value: f64) -> Self {
        Self {
            scheduler: strategy.name().to_string(),
            tasks,
            resources,
            value,
        }
    }
}

/// Writes result rows to any [`Write`] sink.
pub struct ResultLogger<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl ResultLogger<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes the header.
    pub fn create(
        path: impl AsRef<Path>,
        description: &str,
        value_label: &str,
    ) -> Result<Self, ExperimentError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), description, value_label)
    }
}

impl<W: Write> ResultLogger<W> {
    /// Writes the description and the CSV header line to `inner`.
    pub fn new(
        mut inner: W,
        description: &str,
        value_label: &str,
    ) -> Result<Self, ExperimentError> {
        for line in description.lines() {
            let line = line.trim();
            if line.starts_with('#') {
                writeln!(inner, "{line}")?;
            } else if line.is_empty() {
                writeln!(inner, "#")?;
            } else {
                writeln!(inner, "# {line}")?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(["Scheduler", "Tasks", "Resources", value_label])?;
        Ok(Self { writer, rows: 0 })
    }

    /// Appends one row.
    pub fn store(&mut self, row: &ResultRow) -> Result<(), ExperimentError> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    /// Rows stored so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes buffered rows.
    pub fn flush(&mut self) -> Result<(), ExperimentError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub fn finish(self) -> Result<W, ExperimentError> {
        self.writer
            .into_inner()
            .map_err(|e| ExperimentError::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(logger: ResultLogger<Vec<u8>>) -> String {
        String::from_utf8(logger.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let description = "first line\n# already a comment";
        let mut logger = ResultLogger::new(Vec::new(), description, "Total Cost").unwrap();
        logger
            .store(&ResultRow::new(Strategy::Mc2Mkp, 8, 3, 17.5))
            .unwrap();
        logger
            .store(&ResultRow::new(Strategy::FedAvg, 8, 3, 21.0))
            .unwrap();
        assert_eq!(logger.rows(), 2);

        assert_eq!(
            output(logger),
            "# first line\n\
             # already a comment\n\
             Scheduler,Tasks,Resources,Total Cost\n\
             (MC)2MKP,8,3,17.5\n\
             FedAvg,8,3,21.0\n"
        );
    }

    #[test]
    fn test_no_description() {
        let logger = ResultLogger::new(Vec::new(), "", "Time").unwrap();
        assert_eq!(output(logger), "Scheduler,Tasks,Resources,Time\n");
    }

    #[test]
    fn test_file_readable_as_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let mut logger = ResultLogger::create(&path, "timing run", "Time").unwrap();
        logger
            .store(&ResultRow::new(Strategy::MarDec, 2000, 20, 0.25))
            .unwrap();
        logger.finish().unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .from_path(&path)
            .unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(3), Some("Time"));

        let rows: Vec<ResultRow> = reader
            .records()
            .map(|r| r.unwrap().deserialize(None).unwrap())
            .collect();
        assert_eq!(rows, vec![ResultRow::new(Strategy::MarDec, 2000, 20, 0.25)]);
    }
}
