//! Selected-event tables and their readers
//!
//! A table is the flat output of one tree on one sample: one JSON row per
//! selected interaction, carrying the named branch values and the
//! systematic weight sets of the underlying true interaction. Tables are
//! the interface between the selection and everything downstream, most
//! importantly the systematics engine.
//!
//! JSON has no representation for NaN, so undefined branch values are
//! stored as `null` and restored to NaN on read.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One row of a selected-event table
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Branch values keyed by branch name, `None` for undefined
    pub values: BTreeMap<String, Option<f64>>,
    /// Systematic weight sets of the underlying true interaction
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weights: BTreeMap<String, Vec<f64>>,
}

impl Row {
    /// Store a branch value, mapping NaN to `None`
    pub fn insert(&mut self, name: &str, value: f64) {
        let stored = (!value.is_nan()).then_some(value);
        self.values.insert(name.to_string(), stored);
    }

    /// Fetch a branch value, NaN when undefined or missing
    ///
    /// ```rust
    /// # use spinetools_analysis::Row;
    /// let mut row = Row::default();
    /// row.insert("reco_edep", 850.0);
    /// row.insert("true_edep", f64::NAN);
    ///
    /// assert_eq!(row.value("reco_edep"), 850.0);
    /// assert!(row.value("true_edep").is_nan());
    /// assert!(row.value("absent").is_nan());
    /// ```
    pub fn value(&self, name: &str) -> f64 {
        match self.values.get(name) {
            Some(Some(value)) => *value,
            _ => f64::NAN,
        }
    }

    /// The weight vector of a named systematic source, if carried
    pub fn weight_set(&self, source: &str) -> Option<&[f64]> {
        self.weights.get(source).map(Vec::as_slice)
    }
}

/// Read all rows of a table file
///
/// Returns a result containing a vector of every [Row] in the file at
/// `path`. For tables too large to collect, use the streaming
/// [TableReader].
///
/// - `path` - Path to the table file, can be [&str], [String], [Path], etc...
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    TableReader::open(path)?.collect()
}

/// Streaming iterator over the rows of a selected-event table
pub struct TableReader {
    lines: Lines<BufReader<File>>,
    line_number: usize,
}

impl TableReader {
    /// Open a table file for streaming
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(Self {
            lines: reader.lines(),
            line_number: 0,
        })
    }
}

impl Iterator for TableReader {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            return Some(serde_json::from_str(&line).map_err(|source| Error::MalformedRow {
                line: self.line_number,
                source,
            }));
        }
    }
}

impl std::fmt::Debug for TableReader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("TableReader")
            .field("line_number", &self.line_number)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_round_trips_through_null() {
        let mut row = Row::default();
        row.insert("defined", 1.5);
        row.insert("undefined", f64::NAN);

        let text = serde_json::to_string(&row).unwrap();
        assert!(text.contains("null"));

        let back: Row = serde_json::from_str(&text).unwrap();
        assert_eq!(back.value("defined"), 1.5);
        assert!(back.value("undefined").is_nan());
    }

    #[test]
    fn empty_weights_are_not_written() {
        let mut row = Row::default();
        row.insert("x", 1.0);
        let text = serde_json::to_string(&row).unwrap();
        assert!(!text.contains("weights"));
    }
}
