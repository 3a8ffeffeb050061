//! Module for event sample descriptions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One event sample feeding a selection run
///
/// A sample is a single event file with the bookkeeping the selection
/// needs: the exposure it corresponds to and whether it is simulation.
/// Data samples carry no truth record, so truth branches evaluate to NaN
/// and no systematic weights are attached to their rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Sample name, used as the output subdirectory
    pub name: String,
    /// Path to the line-delimited event file
    pub path: PathBuf,
    /// Exposure of the sample (POT)
    pub exposure: f64,
    /// Whether the sample is simulation with truth records
    #[serde(default)]
    pub is_mc: bool,
}

impl Sample {
    /// Describe a Monte-Carlo sample
    pub fn mc<P: Into<PathBuf>>(name: &str, path: P, exposure: f64) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            exposure,
            is_mc: true,
        }
    }

    /// Describe a data sample
    pub fn data<P: Into<PathBuf>>(name: &str, path: P, exposure: f64) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            exposure,
            is_mc: false,
        }
    }
}
