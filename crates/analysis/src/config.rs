//! Module for file-driven analysis configuration

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sample::Sample;

/// Which record an item is evaluated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Reconstructed interactions
    Reco,
    /// True interactions
    Truth,
}

/// One named column of an output table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchConfig {
    /// Column name in the written table
    pub name: String,
    /// Registry name of the variable to evaluate
    pub var: String,
    /// Side the variable is evaluated on
    pub side: Side,
}

/// One named tree of branches sharing a selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Tree name, used as the output file stem
    pub name: String,
    /// Side the selection loops over
    pub selection: Side,
    /// Registry name of the selection cut
    pub cut: String,
    /// Columns of the table
    pub branches: Vec<BranchConfig>,
}

/// Complete configuration of a selection run
///
/// ```json
/// {
///     "samples": [
///         { "name": "mc", "path": "events/mc.jsonl", "exposure": 2.5e20, "is_mc": true }
///     ],
///     "trees": [
///         {
///             "name": "selectedNu",
///             "selection": "reco",
///             "cut": "all_1mu_np",
///             "branches": [
///                 { "name": "reco_edep", "var": "visible_energy", "side": "reco" },
///                 { "name": "true_edep", "var": "true_energy", "side": "truth" }
///             ]
///         }
///     ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Event samples to stream
    pub samples: Vec<Sample>,
    /// Trees to evaluate on every sample
    pub trees: Vec<TreeConfig>,
}

impl AnalysisConfig {
    /// Read a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
