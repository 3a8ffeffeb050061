//! Module for the selection driver

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use spinetools_event::EventReader;
use spinetools_utils::{f, ValueExt};

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::table::Row;
use crate::tree::Tree;

/// The selection driver
///
/// Streams every configured [Sample] once, evaluates every [Tree] on each
/// event, and writes the selected rows to
/// `<output>/<sample>/<tree>.jsonl`. A `manifest.json` with exposures and
/// row counts is written alongside for bookkeeping.
#[derive(Debug)]
pub struct Analysis {
    name: String,
    output: PathBuf,
    samples: Vec<Sample>,
    trees: Vec<Tree>,
    disable_progress: bool,
}

impl Analysis {
    /// Initialise an empty driver writing under `output`
    pub fn new<P: Into<PathBuf>>(name: &str, output: P) -> Self {
        Self {
            name: name.to_string(),
            output: output.into(),
            samples: Vec::new(),
            trees: Vec::new(),
            disable_progress: false,
        }
    }

    /// Build a driver from a file-driven configuration
    ///
    /// Every cut and variable name is resolved up front so a typo fails
    /// the run before any events are read.
    pub fn from_config<P: Into<PathBuf>>(
        name: &str,
        config: AnalysisConfig,
        output: P,
    ) -> Result<Self> {
        let mut analysis = Self::new(name, output);
        for sample in config.samples {
            analysis.add_sample(sample)?;
        }
        for tree in &config.trees {
            analysis.add_tree(Tree::from_config(tree)?)?;
        }
        Ok(analysis)
    }

    /// Register an event sample
    pub fn add_sample(&mut self, sample: Sample) -> Result<()> {
        if self.samples.iter().any(|s| s.name == sample.name) {
            return Err(Error::DuplicateName {
                kind: "sample",
                name: sample.name,
            });
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Register a compiled tree
    pub fn add_tree(&mut self, tree: Tree) -> Result<()> {
        if self.trees.iter().any(|t| t.name == tree.name) {
            return Err(Error::DuplicateName {
                kind: "tree",
                name: tree.name,
            });
        }
        self.trees.push(tree);
        Ok(())
    }

    /// Do not print progress indicators while streaming
    pub fn disable_progress(&mut self) {
        self.disable_progress = true;
    }

    /// Run the selection over every sample
    ///
    /// Rows are written incrementally, so memory use is bounded by a single
    /// event regardless of sample size.
    pub fn run(&self) -> Result<RunSummary> {
        fs::create_dir_all(&self.output)?;

        let mut summary = RunSummary {
            name: self.name.clone(),
            samples: Vec::with_capacity(self.samples.len()),
        };

        for sample in &self.samples {
            summary.samples.push(self.run_sample(sample)?);
        }

        // bookkeeping for everything downstream of the selection
        let manifest = File::create(self.output.join("manifest.json"))?;
        serde_json::to_writer_pretty(BufWriter::new(manifest), &summary)?;

        Ok(summary)
    }

    /// Stream one sample through every tree
    fn run_sample(&self, sample: &Sample) -> Result<SampleSummary> {
        info!("processing sample \"{}\"", sample.name);

        let dir = self.output.join(&sample.name);
        fs::create_dir_all(&dir)?;

        let mut writers = Vec::with_capacity(self.trees.len());
        let mut counts = vec![0_u64; self.trees.len()];
        for tree in &self.trees {
            let file = File::create(dir.join(f!("{}.jsonl", tree.name)))?;
            writers.push(BufWriter::new(file));
        }

        let mut reader = EventReader::open(&sample.path)?;
        if self.disable_progress {
            reader.disable_progress();
        }

        let mut n_events = 0_u64;
        let mut rows: Vec<Row> = Vec::new();
        for event in reader {
            let event = event?;
            n_events += 1;

            for (idx, tree) in self.trees.iter().enumerate() {
                rows.clear();
                tree.evaluate(&event, sample.is_mc, &mut rows);
                for row in &rows {
                    serde_json::to_writer(&mut writers[idx], row)?;
                    writeln!(writers[idx])?;
                }
                counts[idx] += rows.len() as u64;
            }
        }

        for writer in &mut writers {
            writer.flush()?;
        }

        let rows: BTreeMap<String, u64> = self
            .trees
            .iter()
            .map(|t| t.name.clone())
            .zip(counts)
            .collect();

        info!(
            "sample \"{}\": {} events, {} selected rows",
            sample.name,
            n_events,
            rows.values().sum::<u64>()
        );

        Ok(SampleSummary {
            name: sample.name.clone(),
            exposure: sample.exposure,
            is_mc: sample.is_mc,
            events: n_events,
            rows,
        })
    }

    /// The directory outputs are written under
    pub fn output_dir(&self) -> &Path {
        &self.output
    }
}

/// Bookkeeping of a completed selection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Name of the analysis
    pub name: String,
    /// Per-sample outcomes in processing order
    pub samples: Vec<SampleSummary>,
}

/// Outcome of one sample within a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Sample name
    pub name: String,
    /// Exposure of the sample (POT)
    pub exposure: f64,
    /// Whether the sample was simulation
    pub is_mc: bool,
    /// Events streamed
    pub events: u64,
    /// Selected rows per tree
    pub rows: BTreeMap<String, u64>,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = f!("analysis \"{}\"\n", self.name);
        for sample in &self.samples {
            s += &f!(
                "  {:<12} {:>10} events at {} POT\n",
                sample.name,
                sample.events,
                sample.exposure.sci(2, 2)
            );
            for (tree, count) in &sample.rows {
                s += &f!("    {tree:<20} {count:>8} rows\n");
            }
        }
        write!(f, "{s}")
    }
}
