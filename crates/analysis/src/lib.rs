//! Selection driver producing selected-event tables
//!
//! The [Analysis] is the heart of a selection run. It is configured with
//! event [Sample]s and named variable [Tree]s, then streams every sample
//! once, applies the tree selections, and writes one selected-event table
//! per (sample, tree) pair under the output directory.
//!
//! # Quickstart example
//!
//! ```rust, no_run
//! # use spinetools_analysis::{Analysis, AnalysisConfig};
//! // Configuration is fully file-driven
//! let config = AnalysisConfig::from_file("analysis.json").unwrap();
//! let analysis = Analysis::from_config("muon_1muNp", config, "out/").unwrap();
//!
//! let summary = analysis.run().unwrap();
//! println!("{summary}");
//! ```
//!
//! # Trees and evaluation modes
//!
//! A [Tree] mirrors the columns of one output table. Its selection loops
//! either the reconstructed or the true interactions of each event, and
//! each branch evaluates a variable on the selected interaction or on its
//! best-matched partner:
//!
//! - reco-selection tree, reco branch: the selected candidate itself
//! - reco-selection tree, truth branch: the matched true interaction, NaN
//!   when unmatched (and always on data)
//! - truth-selection tree, truth branch: the selected true interaction
//!
//! Rows carry the systematic weight sets of the underlying true interaction
//! so uncertainties can be propagated through the selection downstream.

mod analysis;
mod config;
mod error;
mod sample;
mod tree;

pub mod table;

#[doc(inline)]
pub use analysis::{Analysis, RunSummary, SampleSummary};

#[doc(inline)]
pub use config::{AnalysisConfig, BranchConfig, Side, TreeConfig};

#[doc(inline)]
pub use sample::Sample;

#[doc(inline)]
pub use tree::Tree;

#[doc(inline)]
pub use table::{read_rows, Row, TableReader};

#[doc(inline)]
pub use error::Error;
