//! Systematic uncertainty propagation through selected-event tables
//!
//! The engine behind every uncertainty band the toolkit produces. A plain
//! text configuration describes the systematic sources and the observable
//! to propagate them through; the [Propagator] streams the selected-event
//! tables written by `spinetools-analysis`, histograms the observable under
//! every universe of every source, and condenses the ensemble into one
//! covariance matrix per source.
//!
//! # Systematic kinds
//!
//! | Kind         | Behaviour                                                     |
//! | ------------ | ------------------------------------------------------------- |
//! | `multisim`   | per-event weight vector, one weight per random universe       |
//! | `multisigma` | per-event weights at discrete sigma points of one parameter   |
//! | `variation`  | alternately-simulated samples substituted for the nominal     |
//!
//! # Quickstart example
//!
//! ```rust, no_run
//! # use spinetools_systematics::{Config, Propagator};
//! let config = Config::from_file("systematics.cfg").unwrap();
//! let propagation = Propagator::new(config).run().unwrap();
//!
//! // per-source and combined uncertainties
//! println!("{propagation}");
//! propagation.write_json("out/systematics.json").unwrap();
//! ```
//!
//! # Configuration format
//!
//! Keyword blocks terminated by `end`, with `#` comments:
//!
//! ```text
//! settings
//!     table      out/mc/selectedNu.jsonl
//!     variable   reco_edep
//!     bins       uniform 25 0.0 3000.0
//! end
//!
//! multisim flux_all
//!     source     flux
//!     universes  100
//! end
//!
//! multisigma genie_maccres
//!     source     MaCCRES
//!     sigmas     -3 -2 -1 1 2 3
//! end
//!
//! variation tpc_gain
//!     sample     out/var_low/selectedNu.jsonl
//!     sample     out/var_high/selectedNu.jsonl
//!     scale      1.0
//! end
//! ```
//!
//! Section names key the output, so they must be unique.

mod config;
mod covariance;
mod error;
mod output;
mod propagate;

#[doc(inline)]
pub use config::{Config, Kind, SamplePath, Settings, Systematic};

#[doc(inline)]
pub use covariance::Covariance;

#[doc(inline)]
pub use output::{PropagationResult, SystematicResult};

#[doc(inline)]
pub use propagate::Propagator;

#[doc(inline)]
pub use error::Error;
