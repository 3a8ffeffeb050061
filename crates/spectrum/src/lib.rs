//! Binned spectra with exposure scaling
//!
//! The [Spectrum] is the common currency of the toolkit: selections fill
//! them from selected events, the systematics engine fills one per universe,
//! and the plotting stage consumes them. Alongside the per-bin weighted sums
//! a spectrum tracks the summed squared weights for statistical
//! uncertainties and the exposure of the sample it was filled from.
//!
//! # Quickstart example
//!
//! ```rust
//! # use spinetools_spectrum::{Binning, Spectrum};
//! // 10 uniform bins over 0-3000 MeV
//! let binning = Binning::uniform(10, 0.0, 3000.0).unwrap();
//! let mut spectrum = Spectrum::new(binning);
//!
//! spectrum.fill(420.0);
//! spectrum.fill_with(380.0, 0.5);
//!
//! assert_eq!(spectrum.bin_content(1), 1.5);
//! ```
//!
//! Exposure normalisation follows the usual protons-on-target convention:
//! a Monte-Carlo spectrum filled at one exposure is scaled to the beam
//! exposure of the data it is compared against with
//! [scale_to_exposure](Spectrum::scale_to_exposure).

mod binning;
mod error;
mod spectrum;

#[doc(inline)]
pub use binning::Binning;

#[doc(inline)]
pub use spectrum::Spectrum;

#[doc(inline)]
pub use error::Error;
