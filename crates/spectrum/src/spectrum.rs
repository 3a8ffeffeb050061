//! Module for the weighted spectrum type

use serde::{Deserialize, Serialize};

use spinetools_utils::{f, ValueExt};

use crate::binning::Binning;
use crate::error::{Error, Result};

/// A one-dimensional weighted spectrum
///
/// Tracks the weighted sum and the sum of squared weights per bin, so that
/// statistical uncertainties survive arbitrary scaling. The exposure records
/// how much beam (protons-on-target) the filled sample corresponds to.
///
/// ```rust
/// # use spinetools_spectrum::{Binning, Spectrum};
/// let mut spectrum = Spectrum::new(Binning::uniform(2, 0.0, 10.0).unwrap());
///
/// spectrum.fill_with(2.5, 2.0);
/// spectrum.fill_with(7.5, 1.0);
/// spectrum.fill(11.0); // outside the edges, dropped
///
/// assert_eq!(spectrum.contents(), &[2.0, 1.0]);
/// assert_eq!(spectrum.entries(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    binning: Binning,
    sums: Vec<f64>,
    sumw2: Vec<f64>,
    entries: u64,
    exposure: f64,
}

impl Spectrum {
    /// Initialise an empty spectrum over the given binning
    pub fn new(binning: Binning) -> Self {
        let n = binning.n_bins();
        Self {
            binning,
            sums: vec![0.0; n],
            sumw2: vec![0.0; n],
            entries: 0,
            exposure: 0.0,
        }
    }

    /// Fill with unit weight
    ///
    /// Returns whether the value landed in a bin.
    pub fn fill(&mut self, value: f64) -> bool {
        self.fill_with(value, 1.0)
    }

    /// Fill with an explicit weight
    ///
    /// Values outside the binning (or undefined) are dropped and `false` is
    /// returned so callers can count their losses.
    pub fn fill_with(&mut self, value: f64, weight: f64) -> bool {
        match self.binning.find_bin(value) {
            Some(bin) => {
                self.sums[bin] += weight;
                self.sumw2[bin] += weight * weight;
                self.entries += 1;
                true
            }
            None => false,
        }
    }

    /// The binning the spectrum was constructed with
    pub fn binning(&self) -> &Binning {
        &self.binning
    }

    /// Weighted sum in bin `bin`
    pub fn bin_content(&self, bin: usize) -> f64 {
        self.sums[bin]
    }

    /// Statistical uncertainty on bin `bin`
    pub fn bin_error(&self, bin: usize) -> f64 {
        self.sumw2[bin].sqrt()
    }

    /// All bin contents in order
    pub fn contents(&self) -> &[f64] {
        &self.sums
    }

    /// All statistical uncertainties in order
    pub fn errors(&self) -> Vec<f64> {
        self.sumw2.iter().map(|w2| w2.sqrt()).collect()
    }

    /// Number of fills that landed in a bin
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Total weighted sum over all bins
    pub fn integral(&self) -> f64 {
        self.sums.iter().sum()
    }

    /// The exposure the filled sample corresponds to (POT)
    pub fn exposure(&self) -> f64 {
        self.exposure
    }

    /// Record the exposure of the filled sample (POT)
    pub fn set_exposure(&mut self, exposure: f64) {
        self.exposure = exposure;
    }

    /// Multiply all bin contents by a constant factor
    ///
    /// Squared weights pick up the squared factor so relative uncertainties
    /// are unchanged.
    ///
    /// ```rust
    /// # use spinetools_spectrum::{Binning, Spectrum};
    /// let mut spectrum = Spectrum::new(Binning::uniform(1, 0.0, 1.0).unwrap());
    /// spectrum.fill_with(0.5, 4.0);
    /// spectrum.scale(0.5);
    ///
    /// assert_eq!(spectrum.bin_content(0), 2.0);
    /// assert_eq!(spectrum.bin_error(0), 2.0);
    /// ```
    pub fn scale(&mut self, factor: f64) {
        self.sums.iter_mut().for_each(|s| *s *= factor);
        self.sumw2.iter_mut().for_each(|w2| *w2 *= factor * factor);
    }

    /// Normalise the spectrum to a target exposure
    ///
    /// The usual beam normalisation: a simulated spectrum filled at one
    /// exposure is scaled by `target / exposure` for comparison against a
    /// sample recorded at `target`. Fails on spectra with no recorded
    /// exposure.
    pub fn scale_to_exposure(&mut self, target: f64) -> Result<()> {
        if self.exposure <= 0.0 {
            return Err(Error::InvalidExposure {
                exposure: self.exposure,
            });
        }
        self.scale(target / self.exposure);
        self.exposure = target;
        Ok(())
    }

    /// Bin-by-bin sum of two spectra
    ///
    /// Uncertainties combine in quadrature. The binnings must be identical.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        let mut out = self.checked_clone(other)?;
        for bin in 0..out.sums.len() {
            out.sums[bin] += other.sums[bin];
            out.sumw2[bin] += other.sumw2[bin];
        }
        out.entries += other.entries;
        Ok(out)
    }

    /// Bin-by-bin difference of two spectra
    ///
    /// Uncertainties combine in quadrature. The binnings must be identical.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        let mut out = self.checked_clone(other)?;
        for bin in 0..out.sums.len() {
            out.sums[bin] -= other.sums[bin];
            out.sumw2[bin] += other.sumw2[bin];
        }
        out.entries += other.entries;
        Ok(out)
    }

    /// Clone after confirming the binnings agree
    fn checked_clone(&self, other: &Self) -> Result<Self> {
        if self.binning != other.binning {
            return Err(Error::BinningMismatch {
                left: self.binning.n_bins(),
                right: other.binning.n_bins(),
            });
        }
        Ok(self.clone())
    }
}

impl std::fmt::Display for Spectrum {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let edges = self.binning.edges();
        let mut s = f!(
            "{:>12} {:>12} {:>13} {:>13}\n",
            "lower", "upper", "content", "error"
        );
        for bin in 0..self.binning.n_bins() {
            s += &f!(
                "{:>12} {:>12} {:>13} {:>13}\n",
                edges[bin].sci(4, 2),
                edges[bin + 1].sci(4, 2),
                self.sums[bin].sci(5, 2),
                self.bin_error(bin).sci(5, 2)
            );
        }
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_bins() -> Spectrum {
        Spectrum::new(Binning::uniform(2, 0.0, 2.0).unwrap())
    }

    #[test]
    fn weighted_fills_accumulate() {
        let mut spectrum = two_bins();
        assert!(spectrum.fill_with(0.5, 2.0));
        assert!(spectrum.fill_with(0.5, 3.0));
        assert!(!spectrum.fill_with(5.0, 1.0));

        assert_eq!(spectrum.bin_content(0), 5.0);
        assert_eq!(spectrum.bin_error(0), 13.0_f64.sqrt());
        assert_eq!(spectrum.entries(), 2);
    }

    #[test]
    fn exposure_scaling_preserves_relative_error() {
        let mut spectrum = two_bins();
        spectrum.fill_with(0.5, 4.0);
        spectrum.set_exposure(1.0e20);

        let relative = spectrum.bin_error(0) / spectrum.bin_content(0);
        spectrum.scale_to_exposure(3.0e20).unwrap();

        assert_eq!(spectrum.bin_content(0), 12.0);
        assert!((spectrum.bin_error(0) / spectrum.bin_content(0) - relative).abs() < 1e-12);
        assert_eq!(spectrum.exposure(), 3.0e20);
    }

    #[test]
    fn rescaling_without_exposure_is_an_error() {
        let mut spectrum = two_bins();
        assert!(spectrum.scale_to_exposure(1.0e20).is_err());
    }

    #[test]
    fn arithmetic_requires_matching_binnings() {
        let mut a = two_bins();
        let mut b = two_bins();
        a.fill(0.5);
        b.fill_with(1.5, 2.0);

        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum.contents(), &[1.0, 2.0]);

        let diff = a.try_sub(&b).unwrap();
        assert_eq!(diff.contents(), &[1.0, -2.0]);

        let other = Spectrum::new(Binning::uniform(3, 0.0, 2.0).unwrap());
        assert!(a.try_add(&other).is_err());
    }
}
