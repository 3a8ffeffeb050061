//! Module for covariance matrices over spectrum bins

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use spinetools_spectrum::Spectrum;
use spinetools_utils::{f, ValueExt};

use crate::error::{Error, Result};

/// A symmetric covariance matrix over the bins of a spectrum
///
/// Stored row-major for straightforward serialisation; the estimator
/// constructors build it from ensembles of spectra through nalgebra.
///
/// ```rust
/// # use spinetools_systematics::Covariance;
/// let cov = Covariance::zeros(3);
/// assert_eq!(cov.n_bins(), 3);
/// assert_eq!(cov.uncertainties(), vec![0.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Covariance {
    n_bins: usize,
    elements: Vec<f64>,
}

impl Covariance {
    /// The zero matrix over `n_bins` bins
    pub fn zeros(n_bins: usize) -> Self {
        Self {
            n_bins,
            elements: vec![0.0; n_bins * n_bins],
        }
    }

    /// Wrap a square nalgebra matrix
    pub(crate) fn from_matrix(matrix: &DMatrix<f64>) -> Self {
        Self {
            n_bins: matrix.nrows(),
            elements: matrix.transpose().as_slice().to_vec(),
        }
    }

    /// View as an nalgebra matrix for further algebra
    pub fn matrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.n_bins, self.n_bins, &self.elements)
    }

    /// Number of bins the matrix covers
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Element at (row, column)
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.elements[row * self.n_bins + column]
    }

    /// The variance diagonal
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.n_bins).map(|i| self.get(i, i)).collect()
    }

    /// Per-bin uncertainty, the square root of the diagonal
    pub fn uncertainties(&self) -> Vec<f64> {
        self.diagonal().iter().map(|v| v.sqrt()).collect()
    }

    /// The correlation matrix
    ///
    /// Bins with zero variance are mapped to zero correlation rather than
    /// NaN so empty bins do not poison downstream consumers.
    pub fn correlation(&self) -> Self {
        let sigma = self.uncertainties();
        let mut out = Self::zeros(self.n_bins);
        for i in 0..self.n_bins {
            for j in 0..self.n_bins {
                let denominator = sigma[i] * sigma[j];
                out.elements[i * self.n_bins + j] = if denominator > 0.0 {
                    self.get(i, j) / denominator
                } else {
                    0.0
                };
            }
        }
        out
    }

    /// Elementwise sum of two matrices
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        if self.n_bins != other.n_bins {
            return Err(Error::DimensionMismatch {
                left: self.n_bins,
                right: other.n_bins,
            });
        }
        let elements = self
            .elements
            .iter()
            .zip(&other.elements)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self {
            n_bins: self.n_bins,
            elements,
        })
    }

    /// Multisim estimator: the mean outer product of universe shifts
    ///
    /// `C_ij = mean_u [ (h_u - h_nom)_i (h_u - h_nom)_j ]`
    pub fn multisim(nominal: &Spectrum, universes: &[Spectrum]) -> Self {
        let n = nominal.contents().len();
        let mut matrix = DMatrix::zeros(n, n);
        for universe in universes {
            let shift = shift_vector(nominal, universe);
            matrix += &shift * shift.transpose();
        }
        if !universes.is_empty() {
            matrix /= universes.len() as f64;
        }
        Self::from_matrix(&matrix)
    }

    /// Multisigma estimator: the symmetric one-sigma difference
    ///
    /// `v = (h(+1) - h(-1)) / 2`, `C = v v^T`
    pub fn symmetric_difference(plus: &Spectrum, minus: &Spectrum) -> Self {
        let v = DVector::from_iterator(
            plus.contents().len(),
            plus.contents()
                .iter()
                .zip(minus.contents())
                .map(|(p, m)| 0.5 * (p - m)),
        );
        Self::from_matrix(&(&v * v.transpose()))
    }

    /// Variation estimator: the mean outer product of scaled sample shifts
    ///
    /// Each alternate sample is treated as an estimate of the same
    /// `scale`-sigma shift, so `C = mean_s [ v_s v_s^T ]` with
    /// `v_s = (h_s - h_nom) / scale`.
    pub fn scaled_shifts(nominal: &Spectrum, samples: &[Spectrum], scale: f64) -> Self {
        let n = nominal.contents().len();
        let mut matrix = DMatrix::zeros(n, n);
        for sample in samples {
            let v = shift_vector(nominal, sample) / scale;
            matrix += &v * v.transpose();
        }
        if !samples.is_empty() {
            matrix /= samples.len() as f64;
        }
        Self::from_matrix(&matrix)
    }
}

/// Bin-by-bin shift of a spectrum from the nominal
fn shift_vector(nominal: &Spectrum, shifted: &Spectrum) -> DVector<f64> {
    DVector::from_iterator(
        nominal.contents().len(),
        shifted
            .contents()
            .iter()
            .zip(nominal.contents())
            .map(|(s, n)| s - n),
    )
}

impl std::fmt::Display for Covariance {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = String::new();
        for i in 0..self.n_bins {
            for j in 0..self.n_bins {
                s += &f!("{:>13}", self.get(i, j).sci(4, 2));
            }
            s += "\n";
        }
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinetools_spectrum::Binning;

    fn spectrum(contents: &[f64]) -> Spectrum {
        let n = contents.len();
        let mut s = Spectrum::new(Binning::uniform(n, 0.0, n as f64).unwrap());
        for (bin, value) in contents.iter().enumerate() {
            s.fill_with(bin as f64 + 0.5, *value);
        }
        s
    }

    #[test]
    fn multisim_covariance_matches_by_hand() {
        let nominal = spectrum(&[10.0, 20.0]);
        let universes = vec![spectrum(&[12.0, 19.0]), spectrum(&[8.0, 21.0])];

        let cov = Covariance::multisim(&nominal, &universes);
        // shifts are (2, -1) and (-2, 1), so C = [[4, -2], [-2, 1]]
        assert_eq!(cov.get(0, 0), 4.0);
        assert_eq!(cov.get(0, 1), -2.0);
        assert_eq!(cov.get(1, 0), -2.0);
        assert_eq!(cov.get(1, 1), 1.0);
    }

    #[test]
    fn symmetric_difference_is_an_outer_product() {
        let plus = spectrum(&[12.0, 22.0]);
        let minus = spectrum(&[8.0, 20.0]);

        let cov = Covariance::symmetric_difference(&plus, &minus);
        // v = (2, 1)
        assert_eq!(cov.get(0, 0), 4.0);
        assert_eq!(cov.get(0, 1), 2.0);
        assert_eq!(cov.get(1, 1), 1.0);
    }

    #[test]
    fn scaled_shifts_divide_by_sigma() {
        let nominal = spectrum(&[10.0]);
        let samples = vec![spectrum(&[16.0])];

        let cov = Covariance::scaled_shifts(&nominal, &samples, 2.0);
        // v = 6 / 2 = 3
        assert_eq!(cov.get(0, 0), 9.0);
    }

    #[test]
    fn correlation_of_a_perfectly_correlated_pair_is_unity() {
        let nominal = spectrum(&[10.0, 20.0]);
        let universes = vec![spectrum(&[12.0, 24.0]), spectrum(&[8.0, 16.0])];

        let corr = Covariance::multisim(&nominal, &universes).correlation();
        assert!((corr.get(0, 1) - 1.0).abs() < 1e-12);
        assert_eq!(corr.get(0, 0), 1.0);
    }

    #[test]
    fn zero_variance_bins_do_not_poison_correlations() {
        let cov = Covariance::zeros(2);
        let corr = cov.correlation();
        assert_eq!(corr.get(0, 1), 0.0);
    }

    #[test]
    fn addition_requires_matching_dimensions() {
        let a = Covariance::zeros(2);
        let b = Covariance::zeros(3);
        assert!(a.try_add(&b).is_err());
        assert!(a.try_add(&Covariance::zeros(2)).is_ok());
    }
}
