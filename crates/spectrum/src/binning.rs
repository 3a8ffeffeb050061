//! Module for bin-edge definitions

use serde::{Deserialize, Serialize};

use spinetools_utils::SliceExt;

use crate::error::{Error, Result};

/// An ordered set of bin edges defining a one-dimensional binning
///
/// `n + 1` edges define `n` bins. Edges must be finite and strictly
/// increasing, which is enforced on construction and on deserialisation.
///
/// ```rust
/// # use spinetools_spectrum::Binning;
/// // four uniform 0.5-wide bins
/// let uniform = Binning::uniform(4, 0.0, 2.0).unwrap();
/// assert_eq!(uniform.edges(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
///
/// // variable-width bins from explicit edges
/// let explicit = Binning::from_edges(vec![0.0, 0.5, 2.0]).unwrap();
/// assert_eq!(explicit.n_bins(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Binning {
    edges: Vec<f64>,
}

impl Binning {
    /// Build `n_bins` equal-width bins between `lower` and `upper`
    pub fn uniform(n_bins: usize, lower: f64, upper: f64) -> Result<Self> {
        if n_bins == 0 {
            return Err(Error::ZeroBins);
        }
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(Error::InvalidRange { lower, upper });
        }

        let width = (upper - lower) / n_bins as f64;
        let mut edges: Vec<f64> = (0..n_bins).map(|i| lower + i as f64 * width).collect();
        // the last edge is set exactly to avoid accumulated rounding
        edges.push(upper);

        Ok(Self { edges })
    }

    /// Build a binning from explicit edges
    pub fn from_edges(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::NotEnoughEdges { found: edges.len() });
        }
        if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::UnorderedEdges);
        }

        Ok(Self { edges })
    }

    /// Number of bins defined by the edges
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// The full ordered edge list
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Lowest edge of the binning
    pub fn lower(&self) -> f64 {
        self.edges[0]
    }

    /// Highest edge of the binning
    pub fn upper(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Midpoint of every bin
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }

    /// Width of every bin
    pub fn widths(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Find the bin containing `value`
    ///
    /// Bins are half-open from below, with the very top edge included in the
    /// last bin. Values outside the edges (or undefined) return `None` and
    /// are dropped by the fill methods rather than clamped.
    ///
    /// ```rust
    /// # use spinetools_spectrum::Binning;
    /// let binning = Binning::uniform(4, 0.0, 2.0).unwrap();
    /// assert_eq!(binning.find_bin(0.75), Some(1));
    /// assert_eq!(binning.find_bin(2.0), Some(3));
    /// assert_eq!(binning.find_bin(-0.1), None);
    /// assert_eq!(binning.find_bin(f64::NAN), None);
    /// ```
    pub fn find_bin(&self, value: f64) -> Option<usize> {
        self.edges.find_bin_exclusive(value).ok()
    }
}

impl TryFrom<Vec<f64>> for Binning {
    type Error = Error;

    fn try_from(edges: Vec<f64>) -> Result<Self> {
        Self::from_edges(edges)
    }
}

impl From<Binning> for Vec<f64> {
    fn from(binning: Binning) -> Self {
        binning.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_edges_are_exact_at_the_ends() {
        let binning = Binning::uniform(3, 0.0, 1.0).unwrap();
        assert_eq!(binning.lower(), 0.0);
        assert_eq!(binning.upper(), 1.0);
        assert_eq!(binning.n_bins(), 3);
    }

    #[test]
    fn construction_rejects_bad_edges() {
        assert!(Binning::from_edges(vec![1.0]).is_err());
        assert!(Binning::from_edges(vec![0.0, 0.0, 1.0]).is_err());
        assert!(Binning::from_edges(vec![0.0, f64::NAN]).is_err());
        assert!(Binning::uniform(0, 0.0, 1.0).is_err());
        assert!(Binning::uniform(5, 1.0, 1.0).is_err());
    }

    #[test]
    fn serde_validates_on_the_way_in() {
        let binning: Binning = serde_json::from_str("[0.0, 1.0, 4.0]").unwrap();
        assert_eq!(binning.n_bins(), 2);

        let bad: std::result::Result<Binning, _> = serde_json::from_str("[4.0, 1.0]");
        assert!(bad.is_err());
    }
}
