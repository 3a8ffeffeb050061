//! Module for propagation results and their writers

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use spinetools_spectrum::Spectrum;
use spinetools_utils::{f, ValueExt};

use crate::covariance::Covariance;
use crate::error::Result;

/// The propagated ensemble of one systematic source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystematicResult {
    /// Kind label: "multisim", "multisigma", or "variation"
    pub kind: String,
    /// One spectrum per universe, sigma point, or variation sample
    pub universes: Vec<Spectrum>,
    /// The sigma ladder, for multisigma sources only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigmas: Option<Vec<f64>>,
    /// Covariance of the source over the observable bins
    pub covariance: Covariance,
}

impl SystematicResult {
    /// Fractional uncertainty on the total selected count
    ///
    /// The square root of the summed covariance over the nominal integral,
    /// NaN for an empty nominal.
    pub fn fractional_uncertainty(&self, nominal: &Spectrum) -> f64 {
        let total: f64 = (0..self.covariance.n_bins())
            .flat_map(|i| (0..self.covariance.n_bins()).map(move |j| (i, j)))
            .map(|(i, j)| self.covariance.get(i, j))
            .sum();
        total.sqrt() / nominal.integral()
    }
}

/// Complete output of a propagation run, keyed by config section names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropagationResult {
    /// Branch name of the propagated observable
    pub variable: String,
    /// The nominal spectrum of the observable
    pub nominal: Spectrum,
    /// Per-source ensembles keyed by section name
    pub systematics: BTreeMap<String, SystematicResult>,
    /// Elementwise sum of every source covariance
    pub total: Covariance,
}

impl PropagationResult {
    /// Write the full result document as JSON
    ///
    /// Everything a plotting stage needs: the nominal, every universe
    /// spectrum, and the covariances, keyed by the section names of the
    /// configuration.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Export every covariance matrix as a CSV file under `dir`
    ///
    /// One `<section>.cov.csv` per source plus `total.cov.csv`, each a
    /// square matrix of floats with one row per record.
    pub fn write_covariance_csv<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for (name, result) in &self.systematics {
            write_matrix(&dir.join(f!("{name}.cov.csv")), &result.covariance)?;
        }
        write_matrix(&dir.join("total.cov.csv"), &self.total)
    }

    /// Per-bin uncertainty band of the combined covariance
    pub fn uncertainty_band(&self) -> Vec<f64> {
        self.total.uncertainties()
    }
}

/// Write one covariance matrix as CSV records
fn write_matrix(path: &Path, covariance: &Covariance) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in 0..covariance.n_bins() {
        let record: Vec<String> = (0..covariance.n_bins())
            .map(|column| covariance.get(row, column).to_string())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

impl std::fmt::Display for PropagationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let head = f!(
            " > systematics on \"{}\" ({} bins, nominal integral {})",
            self.variable,
            self.nominal.binning().n_bins(),
            self.nominal.integral().sci(4, 2)
        );
        let mut s = f!("{}\n{}\n{}\n", "-".repeat(60), head, "-".repeat(60));

        s += &f!(
            "{:<24} {:<10} {:>9} {:>12}\n",
            "systematic", "kind", "universes", "fractional"
        );
        for (name, result) in &self.systematics {
            s += &f!(
                "{:<24} {:<10} {:>9} {:>12}\n",
                name,
                result.kind,
                result.universes.len(),
                result.fractional_uncertainty(&self.nominal).sci(2, 2)
            );
        }

        let combined: f64 = self.total.matrix().sum();
        s += &f!(
            "{:<24} {:<10} {:>9} {:>12}\n",
            "total", "", "",
            (combined.sqrt() / self.nominal.integral()).sci(2, 2)
        );
        write!(f, "{s}")
    }
}
