//! Module for the propagation engine

use std::collections::BTreeMap;

use log::{info, warn};
use rayon::prelude::*;

use spinetools_analysis::{read_rows, Row};
use spinetools_spectrum::Spectrum;

use crate::config::{Config, Kind, Systematic};
use crate::covariance::Covariance;
use crate::error::{Error, Result};
use crate::output::{PropagationResult, SystematicResult};

/// The systematic propagation engine
///
/// Loads the nominal selected-event table once, then histograms the
/// observable under every universe of every configured source. Sources are
/// independent of each other and are propagated in parallel.
#[derive(Debug)]
pub struct Propagator {
    config: Config,
}

impl Propagator {
    /// Initialise the engine with a validated configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Propagate every configured source
    pub fn run(&self) -> Result<PropagationResult> {
        let settings = &self.config.settings;

        info!("loading nominal table {}", settings.table.display());
        let rows = read_rows(&settings.table)?;
        let nominal = self.fill_unit(&rows, settings.exposure);
        info!(
            "nominal: {} rows, integral {}",
            rows.len(),
            nominal.integral()
        );

        // sources are independent, so universes fill in parallel
        let results: Vec<(String, SystematicResult)> = self
            .config
            .systematics
            .par_iter()
            .map(|syst| Ok((syst.name.clone(), self.propagate(syst, &rows, &nominal)?)))
            .collect::<Result<_>>()?;

        let mut total = Covariance::zeros(settings.binning.n_bins());
        for (_, result) in &results {
            total = total.try_add(&result.covariance)?;
        }

        Ok(PropagationResult {
            variable: settings.variable.clone(),
            nominal,
            systematics: results.into_iter().collect::<BTreeMap<_, _>>(),
            total,
        })
    }

    /// Propagate a single source
    fn propagate(
        &self,
        syst: &Systematic,
        rows: &[Row],
        nominal: &Spectrum,
    ) -> Result<SystematicResult> {
        match &syst.kind {
            Kind::Multisim { source, universes } => {
                let spectra = self.fill_weighted(rows, source, *universes)?;
                let covariance = Covariance::multisim(nominal, &spectra);
                Ok(SystematicResult {
                    kind: syst.kind.label().to_string(),
                    universes: spectra,
                    sigmas: None,
                    covariance,
                })
            }
            Kind::Multisigma { source, sigmas } => {
                let spectra = self.fill_weighted(rows, source, sigmas.len())?;
                let plus = sigma_index(sigmas, 1.0, &syst.name)?;
                let minus = sigma_index(sigmas, -1.0, &syst.name)?;
                let covariance = Covariance::symmetric_difference(&spectra[plus], &spectra[minus]);
                Ok(SystematicResult {
                    kind: syst.kind.label().to_string(),
                    universes: spectra,
                    sigmas: Some(sigmas.clone()),
                    covariance,
                })
            }
            Kind::Variation {
                nominal: block_nominal,
                samples,
                scale,
            } => {
                // variation samples are reconstructed under different
                // detector settings, so they difference against their own
                // nominal when one is given
                let (base, base_exposure) = match block_nominal {
                    Some(sample) => {
                        let rows = read_rows(&sample.path)?;
                        (self.fill_unit(&rows, sample.exposure), sample.exposure)
                    }
                    None => (nominal.clone(), self.config.settings.exposure),
                };

                let mut spectra = Vec::with_capacity(samples.len());
                for sample in samples {
                    let rows = read_rows(&sample.path)?;
                    let mut spectrum = self.fill_unit(&rows, sample.exposure);
                    // bring the alternate sample onto the nominal exposure
                    if let (Some(target), Some(_)) = (base_exposure, sample.exposure) {
                        spectrum.scale_to_exposure(target)?;
                    }
                    spectra.push(spectrum);
                }

                let covariance = Covariance::scaled_shifts(&base, &spectra, *scale);
                Ok(SystematicResult {
                    kind: syst.kind.label().to_string(),
                    universes: spectra,
                    sigmas: None,
                    covariance,
                })
            }
        }
    }

    /// Histogram the observable with unit weights
    fn fill_unit(&self, rows: &[Row], exposure: Option<f64>) -> Spectrum {
        let settings = &self.config.settings;
        let mut spectrum = Spectrum::new(settings.binning.clone());
        for row in rows {
            spectrum.fill(row.value(&settings.variable));
        }
        if let Some(exposure) = exposure {
            spectrum.set_exposure(exposure);
        }
        spectrum
    }

    /// Histogram the observable once per universe of a weight source
    ///
    /// Streams the rows once, filling all universes in the same pass.
    /// Pathological weights are sanitised rather than fatal: negatives are
    /// floored at zero, non-finite weights are replaced by unity, and
    /// anything above the configured cap is clamped to it.
    fn fill_weighted(&self, rows: &[Row], source: &str, n: usize) -> Result<Vec<Spectrum>> {
        let settings = &self.config.settings;
        let mut spectra = vec![Spectrum::new(settings.binning.clone()); n];
        let mut sanitised = 0_usize;

        for (idx, row) in rows.iter().enumerate() {
            let value = row.value(&settings.variable);
            let weights = row.weight_set(source).ok_or_else(|| Error::MissingWeightSource {
                source_name: source.to_string(),
                row: idx + 1,
            })?;
            if weights.len() < n {
                return Err(Error::ShortWeightVector {
                    source_name: source.to_string(),
                    row: idx + 1,
                    expected: n,
                    found: weights.len(),
                });
            }

            for (universe, weight) in weights.iter().take(n).enumerate() {
                let mut w = *weight;
                if !w.is_finite() {
                    w = 1.0;
                    sanitised += 1;
                } else if w < 0.0 || w > settings.weight_cap {
                    w = w.clamp(0.0, settings.weight_cap);
                    sanitised += 1;
                }
                spectra[universe].fill_with(value, w);
            }
        }

        if sanitised > 0 {
            warn!("sanitised {sanitised} pathological weights from \"{source}\"");
        }

        if let Some(exposure) = settings.exposure {
            for spectrum in &mut spectra {
                spectrum.set_exposure(exposure);
            }
        }

        Ok(spectra)
    }
}

/// Position of a sigma point in the ladder
fn sigma_index(sigmas: &[f64], sigma: f64, section: &str) -> Result<usize> {
    sigmas
        .iter()
        .position(|s| *s == sigma)
        .ok_or_else(|| Error::MissingUnitSigma(section.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use spinetools_spectrum::Binning;
    use std::path::PathBuf;

    fn propagator(weight_cap: f64) -> Propagator {
        Propagator::new(Config {
            settings: Settings {
                table: PathBuf::from("unused.jsonl"),
                exposure: None,
                variable: "x".to_string(),
                binning: Binning::uniform(2, 0.0, 2.0).unwrap(),
                weight_cap,
            },
            systematics: Vec::new(),
        })
    }

    fn row(value: f64, weights: &[f64]) -> Row {
        let mut row = Row::default();
        row.insert("x", value);
        row.weights.insert("w".to_string(), weights.to_vec());
        row
    }

    #[test]
    fn universes_fill_from_their_own_weights() {
        let rows = vec![row(0.5, &[2.0, 0.5]), row(1.5, &[1.0, 1.0])];
        let spectra = propagator(100.0).fill_weighted(&rows, "w", 2).unwrap();

        assert_eq!(spectra[0].contents(), &[2.0, 1.0]);
        assert_eq!(spectra[1].contents(), &[0.5, 1.0]);
    }

    #[test]
    fn pathological_weights_are_sanitised() {
        let rows = vec![row(0.5, &[f64::NAN, -3.0, 250.0])];
        let spectra = propagator(100.0).fill_weighted(&rows, "w", 3).unwrap();

        assert_eq!(spectra[0].contents(), &[1.0, 0.0]); // NaN -> unity
        assert_eq!(spectra[1].contents(), &[0.0, 0.0]); // negative -> zero
        assert_eq!(spectra[2].contents(), &[100.0, 0.0]); // capped
    }

    #[test]
    fn missing_and_short_weight_sets_are_fatal() {
        let rows = vec![row(0.5, &[1.0])];
        let p = propagator(100.0);

        assert!(matches!(
            p.fill_weighted(&rows, "absent", 1),
            Err(Error::MissingWeightSource { row: 1, .. })
        ));
        assert!(matches!(
            p.fill_weighted(&rows, "w", 2),
            Err(Error::ShortWeightVector { expected: 2, found: 1, .. })
        ));
    }
}
