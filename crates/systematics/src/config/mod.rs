//! Configuration of a propagation run
//!
//! The configuration is a plain-text file of keyword blocks, parsed line
//! by line. One `settings` block names the nominal table, the observable,
//! and the binning; every further block declares one systematic source to
//! propagate, and its section name keys the output.
//!
//! ```text
//! # flux and cross-section uncertainties for the 1muNp selection
//! settings
//!     table      out/mc/selectedNu.jsonl
//!     exposure   2.5e20
//!     variable   reco_edep
//!     bins       uniform 25 0.0 3000.0
//! end
//!
//! multisim flux_all
//!     source     flux
//!     universes  100
//! end
//! ```

mod parsers;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use spinetools_spectrum::Binning;

use crate::error::{Error, Result};
use parsers::{BinSpec, Header};

/// Default cap applied to pathological event weights
const DEFAULT_WEIGHT_CAP: f64 = 100.0;

/// Global settings of a propagation run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// The nominal selected-event table
    pub table: PathBuf,
    /// Exposure of the nominal table (POT), if known
    pub exposure: Option<f64>,
    /// Branch name of the observable to histogram
    pub variable: String,
    /// Binning of the observable
    pub binning: Binning,
    /// Weights above this (or undefined) are clamped
    pub weight_cap: f64,
}

/// A table path with an optional exposure
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePath {
    /// Path to the selected-event table
    pub path: PathBuf,
    /// Exposure of the table (POT), if known
    pub exposure: Option<f64>,
}

/// The behaviour of one systematic source
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Per-event weight vector, one weight per random universe
    Multisim {
        /// Weight-set label in the event records
        source: String,
        /// Number of universes to propagate
        universes: usize,
    },
    /// Per-event weights at discrete sigma points of one parameter
    Multisigma {
        /// Weight-set label in the event records
        source: String,
        /// The sigma ladder, in the order of the weight vector
        sigmas: Vec<f64>,
    },
    /// Alternately-simulated samples substituted for the nominal
    Variation {
        /// Block-local nominal table, defaulting to the global one
        nominal: Option<SamplePath>,
        /// The alternate samples
        samples: Vec<SamplePath>,
        /// Size of the variation in standard deviations
        scale: f64,
    },
}

impl Kind {
    /// Short label of the kind, used in outputs
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Multisim { .. } => "multisim",
            Self::Multisigma { .. } => "multisigma",
            Self::Variation { .. } => "variation",
        }
    }
}

/// One named systematic source
#[derive(Debug, Clone, PartialEq)]
pub struct Systematic {
    /// Section name, keys the output
    pub name: String,
    /// Propagation behaviour
    pub kind: Kind,
}

/// Complete configuration of a propagation run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Global settings
    pub settings: Settings,
    /// Systematic sources in declaration order
    pub systematics: Vec<Systematic>,
}

impl Config {
    /// Read and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Parse and validate configuration text
    pub fn parse(text: &str) -> Result<Self> {
        Parser::new(text).parse()
    }
}

// ---------------------------------------------------------------------------
// Internal line-by-line parser
// ---------------------------------------------------------------------------

/// Numbered, comment-stripped lines of the configuration
struct Parser<'t> {
    lines: Vec<(usize, &'t str)>,
    cursor: usize,
}

impl<'t> Parser<'t> {
    fn new(text: &'t str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| {
                // strip comments, keep the 1-based line number
                let code = line.split('#').next().unwrap_or("").trim();
                (idx + 1, code)
            })
            .filter(|(_, code)| !code.is_empty())
            .collect();
        Self { lines, cursor: 0 }
    }

    fn parse(mut self) -> Result<Config> {
        let mut settings = None;
        let mut systematics: Vec<Systematic> = Vec::new();
        let mut names = BTreeSet::new();

        while let Some((line, code)) = self.next_line() {
            let (_, header) = parsers::section_header(code).map_err(|_| Error::ConfigError {
                line,
                reason: format!("expected a section header, found \"{code}\""),
            })?;

            match header {
                Header::Settings => settings = Some(self.settings_block()?),
                Header::Multisim(name) => {
                    if !names.insert(name.clone()) {
                        return Err(Error::DuplicateSection(name));
                    }
                    let kind = self.multisim_block(&name)?;
                    systematics.push(Systematic { name, kind });
                }
                Header::Multisigma(name) => {
                    if !names.insert(name.clone()) {
                        return Err(Error::DuplicateSection(name));
                    }
                    let kind = self.multisigma_block(&name)?;
                    systematics.push(Systematic { name, kind });
                }
                Header::Variation(name) => {
                    if !names.insert(name.clone()) {
                        return Err(Error::DuplicateSection(name));
                    }
                    let kind = self.variation_block(&name)?;
                    systematics.push(Systematic { name, kind });
                }
            }
        }

        let settings = settings.ok_or(Error::MissingKey {
            section: "settings".to_string(),
            key: "table",
        })?;

        Ok(Config {
            settings,
            systematics,
        })
    }

    fn next_line(&mut self) -> Option<(usize, &'t str)> {
        let line = self.lines.get(self.cursor).copied();
        self.cursor += 1;
        line
    }

    /// Collect the key lines of a block up to its `end`
    fn block_lines(&mut self, section: &str) -> Result<Vec<(usize, &'t str)>> {
        let mut lines = Vec::new();
        loop {
            match self.next_line() {
                Some((_, code)) if parsers::is_end(code) => return Ok(lines),
                Some(entry) => lines.push(entry),
                None => {
                    return Err(Error::UnterminatedSection {
                        section: section.to_string(),
                    })
                }
            }
        }
    }

    fn settings_block(&mut self) -> Result<Settings> {
        let mut table = None;
        let mut exposure = None;
        let mut variable = None;
        let mut binning = None;
        let mut weight_cap = DEFAULT_WEIGHT_CAP;

        for (line, code) in self.block_lines("settings")? {
            let (rest, key) = keyword(code, line)?;
            match key {
                "table" => {
                    let (path, exp) = parse_with(parsers::path_value, rest, line)?;
                    table = Some(PathBuf::from(path));
                    exposure = exposure.or(exp);
                }
                "exposure" => exposure = Some(parse_with(parsers::double_value, rest, line)?),
                "variable" => {
                    variable = Some(parse_with(parsers::identifier, rest.trim_start(), line)?.to_string())
                }
                "bins" => binning = Some(build_binning(parse_with(parsers::bin_spec, rest, line)?, line)?),
                "weight_cap" => weight_cap = parse_with(parsers::double_value, rest, line)?,
                _ => return unknown_key(key, line),
            }
        }

        Ok(Settings {
            table: table.ok_or(missing("settings", "table"))?,
            exposure,
            variable: variable.ok_or(missing("settings", "variable"))?,
            binning: binning.ok_or(missing("settings", "bins"))?,
            weight_cap,
        })
    }

    fn multisim_block(&mut self, name: &str) -> Result<Kind> {
        let mut source = None;
        let mut universes = None;

        for (line, code) in self.block_lines(name)? {
            let (rest, key) = keyword(code, line)?;
            match key {
                "source" => {
                    source = Some(parse_with(parsers::identifier, rest.trim_start(), line)?.to_string())
                }
                "universes" => universes = Some(parse_with(parsers::uint, rest, line)?),
                _ => return unknown_key(key, line),
            }
        }

        let universes = universes.ok_or(missing(name, "universes"))?;
        if universes == 0 {
            return Err(Error::ZeroUniverses(name.to_string()));
        }

        Ok(Kind::Multisim {
            source: source.ok_or(missing(name, "source"))?,
            universes,
        })
    }

    fn multisigma_block(&mut self, name: &str) -> Result<Kind> {
        let mut source = None;
        let mut sigmas: Option<Vec<f64>> = None;

        for (line, code) in self.block_lines(name)? {
            let (rest, key) = keyword(code, line)?;
            match key {
                "source" => {
                    source = Some(parse_with(parsers::identifier, rest.trim_start(), line)?.to_string())
                }
                "sigmas" => sigmas = Some(parse_with(parsers::double_list, rest, line)?),
                _ => return unknown_key(key, line),
            }
        }

        let sigmas = sigmas.ok_or(missing(name, "sigmas"))?;
        validate_sigmas(name, &sigmas)?;

        Ok(Kind::Multisigma {
            source: source.ok_or(missing(name, "source"))?,
            sigmas,
        })
    }

    fn variation_block(&mut self, name: &str) -> Result<Kind> {
        let mut nominal = None;
        let mut samples = Vec::new();
        let mut scale = 1.0;

        for (line, code) in self.block_lines(name)? {
            let (rest, key) = keyword(code, line)?;
            match key {
                "nominal" => {
                    let (path, exposure) = parse_with(parsers::path_value, rest, line)?;
                    nominal = Some(SamplePath {
                        path: PathBuf::from(path),
                        exposure,
                    });
                }
                "sample" => {
                    let (path, exposure) = parse_with(parsers::path_value, rest, line)?;
                    samples.push(SamplePath {
                        path: PathBuf::from(path),
                        exposure,
                    });
                }
                "scale" => scale = parse_with(parsers::double_value, rest, line)?,
                _ => return unknown_key(key, line),
            }
        }

        if samples.is_empty() {
            return Err(Error::EmptyVariation(name.to_string()));
        }

        Ok(Kind::Variation {
            nominal,
            samples,
            scale,
        })
    }
}

/// The sigma ladder must pair every +n with a -n and include the unit points
fn validate_sigmas(name: &str, sigmas: &[f64]) -> Result<()> {
    for sigma in sigmas {
        if !sigmas.contains(&-sigma) {
            return Err(Error::UnpairedSigma {
                section: name.to_string(),
                sigma: *sigma,
            });
        }
    }
    if !sigmas.contains(&1.0) || !sigmas.contains(&-1.0) {
        return Err(Error::MissingUnitSigma(name.to_string()));
    }
    Ok(())
}

fn build_binning(spec: BinSpec, line: usize) -> Result<Binning> {
    let binning = match spec {
        BinSpec::Uniform {
            n_bins,
            lower,
            upper,
        } => Binning::uniform(n_bins, lower, upper),
        BinSpec::Edges(edges) => Binning::from_edges(edges),
    };
    binning.map_err(|e| Error::ConfigError {
        line,
        reason: e.to_string(),
    })
}

fn keyword<'t>(code: &'t str, line: usize) -> Result<(&'t str, &'t str)> {
    parsers::keyword(code).map_err(|_| Error::ConfigError {
        line,
        reason: format!("expected a keyword, found \"{code}\""),
    })
}

/// Run a nom parser over the remainder of a key line
fn parse_with<'t, T, F>(parser: F, rest: &'t str, line: usize) -> Result<T>
where
    F: Fn(&'t str) -> nom::IResult<&'t str, T>,
{
    match parser(rest) {
        Ok((_, value)) => Ok(value),
        Err(_) => Err(Error::ConfigError {
            line,
            reason: format!("could not parse value from \"{}\"", rest.trim()),
        }),
    }
}

fn unknown_key<T>(key: &str, line: usize) -> Result<T> {
    Err(Error::ConfigError {
        line,
        reason: format!("unknown keyword \"{key}\""),
    })
}

fn missing(section: &str, key: &'static str) -> Error {
    Error::MissingKey {
        section: section.to_string(),
        key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const MINIMAL: &str = r"
        settings
            table    out/mc/selectedNu.jsonl
            variable reco_edep
            bins     uniform 10 0.0 3000.0
        end
    ";

    #[test]
    fn minimal_settings_parse_with_defaults() {
        let config = Config::parse(MINIMAL).unwrap();
        assert_eq!(config.settings.variable, "reco_edep");
        assert_eq!(config.settings.binning.n_bins(), 10);
        assert_eq!(config.settings.weight_cap, DEFAULT_WEIGHT_CAP);
        assert_eq!(config.settings.exposure, None);
        assert!(config.systematics.is_empty());
    }

    #[test]
    fn full_configuration_parses() {
        let text = r"
            # a full propagation
            settings
                table      out/mc/selectedNu.jsonl
                exposure   2.5e20
                variable   reco_edep
                bins       edges 0.0 500.0 1000.0 3000.0
                weight_cap 30.0
            end

            multisim flux_all
                source    flux
                universes 100
            end

            multisigma genie_maccres
                source MaCCRES
                sigmas -3 -2 -1 1 2 3
            end

            variation tpc_gain
                nominal  out/var_nominal/selectedNu.jsonl 1.0e20
                sample   out/var_low/selectedNu.jsonl 1.1e20
                sample   out/var_high/selectedNu.jsonl 0.9e20
                scale    1.0
            end
        ";
        let config = Config::parse(text).unwrap();

        assert_eq!(config.settings.weight_cap, 30.0);
        assert_eq!(config.systematics.len(), 3);
        assert_eq!(config.systematics[0].kind.label(), "multisim");

        match &config.systematics[2].kind {
            Kind::Variation {
                nominal, samples, ..
            } => {
                assert_eq!(nominal.as_ref().unwrap().exposure, Some(1.0e20));
                assert_eq!(samples.len(), 2);
            }
            other => panic!("expected a variation, got {other:?}"),
        }
    }

    #[rstest]
    #[case("settings\n bins uniform 10 0.0 3000.0\n variable x\nend", "table")]
    #[case("settings\n table a.jsonl\n bins uniform 1 0.0 1.0\nend", "variable")]
    #[case("settings\n table a.jsonl\n variable x\nend", "bins")]
    fn missing_settings_keys_are_named(#[case] text: &str, #[case] key: &str) {
        match Config::parse(text) {
            Err(Error::MissingKey { key: k, .. }) => assert_eq!(k, key),
            other => panic!("expected a missing key error, got {other:?}"),
        }
    }

    #[test]
    fn bad_sections_are_rejected() {
        let text = format!("{MINIMAL}\nmultisim flux\n source flux\n universes 0\nend");
        assert!(matches!(
            Config::parse(&text),
            Err(Error::ZeroUniverses(name)) if name == "flux"
        ));

        let text = format!("{MINIMAL}\nmultisigma g\n source g\n sigmas -1 1 2\nend");
        assert!(matches!(
            Config::parse(&text),
            Err(Error::UnpairedSigma { sigma, .. }) if sigma == 2.0
        ));

        let text = format!("{MINIMAL}\nmultisigma g\n source g\n sigmas -2 2\nend");
        assert!(matches!(
            Config::parse(&text),
            Err(Error::MissingUnitSigma(_))
        ));

        let text = format!("{MINIMAL}\nvariation v\n scale 1.0\nend");
        assert!(matches!(Config::parse(&text), Err(Error::EmptyVariation(_))));

        let text = format!("{MINIMAL}\nmultisim flux\n source flux\n universes 5");
        assert!(matches!(
            Config::parse(&text),
            Err(Error::UnterminatedSection { .. })
        ));

        let text = format!(
            "{MINIMAL}\nmultisim a\n source s\n universes 1\nend\nmultisim a\n source s\n universes 1\nend"
        );
        assert!(matches!(
            Config::parse(&text),
            Err(Error::DuplicateSection(name)) if name == "a"
        ));
    }

    #[test]
    fn stray_lines_report_their_number() {
        let text = "settings\n table a.jsonl\n variable x\n bins uniform 1 0.0 1.0\nend\nnonsense here";
        match Config::parse(text) {
            Err(Error::ConfigError { line, .. }) => assert_eq!(line, 6),
            other => panic!("expected a config error, got {other:?}"),
        }
    }
}
