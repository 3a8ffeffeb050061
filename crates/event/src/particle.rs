//! Module for particle-level records and implementations

use serde::{Deserialize, Serialize};

/// Electron rest mass (MeV/c^2)
pub const ELECTRON_MASS: f64 = 0.5109989461;
/// Muon rest mass (MeV/c^2)
pub const MUON_MASS: f64 = 105.6583745;
/// Charged pion rest mass (MeV/c^2)
pub const PION_MASS: f64 = 139.57039;
/// Proton rest mass (MeV/c^2)
pub const PROTON_MASS: f64 = 938.2720813;

/// Five-species particle identity assigned by the reconstruction
///
/// The numeric codes are stable and index directly into the softmax score
/// arrays of a [RecoParticle]. Anything outside the five known species maps
/// to [Pid::Unknown].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Pid {
    /// Photon (code 0)
    Photon,
    /// Electron (code 1)
    Electron,
    /// Muon (code 2)
    Muon,
    /// Charged pion (code 3)
    Pion,
    /// Proton (code 4)
    Proton,
    /// Anything the reconstruction could not identify
    #[default]
    Unknown,
}

impl Pid {
    /// The numeric species code, `None` for [Pid::Unknown]
    ///
    /// ```rust
    /// # use spinetools_event::Pid;
    /// assert_eq!(Pid::Muon.code(), Some(2));
    /// assert_eq!(Pid::Unknown.code(), None);
    /// ```
    pub const fn code(&self) -> Option<usize> {
        match self {
            Self::Photon => Some(0),
            Self::Electron => Some(1),
            Self::Muon => Some(2),
            Self::Pion => Some(3),
            Self::Proton => Some(4),
            Self::Unknown => None,
        }
    }

    /// Rest mass of the species (MeV/c^2), NaN when unknown
    ///
    /// ```rust
    /// # use spinetools_event::Pid;
    /// assert_eq!(Pid::Photon.mass(), 0.0);
    /// assert!(Pid::Unknown.mass().is_nan());
    /// ```
    pub fn mass(&self) -> f64 {
        match self {
            Self::Photon => 0.0,
            Self::Electron => ELECTRON_MASS,
            Self::Muon => MUON_MASS,
            Self::Pion => PION_MASS,
            Self::Proton => PROTON_MASS,
            Self::Unknown => f64::NAN,
        }
    }

    /// Showers are reconstructed calorimetrically, tracks by range/scattering
    pub const fn is_shower(&self) -> bool {
        matches!(self, Self::Photon | Self::Electron)
    }

    /// The track species (muon, pion, proton)
    pub const fn is_track(&self) -> bool {
        matches!(self, Self::Muon | Self::Pion | Self::Proton)
    }
}

impl From<i64> for Pid {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Photon,
            1 => Self::Electron,
            2 => Self::Muon,
            3 => Self::Pion,
            4 => Self::Proton,
            _ => Self::Unknown,
        }
    }
}

impl From<Pid> for i64 {
    fn from(pid: Pid) -> Self {
        match pid.code() {
            Some(code) => code as i64,
            None => -1,
        }
    }
}

impl std::fmt::Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::Photon => "photon",
            Self::Electron => "electron",
            Self::Muon => "muon",
            Self::Pion => "pion",
            Self::Proton => "proton",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Pixel-level semantic classification of a particle
///
/// Assigned by majority vote over the semantic segmentation of the particle
/// image upstream in the reconstruction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Shape {
    /// Electromagnetic shower (code 0)
    Shower,
    /// Track-like deposition (code 1)
    Track,
    /// Michel electron (code 2)
    Michel,
    /// Delta ray (code 3)
    Delta,
    /// Low-energy deposition (code 4)
    LowEnergy,
    /// Ghost points (code 5)
    Ghost,
    /// No classification (code -1)
    #[default]
    Unknown,
}

impl From<i64> for Shape {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Shower,
            1 => Self::Track,
            2 => Self::Michel,
            3 => Self::Delta,
            4 => Self::LowEnergy,
            5 => Self::Ghost,
            _ => Self::Unknown,
        }
    }
}

impl From<Shape> for i64 {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Shower => 0,
            Shape::Track => 1,
            Shape::Michel => 2,
            Shape::Delta => 3,
            Shape::LowEnergy => 4,
            Shape::Ghost => 5,
            Shape::Unknown => -1,
        }
    }
}

/// Current type of a true neutrino interaction
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Current {
    /// Charged-current interaction (code 0)
    Charged,
    /// Neutral-current interaction (code 1)
    Neutral,
    /// Not a neutrino interaction (code -1)
    #[default]
    Unknown,
}

impl From<i64> for Current {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Charged,
            1 => Self::Neutral,
            _ => Self::Unknown,
        }
    }
}

impl From<Current> for i64 {
    fn from(current: Current) -> Self {
        match current {
            Current::Charged => 0,
            Current::Neutral => 1,
            Current::Unknown => -1,
        }
    }
}

/// Accessors shared by reconstructed and true particle records
///
/// Variables and cuts are written once against this trait and work on both
/// sides of the truth-matching. Definitions that differ between the two
/// sides, such as the kinetic energy estimate, live on the implementations.
pub trait ParticleView {
    /// Particle species
    fn pid(&self) -> Pid;

    /// Whether the particle is attached directly to the interaction vertex
    fn is_primary(&self) -> bool;

    /// Whether the particle deposit is fully contained in the active volume
    fn is_contained(&self) -> bool;

    /// Reconstructed track length (cm)
    fn length(&self) -> f64;

    /// Point where the particle is created (cm)
    fn start_point(&self) -> [f64; 3];

    /// Point where the particle stops or exits (cm)
    fn end_point(&self) -> [f64; 3];

    /// Unit direction at the start point
    fn start_dir(&self) -> [f64; 3];

    /// Momentum vector (MeV/c)
    fn momentum(&self) -> [f64; 3];

    /// Rest mass (MeV/c^2)
    fn mass(&self) -> f64;

    /// Kinetic energy estimate (MeV)
    fn ke(&self) -> f64;

    /// Total energy estimate (MeV)
    fn energy(&self) -> f64 {
        self.ke() + self.mass()
    }

    /// Identifier of the best-matched partner record, if any
    fn best_match(&self) -> Option<i64>;
}

/// A single reconstructed particle within an interaction
///
/// Fields correspond to the flattened per-particle block of the upstream
/// reconstruction output. Softmax score arrays are indexed by the numeric
/// [Pid] codes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoParticle {
    /// Particle species decided upstream
    pub pid: Pid,
    /// Softmax score for each of the five species
    pub pid_scores: [f64; 5],
    /// Softmax scores for (secondary, primary)
    pub primary_scores: [f64; 2],
    /// Semantic classification of the deposition
    pub shape: Shape,
    /// Attached directly to the interaction vertex?
    pub is_primary: bool,
    /// Fully contained within the active volume?
    pub is_contained: bool,
    /// Track length (cm)
    pub length: f64,
    /// Calorimetric kinetic energy estimate (MeV)
    pub calo_ke: f64,
    /// Continuous-slowing-down-approximation kinetic energy estimate (MeV)
    pub csda_ke: f64,
    /// Multiple-Coulomb-scattering kinetic energy estimate (MeV)
    pub mcs_ke: f64,
    /// Start point (cm)
    pub start_point: [f64; 3],
    /// End point (cm)
    pub end_point: [f64; 3],
    /// Unit direction at the start point
    pub start_dir: [f64; 3],
    /// Momentum vector (MeV/c)
    pub momentum: [f64; 3],
    /// True particle ids matched to this particle, best match first
    pub match_ids: Vec<i64>,
    /// Intersection-over-union with each matched true particle
    pub match_overlaps: Vec<f64>,
}

impl RecoParticle {
    /// Softmax score of the "MIP" hypothesis (muon + pion)
    pub fn mip_score(&self) -> f64 {
        self.pid_scores[2] + self.pid_scores[3]
    }

    /// Softmax score of the "hadron" hypothesis (pion + proton)
    pub fn hadron_score(&self) -> f64 {
        self.pid_scores[3] + self.pid_scores[4]
    }

    /// Softmax score of the primary hypothesis
    pub fn primary_score(&self) -> f64 {
        self.primary_scores[1]
    }
}

impl ParticleView for RecoParticle {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn is_contained(&self) -> bool {
        self.is_contained
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn start_point(&self) -> [f64; 3] {
        self.start_point
    }

    fn end_point(&self) -> [f64; 3] {
        self.end_point
    }

    fn start_dir(&self) -> [f64; 3] {
        self.start_dir
    }

    fn momentum(&self) -> [f64; 3] {
        self.momentum
    }

    fn mass(&self) -> f64 {
        self.pid.mass()
    }

    /// Best estimate of the reconstructed kinetic energy (MeV)
    ///
    /// Showers can only be reconstructed calorimetrically. Tracks use the
    /// CSDA range estimate when contained and the multiple-scattering
    /// estimate when exiting.
    ///
    /// ```rust
    /// # use spinetools_event::{ParticleView, Pid, RecoParticle};
    /// let muon = RecoParticle {
    ///     pid: Pid::Muon,
    ///     is_contained: true,
    ///     csda_ke: 250.0,
    ///     mcs_ke: 210.0,
    ///     ..Default::default()
    /// };
    /// assert_eq!(muon.ke(), 250.0);
    /// ```
    fn ke(&self) -> f64 {
        match self.pid {
            pid if pid.is_shower() => self.calo_ke,
            pid if pid.is_track() => {
                if self.is_contained {
                    self.csda_ke
                } else {
                    self.mcs_ke
                }
            }
            _ => f64::NAN,
        }
    }

    fn best_match(&self) -> Option<i64> {
        self.match_ids.first().copied()
    }
}

/// A single true (generator-level) particle within an interaction
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrueParticle {
    /// Particle species from the generator record
    pub pid: Pid,
    /// Rest mass (MeV/c^2)
    pub mass: f64,
    /// Initial total energy (MeV)
    pub energy_init: f64,
    /// Attached directly to the interaction vertex?
    pub is_primary: bool,
    /// Fully contained within the active volume?
    pub is_contained: bool,
    /// Track length (cm)
    pub length: f64,
    /// Start point (cm)
    pub start_point: [f64; 3],
    /// End point (cm)
    pub end_point: [f64; 3],
    /// Unit direction at the start point
    pub start_dir: [f64; 3],
    /// Momentum vector (MeV/c)
    pub momentum: [f64; 3],
    /// Reco particle ids matched to this particle, best match first
    pub match_ids: Vec<i64>,
    /// Intersection-over-union with each matched reco particle
    pub match_overlaps: Vec<f64>,
}

impl ParticleView for TrueParticle {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn is_primary(&self) -> bool {
        self.is_primary
    }

    fn is_contained(&self) -> bool {
        self.is_contained
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn start_point(&self) -> [f64; 3] {
        self.start_point
    }

    fn end_point(&self) -> [f64; 3] {
        self.end_point
    }

    fn start_dir(&self) -> [f64; 3] {
        self.start_dir
    }

    fn momentum(&self) -> [f64; 3] {
        self.momentum
    }

    fn mass(&self) -> f64 {
        self.mass
    }

    /// True kinetic energy, initial total energy minus the rest mass (MeV)
    fn ke(&self) -> f64 {
        self.energy_init - self.mass
    }

    fn best_match(&self) -> Option<i64> {
        self.match_ids.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_codes_round_trip() {
        for code in 0..5_i64 {
            assert_eq!(i64::from(Pid::from(code)), code);
        }
        assert_eq!(Pid::from(7), Pid::Unknown);
        assert_eq!(i64::from(Pid::Unknown), -1);
    }

    #[test]
    fn exiting_track_uses_mcs_estimate() {
        let muon = RecoParticle {
            pid: Pid::Muon,
            is_contained: false,
            csda_ke: 250.0,
            mcs_ke: 210.0,
            ..Default::default()
        };
        assert_eq!(muon.ke(), 210.0);
    }

    #[test]
    fn shower_energy_is_calorimetric() {
        let electron = RecoParticle {
            pid: Pid::Electron,
            calo_ke: 87.5,
            csda_ke: 10.0,
            ..Default::default()
        };
        assert_eq!(electron.ke(), 87.5);
        assert_eq!(electron.energy(), 87.5 + ELECTRON_MASS);
    }

    #[test]
    fn true_ke_subtracts_rest_mass() {
        let proton = TrueParticle {
            pid: Pid::Proton,
            mass: PROTON_MASS,
            energy_init: PROTON_MASS + 60.0,
            ..Default::default()
        };
        assert!((proton.ke() - 60.0).abs() < 1e-9);
    }
}
