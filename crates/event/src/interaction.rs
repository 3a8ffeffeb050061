//! Module for interaction-level records and implementations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::particle::{Current, ParticleView, RecoParticle, TrueParticle};

/// Accessors shared by reconstructed and true interaction records
///
/// The associated particle type keeps variables generic over whole
/// interactions without losing the concrete particle implementations.
pub trait InteractionView {
    /// The particle record type held by this interaction
    type Particle: ParticleView;

    /// Constituent particles of the interaction
    fn particles(&self) -> &[Self::Particle];

    /// Interaction vertex (cm)
    fn vertex(&self) -> [f64; 3];

    /// Identifier of the best-matched partner interaction, if any
    fn best_match(&self) -> Option<i64>;
}

/// The optical flash matched to a reconstructed interaction
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flash {
    /// Flash time relative to the trigger (us)
    pub time: f64,
    /// Total photoelectron count of the flash
    pub total_pe: f64,
    /// Photoelectron count predicted by the flash-matching hypothesis
    pub hypothesis_pe: f64,
}

/// A single reconstructed neutrino interaction candidate
///
/// ```rust
/// # use spinetools_event::{Pid, RecoInteraction, RecoParticle};
/// let interaction = RecoInteraction {
///     particles: vec![
///         RecoParticle { pid: Pid::Muon, is_primary: true, ..Default::default() },
///         RecoParticle { pid: Pid::Proton, is_primary: true, ..Default::default() },
///     ],
///     ..Default::default()
/// };
/// assert_eq!(interaction.particles.len(), 2);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoInteraction {
    /// Interaction identifier, unique within the event
    pub id: i64,
    /// Constituent reconstructed particles
    pub particles: Vec<RecoParticle>,
    /// Reconstructed vertex (cm)
    pub vertex: [f64; 3],
    /// Matched optical flash, absent when flash matching failed
    pub flash: Option<Flash>,
    /// True interaction ids matched to this interaction, best match first
    pub match_ids: Vec<i64>,
    /// Intersection-over-union with each matched true interaction
    pub match_overlaps: Vec<f64>,
}

impl InteractionView for RecoInteraction {
    type Particle = RecoParticle;

    fn particles(&self) -> &[RecoParticle] {
        &self.particles
    }

    fn vertex(&self) -> [f64; 3] {
        self.vertex
    }

    fn best_match(&self) -> Option<i64> {
        self.match_ids.first().copied()
    }
}

/// A single true (generator-level) neutrino interaction
///
/// The `weights` map carries the named systematic weight sets attached by
/// the event generator and flux simulation. Keys are opaque source labels;
/// values are one weight per universe or sigma point. These flow through
/// the selection into the systematics engine untouched.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrueInteraction {
    /// Neutrino identifier, negative for cosmic activity
    pub nu_id: i64,
    /// Constituent true particles
    pub particles: Vec<TrueParticle>,
    /// True vertex (cm)
    pub vertex: [f64; 3],
    /// PDG code of the neutrino
    pub pdg_code: i64,
    /// Charged or neutral current
    pub current_type: Current,
    /// Generator interaction mode code
    pub interaction_mode: i64,
    /// Initial neutrino energy (MeV)
    pub energy_init: f64,
    /// Distance from production to interaction (m)
    pub baseline: f64,
    /// Reco interaction ids matched to this interaction, best match first
    pub match_ids: Vec<i64>,
    /// Intersection-over-union with each matched reco interaction
    pub match_overlaps: Vec<f64>,
    /// Named systematic weight sets, one weight per universe
    pub weights: BTreeMap<String, Vec<f64>>,
}

impl TrueInteraction {
    /// Whether the record describes a true neutrino interaction
    ///
    /// Cosmic activity is bundled into the truth record with a negative
    /// neutrino id.
    ///
    /// ```rust
    /// # use spinetools_event::TrueInteraction;
    /// let cosmic = TrueInteraction { nu_id: -1, ..Default::default() };
    /// assert!(!cosmic.is_neutrino());
    /// ```
    pub const fn is_neutrino(&self) -> bool {
        self.nu_id >= 0
    }
}

impl InteractionView for TrueInteraction {
    type Particle = TrueParticle;

    fn particles(&self) -> &[TrueParticle] {
        &self.particles
    }

    fn vertex(&self) -> [f64; 3] {
        self.vertex
    }

    fn best_match(&self) -> Option<i64> {
        self.match_ids.first().copied()
    }
}
