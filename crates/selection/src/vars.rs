//! Variables acting on whole interactions
//!
//! Each variable is a function from an interaction to a number, the unit
//! that analysis trees and spectra are built from. Variables shared by the
//! reconstructed and true sides are generic over
//! [InteractionView](spinetools_event::InteractionView); the flash block
//! exists only on reconstructed interactions and the neutrino provenance
//! only on true ones, so those are concrete.
//!
//! Variables on interactions missing the relevant particle (e.g. the
//! leading muon kinetic energy of a muon-less candidate) return NaN, which
//! downstream spectra drop on fill.

use spinetools_event::{InteractionView, ParticleView, Pid, RecoInteraction, TrueInteraction};

use crate::category::Category;
use crate::pvars;
use crate::utilities::{self, final_state_signal, leading_index};

/// The leading particle of a species, if any
fn leading<T: InteractionView>(obj: &T, pid: Pid) -> Option<&T::Particle> {
    leading_index(obj, pid).map(|i| &obj.particles()[i])
}

/// Evaluate a particle variable on the leading particle of a species
fn on_leading<T, F>(obj: &T, pid: Pid, var: F) -> f64
where
    T: InteractionView,
    F: Fn(&T::Particle) -> f64,
{
    leading(obj, pid).map_or(f64::NAN, var)
}

/// Summed kinetic energy estimate of the final-state particles (MeV)
pub fn visible_energy<T: InteractionView>(obj: &T) -> f64 {
    obj.particles()
        .iter()
        .filter(|p| final_state_signal(*p))
        .map(|p| p.ke())
        .sum()
}

/// x-coordinate of the interaction vertex (cm)
pub fn vertex_x<T: InteractionView>(obj: &T) -> f64 {
    obj.vertex()[0]
}

/// y-coordinate of the interaction vertex (cm)
pub fn vertex_y<T: InteractionView>(obj: &T) -> f64 {
    obj.vertex()[1]
}

/// z-coordinate of the interaction vertex (cm)
pub fn vertex_z<T: InteractionView>(obj: &T) -> f64 {
    obj.vertex()[2]
}

/// Kinetic energy of the leading muon (MeV)
pub fn leading_muon_ke<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Muon, pvars::ke)
}

/// Kinetic energy of the leading proton (MeV)
pub fn leading_proton_ke<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Proton, pvars::ke)
}

/// Transverse momentum of the leading muon (MeV/c)
pub fn leading_muon_pt<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Muon, pvars::transverse_momentum)
}

/// Transverse momentum of the leading proton (MeV/c)
pub fn leading_proton_pt<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Proton, pvars::transverse_momentum)
}

/// x-coordinate of the leading muon end point (cm)
pub fn leading_muon_end_x<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Muon, pvars::end_x)
}

/// y-coordinate of the leading muon end point (cm)
pub fn leading_muon_end_y<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Muon, pvars::end_y)
}

/// z-coordinate of the leading muon end point (cm)
pub fn leading_muon_end_z<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Muon, pvars::end_z)
}

/// x-coordinate of the leading proton end point (cm)
pub fn leading_proton_end_x<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Proton, pvars::end_x)
}

/// y-coordinate of the leading proton end point (cm)
pub fn leading_proton_end_y<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Proton, pvars::end_y)
}

/// z-coordinate of the leading proton end point (cm)
pub fn leading_proton_end_z<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Proton, pvars::end_z)
}

/// Polar angle of the leading muon
pub fn muon_polar_angle<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Muon, pvars::polar_angle)
}

/// Azimuthal angle of the leading muon
pub fn muon_azimuthal_angle<T: InteractionView>(obj: &T) -> f64 {
    on_leading(obj, Pid::Muon, pvars::azimuthal_angle)
}

/// Opening angle between the leading muon and leading proton
///
/// The arccosine of the dot product of the two start directions. NaN when
/// either particle is absent.
pub fn opening_angle<T: InteractionView>(obj: &T) -> f64 {
    match (leading(obj, Pid::Muon), leading(obj, Pid::Proton)) {
        (Some(muon), Some(proton)) => {
            utilities::dot(muon.start_dir(), proton.start_dir()).acos()
        }
        _ => f64::NAN,
    }
}

/// Magnitude of the summed final-state transverse momentum (MeV/c)
///
/// Vanishes for a perfectly balanced quasielastic interaction, so the tail
/// measures nuclear effects and missing energy.
pub fn interaction_pt<T: InteractionView>(obj: &T) -> f64 {
    let mut sum = [0.0; 3];
    for p in obj.particles() {
        if final_state_signal(p) {
            let pt = utilities::transverse(p.momentum());
            sum[0] += pt[0];
            sum[1] += pt[1];
        }
    }
    utilities::magnitude(sum)
}

/// Transverse boosting angle between the muon and the hadronic system
///
/// `acos(-pTl . dpT / (|pTl| |dpT|))` with `dpT` the summed transverse
/// momentum of the leading muon and the final-state protons. NaN when
/// either side is absent.
pub fn delta_alpha_t<T: InteractionView>(obj: &T) -> f64 {
    let (lepton, hadron) = match transverse_pair(obj) {
        Some(pair) => pair,
        None => return f64::NAN,
    };
    let dpt = [lepton[0] + hadron[0], lepton[1] + hadron[1], 0.0];
    (-utilities::dot(lepton, dpt) / (utilities::magnitude(lepton) * utilities::magnitude(dpt)))
        .acos()
}

/// Transverse opening angle between the muon and the hadronic system
///
/// `acos(-pTl . pTh / (|pTl| |pTh|))`. NaN when either side is absent.
pub fn delta_phi_t<T: InteractionView>(obj: &T) -> f64 {
    let (lepton, hadron) = match transverse_pair(obj) {
        Some(pair) => pair,
        None => return f64::NAN,
    };
    (-utilities::dot(lepton, hadron)
        / (utilities::magnitude(lepton) * utilities::magnitude(hadron)))
    .acos()
}

/// Leading-muon and summed-proton transverse momentum vectors
fn transverse_pair<T: InteractionView>(obj: &T) -> Option<([f64; 3], [f64; 3])> {
    let lepton = utilities::transverse(leading(obj, Pid::Muon)?.momentum());
    let hadron = utilities::summed_transverse(obj, Pid::Proton)?;
    Some((lepton, hadron))
}

// ---------------------------------------------------------------------------
// Reco-only variables
// ---------------------------------------------------------------------------

/// Time of the matched optical flash (us), NaN when unmatched
pub fn flash_time(obj: &RecoInteraction) -> f64 {
    obj.flash.map_or(f64::NAN, |f| f.time)
}

/// Total photoelectron count of the matched flash, NaN when unmatched
pub fn flash_total_pe(obj: &RecoInteraction) -> f64 {
    obj.flash.map_or(f64::NAN, |f| f.total_pe)
}

/// Photoelectron count of the flash-matching hypothesis, NaN when unmatched
pub fn flash_hypothesis_pe(obj: &RecoInteraction) -> f64 {
    obj.flash.map_or(f64::NAN, |f| f.hypothesis_pe)
}

/// Muon softmax score of the leading muon
pub fn muon_softmax(obj: &RecoInteraction) -> f64 {
    on_leading(obj, Pid::Muon, |p| pvars::softmax(p, Pid::Muon))
}

/// Proton softmax score of the leading proton
pub fn proton_softmax(obj: &RecoInteraction) -> f64 {
    on_leading(obj, Pid::Proton, |p| pvars::softmax(p, Pid::Proton))
}

/// MIP softmax score of the leading muon
pub fn muon_mip_softmax(obj: &RecoInteraction) -> f64 {
    on_leading(obj, Pid::Muon, |p| p.mip_score())
}

// ---------------------------------------------------------------------------
// Truth-only variables
// ---------------------------------------------------------------------------

/// Neutrino identifier, negative for cosmic activity
pub fn neutrino_id(obj: &TrueInteraction) -> f64 {
    obj.nu_id as f64
}

/// True neutrino energy (MeV)
pub fn true_energy(obj: &TrueInteraction) -> f64 {
    obj.energy_init
}

/// PDG code of the neutrino
pub fn neutrino_pdg(obj: &TrueInteraction) -> f64 {
    obj.pdg_code as f64
}

/// Numeric current type (0 charged, 1 neutral, -1 unknown)
pub fn current_type(obj: &TrueInteraction) -> f64 {
    i64::from(obj.current_type) as f64
}

/// Generator interaction mode code
pub fn interaction_mode(obj: &TrueInteraction) -> f64 {
    obj.interaction_mode as f64
}

/// Distance from neutrino production to interaction (m)
pub fn baseline(obj: &TrueInteraction) -> f64 {
    obj.baseline
}

/// Enumerated truth category for stacked plots
pub fn category(obj: &TrueInteraction) -> f64 {
    Category::of(obj) as u8 as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinetools_event::{RecoParticle, TrueParticle};

    fn track(pid: Pid, ke: f64, momentum: [f64; 3]) -> RecoParticle {
        RecoParticle {
            pid,
            is_primary: true,
            is_contained: true,
            csda_ke: ke,
            momentum,
            ..Default::default()
        }
    }

    #[test]
    fn visible_energy_ignores_subthreshold_particles() {
        let obj = RecoInteraction {
            particles: vec![
                track(Pid::Muon, 250.0, [0.0, 0.0, 300.0]),
                track(Pid::Proton, 20.0, [0.0, 0.0, 100.0]), // below threshold
            ],
            ..Default::default()
        };
        assert_eq!(visible_energy(&obj), 250.0);
    }

    #[test]
    fn balanced_interaction_has_vanishing_pt() {
        let obj = RecoInteraction {
            particles: vec![
                track(Pid::Muon, 250.0, [120.0, 0.0, 400.0]),
                track(Pid::Proton, 90.0, [-120.0, 0.0, 250.0]),
            ],
            ..Default::default()
        };
        assert!(interaction_pt(&obj) < 1e-12);
        // exactly back to back in the transverse plane
        assert!((delta_phi_t(&obj) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn missing_particles_give_nan() {
        let obj = RecoInteraction::default();
        assert!(leading_muon_ke(&obj).is_nan());
        assert!(opening_angle(&obj).is_nan());
        assert!(delta_alpha_t(&obj).is_nan());
        assert!(flash_time(&obj).is_nan());
    }

    #[test]
    fn truth_variables_read_the_provenance() {
        let obj = TrueInteraction {
            nu_id: 3,
            pdg_code: 14,
            energy_init: 851.9,
            baseline: 598.4,
            particles: vec![TrueParticle::default()],
            ..Default::default()
        };
        assert_eq!(neutrino_id(&obj), 3.0);
        assert_eq!(neutrino_pdg(&obj), 14.0);
        assert_eq!(true_energy(&obj), 851.9);
    }
}
