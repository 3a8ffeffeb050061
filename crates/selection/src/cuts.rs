//! Boolean selection cuts on interactions
//!
//! Cuts are plain predicates composed from the topology, fiducial volume,
//! containment, and flash timing of an interaction. The combined selections
//! at the bottom are the ones analyses actually run; the pieces are public
//! so efficiency studies can apply them one at a time (N-1 style).

use spinetools_event::{Current, InteractionView, ParticleView, RecoInteraction, TrueInteraction};

use crate::utilities::count_primaries;

// Active-volume x-boundaries of the two drift volumes (cm)
const X_BOUNDS: [f64; 4] = [-358.49, -61.94, 61.94, 358.49];
// Active-volume y and z boundaries (cm)
const Y_BOUNDS: [f64; 2] = [-181.86, 134.96];
const Z_BOUNDS: [f64; 2] = [-894.95, 894.95];

// Fiducial margins from each face (cm)
const MARGIN_X: f64 = 25.0;
const MARGIN_Y: f64 = 25.0;
const MARGIN_Z_FRONT: f64 = 30.0;
const MARGIN_Z_BACK: f64 = 50.0;

// Beam gate window for the matched flash (us)
const FLASH_WINDOW: (f64, f64) = (0.0, 1.6);

/// The trivial cut, selecting everything
pub fn no_cut<T: InteractionView>(_obj: &T) -> bool {
    true
}

/// The interaction vertex lies within the fiducial volume
///
/// The vertex must sit inside one of the two drift volumes with a margin
/// from every face, larger at the downstream end to contain exiting
/// hadronic activity.
pub fn fiducial<T: InteractionView>(obj: &T) -> bool {
    let [x, y, z] = obj.vertex();

    let in_x = (x > X_BOUNDS[0] + MARGIN_X && x < X_BOUNDS[1] - MARGIN_X)
        || (x > X_BOUNDS[2] + MARGIN_X && x < X_BOUNDS[3] - MARGIN_X);
    let in_y = y > Y_BOUNDS[0] + MARGIN_Y && y < Y_BOUNDS[1] - MARGIN_Y;
    let in_z = z > Z_BOUNDS[0] + MARGIN_Z_FRONT && z < Z_BOUNDS[1] - MARGIN_Z_BACK;

    in_x && in_y && in_z
}

/// Every particle of the interaction is contained
pub fn containment<T: InteractionView>(obj: &T) -> bool {
    obj.particles().iter().all(|p| p.is_contained())
}

/// The matched flash falls inside the beam gate window
///
/// Interactions without a matched flash fail.
pub fn valid_flash_time(obj: &RecoInteraction) -> bool {
    match obj.flash {
        Some(flash) => flash.time >= FLASH_WINDOW.0 && flash.time <= FLASH_WINDOW.1,
        None => false,
    }
}

/// Final state of exactly one muon and one proton
pub fn topological_1mu_1p<T: InteractionView>(obj: &T) -> bool {
    count_primaries(obj) == [0, 0, 1, 0, 1]
}

/// Final state of exactly one muon and at least one proton
pub fn topological_1mu_np<T: InteractionView>(obj: &T) -> bool {
    let c = count_primaries(obj);
    c[0] == 0 && c[1] == 0 && c[2] == 1 && c[3] == 0 && c[4] >= 1
}

/// Fiducial vertex and full containment
pub fn fiducial_containment<T: InteractionView>(obj: &T) -> bool {
    fiducial(obj) && containment(obj)
}

/// The full 1mu1p selection on reconstructed interactions
pub fn all_1mu_1p(obj: &RecoInteraction) -> bool {
    topological_1mu_1p(obj) && fiducial_containment(obj) && valid_flash_time(obj)
}

/// The full 1muNp selection on reconstructed interactions
pub fn all_1mu_np(obj: &RecoInteraction) -> bool {
    topological_1mu_np(obj) && fiducial_containment(obj) && valid_flash_time(obj)
}

/// The record describes a true neutrino interaction
pub fn neutrino(obj: &TrueInteraction) -> bool {
    obj.is_neutrino()
}

/// The record describes cosmic activity
pub fn cosmic(obj: &TrueInteraction) -> bool {
    !obj.is_neutrino()
}

/// True charged-current 1mu1p interaction in the fiducial volume
pub fn signal_1mu_1p(obj: &TrueInteraction) -> bool {
    obj.is_neutrino()
        && obj.current_type == Current::Charged
        && topological_1mu_1p(obj)
        && fiducial_containment(obj)
}

/// True charged-current 1muNp interaction in the fiducial volume
pub fn signal_1mu_np(obj: &TrueInteraction) -> bool {
    obj.is_neutrino()
        && obj.current_type == Current::Charged
        && topological_1mu_np(obj)
        && fiducial_containment(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinetools_event::{Flash, Pid, RecoParticle};

    fn particle(pid: Pid, ke: f64) -> RecoParticle {
        RecoParticle {
            pid,
            is_primary: true,
            is_contained: true,
            csda_ke: ke,
            calo_ke: ke,
            ..Default::default()
        }
    }

    fn candidate() -> RecoInteraction {
        RecoInteraction {
            particles: vec![particle(Pid::Muon, 250.0), particle(Pid::Proton, 80.0)],
            vertex: [150.0, 0.0, 100.0],
            flash: Some(Flash {
                time: 0.8,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn the_nominal_candidate_passes_everything() {
        let obj = candidate();
        assert!(topological_1mu_1p(&obj));
        assert!(topological_1mu_np(&obj));
        assert!(fiducial(&obj));
        assert!(containment(&obj));
        assert!(valid_flash_time(&obj));
        assert!(all_1mu_1p(&obj));
    }

    #[test]
    fn cathode_gap_vertices_are_not_fiducial() {
        let mut obj = candidate();
        obj.vertex = [0.0, 0.0, 100.0];
        assert!(!fiducial(&obj));
        assert!(!all_1mu_1p(&obj));
    }

    #[test]
    fn exiting_particles_break_containment() {
        let mut obj = candidate();
        obj.particles[0].is_contained = false;
        assert!(!containment(&obj));
    }

    #[test]
    fn out_of_time_and_missing_flashes_fail() {
        let mut obj = candidate();
        obj.flash = Some(Flash {
            time: 3.2,
            ..Default::default()
        });
        assert!(!valid_flash_time(&obj));

        obj.flash = None;
        assert!(!valid_flash_time(&obj));
    }

    #[test]
    fn second_proton_moves_1mu1p_to_1munp() {
        let mut obj = candidate();
        obj.particles.push(particle(Pid::Proton, 60.0));
        assert!(!topological_1mu_1p(&obj));
        assert!(topological_1mu_np(&obj));
    }
}
