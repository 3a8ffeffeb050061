//! Shared helpers for building variables and cuts

use itertools::Itertools;

use spinetools_event::{InteractionView, ParticleView, Pid};

/// Kinetic energy thresholds defining a final-state particle (MeV)
///
/// Indexed by the numeric [Pid] codes. The muon threshold corresponds to
/// the tracking efficiency turn-on; everything else is a low reconstruction
/// floor.
pub(crate) const KE_THRESHOLDS: [f64; 5] = [25.0, 25.0, 143.425, 25.0, 50.0];

/// Whether a particle counts towards the final-state topology
///
/// A final-state signal particle is a primary above the kinetic energy
/// threshold of its species. Particles of unknown species never count.
///
/// ```rust
/// # use spinetools_event::{Pid, RecoParticle};
/// # use spinetools_selection::final_state_signal;
/// let muon = RecoParticle {
///     pid: Pid::Muon,
///     is_primary: true,
///     is_contained: true,
///     csda_ke: 250.0,
///     ..Default::default()
/// };
/// assert!(final_state_signal(&muon));
/// ```
pub fn final_state_signal<P: ParticleView>(p: &P) -> bool {
    match p.pid().code() {
        Some(code) => p.is_primary() && p.ke() > KE_THRESHOLDS[code],
        None => false,
    }
}

/// Count the final-state particles of each species
///
/// Returns counts indexed by the numeric [Pid] codes, the basis of every
/// topological cut.
///
/// ```rust
/// # use spinetools_event::{Pid, RecoInteraction, RecoParticle};
/// # use spinetools_selection::count_primaries;
/// let interaction = RecoInteraction {
///     particles: vec![
///         RecoParticle {
///             pid: Pid::Proton,
///             is_primary: true,
///             is_contained: true,
///             csda_ke: 80.0,
///             ..Default::default()
///         },
///     ],
///     ..Default::default()
/// };
/// assert_eq!(count_primaries(&interaction), [0, 0, 0, 0, 1]);
/// ```
pub fn count_primaries<T: InteractionView>(obj: &T) -> [u32; 5] {
    let mut counts = [0_u32; 5];
    for p in obj.particles() {
        if final_state_signal(p) {
            // the code is always Some for counted particles
            counts[p.pid().code().unwrap_or(0)] += 1;
        }
    }
    counts
}

/// Index of the leading (highest kinetic energy) particle of a species
///
/// Returns `None` when the interaction has no particle of that species.
pub fn leading_index<T: InteractionView>(obj: &T, pid: Pid) -> Option<usize> {
    obj.particles()
        .iter()
        .positions(|p| p.pid() == pid)
        .max_by(|a, b| {
            let ke_a = obj.particles()[*a].ke();
            let ke_b = obj.particles()[*b].ke();
            ke_a.total_cmp(&ke_b)
        })
}

/// Vector magnitude
pub(crate) fn magnitude(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

/// Vector dot product
pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Component of a momentum vector transverse to the beam
///
/// The beam is taken along the z-axis, so this simply zeroes the
/// longitudinal component.
pub(crate) fn transverse(momentum: [f64; 3]) -> [f64; 3] {
    [momentum[0], momentum[1], 0.0]
}

/// Summed transverse momentum of the final-state particles of a species
///
/// `None` when the interaction has no final-state particle of that species.
pub(crate) fn summed_transverse<T: InteractionView>(obj: &T, pid: Pid) -> Option<[f64; 3]> {
    let mut sum = [0.0; 3];
    let mut found = false;
    for p in obj.particles() {
        if p.pid() == pid && final_state_signal(p) {
            let pt = transverse(p.momentum());
            sum[0] += pt[0];
            sum[1] += pt[1];
            found = true;
        }
    }
    found.then_some(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinetools_event::{RecoInteraction, RecoParticle};

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

    #[test]
    fn below_threshold_particles_do_not_count() {
        let interaction = RecoInteraction {
            particles: vec![particle(Pid::Muon, 100.0), particle(Pid::Proton, 80.0)],
            ..Default::default()
        };
        // the muon is below its 143 MeV threshold
        assert_eq!(count_primaries(&interaction), [0, 0, 0, 0, 1]);
    }

    #[test]
    fn leading_index_picks_highest_ke() {
        let interaction = RecoInteraction {
            particles: vec![
                particle(Pid::Proton, 80.0),
                particle(Pid::Proton, 120.0),
                particle(Pid::Muon, 300.0),
            ],
            ..Default::default()
        };
        assert_eq!(leading_index(&interaction, Pid::Proton), Some(1));
        assert_eq!(leading_index(&interaction, Pid::Electron), None);
    }
}
