//! Truth categorisation of interactions

use spinetools_event::{Current, TrueInteraction};

use crate::cuts;

/// Enumerated truth category of an interaction
///
/// The standard breakdown used for stacked spectra: the two signal
/// topologies, the remaining neutrino backgrounds split by current, and
/// cosmic activity. The numeric codes are stable and written to analysis
/// tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Category {
    /// True 1mu1p charged-current interaction in the fiducial volume
    Signal1Mu1P = 0,
    /// True 1muNp (N > 1) charged-current interaction in the fiducial volume
    Signal1MuNP = 1,
    /// Any other charged-current neutrino interaction
    OtherNuCC = 2,
    /// Neutral-current neutrino interaction
    NuNC = 3,
    /// Cosmic activity
    Cosmic = 4,
}

impl Category {
    /// Categorise a true interaction
    ///
    /// ```rust
    /// # use spinetools_event::TrueInteraction;
    /// # use spinetools_selection::Category;
    /// let cosmic = TrueInteraction { nu_id: -1, ..Default::default() };
    /// assert_eq!(Category::of(&cosmic), Category::Cosmic);
    /// ```
    pub fn of(obj: &TrueInteraction) -> Self {
        if !obj.is_neutrino() {
            return Self::Cosmic;
        }

        let charged = obj.current_type == Current::Charged;
        if charged && cuts::signal_1mu_1p(obj) {
            Self::Signal1Mu1P
        } else if charged && cuts::signal_1mu_np(obj) {
            Self::Signal1MuNP
        } else if charged {
            Self::OtherNuCC
        } else {
            Self::NuNC
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let label = match self {
            Self::Signal1Mu1P => "1mu1p",
            Self::Signal1MuNP => "1muNp",
            Self::OtherNuCC => "other nu CC",
            Self::NuNC => "nu NC",
            Self::Cosmic => "cosmic",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinetools_event::{Pid, TrueParticle};

    fn truth(pids: &[(Pid, f64)], current: Current) -> TrueInteraction {
        TrueInteraction {
            nu_id: 1,
            current_type: current,
            vertex: [150.0, 0.0, 100.0],
            particles: pids
                .iter()
                .map(|(pid, ke)| TrueParticle {
                    pid: *pid,
                    mass: pid.mass(),
                    energy_init: pid.mass() + ke,
                    is_primary: true,
                    is_contained: true,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn signal_topologies_are_split_by_proton_count() {
        let single = truth(&[(Pid::Muon, 250.0), (Pid::Proton, 80.0)], Current::Charged);
        assert_eq!(Category::of(&single), Category::Signal1Mu1P);

        let multi = truth(
            &[(Pid::Muon, 250.0), (Pid::Proton, 80.0), (Pid::Proton, 60.0)],
            Current::Charged,
        );
        assert_eq!(Category::of(&multi), Category::Signal1MuNP);
    }

    #[test]
    fn backgrounds_split_by_current() {
        let cc = truth(&[(Pid::Muon, 250.0), (Pid::Pion, 100.0)], Current::Charged);
        assert_eq!(Category::of(&cc), Category::OtherNuCC);

        let nc = truth(&[(Pid::Proton, 80.0)], Current::Neutral);
        assert_eq!(Category::of(&nc), Category::NuNC);
    }
}
