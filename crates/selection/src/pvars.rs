//! Variables acting on single particles
//!
//! Each variable is a function from a particle record to a number. These are
//! the building blocks for the interaction-level variables in [vars](crate::vars),
//! written against [ParticleView](spinetools_event::ParticleView) so they
//! apply to reconstructed and true particles alike.

use spinetools_event::{ParticleView, Pid, RecoParticle};

use crate::utilities;

/// Kinetic energy estimate (MeV)
pub fn ke<P: ParticleView>(p: &P) -> f64 {
    p.ke()
}

/// Total energy estimate (MeV)
pub fn energy<P: ParticleView>(p: &P) -> f64 {
    p.energy()
}

/// Track length (cm)
pub fn length<P: ParticleView>(p: &P) -> f64 {
    p.length()
}

/// x-coordinate of the start point (cm)
pub fn start_x<P: ParticleView>(p: &P) -> f64 {
    p.start_point()[0]
}

/// y-coordinate of the start point (cm)
pub fn start_y<P: ParticleView>(p: &P) -> f64 {
    p.start_point()[1]
}

/// z-coordinate of the start point (cm)
pub fn start_z<P: ParticleView>(p: &P) -> f64 {
    p.start_point()[2]
}

/// x-coordinate of the end point (cm)
pub fn end_x<P: ParticleView>(p: &P) -> f64 {
    p.end_point()[0]
}

/// y-coordinate of the end point (cm)
pub fn end_y<P: ParticleView>(p: &P) -> f64 {
    p.end_point()[1]
}

/// z-coordinate of the end point (cm)
pub fn end_z<P: ParticleView>(p: &P) -> f64 {
    p.end_point()[2]
}

/// Momentum magnitude (MeV/c)
pub fn momentum<P: ParticleView>(p: &P) -> f64 {
    utilities::magnitude(p.momentum())
}

/// Momentum transverse to the beam axis (MeV/c)
pub fn transverse_momentum<P: ParticleView>(p: &P) -> f64 {
    utilities::magnitude(utilities::transverse(p.momentum()))
}

/// Polar angle of the start direction with respect to the beam axis
pub fn polar_angle<P: ParticleView>(p: &P) -> f64 {
    p.start_dir()[2].acos()
}

/// Azimuthal angle of the start direction, folded into [0, pi]
pub fn azimuthal_angle<P: ParticleView>(p: &P) -> f64 {
    let dir = p.start_dir();
    (dir[0] / dir[0].hypot(dir[1])).acos()
}

/// Softmax score of a species hypothesis for a reconstructed particle
///
/// NaN for the unknown species, which has no score.
pub fn softmax(p: &RecoParticle, pid: Pid) -> f64 {
    match pid.code() {
        Some(code) => p.pid_scores[code],
        None => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinetools_event::TrueParticle;

    #[test]
    fn angles_follow_the_start_direction() {
        let p = TrueParticle {
            start_dir: [0.0, 0.0, 1.0],
            ..Default::default()
        };
        assert_eq!(polar_angle(&p), 0.0);

        let p = TrueParticle {
            start_dir: [1.0, 0.0, 0.0],
            ..Default::default()
        };
        assert!((polar_angle(&p) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(azimuthal_angle(&p), 0.0);
    }

    #[test]
    fn transverse_momentum_drops_the_beam_component() {
        let p = TrueParticle {
            momentum: [30.0, 40.0, 500.0],
            ..Default::default()
        };
        assert!((transverse_momentum(&p) - 50.0).abs() < 1e-12);
    }
}
