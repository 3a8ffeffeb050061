//! Stable string names for variables and cuts
//!
//! Analysis drivers are configured from files, so every variable and cut
//! usable in a tree is reachable by a stable snake_case name. Lookups fail
//! with an error naming the offender, so a typo in a configuration file
//! surfaces before any events are read.

use spinetools_event::{RecoInteraction, TrueInteraction};

use crate::error::{Error, Result};
use crate::{cuts, vars};

/// A variable evaluated on reconstructed interactions
pub type RecoVar = fn(&RecoInteraction) -> f64;

/// A variable evaluated on true interactions
pub type TruthVar = fn(&TrueInteraction) -> f64;

/// A cut evaluated on reconstructed interactions
pub type RecoCut = fn(&RecoInteraction) -> bool;

/// A cut evaluated on true interactions
pub type TruthCut = fn(&TrueInteraction) -> bool;

/// Look up a reconstructed-interaction variable by name
pub fn reco_var(name: &str) -> Result<RecoVar> {
    let var: RecoVar = match name {
        "visible_energy" => vars::visible_energy::<RecoInteraction>,
        "vertex_x" => vars::vertex_x::<RecoInteraction>,
        "vertex_y" => vars::vertex_y::<RecoInteraction>,
        "vertex_z" => vars::vertex_z::<RecoInteraction>,
        "leading_muon_ke" => vars::leading_muon_ke::<RecoInteraction>,
        "leading_proton_ke" => vars::leading_proton_ke::<RecoInteraction>,
        "leading_muon_pt" => vars::leading_muon_pt::<RecoInteraction>,
        "leading_proton_pt" => vars::leading_proton_pt::<RecoInteraction>,
        "leading_muon_end_x" => vars::leading_muon_end_x::<RecoInteraction>,
        "leading_muon_end_y" => vars::leading_muon_end_y::<RecoInteraction>,
        "leading_muon_end_z" => vars::leading_muon_end_z::<RecoInteraction>,
        "leading_proton_end_x" => vars::leading_proton_end_x::<RecoInteraction>,
        "leading_proton_end_y" => vars::leading_proton_end_y::<RecoInteraction>,
        "leading_proton_end_z" => vars::leading_proton_end_z::<RecoInteraction>,
        "muon_polar_angle" => vars::muon_polar_angle::<RecoInteraction>,
        "muon_azimuthal_angle" => vars::muon_azimuthal_angle::<RecoInteraction>,
        "opening_angle" => vars::opening_angle::<RecoInteraction>,
        "interaction_pt" => vars::interaction_pt::<RecoInteraction>,
        "delta_alpha_t" => vars::delta_alpha_t::<RecoInteraction>,
        "delta_phi_t" => vars::delta_phi_t::<RecoInteraction>,
        "flash_time" => vars::flash_time,
        "flash_total_pe" => vars::flash_total_pe,
        "flash_hypothesis_pe" => vars::flash_hypothesis_pe,
        "muon_softmax" => vars::muon_softmax,
        "proton_softmax" => vars::proton_softmax,
        "muon_mip_softmax" => vars::muon_mip_softmax,
        _ => return Err(Error::UnknownRecoVariable(name.to_string())),
    };
    Ok(var)
}

/// Look up a true-interaction variable by name
pub fn truth_var(name: &str) -> Result<TruthVar> {
    let var: TruthVar = match name {
        "visible_energy" => vars::visible_energy::<TrueInteraction>,
        "vertex_x" => vars::vertex_x::<TrueInteraction>,
        "vertex_y" => vars::vertex_y::<TrueInteraction>,
        "vertex_z" => vars::vertex_z::<TrueInteraction>,
        "leading_muon_ke" => vars::leading_muon_ke::<TrueInteraction>,
        "leading_proton_ke" => vars::leading_proton_ke::<TrueInteraction>,
        "leading_muon_pt" => vars::leading_muon_pt::<TrueInteraction>,
        "leading_proton_pt" => vars::leading_proton_pt::<TrueInteraction>,
        "leading_muon_end_x" => vars::leading_muon_end_x::<TrueInteraction>,
        "leading_muon_end_y" => vars::leading_muon_end_y::<TrueInteraction>,
        "leading_muon_end_z" => vars::leading_muon_end_z::<TrueInteraction>,
        "leading_proton_end_x" => vars::leading_proton_end_x::<TrueInteraction>,
        "leading_proton_end_y" => vars::leading_proton_end_y::<TrueInteraction>,
        "leading_proton_end_z" => vars::leading_proton_end_z::<TrueInteraction>,
        "muon_polar_angle" => vars::muon_polar_angle::<TrueInteraction>,
        "muon_azimuthal_angle" => vars::muon_azimuthal_angle::<TrueInteraction>,
        "opening_angle" => vars::opening_angle::<TrueInteraction>,
        "interaction_pt" => vars::interaction_pt::<TrueInteraction>,
        "delta_alpha_t" => vars::delta_alpha_t::<TrueInteraction>,
        "delta_phi_t" => vars::delta_phi_t::<TrueInteraction>,
        "neutrino_id" => vars::neutrino_id,
        "true_energy" => vars::true_energy,
        "neutrino_pdg" => vars::neutrino_pdg,
        "current_type" => vars::current_type,
        "interaction_mode" => vars::interaction_mode,
        "baseline" => vars::baseline,
        "category" => vars::category,
        _ => return Err(Error::UnknownTruthVariable(name.to_string())),
    };
    Ok(var)
}

/// Look up a reconstructed-interaction cut by name
pub fn reco_cut(name: &str) -> Result<RecoCut> {
    let cut: RecoCut = match name {
        "no_cut" => cuts::no_cut::<RecoInteraction>,
        "fiducial" => cuts::fiducial::<RecoInteraction>,
        "containment" => cuts::containment::<RecoInteraction>,
        "fiducial_containment" => cuts::fiducial_containment::<RecoInteraction>,
        "valid_flash_time" => cuts::valid_flash_time,
        "topological_1mu_1p" => cuts::topological_1mu_1p::<RecoInteraction>,
        "topological_1mu_np" => cuts::topological_1mu_np::<RecoInteraction>,
        "all_1mu_1p" => cuts::all_1mu_1p,
        "all_1mu_np" => cuts::all_1mu_np,
        _ => return Err(Error::UnknownRecoCut(name.to_string())),
    };
    Ok(cut)
}

/// Look up a true-interaction cut by name
pub fn truth_cut(name: &str) -> Result<TruthCut> {
    let cut: TruthCut = match name {
        "no_cut" => cuts::no_cut::<TrueInteraction>,
        "fiducial" => cuts::fiducial::<TrueInteraction>,
        "containment" => cuts::containment::<TrueInteraction>,
        "fiducial_containment" => cuts::fiducial_containment::<TrueInteraction>,
        "topological_1mu_1p" => cuts::topological_1mu_1p::<TrueInteraction>,
        "topological_1mu_np" => cuts::topological_1mu_np::<TrueInteraction>,
        "neutrino" => cuts::neutrino,
        "cosmic" => cuts::cosmic,
        "signal_1mu_1p" => cuts::signal_1mu_1p,
        "signal_1mu_np" => cuts::signal_1mu_np,
        _ => return Err(Error::UnknownTruthCut(name.to_string())),
    };
    Ok(cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("visible_energy")]
    #[case("flash_time")]
    #[case("delta_phi_t")]
    fn known_reco_vars_resolve(#[case] name: &str) {
        assert!(reco_var(name).is_ok());
    }

    #[rstest]
    #[case("category")]
    #[case("true_energy")]
    #[case("baseline")]
    fn known_truth_vars_resolve(#[case] name: &str) {
        assert!(truth_var(name).is_ok());
    }

    #[test]
    fn unknown_names_error_with_the_offender() {
        let err = reco_var("not_a_variable").unwrap_err();
        assert!(err.to_string().contains("not_a_variable"));

        assert!(truth_var("flash_time").is_err()); // flash is reco-only
        assert!(reco_cut("signal_1mu_1p").is_err()); // signal is truth-only
        assert!(truth_cut("valid_flash_time").is_err());
    }

    #[test]
    fn resolved_functions_evaluate() {
        use spinetools_event::RecoInteraction;
        let var = reco_var("visible_energy").unwrap();
        assert_eq!(var(&RecoInteraction::default()), 0.0);

        let cut = reco_cut("no_cut").unwrap();
        assert!(cut(&RecoInteraction::default()));
    }
}
