//! Module for compiled variable trees

use spinetools_event::Event;
use spinetools_selection::registry;
use spinetools_selection::registry::{RecoCut, RecoVar, TruthCut, TruthVar};

use crate::config::{Side, TreeConfig};
use crate::error::{Error, Result};
use crate::table::Row;

/// A branch resolved against the variable registry
enum Branch {
    Reco(RecoVar),
    Truth(TruthVar),
}

/// The selection a tree loops with
enum Selection {
    Reco(RecoCut),
    Truth(TruthCut),
}

/// A named set of branches sharing one selection, compiled for evaluation
///
/// Trees are built from a [TreeConfig] by resolving every cut and variable
/// name against the selection registry, so a misspelled name fails the
/// whole run up front rather than midway through a sample.
pub struct Tree {
    /// Tree name, used as the output file stem
    pub name: String,
    selection: Selection,
    branches: Vec<(String, Branch)>,
}

impl Tree {
    /// Resolve a tree configuration against the registry
    pub fn from_config(config: &TreeConfig) -> Result<Self> {
        let selection = match config.selection {
            Side::Reco => Selection::Reco(registry::reco_cut(&config.cut)?),
            Side::Truth => Selection::Truth(registry::truth_cut(&config.cut)?),
        };

        let mut branches = Vec::with_capacity(config.branches.len());
        for branch in &config.branches {
            let compiled = match branch.side {
                Side::Reco => {
                    // a truth-selection tree has no reco record to evaluate on
                    if config.selection == Side::Truth {
                        return Err(Error::RecoBranchInTruthTree {
                            tree: config.name.clone(),
                            branch: branch.name.clone(),
                        });
                    }
                    Branch::Reco(registry::reco_var(&branch.var)?)
                }
                Side::Truth => Branch::Truth(registry::truth_var(&branch.var)?),
            };
            branches.push((branch.name.clone(), compiled));
        }

        Ok(Self {
            name: config.name.clone(),
            selection,
            branches,
        })
    }

    /// Evaluate the tree on one event, appending the selected rows
    ///
    /// Weight sets are taken from the underlying true interaction and only
    /// attached for simulated samples.
    pub(crate) fn evaluate(&self, event: &Event, is_mc: bool, rows: &mut Vec<Row>) {
        match &self.selection {
            Selection::Reco(cut) => {
                for reco in event.reco.iter().filter(|i| cut(i)) {
                    let truth = event.matched_truth(reco);
                    let mut row = Row::default();
                    for (name, branch) in &self.branches {
                        let value = match branch {
                            Branch::Reco(var) => var(reco),
                            Branch::Truth(var) => truth.map_or(f64::NAN, var),
                        };
                        row.insert(name, value);
                    }
                    if is_mc {
                        if let Some(truth) = truth {
                            row.weights = truth.weights.clone();
                        }
                    }
                    rows.push(row);
                }
            }
            Selection::Truth(cut) => {
                for truth in event.truth.iter().filter(|i| cut(i)) {
                    let mut row = Row::default();
                    for (name, branch) in &self.branches {
                        let value = match branch {
                            Branch::Truth(var) => var(truth),
                            // rejected in from_config
                            Branch::Reco(_) => f64::NAN,
                        };
                        row.insert(name, value);
                    }
                    if is_mc {
                        row.weights = truth.weights.clone();
                    }
                    rows.push(row);
                }
            }
        }
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("name", &self.name)
            .field("branches", &self.branches.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BranchConfig;

    fn tree_config(selection: Side, branch_side: Side) -> TreeConfig {
        TreeConfig {
            name: "tree".to_string(),
            selection,
            cut: match selection {
                Side::Reco => "no_cut".to_string(),
                Side::Truth => "neutrino".to_string(),
            },
            branches: vec![BranchConfig {
                name: "edep".to_string(),
                var: "visible_energy".to_string(),
                side: branch_side,
            }],
        }
    }

    #[test]
    fn reco_branches_are_rejected_in_truth_trees() {
        let config = tree_config(Side::Truth, Side::Reco);
        assert!(matches!(
            Tree::from_config(&config),
            Err(Error::RecoBranchInTruthTree { .. })
        ));
    }

    #[test]
    fn unknown_cut_names_fail_up_front() {
        let mut config = tree_config(Side::Reco, Side::Reco);
        config.cut = "definitely_not_a_cut".to_string();
        assert!(Tree::from_config(&config).is_err());
    }
}
