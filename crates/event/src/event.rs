//! Module for the top-level event record

use serde::{Deserialize, Serialize};

use crate::interaction::{InteractionView, RecoInteraction, TrueInteraction};

/// One recorded spill with its reconstructed and true interactions
///
/// The reconstructed and true interaction lists are matched against each
/// other by id through the `match_ids` fields, best match first. Data
/// events carry an empty truth list.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Run number
    pub run: u32,
    /// Subrun number
    pub subrun: u32,
    /// Event number within the subrun
    pub event: u32,
    /// Reconstructed interaction candidates
    pub reco: Vec<RecoInteraction>,
    /// True interactions, empty for data
    pub truth: Vec<TrueInteraction>,
}

impl Event {
    /// Look up a true interaction by its neutrino id
    pub fn find_truth(&self, nu_id: i64) -> Option<&TrueInteraction> {
        self.truth.iter().find(|t| t.nu_id == nu_id)
    }

    /// Resolve the best-matched true interaction of a reco candidate
    ///
    /// Returns `None` for unmatched candidates and on data events.
    ///
    /// ```rust
    /// # use spinetools_event::{Event, RecoInteraction, TrueInteraction};
    /// let event = Event {
    ///     reco: vec![RecoInteraction { id: 0, match_ids: vec![4], ..Default::default() }],
    ///     truth: vec![TrueInteraction { nu_id: 4, ..Default::default() }],
    ///     ..Default::default()
    /// };
    /// let truth = event.matched_truth(&event.reco[0]).unwrap();
    /// assert_eq!(truth.nu_id, 4);
    /// ```
    pub fn matched_truth(&self, reco: &RecoInteraction) -> Option<&TrueInteraction> {
        self.find_truth(reco.best_match()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_reco_resolves_to_none() {
        let event = Event {
            reco: vec![RecoInteraction::default()],
            truth: vec![TrueInteraction { nu_id: 1, ..Default::default() }],
            ..Default::default()
        };
        assert!(event.matched_truth(&event.reco[0]).is_none());
    }

    #[test]
    fn event_round_trips_through_json() {
        let event = Event {
            run: 9435,
            subrun: 12,
            event: 881,
            reco: vec![RecoInteraction { id: 3, ..Default::default() }],
            truth: Vec::new(),
        };
        let text = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&text).unwrap();
        assert_eq!(event, back);
    }
}
