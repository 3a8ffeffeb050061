//! Kinematic variables and selection cuts for neutrino interactions
//!
//! This crate is the vocabulary of an analysis: every number that can be
//! histogrammed and every predicate an event selection is composed from.
//!
//! - [pvars] - variables acting on single particles
//! - [vars] - variables acting on whole interactions
//! - [cuts] - boolean selection cuts on interactions
//! - [Category] - truth categorisation for stacked plots
//! - [registry] - stable string names for all of the above
//!
//! Variables and cuts are written once against the
//! [ParticleView](spinetools_event::ParticleView) and
//! [InteractionView](spinetools_event::InteractionView) traits and work on
//! both the reconstructed and true records of an event:
//!
//! ```rust
//! # use spinetools_event::{Pid, RecoInteraction, RecoParticle};
//! # use spinetools_selection::{cuts, vars};
//! let interaction = RecoInteraction {
//!     particles: vec![
//!         RecoParticle {
//!             pid: Pid::Muon,
//!             is_primary: true,
//!             is_contained: true,
//!             csda_ke: 250.0,
//!             ..Default::default()
//!         },
//!     ],
//!     ..Default::default()
//! };
//!
//! assert!(!cuts::topological_1mu_np(&interaction)); // no proton
//! assert!(vars::visible_energy(&interaction) > 0.0);
//! ```

mod category;
mod error;
mod utilities;

pub mod cuts;
pub mod pvars;
pub mod registry;
pub mod vars;

#[doc(inline)]
pub use category::Category;

#[doc(inline)]
pub use utilities::{count_primaries, final_state_signal, leading_index};

#[doc(inline)]
pub use error::Error;
