//! Event records and file parsing for SPINE reconstruction outputs
//!
//! Each event holds the reconstructed and true interactions of one recorded
//! spill, with every interaction carrying its constituent particles. Records
//! are stored one JSON document per line so that arbitrarily large samples
//! can be streamed without holding more than a single event in memory.
//!
//! # Quickstart example
//!
//! ```rust, no_run
//! # use spinetools_event::read_events;
//! // Read every event contained in the file
//! let events = read_events("path/to/events.jsonl").unwrap();
//!
//! for event in &events {
//!     println!("{} reco / {} true", event.reco.len(), event.truth.len());
//! }
//! ```
//!
//! For samples too large to collect, [EventReader] provides a streaming
//! iterator with an optional progress bar.
//!
//! # True and reconstructed views
//!
//! Analysis code rarely cares which side of the truth-matching it is looking
//! at. The [ParticleView] and [InteractionView] traits expose the accessors
//! shared by both record types, with the type-specific definitions (e.g. how
//! kinetic energy is estimated) living on the implementations.

// Split into subfiles for development, but anything important is re-exported
mod error;
mod event;
mod interaction;
mod particle;

pub mod reader;

#[doc(inline)]
pub use reader::{read_events, EventReader};

#[doc(inline)]
pub use event::Event;

#[doc(inline)]
pub use interaction::{Flash, InteractionView, RecoInteraction, TrueInteraction};

#[doc(inline)]
pub use particle::{Current, ParticleView, Pid, RecoParticle, Shape, TrueParticle};

#[doc(inline)]
pub use error::Error;
