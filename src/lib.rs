//! `spinetools` is a semi-modular toolkit of fast and reliable libraries for
//! neutrino interaction analysis
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use spinetools_utils as utils;

#[cfg(feature = "event")]
#[cfg_attr(docsrs, doc(cfg(feature = "event")))]
#[doc(inline)]
pub use spinetools_event as event;

#[cfg(feature = "selection")]
#[cfg_attr(docsrs, doc(cfg(feature = "selection")))]
#[doc(inline)]
pub use spinetools_selection as selection;

#[cfg(feature = "spectrum")]
#[cfg_attr(docsrs, doc(cfg(feature = "spectrum")))]
#[doc(inline)]
pub use spinetools_spectrum as spectrum;

#[cfg(feature = "analysis")]
#[cfg_attr(docsrs, doc(cfg(feature = "analysis")))]
#[doc(inline)]
pub use spinetools_analysis as analysis;

#[cfg(feature = "systematics")]
#[cfg_attr(docsrs, doc(cfg(feature = "systematics")))]
#[doc(inline)]
pub use spinetools_systematics as systematics;
