//! Result and Error types for spinetools-spectrum

/// Type alias for Result<T, spectrum::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `spinetools-spectrum` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("a binning needs at least 2 edges, found {found}")]
    NotEnoughEdges { found: usize },

    #[error("bin edges must be finite and strictly increasing")]
    UnorderedEdges,

    #[error("a uniform binning needs at least one bin")]
    ZeroBins,

    #[error("invalid binning range {lower} to {upper}")]
    InvalidRange { lower: f64, upper: f64 },

    #[error("spectra have different binnings ({left} vs {right} bins)")]
    BinningMismatch { left: usize, right: usize },

    #[error("cannot rescale from a non-positive exposure ({exposure})")]
    InvalidExposure { exposure: f64 },
}
