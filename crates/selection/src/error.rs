//! Result and Error types for spinetools-selection

/// Type alias for Result<T, selection::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `spinetools-selection` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unknown reco variable \"{0}\"")]
    UnknownRecoVariable(String),

    #[error("unknown truth variable \"{0}\"")]
    UnknownTruthVariable(String),

    #[error("unknown reco cut \"{0}\"")]
    UnknownRecoCut(String),

    #[error("unknown truth cut \"{0}\"")]
    UnknownTruthCut(String),
}
