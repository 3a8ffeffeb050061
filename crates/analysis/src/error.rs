//! Result and Error types for spinetools-analysis

/// Type alias for Result<T, analysis::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `spinetools-analysis` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to read events")]
    EventError(#[from] spinetools_event::Error),

    #[error("failed to resolve a variable or cut")]
    SelectionError(#[from] spinetools_selection::Error),

    #[error("failed to encode or decode a record")]
    SerdeError(#[from] serde_json::Error),

    #[error("malformed table row on line {line}")]
    MalformedRow {
        line: usize,
        source: serde_json::Error,
    },

    #[error("tree \"{tree}\" selects on truth but branch \"{branch}\" is a reco variable")]
    RecoBranchInTruthTree { tree: String, branch: String },

    #[error("duplicate {kind} name \"{name}\"")]
    DuplicateName { kind: &'static str, name: String },
}
