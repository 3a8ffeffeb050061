//! Result and Error types for spinetools-systematics

/// Type alias for Result<T, systematics::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `spinetools-systematics` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed to read a selected-event table")]
    TableError(#[from] spinetools_analysis::Error),

    #[error("failed spectrum operation")]
    SpectrumError(#[from] spinetools_spectrum::Error),

    #[error("failed to write csv output")]
    CsvError(#[from] csv::Error),

    #[error("failed to encode results")]
    SerdeError(#[from] serde_json::Error),

    #[error("config line {line}: {reason}")]
    ConfigError { line: usize, reason: String },

    #[error("section \"{section}\" is missing the \"{key}\" key")]
    MissingKey { section: String, key: &'static str },

    #[error("duplicate section name \"{0}\"")]
    DuplicateSection(String),

    #[error("section \"{section}\" ends before its \"end\"")]
    UnterminatedSection { section: String },

    #[error("multisim \"{0}\" asks for zero universes")]
    ZeroUniverses(String),

    #[error("multisigma \"{section}\" sigma ladder has no pair for {sigma}")]
    UnpairedSigma { section: String, sigma: f64 },

    #[error("multisigma \"{0}\" needs the +/-1 sigma points for a covariance")]
    MissingUnitSigma(String),

    #[error("variation \"{0}\" has no sample")]
    EmptyVariation(String),

    #[error("row {row} has no weight set \"{source_name}\"")]
    MissingWeightSource { source_name: String, row: usize },

    #[error("row {row} weight set \"{source_name}\" has {found} weights, expected {expected}")]
    ShortWeightVector {
        source_name: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("covariance matrices have different dimensions ({left} vs {right} bins)")]
    DimensionMismatch { left: usize, right: usize },
}
