//! Result and Error types for spinetools-event

/// Type alias for Result<T, event::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `spinetools-event` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("malformed event record on line {line}")]
    MalformedRecord {
        line: usize,
        source: serde_json::Error,
    },
}
