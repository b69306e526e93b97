use thiserror::Error;

/// Failures the usage pipeline distinguishes. Everything else (settings I/O,
/// JSON) travels as `anyhow::Error`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Usage-access has not been granted; the pipeline stops here.
    #[error("usage access permission has not been granted")]
    PermissionDenied,

    /// The package manager has no record of this package; it is skipped.
    #[error("app not found: {0}")]
    PackageNotFound(String),

    #[error("usage window start {start_ms} must be before end {end_ms}")]
    InvalidWindow { start_ms: i64, end_ms: i64 },
}
