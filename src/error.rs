use std::path::PathBuf;

use crate::types::Dims;

/// Problems with the container or solver setup, raised before any solving.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("tote dimensions must be non-zero, got {dims}")]
    ZeroDimension { dims: Dims },

    #[error("tote volume of {dims} overflows")]
    CapacityOverflow { dims: Dims },

    #[error("capacity {capacity} exceeds the supported maximum of {limit}")]
    CapacityTooLarge { capacity: u64, limit: u64 },

    #[error("solver capacity must be positive")]
    ZeroCapacity,

    #[error("item {id} has zero volume")]
    ZeroVolumeItem { id: u32 },
}

/// Failures reading the product feed. No partial catalog is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("cannot read product file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed reading product feed: {source}")]
    Read { source: std::io::Error },

    #[error("line {line}: expected 6 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid {field} '{value}'")]
    MalformedField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}
