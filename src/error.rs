use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, saving or configuring a map.
#[derive(Debug, Error)]
pub enum MapError {
    /// A persisted coordinate key is not two comma separated integers.
    #[error("invalid coordinate key '{key}'")]
    InvalidCoordinateKey {
        /// The offending key as written in the document.
        key: String,
    },
    /// A grid entry names a tile id that cannot be placed on the map.
    #[error("cell '{key}' holds unusable tile id {id}")]
    UnknownTileId {
        /// Coordinate key of the entry.
        key: String,
        /// The raw id found in the document.
        id: serde_json::Value,
    },
    /// A note entry holds something other than text.
    #[error("note at '{key}' is not text")]
    InvalidNote {
        /// Coordinate key of the entry.
        key: String,
    },
    /// The document parsed as JSON but its top-level shape is wrong.
    #[error("malformed map document: {0}")]
    MalformedDocument(String),
    /// The file is not valid JSON.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// File being decoded.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// The editor configuration has out-of-range values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
