use raster::RasterError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("missing required parameter '{0}'")]
    Builder(&'static str),

    #[error("storage directory {0} unavailable: {1}")]
    StorageDirUnavailable(PathBuf, #[source] std::io::Error),

    #[error("{0:?} can not be used as a file name")]
    InvalidName(String),

    #[error("failed to write {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: SerializationError,
    },

    #[error("no session archive at {0}")]
    MissingArchive(PathBuf),

    #[error("corrupt session archive {path}: {source}")]
    CorruptArchive {
        path: PathBuf,
        #[source]
        source: SerializationError,
    },

    #[error("corrupt grid file {path}: {source}")]
    CorruptGridFile {
        path: PathBuf,
        #[source]
        source: RasterError,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: SerializationError,
    },
}

/// Low level failure while encoding or decoding a single file.
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Raster(#[from] RasterError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported archive version {0}")]
    Version(u32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("column {name:?} has {len} rows, table has {expected}")]
    Ragged {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("duplicate column {0:?}")]
    Duplicate(String),

    #[error("column {name:?} row {row} has a non-finite coordinate")]
    NonFiniteCoordinate { name: String, row: usize },
}
