use thiserror::Error;

/// Engine error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("block number {0} is past the last known epoch")]
    OutOfRange(u64),

    #[error("cache size {0} is not a whole number of nodes")]
    InvalidCacheSize(u64),

    #[error("dataset size {0} is not page aligned")]
    InvalidDatasetSize(u64),

    #[error("could not allocate {0} bytes for the cache")]
    Allocation(u64),

    #[error("DAG file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DAG generation canceled by progress callback")]
    Canceled,
}

pub type Result<T> = std::result::Result<T, Error>;
