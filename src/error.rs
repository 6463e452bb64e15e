use std::path::PathBuf;
use thiserror::Error;
use parquet::errors::ParquetError;
use arrow::error::ArrowError;

pub type Result<T> = std::result::Result<T, Error>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The path {} does not look like a CSV file", .0.display())]
    InvalidInputFormat(PathBuf),

    #[error("File {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("No columns to parse from {}", .0.display())]
    EmptyCsv(PathBuf),

    #[error("The path {0} does not look like a Parquet file")]
    InvalidOutputFormat(String),

    #[error("Bucket {bucket} does not exist or is not accessible")]
    BucketUnavailable {
        bucket: String,
        #[source]
        source: BoxError,
    },

    #[error("Upload to s3://{bucket}/{key} failed")]
    UploadFailed {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("Listing buckets failed")]
    ListBucketsFailed(#[source] BoxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}
