pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{Error, Result};
pub use services::{convert, ConvertedFiles, Job};
pub use storage::{build_client, list_buckets, S3Uploader};
