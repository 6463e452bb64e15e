use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::services::converter::{self, ConvertedFiles};
use crate::storage::S3Uploader;

/// One end-to-end run: convert `csv_path` into `output_dir`, then push the
/// Parquet file to `bucket`/`key`.
#[derive(Debug, Clone)]
pub struct Job {
    pub csv_path: PathBuf,
    pub output_dir: PathBuf,
    pub bucket: String,
    pub key: String,
}

impl Job {
    pub async fn run(&self, uploader: &S3Uploader) -> Result<ConvertedFiles> {
        info!(
            csv_path = ?self.csv_path,
            output_dir = ?self.output_dir,
            bucket = %self.bucket,
            s3_key = %self.key,
            "Starting job"
        );

        let files = converter::convert(&self.csv_path, &self.output_dir)?;

        println!("Uploading {} to s3://{}/{}", files.parquet_path.display(), self.bucket, self.key);
        uploader
            .upload(&files.parquet_path, &self.bucket, &self.key)
            .await?;

        Ok(files)
    }
}
