use std::path::Path;

use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials as StaticCredentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::{debug, error, info};

use crate::config::{Credentials, StorageConfig};
use crate::error::{Error, Result};

pub const PARQUET_SUFFIX: &str = ".parquet";
const PARQUET_CONTENT_TYPE: &str = "application/x-parquet";

/// Builds an S3 client from the SDK defaults, overridden by whatever
/// credentials and endpoint were resolved. Retries are disabled.
pub async fn build_client(credentials: &Credentials, storage: &StorageConfig) -> S3Client {
    debug!(
        region = ?credentials.region,
        endpoint = ?storage.endpoint,
        static_credentials = credentials.key_pair().is_some(),
        "Initializing S3 client"
    );

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .retry_config(RetryConfig::disabled());

    if let Some(region) = &credentials.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some((access_key, secret_key)) = credentials.key_pair() {
        loader = loader.credentials_provider(StaticCredentials::new(
            access_key,
            secret_key,
            None,
            None,
            "static-credentials",
        ));
    }
    if let Some(endpoint) = &storage.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(storage.force_path_style)
        .build();

    S3Client::from_conf(s3_config)
}

pub struct S3Uploader {
    client: S3Client,
}

impl S3Uploader {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Probes `bucket`, then puts the file at `local_path` under `key`,
    /// replacing any existing object. Suffix checks run before any request.
    pub async fn upload(&self, local_path: &Path, bucket: &str, key: &str) -> Result<()> {
        if !key.ends_with(PARQUET_SUFFIX) {
            return Err(Error::InvalidOutputFormat(key.to_string()));
        }
        if !local_path.to_string_lossy().ends_with(PARQUET_SUFFIX) {
            return Err(Error::InvalidOutputFormat(local_path.display().to_string()));
        }
        if !local_path.exists() {
            return Err(Error::FileNotFound(local_path.to_path_buf()));
        }

        self.verify_bucket(bucket).await?;

        let file_size = std::fs::metadata(local_path)?.len();
        debug!(
            local_path = ?local_path,
            bucket = bucket,
            s3_key = key,
            file_size = file_size,
            "Starting file upload"
        );

        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| Error::UploadFailed {
                bucket: bucket.to_string(),
                key: key.to_string(),
                source: Box::new(e),
            })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type(PARQUET_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| {
                error!(
                    error = %DisplayErrorContext(&e),
                    bucket = bucket,
                    s3_key = key,
                    "Upload failed"
                );
                Error::UploadFailed {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    source: Box::new(e),
                }
            })?;

        info!(bucket = bucket, s3_key = key, file_size = file_size, "File uploaded");
        Ok(())
    }

    async fn verify_bucket(&self, bucket: &str) -> Result<()> {
        debug!(bucket = bucket, "Verifying bucket access");

        self.client
            .head_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                error!(
                    error = %DisplayErrorContext(&e),
                    bucket = bucket,
                    "Failed to access bucket"
                );
                Error::BucketUnavailable {
                    bucket: bucket.to_string(),
                    source: Box::new(e),
                }
            })?;

        Ok(())
    }
}

/// Names of every bucket the credentials can see.
pub async fn list_buckets(client: &S3Client) -> Result<Vec<String>> {
    let output = client
        .list_buckets()
        .send()
        .await
        .map_err(|e| {
            error!(error = %DisplayErrorContext(&e), "Failed to list buckets");
            Error::ListBucketsFailed(Box::new(e))
        })?;

    Ok(output
        .buckets()
        .iter()
        .filter_map(|bucket| bucket.name().map(str::to_string))
        .collect())
}
