use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use education_costs_etl::config::{self, Credentials, Settings};
use education_costs_etl::{build_client, Job, S3Uploader};

const CSV_FILE: &str = "./data/international_education_costs.csv";
const OUTPUT_DIR: &str = "output";
const BUCKET_NAME: &str = "sql-athena-parquet-3";
const S3_KEY: &str = "parquet_files/international_education_costs.parquet";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    config::init_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new()?;
    let credentials = Credentials::resolve();

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    println!("Starting job at: {}", timestamp);

    let client = build_client(&credentials, &settings.storage).await;
    let uploader = S3Uploader::new(client);

    let job = Job {
        csv_path: PathBuf::from(CSV_FILE),
        output_dir: PathBuf::from(OUTPUT_DIR),
        bucket: BUCKET_NAME.to_string(),
        key: S3_KEY.to_string(),
    };
    let files = job.run(&uploader).await?;

    println!("JSON file: {}", files.json_path.display());
    println!("Parquet file: {}", files.parquet_path.display());
    println!(
        "Successfully uploaded {} rows to s3://{}/{}",
        files.rows, job.bucket, job.key
    );

    Ok(())
}
