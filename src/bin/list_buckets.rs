use anyhow::Result;

use education_costs_etl::config::{self, Credentials, Settings};
use education_costs_etl::{build_client, list_buckets};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    config::init_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let settings = Settings::new()?;
    let credentials = Credentials::resolve();

    let client = build_client(&credentials, &settings.storage).await;
    let names = list_buckets(&client).await?;

    println!("Available buckets: {:?}", names);
    for name in &names {
        println!("  {}", name);
    }

    Ok(())
}
