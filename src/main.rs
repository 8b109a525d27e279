use cdn_provisioner::aws::{AcmDirectory, CloudFrontDirectory};
use cdn_provisioner::config::CONTROL_PLANE_REGION;
use cdn_provisioner::services::{JsonFileRuleSource, Provisioner};
use cdn_provisioner::{Config, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "provisioning failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(CONTROL_PLANE_REGION))
        .load()
        .await;
    let cloudfront = Arc::new(CloudFrontDirectory::new(aws_sdk_cloudfront::Client::new(
        &aws_config,
    )));
    let acm = Arc::new(AcmDirectory::new(aws_sdk_acm::Client::new(&aws_config)));
    let rules = Box::new(JsonFileRuleSource::new(config.cache_rules_path.clone()));

    let provisioner = Provisioner::new(cloudfront.clone(), acm, cloudfront, rules);
    let id = provisioner.run(&config).await?;

    // Structured line consumed by downstream automation.
    println!("DISTRIBUTION_ID={}", id);
    Ok(())
}
