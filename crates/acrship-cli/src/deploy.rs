use acrship_cloud::{DeployClient, Pipeline};
use acrship_core::{AcrshipSettings, overrides, parse_overrides};
use std::ffi::OsString;
use std::path::Path;

/// Resolve the deployment config and run the full pipeline.
///
/// Settings and overrides are fully resolved before any external tool runs.
pub async fn deploy(args: impl Iterator<Item = OsString>) -> anyhow::Result<()> {
    let settings = AcrshipSettings::load(Path::new("."))?;
    let config = parse_overrides(settings.deployment, overrides::utf8_args(args)?)?;

    println!("Deploying {} to {}", config.image_name, config.registry_host());

    let pipeline = Pipeline::new(DeployClient::new(), settings.azure.tenant_id);
    let outcome = pipeline.run(&config).await?;

    for step in &outcome.steps {
        println!("  {step}");
    }
    println!();
    println!("Deployment completed successfully.");
    println!("Image: {}", outcome.image);

    Ok(())
}
