use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::Client;
use tracing::debug;

use crate::config::StorageConfig;

/// Builds the client once per run. Explicit keys take precedence; without
/// them the SDK's default credential chain is used.
pub async fn create_client(config: &StorageConfig) -> Client {
    debug!(bucket = %config.bucket, region = %config.region, "creating storage client");

    let region = Region::new(config.region.clone());
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

    if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
        debug!("using static credentials");
        let credentials = Credentials::new(
            access_key.clone(),
            secret_key.clone(),
            None,
            None,
            "custom",
        );
        loader = loader.credentials_provider(credentials);
    }

    if let Some(endpoint) = &config.endpoint {
        debug!(endpoint = %endpoint, "using custom endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config: SdkConfig = loader.load().await;

    let client_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.endpoint.is_some())
        .build();

    Client::from_conf(client_config)
}
