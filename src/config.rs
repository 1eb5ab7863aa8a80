use anyhow::{bail, Result};
use std::env;

use crate::matcher::Target;

const DEFAULT_BUCKET: &str = "giantbomb-images";
const DEFAULT_PREFIX: &str = "uploads/";
const DEFAULT_FILENAME: &str = "464202-nazi.jpg";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";

const GCS_HOST: &str = "storage.googleapis.com";

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub prefix: String,
    pub filename: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
    pub scheme: String,
}

impl StorageConfig {
    pub fn load_from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        Self::resolve(cli, |name| env::var(name).ok())
    }

    /// Flag first, then `lookup` (the process environment outside of tests),
    /// then the built-in default.
    fn resolve(cli: &crate::cli::Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get_value = |cli_value: &Option<String>, env_var: &str, default: &str| -> String {
            cli_value
                .clone()
                .or_else(|| lookup(env_var))
                .unwrap_or_else(|| default.to_string())
        };
        let get_optional = |cli_value: &Option<String>, env_var: &str| -> Option<String> {
            cli_value
                .clone()
                .or_else(|| lookup(env_var))
                .filter(|value| !value.is_empty())
        };

        let bucket = get_value(&cli.bucket, "STORAGE_BUCKET", DEFAULT_BUCKET);
        let prefix = get_value(&cli.prefix, "STORAGE_PREFIX", DEFAULT_PREFIX);
        let filename = get_value(&cli.filename, "TARGET_FILENAME", DEFAULT_FILENAME);
        let region = get_value(&cli.region, "STORAGE_REGION", DEFAULT_REGION);
        let access_key = get_optional(&cli.access_key, "STORAGE_ACCESS_KEY");
        let secret_key = get_optional(&cli.secret_key, "STORAGE_SECRET_KEY");
        // An empty endpoint selects the SDK's own (AWS) endpoint resolution.
        let endpoint = Some(get_value(&cli.endpoint, "STORAGE_URL", DEFAULT_ENDPOINT))
            .filter(|value| !value.is_empty());
        let scheme = get_optional(&cli.scheme, "STORAGE_SCHEME")
            .unwrap_or_else(|| default_scheme(endpoint.as_deref()).to_string());

        if bucket.is_empty() {
            bail!("Bucket name must not be empty");
        }
        if filename.is_empty() {
            bail!("Target filename must not be empty");
        }
        if filename.contains('/') {
            bail!("Target filename must not contain '/': {}", filename);
        }
        if access_key.is_some() != secret_key.is_some() {
            bail!("Access key and secret key must be provided together");
        }

        Ok(StorageConfig {
            bucket,
            prefix,
            filename,
            region,
            access_key,
            secret_key,
            endpoint,
            scheme,
        })
    }

    pub fn target(&self) -> Target {
        Target::new(&self.prefix, &self.filename)
    }
}

fn default_scheme(endpoint: Option<&str>) -> &'static str {
    match endpoint {
        Some(url) if url.contains(GCS_HOST) => "gs",
        _ => "s3",
    }
}
