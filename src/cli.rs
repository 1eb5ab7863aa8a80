use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "purge-file")]
#[command(about = "Find a file anywhere under a bucket prefix and delete every copy")]
#[command(version = "1.0")]
pub struct Cli {
    /// Log diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Storage bucket name (overrides env STORAGE_BUCKET)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Key prefix to search under (overrides env STORAGE_PREFIX)
    #[arg(long)]
    pub prefix: Option<String>,

    /// File name to look for (overrides env TARGET_FILENAME)
    #[arg(long)]
    pub filename: Option<String>,

    /// Storage region (overrides env STORAGE_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Storage access key (overrides env STORAGE_ACCESS_KEY)
    #[arg(long)]
    pub access_key: Option<String>,

    /// Storage secret key (overrides env STORAGE_SECRET_KEY)
    #[arg(long)]
    pub secret_key: Option<String>,

    /// Storage endpoint URL (overrides env STORAGE_URL)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// URI scheme shown for matches, e.g. gs or s3 (overrides env STORAGE_SCHEME)
    #[arg(long)]
    pub scheme: Option<String>,
}
