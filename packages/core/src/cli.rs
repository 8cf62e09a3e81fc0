use clap::Parser;

/// gas-trax CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "gas-trax",
    version,
    about = "Fee trend, congestion and tip recommendations from recent blocks"
)]
pub struct Cli {
    /// JSON-RPC endpoint (must be https)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Fee polling interval in seconds
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Number of blocks sampled per poll
    #[arg(long)]
    pub block_count: Option<u64>,

    /// HTTP API port
    #[arg(long)]
    pub port: Option<u16>,

    /// Fetch once, print the summary and exit
    #[arg(long)]
    pub once: bool,
}
