use std::path::PathBuf;

use clap::Parser;

/// Mirage media generation gateway
#[derive(Debug, Parser)]
#[command(name = "mirage", about = "TTS and image gateway with provider fallback and local synthesis")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "mirage.toml", env = "MIRAGE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "MIRAGE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
