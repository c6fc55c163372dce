use std::path::PathBuf;

use clap::Parser;

/// Onboarding service built on corelib
#[derive(Debug, Parser)]
#[command(name = "corelib", about = "Error envelopes, message catalogs and a Redis hash cache over HTTP")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "corelib.toml", env = "CORELIB_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "CORELIB_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Override the log filter, e.g. `corelib_server=debug`
    #[arg(long, env = "CORELIB_LOG")]
    pub log_filter: Option<String>,
}
