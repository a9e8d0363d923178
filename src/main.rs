//! doxml - Extract XML from C/C++ documentation comments using Doxygen

mod config;
mod extract_cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// 安装包版本 (major.minor)
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION_MAJOR"), ".", env!("CARGO_PKG_VERSION_MINOR"));

#[derive(Parser)]
#[command(name = "doxml")]
#[command(about = "Extract XML from C/C++ documentation comments using Doxygen.", version = VERSION)]
struct Cli {
    #[command(flatten)]
    extract: extract_cli::ExtractArgs,
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // XML 走 stdout, 日志只写 stderr
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    extract_cli::run(cli.extract).await
}
