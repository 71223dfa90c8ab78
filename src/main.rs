use anyhow::Result;

use sip_brewery::cli::run_cli;
use sip_brewery::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure config/default.toml exists or SIP_BREWERY_CONFIG points at a config file");
            std::process::exit(1);
        }
    };

    // Logs go to stderr so stdout carries only the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.as_str())
            }),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(api_url = %config.api.base_url, "Starting sip-brewery");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = run_cli(&args, &config).await?;
    println!("{}", output);
    Ok(())
}
