use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wslisten::cli::Args;
use wslisten::shutdown::ctrl_c_token;
use wslisten::{Config, Listener};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    init_logging(&config);

    info!(config=?config, "Configuration loaded");

    let shutdown_token = ctrl_c_token();

    let listener = Listener::connect(&args.uri, &config)
        .await
        .with_context(|| format!("Failed to listen on {}", args.uri))?;

    let mut stdout = std::io::stdout();
    let received = listener.run(&mut stdout, shutdown_token).await?;

    info!(received, "wslisten stopped");

    Ok(())
}

fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, registry, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    // stdout carries markers only
    registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .init();
}
