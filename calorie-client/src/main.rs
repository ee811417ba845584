//! `calorie` - look up dish calories and keep a short lookup history.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use calorie_client::{AppState, Config};

mod cli;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check calorie.toml or the CALORIE__API__BASE_URL style environment variables.",
            e
        )
    })?;

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(
        base_url = %config.api.base_url,
        storage = %config.storage.resolve_dir().display(),
        "Starting calorie client"
    );

    let app = AppState::new(config)?;
    let succeeded = cli::run(&app, cli.command).await;
    cli::print_notifications(&app);

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
