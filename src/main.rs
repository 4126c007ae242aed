use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_admin::cli::{self, Cli};
use course_admin::config::ApiConfig;
use course_admin::error::AppError;
use course_admin::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_admin=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = ApiConfig::new_from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    tracing::debug!("using backend at {}", config.base_url);

    let state = AppState::new(config)?;
    cli::run(cli.command, &state).await
}
