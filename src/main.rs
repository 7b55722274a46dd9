use clap::Parser;
use oxford_rent::utils::{logger, validation::Validate};
use oxford_rent::web::{load_estimator, load_market_stats, AppState, Server};
use oxford_rent::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    if config.is_production() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting oxford-rent server ({})", config.environment);
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let estimator = load_estimator(&config.model_path, config.formula_only);
    tracing::info!("🧮 Estimator: {}", estimator.name());
    let market = load_market_stats(config.dataset_path.as_deref());

    let (host, port) = config.bind_address();
    Server::run(AppState::new(estimator, market), &host, port).await?;
    Ok(())
}
