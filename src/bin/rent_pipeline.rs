use clap::Parser;
use oxford_rent::config::toml_config::PipelineConfig;
use oxford_rent::core::scheduler::DailySchedule;
use oxford_rent::utils::{logger, validation::Validate};
use oxford_rent::{EtlEngine, LocalStorage, RentPipeline};

#[derive(Parser)]
#[command(name = "rent-pipeline")]
#[command(about = "Scrape, clean and retrain on a daily schedule")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/rent-pipeline.toml")]
    config: String,

    /// Run the pipeline once and exit instead of scheduling it
    #[arg(long)]
    once: bool,

    /// Show what would be processed without executing
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);
    let config = match PipelineConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        return Ok(());
    }

    let schedule = DailySchedule::new(config.daily_at()?);
    let storage = LocalStorage::new(config.paths.base_dir.clone());
    let engine = EtlEngine::new(RentPipeline::new(storage, config));

    if args.once {
        match engine.run().await {
            Ok(outcome) => {
                println!("✅ Pipeline completed: {} cleaned rows", outcome.cleaned_rows);
                if let Some(model) = outcome.model_path {
                    println!("💾 Model saved to: {}", model);
                }
            }
            Err(e) => {
                tracing::error!("❌ Pipeline failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    tracing::info!("⏰ Scheduler started, daily run at {}", schedule.at.format("%H:%M"));
    schedule.run_forever(|| engine.run()).await;
    Ok(())
}

fn display_config_summary(config: &PipelineConfig) {
    println!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        println!("   {}", description);
    }
    println!("🌐 Source: {} ({} pages)", config.source.endpoint, config.pages());
    println!("📁 Base directory: {}", config.paths.base_dir);
    println!("   Raw data: {}", config.raw_data_path());
    println!("   Cleaned data: {}", config.cleaned_data_path());
    println!("   Model: {}", config.model_path());
    println!(
        "🧠 Retrain when at least {} rows survive cleaning",
        config.min_rows_for_training()
    );
}
