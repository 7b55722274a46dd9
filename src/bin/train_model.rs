use clap::Parser;
use oxford_rent::data::dataset::read_listings;
use oxford_rent::ml::{train_and_save, ForestParams, TrainingParams};
use oxford_rent::utils::logger;

#[derive(Parser)]
#[command(name = "train-model")]
#[command(about = "Train the random forest rent model from a cleaned CSV")]
struct Args {
    #[arg(short, long, default_value = "data/oxford_rentals_cleaned.csv")]
    input: String,

    #[arg(short, long, default_value = "models/rental_model.json")]
    output: String,

    #[arg(long, default_value_t = 100)]
    n_estimators: usize,

    #[arg(long, default_value_t = 10)]
    max_depth: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let params = TrainingParams {
        forest: ForestParams {
            n_estimators: args.n_estimators,
            max_depth: args.max_depth,
            seed: args.seed,
        },
        split_seed: args.seed,
        ..TrainingParams::default()
    };

    let result = read_listings(&args.input).and_then(|listings| {
        tracing::info!("📂 Loaded {} listings from {}", listings.len(), args.input);
        train_and_save(&listings, &params, &args.output)
    });

    match result {
        Ok(report) => {
            println!("✅ Model trained on {} rows and saved to {}", report.rows, args.output);
            println!(
                "   MAE £{:.2}, RMSE £{:.2}, R² {:.3}",
                report.metrics.mae, report.metrics.rmse, report.metrics.r2
            );
            println!("   2 bed, 1 bath Flat in OX1: £{:.2}", report.sample_prediction);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Training failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
