use clap::Parser;
use oxford_rent::data::dataset::write_listings;
use oxford_rent::data::sample::{generate_listings, SampleParams};
use oxford_rent::utils::logger;

#[derive(Parser)]
#[command(name = "sample-data")]
#[command(about = "Generate a synthetic Oxford rentals dataset")]
struct Args {
    #[arg(short, long, default_value = "data/oxford_rentals_cleaned.csv")]
    output: String,

    #[arg(long, default_value_t = 200)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let params = SampleParams {
        rows: args.rows,
        seed: args.seed,
    };
    match generate_listings(params).and_then(|listings| write_listings(&args.output, &listings)) {
        Ok(()) => {
            println!("✅ Wrote {} sample listings to {}", args.rows, args.output);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Sample generation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
