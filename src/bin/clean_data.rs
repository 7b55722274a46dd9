use clap::Parser;
use oxford_rent::data::clean::{clean_file, CleanRules};
use oxford_rent::utils::logger;

#[derive(Parser)]
#[command(name = "clean-data")]
#[command(about = "Drop incomplete and implausible rows from a rentals CSV")]
struct Args {
    #[arg(short, long, default_value = "data/oxford_rentals.csv")]
    input: String,

    #[arg(short, long, default_value = "data/oxford_rentals_cleaned.csv")]
    output: String,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    match clean_file(&args.input, &args.output, &CleanRules::default()) {
        Ok(report) => {
            println!(
                "✅ Kept {} of {} rows ({} missing values, {} out of range)",
                report.output_rows, report.input_rows, report.dropped_missing, report.dropped_out_of_range
            );
            println!("📁 Output saved to: {}", args.output);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Cleaning failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
