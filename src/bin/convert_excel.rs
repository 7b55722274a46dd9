use clap::Parser;
use oxford_rent::data::convert::convert_excel_to_csv;
use oxford_rent::utils::logger;

#[derive(Parser)]
#[command(name = "convert-excel")]
#[command(about = "Convert the first worksheet of a workbook to CSV")]
struct Args {
    #[arg(short, long, default_value = "data/oxford_rentals.xlsx")]
    input: String,

    #[arg(short, long, default_value = "data/oxford_rentals.csv")]
    output: String,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    match convert_excel_to_csv(&args.input, &args.output) {
        Ok(summary) => {
            println!(
                "✅ Converted sheet '{}' ({} rows) to {}",
                summary.sheet, summary.rows, args.output
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Conversion failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
