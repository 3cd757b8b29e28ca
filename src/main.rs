use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use villa::StartScreen;
use villa::core::config::{CliOverrides, VillaConfig, load_config, resolve};

#[derive(Parser)]
#[command(name = "villa", about = "Terminal front-end for the villa booking site")]
struct Args {
    /// Booking API base URL (overrides config and VILLA_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Screen to open on startup
    #[arg(short, long, default_value_t, value_enum)]
    start: StartScreen,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to villa.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("villa.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        VillaConfig::default()
    });
    let resolved = resolve(
        &config,
        &CliOverrides {
            api_url: args.api_url,
        },
    );

    log::info!(
        "Villa starting up against {} (start screen: {:?})",
        resolved.api_base_url,
        args.start
    );

    villa::tui::run(resolved, args.start.into())
}
