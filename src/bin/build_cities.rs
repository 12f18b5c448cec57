use anyhow::{Context, Result};
use std::env;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaffel_afterhours_bot::config::BuilderConfig;
use vaffel_afterhours_bot::services::geonames::{collect_city_timezones, GeonamesClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Progress counters from the fetch loop are emitted via tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaffel_afterhours_bot=info,build_cities=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("build");

    match command {
        "build" => run_build().await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

async fn run_build() -> Result<()> {
    println!("🌍 Vaffel After-Hours Bot - City Table Builder");
    println!("================================================");

    // Load environment configuration
    dotenvy::dotenv().ok();
    let config = BuilderConfig::from_env()?;

    println!("📄 Output file: {}", config.output_file);
    println!("🚀 Fetching populated places from GeoNames...");

    let client = GeonamesClient::new(&config.geonames_username)?;
    let started = Instant::now();

    let table = collect_city_timezones(&client).await?;

    let json = serde_json::to_string_pretty(&table).context("failed to serialize city table")?;
    std::fs::write(&config.output_file, json)
        .with_context(|| format!("failed to write {}", config.output_file))?;

    println!("\n✅ Done!");
    println!("• Cities resolved: {}", table.len());
    println!("• Elapsed: {:.2}s", started.elapsed().as_secs_f64());

    Ok(())
}

fn print_help() {
    println!("🌍 Vaffel After-Hours Bot - City Table Builder");
    println!();
    println!("USAGE:");
    println!("    build-cities [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    build          Fetch the city timezone table (default)");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    GEONAMES_USERNAME   GeoNames API username (required)");
    println!("    CITIES_FILE         Output path (default: cities_timezones.json)");
    println!();
    println!("EXAMPLES:");
    println!("    build-cities                # Build the table");
    println!("    build-cities help           # Show this help");
    println!();
}
