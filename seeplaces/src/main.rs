use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seeplaces::{
    CacheConfig, IataCode, MokaResponseCache, ResponseCache, SeePlacesOptions, SeePlacesService,
};

/// Query the SeePlaces excursion API.
///
/// Reads BASE_URL, API_VERSION and optionally SCOPE_ID from the environment.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every spoken language the backend knows.
    Languages,

    /// List excursions at a location.
    Excursions {
        /// IATA code of the location, e.g. BTS.
        #[arg(long)]
        iata: IataCode,

        /// First day, YYYY-MM-DD.
        #[arg(long)]
        from: NaiveDate,

        /// Last day, YYYY-MM-DD.
        #[arg(long)]
        to: NaiveDate,

        /// Guide language by English name. Repeatable.
        #[arg(long = "language", required = true)]
        languages: Vec<String>,

        /// Print the excursions as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Build the cached service from the environment
    let options = SeePlacesOptions::from_env().context("failed to read configuration")?;
    let cache: Arc<dyn ResponseCache> = Arc::new(MokaResponseCache::new(&CacheConfig::default()));
    let service = SeePlacesService::from_options(options, Some(cache))
        .context("failed to create SeePlaces client")?;

    match cli.command {
        Command::Languages => {
            let languages = service
                .spoken_languages()
                .context("failed to fetch spoken languages")?;
            for language in languages {
                println!(
                    "{}\t{}\t{}",
                    language.id,
                    language.name,
                    language.url_name.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Excursions {
            iata,
            from,
            to,
            languages,
            json,
        } => {
            let excursions = service
                .get_excursions(&iata, from, to, &languages)
                .with_context(|| format!("failed to fetch excursions for {iata}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(excursions.as_slice())?);
                return Ok(());
            }

            if excursions.is_empty() {
                println!("No excursions found for {iata} between {from} and {to}.");
            }
            for excursion in excursions.iter() {
                println!("{}", excursion.name());
                println!(
                    "  {:.2} {} | {}",
                    excursion.final_price(),
                    excursion.currency(),
                    excursion.duration_display()
                );
                if !excursion.included_in_price().is_empty() {
                    println!("  Included: {}", excursion.included_in_price().join(", "));
                }
                println!();
            }
        }
    }

    Ok(())
}
