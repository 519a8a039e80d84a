use anyhow::Context;
use carmatch::{
    CarmatchConfig, Catalog, DisplayRow, MatchKind, PreferenceQuery, Recommendation,
    RecommendationSession,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Recommend similar pre-owned cars from a catalog
#[derive(Parser, Debug)]
#[command(name = "carmatch")]
#[command(about = "Similarity-based pre-owned car recommendations", long_about = None)]
struct Args {
    /// Path to the catalog (JSON array of records)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Optional JSON config: column names, feature weights, fallback policy
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend entries similar to the one at a catalog position
    Similar {
        #[arg(long)]
        index: usize,

        #[arg(long, default_value_t = 5)]
        top_n: usize,
    },
    /// Find a base entry from buyer preferences, then recommend around it
    Match {
        /// Make or model text, matched as a case-insensitive substring
        #[arg(long)]
        name: String,

        #[arg(long)]
        max_price: f64,

        #[arg(long)]
        max_kms: f64,

        /// Fuel preference, e.g. Petrol, Diesel, Electric, Hybrid
        #[arg(long)]
        fuel: String,

        /// Transmission preference, e.g. Manual, Automatic
        #[arg(long)]
        transmission: String,

        #[arg(long, default_value_t = 5)]
        top_n: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => CarmatchConfig::from_file(path)
            .with_context(|| format!("loading config {:?}", path))?,
        None => CarmatchConfig::default(),
    };

    let catalog = Catalog::from_json_file(&args.catalog, &config.columns)
        .with_context(|| format!("loading catalog {:?}", args.catalog))?;
    info!("Loaded {} catalog entries from {:?}", catalog.len(), args.catalog);

    let session = RecommendationSession::new(catalog, config.features)?
        .with_fallback(config.fallback);

    match args.command {
        Command::Similar { index, top_n } => {
            let recommendation = session.recommend(index, top_n)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                let base = session.catalog().entry(index)?;
                println!("Base car for recommendation: {}", base.name);
                print_recommendation(&recommendation);
            }
        }
        Command::Match {
            name,
            max_price,
            max_kms,
            fuel,
            transmission,
            top_n,
        } => {
            let query = PreferenceQuery::new(name, max_price, max_kms, fuel, transmission);
            let result = session.recommend_for_preferences(&query, top_n)?;
            match (result, args.json) {
                (Some(result), true) => println!("{}", serde_json::to_string_pretty(&result)?),
                (None, true) => println!("null"),
                (Some(result), false) => {
                    if result.kind == MatchKind::NearestPrice {
                        println!("No exact match found. Recommending based on closest price.");
                    }
                    println!("Base car for recommendation: {}", result.base.name);
                    print_recommendation(&result.recommendation);
                }
                (None, false) => println!("No suitable cars found for your preferences."),
            }
        }
    }

    Ok(())
}

fn print_recommendation(recommendation: &Recommendation<'_>) {
    if recommendation.is_empty() {
        println!("No recommendations.");
        return;
    }

    println!("\nRecommended Cars:");
    for item in recommendation.iter() {
        println!("{:>6.3}  {}", item.score, format_row(&item.display));
    }
}

fn format_row(row: &DisplayRow<'_>) -> String {
    let mut line = format!(
        "[{}] {} | price {} | {} km",
        row.position, row.name, row.price, row.kms_driven
    );
    if let Some(condition) = row.condition {
        line.push_str(&format!(" | {}", condition));
    }
    let flags: Vec<&str> = row.indicators.set_columns().collect();
    if !flags.is_empty() {
        line.push_str(&format!(" | {}", flags.join(", ")));
    }
    line
}
