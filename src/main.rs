//! giglog - gig log diagnostics and voice trip entry
//!
//! `giglog parse "<transcript>"` prints the fields a dictated trip fills in;
//! `giglog diagnose <export.json>` prints the data-quality report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use giglog::config::{config_path, Config};
use giglog::diagnostics::{run_diagnostics, Dataset};
use giglog::voice::{ReferenceLists, VoiceParser};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a spoken trip description into fields
    Parse {
        transcript: String,

        /// JSON file with services/types/places/addresses lists
        #[arg(long)]
        lists: Option<PathBuf>,
    },
    /// Run data diagnostics over a JSON export
    Diagnose { dataset: PathBuf },
    /// Show the active configuration
    Config {
        /// Write the default configuration if none exists
        #[arg(long)]
        init: bool,
    },
}

fn log_level(args: &Args, config: &Config) -> Level {
    if args.verbose {
        return Level::DEBUG;
    }
    config.log_level.parse().unwrap_or(Level::INFO)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let path = args.config.clone().unwrap_or_else(config_path);
    let config = Config::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    // RUST_LOG wins over the configured level; logs go to stderr so stdout stays JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(&args, &config).as_str()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Parse { transcript, lists } => {
            let lists = match lists {
                Some(file) => ReferenceLists::from_json_file(&file)?,
                None => config.reference_lists.clone(),
            };
            info!("🎙️ Parsing: '{}'", transcript);
            let result = VoiceParser::from_config(&config).parse(&transcript, &lists);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Diagnose { dataset } => {
            let data = Dataset::from_json_file(&dataset)?;
            let report = run_diagnostics(&data);
            let problems = report.iter().filter(|d| d.count > 0).count();
            info!("🔍 {} of {} checks found issues", problems, report.len());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Config { init } => {
            if init && !path.exists() {
                config.save_to(&path)?;
                info!("💾 Wrote default config to {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
