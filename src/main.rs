use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

use spotify_etl::config::EtlConfig;
use spotify_etl::pipeline;
use spotify_etl::LoadOutcome;

#[derive(Parser, Debug)]
#[command(author, version, about = "Load recently played tracks from Spotify into SQLite")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, validate and load the last week of plays
    Run {
        /// Path to config file (TOML format). SPOTIFY_TOKEN, SPOTIFY_USERNAME
        /// and SPOTIFY_DB_PATH override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let result = match args.command {
        Command::Run { config } => EtlConfig::load(config.as_deref())
            .and_then(|config| pipeline::run(&config, chrono::Utc::now())),
    };

    match result {
        Ok(LoadOutcome::Appended(rows)) => {
            info!("Loaded {} new plays", rows);
            ExitCode::SUCCESS
        }
        Ok(LoadOutcome::AlreadyLoaded) => {
            info!("Nothing new to load");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
