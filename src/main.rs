//! fitlog - Personal fitness tracker

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fitlog::config::{Config, DEFAULT_WORKOUT};
use fitlog::export::{self, EXPORT_FILE, SESSION_FILE};
use fitlog::log::WorkoutLog;
use fitlog::stats;
use fitlog::tui::App;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(author, version, about = "Personal fitness tracker")]
struct Cli {
    /// File the text export is written to
    #[arg(long, env = "FITLOG_EXPORT_PATH", default_value = EXPORT_FILE, global = true)]
    export_path: PathBuf,

    /// JSON session file the TUI saves to
    #[arg(long, env = "FITLOG_SESSION_PATH", default_value = SESSION_FILE, global = true)]
    session_path: PathBuf,

    /// Workout every interactive session starts with
    #[arg(long, env = "FITLOG_DEFAULT_WORKOUT", default_value = DEFAULT_WORKOUT, global = true)]
    default_workout: String,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, env = "FITLOG_LOG", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive session
    Tui {
        /// Resume from a saved JSON session file
        #[arg(short, long)]
        resume: Option<PathBuf>,
    },

    /// Print workouts and statistics of a JSON session file
    Report {
        /// Session file: a JSON list of workouts
        session: PathBuf,
    },

    /// Write the text export of a JSON session file
    Export {
        /// Session file: a JSON list of workouts
        session: PathBuf,

        /// Output file (defaults to --export-path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            export_path: self.export_path.clone(),
            session_path: self.session_path.clone(),
            default_workout: self.default_workout.clone(),
            log_filter: self.log_level.clone(),
        }
    }
}

fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.config();
    init_tracing(&config);

    match cli.command {
        Some(Commands::Report { session }) => {
            let log = export::load_json(&session)
                .with_context(|| format!("loading {}", session.display()))?;
            print!("{}", export::display_text(&log));
            println!("{:-<40}", "");
            println!("{}", stats::report(&log));
        }

        Some(Commands::Export { session, output }) => {
            let log = export::load_json(&session)
                .with_context(|| format!("loading {}", session.display()))?;
            let path = output.unwrap_or(config.export_path);
            let written = export::export_text(&log, &path)?;
            println!("Data exported successfully to {}", written.display());
        }

        Some(Commands::Tui { resume }) => {
            let log = match resume {
                Some(session) => export::load_json(&session)
                    .with_context(|| format!("loading {}", session.display()))?,
                None => WorkoutLog::new(),
            };
            App::new(log, config).run()?;
        }

        None => {
            App::new(WorkoutLog::new(), config).run()?;
        }
    }

    Ok(())
}
