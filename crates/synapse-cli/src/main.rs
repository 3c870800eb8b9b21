//! synapse CLI — take plain-text multiple-choice quizzes in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "synapse", version, about = "Plain-text multiple-choice quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Take {
        /// Question bank text file
        #[arg(long, short)]
        file: PathBuf,

        /// Shuffle question order for this run
        #[arg(long, conflicts_with = "ordered")]
        random: bool,

        /// Keep source question order for this run
        #[arg(long)]
        ordered: bool,

        /// Write the detailed report here when the quiz is finished
        #[arg(long)]
        export: Option<PathBuf>,

        /// Report format: text, json, html (default: from the export file extension)
        #[arg(long)]
        format: Option<String>,

        /// Preferences file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a question bank for errors
    Validate {
        /// Question bank text file
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Show or change display preferences
    Prefs {
        /// Theme name (see `synapse themes`)
        #[arg(long)]
        theme: Option<String>,

        /// Font size used by exported HTML reports (10-30)
        #[arg(long)]
        font_size: Option<u32>,

        /// Shuffle questions by default
        #[arg(long)]
        random_order: Option<bool>,

        /// Preferences file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List built-in themes
    Themes {
        /// Preferences file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter preferences file and demo question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("synapse=warn".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            file,
            random,
            ordered,
            export,
            format,
            config,
        } => {
            let order = match (random, ordered) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::take::execute(file, order, export, format, config).await
        }
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Prefs {
            theme,
            font_size,
            random_order,
            config,
        } => commands::prefs::execute(theme, font_size, random_order, config),
        Commands::Themes { config } => commands::themes::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
