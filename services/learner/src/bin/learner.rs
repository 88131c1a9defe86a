//! services/learner/src/bin/learner.rs

use clap::{Parser, Subcommand};
use learner_lib::{
    adapters::EnvIdentity,
    config::Config,
    error::AppError,
    term::{learn, profile, progress, wisdom, word, AppState},
};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocab_core::{domain::WordId, AuthContext};

#[derive(Parser)]
#[command(name = "learner")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Learn Quranic vocabulary with flashcards")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// API base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Learn as a guest with the built-in deck
    #[arg(long, global = true)]
    guest: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Overview of your progress (default)
    Dashboard,
    /// Start an interactive learning session
    Learn {
        /// Number of cards in the session (overrides SESSION_SIZE)
        #[arg(short, long)]
        size: Option<usize>,
    },
    /// Show a word with its verse examples
    Word { id: WordId },
    /// Search the vocabulary
    Search {
        query: String,
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Browse the whole vocabulary page by page
    Browse {
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },
    /// Read a wisdom story
    Wisdom {
        /// Story id; a random story when omitted
        id: Option<String>,
        /// List every story instead
        #[arg(long)]
        list: bool,
        /// Print the story in its shareable form
        #[arg(long)]
        share: bool,
    },
    /// Your statistics and learned words
    Progress {
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(short, long, default_value = "50")]
        limit: u32,
    },
    /// Move a learned word back to learning
    Unlearn { id: WordId },
    /// Mark several words as learned at once
    Mark {
        #[arg(required = true)]
        ids: Vec<WordId>,
    },
    /// Show the signed-in user
    Profile,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // --- 1. Load Configuration & Set Up Logging ---
    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(Commands::Learn { size: Some(size) }) = &cli.command {
        config.session_size = (*size).max(1);
    }
    config.guest |= cli.guest;
    let config = Arc::new(config);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Using API at {}", config.api_base_url);

    // --- 2. Initialize Auth State ---
    let identity = Arc::new(EnvIdentity::from_config(&config));
    let auth = Arc::new(AuthContext::init(identity));
    auth.wait_ready().await;
    if config.guest {
        auth.sign_in_as_guest();
    }

    // --- 3. Build the Shared AppState ---
    let state = AppState::connect(config.clone(), auth.clone())?;

    // --- 4. Run the Requested Page ---
    let mut out = std::io::stdout();
    let result = match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => progress::dashboard(&state, &mut out).await,
        Commands::Learn { .. } => {
            let input = BufReader::new(tokio::io::stdin());
            learn::run(&state, input, &mut out).await.map(|_| ())
        }
        Commands::Word { id } => word::show(&state, id, &mut out).await,
        Commands::Search { query, limit } => word::search(&state, &query, limit, &mut out).await,
        Commands::Browse { page, limit } => word::browse(&state, page, limit, &mut out).await,
        Commands::Wisdom { id, list, share } => {
            if list {
                wisdom::list(&state, &mut out).await
            } else {
                wisdom::show(&state, id.as_deref(), share, &mut out).await
            }
        }
        Commands::Progress { page, limit } => {
            progress::progress(&state, page, limit, &mut out).await
        }
        Commands::Unlearn { id } => progress::unlearn(&state, id, &mut out).await,
        Commands::Mark { ids } => progress::mark_learned(&state, &ids, &mut out).await,
        Commands::Profile => profile::show(&state, &mut out).await,
    };

    // --- 5. Tear Down ---
    auth.shutdown().await;
    info!("Goodbye.");
    result
}
