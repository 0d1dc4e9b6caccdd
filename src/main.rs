use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use parsley_bot::application::messaging::{Addressing, MessageRouter};
use parsley_bot::application::services::bootstrap;
use parsley_bot::domain::traits::JokeStore;
use parsley_bot::infrastructure::adapters::ConsoleSession;
use parsley_bot::infrastructure::config::Config;
use parsley_bot::infrastructure::database::SqliteJokeStore;
use parsley_bot::infrastructure::shutdown::shutdown_signal;

#[derive(Parser)]
#[command(name = "parsley-bot")]
#[command(about = "A chat bot that answers with the least-told joke", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot name (overrides config)
    #[arg(short, long)]
    name: Option<String>,

    /// Joke database path (overrides config)
    #[arg(short, long)]
    db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// List jokes, least told first
    Jokes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr, stdout carries chat output
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => match load_config(&cli) {
            Some(config) => run_bot(config),
            None => ExitCode::FAILURE,
        },
        Commands::Version => {
            println!("parsley-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(),
        Commands::Jokes { json } => match load_config(&cli) {
            Some(config) => list_jokes(&config, json),
            None => ExitCode::FAILURE,
        },
    }
}

fn load_config(cli: &Cli) -> Option<Config> {
    let mut config = if Path::new(&cli.config).exists() {
        Config::load(&cli.config).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    } else {
        Config::default()
    };
    config.apply_env();

    if let Some(name) = &cli.name {
        config.bot.name = name.clone();
    }
    if let Some(path) = &cli.db_path {
        config.storage.path = path.clone();
    }

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        return None;
    }
    Some(config)
}

fn open_store(config: &Config) -> Option<SqliteJokeStore> {
    match SqliteJokeStore::open(&config.storage.path) {
        Ok(store) => {
            tracing::info!("Database opened: {}", config.storage.path.display());
            Some(store)
        }
        Err(e) => {
            tracing::error!("{}", e);
            None
        }
    }
}

fn runtime() -> Option<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| tracing::error!("Failed to start async runtime: {}", e))
        .ok()
}

fn run_bot(config: Config) -> ExitCode {
    tracing::info!("Starting parsley-bot: {}", config.bot.name);

    let Some(store) = open_store(&config) else {
        return ExitCode::FAILURE;
    };
    let Some(rt) = runtime() else {
        return ExitCode::FAILURE;
    };

    rt.block_on(async {
        let store = Arc::new(store);
        let session = Arc::new(ConsoleSession::new(config.console.clone(), &config.bot.name));

        let state = match bootstrap(session.as_ref(), store.as_ref(), &config.bot).await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        };

        let addressing = Addressing::new(&config.bot.trigger, &config.bot.name);
        let router = MessageRouter::new(session, store, state, addressing);
        tracing::info!("Listening for `{}` or `{}`", config.bot.trigger, config.bot.name);

        tokio::select! {
            _ = router.run() => {}
            _ = shutdown_signal() => {}
        }
        ExitCode::SUCCESS
    })
}

fn list_jokes(config: &Config, json: bool) -> ExitCode {
    let Some(store) = open_store(config) else {
        return ExitCode::FAILURE;
    };
    let Some(rt) = runtime() else {
        return ExitCode::FAILURE;
    };

    let jokes = match rt.block_on(store.list_jokes()) {
        Ok(jokes) => jokes,
        Err(e) => {
            tracing::error!("Failed to list jokes: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&jokes) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                tracing::error!("Failed to encode jokes: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{:>6}  {:>6}  JOKE", "ID", "USED");
        for joke in &jokes {
            println!("{:>6}  {:>6}  {}", joke.id, joke.used_count, joke.text);
        }
    }
    ExitCode::SUCCESS
}

fn init_config() -> ExitCode {
    match serde_yaml::to_string(&Config::default()) {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to render config: {}", e);
            ExitCode::FAILURE
        }
    }
}
