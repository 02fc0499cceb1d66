use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use retrace::replay::random_source;
use retrace::web::{run_server, WebAppState};
use retrace::{util, Config, GuessingGame, ReplayEngine, TerminalSession};

#[derive(Parser)]
#[command(name = "retrace", version)]
#[command(about = "Play a linear script in the terminal or over stateless HTTP", long_about = None)]
struct Cli {
    /// Config file (default: ~/.retrace/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (default: ~/.retrace)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the guessing game on this terminal
    Play {
        #[command(flatten)]
        game: GameArgs,
    },

    /// Serve the guessing game over HTTP
    Serve {
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        #[command(flatten)]
        game: GameArgs,
    },
}

#[derive(Args)]
struct GameArgs {
    /// Fixed seed for the secret number
    #[arg(long)]
    seed: Option<u64>,

    /// Lowest possible secret
    #[arg(long)]
    low: Option<i64>,

    /// Highest possible secret
    #[arg(long)]
    high: Option<i64>,
}

impl GameArgs {
    fn apply(&self, mut config: Config) -> Result<Config> {
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        let low = self.low.unwrap_or(config.game.low);
        let high = self.high.unwrap_or(config.game.high);
        config = config.with_range(low, high);
        config.validate()?;
        Ok(config)
    }
}

fn init_file_logging() -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::prepare_log_file()?)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retrace=info".into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retrace=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    match &cli.command {
        // Stdout belongs to the game, so logs go to ~/.retrace/logs/retrace.log
        Commands::Play { .. } => init_file_logging()?,
        Commands::Serve { .. } => init_stderr_logging(),
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Play { game } => {
            let config = game.apply(config)?;
            let routine = GuessingGame::new(config.game.low, config.game.high);
            let random = random_source(config.random_seed);

            tokio::task::spawn_blocking(move || TerminalSession::stdio(random).run(&routine))
                .await??;
        }
        Commands::Serve { host, port, game } => {
            let mut config = game.apply(config)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let engine = ReplayEngine::new(
                Arc::new(GuessingGame::new(config.game.low, config.game.high)),
                random_source(config.random_seed),
            )
            .with_config(config.engine);

            run_server(WebAppState::new(engine), config.server).await?;
        }
    }

    Ok(())
}
