//! Study Timer CLI
//!
//! Alternates focused study sessions with short breaks:
//! - 25 minutes of study, 5 minutes of break by default
//! - A completion notice offers to start the next session
//! - A small task list with a done counter

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;
use tokio::sync::mpsc;

use studytimer::cli::{Cli, Commands, Display, InteractiveSession, RunArgs};
use studytimer::engine::TimerEngine;
use studytimer::sound::{try_create_player, SoundPlayer, SoundSource};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    // A pending stdin read runs on a blocking thread that cannot be
    // cancelled, so leave without waiting for runtime shutdown.
    let _ = std::io::stdout().flush();
    std::process::exit(0);
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            run_session(&cli.run).await?;
        }
    }

    Ok(())
}

/// Runs the interactive session on stdin until it ends.
async fn run_session(args: &RunArgs) -> Result<()> {
    let config = args.to_config();
    config.validate().context("Invalid timer configuration")?;

    let sound = match &args.sound_file {
        Some(path) => SoundSource::file_validated(path).context("Invalid sound file")?,
        None => SoundSource::chime(),
    };
    let player: Option<Arc<dyn SoundPlayer>> = if args.no_sound {
        None
    } else {
        try_create_player().map(|player| Arc::new(player) as Arc<dyn SoundPlayer>)
    };
    if player.is_some() {
        tracing::info!("Completion sound: {}", sound.name());
    }

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (handle, engine_task) = TimerEngine::spawn(config, event_tx);

    let snapshot = handle
        .snapshot()
        .await
        .context("Timer engine did not start")?;
    Display::show_welcome(&snapshot);

    let mut session = InteractiveSession::new(handle.clone(), event_rx, player, sound);
    let outcome = session.run(BufReader::new(tokio::io::stdin())).await;

    // The engine may already be gone if it failed
    let _ = handle.shutdown();
    engine_task.await.context("Timer engine task failed")??;
    drop(session);

    outcome
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
