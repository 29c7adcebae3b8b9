//! Command definitions for the study timer.
//!
//! Uses clap derive both for the process arguments and, in multicall mode,
//! for each line typed into the interactive session.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::{TimerConfig, MAX_AUTO_START_DELAY_MS};

// ============================================================================
// CLI Structure
// ============================================================================

/// Study/break interval timer with a lightweight task list
#[derive(Parser, Debug)]
#[command(
    name = "studytimer",
    version,
    about = "Study/break interval timer with a lightweight task list",
    long_about = "Runs an interactive study session in the terminal.\n\
                  Type `help` once it is running to list the commands.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Timer settings for the interactive session
    #[command(flatten)]
    pub run: RunArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Arguments
// ============================================================================

/// Arguments for the interactive session
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Study duration in minutes (1-120)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=120)
    )]
    pub study: u32,

    /// Break duration in minutes (1-60)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub break_time: u32,

    /// Delay before an accepted notice starts the next session
    #[arg(
        long,
        value_name = "MS",
        default_value = "500",
        value_parser = clap::value_parser!(u64).range(0..=MAX_AUTO_START_DELAY_MS)
    )]
    pub auto_start_delay_ms: u64,

    /// Disable the completion sound
    #[arg(long)]
    pub no_sound: bool,

    /// Play this audio file instead of the built-in chime
    #[arg(long, value_name = "PATH", conflicts_with = "no_sound")]
    pub sound_file: Option<PathBuf>,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            study: 25,
            break_time: 5,
            auto_start_delay_ms: 500,
            no_sound: false,
            sound_file: None,
        }
    }
}

impl RunArgs {
    /// Builds the timer configuration from these arguments.
    pub fn to_config(&self) -> TimerConfig {
        TimerConfig::default()
            .with_study_minutes(self.study)
            .with_break_minutes(self.break_time)
            .with_auto_start_delay_ms(self.auto_start_delay_ms)
    }
}

// ============================================================================
// Interactive Commands
// ============================================================================

/// One line of interactive input.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct InteractiveLine {
    #[command(subcommand)]
    pub command: InteractiveCommand,
}

/// Commands accepted inside the running session
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    /// Start or resume the countdown
    Start,

    /// Pause the countdown
    Pause,

    /// Stop and refill the countdown for the current mode
    Reset,

    /// Switch to study mode (not while running)
    Study,

    /// Switch to break mode (not while running)
    Break,

    /// Add a task
    Add {
        /// Task text
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Mark a task done, or not done again
    Done {
        /// Position in the task list (1-based)
        position: usize,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Position in the task list (1-based)
        position: usize,
    },

    /// Show the task list and counters
    #[command(alias = "ls")]
    List,

    /// Show the timer
    Status,

    /// Print the full state as JSON
    Json,

    /// Start the suggested next session
    #[command(visible_aliases = ["yes", "y"])]
    Accept,

    /// Switch to the suggested mode without starting it
    #[command(visible_aliases = ["later", "no", "n"])]
    Defer,

    /// Close the completion notice (same as defer)
    #[command(alias = "esc")]
    Cancel,

    /// Leave the session
    #[command(visible_aliases = ["exit", "q"])]
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<InteractiveCommand>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    InteractiveLine::try_parse_from(words).map(|line| Some(line.command))
}

/// Returns the line after its first word, trimmed, with inner spacing intact.
pub fn command_remainder(line: &str) -> &str {
    let line = line.trim_start();
    match line.find(char::is_whitespace) {
        Some(end) => line[end..].trim(),
        None => "",
    }
}

// ============================================================================
// Tests
// ============================================================================
