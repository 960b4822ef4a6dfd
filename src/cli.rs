//! Command-line interface for the hangman client.

use clap::{Parser, Subcommand};

/// Hangman - play games hosted on a remote hangman service
#[derive(Parser, Debug)]
#[command(name = "hangman")]
#[command(about = "Terminal client for a remote hangman service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Service base URL (overrides config file and HANGMAN_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all games on the server
    List,

    /// Start a new game
    New,

    /// Guess one letter in an existing game
    Guess {
        /// Game to guess in
        game_id: u64,

        /// Letter to guess (sent to the server unchanged)
        letter: String,
    },

    /// Play interactively, reading letters from stdin
    Play {
        /// Resume this game instead of starting a new one
        game_id: Option<u64>,
    },
}
