//! Hangman client library - typed access to a remote hangman service
//!
//! The server owns every game; this crate only reflects what it reports.
//!
//! # Architecture
//!
//! - **Game**: immutable snapshot of one game plus its JSON decoder
//! - **Client**: async list / start / guess operations over HTTP+JSON
//! - **Config**: base URL, guess maximum and transport timeout
//! - **Errors**: transport, decode and domain failures kept distinct
//!
//! # Example
//!
//! ```no_run
//! use hangman_client::{ClientConfig, GameClient};
//!
//! # async fn example() -> Result<(), hangman_client::ClientError> {
//! let client = GameClient::new(ClientConfig::new("http://localhost:5000"))?;
//! let game = client.start_new_game().await?;
//! let game = client.guess_letter(&game, "e").await?;
//! println!("{} ({})", game.display_word(), game.state());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod game;

// Crate-level exports - Client
pub use client::GameClient;

// Crate-level exports - Configuration
pub use config::{
    ClientConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_MAX_GUESSES, ENV_BASE_URL,
    ENV_MAX_GUESSES, ENV_TIMEOUT_SECS,
};

// Crate-level exports - Errors
pub use error::{
    ClientError, ClientErrorKind, DecodeError, DomainError, INCOMPLETE_PAYLOAD,
    UNKNOWN_DOMAIN_ERROR,
};

// Crate-level exports - Game snapshots
pub use game::{Game, GameState, decode_str, decode_value};
