//! Async HTTP client for the hangman game service.
//!
//! Every operation is a plain `async fn`: the request runs on the caller's
//! runtime and its single result, value or error, resolves on the task that
//! awaits it. The client holds no game state between calls.

use reqwest::{Method, Request, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, DecodeError, DomainError};
use crate::game::{Game, decode_value};

/// Client for listing, starting and playing games.
#[derive(Debug, Clone)]
pub struct GameClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl GameClient {
    /// Creates a client with its own connection pool.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            debug!(?timeout, "Setting transport timeout");
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        info!("Game client ready");
        Ok(Self { config, client })
    }

    /// Creates a client around an existing HTTP client.
    pub fn with_http_client(config: ClientConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Lists all games known to the server.
    ///
    /// Elements that fail to decode are dropped, so the result may be
    /// shorter than the server's array. Order is preserved.
    #[instrument(skip(self), fields(base_url = %self.config.base_url()))]
    pub async fn list_games(&self) -> Result<Vec<Game>, ClientError> {
        debug!("Listing games");
        let request = self.request(Method::GET, "games")?;
        let (_, body) = self.execute(request).await?;

        let items = body.as_array().ok_or_else(|| {
            DecodeError::new("Unexpected JSON: expected an array of games")
        })?;

        let games: Vec<Game> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match decode_value(item) {
                Ok(game) => Some(game),
                Err(e) => {
                    warn!(index, error = %e, "Dropping malformed game from list");
                    None
                }
            })
            .collect();

        info!(received = items.len(), decoded = games.len(), "Listed games");
        Ok(games)
    }

    /// Starts a new game.
    #[instrument(skip(self), fields(base_url = %self.config.base_url()))]
    pub async fn start_new_game(&self) -> Result<Game, ClientError> {
        debug!("Starting new game");
        let request = self.request(Method::POST, "games/new")?;
        let (_, body) = self.execute(request).await?;

        if !body.is_object() {
            return Err(DecodeError::new("Unexpected JSON: expected a game object").into());
        }
        let game = decode_value(&body)?;

        info!(game_id = *game.game_id(), "Started game");
        Ok(game)
    }

    /// Submits `letter` for `game` and returns the server's new snapshot.
    ///
    /// The letter is sent as-is. A 400 response becomes
    /// [`ClientError::Domain`] carrying the server's `error` text.
    #[instrument(skip(self, game), fields(game_id = *game.game_id(), letter = %letter))]
    pub async fn guess_letter(&self, game: &Game, letter: &str) -> Result<Game, ClientError> {
        debug!("Guessing letter");
        let path = format!("games/{}/guess", game.game_id());
        let mut request = self.request(Method::POST, &path)?;
        request
            .url_mut()
            .query_pairs_mut()
            .append_pair("letter", letter);

        let (status, body) = self.execute(request).await?;

        let object = body.as_object().ok_or_else(|| {
            DecodeError::new("Unexpected JSON: expected a game object")
        })?;

        if status == StatusCode::BAD_REQUEST {
            let message = object
                .get("error")
                .and_then(|e| e.as_str())
                .map(str::to_string);
            let rejection = DomainError::new(message, status.as_u16());
            warn!(reason = %rejection.message(), "Guess rejected");
            return Err(rejection.into());
        }

        let updated = decode_value(&body)?;
        info!(
            state = %updated.state(),
            guesses_remaining = *updated.guesses_remaining(),
            "Guess applied"
        );
        Ok(updated)
    }

    /// Builds a body-less request for `path` under the base URL.
    fn request(&self, method: Method, path: &str) -> Result<Request, ClientError> {
        let url = format!("{}/{}", self.config.base_url(), path);
        Ok(self.client.request(method, url).build()?)
    }

    /// Sends `request` and parses the body as JSON, whatever the status.
    async fn execute(
        &self,
        request: Request,
    ) -> Result<(StatusCode, serde_json::Value), ClientError> {
        debug!(method = %request.method(), url = %request.url(), "Sending request");

        let response = self.client.execute(request).await.map_err(|e| {
            error!(error = ?e, "Request failed");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read response body");
            ClientError::Transport(e)
        })?;
        debug!(status = %status, len = text.len(), "Got response");

        let body = serde_json::from_str(&text).map_err(|e| {
            DecodeError::new(format!("Invalid JSON: {}", e))
        })?;
        Ok((status, body))
    }
}
