//! Hangman - terminal client
//!
//! Lists, starts and plays games hosted on a remote hangman service.

#![warn(missing_docs)]

mod cli;

use std::io::Write;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use hangman_client::{ClientConfig, ClientError, ClientErrorKind, Game, GameClient};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let max_guesses = *config.max_guesses();
    let client = GameClient::new(config).map_err(presented)?;

    match cli.command {
        Command::List => run_list(&client, max_guesses).await,
        Command::New => run_new(&client, max_guesses).await,
        Command::Guess { game_id, letter } => {
            run_guess(&client, game_id, &letter, max_guesses).await
        }
        Command::Play { game_id } => run_play(&client, game_id, max_guesses).await,
    }
}

/// Defaults, then config file, then environment, then `--base-url`.
#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    let mut config = config.with_env_overrides()?;

    if let Some(url) = &cli.base_url {
        info!(base_url = %url, "Overriding base URL from command line");
        config = config.with_base_url(url);
    }

    debug!(?config, "Configuration resolved");
    Ok(config)
}

/// Converts a client error into its player-facing message.
fn presented(err: ClientError) -> anyhow::Error {
    debug!(kind = %err.kind(), error = %err, "Operation failed");
    anyhow::anyhow!(err.message())
}

/// One summary line per snapshot.
fn render(game: &Game, max_guesses: u32) -> String {
    format!(
        "#{:<5} {:<20} [{}]  guesses {}/{}  {}",
        game.game_id(),
        game.display_word(),
        game.used_letters().join(","),
        game.guesses_remaining(),
        max_guesses,
        game.state(),
    )
}

async fn run_list(client: &GameClient, max_guesses: u32) -> Result<()> {
    let games = client.list_games().await.map_err(presented)?;
    if games.is_empty() {
        println!("No games yet. Start one with `hangman new`.");
    }
    for game in &games {
        println!("{}", render(game, max_guesses));
    }
    Ok(())
}

async fn run_new(client: &GameClient, max_guesses: u32) -> Result<()> {
    let game = client.start_new_game().await.map_err(presented)?;
    println!("{}", render(&game, max_guesses));
    Ok(())
}

/// Finds the latest known snapshot for `game_id`.
#[instrument(skip(client))]
async fn find_game(client: &GameClient, game_id: u64) -> Result<Game> {
    let games = client.list_games().await.map_err(presented)?;
    match games.into_iter().find(|g| *g.game_id() == game_id) {
        Some(game) => Ok(game),
        None => bail!("no game with id {}", game_id),
    }
}

async fn run_guess(
    client: &GameClient,
    game_id: u64,
    letter: &str,
    max_guesses: u32,
) -> Result<()> {
    let game = find_game(client, game_id).await?;
    if game.is_terminal() {
        bail!("game {} is already over", game_id);
    }
    let game = client.guess_letter(&game, letter).await.map_err(presented)?;
    println!("{}", render(&game, max_guesses));
    Ok(())
}

async fn run_play(client: &GameClient, game_id: Option<u64>, max_guesses: u32) -> Result<()> {
    let mut game = match game_id {
        Some(id) => find_game(client, id).await?,
        None => client.start_new_game().await.map_err(presented)?,
    };
    println!("{}", render(&game, max_guesses));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !game.is_terminal() {
        print!("letter> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let letter = line.trim();
        if letter.is_empty() {
            continue;
        }

        match client.guess_letter(&game, letter).await {
            Ok(updated) => game = updated,
            // Rejections leave the previous snapshot in place.
            Err(e) if e.kind() == ClientErrorKind::Domain => println!("{}", e.message()),
            Err(e) => return Err(presented(e)),
        }
        println!("{}", render(&game, max_guesses));
    }

    if game.is_terminal() {
        println!("Game over: {}", game.state());
    }
    Ok(())
}
