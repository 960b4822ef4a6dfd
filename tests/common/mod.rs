//! In-process stand-ins for the hangman service.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Stub server failed");
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}", addr)
}

/// Builds a game object in wire shape.
pub fn game_json(id: u64, word: &str, letters: &str, remaining: u32, state: u64) -> Value {
    json!({
        "game_id": id,
        "display_word": word,
        "letters_used": letters,
        "guesses_remaining": remaining,
        "state": state,
    })
}

/// Status and raw body returned for one route.
pub type Reply = (StatusCode, String);

/// Fixed replies per route, plus a log of received guesses.
#[derive(Debug, Clone)]
pub struct Canned {
    pub list: Reply,
    pub new_game: Reply,
    pub guess: Reply,
    pub guesses: Arc<Mutex<Vec<(u64, Option<String>)>>>,
}

impl Default for Canned {
    fn default() -> Self {
        let ok = (StatusCode::OK, game_json(1, "_____", "", 10, 0).to_string());
        Self {
            list: (StatusCode::OK, "[]".to_string()),
            new_game: ok.clone(),
            guess: ok,
            guesses: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Canned {
    pub fn router(self) -> Router {
        Router::new()
            .route("/games", get(canned_list))
            .route("/games/new", post(canned_new))
            .route("/games/{id}/guess", post(canned_guess))
            .with_state(Arc::new(self))
    }
}

async fn canned_list(State(stub): State<Arc<Canned>>) -> Reply {
    stub.list.clone()
}

async fn canned_new(State(stub): State<Arc<Canned>>) -> Reply {
    stub.new_game.clone()
}

async fn canned_guess(
    State(stub): State<Arc<Canned>>,
    Path(id): Path<u64>,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    stub.guesses
        .lock()
        .expect("Guess log poisoned")
        .push((id, query.get("letter").cloned()));
    stub.guess.clone()
}

/// Server-side hangman rules, enough to drive a full game.
#[derive(Debug, Default)]
pub struct Rules {
    word: String,
    next_id: u64,
    games: BTreeMap<u64, RuleGame>,
}

#[derive(Debug)]
struct RuleGame {
    word: String,
    used: Vec<String>,
    remaining: u32,
    state: u64,
}

impl RuleGame {
    fn to_json(&self, id: u64) -> Value {
        let display: String = self
            .word
            .chars()
            .map(|c| {
                if self.used.iter().any(|u| u == &c.to_string()) {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        game_json(id, &display, &self.used.join(","), self.remaining, self.state)
    }
}

/// Router applying [`Rules`]; every new game hides `word` with 10 guesses.
pub fn rules_router(word: &str) -> Router {
    let rules = Rules {
        word: word.to_string(),
        ..Rules::default()
    };
    Router::new()
        .route("/games", get(rules_list))
        .route("/games/new", post(rules_new))
        .route("/games/{id}/guess", post(rules_guess))
        .with_state(Arc::new(Mutex::new(rules)))
}

async fn rules_new(State(rules): State<Arc<Mutex<Rules>>>) -> Json<Value> {
    let mut rules = rules.lock().expect("Rules poisoned");
    rules.next_id += 1;
    let id = rules.next_id;
    let game = RuleGame {
        word: rules.word.clone(),
        used: Vec::new(),
        remaining: 10,
        state: 0,
    };
    let body = game.to_json(id);
    rules.games.insert(id, game);
    Json(body)
}

async fn rules_list(State(rules): State<Arc<Mutex<Rules>>>) -> Json<Value> {
    let rules = rules.lock().expect("Rules poisoned");
    let games: Vec<Value> = rules.games.iter().map(|(id, g)| g.to_json(*id)).collect();
    Json(Value::Array(games))
}

async fn rules_guess(
    State(rules): State<Arc<Mutex<Rules>>>,
    Path(id): Path<u64>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let rejected = |msg: &str| (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })));

    let mut rules = rules.lock().expect("Rules poisoned");
    let Some(game) = rules.games.get_mut(&id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "no such game" })));
    };
    if game.state != 0 {
        return rejected("game is over");
    }
    let letter = query.get("letter").cloned().unwrap_or_default();
    if letter.chars().count() != 1 {
        return rejected("invalid letter");
    }
    if game.used.contains(&letter) {
        return rejected("letter already guessed");
    }

    game.used.push(letter.clone());
    if game.word.contains(letter.as_str()) {
        let solved = game
            .word
            .chars()
            .all(|c| game.used.iter().any(|u| u == &c.to_string()));
        if solved {
            game.state = 1;
        }
    } else {
        game.remaining -= 1;
        if game.remaining == 0 {
            game.state = 2;
        }
    }
    (StatusCode::OK, Json(game.to_json(id)))
}
