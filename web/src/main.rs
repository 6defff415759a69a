//! PokéDeck server – paginates the PokéAPI catalog into a swipe deck.
//!
//! This binary:
//! 1. Reads configuration from `pokedeck.conf` (or built-in defaults)
//! 2. Starts the page loader that fetches and enriches catalog pages
//! 3. Runs an axum HTTP server with the swipe page and its JSON API

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};
use tracing::info;

use pokedeck_client::{Pager, PokeApiClient};
use pokedeck_common::config;
use pokedeck_common::gesture::GestureThresholds;
use pokedeck_web::server::{self, AppState};
use pokedeck_web::session::{self, LoadRequest, Session};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pokedeck_web=info,pokedeck_client=info,tower_http=info".into()
            }),
        )
        .init();

    // ── load config ──────────────────────────────────────────────────
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = config::load_or_default(config_path.as_deref()).context("Config load failed")?;

    info!(
        "PokéDeck starting (api={}, page_size={}, listen={})",
        config.api_base_url, config.page_size, config.listen_addr
    );

    // ── catalog client + loader ──────────────────────────────────────
    let client = PokeApiClient::new(&config).context("Cannot create HTTP client")?;
    let pager = Pager::from_config(Arc::new(client), &config);

    let (load_tx, load_rx) = mpsc::channel::<LoadRequest>(4);
    let session = Arc::new(Mutex::new(Session::new(
        load_tx.clone(),
        GestureThresholds::default(),
    )));
    let loader = session::spawn_loader(session.clone(), pager, load_rx);

    load_tx
        .send(LoadRequest::Initial)
        .await
        .context("Loader exited before the first page")?;

    // ── ctrl-c ───────────────────────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_flag.store(true, Ordering::Relaxed);
        info!("Shutdown signal received");
    })
    .context("Cannot set Ctrl-C handler")?;

    // ── HTTP server ──────────────────────────────────────────────────
    let state = AppState::new(session, load_tx);
    server::run(state, &config.listen_addr, shutdown)
        .await
        .context("HTTP server error")?;

    // In-flight page loads are discarded.
    loader.abort();
    info!("PokéDeck stopped");

    Ok(())
}
