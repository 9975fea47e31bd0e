//! Athlete Planner Server
//!
//! REST service for a single administrator managing athlete records and
//! their workout plans. Records live in one JSON document on disk that is
//! rewritten in full on every mutation; sessions are opaque bearer tokens
//! held in memory for the lifetime of the process.
//!
//! Known hazard: mutations run load -> modify -> save with no lock around
//! the cycle, so two concurrent writers can lose one of the updates.

mod error;
mod extractors;
mod handlers;
mod router;
mod services;
mod settings;
mod storage;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use settings::{Config, StorageBackend};
use services::{AthleteService, AuthService};
use storage::{DatasetStore, JsonFileStore, MemoryStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub athletes: Arc<AthleteService>,
    pub public_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        auth_service: AuthService,
        store: Arc<dyn DatasetStore>,
        public_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            auth_service: Arc::new(auth_service),
            athletes: Arc::new(AthleteService::new(store)),
            public_dir: Arc::new(public_dir.into()),
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    if let Err(e) = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
    {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Starting Athlete Planner Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, storage={:?}, data_file={}, public_dir={}",
        config.bind_address(),
        config.storage,
        config.data_file.display(),
        config.public_dir.display()
    );

    let store: Arc<dyn DatasetStore> = match config.storage {
        StorageBackend::File => Arc::new(JsonFileStore::new(&config.data_file, config.load_policy)),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };

    // Load once up front so a corrupt file stops startup under the strict policy
    let dataset = store
        .load()
        .await
        .context("Failed to load athlete dataset")?;
    info!(
        "Dataset ready: {} athletes, next id {}",
        dataset.athletes.len(),
        dataset.next_id
    );

    let auth_service = AuthService::new(config.admin_email.clone(), config.admin_password.clone());
    let state = AppState::new(auth_service, store, config.public_dir.clone());

    let app = router::build(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", addr))?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
