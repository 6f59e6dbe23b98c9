//! # pagekitd: pagekit API daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository and media store implementations (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer, and no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use pagekit_adapter_http_axum::router;
use pagekit_adapter_http_axum::state::AppState;
use pagekit_adapter_media_fs::FsMediaStore;
use pagekit_adapter_storage_sqlite_sqlx as storage;
use pagekit_app::ports::Ports;
use pagekit_app::services::{AttachmentService, CrudService, SectionService};

use crate::config::Config;

/// The production adapter set: `SQLite` for records, the filesystem for
/// uploaded files.
struct Adapters;

impl Ports for Adapters {
    type Sections = storage::SqliteSectionRepository;
    type ContactMessages = storage::SqliteContactMessageRepository;
    type JobApplications = storage::SqliteJobApplicationRepository;
    type Images = storage::SqliteImageRepository;
    type Forms = storage::SqliteFormRepository;
    type FormResponses = storage::SqliteFormResponseRepository;
    type Quotes = storage::SqliteQuoteRepository;
    type Media = FsMediaStore;
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter `{}`", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Database
    let db = storage::Config::new(config.database_url())
        .build()
        .await
        .context("failed to initialise database")?;
    let pool = db.pool().clone();

    // Media
    std::fs::create_dir_all(&config.media.root).with_context(|| {
        format!(
            "failed to create media directory {}",
            config.media.root.display()
        )
    })?;
    let media = Arc::new(FsMediaStore::new(
        config.media.root.clone(),
        &config.media.url_prefix,
    ));

    // Services
    let state = AppState::<Adapters>::new(
        SectionService::new(storage::SqliteSectionRepository::new(pool.clone())),
        CrudService::new(storage::SqliteContactMessageRepository::new(pool.clone())),
        AttachmentService::new(
            storage::SqliteJobApplicationRepository::new(pool.clone()),
            Arc::clone(&media),
        ),
        AttachmentService::new(storage::SqliteImageRepository::new(pool.clone()), media),
        CrudService::new(storage::SqliteFormRepository::new(pool.clone())),
        CrudService::new(storage::SqliteFormResponseRepository::new(pool.clone())),
        CrudService::new(storage::SqliteQuoteRepository::new(pool)),
    );

    // HTTP
    let app = router::build(state, &config.http());

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        addr = %bind_addr,
        media_root = %config.media.root.display(),
        "pagekitd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("pagekitd stopped");
    Ok(())
}

/// Resolve once SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
