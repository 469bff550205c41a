//! # board-comment binary
//!
//! The entry point that assembles the service from configuration and
//! compile-time features.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{build_router, AppState};
use configs::{DatabaseBackend, LogFormat, LoggingSettings, Settings};
use domains::{BoardRepository, CommentRepository};
use storage_adapters::MemoryDatabase;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type Repositories = (Arc<dyn BoardRepository>, Arc<dyn CommentRepository>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load configuration")?;
    init_tracing(&settings.logging)?;
    info!(
        address = %settings.server.address(),
        backend = ?settings.database.backend,
        "configuration loaded"
    );

    // 1. Stores
    let (boards, comments) = build_repositories(&settings).await?;

    // 2. Services + routes
    let app = build_router(AppState::from_repositories(boards, comments));

    // 3. Serve
    let addr = settings.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "board-comment started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn build_repositories(settings: &Settings) -> anyhow::Result<Repositories> {
    match settings.database.backend {
        DatabaseBackend::Memory => {
            info!("database backend: memory");
            let db = MemoryDatabase::new();
            Ok((
                Arc::new(db.board_repository()),
                Arc::new(db.comment_repository()),
            ))
        }
        #[cfg(feature = "db-postgres")]
        DatabaseBackend::Postgres => {
            use secrecy::ExposeSecret;
            use storage_adapters::{postgres, PgBoardRepository, PgCommentRepository};

            info!("database backend: postgres");
            let url = settings
                .database
                .url
                .as_ref()
                .context("database.url is required for the postgres backend")?;
            let pool = postgres::connect(url.expose_secret(), settings.database.max_connections)
                .await
                .context("failed to connect to PostgreSQL")?;
            Ok((
                Arc::new(PgBoardRepository::new(pool.clone())),
                Arc::new(PgCommentRepository::new(pool)),
            ))
        }
        #[cfg(not(feature = "db-postgres"))]
        DatabaseBackend::Postgres => anyhow::bail!("built without the db-postgres feature"),
    }
}

fn init_tracing(logging: &LoggingSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .context("invalid logging.filter")?;
    let json = logging.format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .try_init()
        .context("failed to install tracing subscriber")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
