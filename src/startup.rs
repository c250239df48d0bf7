//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{AccountsService, AccountsServiceImpl};
use crate::config::Settings;
use crate::domain::RandomAccountNumberGenerator;
use crate::infrastructure::database::{self, InMemoryUnitOfWork, PgUnitOfWork};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountsService>,
    /// Present when running against PostgreSQL
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// State backed by the in-memory store.
    pub fn in_memory(settings: Settings, uow: InMemoryUnitOfWork) -> Self {
        let accounts = AccountsServiceImpl::new(
            Arc::new(uow),
            Arc::new(RandomAccountNumberGenerator::new()),
            settings.accounts.clone(),
        );
        Self {
            accounts: Arc::new(accounts),
            db: None,
            settings: Arc::new(settings),
        }
    }

    /// State backed by a PostgreSQL pool.
    pub fn postgres(settings: Settings, pool: PgPool) -> Self {
        let accounts = AccountsServiceImpl::new(
            Arc::new(PgUnitOfWork::from_pool(pool.clone())),
            Arc::new(RandomAccountNumberGenerator::new()),
            settings.accounts.clone(),
        );
        Self {
            accounts: Arc::new(accounts),
            db: Some(pool),
            settings: Arc::new(settings),
        }
    }
}

/// Router with every middleware layer applied.
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let state = match settings.database.url.clone() {
            Some(url) => {
                let pool = database::create_pool(&settings.database, &url)
                    .await
                    .context("failed to connect to PostgreSQL")?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&pool)
                        .await
                        .context("failed to run migrations")?;
                    tracing::info!("Database migrations applied");
                }

                AppState::postgres(settings.clone(), pool)
            }
            None => {
                tracing::warn!("No database URL configured, using in-memory storage");
                AppState::in_memory(settings.clone(), InMemoryUnitOfWork::new())
            }
        };

        let router = build_router(state);

        // Bind to address
        let addr = settings
            .server
            .socket_addr()
            .with_context(|| format!("invalid server address {}", settings.server_addr()))?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
