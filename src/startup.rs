//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::application::services::{
    AuthService, AuthServiceImpl, FeaturePropertyService, FeaturePropertyServiceImpl,
    PetService, PetServiceImpl, UserService, UserServiceImpl,
};
use crate::config::Settings;
use crate::domain::services::Argon2PasswordEncoder;
use crate::domain::Repositories;
use crate::infrastructure::{database, repositories};
use crate::presentation::http::{create_router, handlers::health};
use crate::presentation::middleware::cors;
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Present when backed by PostgreSQL; used by the readiness probe
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub pet_service: Arc<dyn PetService>,
    pub feature_property_service: Arc<dyn FeaturePropertyService>,
}

impl AppState {
    /// Wire every service on top of the given repositories.
    pub fn new(settings: Settings, repos: Repositories, db: Option<PgPool>) -> Self {
        let id_generator = Arc::new(SnowflakeGenerator::new(settings.snowflake.machine_id));
        let password_encoder = Arc::new(Argon2PasswordEncoder);

        let auth_service = Arc::new(AuthServiceImpl::new(
            repos.users.clone(),
            password_encoder.clone(),
            settings.jwt.clone(),
        ));
        let user_service = Arc::new(UserServiceImpl::new(
            repos.clone(),
            password_encoder,
            id_generator.clone(),
            settings.uploads.default_pet_image_name.clone(),
        ));
        let pet_service = Arc::new(PetServiceImpl::new(repos.clone(), id_generator));
        let feature_property_service = Arc::new(FeaturePropertyServiceImpl::new(
            repos.feature_properties,
            repos.social_networks,
        ));

        Self {
            db,
            settings: Arc::new(settings),
            auth_service,
            user_service,
            pet_service,
            feature_property_service,
        }
    }
}

/// Full router with tracing and CORS layers
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
        }

        health::init_server_start();

        let addr: SocketAddr = settings.server_addr().parse()?;
        let repos = repositories::postgres_repositories(db.clone());
        let state = AppState::new(settings, repos, Some(db));
        let router = build_router(state);

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
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
