use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod auth;
mod jwt;
mod models;
mod repositories;
mod routes;
mod validation;

use crate::jwt::JwtService;
use crate::repositories::{ItemRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub items: ItemRepository,
    pub jwt: JwtService,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting what-to-wear service");

    // Signing secret and expiry horizon are read once at startup and
    // immutable afterwards.
    let jwt_config = jwt::JwtConfig::from_env()?;
    let jwt_service = JwtService::new(&jwt_config);

    let app_state = AppState {
        users: UserRepository::new(),
        items: ItemRepository::new(),
        jwt: jwt_service,
    };

    let app = routes::create_router(app_state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    info!("Service listening on {}:{}", host, port);

    axum::serve(listener, app).await?;

    Ok(())
}
