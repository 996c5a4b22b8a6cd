//! HTTP server setup

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handlers::{
    self, AppState,
};

/// Run the HTTP server until the listener fails
pub async fn run_server(addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/users", post(handlers::create_user))
        .route("/api/v1/users/:id", get(handlers::get_user))
        .route("/api/v1/users/:id/tweets", get(handlers::get_user_tweets))
        .route("/api/v1/users/:id/timeline", get(handlers::get_timeline))
        .route("/api/v1/users/:id/followers", get(handlers::get_followers))
        .route("/api/v1/users/:id/following", get(handlers::get_following))
        .route("/api/v1/tweets", post(handlers::create_tweet))
        .route(
            "/api/v1/tweets/:id",
            get(handlers::get_tweet).delete(handlers::delete_tweet),
        )
        .route("/api/v1/follow", post(handlers::follow_user))
        .route("/api/v1/follow/:followee_id", delete(handlers::unfollow_user))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
