use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tracing::info;

use crate::gallery::socket::gallery_socket;
use crate::server::state::AppState;
use crate::server::{admin, public};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(public::index))
        .route("/health", get(public::health))
        .route("/ws/gallery", get(gallery_socket))
        .route("/api/resources", get(public::list_resources))
        .route("/api/login", post(public::login))
        .route("/api/logout", post(public::logout))
        .route("/admin", get(admin::page))
        .route("/admin/rows", get(admin::rows))
        .route(
            "/api/admin/resources",
            get(admin::list).post(admin::create),
        )
        .route(
            "/api/admin/resources/:id",
            put(admin::edit).delete(admin::delete),
        )
        .route("/api/admin/resources/:id/visibility", post(admin::toggle))
        .route("/api/admin/upload-config", get(admin::upload_config))
        .route(
            "/api/admin/uploads",
            post(admin::record_upload).delete(admin::clear_upload),
        )
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = state.config.server.address.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("starting server on: {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
