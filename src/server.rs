//! HTTP front-end over [`AppHandler`]
//!
//! Every lookup answers `200`; an absent result is the JSON `null`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::catalog::AppSummary;
use crate::error::Result;
use crate::handler::{AppHandler, HandlerStats};
use crate::steam::{AppInfo, PlayerStats};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Build the API router
pub fn router(handler: Arc<AppHandler>) -> Router {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/apps/{appid}", get(app_info))
        .route("/api/apps/{appid}/users/{steamid}", get(user_info))
        .route("/api/resolve/{name}", get(resolve))
        .route("/api/stats", get(stats))
        .with_state(handler)
}

/// Serve until Ctrl+C
pub async fn serve(handler: Arc<AppHandler>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(handler))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

async fn search(
    State(handler): State<Arc<AppHandler>>,
    Query(params): Query<SearchParams>,
) -> Json<Option<Vec<AppSummary>>> {
    let Some(text) = params.q else {
        return Json(None);
    };
    Json(handler.search(&text).await)
}

async fn app_info(
    State(handler): State<Arc<AppHandler>>,
    Path(appid): Path<String>,
) -> Json<Option<AppInfo>> {
    Json(handler.get_app_info(&appid).await)
}

async fn user_info(
    State(handler): State<Arc<AppHandler>>,
    Path((appid, steamid)): Path<(String, String)>,
) -> Json<Option<PlayerStats>> {
    Json(handler.get_user_info(&appid, &steamid).await)
}

async fn resolve(
    State(handler): State<Arc<AppHandler>>,
    Path(name): Path<String>,
) -> Json<Option<String>> {
    // Steam ids exceed the integer range JSON clients can hold exactly
    Json(handler.resolve_steam_id(&name).await.map(|id| id.to_string()))
}

async fn stats(State(handler): State<Arc<AppHandler>>) -> Json<HandlerStats> {
    Json(handler.cache_stats())
}
