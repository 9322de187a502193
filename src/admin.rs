//! Admin pages, gated by a shared key sent as `Authorization: Bearer <key>`.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::content::SnippetCoverage;
use crate::error::PortalError;
use crate::render;
use crate::server::AppState;

/// Constant-time string comparison, so the key cannot be guessed byte by byte.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check the bearer token against the configured key.
///
/// With no key configured the admin surface is closed to everyone.
pub fn authorize(headers: &HeaderMap, admin_key: Option<&str>) -> Result<(), PortalError> {
    let Some(expected) = admin_key else {
        warn!("Admin request rejected: ADMIN_API_KEY is not configured");
        return Err(PortalError::Unauthorized);
    };

    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim);

    match provided {
        Some(token) if constant_time_compare(token, expected) => Ok(()),
        _ => Err(PortalError::Unauthorized),
    }
}

pub async fn stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, PortalError> {
    authorize(&headers, state.admin_key.as_deref())?;
    Ok(Html(render::stats_page(&state.feedback.stats())))
}

pub async fn coverage(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, PortalError> {
    authorize(&headers, state.admin_key.as_deref())?;
    let snapshot = state.resolver.content().snapshot();
    Ok(Html(render::coverage_page(&SnippetCoverage::from_snapshot(
        &snapshot,
    ))))
}

pub async fn feedbacks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, PortalError> {
    authorize(&headers, state.admin_key.as_deref())?;
    Ok(Html(render::feedbacks_page(&state.feedback.list())))
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub documents: usize,
}

/// Re-read the content directory and swap it in. On failure the current
/// content stays in place.
pub async fn reload(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, PortalError> {
    authorize(&headers, state.admin_key.as_deref())?;

    let store = Arc::clone(state.resolver.content());
    let loader = state.loader.clone();
    let documents = tokio::task::spawn_blocking(move || store.reload(&loader))
        .await
        .map_err(|e| PortalError::Internal(format!("Reload task failed: {}", e)))??;

    info!("Admin reload finished with {} documents", documents);
    Ok((StatusCode::OK, Json(ReloadResponse { documents })))
}
