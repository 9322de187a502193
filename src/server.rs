//! HTTP server: shared state, routes and the fallback resolution pipeline.

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::admin;
use crate::careers::{CareerListings, GreenhouseClient};
use crate::config::Config;
use crate::content::{ContentLoader, ContentStore};
use crate::error::PortalError;
use crate::feedback::{FeedbackLog, NewFeedback};
use crate::landing::LandingPageRegistry;
use crate::pages;
use crate::redirects::{RedirectRule, RedirectTable};
use crate::render;
use crate::router::{self, Resolution, Resolver};

/// The router with trailing slashes trimmed before routing.
pub type App = NormalizePath<Router>;

/// GET routes served by handlers rather than the page table or the fallback.
const HANDLER_ROUTES: &[&str] = &[
    "/health",
    "/careers",
    "/team",
    "/stats",
    "/coverage",
    "/admin/feedbacks",
];

/// State shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub loader: ContentLoader,
    pub careers: CareerListings,
    pub feedback: Arc<FeedbackLog>,
    pub admin_key: Option<String>,
}

impl AppState {
    /// Load content, redirects and landing pages and connect to Greenhouse.
    pub fn from_config(config: &Config) -> Result<Self> {
        let loader = ContentLoader::new(config.content_dir.clone());
        let content = Arc::new(
            ContentStore::load(&loader)
                .with_context(|| format!("Failed to load content from {}", config.content_dir.display()))?,
        );
        let redirects = RedirectTable::load(config.redirects_file.as_deref())?;
        let landing = LandingPageRegistry::load(config.landing_pages_file.as_deref())?;

        info!(
            "Loaded {} documents, {} redirects, {} landing pages",
            content.len(),
            redirects.len(),
            landing.len()
        );

        let greenhouse = GreenhouseClient::from_config(config)?;
        let careers = CareerListings::new(Arc::new(greenhouse), config.careers_timeout);

        Ok(Self {
            resolver: Arc::new(Resolver::new(redirects, content, landing)),
            loader,
            careers,
            feedback: Arc::new(FeedbackLog::new()),
            admin_key: config.admin_api_key.clone(),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new();

    for page in pages::PAGES {
        router = router.route(
            page.path,
            get(move || async move { Html(render::static_page(page.title, page.body)) }),
        );
    }

    router
        .route("/health", get(health))
        .route("/careers", get(careers_page))
        .route("/team", get(team_page))
        .route("/feedback", post(submit_feedback))
        .route("/stats", get(admin::stats))
        .route("/coverage", get(admin::coverage))
        .route("/admin/feedbacks", get(admin::feedbacks))
        .route("/admin/reload", post(admin::reload))
        .fallback(resolve_path)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// [`build_router`] behind trailing slash trimming, so `/careers/` reaches
/// the `/careers` route. This is what [`serve`] runs.
pub fn build_app(state: AppState) -> App {
    NormalizePath::trim_trailing_slash(build_router(state))
}

/// True when `path` is answered by an explicit GET route.
pub fn is_routed(path: &str) -> bool {
    let path = router::normalize(path);
    pages::find(path).is_some() || HANDLER_ROUTES.contains(&path)
}

/// Internal redirects whose target is neither a routed page, a document nor
/// a landing page.
pub fn broken_redirects(resolver: &Resolver) -> Vec<&RedirectRule> {
    resolver
        .redirects()
        .rules()
        .into_iter()
        .filter(|rule| !rule.is_external() && !is_routed(&rule.target))
        .filter(|rule| {
            !matches!(
                resolver.resolve(&rule.target),
                Resolution::Document { .. } | Resolution::Landing(_)
            )
        })
        .collect()
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let addr = config.bind_addr();

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    let app = axum::ServiceExt::<axum::extract::Request>::into_make_service(build_app(state));
    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "documents": state.resolver.content().len(),
    }))
}

async fn careers_page(State(state): State<AppState>) -> Html<String> {
    let (careers, offices) = state.careers.careers_and_offices().await;
    Html(render::careers_page(&careers, &offices))
}

async fn team_page(State(state): State<AppState>) -> Html<String> {
    let careers = state.careers.devrel_careers().await;
    Html(render::team_page(pages::TEAM_INTRO, &careers))
}

async fn submit_feedback(
    State(state): State<AppState>,
    Json(feedback): Json<NewFeedback>,
) -> Result<impl IntoResponse, PortalError> {
    let path = feedback.path.clone();
    let entry = state
        .feedback
        .submit(feedback)
        .ok_or_else(|| PortalError::BadRequest(format!("'{}' is not a page path", path)))?;

    info!("Feedback #{} for {} (helpful: {})", entry.id, entry.path, entry.helpful);
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Everything without an explicit route: redirects, documents, landing pages.
async fn resolve_path(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, PortalError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(PortalError::NotFound);
    }

    match state.resolver.resolve(uri.path()) {
        Resolution::Redirect(rule) => {
            let status = StatusCode::from_u16(rule.status).map_err(|e| {
                PortalError::Internal(format!("Redirect {} has bad status: {}", rule.source, e))
            })?;
            Ok((status, [(header::LOCATION, rule.target)]).into_response())
        }
        Resolution::Document { document, language } => {
            Ok(Html(render::document_page(&document, &language)).into_response())
        }
        Resolution::Landing(page) => {
            let careers = if page.careers {
                state.careers.devrel_careers().await
            } else {
                Vec::new()
            };
            Ok(Html(render::landing_page(&page, &careers)).into_response())
        }
        Resolution::NotFound => Err(PortalError::NotFound),
    }
}
