//! HTTP transport.
//!
//! A thin axum layer over the search core:
//! - `POST /search` runs a search and hands back its fingerprint
//! - `GET /results` and `GET /results/page/{page}` list the latest search
//! - `GET /profile/{id}` shows one cached author
//!
//! The fingerprint travels in the `latest-search` cookie, or in a `token`
//! query parameter for clients without cookies.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::TypedHeader;
use axum_extra::headers::Cookie;
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::cache::ResultCache;
use crate::client::Aggregator;
use crate::config::{Config, defaults};
use crate::error::{FinderError, FinderResult};
use crate::formatters::{
    ProfileView, format_listing_markdown, format_profile_markdown, listing_json, profile_json,
};
use crate::keys::AuthorId;
use crate::models::{ResponseFormat, SearchQuery};
use crate::search::{ProfileLookup, ResultListing, SearchOrchestrator};

/// Shared state for HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub orchestrator: SearchOrchestrator,
    pub listing: ResultListing,
    pub profiles: ProfileLookup,
}

impl AppState {
    /// State backed by a fresh in-memory cache.
    #[must_use]
    pub fn new(config: &Config, aggregator: Arc<dyn Aggregator>) -> Self {
        Self::with_cache(config, aggregator, ResultCache::in_memory(config))
    }

    /// State over an existing cache.
    #[must_use]
    pub fn with_cache(config: &Config, aggregator: Arc<dyn Aggregator>, cache: ResultCache) -> Self {
        Self {
            orchestrator: SearchOrchestrator::new(aggregator, cache.clone()),
            listing: ResultListing::new(cache.clone(), config),
            profiles: ProfileLookup::new(cache),
        }
    }
}

/// Query parameters for listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    /// Fingerprint, overriding the cookie.
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    format: ResponseFormat,
}

/// Query parameters for the profile endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileParams {
    #[serde(default)]
    format: ResponseFormat,
}

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/search", post(handle_search))
        .route("/results", get(handle_results))
        .route("/results/page/{page}", get(handle_results_page))
        .route("/profile/{id}", get(handle_profile))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

impl IntoResponse for FinderError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "Request failed");
        } else {
            tracing::debug!(error = %self, kind = self.kind(), "Request rejected");
        }

        let body = json!({
            "error": self.to_user_message(),
            "kind": self.kind(),
            "resubmit": self.needs_new_search(),
        });
        (status, Json(body)).into_response()
    }
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "author-finder",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn handle_search(
    State(state): State<Arc<AppState>>,
    Json(query): Json<SearchQuery>,
) -> FinderResult<Response> {
    let key = state.orchestrator.run(&query).await?;
    let cookie = format!("{}={key}; Path=/; HttpOnly; SameSite=Lax", defaults::SESSION_COOKIE);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "fingerprint": key })),
    )
        .into_response())
}

async fn handle_results(
    State(state): State<Arc<AppState>>,
    cookies: Option<TypedHeader<Cookie>>,
    Query(params): Query<ListingParams>,
) -> FinderResult<Response> {
    render_listing(&state, cookies, params, 1).await
}

async fn handle_results_page(
    State(state): State<Arc<AppState>>,
    Path(page): Path<u32>,
    cookies: Option<TypedHeader<Cookie>>,
    Query(params): Query<ListingParams>,
) -> FinderResult<Response> {
    render_listing(&state, cookies, params, page).await
}

async fn render_listing(
    state: &AppState,
    cookies: Option<TypedHeader<Cookie>>,
    params: ListingParams,
    page: u32,
) -> FinderResult<Response> {
    let token = params
        .token
        .filter(|token| !token.trim().is_empty())
        .or_else(|| session_token(cookies));
    let listing = state.listing.page_for_token(token.as_deref(), page).await?;

    Ok(match params.format {
        ResponseFormat::Markdown => markdown(format_listing_markdown(&listing)),
        ResponseFormat::Json => Json(listing_json(&listing)).into_response(),
    })
}

async fn handle_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ProfileParams>,
) -> FinderResult<Response> {
    let id = AuthorId::parse(&id)?;
    let record = state.profiles.fetch(&id).await?;
    let view = ProfileView::from_record(&id, &record);

    Ok(match params.format {
        ResponseFormat::Markdown => markdown(format_profile_markdown(&view)),
        ResponseFormat::Json => Json(json!({
            "id": id,
            "author": record,
            "profile": profile_json(&view),
        }))
        .into_response(),
    })
}

/// Fingerprint held in the session cookie.
fn session_token(cookies: Option<TypedHeader<Cookie>>) -> Option<String> {
    let TypedHeader(cookies) = cookies?;
    let token = cookies.get(defaults::SESSION_COOKIE)?;
    Some(token.to_string())
}

fn markdown(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], body).into_response()
}
