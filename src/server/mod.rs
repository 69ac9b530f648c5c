//! HTTP API.
//!
//! Read-only catalog routes, grouped search, and the chat assistant, all
//! nested under a configurable prefix (`/api` by default).

mod error;

pub use error::{ApiError, ApiResult, INTERNAL_ERROR_MESSAGE};

use crate::catalog::Catalog;
use crate::chat::ChatResponseBuilder;
use crate::model::chat::{ChatResponse, ChatTurn, Role};
use crate::model::content::*;
use crate::search::{SearchResultGroup, build_global_search};
use crate::telemetry::metrics;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::routing::{get, post};
use axum::{Json, Router};
use opentelemetry::KeyValue;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    chat: Arc<ChatResponseBuilder>,
    started: Instant,
}

impl AppState {
    pub fn new(catalog: Catalog, chat: ChatResponseBuilder) -> Self {
        Self {
            catalog: Arc::new(catalog),
            chat: Arc::new(chat),
            started: Instant::now(),
        }
    }
}

/// Build the application router with every route under `api_prefix`.
pub fn router(state: AppState, api_prefix: &str) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/activities", get(list_activities))
        .route("/activities/{id}", get(get_activity))
        .route("/blog", get(list_blog_posts))
        .route("/community/topics", get(list_community_topics))
        .route("/community/topics/{id}/discussion", get(get_discussion))
        .route("/community/profiles", get(list_teacher_profiles))
        .route("/partners", get(list_partner_resources))
        .route("/events", get(list_events))
        .route("/events/{id}", get(get_event))
        .route("/teacher-stage", get(list_teacher_stage_talks))
        .route("/search", get(search))
        .route("/chat", post(chat));

    let prefix = api_prefix.trim_end_matches('/');
    let app = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(prefix, api)
    };

    app.fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `app` on `addr` until Ctrl-C.
pub async fn serve(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "API ready");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutdown requested");
        })
        .await
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct Health {
    status: &'static str,
    uptime: f64,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        uptime: state.started.elapsed().as_secs_f64(),
    })
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

async fn list_activities(State(state): State<AppState>) -> Json<Vec<Activity>> {
    Json(state.catalog.activities().to_vec())
}

async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Activity>> {
    state
        .catalog
        .activity(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Activity not found".to_string()))
}

async fn list_blog_posts(State(state): State<AppState>) -> Json<Vec<BlogPost>> {
    Json(state.catalog.blog_posts().to_vec())
}

async fn list_community_topics(State(state): State<AppState>) -> Json<Vec<CommunityTopic>> {
    Json(state.catalog.community_topics().to_vec())
}

async fn get_discussion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CommunityDiscussion>> {
    state
        .catalog
        .discussion_for_topic(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Discussion not found".to_string()))
}

async fn list_teacher_profiles(State(state): State<AppState>) -> Json<Vec<TeacherProfile>> {
    Json(state.catalog.teacher_profiles().to_vec())
}

async fn list_partner_resources(State(state): State<AppState>) -> Json<Vec<PartnerResource>> {
    Json(state.catalog.partner_resources().to_vec())
}

async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.catalog.events().to_vec())
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Event>> {
    state
        .catalog
        .event(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))
}

async fn list_teacher_stage_talks(State(state): State<AppState>) -> Json<Vec<TeacherStageTalk>> {
    Json(state.catalog.teacher_stage_talks().to_vec())
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<SearchResultGroup>> {
    let groups = build_global_search(&params.q, &state.catalog);
    metrics::search_queries().add(
        1,
        &[
            KeyValue::new("surface", "global"),
            KeyValue::new("matched", (!groups.is_empty()).to_string()),
        ],
    );
    Json(groups)
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Body of `POST /chat`: a conversation, or a single prompt.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
    pub prompt: Option<String>,
}

impl ChatRequest {
    /// The conversation to answer, or `None` when no user text was sent.
    ///
    /// `messages` wins when it holds a non-blank user turn.
    pub fn into_turns(self) -> Option<Vec<ChatTurn>> {
        let has_user_text = self
            .messages
            .iter()
            .any(|m| m.role == Role::User && !m.content.trim().is_empty());
        if has_user_text {
            return Some(self.messages);
        }

        self.prompt
            .filter(|p| !p.trim().is_empty())
            .map(|p| vec![ChatTurn::user(p)])
    }
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let turns = request
        .into_turns()
        .ok_or_else(|| ApiError::BadRequest("Prompt is required".to_string()))?;

    // Own task: a panic in the builder surfaces here as a JoinError.
    let builder = Arc::clone(&state.chat);
    let reply = tokio::spawn(async move { builder.respond(&turns).await })
        .await
        .map_err(|e| ApiError::Internal(format!("chat task failed: {e}")))?;

    Ok(Json(reply))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {} not found", uri.path()))
}
