//! Handlers for `/sessions` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/sessions` | Newest first; optional `?limit=` |
//! | `GET`  | `/sessions/:id` | Full stored results; 404 if unknown |
//! | `DELETE` | `/sessions/:id` | 204 on success |
//! | `GET`  | `/sessions/:id/strategy` | Strategy report over stored results |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use quill_core::{
  session::{ResearchSession, SessionSummary},
  source::SignalSource,
  store::ResearchStore,
  strategy::{StrategyReport, recommend_strategy},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit: Option<usize>,
}

/// `GET /sessions[?limit=<n>]`
pub async fn list<S, G>(
  State(state): State<ApiState<S, G>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<SessionSummary>>, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
{
  let sessions = state
    .store
    .list_sessions(params.limit)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(sessions))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /sessions/:id`
pub async fn get_one<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ResearchSession>, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
{
  let session = fetch_session(&state, id).await?;
  Ok(Json(session))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /sessions/:id`
pub async fn delete_one<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
{
  // Existence check first so a missing id maps to 404, not a store error.
  fetch_session(&state, id).await?;

  state
    .store
    .delete_session(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Strategy ─────────────────────────────────────────────────────────────────

/// `GET /sessions/:id/strategy`
pub async fn strategy_for<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(id): Path<Uuid>,
) -> Result<Json<StrategyReport>, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
{
  let session = fetch_session(&state, id).await?;
  Ok(Json(recommend_strategy(&session.results)))
}

// ─── Shared ───────────────────────────────────────────────────────────────────

pub(crate) async fn fetch_session<S, G>(
  state: &ApiState<S, G>,
  id:    Uuid,
) -> Result<ResearchSession, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
{
  state
    .store
    .get_session(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("session {id} not found")))
}
