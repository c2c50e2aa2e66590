//! Handlers for `/favorites` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/favorites` | Newest first |
//! | `POST` | `/favorites` | Body: `{"keyword":"...", "notes":?, "session_id":?}`; 409 on duplicate |
//! | `DELETE` | `/favorites/:keyword` | 404 if absent |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use quill_core::{
  session::{FavoriteKeyword, NewFavorite},
  source::SignalSource,
  store::ResearchStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /favorites`
pub async fn list<S, G>(
  State(state): State<ApiState<S, G>>,
) -> Result<Json<Vec<FavoriteKeyword>>, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
{
  let favorites = state
    .store
    .list_favorites()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(favorites))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub keyword:    String,
  pub notes:      Option<String>,
  pub session_id: Option<Uuid>,
}

/// `POST /favorites` — 201 on success, 409 if the keyword is already saved.
pub async fn create<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
{
  let keyword = body.keyword.trim().to_string();
  if keyword.is_empty() {
    return Err(ApiError::BadRequest("keyword must not be blank".to_string()));
  }

  // The store enforces uniqueness too; this check exists to answer 409
  // instead of a generic store error.
  let existing = state
    .store
    .list_favorites()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if existing.iter().any(|f| f.keyword == keyword) {
    return Err(ApiError::Conflict(format!("{keyword:?} is already a favorite")));
  }

  let favorite = state
    .store
    .add_favorite(NewFavorite {
      keyword,
      notes: body.notes,
      session_id: body.session_id,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((StatusCode::CREATED, Json(favorite)))
}

// ─── Remove ───────────────────────────────────────────────────────────────────

/// `DELETE /favorites/:keyword`
pub async fn remove<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(keyword): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
{
  let existing = state
    .store
    .list_favorites()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !existing.iter().any(|f| f.keyword == keyword) {
    return Err(ApiError::NotFound(format!("favorite {keyword:?} not found")));
  }

  state
    .store
    .remove_favorite(&keyword)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
