//! Handlers for `/trending` and `/cluster`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/trending` | Best-effort trending topics |
//! | `POST` | `/cluster` | Body: explicit `keywords` or a `session_id` |

use axum::{Json, extract::State};
use quill_core::{
  cluster::{KeywordCluster, cluster_keywords},
  source::SignalSource,
  store::ResearchStore,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── Trending ─────────────────────────────────────────────────────────────────

/// `GET /trending`
pub async fn trending<S, G>(
  State(state): State<ApiState<S, G>>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: ResearchStore,
  G: SignalSource,
  G::Error: std::error::Error + Send + Sync + 'static,
{
  let topics = state
    .source
    .trending()
    .await
    .map_err(|e| ApiError::Source(Box::new(e)))?;
  Ok(Json(json!({ "trends": topics })))
}

// ─── Clustering ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ClusterBody {
  /// Keywords to cluster directly.
  pub keywords:   Option<Vec<String>>,
  /// Alternatively, cluster the keywords of a stored session.
  pub session_id: Option<Uuid>,
  /// Cluster count; heuristic when omitted.
  pub k:          Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ClusterResponse {
  pub clusters: Vec<KeywordCluster>,
}

/// `POST /cluster` — body: [`ClusterBody`]. One of `keywords` / `session_id`
/// is required; an explicit empty keyword list clusters to nothing.
pub async fn cluster<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<ClusterBody>,
) -> Result<Json<ClusterResponse>, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
{
  let keywords: Vec<String> = match (body.keywords, body.session_id) {
    (Some(keywords), _) => keywords,
    (None, Some(id)) => {
      let session = state
        .store
        .get_session(id)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?
        .ok_or_else(|| ApiError::NotFound(format!("session {id} not found")))?;
      session.results.into_iter().map(|r| r.keyword).collect()
    }
    (None, None) => {
      return Err(ApiError::BadRequest(
        "provide either keywords or session_id".to_string(),
      ));
    }
  };

  Ok(Json(ClusterResponse { clusters: cluster_keywords(&keywords, body.k) }))
}
