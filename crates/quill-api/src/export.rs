//! Handler for `GET /export/:format?session_id=<id>`.
//!
//! Renders a stored session as a downloadable CSV, Excel, or PDF payload
//! with the matching `Content-Type` and an attachment disposition. The
//! rendering itself is synchronous and cheap relative to the request.

use axum::{
  extract::{Path, Query, State},
  http::header,
  response::IntoResponse,
};
use quill_core::{source::SignalSource, store::ResearchStore};
use quill_export::ExportFormat;
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError, sessions::fetch_session};

#[derive(Debug, Deserialize)]
pub struct ExportParams {
  pub session_id: Uuid,
}

/// `GET /export/:format?session_id=<id>` — format is `csv`, `excel`/`xlsx`,
/// or `pdf`.
pub async fn handler<S, G>(
  State(state): State<ApiState<S, G>>,
  Path(format): Path<String>,
  Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
{
  let format = ExportFormat::from_path_segment(&format)
    .ok_or_else(|| ApiError::BadRequest(format!("unknown export format {format:?}")))?;

  let session = fetch_session(&state, params.session_id).await?;
  let bytes = format.render(&session.results)?;

  let disposition = format!("attachment; filename=\"{}\"", format.file_name());
  Ok((
    [
      (header::CONTENT_TYPE, format.content_type().to_string()),
      (header::CONTENT_DISPOSITION, disposition),
    ],
    bytes,
  ))
}
