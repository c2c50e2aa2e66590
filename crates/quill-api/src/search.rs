//! Handler for `POST /search` — the main research operation.
//!
//! Accepts explicit keywords and/or a newline-separated bulk blob, gathers
//! signals for each through the configured [`SignalSource`], scores them,
//! and persists the whole run as a new research session.

use axum::{Json, extract::State};
use chrono::Utc;
use quill_core::{
  keyword::KeywordResult,
  session::NewSession,
  source::SignalSource,
  store::ResearchStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SearchBody {
  #[serde(default)]
  pub keywords:   Vec<String>,
  /// Newline-separated extra keywords, as pasted into a textarea.
  #[serde(default)]
  pub bulk_input: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
  pub session_id: Uuid,
  pub name:       String,
  pub results:    Vec<KeywordResult>,
}

/// `POST /search` — body: [`SearchBody`].
pub async fn handler<S, G>(
  State(state): State<ApiState<S, G>>,
  Json(body): Json<SearchBody>,
) -> Result<Json<SearchResponse>, ApiError>
where
  S: ResearchStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource,
  G::Error: std::error::Error + Send + Sync + 'static,
{
  let keywords = merge_keywords(&body);
  if keywords.is_empty() {
    return Err(ApiError::BadRequest("no keywords provided".to_string()));
  }

  let mut results = Vec::with_capacity(keywords.len());
  for keyword in &keywords {
    let signals = state
      .source
      .gather(keyword)
      .await
      .map_err(|e| ApiError::Source(Box::new(e)))?;
    results.push(KeywordResult::from_signals(keyword, signals));
  }

  let session = state
    .store
    .save_session(NewSession::named_for(Utc::now(), results))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(SearchResponse {
    session_id: session.session_id,
    name:       session.name,
    results:    session.results,
  }))
}

/// Merge explicit and bulk keywords: trimmed, blanks dropped, case-insensitive
/// duplicates removed in first-seen order.
fn merge_keywords(body: &SearchBody) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  let mut seen: Vec<String> = Vec::new();

  let explicit = body.keywords.iter().map(String::as_str);
  let bulk = body.bulk_input.lines();

  for raw in explicit.chain(bulk) {
    let keyword = raw.trim();
    if keyword.is_empty() {
      continue;
    }
    let lower = keyword.to_lowercase();
    if !seen.contains(&lower) {
      seen.push(lower);
      out.push(keyword.to_string());
    }
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn merge_trims_dedupes_and_preserves_order() {
    let body = SearchBody {
      keywords:   vec!["  Vegan Cookbook ".into(), "dog training".into()],
      bulk_input: "vegan cookbook\n\n  sourdough  \ndog training".into(),
    };
    assert_eq!(
      merge_keywords(&body),
      vec!["Vegan Cookbook", "dog training", "sourdough"]
    );
  }

  #[test]
  fn merge_of_blanks_is_empty() {
    let body = SearchBody { keywords: vec!["   ".into()], bulk_input: " \n\t\n".into() };
    assert!(merge_keywords(&body).is_empty());
  }
}
