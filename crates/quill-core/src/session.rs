//! Research sessions and favorite keywords — the two persisted record types.
//!
//! A session is a named snapshot of scored results; it is written once by
//! the search that produced it and deleted only by explicit user action.
//! Favorites are independent bookmarks, optionally linked to the session
//! they were spotted in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, keyword::KeywordResult};

// ─── ResearchSession ─────────────────────────────────────────────────────────

/// A stored research run: the seed keywords' scored results, as a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchSession {
  pub session_id: Uuid,
  pub name:       String,
  pub results:    Vec<KeywordResult>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl ResearchSession {
  /// Serialise a results list into the blob form sessions are stored as.
  pub fn results_to_json(results: &[KeywordResult]) -> Result<String> {
    Ok(serde_json::to_string(results)?)
  }

  /// Decode a stored results blob.
  pub fn results_from_json(blob: &str) -> Result<Vec<KeywordResult>> {
    Ok(serde_json::from_str(blob)?)
  }
}

/// Listing row for sessions — everything but the results blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
  pub session_id:    Uuid,
  pub name:          String,
  pub keyword_count: usize,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

/// Input to [`crate::store::ResearchStore::save_session`].
/// Timestamps and the id are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewSession {
  pub name:    String,
  pub results: Vec<KeywordResult>,
}

impl NewSession {
  /// Conventional session name derived from the moment of the search.
  pub fn named_for(now: DateTime<Utc>, results: Vec<KeywordResult>) -> Self {
    Self {
      name: format!("Search {}", now.format("%Y-%m-%d %H:%M")),
      results,
    }
  }
}

// ─── FavoriteKeyword ─────────────────────────────────────────────────────────

/// A bookmarked keyword with an optional free-text note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteKeyword {
  pub favorite_id: Uuid,
  pub keyword:     String,
  pub notes:       Option<String>,
  /// The session this keyword was found in, if any.
  pub session_id:  Option<Uuid>,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::ResearchStore::add_favorite`].
#[derive(Debug, Clone)]
pub struct NewFavorite {
  pub keyword:    String,
  pub notes:      Option<String>,
  pub session_id: Option<Uuid>,
}

impl NewFavorite {
  pub fn new(keyword: impl Into<String>) -> Self {
    Self { keyword: keyword.into(), notes: None, session_id: None }
  }
}
