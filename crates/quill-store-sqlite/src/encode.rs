//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Session results are stored
//! as a compact JSON array. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use quill_core::{
  keyword::KeywordResult,
  session::{FavoriteKeyword, ResearchSession, SessionSummary},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Results blob ─────────────────────────────────────────────────────────────

// The blob format itself belongs to the domain; these wrappers only map the
// error type into this crate's.

pub fn encode_results(results: &[KeywordResult]) -> Result<String> {
  Ok(ResearchSession::results_to_json(results)?)
}

pub fn decode_results(s: &str) -> Result<Vec<KeywordResult>> {
  Ok(ResearchSession::results_from_json(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `research_sessions` row.
pub struct RawSession {
  pub session_id:   String,
  pub name:         String,
  pub results_json: String,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawSession {
  pub fn into_session(self) -> Result<ResearchSession> {
    Ok(ResearchSession {
      session_id: decode_uuid(&self.session_id)?,
      name:       self.name,
      results:    decode_results(&self.results_json)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Listing row: everything except the results blob.
pub struct RawSessionSummary {
  pub session_id:    String,
  pub name:          String,
  pub keyword_count: i64,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawSessionSummary {
  pub fn into_summary(self) -> Result<SessionSummary> {
    Ok(SessionSummary {
      session_id:    decode_uuid(&self.session_id)?,
      name:          self.name,
      keyword_count: self.keyword_count.max(0) as usize,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `favorite_keywords` row.
pub struct RawFavorite {
  pub favorite_id: String,
  pub keyword:     String,
  pub notes:       Option<String>,
  pub session_id:  Option<String>,
  pub created_at:  String,
}

impl RawFavorite {
  pub fn into_favorite(self) -> Result<FavoriteKeyword> {
    Ok(FavoriteKeyword {
      favorite_id: decode_uuid(&self.favorite_id)?,
      keyword:     self.keyword,
      notes:       self.notes,
      session_id:  self.session_id.as_deref().map(decode_uuid).transpose()?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}
