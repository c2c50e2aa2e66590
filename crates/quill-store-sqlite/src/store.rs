//! [`SqliteStore`] — the SQLite implementation of [`ResearchStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use quill_core::{
  session::{
    FavoriteKeyword, NewFavorite, NewSession, ResearchSession, SessionSummary,
  },
  store::ResearchStore,
};

use crate::{
  encode::{
    RawFavorite, RawSession, RawSessionSummary, encode_dt, encode_results,
    encode_uuid,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Quill research store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ResearchStore impl ──────────────────────────────────────────────────────

impl ResearchStore for SqliteStore {
  type Error = Error;

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn save_session(&self, input: NewSession) -> Result<ResearchSession> {
    let now = Utc::now();
    let session = ResearchSession {
      session_id: Uuid::new_v4(),
      name:       input.name,
      results:    input.results,
      created_at: now,
      updated_at: now,
    };

    let id_str        = encode_uuid(session.session_id);
    let name          = session.name.clone();
    let results_json  = encode_results(&session.results)?;
    let keyword_count = session.results.len() as i64;
    let created_str   = encode_dt(session.created_at);
    let updated_str   = encode_dt(session.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO research_sessions (
             session_id, name, results_json, keyword_count, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str,
            name,
            results_json,
            keyword_count,
            created_str,
            updated_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(session)
  }

  async fn get_session(&self, id: Uuid) -> Result<Option<ResearchSession>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSession> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT session_id, name, results_json, created_at, updated_at
             FROM research_sessions WHERE session_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawSession {
                session_id:   row.get(0)?,
                name:         row.get(1)?,
                results_json: row.get(2)?,
                created_at:   row.get(3)?,
                updated_at:   row.get(4)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSession::into_session).transpose()
  }

  async fn list_sessions(&self, limit: Option<usize>) -> Result<Vec<SessionSummary>> {
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val = limit.map(|l| l as i64).unwrap_or(-1);

    let raws: Vec<RawSessionSummary> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT session_id, name, keyword_count, created_at, updated_at
           FROM research_sessions
           ORDER BY created_at DESC, session_id
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], |row| {
            Ok(RawSessionSummary {
              session_id:    row.get(0)?,
              name:          row.get(1)?,
              keyword_count: row.get(2)?,
              created_at:    row.get(3)?,
              updated_at:    row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSessionSummary::into_summary).collect()
  }

  async fn delete_session(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM research_sessions WHERE session_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::SessionNotFound(id));
    }
    Ok(())
  }

  // ── Favorites ─────────────────────────────────────────────────────────────

  async fn add_favorite(&self, input: NewFavorite) -> Result<FavoriteKeyword> {
    let favorite = FavoriteKeyword {
      favorite_id: Uuid::new_v4(),
      keyword:     input.keyword,
      notes:       input.notes,
      session_id:  input.session_id,
      created_at:  Utc::now(),
    };

    let id_str      = encode_uuid(favorite.favorite_id);
    let keyword     = favorite.keyword.clone();
    let notes       = favorite.notes.clone();
    let session_str = favorite.session_id.map(encode_uuid);
    let created_str = encode_dt(favorite.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO favorite_keywords (
             favorite_id, keyword, notes, session_id, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, keyword, notes, session_str, created_str],
        )?;
        Ok(())
      })
      .await;

    match inserted {
      Ok(()) => Ok(favorite),
      Err(tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)))
        if e.code == rusqlite::ErrorCode::ConstraintViolation =>
      {
        Err(Error::DuplicateFavorite(favorite.keyword))
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn remove_favorite<'a>(&'a self, keyword: &'a str) -> Result<()> {
    let keyword_owned = keyword.to_owned();

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM favorite_keywords WHERE keyword = ?1",
          rusqlite::params![keyword_owned],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::FavoriteNotFound(keyword.to_owned()));
    }
    Ok(())
  }

  async fn list_favorites(&self) -> Result<Vec<FavoriteKeyword>> {
    let raws: Vec<RawFavorite> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT favorite_id, keyword, notes, session_id, created_at
           FROM favorite_keywords
           ORDER BY created_at DESC, favorite_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawFavorite {
              favorite_id: row.get(0)?,
              keyword:     row.get(1)?,
              notes:       row.get(2)?,
              session_id:  row.get(3)?,
              created_at:  row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFavorite::into_favorite).collect()
  }
}
