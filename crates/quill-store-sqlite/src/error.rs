//! Error type for `quill-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] quill_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("research session not found: {0}")]
  SessionNotFound(uuid::Uuid),

  #[error("favorite not found: {0:?}")]
  FavoriteNotFound(String),

  /// The `keyword` column carries a UNIQUE constraint; a second insert of
  /// the same keyword maps to this instead of a raw constraint error.
  #[error("keyword is already a favorite: {0:?}")]
  DuplicateFavorite(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
