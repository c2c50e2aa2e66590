//! Error types for `quill-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("research session not found: {0}")]
  SessionNotFound(Uuid),

  #[error("favorite not found: {0:?}")]
  FavoriteNotFound(String),

  #[error("keyword is already a favorite: {0:?}")]
  DuplicateFavorite(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
