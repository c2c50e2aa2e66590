//! The `ResearchStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `quill-store-sqlite`).
//! Higher layers (`quill-api`, `quill-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::session::{
  FavoriteKeyword, NewFavorite, NewSession, ResearchSession, SessionSummary,
};

/// Abstraction over a Quill persistence backend.
///
/// Sessions are written whole and deleted whole; favorites are single-row
/// inserts and deletes. Keyword uniqueness for favorites is the backend's
/// responsibility and surfaces as a typed error.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ResearchStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Sessions ──────────────────────────────────────────────────────────

  /// Persist a new research session; the id and timestamps are assigned by
  /// the store.
  fn save_session(
    &self,
    input: NewSession,
  ) -> impl Future<Output = Result<ResearchSession, Self::Error>> + Send + '_;

  /// Retrieve a session with its full results. Returns `None` if not found.
  fn get_session(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<ResearchSession>, Self::Error>> + Send + '_;

  /// List sessions newest-first, without result blobs.
  fn list_sessions(
    &self,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<SessionSummary>, Self::Error>> + Send + '_;

  /// Delete a session. Errors if the session does not exist.
  fn delete_session(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Favorites ─────────────────────────────────────────────────────────

  /// Bookmark a keyword. Errors if the keyword is already a favorite.
  fn add_favorite(
    &self,
    input: NewFavorite,
  ) -> impl Future<Output = Result<FavoriteKeyword, Self::Error>> + Send + '_;

  /// Remove a bookmark by its keyword text. Errors if absent.
  fn remove_favorite<'a>(
    &'a self,
    keyword: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// List favorites newest-first.
  fn list_favorites(
    &self,
  ) -> impl Future<Output = Result<Vec<FavoriteKeyword>, Self::Error>> + Send + '_;
}
