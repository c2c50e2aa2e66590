//! JSON REST API for Quill.
//!
//! Exposes an axum [`Router`] backed by any
//! [`quill_core::store::ResearchStore`] and
//! [`quill_core::source::SignalSource`]. Transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", quill_api::api_router(store.clone(), source.clone()))
//! ```

pub mod error;

pub mod analysis;
pub mod export;
pub mod favorites;
pub mod search;
pub mod sessions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use quill_core::{source::SignalSource, store::ResearchStore};

pub use error::ApiError;

// ─── State ───────────────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<S, G> {
  pub store:  Arc<S>,
  pub source: Arc<G>,
}

// Manual impl: `Arc` is always cloneable, no bounds on S/G needed.
impl<S, G> Clone for ApiState<S, G> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), source: self.source.clone() }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store` and `source`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(store: Arc<S>, source: Arc<G>) -> Router<()>
where
  S: ResearchStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
  G: SignalSource + 'static,
  G::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Search & analysis
    .route("/search", post(search::handler::<S, G>))
    .route("/trending", get(analysis::trending::<S, G>))
    .route("/cluster", post(analysis::cluster::<S, G>))
    // Sessions
    .route("/sessions", get(sessions::list::<S, G>))
    .route(
      "/sessions/{id}",
      get(sessions::get_one::<S, G>).delete(sessions::delete_one::<S, G>),
    )
    .route("/sessions/{id}/strategy", get(sessions::strategy_for::<S, G>))
    // Favorites
    .route("/favorites", get(favorites::list::<S, G>).post(favorites::create::<S, G>))
    .route("/favorites/{keyword}", delete(favorites::remove::<S, G>))
    // Exports
    .route("/export/{format}", get(export::handler::<S, G>))
    .with_state(ApiState { store, source })
}

// ─── Integration tests ───────────────────────────────────────────────────────
