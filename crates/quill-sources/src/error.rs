//! Error type for `quill-sources`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("feed parse error: {0}")]
  Feed(#[from] quick_xml::DeError),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The endpoint answered but not in the shape we expect.
  #[error("unexpected payload from {endpoint}: {detail}")]
  UnexpectedPayload {
    endpoint: &'static str,
    detail:   String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
