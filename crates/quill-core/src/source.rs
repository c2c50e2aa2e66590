//! The `SignalSource` trait — the seam between scoring and the outside world.
//!
//! `quill-sources` implements it over live HTTP endpoints; tests implement
//! it with canned data. A source is expected to degrade rather than fail:
//! an unreachable upstream should produce default signals, reserving the
//! error return for conditions where nothing sensible can be gathered.

use std::future::Future;

use crate::keyword::KeywordSignals;

pub trait SignalSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Gather expansion, trend, and competition signals for one keyword.
  fn gather<'a>(
    &'a self,
    keyword: &'a str,
  ) -> impl Future<Output = Result<KeywordSignals, Self::Error>> + Send + 'a;

  /// Current trending topics, deduplicated, best-effort across feeds.
  fn trending(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
