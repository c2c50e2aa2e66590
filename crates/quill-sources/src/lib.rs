//! Outbound HTTP clients for Quill's keyword signals.
//!
//! Each client wraps one family of free endpoints: autocomplete suggesters,
//! Google Trends, RSS headline feeds, and the Amazon book-search competition
//! probe. [`HttpSignalSource`] composes them behind the
//! [`quill_core::source::SignalSource`] trait, degrading per source instead
//! of failing the whole gather.

pub mod competition;
pub mod error;
pub mod feeds;
pub mod signal;
pub mod suggest;
pub mod trends;

pub use error::{Error, Result};
pub use signal::{HttpSignalSource, SourceConfig};

/// Browser-like User-Agent sent on every outbound request; several of the
/// wrapped endpoints reject the default library UA.
pub(crate) const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
   AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
