//! Runtime server configuration, deserialised from `config.toml` merged
//! with `QUILL_`-prefixed environment variables.

use std::{path::PathBuf, time::Duration};

use quill_sources::SourceConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  /// SQLite database file; `:memory:` works for throwaway runs.
  #[serde(default = "default_store_path")]
  pub store_path:           PathBuf,
  #[serde(default = "default_timeout_secs")]
  pub request_timeout_secs: u64,
  /// Polite pause between outbound source calls, in milliseconds.
  #[serde(default = "default_delay_ms")]
  pub source_delay_ms:      u64,
  /// Geography for trend queries.
  #[serde(default = "default_geo")]
  pub geo:                  String,
  /// RSS feeds mixed into trending topics.
  #[serde(default = "default_trend_feeds")]
  pub trend_feeds:          Vec<String>,
}

impl ServerConfig {
  pub fn source_config(&self) -> SourceConfig {
    SourceConfig {
      request_timeout: Duration::from_secs(self.request_timeout_secs),
      source_delay:    Duration::from_millis(self.source_delay_ms),
      geo:             self.geo.clone(),
      trend_feeds:     self.trend_feeds.clone(),
    }
  }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_store_path() -> PathBuf { PathBuf::from("quill.db") }
fn default_timeout_secs() -> u64 { 15 }
fn default_delay_ms() -> u64 { 500 }
fn default_geo() -> String { "US".to_string() }
fn default_trend_feeds() -> Vec<String> {
  SourceConfig::default().trend_feeds
}
