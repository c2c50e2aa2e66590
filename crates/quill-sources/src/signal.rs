//! [`HttpSignalSource`] — the live implementation of
//! [`quill_core::source::SignalSource`].
//!
//! Each upstream family is tried independently: a failed suggester, trends
//! call, or market probe is logged at WARN and contributes its default,
//! so one dead endpoint degrades the result instead of failing the search.

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use quill_core::{
  keyword::{CompetitionSummary, KeywordSignals, TrendSummary},
  nlp,
  source::SignalSource,
};

use crate::{
  Error, Result, USER_AGENT,
  competition::CompetitionClient,
  feeds,
  suggest::SuggestClient,
  trends::TrendsClient,
};

/// Headlines taken per configured news feed.
const TITLES_PER_FEED: usize = 5;
const MAX_TRENDING: usize = 20;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Tuning for the outbound clients. The feed list is configuration rather
/// than a constant; the defaults mirror a pair of general-news feeds.
#[derive(Debug, Clone)]
pub struct SourceConfig {
  pub request_timeout: Duration,
  /// Polite pause between consecutive outbound calls within one gather.
  pub source_delay:    Duration,
  /// Geography for trend queries, e.g. `"US"`.
  pub geo:             String,
  /// RSS feeds mixed into trending topics.
  pub trend_feeds:     Vec<String>,
}

impl Default for SourceConfig {
  fn default() -> Self {
    Self {
      request_timeout: Duration::from_secs(15),
      source_delay:    Duration::from_millis(500),
      geo:             "US".to_string(),
      trend_feeds:     vec![
        "https://rss.cnn.com/rss/edition.rss".to_string(),
        "https://feeds.bbci.co.uk/news/rss.xml".to_string(),
      ],
    }
  }
}

// ─── Source ──────────────────────────────────────────────────────────────────

/// Live signal source over the free endpoints.
///
/// Cheap to clone — all inner clients share one [`reqwest::Client`].
#[derive(Clone)]
pub struct HttpSignalSource {
  client:      Client,
  suggest:     SuggestClient,
  trends:      TrendsClient,
  competition: CompetitionClient,
  delay:       Duration,
  trend_feeds: Vec<String>,
}

impl HttpSignalSource {
  pub fn new(config: SourceConfig) -> Result<Self> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(config.request_timeout)
      .build()?;

    Ok(Self {
      suggest:     SuggestClient::new(client.clone()),
      trends:      TrendsClient::new(client.clone(), config.geo),
      competition: CompetitionClient::new(client.clone()),
      delay:       config.source_delay,
      trend_feeds: config.trend_feeds,
      client,
    })
  }

  async fn pause(&self) {
    if !self.delay.is_zero() {
      tokio::time::sleep(self.delay).await;
    }
  }
}

impl SignalSource for HttpSignalSource {
  type Error = Error;

  async fn gather<'a>(&'a self, keyword: &'a str) -> Result<KeywordSignals> {
    let expanded = match self.suggest.expand_keyword(keyword).await {
      Ok(v) if !v.is_empty() => v,
      Ok(_) => nlp::long_tail_variations(keyword),
      Err(e) => {
        // Degrade to templated variations rather than an empty expansion.
        warn!(keyword, error = %e, "keyword expansion failed; using templates");
        nlp::long_tail_variations(keyword)
      }
    };
    self.pause().await;

    let trends = match self.trends.keyword_trends(keyword).await {
      Ok(t) => t,
      Err(e) => {
        warn!(keyword, error = %e, "trends lookup failed; continuing without");
        TrendSummary::default()
      }
    };
    self.pause().await;

    let competition = match self.competition.probe(keyword).await {
      Ok(c) => c,
      Err(e) => {
        warn!(keyword, error = %e, "competition probe failed; continuing without");
        CompetitionSummary::default()
      }
    };

    Ok(KeywordSignals { expanded, trends, competition })
  }

  async fn trending(&self) -> Result<Vec<String>> {
    let mut topics: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let mut push_all = |batch: Vec<String>, topics: &mut Vec<String>| {
      for topic in batch {
        let lower = topic.to_lowercase();
        if !seen.contains(&lower) {
          seen.push(lower);
          topics.push(topic);
        }
      }
    };

    match self.trends.daily_trending().await {
      Ok(batch) => push_all(batch, &mut topics),
      Err(e) => warn!(error = %e, "daily trending fetch failed"),
    }

    for url in &self.trend_feeds {
      match feeds::fetch_feed_titles(&self.client, url, TITLES_PER_FEED).await {
        Ok(batch) => push_all(batch, &mut topics),
        Err(e) => warn!(url = %url, error = %e, "trend feed fetch failed"),
      }
    }

    topics.truncate(MAX_TRENDING);
    Ok(topics)
  }
}
