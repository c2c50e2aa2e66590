//! Autocomplete suggestion clients: Google suggest, DuckDuckGo, Wikipedia.
//!
//! All three endpoints speak the OpenSearch-ish `[query, [suggestions, ..]]`
//! JSON shape. Parsing is split from fetching so it can be tested against
//! canned payloads.

use reqwest::Client;
use tracing::debug;

use crate::{Error, Result};

const MAX_GOOGLE: usize = 10;
const MAX_DUCKDUCKGO: usize = 10;
const MAX_WIKIPEDIA: usize = 8;
/// Cap on the merged expansion list.
const MAX_EXPANDED: usize = 20;

/// Client over the free autocomplete endpoints.
#[derive(Clone)]
pub struct SuggestClient {
  client: Client,
}

impl SuggestClient {
  pub fn new(client: Client) -> Self { Self { client } }

  /// Expand a seed keyword through all suggesters, merged in source order,
  /// deduplicated case-insensitively, seed itself removed.
  ///
  /// A failing suggester contributes nothing; only total failure of the
  /// fetch layer bubbles up from the individual calls.
  pub async fn expand_keyword(&self, keyword: &str) -> Result<Vec<String>> {
    let mut merged: Vec<String> = Vec::new();
    let mut seen: Vec<String> = vec![keyword.to_lowercase()];

    for batch in [
      self.google_autocomplete(keyword).await.unwrap_or_default(),
      self.duckduckgo_suggestions(keyword).await.unwrap_or_default(),
      self.wikipedia_suggestions(keyword).await.unwrap_or_default(),
    ] {
      for suggestion in batch {
        let lower = suggestion.to_lowercase();
        if !seen.contains(&lower) {
          seen.push(lower);
          merged.push(suggestion);
        }
        if merged.len() >= MAX_EXPANDED {
          return Ok(merged);
        }
      }
    }

    Ok(merged)
  }

  /// `GET suggestqueries.google.com/complete/search?client=firefox`
  pub async fn google_autocomplete(&self, keyword: &str) -> Result<Vec<String>> {
    let body = self
      .client
      .get("https://suggestqueries.google.com/complete/search")
      .query(&[("client", "firefox"), ("q", keyword)])
      .send()
      .await?
      .error_for_status()?
      .text()
      .await?;

    let suggestions = parse_opensearch_payload(&body, keyword, "google suggest")?;
    debug!(keyword, count = suggestions.len(), "google autocomplete fetched");
    Ok(suggestions.into_iter().take(MAX_GOOGLE).collect())
  }

  /// `GET duckduckgo.com/ac/?type=list`
  pub async fn duckduckgo_suggestions(&self, keyword: &str) -> Result<Vec<String>> {
    let body = self
      .client
      .get("https://duckduckgo.com/ac/")
      .query(&[("q", keyword), ("type", "list")])
      .send()
      .await?
      .error_for_status()?
      .text()
      .await?;

    let suggestions = parse_opensearch_payload(&body, keyword, "duckduckgo ac")?;
    debug!(keyword, count = suggestions.len(), "duckduckgo suggestions fetched");
    Ok(suggestions.into_iter().take(MAX_DUCKDUCKGO).collect())
  }

  /// `GET en.wikipedia.org/w/api.php?action=opensearch`
  pub async fn wikipedia_suggestions(&self, keyword: &str) -> Result<Vec<String>> {
    let body = self
      .client
      .get("https://en.wikipedia.org/w/api.php")
      .query(&[
        ("action", "opensearch"),
        ("search", keyword),
        ("limit", "10"),
        ("namespace", "0"),
        ("format", "json"),
      ])
      .send()
      .await?
      .error_for_status()?
      .text()
      .await?;

    let titles = parse_opensearch_payload(&body, keyword, "wikipedia opensearch")?;
    debug!(keyword, count = titles.len(), "wikipedia titles fetched");
    Ok(titles.into_iter().take(MAX_WIKIPEDIA).collect())
  }
}

/// Parse the `[query, [suggestion, ...], ...]` payload shared by all three
/// endpoints, dropping empty entries and the seed itself.
fn parse_opensearch_payload(
  body:     &str,
  keyword:  &str,
  endpoint: &'static str,
) -> Result<Vec<String>> {
  let value: serde_json::Value = serde_json::from_str(body)?;

  let list = value
    .get(1)
    .and_then(|v| v.as_array())
    .ok_or_else(|| Error::UnexpectedPayload {
      endpoint,
      detail: "missing suggestion array".to_string(),
    })?;

  Ok(
    list
      .iter()
      .filter_map(|v| v.as_str())
      .map(str::trim)
      .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(keyword))
      .map(str::to_owned)
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_firefox_style_payload() {
    let body = r#"["knitting",["knitting patterns","knitting for beginners","Knitting"]]"#;
    let out = parse_opensearch_payload(body, "knitting", "google suggest").unwrap();
    // the seed itself is dropped regardless of case
    assert_eq!(out, vec!["knitting patterns", "knitting for beginners"]);
  }

  #[test]
  fn empty_suggestion_array_is_fine() {
    let body = r#"["obscure seed",[]]"#;
    let out = parse_opensearch_payload(body, "obscure seed", "duckduckgo ac").unwrap();
    assert!(out.is_empty());
  }

  #[test]
  fn missing_array_is_a_payload_error() {
    let err = parse_opensearch_payload(r#"{"error":"nope"}"#, "x", "wikipedia opensearch")
      .unwrap_err();
    assert!(matches!(err, Error::UnexpectedPayload { .. }));
  }

  #[test]
  fn malformed_json_is_a_json_error() {
    let err = parse_opensearch_payload("<html>", "x", "google suggest").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
  }
}
