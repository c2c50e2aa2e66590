//! RSS headline reader used for trending topics.
//!
//! Feeds are plain RSS 2.0; we only care about item titles. Parsing uses
//! `quick-xml`'s serde support over a minimal structural subset.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::Result;

// Minimal RSS 2.0 shape — anything else in the document is ignored.
#[derive(Debug, Deserialize)]
struct Rss {
  channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
  #[serde(rename = "item", default)]
  items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
  #[serde(default)]
  title: String,
}

/// Fetch one RSS feed and return its first `limit` non-empty item titles.
pub async fn fetch_feed_titles(
  client: &Client,
  url:    &str,
  limit:  usize,
) -> Result<Vec<String>> {
  let body = client.get(url).send().await?.error_for_status()?.text().await?;
  let titles = parse_feed_titles(&body, limit)?;
  debug!(url, count = titles.len(), "rss feed fetched");
  Ok(titles)
}

fn parse_feed_titles(xml: &str, limit: usize) -> Result<Vec<String>> {
  let rss: Rss = quick_xml::de::from_str(xml)?;
  Ok(
    rss
      .channel
      .items
      .into_iter()
      .map(|i| i.title.trim().to_string())
      .filter(|t| !t.is_empty())
      .take(limit)
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example News</title>
    <link>https://example.com</link>
    <item><title>First headline</title><link>https://example.com/1</link></item>
    <item><title>  Second headline  </title></item>
    <item><title></title></item>
    <item><title>Third headline</title></item>
  </channel>
</rss>"#;

  #[test]
  fn extracts_trimmed_nonempty_titles() {
    let titles = parse_feed_titles(FEED, 5).unwrap();
    assert_eq!(titles, vec!["First headline", "Second headline", "Third headline"]);
  }

  #[test]
  fn limit_caps_the_titles() {
    let titles = parse_feed_titles(FEED, 2).unwrap();
    assert_eq!(titles, vec!["First headline", "Second headline"]);
  }

  #[test]
  fn channel_without_items_yields_empty() {
    let xml = r#"<rss version="2.0"><channel><title>t</title></channel></rss>"#;
    assert!(parse_feed_titles(xml, 5).unwrap().is_empty());
  }

  #[test]
  fn malformed_xml_is_an_error() {
    assert!(parse_feed_titles("not xml at all", 5).is_err());
  }
}
