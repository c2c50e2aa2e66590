//! Google Trends client.
//!
//! The unofficial trends API is a two-step dance: `explore` hands back a set
//! of widgets with per-widget tokens, then `widgetdata/*` endpoints accept
//! the widget's own request object plus its token. Every response is
//! prefixed with an anti-JSON garbage sequence (`)]}'`) that must be
//! stripped before parsing.

use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use quill_core::keyword::TrendSummary;

use crate::{Error, Result, feeds};

const EXPLORE_URL: &str = "https://trends.google.com/trends/api/explore";
const MULTILINE_URL: &str = "https://trends.google.com/trends/api/widgetdata/multiline";
const RELATED_URL: &str =
  "https://trends.google.com/trends/api/widgetdata/relatedsearches";
const DAILY_RSS_URL: &str = "https://trends.google.com/trending/rss";

/// Trailing-year window, matching the original research horizon.
const TIMEFRAME: &str = "today 12-m";
const HL: &str = "en-US";
const TZ: &str = "360";

const MAX_RELATED: usize = 10;
const MAX_DAILY_TOPICS: usize = 10;

#[derive(Clone)]
pub struct TrendsClient {
  client: Client,
  geo:    String,
}

/// One widget handed back by `explore`: its data endpoint id, access token,
/// and the request object to echo back.
#[derive(Debug)]
struct Widget {
  id:      String,
  token:   String,
  request: Value,
}

impl TrendsClient {
  pub fn new(client: Client, geo: impl Into<String>) -> Self {
    Self { client, geo: geo.into() }
  }

  /// Interest-over-time plus related queries for one keyword.
  pub async fn keyword_trends(&self, keyword: &str) -> Result<TrendSummary> {
    let widgets = self.explore(keyword).await?;
    let mut summary = TrendSummary::default();

    if let Some(w) = widgets.iter().find(|w| w.id == "TIMESERIES") {
      let body = self.widget_data(MULTILINE_URL, w).await?;
      summary.interest_over_time = parse_timeline(&body)?;
      if !summary.interest_over_time.is_empty() {
        summary.average_interest = summary.interest_over_time.iter().sum::<f64>()
          / summary.interest_over_time.len() as f64;
      }
    }

    if let Some(w) = widgets.iter().find(|w| w.id == "RELATED_QUERIES") {
      let body = self.widget_data(RELATED_URL, w).await?;
      let (top, rising) = parse_related(&body)?;
      summary.related_top = top;
      summary.related_rising = rising;
    }

    debug!(
      keyword,
      points = summary.interest_over_time.len(),
      related = summary.related_top.len(),
      "trends gathered"
    );
    Ok(summary)
  }

  /// Today's trending searches from the public daily RSS.
  pub async fn daily_trending(&self) -> Result<Vec<String>> {
    let url = format!("{DAILY_RSS_URL}?geo={}", self.geo);
    feeds::fetch_feed_titles(&self.client, &url, MAX_DAILY_TOPICS).await
  }

  async fn explore(&self, keyword: &str) -> Result<Vec<Widget>> {
    let req = json!({
      "comparisonItem": [{ "keyword": keyword, "geo": self.geo, "time": TIMEFRAME }],
      "category": 0,
      "property": "",
    });

    let body = self
      .client
      .get(EXPLORE_URL)
      .query(&[("hl", HL), ("tz", TZ), ("req", &req.to_string())])
      .send()
      .await?
      .error_for_status()?
      .text()
      .await?;

    parse_widgets(&body)
  }

  async fn widget_data(&self, url: &str, widget: &Widget) -> Result<String> {
    Ok(
      self
        .client
        .get(url)
        .query(&[
          ("hl", HL),
          ("tz", TZ),
          ("req", widget.request.to_string().as_str()),
          ("token", widget.token.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?,
    )
  }
}

// ─── Payload parsing ─────────────────────────────────────────────────────────

/// Drop the `)]}'`-style prefix Google puts before the JSON body.
fn strip_antijson_prefix(body: &str) -> &str {
  match body.find(['{', '[']) {
    Some(pos) => &body[pos..],
    None => body,
  }
}

fn parse_widgets(body: &str) -> Result<Vec<Widget>> {
  let value: Value = serde_json::from_str(strip_antijson_prefix(body))?;
  let widgets = value
    .get("widgets")
    .and_then(|w| w.as_array())
    .ok_or_else(|| Error::UnexpectedPayload {
      endpoint: "trends explore",
      detail:   "missing widgets array".to_string(),
    })?;

  Ok(
    widgets
      .iter()
      .filter_map(|w| {
        Some(Widget {
          id:      w.get("id")?.as_str()?.to_string(),
          token:   w.get("token")?.as_str()?.to_string(),
          request: w.get("request")?.clone(),
        })
      })
      .collect(),
  )
}

fn parse_timeline(body: &str) -> Result<Vec<f64>> {
  let value: Value = serde_json::from_str(strip_antijson_prefix(body))?;
  let points = value
    .pointer("/default/timelineData")
    .and_then(|v| v.as_array())
    .ok_or_else(|| Error::UnexpectedPayload {
      endpoint: "trends multiline",
      detail:   "missing timelineData".to_string(),
    })?;

  Ok(
    points
      .iter()
      .filter_map(|p| p.pointer("/value/0").and_then(Value::as_f64))
      .collect(),
  )
}

/// Returns `(top, rising)` related query lists.
fn parse_related(body: &str) -> Result<(Vec<String>, Vec<String>)> {
  let value: Value = serde_json::from_str(strip_antijson_prefix(body))?;
  let ranked = value
    .pointer("/default/rankedList")
    .and_then(|v| v.as_array())
    .ok_or_else(|| Error::UnexpectedPayload {
      endpoint: "trends relatedsearches",
      detail:   "missing rankedList".to_string(),
    })?;

  let queries_at = |idx: usize| -> Vec<String> {
    ranked
      .get(idx)
      .and_then(|l| l.pointer("/rankedKeyword"))
      .and_then(|v| v.as_array())
      .map(|items| {
        items
          .iter()
          .filter_map(|i| i.pointer("/query").and_then(Value::as_str))
          .map(str::to_owned)
          .take(MAX_RELATED)
          .collect()
      })
      .unwrap_or_default()
  };

  Ok((queries_at(0), queries_at(1)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_the_garbage_prefix() {
    assert_eq!(strip_antijson_prefix(")]}'\n{\"a\":1}"), "{\"a\":1}");
    assert_eq!(strip_antijson_prefix("{\"a\":1}"), "{\"a\":1}");
    assert_eq!(strip_antijson_prefix(")]}',\n[1,2]"), "[1,2]");
  }

  #[test]
  fn parses_explore_widgets() {
    let body = r#")]}'
{"widgets":[
  {"id":"TIMESERIES","token":"tok-a","request":{"time":"today 12-m"}},
  {"id":"RELATED_QUERIES","token":"tok-b","request":{}},
  {"id":"GEO_MAP","request":{}}
]}"#;
    let widgets = parse_widgets(body).unwrap();
    // the token-less widget is skipped
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].id, "TIMESERIES");
    assert_eq!(widgets[0].token, "tok-a");
  }

  #[test]
  fn explore_without_widgets_is_a_payload_error() {
    let err = parse_widgets(")]}'\n{}").unwrap_err();
    assert!(matches!(err, Error::UnexpectedPayload { .. }));
  }

  #[test]
  fn parses_timeline_values() {
    let body = r#")]}',
{"default":{"timelineData":[
  {"time":"1","value":[42]},
  {"time":"2","value":[0]},
  {"time":"3","value":[88]}
]}}"#;
    assert_eq!(parse_timeline(body).unwrap(), vec![42.0, 0.0, 88.0]);
  }

  #[test]
  fn parses_related_top_and_rising() {
    let body = r#")]}'
{"default":{"rankedList":[
  {"rankedKeyword":[{"query":"knitting patterns"},{"query":"easy knitting"}]},
  {"rankedKeyword":[{"query":"chunky knitting"}]}
]}}"#;
    let (top, rising) = parse_related(body).unwrap();
    assert_eq!(top, vec!["knitting patterns", "easy knitting"]);
    assert_eq!(rising, vec!["chunky knitting"]);
  }
}
