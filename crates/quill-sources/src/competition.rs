//! Amazon book-search competition probe.
//!
//! One search-results page per keyword; the listing count, prices, review
//! counts, and ratings are pulled out of the raw HTML with regular
//! expressions. This is a thin, best-effort scrape — when the page shape
//! drifts, the probe degrades to zeros rather than erroring.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use tracing::debug;

use quill_core::keyword::{CompetingBook, CompetitionSummary};

use crate::Result;

const SEARCH_URL: &str = "https://www.amazon.com/s";
/// How many competing listings to sample from the first page.
const MAX_BOOKS: usize = 10;

// "1-16 of over 50,000 results" or "1-16 of 834 results"
static RESULTS_OF: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)of\s+(?:over\s+)?([0-9,]+)\s+results").unwrap()
});
// bare "50,000 results" fallback
static RESULTS_BARE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)([0-9,]+)\s+results").unwrap());
static TITLE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"<span class="a-size-(?:medium|base-plus)[^"]*">([^<]{4,200})</span>"#).unwrap()
});
static PRICE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"class="a-offscreen">\$([0-9,]+(?:\.[0-9]{2})?)<"#).unwrap()
});
static RATING: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"([0-9](?:\.[0-9])?) out of 5 stars").unwrap());
static REVIEWS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"([0-9,]+)\s+ratings?").unwrap());

#[derive(Clone)]
pub struct CompetitionClient {
  client: Client,
}

impl CompetitionClient {
  pub fn new(client: Client) -> Self { Self { client } }

  /// Probe the book market for one keyword.
  pub async fn probe(&self, keyword: &str) -> Result<CompetitionSummary> {
    let body = self
      .client
      .get(SEARCH_URL)
      .query(&[("k", keyword), ("i", "stripbooks"), ("ref", "sr_pg_1")])
      .send()
      .await?
      .error_for_status()?
      .text()
      .await?;

    let summary = parse_search_page(&body);
    debug!(
      keyword,
      listings = summary.competing_listings,
      sampled = summary.top_books.len(),
      "competition probed"
    );
    Ok(summary)
  }
}

/// Extract the listing count and a sample of competing books from a raw
/// search-results page.
pub fn parse_search_page(html: &str) -> CompetitionSummary {
  let competing_listings = extract_results_count(html);

  let titles: Vec<String> = TITLE
    .captures_iter(html)
    .map(|c| c[1].trim().to_string())
    .take(MAX_BOOKS)
    .collect();
  let prices: Vec<f64> =
    PRICE.captures_iter(html).filter_map(|c| parse_number(&c[1])).collect();
  let ratings: Vec<f64> =
    RATING.captures_iter(html).filter_map(|c| c[1].parse().ok()).collect();
  let reviews: Vec<u64> = REVIEWS
    .captures_iter(html)
    .filter_map(|c| c[1].replace(',', "").parse().ok())
    .collect();

  // Pair the sampled fields positionally; later listings just lack the
  // field when a regex found fewer matches.
  let books: Vec<CompetingBook> = titles
    .into_iter()
    .enumerate()
    .map(|(i, title)| CompetingBook {
      title,
      price:         prices.get(i).copied(),
      reviews_count: reviews.get(i).copied(),
      rating:        ratings.get(i).copied(),
      format:        None,
    })
    .collect();

  CompetitionSummary::from_listings(competing_listings, books)
}

fn extract_results_count(html: &str) -> u64 {
  let capture = RESULTS_OF
    .captures(html)
    .or_else(|| RESULTS_BARE.captures(html));
  capture
    .and_then(|c| c[1].replace(',', "").parse().ok())
    .unwrap_or(0)
}

fn parse_number(s: &str) -> Option<f64> { s.replace(',', "").parse().ok() }
