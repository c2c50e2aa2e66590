//! Keyword result types — the unit of everything Quill stores and serves.
//!
//! A [`KeywordResult`] is assembled per seed keyword from the raw
//! [`KeywordSignals`] a source gathered, plus the two heuristic scores
//! computed over them. Results are immutable once assembled; sessions hold
//! them as an opaque list.

use serde::{Deserialize, Serialize};

use crate::score::{self, ScoreBand};

// ─── Trends ──────────────────────────────────────────────────────────────────

/// Search-interest signals for one keyword, typically over a trailing year.
/// All fields degrade to empty/zero when the upstream source fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
  /// Normalised interest values (0–100 per point) over the sampled window.
  pub interest_over_time: Vec<f64>,
  pub average_interest:   f64,
  /// Most-searched related queries.
  pub related_top:        Vec<String>,
  /// Fastest-growing related queries.
  pub related_rising:     Vec<String>,
}

// ─── Competition ─────────────────────────────────────────────────────────────

/// Coarse competition tier derived from the competing listing count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLevel {
  None,
  Low,
  Medium,
  High,
  VeryHigh,
}

impl CompetitionLevel {
  /// Tier thresholds match the competition component of the difficulty
  /// score so the two never disagree in a report.
  pub fn from_listing_count(count: u64) -> Self {
    match count {
      0 => Self::None,
      c if c < 1_000 => Self::Low,
      c if c < 10_000 => Self::Medium,
      c if c < 50_000 => Self::High,
      _ => Self::VeryHigh,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::None => "No competition",
      Self::Low => "Low competition",
      Self::Medium => "Medium competition",
      Self::High => "High competition",
      Self::VeryHigh => "Very high competition",
    }
  }
}

impl Default for CompetitionLevel {
  fn default() -> Self { Self::None }
}

/// One competing listing surfaced by the market probe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetingBook {
  pub title:         String,
  pub price:         Option<f64>,
  pub reviews_count: Option<u64>,
  pub rating:        Option<f64>,
  pub format:        Option<String>,
}

/// Aggregated market-competition signals for one keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitionSummary {
  pub competing_listings: u64,
  /// A sample of the top competing listings (capped upstream).
  pub top_books:          Vec<CompetingBook>,
  /// Mean price over listings with a known price; 0 when unknown.
  pub average_price:      f64,
  /// Mean review count over listings with reviews; 0 when unknown.
  pub average_reviews:    f64,
  /// Genre buckets guessed from the sampled titles.
  pub categories:         Vec<String>,
  pub level:              CompetitionLevel,
}

impl CompetitionSummary {
  /// Build a summary from a listing count and sampled books, deriving the
  /// averages, categories, and tier.
  pub fn from_listings(competing_listings: u64, top_books: Vec<CompetingBook>) -> Self {
    let prices: Vec<f64> = top_books.iter().filter_map(|b| b.price).filter(|p| *p > 0.0).collect();
    let average_price = if prices.is_empty() {
      0.0
    } else {
      prices.iter().sum::<f64>() / prices.len() as f64
    };

    let reviews: Vec<u64> =
      top_books.iter().filter_map(|b| b.reviews_count).filter(|r| *r > 0).collect();
    let average_reviews = if reviews.is_empty() {
      0.0
    } else {
      reviews.iter().sum::<u64>() as f64 / reviews.len() as f64
    };

    let titles: Vec<&str> = top_books.iter().map(|b| b.title.as_str()).collect();
    let categories = crate::nlp::book_categories(&titles);

    Self {
      competing_listings,
      top_books,
      average_price,
      average_reviews,
      categories,
      level: CompetitionLevel::from_listing_count(competing_listings),
    }
  }
}

// ─── Signals ─────────────────────────────────────────────────────────────────

/// Everything a [`crate::source::SignalSource`] gathered for one keyword,
/// before scoring. Each field independently degrades to its default when
/// the corresponding upstream call fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSignals {
  /// Suggestion-endpoint expansions of the seed keyword.
  pub expanded:    Vec<String>,
  pub trends:      TrendSummary,
  pub competition: CompetitionSummary,
}

// ─── KeywordResult ───────────────────────────────────────────────────────────

/// The scored record for one seed keyword — what sessions persist and the
/// API returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordResult {
  pub keyword:       String,
  pub expanded:      Vec<String>,
  pub trends:        TrendSummary,
  pub competition:   CompetitionSummary,
  pub difficulty:    f64,
  pub profitability: f64,
  pub band:          ScoreBand,
}

impl KeywordResult {
  /// Score the gathered signals. Deterministic: identical signals always
  /// produce identical scores.
  pub fn from_signals(keyword: impl Into<String>, signals: KeywordSignals) -> Self {
    let KeywordSignals { expanded, trends, competition } = signals;

    let difficulty = score::difficulty_score(
      competition.competing_listings,
      &trends.interest_over_time,
    );
    let profitability = score::profitability_score(
      difficulty,
      trends.average_interest,
      competition.average_price,
    );

    Self {
      keyword: keyword.into(),
      expanded,
      trends,
      competition,
      difficulty,
      profitability,
      band: ScoreBand::from_score(profitability),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn competition_level_tiers() {
    assert_eq!(CompetitionLevel::from_listing_count(0), CompetitionLevel::None);
    assert_eq!(CompetitionLevel::from_listing_count(999), CompetitionLevel::Low);
    assert_eq!(CompetitionLevel::from_listing_count(9_999), CompetitionLevel::Medium);
    assert_eq!(CompetitionLevel::from_listing_count(49_999), CompetitionLevel::High);
    assert_eq!(CompetitionLevel::from_listing_count(200_000), CompetitionLevel::VeryHigh);
  }

  #[test]
  fn competition_summary_averages_skip_unknowns() {
    let books = vec![
      CompetingBook { title: "A".into(), price: Some(12.0), reviews_count: Some(100), ..Default::default() },
      CompetingBook { title: "B".into(), price: None, reviews_count: Some(300), ..Default::default() },
      CompetingBook { title: "C".into(), price: Some(18.0), reviews_count: None, ..Default::default() },
    ];
    let summary = CompetitionSummary::from_listings(5_000, books);
    assert_eq!(summary.average_price, 15.0);
    assert_eq!(summary.average_reviews, 200.0);
    assert_eq!(summary.level, CompetitionLevel::Medium);
  }

  #[test]
  fn from_signals_is_deterministic() {
    let signals = KeywordSignals {
      expanded: vec!["vegan cookbook for beginners".into()],
      trends: TrendSummary {
        interest_over_time: vec![40.0, 55.0, 61.0],
        average_interest:   52.0,
        ..Default::default()
      },
      competition: CompetitionSummary::from_listings(12_000, vec![]),
    };

    let a = KeywordResult::from_signals("vegan cookbook", signals.clone());
    let b = KeywordResult::from_signals("vegan cookbook", signals);
    assert_eq!(a, b);
  }
}
