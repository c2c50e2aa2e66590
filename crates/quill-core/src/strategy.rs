//! Strategy recommendation over a set of scored results.
//!
//! Buckets keywords into opportunity classes and emits the summary lines
//! used by the API and the PDF report. Thresholds are heuristic consts.

use serde::{Deserialize, Serialize};

use crate::keyword::KeywordResult;

/// Profitability at or above this, with difficulty at or below
/// [`HIGH_POTENTIAL_MAX_DIFFICULTY`], marks a high-potential keyword.
const HIGH_POTENTIAL_MIN_PROFITABILITY: f64 = 70.0;
const HIGH_POTENTIAL_MAX_DIFFICULTY: f64 = 60.0;
/// Difficulty at or above this marks a keyword to avoid.
const AVOID_MIN_DIFFICULTY: f64 = 80.0;
const LONG_TAIL_MIN_WORDS: usize = 3;
const LONG_TAIL_MAX_DIFFICULTY: f64 = 50.0;
const NICHE_MAX_LISTINGS: u64 = 1_000;
const NICHE_MIN_PROFITABILITY: f64 = 40.0;

// ─── Report types ────────────────────────────────────────────────────────────

/// One keyword cited in a strategy bucket, with the numbers that put it
/// there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
  pub keyword:       String,
  pub difficulty:    f64,
  pub profitability: f64,
}

impl Opportunity {
  fn from_result(r: &KeywordResult) -> Self {
    Self {
      keyword:       r.keyword.clone(),
      difficulty:    r.difficulty,
      profitability: r.profitability,
    }
  }
}

/// The strategy view over one session's results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
  pub high_potential: Vec<Opportunity>,
  pub avoid:          Vec<Opportunity>,
  pub long_tail:      Vec<Opportunity>,
  pub niche:          Vec<Opportunity>,
  pub tips:           Vec<String>,
}

// ─── Recommendation ──────────────────────────────────────────────────────────

/// Classify each result into at most one bucket (first match wins) and
/// derive strategy tips from the bucket sizes.
pub fn recommend_strategy(results: &[KeywordResult]) -> StrategyReport {
  let mut report = StrategyReport::default();

  for r in results {
    let words = r.keyword.split_whitespace().count();

    if r.profitability >= HIGH_POTENTIAL_MIN_PROFITABILITY
      && r.difficulty <= HIGH_POTENTIAL_MAX_DIFFICULTY
    {
      report.high_potential.push(Opportunity::from_result(r));
    } else if r.difficulty >= AVOID_MIN_DIFFICULTY {
      report.avoid.push(Opportunity::from_result(r));
    } else if words >= LONG_TAIL_MIN_WORDS && r.difficulty <= LONG_TAIL_MAX_DIFFICULTY {
      report.long_tail.push(Opportunity::from_result(r));
    } else if r.competition.competing_listings < NICHE_MAX_LISTINGS
      && r.profitability >= NICHE_MIN_PROFITABILITY
    {
      report.niche.push(Opportunity::from_result(r));
    }
  }

  if !report.high_potential.is_empty() {
    report.tips.push(format!(
      "Focus on {} high-potential keywords identified",
      report.high_potential.len()
    ));
  }
  if !report.long_tail.is_empty() {
    report.tips.push(format!(
      "Consider {} long-tail keywords for specific niches",
      report.long_tail.len()
    ));
  }
  if report.avoid.len() * 2 > results.len() {
    report.tips.push(
      "Many keywords are highly competitive - consider more specific, long-tail variations"
        .to_string(),
    );
  }
  if !report.niche.is_empty() {
    report.tips.push(format!(
      "Explore {} niche opportunities with low competition",
      report.niche.len()
    ));
  }

  report
}

/// One-line market read for report headers.
pub fn strategy_headline(results: &[KeywordResult]) -> String {
  if results.is_empty() {
    return "No data available".to_string();
  }

  let high_potential = results
    .iter()
    .filter(|r| r.profitability >= HIGH_POTENTIAL_MIN_PROFITABILITY)
    .count();
  let high_competition =
    results.iter().filter(|r| r.difficulty >= AVOID_MIN_DIFFICULTY).count();

  if high_potential as f64 > results.len() as f64 * 0.3 {
    "Strong opportunities identified - focus on high-potential keywords".to_string()
  } else if high_competition as f64 > results.len() as f64 * 0.5 {
    "High competition market - consider long-tail variations".to_string()
  } else {
    "Mixed opportunities - diversify keyword strategy".to_string()
  }
}

/// Bullet-point recommendations for the detailed report section.
pub fn recommendation_lines(results: &[KeywordResult]) -> Vec<String> {
  if results.is_empty() {
    return vec![
      "No recommendations available - please analyze some keywords first.".to_string(),
    ];
  }

  let mut lines = Vec::new();

  let avg_difficulty =
    results.iter().map(|r| r.difficulty).sum::<f64>() / results.len() as f64;
  if avg_difficulty > 70.0 {
    lines.push(
      "Consider targeting more specific, long-tail keyword variations to reduce competition."
        .to_string(),
    );
  }

  let high_profit = results
    .iter()
    .filter(|r| r.profitability >= HIGH_POTENTIAL_MIN_PROFITABILITY)
    .count();
  if high_profit > 0 {
    lines.push(format!(
      "Focus your content creation on the {high_profit} high-profitability keywords identified."
    ));
  }

  let prices: Vec<f64> = results
    .iter()
    .map(|r| r.competition.average_price)
    .filter(|p| *p > 0.0)
    .collect();
  if !prices.is_empty() {
    let avg_price = prices.iter().sum::<f64>() / prices.len() as f64;
    if avg_price < 10.0 {
      lines.push(
        "Consider premium pricing strategies as the market shows low average prices.".to_string(),
      );
    } else if avg_price > 30.0 {
      lines.push(
        "Market shows high price tolerance - consider comprehensive, high-value content."
          .to_string(),
      );
    }
  }

  let low_competition = results
    .iter()
    .filter(|r| r.competition.competing_listings < NICHE_MAX_LISTINGS)
    .count();
  if low_competition > 0 {
    lines.push(format!(
      "{low_competition} keywords show low competition - prioritize these for quick market entry."
    ));
  }

  let high_interest =
    results.iter().filter(|r| r.trends.average_interest > 50.0).count();
  if high_interest > 0 {
    lines.push(format!(
      "{high_interest} keywords show strong search interest - time-sensitive opportunities."
    ));
  }

  if lines.is_empty() {
    lines.push("Continue researching to find more targeted keyword opportunities.".to_string());
    lines.push(
      "Consider expanding your keyword list with more specific, niche terms.".to_string(),
    );
  }

  lines
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::keyword::{CompetitionSummary, KeywordResult, KeywordSignals, TrendSummary};

  fn result(keyword: &str, listings: u64, interest: f64, price: f64) -> KeywordResult {
    let mut books = Vec::new();
    if price > 0.0 {
      books.push(crate::keyword::CompetingBook {
        title: "sample".into(),
        price: Some(price),
        ..Default::default()
      });
    }
    KeywordResult::from_signals(
      keyword,
      KeywordSignals {
        expanded: Vec::new(),
        trends: TrendSummary {
          interest_over_time: vec![interest],
          average_interest:   interest,
          ..Default::default()
        },
        competition: CompetitionSummary::from_listings(listings, books),
      },
    )
  }

  #[test]
  fn buckets_are_mutually_exclusive() {
    let results = vec![
      result("journal prompts", 500, 80.0, 14.99), // high potential
      result("romance", 2_000_000, 95.0, 9.99),    // avoid
      result("left handed crochet patterns", 5_000, 10.0, 12.0), // long tail
    ];
    let report = recommend_strategy(&results);

    let cited = report.high_potential.len()
      + report.avoid.len()
      + report.long_tail.len()
      + report.niche.len();
    assert!(cited <= results.len());
    assert_eq!(report.high_potential.len(), 1);
    assert_eq!(report.avoid.len(), 1);
    assert_eq!(report.long_tail.len(), 1);
  }

  #[test]
  fn tips_reflect_bucket_sizes() {
    let results = vec![result("journal prompts", 500, 80.0, 14.99)];
    let report = recommend_strategy(&results);
    assert!(report.tips.iter().any(|t| t.contains("high-potential")));
  }

  #[test]
  fn headline_on_empty_results() {
    assert_eq!(strategy_headline(&[]), "No data available");
  }

  #[test]
  fn recommendation_lines_never_empty() {
    assert!(!recommendation_lines(&[]).is_empty());
    let results = vec![result("mid keyword", 30_000, 30.0, 20.0)];
    assert!(!recommendation_lines(&results).is_empty());
  }
}
