//! Difficulty and profitability scoring.
//!
//! Both scores are pure weighted combinations of normalised inputs, bounded
//! to `[0, 100]`. The coefficients live here as consts; they are heuristic,
//! not learned, and the single place to tune them.

use serde::{Deserialize, Serialize};

// Weights of the profitability combination.
const DIFFICULTY_WEIGHT: f64 = 0.4;
const INTEREST_WEIGHT: f64 = 0.4;
const PRICE_WEIGHT: f64 = 0.2;

/// Maximum contribution of search interest to difficulty.
const INTEREST_DIFFICULTY_CAP: f64 = 20.0;

// ─── Difficulty ──────────────────────────────────────────────────────────────

/// Difficulty score in `[0, 100]`: competition tier from the competing
/// listing count plus a capped interest factor. An empty interest series
/// contributes nothing.
pub fn difficulty_score(competing_listings: u64, interest_series: &[f64]) -> f64 {
  let competition = competition_tier(competing_listings);

  let interest_factor = if interest_series.is_empty() {
    0.0
  } else {
    let mean = interest_series.iter().map(|v| sanitize(*v)).sum::<f64>()
      / interest_series.len() as f64;
    (mean / 100.0 * INTEREST_DIFFICULTY_CAP).min(INTEREST_DIFFICULTY_CAP)
  };

  round2((competition + interest_factor).min(100.0))
}

/// Logarithmic-ish tiers over the listing count. The tier boundaries match
/// [`crate::keyword::CompetitionLevel`].
fn competition_tier(count: u64) -> f64 {
  match count {
    0 => 0.0,
    c if c < 1_000 => 10.0,
    c if c < 10_000 => 30.0,
    c if c < 50_000 => 60.0,
    c if c < 100_000 => 80.0,
    _ => 100.0,
  }
}

// ─── Profitability ───────────────────────────────────────────────────────────

/// Profitability score in `[0, 100]`: low difficulty, strong interest, and
/// a market price near the $10–30 sweet spot all raise it. Zero interest
/// zeroes the interest term; an unknown (zero) price gets a neutral factor.
pub fn profitability_score(difficulty: f64, average_interest: f64, average_price: f64) -> f64 {
  let difficulty_factor = 100.0 - sanitize(difficulty).min(100.0);
  let interest_factor = sanitize(average_interest).min(100.0);
  let price = price_factor(sanitize(average_price));

  round2(
    difficulty_factor * DIFFICULTY_WEIGHT
      + interest_factor * INTEREST_WEIGHT
      + price * PRICE_WEIGHT,
  )
}

fn price_factor(avg_price: f64) -> f64 {
  if avg_price == 0.0 {
    50.0 // unknown price, neutral
  } else if (10.0..=30.0).contains(&avg_price) {
    100.0
  } else if (5.0..10.0).contains(&avg_price) {
    80.0
  } else if avg_price > 30.0 && avg_price <= 50.0 {
    70.0
  } else if avg_price < 5.0 {
    40.0
  } else {
    30.0
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Replace non-finite or negative input with zero rather than letting it
/// poison a score.
fn sanitize(v: f64) -> f64 {
  if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

fn round2(v: f64) -> f64 { (v * 100.0).round() / 100.0 }

// ─── ScoreBand ───────────────────────────────────────────────────────────────

/// Coarse band for score visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
  High,
  Medium,
  Low,
  Poor,
}

impl ScoreBand {
  pub fn from_score(score: f64) -> Self {
    if score >= 80.0 {
      Self::High
    } else if score >= 60.0 {
      Self::Medium
    } else if score >= 40.0 {
      Self::Low
    } else {
      Self::Poor
    }
  }

  /// CSS class used by the frontend charting layer.
  pub fn css_class(&self) -> &'static str {
    match self {
      Self::High => "success",
      Self::Medium => "warning",
      Self::Low => "info",
      Self::Poor => "danger",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn difficulty_stays_in_bounds() {
    for count in [0u64, 1, 999, 1_000, 9_999, 50_000, 99_999, 10_000_000] {
      for series in [vec![], vec![0.0], vec![100.0; 52], vec![f64::NAN, -3.0, 200.0]] {
        let d = difficulty_score(count, &series);
        assert!((0.0..=100.0).contains(&d), "difficulty {d} out of bounds");
      }
    }
  }

  #[test]
  fn difficulty_tiers_follow_listing_count() {
    assert_eq!(difficulty_score(0, &[]), 0.0);
    assert_eq!(difficulty_score(500, &[]), 10.0);
    assert_eq!(difficulty_score(5_000, &[]), 30.0);
    assert_eq!(difficulty_score(20_000, &[]), 60.0);
    assert_eq!(difficulty_score(75_000, &[]), 80.0);
    assert_eq!(difficulty_score(500_000, &[]), 100.0);
  }

  #[test]
  fn interest_raises_difficulty_up_to_cap() {
    let flat = difficulty_score(5_000, &[]);
    let busy = difficulty_score(5_000, &[100.0, 100.0, 100.0]);
    assert_eq!(busy, flat + INTEREST_DIFFICULTY_CAP);

    // saturated at the cap even for absurd interest values
    assert_eq!(difficulty_score(5_000, &[1_000.0]), busy);
  }

  #[test]
  fn profitability_stays_in_bounds() {
    for d in [0.0, 50.0, 100.0, f64::NAN, -10.0] {
      for i in [0.0, 50.0, 100.0, 400.0, f64::INFINITY] {
        for p in [0.0, 4.0, 7.5, 15.0, 40.0, 90.0, -2.0] {
          let s = profitability_score(d, i, p);
          assert!((0.0..=100.0).contains(&s), "profitability {s} out of bounds");
        }
      }
    }
  }

  #[test]
  fn zero_interest_yields_minimum_interest_term() {
    // Same difficulty and price, interest 0 vs 100: the delta is exactly
    // the interest weight.
    let none = profitability_score(50.0, 0.0, 0.0);
    let full = profitability_score(50.0, 100.0, 0.0);
    assert_eq!(full - none, 100.0 * INTEREST_WEIGHT);
  }

  #[test]
  fn price_sweet_spot_scores_highest() {
    let sweet = profitability_score(50.0, 50.0, 19.99);
    for other in [3.0, 7.0, 45.0, 80.0] {
      assert!(sweet > profitability_score(50.0, 50.0, other));
    }
  }

  #[test]
  fn scoring_is_deterministic() {
    let series: Vec<f64> = (0..52).map(|i| (i % 10) as f64 * 7.0).collect();
    let a = difficulty_score(42_000, &series);
    let b = difficulty_score(42_000, &series);
    assert_eq!(a, b);
    assert_eq!(
      profitability_score(a, 61.0, 14.99),
      profitability_score(b, 61.0, 14.99)
    );
  }

  #[test]
  fn band_thresholds() {
    assert_eq!(ScoreBand::from_score(93.0), ScoreBand::High);
    assert_eq!(ScoreBand::from_score(80.0), ScoreBand::High);
    assert_eq!(ScoreBand::from_score(79.99), ScoreBand::Medium);
    assert_eq!(ScoreBand::from_score(60.0), ScoreBand::Medium);
    assert_eq!(ScoreBand::from_score(40.0), ScoreBand::Low);
    assert_eq!(ScoreBand::from_score(12.0), ScoreBand::Poor);
  }
}
