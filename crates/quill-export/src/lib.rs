//! Export renderers for Quill research results.
//!
//! Converts a slice of [`quill_core::keyword::KeywordResult`] into CSV,
//! Excel, or PDF byte buffers. Pure synchronous; no HTTP or database
//! dependencies. Every renderer produces a structurally valid file even for
//! an empty result list.

pub mod error;

mod csv;
mod excel;
mod pdf;

pub use error::{Error, Result};

use quill_core::keyword::KeywordResult;

// `self::` disambiguates the module from the csv crate itself.
pub use self::csv::to_csv;
pub use self::excel::to_excel;
pub use self::pdf::to_pdf;

/// The formats the export endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
  Csv,
  Excel,
  Pdf,
}

impl ExportFormat {
  /// Parse the URL path segment the API receives. Unknown formats return
  /// `None` so the handler can answer 400.
  pub fn from_path_segment(s: &str) -> Option<Self> {
    match s.to_ascii_lowercase().as_str() {
      "csv" => Some(Self::Csv),
      "excel" | "xlsx" => Some(Self::Excel),
      "pdf" => Some(Self::Pdf),
      _ => None,
    }
  }

  pub fn content_type(&self) -> &'static str {
    match self {
      Self::Csv => "text/csv",
      Self::Excel => {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
      }
      Self::Pdf => "application/pdf",
    }
  }

  pub fn file_name(&self) -> &'static str {
    match self {
      Self::Csv => "kdp_keywords.csv",
      Self::Excel => "kdp_keywords.xlsx",
      Self::Pdf => "kdp_keywords_report.pdf",
    }
  }

  /// Render `results` in this format.
  pub fn render(&self, results: &[KeywordResult]) -> Result<Vec<u8>> {
    match self {
      Self::Csv => to_csv(results),
      Self::Excel => to_excel(results),
      Self::Pdf => to_pdf(results),
    }
  }
}

// ─── Shared summary ──────────────────────────────────────────────────────────

/// Header statistics shared by the report renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
  pub total:                 usize,
  pub average_difficulty:    f64,
  pub average_profitability: f64,
  pub high_potential:        usize,
}

impl SummaryStats {
  pub fn from_results(results: &[KeywordResult]) -> Self {
    if results.is_empty() {
      return Self {
        total:                 0,
        average_difficulty:    0.0,
        average_profitability: 0.0,
        high_potential:        0,
      };
    }

    let n = results.len() as f64;
    Self {
      total:                 results.len(),
      average_difficulty:    results.iter().map(|r| r.difficulty).sum::<f64>() / n,
      average_profitability: results.iter().map(|r| r.profitability).sum::<f64>() / n,
      high_potential:        results.iter().filter(|r| r.profitability >= 70.0).count(),
    }
  }
}

#[cfg(test)]
pub(crate) mod test_helpers {
  use quill_core::keyword::{
    CompetingBook, CompetitionSummary, KeywordResult, KeywordSignals, TrendSummary,
  };

  /// A scored result with fully-populated signals for renderer tests.
  pub(crate) fn sample_result(keyword: &str, listings: u64, interest: f64) -> KeywordResult {
    KeywordResult::from_signals(
      keyword,
      KeywordSignals {
        expanded: vec![format!("{keyword} for beginners")],
        trends: TrendSummary {
          interest_over_time: vec![interest; 4],
          average_interest:   interest,
          related_top:        vec![format!("best {keyword}"), format!("{keyword} guide")],
          related_rising:     vec![format!("{keyword} 2024")],
        },
        competition: CompetitionSummary::from_listings(
          listings,
          vec![CompetingBook {
            title:         format!("The {keyword} Cookbook"),
            price:         Some(16.99),
            reviews_count: Some(412),
            rating:        Some(4.5),
            format:        Some("Paperback".into()),
          }],
        ),
      },
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use test_helpers::sample_result;

  #[test]
  fn format_parses_path_segments() {
    assert_eq!(ExportFormat::from_path_segment("csv"), Some(ExportFormat::Csv));
    assert_eq!(ExportFormat::from_path_segment("Excel"), Some(ExportFormat::Excel));
    assert_eq!(ExportFormat::from_path_segment("xlsx"), Some(ExportFormat::Excel));
    assert_eq!(ExportFormat::from_path_segment("pdf"), Some(ExportFormat::Pdf));
    assert_eq!(ExportFormat::from_path_segment("docx"), None);
  }

  #[test]
  fn summary_stats_on_empty_results() {
    let stats = SummaryStats::from_results(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.average_difficulty, 0.0);
    assert_eq!(stats.high_potential, 0);
  }

  #[test]
  fn summary_stats_average_over_results() {
    let results =
      vec![sample_result("a", 500, 80.0), sample_result("b", 500_000, 20.0)];
    let stats = SummaryStats::from_results(&results);
    assert_eq!(stats.total, 2);
    assert!(stats.average_difficulty > 0.0);
    assert!((0.0..=100.0).contains(&stats.average_profitability));
  }
}
