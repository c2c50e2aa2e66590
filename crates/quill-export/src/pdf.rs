//! PDF report renderer.
//!
//! A4 pages, built-in Helvetica for prose and Courier for the fixed-width
//! detail table. The layout is a simple top-down cursor with page breaks;
//! nothing here measures text.

use chrono::Utc;
use printpdf::{
  BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
  PdfLayerReference,
};

use quill_core::{keyword::KeywordResult, strategy};

use crate::{Result, SummaryStats};

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN_LEFT: f64 = 18.0;
const MARGIN_BOTTOM: f64 = 20.0;
const TOP_START: f64 = 277.0;

/// Detail-table rows are capped to keep the report readable.
const MAX_TABLE_ROWS: usize = 20;
const MAX_OPPORTUNITIES: usize = 5;
/// Long keywords are truncated in the table column.
const KEYWORD_COLUMN_WIDTH: usize = 30;

// ─── Page cursor ─────────────────────────────────────────────────────────────

struct ReportWriter {
  doc:     PdfDocumentReference,
  layer:   PdfLayerReference,
  regular: IndirectFontRef,
  bold:    IndirectFontRef,
  mono:    IndirectFontRef,
  y:       f64,
}

impl ReportWriter {
  fn new(title: &str) -> Result<Self> {
    let (doc, page, layer) =
      PdfDocument::new(title, Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let mono = doc.add_builtin_font(BuiltinFont::Courier)?;
    let layer = doc.get_page(page).get_layer(layer);

    Ok(Self { doc, layer, regular, bold, mono, y: TOP_START })
  }

  /// Start a fresh page when fewer than `needed` millimetres remain.
  fn ensure_space(&mut self, needed: f64) {
    if self.y - needed < MARGIN_BOTTOM {
      let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");
      self.layer = self.doc.get_page(page).get_layer(layer);
      self.y = TOP_START;
    }
  }

  fn write(&mut self, text: &str, size: f64, font: Font) {
    let step = size * 0.55;
    self.ensure_space(step);
    let font_ref = match font {
      Font::Regular => &self.regular,
      Font::Bold => &self.bold,
      Font::Mono => &self.mono,
    };
    self
      .layer
      .use_text(text, size as f32, Mm(MARGIN_LEFT as f32), Mm(self.y as f32), font_ref);
    self.y -= step;
  }

  fn heading(&mut self, text: &str) {
    self.space(4.0);
    self.write(text, 14.0, Font::Bold);
    self.space(1.5);
  }

  fn paragraph_line(&mut self, text: &str) { self.write(text, 10.0, Font::Regular); }

  fn table_line(&mut self, text: &str) { self.write(text, 8.5, Font::Mono); }

  fn space(&mut self, mm: f64) { self.y -= mm; }

  fn finish(self) -> Result<Vec<u8>> { Ok(self.doc.save_to_bytes()?) }
}

#[derive(Clone, Copy)]
enum Font {
  Regular,
  Bold,
  Mono,
}

// ─── Report assembly ─────────────────────────────────────────────────────────

pub fn to_pdf(results: &[KeywordResult]) -> Result<Vec<u8>> {
  let mut w = ReportWriter::new("KDP Keyword Research Report")?;

  w.write("KDP Keyword Research Report", 20.0, Font::Bold);
  w.space(4.0);

  w.paragraph_line(&format!("Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S")));
  w.paragraph_line(&format!("Total Keywords Analyzed: {}", results.len()));
  w.paragraph_line("Report Type: Comprehensive Keyword Analysis");

  if !results.is_empty() {
    let stats = SummaryStats::from_results(results);
    w.heading("Summary Statistics");
    w.paragraph_line(&format!(
      "Average Difficulty Score: {:.1}/100",
      stats.average_difficulty
    ));
    w.paragraph_line(&format!(
      "Average Profitability Score: {:.1}/100",
      stats.average_profitability
    ));
    w.paragraph_line(&format!("High Potential Keywords: {}", stats.high_potential));
    w.paragraph_line(&format!(
      "Recommended Focus: {}",
      strategy::strategy_headline(results)
    ));
  }

  w.heading("Detailed Keyword Analysis");
  w.table_line(&format!(
    "{:<kw$} {:>10} {:>13} {:<22} {:>9}",
    "Keyword",
    "Difficulty",
    "Profitability",
    "Competition",
    "Avg Price",
    kw = KEYWORD_COLUMN_WIDTH,
  ));
  for r in results.iter().take(MAX_TABLE_ROWS) {
    w.table_line(&format!(
      "{:<kw$} {:>10.1} {:>13.1} {:<22} {:>9}",
      truncate(&r.keyword, KEYWORD_COLUMN_WIDTH),
      r.difficulty,
      r.profitability,
      r.competition.level.label(),
      format!("${:.2}", r.competition.average_price),
      kw = KEYWORD_COLUMN_WIDTH,
    ));
  }
  if results.is_empty() {
    w.paragraph_line("No keywords analyzed.");
  }

  let report = strategy::recommend_strategy(results);
  if !report.high_potential.is_empty() {
    w.heading("Top Opportunities");
    for opp in report.high_potential.iter().take(MAX_OPPORTUNITIES) {
      w.paragraph_line(&format!(
        "{} - Profitability: {:.1}/100 | Difficulty: {:.1}/100",
        opp.keyword, opp.profitability, opp.difficulty
      ));
    }
  }

  w.heading("Recommendations");
  for line in strategy::recommendation_lines(results) {
    w.paragraph_line(&format!("- {line}"));
  }

  w.finish()
}

fn truncate(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    s.chars().take(max).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_helpers::sample_result;

  #[test]
  fn empty_results_produce_a_valid_pdf() {
    let bytes = to_pdf(&[]).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
  }

  #[test]
  fn populated_report_is_larger_and_valid() {
    let empty = to_pdf(&[]).unwrap();
    let results: Vec<_> = (0u64..30)
      .map(|i| sample_result(&format!("niche keyword {i}"), 500 + i * 100, 60.0))
      .collect();
    let full = to_pdf(&results).unwrap();

    assert!(full.starts_with(b"%PDF"));
    assert!(full.len() > empty.len());
  }

  #[test]
  fn truncate_respects_char_boundaries() {
    assert_eq!(truncate("short", 30), "short");
    assert_eq!(truncate("ünïcödé keyword that runs very long", 10), "ünïcödé ke");
  }
}
