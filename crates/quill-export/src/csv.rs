//! CSV renderer: one row per keyword with the headline numbers.

use quill_core::keyword::KeywordResult;

use crate::{Error, Result};

const HEADER: [&str; 10] = [
  "keyword",
  "difficulty_score",
  "profitability_score",
  "competing_listings",
  "avg_price",
  "avg_reviews",
  "competition_level",
  "average_interest",
  "related_queries_top",
  "categories",
];

/// How many related queries are folded into the CSV cell.
const RELATED_IN_CELL: usize = 5;

pub fn to_csv(results: &[KeywordResult]) -> Result<Vec<u8>> {
  let mut writer = ::csv::Writer::from_writer(Vec::new());
  writer.write_record(HEADER)?;

  for r in results {
    let related: Vec<&str> = r
      .trends
      .related_top
      .iter()
      .take(RELATED_IN_CELL)
      .map(String::as_str)
      .collect();

    let record = [
      r.keyword.clone(),
      format!("{:.2}", r.difficulty),
      format!("{:.2}", r.profitability),
      r.competition.competing_listings.to_string(),
      format!("{:.2}", r.competition.average_price),
      format!("{:.1}", r.competition.average_reviews),
      r.competition.level.label().to_string(),
      format!("{:.2}", r.trends.average_interest),
      related.join(", "),
      r.competition.categories.join(", "),
    ];
    writer.write_record(&record)?;
  }

  writer
    .into_inner()
    .map_err(|e| Error::CsvBuffer(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_helpers::sample_result;

  #[test]
  fn empty_results_still_emit_a_header() {
    let bytes = to_csv(&[]).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("keyword,difficulty_score"));
  }

  #[test]
  fn one_row_per_result() {
    let results = vec![
      sample_result("vegan cookbook", 12_000, 55.0),
      sample_result("dog training", 800, 70.0),
    ];
    let bytes = to_csv(&results).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("vegan cookbook"));
    assert!(text.contains("Medium competition"));
    assert!(text.contains("Low competition"));
  }

  #[test]
  fn keywords_with_commas_are_quoted() {
    let results = vec![sample_result("baking, frosting, and icing", 10, 5.0)];
    let bytes = to_csv(&results).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("\"baking, frosting, and icing\""));
  }
}
