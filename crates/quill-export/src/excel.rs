//! Excel renderer: a main analysis sheet plus competing-book and
//! related-query detail sheets when there is data for them.

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use quill_core::keyword::KeywordResult;

use crate::Result;

/// Books listed per keyword on the detail sheet.
const BOOKS_PER_KEYWORD: usize = 5;
/// Related queries listed per keyword and type on the detail sheet.
const QUERIES_PER_KEYWORD: usize = 10;

pub fn to_excel(results: &[KeywordResult]) -> Result<Vec<u8>> {
  let mut workbook = Workbook::new();
  let header = Format::new().set_bold();

  write_analysis_sheet(workbook.add_worksheet(), results, &header)?;

  if results.iter().any(|r| !r.competition.top_books.is_empty()) {
    write_books_sheet(workbook.add_worksheet(), results, &header)?;
  }
  if results
    .iter()
    .any(|r| !r.trends.related_top.is_empty() || !r.trends.related_rising.is_empty())
  {
    write_queries_sheet(workbook.add_worksheet(), results, &header)?;
  }

  Ok(workbook.save_to_buffer()?)
}

fn write_analysis_sheet(
  sheet:   &mut Worksheet,
  results: &[KeywordResult],
  header:  &Format,
) -> Result<()> {
  sheet.set_name("Keyword Analysis")?;

  let columns = [
    "Keyword",
    "Difficulty Score",
    "Profitability Score",
    "Competing Listings",
    "Average Price",
    "Average Reviews",
    "Competition Level",
    "Average Interest",
    "Categories",
  ];
  for (col, title) in columns.iter().enumerate() {
    sheet.write_string_with_format(0, col as u16, *title, header)?;
  }

  for (i, r) in results.iter().enumerate() {
    let row = (i + 1) as u32;
    sheet.write_string(row, 0, &r.keyword)?;
    sheet.write_number(row, 1, r.difficulty)?;
    sheet.write_number(row, 2, r.profitability)?;
    sheet.write_number(row, 3, r.competition.competing_listings as f64)?;
    sheet.write_number(row, 4, r.competition.average_price)?;
    sheet.write_number(row, 5, r.competition.average_reviews)?;
    sheet.write_string(row, 6, r.competition.level.label())?;
    sheet.write_number(row, 7, r.trends.average_interest)?;
    sheet.write_string(row, 8, r.competition.categories.join(", "))?;
  }

  Ok(())
}

fn write_books_sheet(
  sheet:   &mut Worksheet,
  results: &[KeywordResult],
  header:  &Format,
) -> Result<()> {
  sheet.set_name("Top Competing Books")?;

  let columns = ["Keyword", "Book Title", "Price", "Reviews Count", "Rating", "Format"];
  for (col, title) in columns.iter().enumerate() {
    sheet.write_string_with_format(0, col as u16, *title, header)?;
  }

  let mut row = 1u32;
  for r in results {
    for book in r.competition.top_books.iter().take(BOOKS_PER_KEYWORD) {
      sheet.write_string(row, 0, &r.keyword)?;
      sheet.write_string(row, 1, &book.title)?;
      sheet.write_number(row, 2, book.price.unwrap_or(0.0))?;
      sheet.write_number(row, 3, book.reviews_count.unwrap_or(0) as f64)?;
      sheet.write_number(row, 4, book.rating.unwrap_or(0.0))?;
      sheet.write_string(row, 5, book.format.as_deref().unwrap_or(""))?;
      row += 1;
    }
  }

  Ok(())
}

fn write_queries_sheet(
  sheet:   &mut Worksheet,
  results: &[KeywordResult],
  header:  &Format,
) -> Result<()> {
  sheet.set_name("Related Queries")?;

  let columns = ["Original Keyword", "Related Query", "Type"];
  for (col, title) in columns.iter().enumerate() {
    sheet.write_string_with_format(0, col as u16, *title, header)?;
  }

  let mut row = 1u32;
  for r in results {
    for query in r.trends.related_top.iter().take(QUERIES_PER_KEYWORD) {
      sheet.write_string(row, 0, &r.keyword)?;
      sheet.write_string(row, 1, query)?;
      sheet.write_string(row, 2, "Top")?;
      row += 1;
    }
    for query in r.trends.related_rising.iter().take(QUERIES_PER_KEYWORD) {
      sheet.write_string(row, 0, &r.keyword)?;
      sheet.write_string(row, 1, query)?;
      sheet.write_string(row, 2, "Rising")?;
      row += 1;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_helpers::sample_result;

  // XLSX files are zip archives: PK\x03\x04 magic.
  const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

  #[test]
  fn empty_results_produce_a_valid_workbook() {
    let bytes = to_excel(&[]).unwrap();
    assert!(bytes.starts_with(ZIP_MAGIC));
  }

  #[test]
  fn populated_results_produce_a_larger_workbook() {
    let empty = to_excel(&[]).unwrap();
    let results = vec![
      sample_result("vegan cookbook", 12_000, 55.0),
      sample_result("dog training", 800, 70.0),
    ];
    let full = to_excel(&results).unwrap();

    assert!(full.starts_with(ZIP_MAGIC));
    assert!(full.len() > empty.len());
  }
}
