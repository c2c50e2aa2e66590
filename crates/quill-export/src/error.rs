//! Error type for `quill-export`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("csv error: {0}")]
  Csv(#[from] ::csv::Error),

  #[error("csv buffer error: {0}")]
  CsvBuffer(String),

  #[error("xlsx error: {0}")]
  Xlsx(#[from] rust_xlsxwriter::XlsxError),

  #[error("pdf error: {0}")]
  Pdf(#[from] printpdf::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
