//! PDF module
//!
//! Text-layer extraction and page rasterization using MuPDF.

mod parser;
mod source;
mod types;

pub use parser::{PdfParseError, PdfParser};
pub use source::PageSource;
pub use types::{PageRenderRequest, PDF_POINTS_PER_INCH};

#[cfg(test)]
pub(crate) mod fixtures;
