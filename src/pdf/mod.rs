//! PDF chart export using pdfium.
//!
//! - `document` - one-page documents embedding a rendered chart
//! - `pdfium_loader` - PDFium library loading logic

mod document;
mod pdfium_loader;

pub use document::write_image_document;
pub use pdfium_loader::PdfiumLoader;
