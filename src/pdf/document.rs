//! Single-page PDF documents holding one chart image.

use super::PdfiumLoader;
use image::DynamicImage;
use pdfium_render::prelude::*;

/// Margin around the chart on the page, in millimetres
const PAGE_MARGIN_MM: f32 = 10.0;

/// Place `image` at the top of an A4 page and return the document bytes.
///
/// The image is scaled to the printable width, keeping its aspect ratio.
pub fn write_image_document(image: &DynamicImage) -> Result<Vec<u8>, String> {
    let pdfium = PdfiumLoader::load()?;
    let mut document = pdfium
        .create_new_pdf()
        .map_err(|e| format!("Failed to create document: {:?}", e))?;

    let paper = PdfPagePaperSize::a4();
    let mut page = document
        .pages_mut()
        .create_page_at_end(paper)
        .map_err(|e| format!("Failed to add page: {:?}", e))?;

    let margin = PdfPoints::from_mm(PAGE_MARGIN_MM);
    let width = PdfPoints::new(page.width().value - margin.value * 2.0);
    let height = PdfPoints::new(width.value * image.height() as f32 / image.width().max(1) as f32);
    let bottom = PdfPoints::new(page.height().value - margin.value - height.value);

    page.objects_mut()
        .create_image_object(margin, bottom, image, Some(width), Some(height))
        .map_err(|e| format!("Failed to place chart image: {:?}", e))?;

    document
        .save_to_bytes()
        .map_err(|e| format!("Failed to serialize document: {:?}", e))
}
