//! Chart export.
//!
//! A rendered chart is exported either as a PNG image or as a one-page PDF
//! document embedding that image. File names are time based
//! (`chart-<unix millis>.png`).
//!
//! When the plotting backend cannot hand over its canvas, a flat preview of
//! the series is rasterised with [`render_chart_preview`].

use crate::data::{ChartSeries, SeriesLayout};
use crate::pdf::write_image_document;
use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while exporting a chart
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No chart available to export")]
    NoChart,

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Failed to save export: {0}")]
    Sink(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Export formats offered by the chart page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Pdf => "PDF",
        }
    }
}

/// An encoded export ready to be saved
#[derive(Clone, Debug)]
pub struct ExportedFile {
    pub filename: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

/// Destination for exported files (download prompt, directory, ...)
pub trait ExportSink {
    fn save(&mut self, file: &ExportedFile) -> Result<(), String>;
}

/// Writes exports into a directory
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, file: &ExportedFile) -> PathBuf {
        self.dir.join(&file.filename)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn save(&mut self, file: &ExportedFile) -> Result<(), String> {
        std::fs::create_dir_all(&self.dir).map_err(|e| e.to_string())?;
        std::fs::write(self.path_for(file), &file.bytes).map_err(|e| e.to_string())
    }
}

/// Time-based export file name
pub fn export_filename(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!("chart-{}.{}", at.timestamp_millis(), format.extension())
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> ExportResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encode a rendered chart in the requested format
pub fn export_chart(
    image: &RgbaImage,
    format: ExportFormat,
    at: DateTime<Utc>,
) -> ExportResult<ExportedFile> {
    let bytes = match format {
        ExportFormat::Png => encode_png(image)?,
        ExportFormat::Pdf => write_image_document(&DynamicImage::ImageRgba8(image.clone()))
            .map_err(ExportError::Pdf)?,
    };
    let filename = export_filename(format, at);
    debug!(%filename, bytes = bytes.len(), "Encoded chart export");
    Ok(ExportedFile {
        filename,
        format,
        bytes,
    })
}

/// Parse a `#RRGGBB` palette entry
pub fn parse_hex_color(hex: &str) -> Option<Rgba<u8>> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

const BACKGROUND: Rgba<u8> = Rgba([248, 249, 250, 255]);
const PRIMARY: Rgba<u8> = Rgba([0x1F, 0xB8, 0xCD, 255]);
const PREVIEW_MARGIN: u32 = 8;

/// Rasterise a flat preview of the series.
///
/// Bar, line and 3D series draw one bar per row, pie series a stacked band
/// of slice colors, scatter series a dot per point. Negative values are
/// drawn as zero.
pub fn render_chart_preview(series: &ChartSeries, width: u32, height: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width.max(1), height.max(1), BACKGROUND);
    if series.is_empty() || width <= PREVIEW_MARGIN * 2 || height <= PREVIEW_MARGIN * 2 {
        return image;
    }

    let plot_w = width - PREVIEW_MARGIN * 2;
    let plot_h = height - PREVIEW_MARGIN * 2;
    let max = series.max_value.max(0.0);

    match &series.layout {
        SeriesLayout::Distribution { colors } => {
            let total: f64 = series.y_values.iter().map(|v| v.max(0.0)).sum();
            if total <= 0.0 {
                return image;
            }
            let mut x = PREVIEW_MARGIN as f64;
            for (value, color) in series.y_values.iter().zip(colors) {
                let slice_w = value.max(0.0) / total * plot_w as f64;
                let color = parse_hex_color(color).unwrap_or(PRIMARY);
                fill_rect(&mut image, x as u32, PREVIEW_MARGIN, slice_w.ceil() as u32, plot_h, color);
                x += slice_w;
            }
        }
        SeriesLayout::Correlation { x_positions } => {
            let min_x = x_positions.iter().copied().fold(f64::INFINITY, f64::min);
            let max_x = x_positions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let span_x = (max_x - min_x).max(f64::EPSILON);
            for (&px, &py) in x_positions.iter().zip(&series.y_values) {
                let x = PREVIEW_MARGIN as f64 + (px - min_x) / span_x * (plot_w - 1) as f64;
                let y_frac = if max > 0.0 { py.max(0.0) / max } else { 0.0 };
                let y = PREVIEW_MARGIN as f64 + (1.0 - y_frac) * (plot_h - 1) as f64;
                fill_rect(&mut image, (x as u32).saturating_sub(1), (y as u32).saturating_sub(1), 3, 3, PRIMARY);
            }
        }
        SeriesLayout::Categorical | SeriesLayout::Volumetric { .. } => {
            let slot = plot_w as f64 / series.len() as f64;
            let bar_w = (slot * 0.7).max(1.0) as u32;
            for (i, value) in series.y_values.iter().enumerate() {
                let frac = if max > 0.0 { value.max(0.0) / max } else { 0.0 };
                let bar_h = (frac * plot_h as f64).round() as u32;
                let x = PREVIEW_MARGIN + (i as f64 * slot + slot * 0.15) as u32;
                let y = PREVIEW_MARGIN + plot_h - bar_h;
                fill_rect(&mut image, x, y, bar_w, bar_h, PRIMARY);
            }
        }
    }

    image
}

fn fill_rect(image: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x_end = x.saturating_add(w).min(image.width());
    let y_end = y.saturating_add(h).min(image.height());
    for py in y..y_end {
        for px in x..x_end {
            image.put_pixel(px, py, color);
        }
    }
}
