//! Raster export
//!
//! Draws a rendered barcode onto a fixed-size white canvas, centered, and
//! encodes the result as PNG or JPEG.

use crate::barcode::Barcode;
use crate::error::{PrintError, PrintResult};
use crate::font;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

pub const CANVAS_WIDTH: u32 = 400;
pub const CANVAS_HEIGHT: u32 = 200;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Target canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

/// Raster output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    /// File extension (without dot)
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for RasterFormat {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            other => Err(PrintError::InvalidConfig(format!(
                "Unsupported image format: {}",
                other
            ))),
        }
    }
}

/// Draw `barcode` centered on a white canvas
///
/// Graphics wider or taller than the canvas are clipped symmetrically.
#[instrument(skip(barcode), fields(payload = barcode.payload()))]
pub fn rasterize(barcode: &Barcode, canvas: Canvas) -> RgbImage {
    let mut img = RgbImage::from_pixel(canvas.width, canvas.height, WHITE);
    let opts = barcode.options();

    let origin_x = (canvas.width as f32 - barcode.width()) / 2.0 + opts.margin;
    let origin_y = (canvas.height as f32 - barcode.height()) / 2.0 + opts.margin;

    for (offset, modules) in barcode.code().bars() {
        let x0 = origin_x + offset as f32 * opts.module_width;
        let x1 = x0 + modules as f32 * opts.module_width;
        fill_rect(&mut img, x0, origin_y, x1, origin_y + opts.height);
    }

    if let Some(caption) = barcode.caption() {
        let scale = font::scale_for(opts.font_size);
        let text_w = font::text_width(caption, scale) as f32;
        let text_x = (origin_x + barcode.bars_width() / 2.0 - text_w / 2.0).round() as i64;
        let text_y = (origin_y + opts.height + opts.text_margin).round() as i64;

        font::for_each_pixel(caption, scale, |dx, dy| {
            put_pixel(&mut img, text_x + dx as i64, text_y + dy as i64);
        });
    }

    img
}

/// Encode a canvas in the requested format (JPEG at full quality)
pub fn encode(img: &RgbImage, format: RasterFormat) -> PrintResult<Vec<u8>> {
    let mut buf = Vec::new();
    let (w, h) = img.dimensions();

    let result = match format {
        RasterFormat::Png => image::codecs::png::PngEncoder::new(&mut buf).write_image(
            img.as_raw(),
            w,
            h,
            ExtendedColorType::Rgb8,
        ),
        RasterFormat::Jpeg => image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 100)
            .write_image(img.as_raw(), w, h, ExtendedColorType::Rgb8),
    };
    result.map_err(|e| PrintError::Encode(e.to_string()))?;

    Ok(buf)
}

/// Rasterize and encode in one step
pub fn render(barcode: &Barcode, canvas: Canvas, format: RasterFormat) -> PrintResult<Vec<u8>> {
    encode(&rasterize(barcode, canvas), format)
}

/// Wrap encoded image bytes in a `data:` URL
pub fn to_data_url(bytes: &[u8], format: RasterFormat) -> String {
    use base64::Engine;

    format!(
        "data:{};base64,{}",
        format.mime_type(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

fn fill_rect(img: &mut RgbImage, x0: f32, y0: f32, x1: f32, y1: f32) {
    let (w, h) = img.dimensions();
    let xs = x0.round().max(0.0) as u32;
    let xe = (x1.round().max(0.0) as u32).min(w);
    let ys = y0.round().max(0.0) as u32;
    let ye = (y1.round().max(0.0) as u32).min(h);

    for y in ys..ye {
        for x in xs..xe {
            img.put_pixel(x, y, BLACK);
        }
    }
}

fn put_pixel(img: &mut RgbImage, x: i64, y: i64) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    img.put_pixel(x as u32, y as u32, BLACK);
}
