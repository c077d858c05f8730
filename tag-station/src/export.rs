//! Raster export of the preview graphic
//!
//! Rasterization runs on the blocking pool; the file write is async.

use crate::utils::print_error;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::util::now_millis;
use std::path::PathBuf;
use tag_printer::{Barcode, Canvas, RasterFormat, raster};
use tracing::{info, instrument};

/// `Tag-<timestamp_ms>.<ext>`
pub fn export_file_name(format: RasterFormat, timestamp_ms: i64) -> String {
    format!("Tag-{}.{}", timestamp_ms, format.extension())
}

#[derive(Debug, Clone)]
pub struct ImageExporter {
    export_dir: PathBuf,
    canvas: Canvas,
}

impl ImageExporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
            canvas: Canvas::default(),
        }
    }

    /// Rasterize and encode off the async executor
    pub async fn render(&self, barcode: &Barcode, format: RasterFormat) -> AppResult<Vec<u8>> {
        let barcode = barcode.clone();
        let canvas = self.canvas;

        tokio::task::spawn_blocking(move || raster::render(&barcode, canvas, format))
            .await
            .map_err(|e| AppError::internal(format!("Render task failed: {}", e)))?
            .map_err(print_error)
    }

    /// Encoded image as a `data:` URL
    pub async fn data_url(&self, barcode: &Barcode, format: RasterFormat) -> AppResult<String> {
        let bytes = self.render(barcode, format).await?;
        Ok(raster::to_data_url(&bytes, format))
    }

    /// Write `Tag-<ts>.<ext>` into the export directory and return its path
    #[instrument(skip(self, barcode), fields(payload = barcode.payload()))]
    pub async fn export(&self, barcode: &Barcode, format: RasterFormat) -> AppResult<PathBuf> {
        let bytes = self.render(barcode, format).await?;

        let export_failed = |e: std::io::Error| {
            AppError::with_message(ErrorCode::ExportFailed, format!("Export failed: {}", e))
        };

        tokio::fs::create_dir_all(&self.export_dir)
            .await
            .map_err(export_failed)?;

        let path = self
            .export_dir
            .join(export_file_name(format, now_millis()));
        tokio::fs::write(&path, &bytes).await.map_err(export_failed)?;

        info!(path = %path.display(), bytes = bytes.len(), "Tag image exported");
        Ok(path)
    }
}
