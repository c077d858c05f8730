//! Printable HTML sheet
//!
//! Writes the queue's graphics (and nothing else) into a standalone page
//! that opens the browser print dialog on load.

use super::types::{PrintHost, PrintReceipt};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::QueueEntry;
use shared::util::now_millis;
use std::path::PathBuf;
use tracing::{info, instrument};

const SHEET_STYLE: &str = "\
@page { margin: 10mm; }
body { margin: 0; }
.queued-item { page-break-inside: avoid; break-inside: avoid; margin: 0 0 6mm 0; }
.queued-item svg { display: block; }
";

/// `Queue-<timestamp_ms>.html`
pub fn sheet_file_name(timestamp_ms: i64) -> String {
    format!("Queue-{}.html", timestamp_ms)
}

/// Build the sheet markup for `entries`
pub fn render_sheet(entries: &[QueueEntry]) -> String {
    let graphics: usize = entries.iter().map(|e| e.rendered_graphic.len()).sum();
    let mut html = String::with_capacity(512 + graphics);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Print Queue</title>\n<style>\n");
    html.push_str(SHEET_STYLE);
    html.push_str("</style>\n</head>\n<body onload=\"window.print()\">\n");
    for entry in entries {
        html.push_str("<div class=\"queued-item\">");
        html.push_str(&entry.rendered_graphic);
        html.push_str("</div>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Print host writing an HTML sheet for the host browser
#[derive(Debug, Clone)]
pub struct HtmlSheetHost {
    print_dir: PathBuf,
}

impl HtmlSheetHost {
    pub fn new(print_dir: impl Into<PathBuf>) -> Self {
        Self {
            print_dir: print_dir.into(),
        }
    }
}

impl PrintHost for HtmlSheetHost {
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    async fn print(&self, entries: &[QueueEntry]) -> AppResult<PrintReceipt> {
        let print_failed = |e: std::io::Error| {
            AppError::with_message(
                ErrorCode::PrintFailed,
                format!("Cannot write print sheet: {}", e),
            )
        };

        tokio::fs::create_dir_all(&self.print_dir)
            .await
            .map_err(print_failed)?;

        let path = self.print_dir.join(sheet_file_name(now_millis()));
        tokio::fs::write(&path, render_sheet(entries))
            .await
            .map_err(print_failed)?;

        info!(path = %path.display(), "Print sheet written");
        Ok(PrintReceipt {
            printed: entries.len(),
            destination: path.display().to_string(),
        })
    }

    fn describe(&self) -> String {
        format!("HTML sheet in {}", self.print_dir.display())
    }
}
