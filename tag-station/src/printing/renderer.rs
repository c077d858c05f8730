//! Tag label renderer
//!
//! Renders queue entries into ESC/POS label data: caption on top, native
//! Code 128 of the payload with its text below, then a cut.

use crate::utils::print_error;
use shared::error::AppResult;
use shared::models::QueueEntry;
use tag_printer::{EscPosBuilder, HriPosition, truncate};

/// ESC/POS tag label renderer
pub struct TagLabelRenderer {
    width: usize,
    bar_height: u8,
    module_width: u8,
}

impl TagLabelRenderer {
    /// Create a renderer for the given paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        Self {
            width,
            bar_height: 80,
            module_width: 2,
        }
    }

    /// Render every entry into one job, one cut label per entry
    pub fn render(&self, entries: &[QueueEntry]) -> AppResult<Vec<u8>> {
        let mut b = EscPosBuilder::new();
        for entry in entries {
            self.render_label(&mut b, entry)?;
        }
        Ok(b.build())
    }

    fn render_label(&self, b: &mut EscPosBuilder, entry: &QueueEntry) -> AppResult<()> {
        b.center();
        b.bold();
        b.line(&truncate(&entry.label, self.width));
        b.bold_off();

        b.barcode_code128(
            &entry.payload,
            self.bar_height,
            self.module_width,
            HriPosition::Below,
        )
        .map_err(print_error)?;

        if let Some(ts) = entry.created_at_utc() {
            b.line(&ts.format("%Y-%m-%d %H:%M").to_string());
        }

        b.left();
        b.cut_feed(3);
        Ok(())
    }
}

impl Default for TagLabelRenderer {
    fn default() -> Self {
        Self::new(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    fn entry(payload: &str, label: &str) -> QueueEntry {
        QueueEntry {
            id: 1,
            rendered_graphic: String::new(),
            payload: payload.into(),
            label: label.into(),
            created_at: 1_705_912_335_000,
        }
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn test_one_cut_per_entry() {
        let data = TagLabelRenderer::default()
            .render(&[
                entry("CB|RM|Kingston", "Cebu - Ram - Kingston"),
                entry("PS|MN|AOC", "Pasay - Monitor - AOC"),
            ])
            .unwrap();

        assert_eq!(count(&data, &[0x1D, 0x56, 0x42]), 2);
        assert_eq!(count(&data, &[0x1D, 0x6B, 0x49]), 2);
        assert_eq!(count(&data, b"Cebu - Ram - Kingston"), 1);
        assert_eq!(count(&data, b"2024-01-22 08:32"), 2);
    }

    #[test]
    fn test_caption_cp1252() {
        let data = TagLabelRenderer::default()
            .render(&[entry("MZ|KB|Razer", "Muñoz - Keyboard - Razer")])
            .unwrap();
        assert_eq!(count(&data, &[b'M', b'u', 0xF1, b'o', b'z']), 1);
    }

    #[test]
    fn test_unencodable_payload() {
        let err = TagLabelRenderer::default()
            .render(&[entry("CB|RM|Café", "x")])
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BarcodeEncodeFailed);
    }
}
