//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS label data.

use crate::code128::Code128;
use crate::encoding::{CP1252_PAGE, to_cp1252};
use crate::error::{PrintError, PrintResult};

/// Position of the human-readable interpretation under a native barcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HriPosition {
    None = 0,
    Above = 1,
    Below = 2,
}

/// ESC/POS command builder
///
/// Text is encoded as Windows-1252; the builder selects that code page on
/// initialization.
pub struct EscPosBuilder {
    buf: Vec<u8>,
}

impl EscPosBuilder {
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(1024);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        // Select character code table (ESC t n)
        buf.extend_from_slice(&[0x1B, 0x74, CP1252_PAGE]);
        Self { buf }
    }

    // === Text Output ===

    /// Write text in the printer code page
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(&to_cp1252(s));
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    // === Alignment ===

    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    // === Text Style ===

    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    // === Barcode ===

    /// Print a native Code 128 barcode
    ///
    /// `height` is in dots, `module_width` is clamped to the 2..=6 range
    /// printers accept. The payload must be printable ASCII.
    pub fn barcode_code128(
        &mut self,
        payload: &str,
        height: u8,
        module_width: u8,
        hri: HriPosition,
    ) -> PrintResult<&mut Self> {
        // Same character rules as the rendered symbol
        Code128::encode(payload)?;

        // Code set B prefix, literal '{' is escaped as "{{"
        let mut data = b"{B".to_vec();
        for b in payload.bytes() {
            if b == b'{' {
                data.push(b'{');
            }
            data.push(b);
        }
        if data.len() > u8::MAX as usize {
            return Err(PrintError::InvalidConfig(format!(
                "Barcode payload too long: {} bytes",
                data.len()
            )));
        }

        // GS h n - bar height
        self.buf.extend_from_slice(&[0x1D, 0x68, height.max(1)]);
        // GS w n - module width
        self.buf
            .extend_from_slice(&[0x1D, 0x77, module_width.clamp(2, 6)]);
        // GS H n - HRI position
        self.buf.extend_from_slice(&[0x1D, 0x48, hri as u8]);
        // GS k m n d1..dn - CODE128 (m = 73)
        self.buf
            .extend_from_slice(&[0x1D, 0x6B, 0x49, data.len() as u8]);
        self.buf.extend_from_slice(&data);
        self.buf.push(b'\n');

        Ok(self)
    }

    // === Paper Control ===

    /// Full cut after feeding n lines (GS V 66 n)
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    // === Build ===

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new()
    }
}
