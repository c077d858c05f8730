//! Text encoding for ESC/POS printers
//!
//! Label printers run in the Windows-1252 code page (ESC t 16) so Latin
//! names such as "Muñoz" print correctly. Characters outside the code page
//! are replaced with '?'.

use encoding_rs::WINDOWS_1252;

/// ESC/POS code page number for WPC1252
pub const CP1252_PAGE: u8 = 16;

/// Convert UTF-8 text to Windows-1252 bytes
pub fn to_cp1252(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        let mut tmp = [0u8; 4];
        let (bytes, _, unmappable) = WINDOWS_1252.encode(ch.encode_utf8(&mut tmp));
        if unmappable {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}

/// Truncate text to a maximum column width
pub fn truncate(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}
