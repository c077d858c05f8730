//! Barcode rendering
//!
//! Turns a payload into a rendered Code 128 graphic: the encoded symbol,
//! its geometry and an optional human-readable caption. The graphic can be
//! serialized as standalone SVG markup (for the print queue) or handed to
//! the raster renderer (for image export).

use crate::code128::Code128;
use crate::error::PrintResult;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::instrument;

/// Supported linear symbologies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbology {
    #[default]
    Code128,
}

/// Rendering options for a barcode graphic
///
/// Units are SVG user units (pixels at 1:1 raster scale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarcodeOptions {
    pub symbology: Symbology,
    /// Width of a single module
    pub module_width: f32,
    /// Bar height
    pub height: f32,
    /// Render the human-readable caption below the bars
    pub display_value: bool,
    /// Caption override (defaults to the encoded text)
    #[serde(default)]
    pub text: Option<String>,
    pub font: String,
    pub font_size: f32,
    /// Quiet zone around the whole graphic
    pub margin: f32,
    /// Gap between bars and caption
    #[serde(default = "default_text_margin")]
    pub text_margin: f32,
}

fn default_text_margin() -> f32 {
    2.0
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            symbology: Symbology::Code128,
            module_width: 2.2,
            height: 65.0,
            display_value: true,
            text: None,
            font: "monospace".to_string(),
            font_size: 14.0,
            margin: 10.0,
            text_margin: default_text_margin(),
        }
    }
}

impl BarcodeOptions {
    /// Set the caption override
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A rendered barcode graphic
#[derive(Debug, Clone, PartialEq)]
pub struct Barcode {
    code: Code128,
    options: BarcodeOptions,
}

impl Barcode {
    /// Encode `payload` and lay it out with `options`
    #[instrument(skip(options), fields(symbology = ?options.symbology))]
    pub fn render(payload: &str, options: BarcodeOptions) -> PrintResult<Self> {
        let code = match options.symbology {
            Symbology::Code128 => Code128::encode(payload)?,
        };
        tracing::debug!(modules = code.module_count(), "barcode encoded");
        Ok(Self { code, options })
    }

    /// The encoded symbol
    pub fn code(&self) -> &Code128 {
        &self.code
    }

    pub fn options(&self) -> &BarcodeOptions {
        &self.options
    }

    /// The encoded payload
    pub fn payload(&self) -> &str {
        self.code.text()
    }

    /// Caption text, if the caption is shown
    pub fn caption(&self) -> Option<&str> {
        if !self.options.display_value {
            return None;
        }
        Some(self.options.text.as_deref().unwrap_or(self.code.text()))
    }

    /// Width of the bar area
    pub fn bars_width(&self) -> f32 {
        self.code.module_count() as f32 * self.options.module_width
    }

    /// Height of the caption block (text margin included), zero when hidden
    pub fn caption_height(&self) -> f32 {
        if self.options.display_value {
            self.options.font_size + self.options.text_margin
        } else {
            0.0
        }
    }

    /// Total graphic width
    pub fn width(&self) -> f32 {
        self.bars_width() + self.options.margin * 2.0
    }

    /// Total graphic height
    pub fn height(&self) -> f32 {
        self.options.height + self.caption_height() + self.options.margin * 2.0
    }

    /// Serialize as standalone SVG markup
    pub fn to_svg(&self) -> String {
        let opts = &self.options;
        let width = num(self.width());
        let height = num(self.height());

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}px" height="{h}px" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        );
        let _ = write!(
            svg,
            r##"<rect x="0" y="0" width="{}" height="{}" style="fill:#ffffff;"/>"##,
            width, height
        );
        let _ = write!(
            svg,
            r##"<g transform="translate({m}, {m})" style="fill:#000000;">"##,
            m = num(opts.margin)
        );

        for (offset, modules) in self.code.bars() {
            let _ = write!(
                svg,
                r#"<rect x="{}" y="0" width="{}" height="{}"/>"#,
                num(offset as f32 * opts.module_width),
                num(modules as f32 * opts.module_width),
                num(opts.height)
            );
        }

        if let Some(caption) = self.caption() {
            let _ = write!(
                svg,
                r#"<text style="font: {size}px {font}" text-anchor="middle" x="{x}" y="{y}">{text}</text>"#,
                size = num(opts.font_size),
                font = escape_xml(&opts.font),
                x = num(self.bars_width() / 2.0),
                y = num(opts.height + opts.text_margin + opts.font_size),
                text = escape_xml(caption)
            );
        }

        svg.push_str("</g></svg>");
        svg
    }
}

/// Format a coordinate without float noise ("4.4", not "4.4000001")
fn num(v: f32) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = BarcodeOptions::default();
        assert_eq!(opts.symbology, Symbology::Code128);
        assert_eq!(opts.module_width, 2.2);
        assert_eq!(opts.height, 65.0);
        assert!(opts.display_value);
        assert_eq!(opts.font, "monospace");
        assert_eq!(opts.font_size, 14.0);
        assert_eq!(opts.margin, 10.0);
    }

    #[test]
    fn test_geometry() {
        let barcode = Barcode::render("123456", BarcodeOptions::default()).unwrap();
        // 5 symbols * 11 + 13 stop modules
        assert_eq!(barcode.code().module_count(), 68);
        assert!((barcode.width() - (68.0 * 2.2 + 20.0)).abs() < 0.01);
        assert!((barcode.height() - (65.0 + 16.0 + 20.0)).abs() < 0.01);
    }

    #[test]
    fn test_caption_override() {
        let opts = BarcodeOptions::default().with_text("Cebu - Ram - Kingston");
        let barcode = Barcode::render("CB|RM|Kingston", opts).unwrap();
        assert_eq!(barcode.caption(), Some("Cebu - Ram - Kingston"));
        assert_eq!(barcode.payload(), "CB|RM|Kingston");
    }

    #[test]
    fn test_hidden_caption() {
        let opts = BarcodeOptions {
            display_value: false,
            ..BarcodeOptions::default()
        };
        let barcode = Barcode::render("ABC", opts).unwrap();
        assert_eq!(barcode.caption(), None);
        assert_eq!(barcode.caption_height(), 0.0);
        assert!(!barcode.to_svg().contains("<text"));
    }

    #[test]
    fn test_svg_markup() {
        let opts = BarcodeOptions::default().with_text("A & B");
        let barcode = Barcode::render("AB", opts).unwrap();
        let svg = barcode.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</g></svg>"));
        assert!(svg.contains("A &amp; B"));
        // first bar of start B is two modules wide
        assert!(svg.contains(r#"<rect x="0" y="0" width="4.4" height="65"/>"#));
        let bars = svg.matches("<rect").count() - 1;
        assert_eq!(bars, barcode.code().bars().len());
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(4.4), "4.4");
        assert_eq!(num(65.0), "65");
        assert_eq!(num(0.0), "0");
        assert_eq!(num(10.5), "10.5");
    }
}
