//! # tag-printer
//!
//! Barcode rendering and label printing library - low-level capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to render and print:
//! - Code 128 symbol encoding
//! - SVG rendering of barcode graphics
//! - Raster export on a fixed canvas (PNG/JPEG)
//! - ESC/POS command building (Windows-1252 text, native Code 128)
//! - Network printing (TCP port 9100)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Tag payloads, option catalog, print queue → tag-station
//!
//! ## Example
//!
//! ```ignore
//! use tag_printer::{Barcode, BarcodeOptions, Canvas, RasterFormat, raster};
//!
//! let opts = BarcodeOptions::default().with_text("Cebu - Ram - Kingston");
//! let barcode = Barcode::render("CB|RM|Kingston", opts)?;
//!
//! let svg = barcode.to_svg();
//! let png = raster::render(&barcode, Canvas::default(), RasterFormat::Png)?;
//! ```

pub mod barcode;
pub mod code128;
mod encoding;
mod error;
mod escpos;
pub mod font;
mod printer;
#[cfg(feature = "image")]
pub mod raster;

// Re-exports
pub use barcode::{Barcode, BarcodeOptions, Symbology};
pub use code128::{Code128, CodeSet};
pub use encoding::{to_cp1252, truncate};
pub use error::{PrintError, PrintResult};
pub use escpos::{EscPosBuilder, HriPosition};
pub use printer::{DEFAULT_PORT, NetworkPrinter, Printer};

#[cfg(feature = "image")]
pub use raster::{CANVAS_HEIGHT, CANVAS_WIDTH, Canvas, RasterFormat};
